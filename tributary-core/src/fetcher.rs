use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::category::{Category, DataOf, ParamsOf};
use crate::schema::{Schema, Schematic, validate_params};
use crate::{Credentials, FetchError, FieldIssue, RawParams, Record, TributaryError};

/// Retrieves raw provider data for one category and maps it into the
/// category's data schema.
///
/// Fetchers receive params that have already passed validation and the
/// credentials configured for their provider. They must not depend on
/// state mutated between calls; connection pools and similar resources live
/// inside the fetcher value.
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    /// The category this fetcher serves.
    type Category: Category;

    /// Whether the dispatcher must verify every credential the provider
    /// declares before calling [`Fetcher::fetch`].
    fn require_credentials(&self) -> bool {
        true
    }

    /// Fetch and transform records for validated `params`.
    async fn fetch(
        &self,
        params: ParamsOf<Self::Category>,
        credentials: &Credentials,
    ) -> Result<Vec<DataOf<Self::Category>>, FetchError>;
}

/// Parameters that passed a category's query schema.
///
/// Holds both the typed value handed to the fetcher and the normalized map
/// (defaults filled, values coerced) reported back to callers.
#[derive(Clone)]
pub struct ValidatedParams {
    category: &'static str,
    typed: Arc<dyn Any + Send + Sync>,
    normalized: RawParams,
}

impl ValidatedParams {
    /// Category the params were validated for.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        self.category
    }

    /// Normalized params map.
    #[must_use]
    pub const fn normalized(&self) -> &RawParams {
        &self.normalized
    }

    /// Typed params, when `P` is the category's params type.
    #[must_use]
    pub fn typed<P: 'static>(&self) -> Option<&P> {
        self.typed.downcast_ref::<P>()
    }
}

impl std::fmt::Debug for ValidatedParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedParams")
            .field("category", &self.category)
            .field("normalized", &self.normalized)
            .finish_non_exhaustive()
    }
}

/// Object-safe view of a [`Fetcher`], stored in providers.
#[async_trait]
pub trait DynFetcher: Send + Sync {
    /// Category name served.
    fn category(&self) -> &'static str;

    /// Query params schema.
    fn query_schema(&self) -> &'static Schema;

    /// Data record schema.
    fn data_schema(&self) -> &'static Schema;

    /// See [`Fetcher::require_credentials`].
    fn require_credentials(&self) -> bool;

    /// Validate raw params and build the typed value.
    ///
    /// # Errors
    /// Returns `Validation` with field-level detail.
    fn parse_params(&self, raw: &RawParams, strict: bool)
    -> Result<ValidatedParams, TributaryError>;

    /// Run the fetcher and serialize its records.
    async fn fetch_records(
        &self,
        params: &ValidatedParams,
        credentials: &Credentials,
    ) -> Result<Vec<Record>, FetchError>;
}

pub(crate) struct Erased<F>(pub(crate) F);

#[async_trait]
impl<F: Fetcher> DynFetcher for Erased<F> {
    fn category(&self) -> &'static str {
        <F::Category as Category>::NAME
    }

    fn query_schema(&self) -> &'static Schema {
        <ParamsOf<F::Category> as Schematic>::schema()
    }

    fn data_schema(&self) -> &'static Schema {
        <DataOf<F::Category> as Schematic>::schema()
    }

    fn require_credentials(&self) -> bool {
        self.0.require_credentials()
    }

    fn parse_params(
        &self,
        raw: &RawParams,
        strict: bool,
    ) -> Result<ValidatedParams, TributaryError> {
        let category = self.category();
        let normalized = validate_params(self.query_schema(), raw, strict)
            .map_err(|issues| TributaryError::validation(category, issues))?;
        let typed: ParamsOf<F::Category> =
            serde_json::from_value(Value::Object(normalized.clone())).map_err(|e| {
                TributaryError::validation(category, vec![FieldIssue::new("", e.to_string())])
            })?;
        Ok(ValidatedParams {
            category,
            typed: Arc::new(typed),
            normalized,
        })
    }

    async fn fetch_records(
        &self,
        params: &ValidatedParams,
        credentials: &Credentials,
    ) -> Result<Vec<Record>, FetchError> {
        let typed = params
            .typed::<ParamsOf<F::Category>>()
            .cloned()
            .ok_or_else(|| {
                FetchError::transform(format!(
                    "params validated for {} cannot be used for {}",
                    params.category(),
                    self.category()
                ))
            })?;
        let data = self.0.fetch(typed, credentials).await?;
        data.iter().map(to_record).collect()
    }
}

fn to_record<T: serde::Serialize>(item: &T) -> Result<Record, FetchError> {
    match serde_json::to_value(item) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(FetchError::transform(format!(
            "record serialized to {other} instead of an object"
        ))),
        Err(e) => Err(FetchError::transform(e.to_string())),
    }
}
