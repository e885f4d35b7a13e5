use serde_json::Value;
use tributary_core::category::{DataOf, ParamsOf};
use tributary_core::schema::validate_records;
use tributary_core::{
    Category, Credentials, DispatchReport, Provider, RawParams, Record, TributaryError,
};

use crate::Tributary;
use crate::router::util::{join_with_deadline, to_raw_params};

/// One request of a [`Tributary::dispatch_many`] batch.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    /// Provider name.
    pub provider: String,
    /// Category name.
    pub category: String,
    /// Raw parameters.
    pub params: RawParams,
}

impl DispatchRequest {
    /// Build a request.
    pub fn new(provider: impl Into<String>, category: impl Into<String>, params: RawParams) -> Self {
        Self {
            provider: provider.into(),
            category: category.into(),
            params,
        }
    }
}

impl Tributary {
    /// Fetch `category` from `provider` with raw, unvalidated params.
    ///
    /// Steps: resolve provider and category, validate params against the
    /// query schema (the fetcher never runs on invalid input), check declared
    /// credentials, invoke the fetcher with bounded retries, then validate
    /// every record against the data schema.
    ///
    /// # Errors
    /// `UnknownProvider`, `UnknownCategory`, `Validation`, `CredentialMissing`,
    /// `Upstream`, `Transform`, `ProviderTimeout`, `SchemaViolation`, or
    /// `RequestTimeout` when a request deadline is configured.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "tributary::router", skip(self, params))
    )]
    pub async fn dispatch(
        &self,
        provider: &str,
        category: &str,
        params: &RawParams,
    ) -> Result<Vec<Record>, TributaryError> {
        self.dispatch_report(provider, category, params)
            .await
            .map(|report| report.results)
    }

    /// Like [`Tributary::dispatch`], returning the normalized params and the
    /// number of fetcher attempts alongside the records.
    ///
    /// # Errors
    /// See [`Tributary::dispatch`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "tributary::router", skip(self, params))
    )]
    pub async fn dispatch_report(
        &self,
        provider: &str,
        category: &str,
        params: &RawParams,
    ) -> Result<DispatchReport, TributaryError> {
        self.with_request_deadline(category, self.dispatch_inner(provider, category, params, None))
            .await
    }

    /// Like [`Tributary::dispatch`], with explicit credentials instead of the
    /// configured store.
    ///
    /// Only the names the provider declares are passed to the fetcher.
    ///
    /// # Errors
    /// See [`Tributary::dispatch`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "tributary::router", skip(self, params, credentials))
    )]
    pub async fn dispatch_with_credentials(
        &self,
        provider: &str,
        category: &str,
        params: &RawParams,
        credentials: &Credentials,
    ) -> Result<Vec<Record>, TributaryError> {
        self.with_request_deadline(
            category,
            self.dispatch_inner(provider, category, params, Some(credentials)),
        )
        .await
        .map(|report| report.results)
    }

    /// Typed dispatch for a known category.
    ///
    /// Params are serialized and validated like raw input, so schema
    /// constraints still apply; records are deserialized into `C::Data`.
    ///
    /// # Errors
    /// See [`Tributary::dispatch`]. A record that cannot be deserialized into
    /// `C::Data` yields `Transform`.
    pub async fn fetch<C: Category>(
        &self,
        provider: &str,
        params: ParamsOf<C>,
    ) -> Result<Vec<DataOf<C>>, TributaryError> {
        let raw = to_raw_params(&params)?;
        let records = self.dispatch(provider, C::NAME, &raw).await?;
        decode_records::<C>(provider, records)
    }

    /// Run independent dispatches concurrently.
    ///
    /// Results keep request order. The request deadline, when configured,
    /// bounds the whole batch.
    ///
    /// # Errors
    /// Returns `RequestTimeout` when the batch exceeds the request deadline.
    pub async fn dispatch_many(
        &self,
        requests: &[DispatchRequest],
    ) -> Result<Vec<Result<Vec<Record>, TributaryError>>, TributaryError> {
        let tasks = requests.iter().map(|r| async move {
            self.dispatch_inner(&r.provider, &r.category, &r.params, None)
                .await
                .map(|report| report.results)
        });
        join_with_deadline("batch", tasks, self.cfg.request_timeout).await
    }

    pub(crate) async fn dispatch_inner(
        &self,
        provider: &str,
        category: &str,
        params: &RawParams,
        credentials: Option<&Credentials>,
    ) -> Result<DispatchReport, TributaryError> {
        let entry = self
            .registry
            .get(provider)
            .ok_or_else(|| TributaryError::unknown_provider(provider))?;
        self.dispatch_to(entry, category, params, credentials).await
    }

    pub(crate) async fn dispatch_to(
        &self,
        entry: &Provider,
        category: &str,
        params: &RawParams,
        credentials: Option<&Credentials>,
    ) -> Result<DispatchReport, TributaryError> {
        let provider = entry.name();
        let fetcher = entry
            .fetcher(category)
            .ok_or_else(|| TributaryError::unknown_category(provider, category))?;

        let validated = fetcher.parse_params(params, self.cfg.strict_params)?;

        let credentials = match credentials {
            Some(given) => entry
                .credentials()
                .iter()
                .filter_map(|name| given.get(name).map(|v| (name.clone(), v.to_string())))
                .collect(),
            None => self.credentials.credentials(provider, entry.credentials()),
        };
        if fetcher.require_credentials()
            && let Some(missing) = entry
                .credentials()
                .iter()
                .find(|name| !credentials.contains(name))
        {
            return Err(TributaryError::CredentialMissing {
                provider: provider.to_string(),
                credential: missing.clone(),
            });
        }

        let (results, attempts) = self
            .call_with_retry(provider, fetcher, &validated, &credentials)
            .await?;

        validate_records(fetcher.data_schema(), &results).map_err(|issues| {
            #[cfg(feature = "tracing")]
            tracing::warn!(provider, category, issues = issues.len(), "fetcher broke data schema");
            TributaryError::SchemaViolation {
                provider: provider.to_string(),
                category: category.to_string(),
                issues,
            }
        })?;

        Ok(DispatchReport {
            provider: provider.to_string(),
            category: category.to_string(),
            params: validated.normalized().clone(),
            results,
            attempts,
        })
    }
}

pub(crate) fn decode_records<C: Category>(
    provider: &str,
    records: Vec<Record>,
) -> Result<Vec<DataOf<C>>, TributaryError> {
    records
        .into_iter()
        .map(|r| {
            serde_json::from_value(Value::Object(r)).map_err(|e| TributaryError::Transform {
                provider: provider.to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}
