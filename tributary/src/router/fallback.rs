use tributary_core::category::{DataOf, ParamsOf};
use tributary_core::{Category, DispatchReport, RawParams, TributaryError};

use crate::Tributary;
use crate::router::dispatch::decode_records;
use crate::router::util::{collapse_errors, to_raw_params};

impl Tributary {
    /// Fetch `category` from whichever provider serves it first.
    ///
    /// Providers offering the category are tried in preference order (see
    /// `TributaryBuilder::prefer_providers`), then registration order. The
    /// first success is returned. A `Validation` failure stops the walk, since
    /// every provider shares the category's query schema.
    ///
    /// # Errors
    /// - `UnknownCategory` with no provider when nobody offers the category.
    /// - `Validation` for invalid params.
    /// - `AllProvidersTimedOut` when every attempted provider timed out.
    /// - `AllProvidersFailed` with each provider's error otherwise.
    /// - `RequestTimeout` when a request deadline is configured and exceeded.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "tributary::router", skip(self, params))
    )]
    pub async fn dispatch_default(
        &self,
        category: &str,
        params: &RawParams,
    ) -> Result<DispatchReport, TributaryError> {
        self.with_request_deadline(category, self.dispatch_priority_with_fallback(category, params))
            .await
    }

    /// Typed form of [`Tributary::dispatch_default`].
    ///
    /// # Errors
    /// See [`Tributary::dispatch_default`].
    pub async fn fetch_default<C: Category>(
        &self,
        params: ParamsOf<C>,
    ) -> Result<Vec<DataOf<C>>, TributaryError> {
        let raw = to_raw_params(&params)?;
        let report = self.dispatch_default(C::NAME, &raw).await?;
        decode_records::<C>(&report.provider, report.results)
    }

    async fn dispatch_priority_with_fallback(
        &self,
        category: &str,
        params: &RawParams,
    ) -> Result<DispatchReport, TributaryError> {
        let mut errors: Vec<TributaryError> = Vec::new();
        for provider in self.ordered_for(category) {
            match self.dispatch_to(&provider, category, params, None).await {
                Ok(report) => return Ok(report),
                Err(e @ TributaryError::Validation { .. }) => return Err(e),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        provider = provider.name(),
                        category,
                        error = %e,
                        "provider failed; trying next"
                    );
                    errors.push(e);
                }
            }
        }
        Err(collapse_errors(category, errors))
    }
}
