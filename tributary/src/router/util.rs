use serde_json::Value;
use tributary_core::{RawParams, TributaryError};

/// Join a collection of tasks and apply an optional request-level deadline.
///
/// On timeout returns `RequestTimeout` labelled with `label`.
///
/// # Errors
/// Returns `RequestTimeout` when the deadline elapses before every task finishes.
pub async fn join_with_deadline<I, F, T>(
    label: &str,
    tasks: I,
    deadline: Option<std::time::Duration>,
) -> Result<Vec<T>, TributaryError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    let joined = futures::future::join_all(tasks);
    match deadline {
        Some(d) => tokio::time::timeout(d, joined)
            .await
            .map_err(|_| TributaryError::request_timeout(label)),
        None => Ok(joined.await),
    }
}

/// Collapse a set of provider errors into a uniform `TributaryError` outcome.
///
/// Rules:
/// - No errors (no provider attempted) → `UnknownCategory` with no provider.
/// - All errors are `ProviderTimeout` → `AllProvidersTimedOut(category)`.
/// - Else → `AllProvidersFailed(errors)`.
#[must_use]
pub fn collapse_errors(category: &str, errors: Vec<TributaryError>) -> TributaryError {
    if errors.is_empty() {
        return TributaryError::UnknownCategory {
            provider: None,
            category: category.to_string(),
        };
    }
    if errors
        .iter()
        .all(|e| matches!(e, TributaryError::ProviderTimeout { .. }))
    {
        return TributaryError::AllProvidersTimedOut {
            category: category.to_string(),
        };
    }
    TributaryError::AllProvidersFailed(errors)
}

/// Serialize typed params into the raw map form the dispatcher validates.
pub(crate) fn to_raw_params<P: serde::Serialize>(params: &P) -> Result<RawParams, TributaryError> {
    match serde_json::to_value(params) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(TributaryError::InvalidArg(format!(
            "params must serialize to an object, got {other}"
        ))),
        Err(e) => Err(TributaryError::InvalidArg(e.to_string())),
    }
}
