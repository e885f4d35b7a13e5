use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tributary_core::FetchError;
use url::Url;

/// Production endpoint of the FRED API.
pub const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org/fred/";

/// Parameters of one `series/observations` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationsRequest {
    /// Series identifier, e.g. `DGS10`.
    pub series_id: String,
    /// First observation date to include.
    pub start: Option<NaiveDate>,
    /// Last observation date to include.
    pub end: Option<NaiveDate>,
    /// Maximum number of observations.
    pub limit: Option<u32>,
}

impl ObservationsRequest {
    /// Request every observation of `series_id`.
    pub fn new(series_id: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
            start: None,
            end: None,
            limit: None,
        }
    }
}

/// One raw observation as FRED returns it.
///
/// `value` is a decimal string, or `"."` when the series has no data for the date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Observation {
    /// Observation date, `YYYY-MM-DD`.
    pub date: String,
    /// Raw value.
    pub value: String,
}

/// Observations abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait FredObservations: Send + Sync {
    /// Fetch observations of one series.
    async fn observations(
        &self,
        req: &ObservationsRequest,
        api_key: &str,
    ) -> Result<Vec<Observation>, FetchError>;
}

#[derive(Deserialize)]
struct ObservationsEnvelope {
    observations: Vec<Observation>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error_message: String,
}

/// Production adapter backed by `reqwest`.
#[derive(Clone)]
pub struct RealAdapter {
    client: reqwest::Client,
    base_url: Url,
}

impl RealAdapter {
    /// Adapter pointed at the public FRED API.
    ///
    /// # Errors
    /// Returns `Upstream` if the HTTP client cannot be created.
    pub fn new_default() -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Adapter pointed at another FRED-compatible endpoint.
    ///
    /// # Errors
    /// Returns `Upstream` if `base_url` is not a valid URL or the HTTP client
    /// cannot be created.
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tributary-fred/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::upstream(e.to_string()))?;
        Ok(Self::new(client, parse_base(base_url)?))
    }

    /// Adapter over an existing client.
    #[must_use]
    pub const fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn observations_url(&self, req: &ObservationsRequest, api_key: &str) -> Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join("series/observations")
            .map_err(|e| FetchError::upstream(format!("invalid FRED url: {e}")))?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("series_id", &req.series_id);
            q.append_pair("api_key", api_key);
            q.append_pair("file_type", "json");
            if let Some(start) = req.start {
                q.append_pair("observation_start", &start.to_string());
            }
            if let Some(end) = req.end {
                q.append_pair("observation_end", &end.to_string());
            }
            if let Some(limit) = req.limit {
                q.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url)
    }
}

fn parse_base(base_url: &str) -> Result<Url, FetchError> {
    // `join` drops the last path segment unless the base ends with a slash.
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    };
    Url::parse(&normalized).map_err(|e| FetchError::upstream(format!("invalid FRED url: {e}")))
}

#[async_trait]
impl FredObservations for RealAdapter {
    async fn observations(
        &self,
        req: &ObservationsRequest,
        api_key: &str,
    ) -> Result<Vec<Observation>, FetchError> {
        let url = self.observations_url(req, api_key)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(series_id = %req.series_id, "requesting FRED observations");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::upstream(e.without_url().to_string()))?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::upstream(e.without_url().to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&body).map_or_else(
                |_| status.canonical_reason().unwrap_or("request failed").to_string(),
                |e| e.error_message,
            );
            return Err(FetchError::upstream_status(status.as_u16(), message));
        }

        serde_json::from_slice::<ObservationsEnvelope>(&body)
            .map(|env| env.observations)
            .map_err(|e| {
                FetchError::upstream_status(status.as_u16(), format!("malformed response: {e}"))
            })
    }
}

struct FnAdapter<F>(F);

#[async_trait]
impl<F> FredObservations for FnAdapter<F>
where
    F: Fn(&ObservationsRequest) -> Result<Vec<Observation>, FetchError> + Send + Sync,
{
    async fn observations(
        &self,
        req: &ObservationsRequest,
        _api_key: &str,
    ) -> Result<Vec<Observation>, FetchError> {
        (self.0)(req)
    }
}

impl dyn FredObservations {
    /// Build an adapter from a closure; the API key is ignored.
    pub fn from_fn<F>(f: F) -> Arc<dyn FredObservations>
    where
        F: Fn(&ObservationsRequest) -> Result<Vec<Observation>, FetchError>
            + Send
            + Sync
            + 'static,
    {
        Arc::new(FnAdapter(f))
    }
}
