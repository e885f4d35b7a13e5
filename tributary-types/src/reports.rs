//! Provider metadata and report envelopes produced by the dispatcher.

use serde::{Deserialize, Serialize};

use crate::{RawParams, Record};

/// Human-readable description of an external data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    /// Display name, e.g. "Federal Reserve Economic Data".
    pub display_name: Option<String>,
    /// Vendor website.
    pub website: Option<String>,
    /// Free-form description of the source.
    pub description: Option<String>,
    /// Credential names the provider reads, e.g. `["api_key"]`.
    pub credentials: Vec<String>,
}

/// Summary of a single dispatch.
///
/// Carries the normalized params that reached the fetcher, the validated
/// records, and how many fetcher attempts were made (retries included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Provider that served the request.
    pub provider: String,
    /// Category that was requested.
    pub category: String,
    /// Parameters after defaults and coercion.
    pub params: RawParams,
    /// Records that passed the Data schema, in fetcher order.
    pub results: Vec<Record>,
    /// Number of fetcher invocations.
    pub attempts: u32,
}
