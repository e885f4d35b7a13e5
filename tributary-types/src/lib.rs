//! Tributary-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod credentials;
mod reports;
pub mod schema;

pub use config::{BackoffConfig, RetryConfig, TributaryConfig};
pub use credentials::Credentials;
pub use reports::{DispatchReport, ProviderMetadata};
pub use schema::{Constraint, FieldSpec, FieldType, Schema};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw, unvalidated request parameters as received from a caller.
pub type RawParams = serde_json::Map<String, serde_json::Value>;

/// One normalized output record, keyed by Data schema field name.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A single field-level problem found while validating params or records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Field name the issue is attached to. Empty for whole-object issues.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldIssue {
    /// Build an issue for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.field.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

/// Failure reported by a fetcher.
///
/// Fetchers can only fail in these three ways. The dispatcher turns a
/// `FetchError` into the matching [`TributaryError`] variant, tagging it with
/// the provider name.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchError {
    /// A credential the fetcher needs was not supplied.
    #[error("missing credential: {credential}")]
    CredentialMissing {
        /// Credential name, e.g. `api_key`.
        credential: String,
    },

    /// The source was unavailable or answered with an unusable response.
    #[error("upstream failure{}: {message}", status_suffix(.status))]
    Upstream {
        /// Human-readable error message.
        message: String,
        /// HTTP status code, when the failure came from an HTTP response.
        status: Option<u16>,
    },

    /// The source answered, but its payload cannot be mapped into the Data schema.
    #[error("transform failed: {0}")]
    Transform(String),
}

impl FetchError {
    /// Helper: build a `CredentialMissing` error.
    pub fn credential_missing(credential: impl Into<String>) -> Self {
        Self::CredentialMissing {
            credential: credential.into(),
        }
    }

    /// Helper: build an `Upstream` error without a status (connection-level failure).
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            status: None,
        }
    }

    /// Helper: build an `Upstream` error carrying an HTTP status.
    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Helper: build a `Transform` error.
    pub fn transform(message: impl Into<String>) -> Self {
        Self::Transform(message.into())
    }

    /// Tag this failure with the provider that produced it.
    #[must_use]
    pub fn into_dispatch(self, provider: &str) -> TributaryError {
        match self {
            Self::CredentialMissing { credential } => TributaryError::CredentialMissing {
                provider: provider.to_string(),
                credential,
            },
            Self::Upstream { message, status } => TributaryError::Upstream {
                provider: provider.to_string(),
                message,
                status,
            },
            Self::Transform(message) => TributaryError::Transform {
                provider: provider.to_string(),
                message,
            },
        }
    }
}

/// Unified error type for the tributary workspace.
///
/// Covers lookup failures, parameter validation, fetcher failures tagged with
/// their provider, output contract breaches, registration-time conflicts, and
/// the aggregates produced by multi-provider routing.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TributaryError {
    /// No provider is registered under this name.
    #[error("unknown provider: {provider}")]
    UnknownProvider {
        /// Requested provider name.
        provider: String,
    },

    /// The category is not offered by the provider (or by any provider when `provider` is `None`).
    #[error("unknown category: {category} (provider: {})", .provider.as_deref().unwrap_or("any"))]
    UnknownCategory {
        /// Provider that was asked, if any.
        provider: Option<String>,
        /// Requested category name.
        category: String,
    },

    /// Raw parameters do not satisfy the category's query schema.
    #[error("invalid parameters for {category}: {}", join_issues(.issues))]
    Validation {
        /// Category whose query schema rejected the input.
        category: String,
        /// Field-level detail, one entry per problem.
        issues: Vec<FieldIssue>,
    },

    /// A required credential was absent.
    #[error("{provider} is missing credential {credential}")]
    CredentialMissing {
        /// Provider that requires the credential.
        provider: String,
        /// Credential name.
        credential: String,
    },

    /// The upstream source failed or returned a malformed response.
    #[error("{provider} upstream failure{}: {message}", status_suffix(.status))]
    Upstream {
        /// Provider whose source failed.
        provider: String,
        /// Human-readable error message.
        message: String,
        /// HTTP status code, if any.
        status: Option<u16>,
    },

    /// The upstream response could not be mapped into the Data schema.
    #[error("{provider} transform failed: {message}")]
    Transform {
        /// Provider whose response could not be transformed.
        provider: String,
        /// Human-readable error message.
        message: String,
    },

    /// A fetcher returned records that break the category's data schema.
    #[error("{provider} returned invalid {category} data: {}", join_issues(.issues))]
    SchemaViolation {
        /// Provider whose fetcher misbehaved.
        provider: String,
        /// Category whose data schema was violated.
        category: String,
        /// Field-level detail, prefixed with the record index.
        issues: Vec<FieldIssue>,
    },

    /// A provider with this name is already registered.
    #[error("duplicate provider: {provider}")]
    DuplicateProvider {
        /// Conflicting provider name.
        provider: String,
    },

    /// A provider declared two fetchers for the same category.
    #[error("duplicate category {category} in provider {provider}")]
    DuplicateCategory {
        /// Provider being built.
        provider: String,
        /// Conflicting category name.
        category: String,
    },

    /// A schema does not satisfy the descriptor invariants.
    #[error("invalid schema {schema}: {message}")]
    InvalidSchema {
        /// Schema name.
        schema: String,
        /// Human-readable description of the violation.
        message: String,
    },

    /// The process-wide registry has already been installed.
    #[error("registry already initialized")]
    RegistryAlreadyInitialized,

    /// An individual fetcher call exceeded the configured timeout.
    #[error("provider timed out: {category} via {provider}")]
    ProviderTimeout {
        /// Provider that timed out.
        provider: String,
        /// Category being fetched.
        category: String,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {category}")]
    RequestTimeout {
        /// Category for which the request timed out.
        category: String,
    },

    /// All selected providers failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<TributaryError>),

    /// All attempted providers timed out for the requested category.
    #[error("all providers timed out: {category}")]
    AllProvidersTimedOut {
        /// Category that timed out across all providers.
        category: String,
    },

    /// Invalid input argument outside of schema validation.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

impl TributaryError {
    /// Helper: build an `UnknownProvider` error.
    pub fn unknown_provider(provider: impl Into<String>) -> Self {
        Self::UnknownProvider {
            provider: provider.into(),
        }
    }

    /// Helper: build an `UnknownCategory` error scoped to one provider.
    pub fn unknown_category(provider: impl Into<String>, category: impl Into<String>) -> Self {
        Self::UnknownCategory {
            provider: Some(provider.into()),
            category: category.into(),
        }
    }

    /// Helper: build a `Validation` error.
    pub fn validation(category: impl Into<String>, issues: Vec<FieldIssue>) -> Self {
        Self::Validation {
            category: category.into(),
            issues,
        }
    }

    /// Helper: build an `InvalidSchema` error.
    pub fn invalid_schema(schema: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            schema: schema.into(),
            message: message.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(provider: impl Into<String>, category: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
            category: category.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    pub fn request_timeout(category: impl Into<String>) -> Self {
        Self::RequestTimeout {
            category: category.into(),
        }
    }

    /// Whether the dispatcher may retry the failed call.
    ///
    /// Only transient upstream failures qualify: an `Upstream` without a status
    /// (connection-level), an `Upstream` whose status is listed in
    /// `retry_on_status`, or a per-call `ProviderTimeout`.
    #[must_use]
    pub fn is_retryable(&self, retry_on_status: &[u16]) -> bool {
        match self {
            Self::Upstream { status: None, .. } | Self::ProviderTimeout { .. } => true,
            Self::Upstream {
                status: Some(s), ..
            } => retry_on_status.contains(s),
            _ => false,
        }
    }

    /// Returns true for errors raised while building providers or the registry.
    #[must_use]
    pub const fn is_registration_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateProvider { .. }
                | Self::DuplicateCategory { .. }
                | Self::InvalidSchema { .. }
                | Self::RegistryAlreadyInitialized
        )
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
