//! Tributary normalizes heterogeneous financial data sources behind named
//! categories and dispatches requests to them by provider name.
//!
//! Overview
//! - A *provider* groups fetchers under a unique name, with metadata and the
//!   credential names it reads.
//! - A *category* (treasury rates, market movers, ...) binds one query-params
//!   schema to one data schema; every provider offering it shares both.
//! - [`Tributary`] resolves `(provider, category)`, validates the raw params,
//!   invokes the fetcher, and validates the records it returns.
//!
//! Key behaviors
//! - Invalid params fail with `Validation` before any fetcher runs.
//! - Only transient upstream failures and per-call timeouts are retried, a
//!   bounded number of times, with exponential backoff and jitter.
//! - Records that break the category's data schema fail with `SchemaViolation`.
//! - `dispatch_default` walks every provider offering a category, preferred
//!   providers first, and returns the first success.
//!
//! Examples
//! ```rust,ignore
//! use tributary::{StaticCredentials, Tributary};
//!
//! let tributary = Tributary::builder()
//!     .with_provider(tributary_fred::provider()?)
//!     .credentials(StaticCredentials::new().with("fred", "api_key", "..."))
//!     .build()?;
//!
//! let params = serde_json::json!({"start_date": "2024-01-01", "end_date": "2024-01-02"});
//! let records = tributary
//!     .dispatch("fred", "TreasuryRates", params.as_object().unwrap())
//!     .await?;
//! ```
//!
//! See `tributary/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod retry;
mod router;

pub use crate::core::{Tributary, TributaryBuilder};
pub use router::dispatch::DispatchRequest;
pub use router::util::{collapse_errors, join_with_deadline};

pub use tributary_core::registry::{install_global, global as global_registry};
pub use tributary_core::{
    Category, CredentialStore, Credentials, DispatchReport, DynFetcher, EnvCredentials,
    FetchError, Fetcher, FieldIssue, Provider, ProviderBuilder, ProviderMetadata, RawParams,
    Record, Registry, RegistryBuilder, RegistryMap, Schema, StaticCredentials, TributaryError,
    standard_models,
};
pub use tributary_types::{BackoffConfig, RetryConfig, TributaryConfig};

#[doc(hidden)]
pub use tributary_core as __core;
