//! tributary-core
//!
//! Traits and registry plumbing shared across the tributary ecosystem.
//!
//! - `category`: the `Category` binding of one query-params type to one data type.
//! - `fetcher`: the typed `Fetcher` trait and its object-safe erasure.
//! - `schema`: schema descriptors, the `Schematic` trait, and the validation engine.
//! - `provider` / `registry`: named providers and the read-only registry.
//! - `credentials`: credential stores consulted by the dispatcher.
//! - `standard_models`: the built-in categories.
//!
//! Schemas are declared with `#[derive(Schema)]`:
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use tributary_core::Schema;
//! use tributary_core::schema::Schematic;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Schema)]
//! struct Params {
//!     #[schema(description = "Ticker symbol.")]
//!     symbol: String,
//!     #[schema(description = "Rows to return.", default = 10, ge = 1)]
//!     limit: u32,
//! }
//!
//! let schema = Params::schema();
//! assert_eq!(schema.required_fields().collect::<Vec<_>>(), ["symbol"]);
//! ```
#![warn(missing_docs)]

extern crate self as tributary_core;

/// Binding of query parameters and data records to a category name.
pub mod category;
/// Credential stores consulted before invoking fetchers.
pub mod credentials;
/// Typed fetcher trait and its type-erased form.
pub mod fetcher;
/// Named providers grouping fetchers by category.
pub mod provider;
/// Read-only provider registry.
pub mod registry;
pub mod schema;
/// Built-in categories and their schemas.
pub mod standard_models;

pub use category::{Category, Data, QueryParams};
pub use credentials::{CredentialStore, EnvCredentials, StaticCredentials};
pub use fetcher::{DynFetcher, Fetcher, ValidatedParams};
pub use provider::{Provider, ProviderBuilder};
pub use registry::{Registry, RegistryBuilder, RegistryMap};
pub use tributary_macros::Schema;
pub use tributary_types::{
    Credentials, DispatchReport, FetchError, FieldIssue, ProviderMetadata, RawParams, Record,
    Schema, TributaryError,
};

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
