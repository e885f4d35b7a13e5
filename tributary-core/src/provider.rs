use std::collections::BTreeMap;
use std::sync::Arc;

use crate::fetcher::{DynFetcher, Erased, Fetcher};
use crate::schema::SchemaCheck;
use crate::{ProviderMetadata, TributaryError};

/// A named external data source and the categories it serves.
///
/// Built once through [`Provider::builder`]; read-only afterwards.
pub struct Provider {
    name: String,
    metadata: ProviderMetadata,
    fetchers: BTreeMap<&'static str, Arc<dyn DynFetcher>>,
}

impl Provider {
    /// Start building a provider named `name`.
    pub fn builder(name: impl Into<String>) -> ProviderBuilder {
        ProviderBuilder {
            name: name.into(),
            metadata: ProviderMetadata::default(),
            fetchers: Vec::new(),
        }
    }

    /// Unique provider name, e.g. `"fred"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Descriptive metadata.
    #[must_use]
    pub const fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    /// Credential names the provider reads.
    #[must_use]
    pub fn credentials(&self) -> &[String] {
        &self.metadata.credentials
    }

    /// Fetcher serving `category`, if offered.
    #[must_use]
    pub fn fetcher(&self, category: &str) -> Option<&Arc<dyn DynFetcher>> {
        self.fetchers.get(category)
    }

    /// Whether the provider offers `category`.
    #[must_use]
    pub fn offers(&self, category: &str) -> bool {
        self.fetchers.contains_key(category)
    }

    /// Offered category names, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fetchers.keys().copied()
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("metadata", &self.metadata)
            .field("categories", &self.fetchers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Provider`].
pub struct ProviderBuilder {
    name: String,
    metadata: ProviderMetadata,
    fetchers: Vec<Arc<dyn DynFetcher>>,
}

impl ProviderBuilder {
    /// Human-readable name.
    #[must_use]
    pub fn display_name(mut self, value: impl Into<String>) -> Self {
        self.metadata.display_name = Some(value.into());
        self
    }

    /// Vendor website.
    #[must_use]
    pub fn website(mut self, value: impl Into<String>) -> Self {
        self.metadata.website = Some(value.into());
        self
    }

    /// Free-form description.
    #[must_use]
    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.metadata.description = Some(value.into());
        self
    }

    /// Declare the credential names the provider reads, e.g. `&["api_key"]`.
    #[must_use]
    pub fn credentials(mut self, names: &[&str]) -> Self {
        self.metadata.credentials = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    /// Add a fetcher for its category.
    #[must_use]
    pub fn fetcher<F: Fetcher>(mut self, fetcher: F) -> Self {
        self.fetchers.push(Arc::new(Erased(fetcher)));
        self
    }

    /// Add an already type-erased fetcher.
    #[must_use]
    pub fn dyn_fetcher(mut self, fetcher: Arc<dyn DynFetcher>) -> Self {
        self.fetchers.push(fetcher);
        self
    }

    /// Finish the provider.
    ///
    /// # Errors
    /// - `InvalidArg` when the name is empty.
    /// - `DuplicateCategory` when two fetchers serve the same category.
    /// - `InvalidSchema` when a fetcher's query or data schema breaks the
    ///   descriptor invariants.
    pub fn build(self) -> Result<Provider, TributaryError> {
        if self.name.trim().is_empty() {
            return Err(TributaryError::InvalidArg(
                "provider name must not be empty".into(),
            ));
        }
        let mut fetchers = BTreeMap::new();
        for fetcher in self.fetchers {
            let category = fetcher.category();
            fetcher.query_schema().check()?;
            fetcher.data_schema().check()?;
            if fetchers.insert(category, fetcher).is_some() {
                return Err(TributaryError::DuplicateCategory {
                    provider: self.name,
                    category: category.to_string(),
                });
            }
        }
        Ok(Provider {
            name: self.name,
            metadata: self.metadata,
            fetchers,
        })
    }
}
