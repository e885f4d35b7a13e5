use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::schema::Schema;
use crate::{Provider, ProviderMetadata, TributaryError};

/// Collects providers before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    providers: Vec<Arc<Provider>>,
    index: HashMap<String, usize>,
}

impl RegistryBuilder {
    /// Empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider.
    ///
    /// # Errors
    /// Returns `DuplicateProvider` when the name is already taken; the
    /// first registration is kept.
    pub fn register(&mut self, provider: Provider) -> Result<&Provider, TributaryError> {
        if self.index.contains_key(provider.name()) {
            return Err(TributaryError::DuplicateProvider {
                provider: provider.name().to_string(),
            });
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            provider = provider.name(),
            categories = provider.categories().count(),
            "registered provider"
        );
        let idx = self.providers.len();
        self.index.insert(provider.name().to_string(), idx);
        self.providers.push(Arc::new(provider));
        Ok(self.providers[idx].as_ref())
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            providers: self.providers,
            index: self.index,
        }
    }
}

/// Read-only mapping from provider name to [`Provider`], in registration order.
#[derive(Debug, Default)]
pub struct Registry {
    providers: Vec<Arc<Provider>>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Start an empty builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Build a registry from `providers`, failing on the first conflict.
    ///
    /// # Errors
    /// Returns `DuplicateProvider` on a repeated name. No partial registry is
    /// returned.
    pub fn init(providers: impl IntoIterator<Item = Provider>) -> Result<Self, TributaryError> {
        let mut builder = RegistryBuilder::new();
        for provider in providers {
            builder.register(provider)?;
        }
        Ok(builder.build())
    }

    /// Provider named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Provider>> {
        self.index.get(name).map(|&i| &self.providers[i])
    }

    /// Providers in registration order.
    pub fn providers(&self) -> impl Iterator<Item = &Arc<Provider>> {
        self.providers.iter()
    }

    /// Provider names in registration order.
    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name())
    }

    /// Providers offering `category`, in registration order.
    pub fn providers_for<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Arc<Provider>> {
        self.providers.iter().filter(move |p| p.offers(category))
    }

    /// Category name to the providers offering it.
    #[must_use]
    pub fn coverage(&self) -> BTreeMap<String, Vec<String>> {
        let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for provider in &self.providers {
            for category in provider.categories() {
                out.entry(category.to_string())
                    .or_default()
                    .push(provider.name().to_string());
            }
        }
        out
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// True when no provider is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Serializable description of providers, categories and schemas.
    #[must_use]
    pub fn describe(&self) -> RegistryMap {
        let mut map = RegistryMap::default();
        for provider in &self.providers {
            map.providers.insert(
                provider.name().to_string(),
                ProviderEntry {
                    metadata: provider.metadata().clone(),
                    categories: provider.categories().map(str::to_string).collect(),
                },
            );
            for category in provider.categories() {
                let Some(fetcher) = provider.fetcher(category) else {
                    continue;
                };
                map.categories
                    .entry(category.to_string())
                    .or_insert_with(|| CategoryEntry {
                        providers: Vec::new(),
                        query_params: fetcher.query_schema().clone(),
                        data: fetcher.data_schema().clone(),
                    })
                    .providers
                    .push(provider.name().to_string());
            }
        }
        map
    }
}

/// Registry description produced by [`Registry::describe`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryMap {
    /// Providers keyed by name.
    pub providers: BTreeMap<String, ProviderEntry>,
    /// Categories keyed by name.
    pub categories: BTreeMap<String, CategoryEntry>,
}

/// One provider in a [`RegistryMap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEntry {
    /// Provider metadata, including declared credential names.
    pub metadata: ProviderMetadata,
    /// Offered categories, sorted.
    pub categories: Vec<String>,
}

/// One category in a [`RegistryMap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Providers offering the category, in registration order.
    pub providers: Vec<String>,
    /// Query params schema.
    pub query_params: Schema,
    /// Data record schema.
    pub data: Schema,
}

static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();

/// Install the process-wide registry.
///
/// # Errors
/// Returns `RegistryAlreadyInitialized` when called more than once.
pub fn install_global(registry: Registry) -> Result<Arc<Registry>, TributaryError> {
    let registry = Arc::new(registry);
    GLOBAL
        .set(Arc::clone(&registry))
        .map_err(|_| TributaryError::RegistryAlreadyInitialized)?;
    Ok(registry)
}

/// The process-wide registry, once installed.
#[must_use]
pub fn global() -> Option<Arc<Registry>> {
    GLOBAL.get().cloned()
}
