use std::collections::HashMap;
use std::sync::Arc;

use crate::Credentials;

/// Source of per-provider credentials.
///
/// The dispatcher asks the store for the credentials of one provider,
/// passing the names that provider declared. Stores must return only those
/// names, so fetchers never see another provider's secrets.
pub trait CredentialStore: Send + Sync {
    /// Credentials for `provider`, restricted to `declared` names.
    fn credentials(&self, provider: &str, declared: &[String]) -> Credentials;
}

/// In-memory credentials keyed by provider name.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    by_provider: HashMap<String, Credentials>,
}

impl StaticCredentials {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one credential for `provider`.
    #[must_use]
    pub fn with(
        mut self,
        provider: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.by_provider
            .entry(provider.into())
            .or_default()
            .insert(name, value);
        self
    }

    /// Replace all credentials of `provider`.
    pub fn insert(&mut self, provider: impl Into<String>, credentials: Credentials) {
        self.by_provider.insert(provider.into(), credentials);
    }
}

impl CredentialStore for StaticCredentials {
    fn credentials(&self, provider: &str, declared: &[String]) -> Credentials {
        let Some(all) = self.by_provider.get(provider) else {
            return Credentials::new();
        };
        declared
            .iter()
            .filter_map(|name| all.get(name).map(|v| (name.clone(), v.to_string())))
            .collect()
    }
}

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Credentials read from variables named `<PROVIDER>_<NAME>`, upper-cased,
/// e.g. `FRED_API_KEY` for provider `fred` and credential `api_key`.
#[derive(Clone)]
pub struct EnvCredentials {
    lookup: Lookup,
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvCredentials {
    /// Read from the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_lookup(|key| std::env::var(key).ok())
    }

    /// Read through a custom lookup function instead of the process environment.
    #[must_use]
    pub fn with_lookup(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    /// Variable name consulted for `provider`/`name`.
    #[must_use]
    pub fn variable_name(provider: &str, name: &str) -> String {
        format!("{provider}_{name}")
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for EnvCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvCredentials").finish_non_exhaustive()
    }
}

impl CredentialStore for EnvCredentials {
    fn credentials(&self, provider: &str, declared: &[String]) -> Credentials {
        declared
            .iter()
            .filter_map(|name| {
                (self.lookup)(&Self::variable_name(provider, name))
                    .filter(|v| !v.is_empty())
                    .map(|v| (name.clone(), v))
            })
            .collect()
    }
}
