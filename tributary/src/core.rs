use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tributary_core::registry;
use tributary_core::{
    CredentialStore, Provider, Registry, RegistryBuilder, StaticCredentials, TributaryError,
};
use tributary_types::{RetryConfig, TributaryConfig};

/// Dispatcher that routes category requests to registered providers.
///
/// Holds no per-call state; clone the surrounding `Arc` to share it across
/// tasks.
pub struct Tributary {
    pub(crate) registry: Arc<Registry>,
    pub(crate) credentials: Arc<dyn CredentialStore>,
    pub(crate) cfg: TributaryConfig,
}

/// Builder for constructing a `Tributary` dispatcher with custom configuration.
pub struct TributaryBuilder {
    registry: Option<Arc<Registry>>,
    providers: Vec<Provider>,
    credentials: Arc<dyn CredentialStore>,
    cfg: TributaryConfig,
}

impl Default for TributaryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TributaryBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Defaults: 10s provider timeout, no request deadline, two retries with
    /// exponential backoff for transient upstream failures, strict params, and
    /// an empty in-memory credential store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: None,
            providers: Vec::new(),
            credentials: Arc::new(StaticCredentials::default()),
            cfg: TributaryConfig::default(),
        }
    }

    /// Use an already-built registry, e.g. the process-wide one.
    ///
    /// Cannot be combined with [`TributaryBuilder::with_provider`].
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Register a provider.
    ///
    /// Registration order decides routing order for categories without an
    /// explicit preference.
    #[must_use]
    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.providers.push(provider);
        self
    }

    /// Credential source consulted before every dispatch.
    #[must_use]
    pub fn credentials(mut self, store: impl CredentialStore + 'static) -> Self {
        self.credentials = Arc::new(store);
        self
    }

    /// Timeout for a single fetcher attempt.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Deadline for a whole dispatch, retries and fallbacks included.
    ///
    /// When exceeded, the dispatch fails with `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Retry policy for transient upstream failures.
    #[must_use]
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.cfg.retry = retry;
        self
    }

    /// Reject params the query schema does not declare (default `true`).
    ///
    /// When disabled, unknown keys are dropped before the fetcher runs.
    #[must_use]
    pub const fn strict_params(mut self, yes: bool) -> Self {
        self.cfg.strict_params = yes;
        self
    }

    /// Preferred provider order for a category in default routing.
    ///
    /// An ordering hint only: unlisted providers offering the category are
    /// still tried after the listed ones. Unknown names are dropped at build.
    #[must_use]
    pub fn prefer_providers(mut self, category: &str, providers: &[&str]) -> Self {
        self.cfg.category_priority.insert(
            category.to_string(),
            providers.iter().map(|p| (*p).to_string()).collect(),
        );
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: TributaryConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the dispatcher.
    ///
    /// # Errors
    /// - `InvalidArg` when no provider or registry was supplied, or both were.
    /// - Any registration error (`DuplicateProvider`) from the registered providers.
    pub fn build(mut self) -> Result<Tributary, TributaryError> {
        let registry = match (self.registry, self.providers.is_empty()) {
            (Some(_), false) => {
                return Err(TributaryError::InvalidArg(
                    "use either with_registry(...) or with_provider(...), not both".to_string(),
                ));
            }
            (Some(registry), true) => registry,
            (None, false) => {
                let mut builder = RegistryBuilder::new();
                for provider in self.providers {
                    builder.register(provider)?;
                }
                Arc::new(builder.build())
            }
            (None, true) => {
                return Err(TributaryError::InvalidArg(
                    "no providers registered; add at least one via with_provider(...)"
                        .to_string(),
                ));
            }
        };

        // Drop unknown provider names and duplicates from preferences.
        for names in self.cfg.category_priority.values_mut() {
            let mut seen = HashSet::new();
            names.retain(|n| registry.get(n).is_some() && seen.insert(n.clone()));
        }

        Ok(Tributary {
            registry,
            credentials: self.credentials,
            cfg: self.cfg,
        })
    }
}

impl Tributary {
    /// Start building a new `Tributary` instance.
    ///
    /// ```rust,ignore
    /// let tributary = tributary::Tributary::builder()
    ///     .with_provider(tributary_fred::provider()?)
    ///     .with_provider(tributary_mock::provider()?)
    ///     .credentials(tributary::EnvCredentials::new())
    ///     .prefer_providers("TreasuryRates", &["fred"])
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> TributaryBuilder {
        TributaryBuilder::new()
    }

    /// Dispatcher over the process-wide registry installed with
    /// `tributary_core::registry::install_global`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no global registry is installed.
    pub fn from_global() -> Result<Self, TributaryError> {
        let registry = registry::global().ok_or_else(|| {
            TributaryError::InvalidArg("no global registry installed".to_string())
        })?;
        TributaryBuilder::new().with_registry(registry).build()
    }

    /// The registry being dispatched over.
    #[must_use]
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TributaryConfig {
        &self.cfg
    }

    /// Providers offering `category`, preferred ones first, then the rest in
    /// registration order.
    pub(crate) fn ordered_for(&self, category: &str) -> Vec<Arc<Provider>> {
        let mut out: Vec<(usize, Arc<Provider>)> = self
            .registry
            .providers_for(category)
            .cloned()
            .enumerate()
            .collect();
        if let Some(pref) = self.cfg.category_priority.get(category) {
            let pos: HashMap<&str, usize> = pref
                .iter()
                .enumerate()
                .map(|(i, n)| (n.as_str(), i))
                .collect();
            out.sort_by_key(|(orig_i, p)| (pos.get(p.name()).copied().unwrap_or(usize::MAX), *orig_i));
        }
        out.into_iter().map(|(_, p)| p).collect()
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tributary::core::provider_call_with_timeout",
            skip(fut),
            fields(
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        provider: &str,
        category: &str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, TributaryError>
    where
        Fut: core::future::Future<Output = Result<T, TributaryError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(TributaryError::provider_timeout(provider, category)))
    }

    /// Apply the configured request deadline to `fut`.
    pub(crate) async fn with_request_deadline<T, Fut>(
        &self,
        category: &str,
        fut: Fut,
    ) -> Result<T, TributaryError>
    where
        Fut: core::future::Future<Output = Result<T, TributaryError>>,
    {
        match self.cfg.request_timeout {
            Some(deadline) => (tokio::time::timeout(deadline, fut).await)
                .unwrap_or_else(|_| Err(TributaryError::request_timeout(category))),
            None => fut.await,
        }
    }
}
