//! Configuration types shared by the dispatcher and connectors.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Exponential backoff configuration for retrying transient upstream failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Minimum backoff delay in milliseconds.
    pub min_backoff_ms: u64,
    /// Maximum backoff delay in milliseconds.
    pub max_backoff_ms: u64,
    /// Exponential factor to increase delay after each failure (>= 1).
    pub factor: u32,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            min_backoff_ms: 200,
            max_backoff_ms: 5_000,
            factor: 2,
            jitter_percent: 20,
        }
    }
}

impl BackoffConfig {
    /// Delay before retry number `attempt` (0-based), without jitter.
    ///
    /// Grows as `min_backoff_ms * factor^attempt` and is capped at `max_backoff_ms`.
    #[must_use]
    pub fn base_delay_ms(&self, attempt: u32) -> u64 {
        let factor = u64::from(self.factor.max(1));
        let mut delay = self.min_backoff_ms;
        for _ in 0..attempt {
            delay = delay.saturating_mul(factor);
            if delay >= self.max_backoff_ms {
                break;
            }
        }
        delay.min(self.max_backoff_ms)
    }
}

/// Bounded retry policy for retryable upstream failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt. Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// Delay schedule between attempts.
    pub backoff: BackoffConfig,
    /// HTTP statuses that make an upstream failure retryable.
    pub retry_on_status: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: BackoffConfig::default(),
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// A policy that never retries.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// Global configuration for the `Tributary` dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TributaryConfig {
    /// Timeout for a single fetcher attempt.
    pub provider_timeout: Duration,
    /// Optional deadline for a whole dispatch, retries and fallbacks included.
    pub request_timeout: Option<Duration>,
    /// Retry policy for transient upstream failures.
    pub retry: RetryConfig,
    /// Reject parameters that are not declared by the query schema.
    pub strict_params: bool,
    /// Preferred provider order per category for default routing.
    ///
    /// Listed providers are tried first, in order; unlisted providers that
    /// offer the category follow in registration order.
    #[serde(default)]
    pub category_priority: BTreeMap<String, Vec<String>>,
}

impl Default for TributaryConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(10),
            request_timeout: None,
            retry: RetryConfig::default(),
            strict_params: true,
            category_priority: BTreeMap::new(),
        }
    }
}
