use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tributary_core::{Credentials, DynFetcher, Record, TributaryError, ValidatedParams};

use crate::Tributary;

/// Add up to `jitter_percent` of random delay to `base_ms`.
pub(crate) fn jitter_wait(base_ms: u64, jitter_percent: u8) -> u64 {
    let jitter_range = if jitter_percent == 0 {
        1
    } else {
        std::cmp::max(1, (base_ms.saturating_mul(u64::from(jitter_percent))) / 100)
    };
    let mut rng = rand::rng();
    base_ms + rng.random_range(0..jitter_range)
}

#[cfg(feature = "tracing")]
fn log_retry(provider: &str, category: &str, attempt: u32, delay_ms: u64, error: &TributaryError) {
    tracing::warn!(
        provider,
        category,
        attempt,
        delay_ms,
        error = %error,
        "retrying fetcher after transient failure"
    );
}

#[cfg(not(feature = "tracing"))]
const fn log_retry(_: &str, _: &str, _: u32, _: u64, _: &TributaryError) {}

impl Tributary {
    /// Invoke `fetcher`, retrying retryable failures with backoff.
    ///
    /// Every attempt is bounded by the provider timeout. Returns the records
    /// and the number of attempts made (at most `max_retries + 1`).
    pub(crate) async fn call_with_retry(
        &self,
        provider: &str,
        fetcher: &Arc<dyn DynFetcher>,
        params: &ValidatedParams,
        credentials: &Credentials,
    ) -> Result<(Vec<Record>, u32), TributaryError> {
        let retry = &self.cfg.retry;
        let category = fetcher.category();
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let res = Self::provider_call_with_timeout(
                provider,
                category,
                self.cfg.provider_timeout,
                async {
                    fetcher
                        .fetch_records(params, credentials)
                        .await
                        .map_err(|e| e.into_dispatch(provider))
                },
            )
            .await;
            match res {
                Ok(records) => return Ok((records, attempt)),
                Err(e)
                    if attempt <= retry.max_retries
                        && e.is_retryable(&retry.retry_on_status) =>
                {
                    let delay_ms = jitter_wait(
                        retry.backoff.base_delay_ms(attempt - 1),
                        retry.backoff.jitter_percent,
                    );
                    log_retry(provider, category, attempt, delay_ms, &e);
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
