// Shared fixtures for the integration test binaries.
#![allow(dead_code)]

use serde_json::Value;
use tributary::standard_models::{EquityQuote, EquityQuoteData, TreasuryRates, TreasuryRatesData};
use tributary::{BackoffConfig, Category, Provider, RawParams, RetryConfig};
use tributary_core::category::DataOf;
use tributary_mock::dynamic::{MockBehavior, ScriptController, ScriptedFetcher};

/// Raw params from a JSON object literal.
pub fn raw(v: Value) -> RawParams {
    v.as_object().cloned().expect("params must be a JSON object")
}

/// Provider `name` with one scripted fetcher that skips the credential precheck.
pub fn scripted<C: Category>(
    name: &str,
    fallback: MockBehavior<DataOf<C>>,
) -> (Provider, ScriptController<C>)
where
    DataOf<C>: Clone,
{
    let (fetcher, ctl) = ScriptedFetcher::<C>::new_with_controller(fallback);
    let provider = Provider::builder(name)
        .fetcher(fetcher.without_credentials())
        .build()
        .unwrap();
    (provider, ctl)
}

/// Scripted `EquityQuote` provider answering with one quote for `symbol`.
pub fn quoting(name: &str, symbol: &str, price: f64) -> (Provider, ScriptController<EquityQuote>) {
    scripted::<EquityQuote>(name, MockBehavior::Return(vec![quote(symbol, price)]))
}

pub fn quote(symbol: &str, price: f64) -> EquityQuoteData {
    EquityQuoteData {
        symbol: symbol.to_string(),
        name: None,
        last_price: price,
        prev_close: None,
        volume: None,
    }
}

pub fn rate(date: &str, rate: f64) -> TreasuryRatesData {
    TreasuryRatesData {
        date: date.parse().unwrap(),
        rate,
        maturity: None,
    }
}

pub fn treasury(name: &str, rows: Vec<TreasuryRatesData>) -> (Provider, ScriptController<TreasuryRates>) {
    scripted::<TreasuryRates>(name, MockBehavior::Return(rows))
}

/// Retry policy with millisecond delays so retry tests stay fast.
pub fn fast_retry(max_retries: u32) -> RetryConfig {
    RetryConfig {
        max_retries,
        backoff: BackoffConfig {
            min_backoff_ms: 1,
            max_backoff_ms: 4,
            factor: 2,
            jitter_percent: 0,
        },
        ..RetryConfig::default()
    }
}
