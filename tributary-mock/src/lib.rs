//! Mock provider for CI-safe examples and tests.
//!
//! [`provider`] builds a provider named `"mock"` that serves every built-in
//! category from static fixtures. A few reserved inputs trigger failure
//! paths:
//! - symbol (or currency query) `FAIL` returns an upstream 503;
//! - `TIMEOUT` sleeps for [`TIMEOUT_DELAY`] before answering;
//! - `NAN` (equity quotes only) returns a price that serializes to `null`.
//!
//! [`dynamic`] offers a scripted fetcher whose behavior tests drive from the
//! outside.
use std::time::Duration;

use async_trait::async_trait;
use tributary_core::standard_models::{
    CurrencyHistorical, CurrencyHistoricalData, CurrencyHistoricalQueryParams, CurrencyPairs,
    CurrencyPairsData, CurrencyPairsQueryParams, EquityQuote, EquityQuoteData,
    EquityQuoteQueryParams, FredSeries, FredSeriesData, FredSeriesQueryParams, MarketMovers,
    MarketMoversData, MarketMoversQueryParams, TreasuryRates, TreasuryRatesData,
    TreasuryRatesQueryParams,
};
use tributary_core::{Credentials, FetchError, Fetcher, Provider, TributaryError};

pub mod dynamic;
mod fixtures;

/// Provider name used by [`provider`].
pub const NAME: &str = "mock";

/// How long the `TIMEOUT` input stalls.
pub const TIMEOUT_DELAY: Duration = Duration::from_millis(200);

/// Build the mock provider with a fetcher for every built-in category.
///
/// # Errors
/// Only fails if a built-in schema is malformed.
pub fn provider() -> Result<Provider, TributaryError> {
    Provider::builder(NAME)
        .display_name("Mock")
        .description("Deterministic fixture data for tests and examples.")
        .fetcher(MockTreasuryRates)
        .fetcher(MockFredSeries)
        .fetcher(MockEquityQuote)
        .fetcher(MockMarketMovers)
        .fetcher(MockCurrencyPairs)
        .fetcher(MockCurrencyHistorical)
        .build()
}

async fn maybe_fail_or_timeout(input: &str, category: &'static str) -> Result<(), FetchError> {
    match input {
        "FAIL" => Err(FetchError::upstream_status(
            503,
            format!("forced failure: {category}"),
        )),
        "TIMEOUT" => {
            tokio::time::sleep(TIMEOUT_DELAY).await;
            Ok(())
        }
        _ => Ok(()),
    }
}

fn limit(n: u32) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

/// Treasury rates from fixtures, one series per maturity.
pub struct MockTreasuryRates;

#[async_trait]
impl Fetcher for MockTreasuryRates {
    type Category = TreasuryRates;

    fn require_credentials(&self) -> bool {
        false
    }

    async fn fetch(
        &self,
        params: TreasuryRatesQueryParams,
        _credentials: &Credentials,
    ) -> Result<Vec<TreasuryRatesData>, FetchError> {
        Ok(fixtures::treasury::rates(
            &params.maturity,
            params.start_date,
            params.end_date,
        ))
    }
}

/// Economic series from fixtures (`DGS10`, `UNRATE`).
pub struct MockFredSeries;

#[async_trait]
impl Fetcher for MockFredSeries {
    type Category = FredSeries;

    fn require_credentials(&self) -> bool {
        false
    }

    async fn fetch(
        &self,
        params: FredSeriesQueryParams,
        _credentials: &Credentials,
    ) -> Result<Vec<FredSeriesData>, FetchError> {
        maybe_fail_or_timeout(&params.symbol, "FredSeries").await?;
        fixtures::fred::series(
            &params.symbol,
            params.start_date,
            params.end_date,
            limit(params.limit),
        )
        .ok_or_else(|| {
            FetchError::upstream_status(400, format!("series {} does not exist", params.symbol))
        })
    }
}

/// Equity quotes from fixtures; unknown symbols yield no records.
pub struct MockEquityQuote;

#[async_trait]
impl Fetcher for MockEquityQuote {
    type Category = EquityQuote;

    fn require_credentials(&self) -> bool {
        false
    }

    async fn fetch(
        &self,
        params: EquityQuoteQueryParams,
        _credentials: &Credentials,
    ) -> Result<Vec<EquityQuoteData>, FetchError> {
        maybe_fail_or_timeout(&params.symbol, "EquityQuote").await?;
        if params.symbol == "NAN" {
            return Ok(vec![EquityQuoteData {
                symbol: params.symbol,
                name: None,
                last_price: f64::NAN,
                prev_close: None,
                volume: None,
            }]);
        }
        Ok(fixtures::equity::quote(&params.symbol).into_iter().collect())
    }
}

/// Movers computed from the fixture quotes.
pub struct MockMarketMovers;

#[async_trait]
impl Fetcher for MockMarketMovers {
    type Category = MarketMovers;

    fn require_credentials(&self) -> bool {
        false
    }

    async fn fetch(
        &self,
        params: MarketMoversQueryParams,
        _credentials: &Credentials,
    ) -> Result<Vec<MarketMoversData>, FetchError> {
        Ok(fixtures::equity::movers(
            params.sort == "asc",
            limit(params.limit),
        ))
    }
}

/// Currency pair search over a fixed list of majors.
pub struct MockCurrencyPairs;

#[async_trait]
impl Fetcher for MockCurrencyPairs {
    type Category = CurrencyPairs;

    fn require_credentials(&self) -> bool {
        false
    }

    async fn fetch(
        &self,
        params: CurrencyPairsQueryParams,
        _credentials: &Credentials,
    ) -> Result<Vec<CurrencyPairsData>, FetchError> {
        if let Some(query) = params.query.as_deref() {
            maybe_fail_or_timeout(query, "CurrencyPairs").await?;
        }
        Ok(fixtures::currency::pairs(params.query.as_deref()))
    }
}

/// Daily bars for `EURUSD`.
pub struct MockCurrencyHistorical;

#[async_trait]
impl Fetcher for MockCurrencyHistorical {
    type Category = CurrencyHistorical;

    fn require_credentials(&self) -> bool {
        false
    }

    async fn fetch(
        &self,
        params: CurrencyHistoricalQueryParams,
        _credentials: &Credentials,
    ) -> Result<Vec<CurrencyHistoricalData>, FetchError> {
        maybe_fail_or_timeout(&params.symbol, "CurrencyHistorical").await?;
        fixtures::currency::history(&params.symbol, params.start_date, params.end_date)
            .ok_or_else(|| FetchError::upstream_status(404, format!("no pair {}", params.symbol)))
    }
}
