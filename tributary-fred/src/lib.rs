//! tributary-fred
//!
//! Provider `fred` backed by the FRED (Federal Reserve Economic Data) API.
//! Serves `TreasuryRates` (constant maturity series `DGS1MO` .. `DGS30`) and
//! `FredSeries` (any series by id). Requires the `api_key` credential.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;

use std::sync::Arc;

use adapter::{FredObservations, Observation, ObservationsRequest, RealAdapter};
use async_trait::async_trait;
use chrono::NaiveDate;
use tributary_core::standard_models::{
    FredSeries, FredSeriesData, FredSeriesQueryParams, TreasuryRates, TreasuryRatesData,
    TreasuryRatesQueryParams,
};
use tributary_core::{Credentials, FetchError, Fetcher, Provider, TributaryError};

/// Provider name.
pub const NAME: &str = "fred";

/// Credential holding the FRED API key.
pub const API_KEY: &str = "api_key";

/// Build the `fred` provider against the public API.
///
/// # Errors
/// Fails if the HTTP client cannot be created.
pub fn provider() -> Result<Provider, TributaryError> {
    let adapter = RealAdapter::new_default().map_err(|e| e.into_dispatch(NAME))?;
    provider_with_adapter(Arc::new(adapter))
}

/// Build the `fred` provider against another FRED-compatible endpoint.
///
/// # Errors
/// Fails if `base_url` is invalid or the HTTP client cannot be created.
pub fn provider_with_base_url(base_url: &str) -> Result<Provider, TributaryError> {
    let adapter = RealAdapter::with_base_url(base_url).map_err(|e| e.into_dispatch(NAME))?;
    provider_with_adapter(Arc::new(adapter))
}

/// Build the `fred` provider over an injected adapter.
///
/// # Errors
/// Only fails if a built-in schema is malformed.
pub fn provider_with_adapter(
    adapter: Arc<dyn FredObservations>,
) -> Result<Provider, TributaryError> {
    Provider::builder(NAME)
        .display_name("FRED")
        .website("https://fred.stlouisfed.org")
        .description("Federal Reserve Economic Data from the Federal Reserve Bank of St. Louis.")
        .credentials(&[API_KEY])
        .fetcher(FredTreasuryRates {
            adapter: Arc::clone(&adapter),
        })
        .fetcher(FredSeriesFetcher { adapter })
        .build()
}

/// FRED series id for a treasury maturity.
#[must_use]
pub fn treasury_series_id(maturity: &str) -> Option<&'static str> {
    Some(match maturity {
        "1m" => "DGS1MO",
        "3m" => "DGS3MO",
        "6m" => "DGS6MO",
        "1y" => "DGS1",
        "2y" => "DGS2",
        "3y" => "DGS3",
        "5y" => "DGS5",
        "7y" => "DGS7",
        "10y" => "DGS10",
        "20y" => "DGS20",
        "30y" => "DGS30",
        _ => return None,
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, FetchError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| FetchError::transform(format!("bad observation date {raw:?}: {e}")))
}

/// `"."` marks a missing observation.
fn parse_value(raw: &str) -> Result<Option<f64>, FetchError> {
    match raw.trim() {
        "." | "" => Ok(None),
        v => v
            .parse::<f64>()
            .map(Some)
            .map_err(|e| FetchError::transform(format!("bad observation value {raw:?}: {e}"))),
    }
}

/// `TreasuryRates` from the `DGS*` constant maturity series.
///
/// Dates without an observation are skipped.
pub struct FredTreasuryRates {
    adapter: Arc<dyn FredObservations>,
}

#[async_trait]
impl Fetcher for FredTreasuryRates {
    type Category = TreasuryRates;

    async fn fetch(
        &self,
        params: TreasuryRatesQueryParams,
        credentials: &Credentials,
    ) -> Result<Vec<TreasuryRatesData>, FetchError> {
        let api_key = credentials.require(API_KEY)?;
        let series_id = treasury_series_id(&params.maturity).ok_or_else(|| {
            FetchError::transform(format!("no treasury series for maturity {}", params.maturity))
        })?;
        let req = ObservationsRequest {
            series_id: series_id.to_string(),
            start: params.start_date,
            end: params.end_date,
            limit: None,
        };
        let observations = self.adapter.observations(&req, api_key).await?;

        let mut out = Vec::with_capacity(observations.len());
        for Observation { date, value } in observations {
            if let Some(rate) = parse_value(&value)? {
                out.push(TreasuryRatesData {
                    date: parse_date(&date)?,
                    rate,
                    maturity: None,
                });
            }
        }
        Ok(out)
    }
}

/// `FredSeries` for any series id.
pub struct FredSeriesFetcher {
    adapter: Arc<dyn FredObservations>,
}

#[async_trait]
impl Fetcher for FredSeriesFetcher {
    type Category = FredSeries;

    async fn fetch(
        &self,
        params: FredSeriesQueryParams,
        credentials: &Credentials,
    ) -> Result<Vec<FredSeriesData>, FetchError> {
        let api_key = credentials.require(API_KEY)?;
        let req = ObservationsRequest {
            series_id: params.symbol,
            start: params.start_date,
            end: params.end_date,
            limit: Some(params.limit),
        };
        self.adapter
            .observations(&req, api_key)
            .await?
            .into_iter()
            .map(|o| {
                Ok(FredSeriesData {
                    date: parse_date(&o.date)?,
                    value: parse_value(&o.value)?,
                })
            })
            .collect()
    }
}
