use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Category, Schema};

/// Maturities accepted by `TreasuryRatesQueryParams::maturity`.
pub const TREASURY_MATURITIES: &[&str] = &[
    "1m", "3m", "6m", "1y", "2y", "3y", "5y", "7y", "10y", "20y", "30y",
];

/// U.S. Treasury constant maturity rates.
pub struct TreasuryRates;

impl Category for TreasuryRates {
    const NAME: &'static str = "TreasuryRates";
    type Params = TreasuryRatesQueryParams;
    type Data = TreasuryRatesData;
}

/// Query for daily treasury rates over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Schema)]
#[schema(description = "Daily U.S. Treasury constant maturity rates.")]
pub struct TreasuryRatesQueryParams {
    /// First date to include.
    #[schema(description = "Start date of the data, in YYYY-MM-DD format.")]
    pub start_date: Option<NaiveDate>,
    /// Last date to include.
    #[schema(description = "End date of the data, in YYYY-MM-DD format.")]
    pub end_date: Option<NaiveDate>,
    /// Maturity of the rate series.
    #[schema(
        description = "Maturity of the treasury security.",
        default = "10y",
        choices("1m", "3m", "6m", "1y", "2y", "3y", "5y", "7y", "10y", "20y", "30y")
    )]
    pub maturity: String,
}

impl Default for TreasuryRatesQueryParams {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            maturity: "10y".to_string(),
        }
    }
}

/// One daily treasury rate observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Schema)]
#[schema(description = "Treasury rate observation.")]
pub struct TreasuryRatesData {
    /// Observation date.
    #[schema(description = "The date of the data.")]
    pub date: NaiveDate,
    /// Rate in percent.
    #[schema(description = "Treasury rate, in percent.")]
    pub rate: f64,
    /// Maturity, when the provider reports it.
    #[schema(description = "Maturity of the treasury security.")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity: Option<String>,
}
