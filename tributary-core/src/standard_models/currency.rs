use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Category, Schema};

/// Search over available currency pairs.
pub struct CurrencyPairs;

impl Category for CurrencyPairs {
    const NAME: &'static str = "CurrencyPairs";
    type Params = CurrencyPairsQueryParams;
    type Data = CurrencyPairsData;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Schema)]
#[schema(description = "Currency pair search.")]
pub struct CurrencyPairsQueryParams {
    /// Case-insensitive substring matched against symbol and name.
    #[schema(description = "Query to search for currency pairs.")]
    pub query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Schema)]
#[schema(description = "Currency pair.")]
pub struct CurrencyPairsData {
    #[schema(description = "Symbol of the currency pair.")]
    pub symbol: String,
    #[schema(description = "Name of the currency pair.")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[schema(description = "Base currency ISO code.")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[schema(description = "Quote currency ISO code.")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
}

/// Daily OHLC history of one currency pair.
pub struct CurrencyHistorical;

impl Category for CurrencyHistorical {
    const NAME: &'static str = "CurrencyHistorical";
    type Params = CurrencyHistoricalQueryParams;
    type Data = CurrencyHistoricalData;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Schema)]
#[schema(description = "Currency pair price history.")]
pub struct CurrencyHistoricalQueryParams {
    #[schema(description = "Symbol of the currency pair, e.g. EURUSD.", min_length = 1)]
    pub symbol: String,
    #[schema(description = "Start date of the data, in YYYY-MM-DD format.")]
    pub start_date: Option<NaiveDate>,
    #[schema(description = "End date of the data, in YYYY-MM-DD format.")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Schema)]
#[schema(description = "Currency pair daily bar.")]
pub struct CurrencyHistoricalData {
    #[schema(description = "The date of the data.")]
    pub date: NaiveDate,
    #[schema(description = "Opening price.")]
    pub open: f64,
    #[schema(description = "High price.")]
    pub high: f64,
    #[schema(description = "Low price.")]
    pub low: f64,
    #[schema(description = "Closing price.")]
    pub close: f64,
}
