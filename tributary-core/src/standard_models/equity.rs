use serde::{Deserialize, Serialize};

use crate::{Category, Schema};

/// Latest quote for one equity.
pub struct EquityQuote;

impl Category for EquityQuote {
    const NAME: &'static str = "EquityQuote";
    type Params = EquityQuoteQueryParams;
    type Data = EquityQuoteData;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Schema)]
#[schema(description = "Equity quote lookup.")]
pub struct EquityQuoteQueryParams {
    /// Ticker symbol.
    #[schema(description = "Symbol to get data for.", min_length = 1)]
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Schema)]
#[schema(description = "Equity quote.")]
pub struct EquityQuoteData {
    #[schema(description = "Symbol representing the entity requested in the data.")]
    pub symbol: String,
    #[schema(description = "Name of the company.")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[schema(description = "Price of the last trade.")]
    pub last_price: f64,
    #[schema(description = "Previous close price.")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_close: Option<f64>,
    #[schema(description = "Volume traded in the current session.")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

/// Top gainers or losers of the session.
pub struct MarketMovers;

impl Category for MarketMovers {
    const NAME: &'static str = "MarketMovers";
    type Params = MarketMoversQueryParams;
    type Data = MarketMoversData;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Schema)]
#[schema(description = "Market movers listing.")]
pub struct MarketMoversQueryParams {
    /// `desc` lists gainers first, `asc` losers first.
    #[schema(
        description = "Sort order by percent change.",
        default = "desc",
        choices("asc", "desc")
    )]
    pub sort: String,
    #[schema(
        description = "Number of entries to return.",
        default = 10,
        ge = 1,
        le = 100
    )]
    pub limit: u32,
}

impl Default for MarketMoversQueryParams {
    fn default() -> Self {
        Self {
            sort: "desc".to_string(),
            limit: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Schema)]
#[schema(description = "Market mover entry.")]
pub struct MarketMoversData {
    #[schema(description = "Symbol representing the entity requested in the data.")]
    pub symbol: String,
    #[schema(description = "Name of the entity.")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[schema(description = "Last price.")]
    pub price: f64,
    #[schema(description = "Change in price from the previous close.")]
    pub change: f64,
    #[schema(description = "Percent change from the previous close.")]
    pub percent_change: f64,
    #[schema(description = "Session volume.")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}
