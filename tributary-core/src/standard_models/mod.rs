//! Built-in categories.
//!
//! Each category is a marker type implementing [`crate::Category`] that binds
//! a `*QueryParams` type to a `*Data` type. Field names and types are shared
//! by every provider offering the category; optional data fields that a
//! provider does not supply are left out of serialized records.

// Field documentation lives in the schema descriptions.
#[allow(missing_docs)]
mod currency;
#[allow(missing_docs)]
mod equity;
mod fred;
mod treasury;

pub use currency::{
    CurrencyHistorical, CurrencyHistoricalData, CurrencyHistoricalQueryParams, CurrencyPairs,
    CurrencyPairsData, CurrencyPairsQueryParams,
};
pub use equity::{
    EquityQuote, EquityQuoteData, EquityQuoteQueryParams, MarketMovers, MarketMoversData,
    MarketMoversQueryParams,
};
pub use fred::{FredSeries, FredSeriesData, FredSeriesQueryParams};
pub use treasury::{TREASURY_MATURITIES, TreasuryRates, TreasuryRatesData, TreasuryRatesQueryParams};

/// Names of every built-in category.
pub const STANDARD_CATEGORIES: &[&str] = &[
    <TreasuryRates as crate::Category>::NAME,
    <FredSeries as crate::Category>::NAME,
    <EquityQuote as crate::Category>::NAME,
    <MarketMovers as crate::Category>::NAME,
    <CurrencyPairs as crate::Category>::NAME,
    <CurrencyHistorical as crate::Category>::NAME,
];
