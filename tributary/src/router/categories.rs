use tributary_core::standard_models::{
    CurrencyHistorical, CurrencyPairs, EquityQuote, FredSeries, MarketMovers, TreasuryRates,
};

use crate::Tributary;

impl Tributary {
    tributary_category_method! {
        /// Fetch daily treasury rates.
        method: treasury_rates,
        category: TreasuryRates
    }

    tributary_category_method! {
        /// Fetch observations of an economic series.
        method: fred_series,
        category: FredSeries
    }

    tributary_category_method! {
        /// Fetch the latest quote for an equity.
        method: equity_quote,
        category: EquityQuote
    }

    tributary_category_method! {
        /// Fetch the session's top gainers or losers.
        method: market_movers,
        category: MarketMovers
    }

    tributary_category_method! {
        /// Search available currency pairs.
        method: currency_pairs,
        category: CurrencyPairs
    }

    tributary_category_method! {
        /// Fetch daily OHLC history of a currency pair.
        method: currency_historical,
        category: CurrencyHistorical
    }
}
