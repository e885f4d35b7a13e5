use tributary_core::standard_models::{CurrencyHistoricalData, CurrencyPairsData};

use super::{day, in_range};
use chrono::NaiveDate;

const PAIRS: &[(&str, &str, &str, &str)] = &[
    ("EURUSD", "Euro/US Dollar", "EUR", "USD"),
    ("GBPUSD", "British Pound/US Dollar", "GBP", "USD"),
    ("USDJPY", "US Dollar/Japanese Yen", "USD", "JPY"),
    ("AUDUSD", "Australian Dollar/US Dollar", "AUD", "USD"),
];

/// Pairs whose symbol or name contains `query`, ignoring case.
pub fn pairs(query: Option<&str>) -> Vec<CurrencyPairsData> {
    let needle = query.map(str::to_ascii_lowercase);
    PAIRS
        .iter()
        .filter(|(symbol, name, _, _)| {
            needle.as_deref().is_none_or(|n| {
                symbol.to_ascii_lowercase().contains(n) || name.to_ascii_lowercase().contains(n)
            })
        })
        .map(|&(symbol, name, base, quote)| CurrencyPairsData {
            symbol: symbol.to_string(),
            name: Some(name.to_string()),
            base: Some(base.to_string()),
            quote: Some(quote.to_string()),
        })
        .collect()
}

const EURUSD: &[(u32, f64, f64, f64, f64)] = &[
    (2, 1.1037, 1.1045, 1.0937, 1.0940),
    (3, 1.0940, 1.0957, 1.0893, 1.0922),
    (4, 1.0922, 1.0968, 1.0916, 1.0949),
    (5, 1.0949, 1.0998, 1.0877, 1.0941),
];

/// Daily bars for a known pair, `None` when the pair is unknown.
pub fn history(
    symbol: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Option<Vec<CurrencyHistoricalData>> {
    let bars = match symbol {
        "EURUSD" => EURUSD,
        _ => return None,
    };
    Some(
        bars.iter()
            .map(|&(d, open, high, low, close)| CurrencyHistoricalData {
                date: day(2024, 1, d),
                open,
                high,
                low,
                close,
            })
            .filter(|bar| in_range(bar.date, start, end))
            .collect(),
    )
}
