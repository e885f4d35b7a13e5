use tributary_core::standard_models::{EquityQuoteData, MarketMoversData};

fn q(symbol: &str, name: &str, last: f64, prev: f64, volume: u64) -> EquityQuoteData {
    EquityQuoteData {
        symbol: symbol.to_string(),
        name: Some(name.to_string()),
        last_price: last,
        prev_close: Some(prev),
        volume: Some(volume),
    }
}

pub fn quote(symbol: &str) -> Option<EquityQuoteData> {
    match symbol {
        "AAPL" => Some(q("AAPL", "Apple Inc.", 190.00, 188.00, 52_000_000)),
        "MSFT" => Some(q("MSFT", "Microsoft Corp", 420.00, 418.00, 21_000_000)),
        "NVDA" => Some(q("NVDA", "NVIDIA Corp", 1000.00, 990.00, 44_000_000)),
        "GOOGL" => Some(q("GOOGL", "Alphabet Inc. Class A", 150.00, 148.00, 25_000_000)),
        "KO" => Some(q("KO", "Coca-Cola", 60.00, 59.50, 12_000_000)),
        "PEP" => Some(q("PEP", "PepsiCo", 170.00, 168.00, 5_000_000)),
        _ => None,
    }
}

const UNIVERSE: &[&str] = &["AAPL", "MSFT", "NVDA", "GOOGL", "KO", "PEP"];

/// Fixture quotes as movers, sorted by percent change.
pub fn movers(ascending: bool, limit: usize) -> Vec<MarketMoversData> {
    let mut rows: Vec<MarketMoversData> = UNIVERSE
        .iter()
        .filter_map(|s| quote(s))
        .map(|q| {
            let prev = q.prev_close.unwrap_or(q.last_price);
            let change = q.last_price - prev;
            MarketMoversData {
                symbol: q.symbol,
                name: q.name,
                price: q.last_price,
                change,
                percent_change: change / prev,
                volume: q.volume,
            }
        })
        .collect();
    rows.sort_by(|a, b| a.percent_change.total_cmp(&b.percent_change));
    if !ascending {
        rows.reverse();
    }
    rows.truncate(limit);
    rows
}
