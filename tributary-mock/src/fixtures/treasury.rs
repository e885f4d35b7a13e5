use tributary_core::standard_models::TreasuryRatesData;

use super::{day, in_range};
use chrono::NaiveDate;

/// Business days covered by the fixture, with the 10y rate on each.
const TEN_YEAR: &[(u32, f64)] = &[(2, 3.95), (3, 3.91), (4, 3.99), (5, 4.05), (8, 4.01)];

/// Spread of each maturity over the 10y rate, in percent.
fn spread(maturity: &str) -> Option<f64> {
    Some(match maturity {
        "1m" => 1.58,
        "3m" => 1.49,
        "6m" => 1.30,
        "1y" => 0.88,
        "2y" => 0.38,
        "3y" => 0.11,
        "5y" => -0.02,
        "7y" => -0.03,
        "10y" => 0.0,
        "20y" => 0.27,
        "30y" => 0.15,
        _ => return None,
    })
}

pub fn rates(
    maturity: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<TreasuryRatesData> {
    let Some(spread) = spread(maturity) else {
        return Vec::new();
    };
    TEN_YEAR
        .iter()
        .map(|&(d, rate)| (day(2024, 1, d), rate))
        .filter(|&(date, _)| in_range(date, start, end))
        .map(|(date, rate)| TreasuryRatesData {
            date,
            rate: ((rate + spread) * 100.0).round() / 100.0,
            maturity: Some(maturity.to_string()),
        })
        .collect()
}
