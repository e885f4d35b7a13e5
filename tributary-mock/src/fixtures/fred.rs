use tributary_core::standard_models::FredSeriesData;

use super::{day, in_range};
use chrono::NaiveDate;

type Observation = ((i32, u32, u32), Option<f64>);

const DGS10: &[Observation] = &[
    ((2024, 1, 1), None),
    ((2024, 1, 2), Some(3.95)),
    ((2024, 1, 3), Some(3.91)),
    ((2024, 1, 4), Some(3.99)),
    ((2024, 1, 5), Some(4.05)),
];

const UNRATE: &[Observation] = &[
    ((2023, 10, 1), Some(3.8)),
    ((2023, 11, 1), Some(3.7)),
    ((2023, 12, 1), Some(3.7)),
    ((2024, 1, 1), Some(3.7)),
];

/// Observations for a known series id, `None` when the id is unknown.
pub fn series(
    id: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    limit: usize,
) -> Option<Vec<FredSeriesData>> {
    let rows = match id {
        "DGS10" => DGS10,
        "UNRATE" => UNRATE,
        _ => return None,
    };
    Some(
        rows.iter()
            .map(|&((y, m, d), value)| FredSeriesData {
                date: day(y, m, d),
                value,
            })
            .filter(|o| in_range(o.date, start, end))
            .take(limit)
            .collect(),
    )
}
