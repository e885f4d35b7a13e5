use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Category, Schema};

/// Observations of an arbitrary economic series by identifier.
pub struct FredSeries;

impl Category for FredSeries {
    const NAME: &'static str = "FredSeries";
    type Params = FredSeriesQueryParams;
    type Data = FredSeriesData;
}

/// Query for the observations of one economic series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Schema)]
#[schema(description = "Economic series observations.")]
pub struct FredSeriesQueryParams {
    /// Series identifier, e.g. `DGS10`.
    #[schema(description = "Series identifier.", min_length = 1)]
    pub symbol: String,
    /// First date to include.
    #[schema(description = "Start date of the data, in YYYY-MM-DD format.")]
    pub start_date: Option<NaiveDate>,
    /// Last date to include.
    #[schema(description = "End date of the data, in YYYY-MM-DD format.")]
    pub end_date: Option<NaiveDate>,
    /// Maximum number of observations.
    #[schema(
        description = "Maximum number of observations to return.",
        default = 100_000,
        ge = 1
    )]
    pub limit: u32,
}

/// One series observation; `value` is absent when the source has no data for the date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Schema)]
#[schema(description = "Series observation.")]
pub struct FredSeriesData {
    /// Observation date.
    #[schema(description = "The date of the data.")]
    pub date: NaiveDate,
    /// Observed value.
    #[schema(description = "Value of the series on the date.")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}
