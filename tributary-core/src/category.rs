use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::schema::Schematic;

/// Validated request inputs for one category.
///
/// Implemented automatically for any `#[derive(Schema)]` type that is also
/// serde-serializable and cloneable.
pub trait QueryParams: Schematic + Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> QueryParams for T where
    T: Schematic + Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
}

/// One normalized output record of a category.
pub trait Data: Schematic + Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> Data for T where T: Schematic + Serialize + DeserializeOwned + Send + Sync + 'static {}

/// A logical data category: a stable name bound to exactly one
/// `(QueryParams, Data)` pair.
///
/// Categories are marker types; providers offering the same category share
/// its params and data schemas.
pub trait Category: Send + Sync + 'static {
    /// Stable category name used for dispatch, e.g. `"TreasuryRates"`.
    const NAME: &'static str;
    /// Query parameters accepted by fetchers of this category.
    type Params: QueryParams;
    /// Record type returned by fetchers of this category.
    type Data: Data;
}

/// Query-params type of a category.
pub type ParamsOf<C> = <C as Category>::Params;

/// Data type of a category.
pub type DataOf<C> = <C as Category>::Data;
