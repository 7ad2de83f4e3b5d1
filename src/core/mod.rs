//! Core data structures for monthly demand forecasting.

pub mod calendar;
mod record;
mod result;
mod series;

pub use record::SalesRecord;
pub use result::{ForecastResult, SkuCategory};
pub use series::{SkuDataPoint, SkuSeries};
