//! Atypical periods and their impact on demand.
//!
//! Declared periods (holidays, promotions, one-off disruptions) are
//! classified from their label, expanded into one entry per month, and
//! given a historical impact factor before any SKU is forecast.

mod classify;
mod impact;
mod period;

pub use classify::{classify_event, EventClassification, EventKind, Intensity, Recurrence};
pub use impact::{
    declared_impact, seasonal_factor, sku_holiday_multiplier, window_impact, Observation,
    SeasonalFactor,
};
pub use period::{expand_declared_periods, find_period, AtypicalPeriod, DeclaredPeriod};
