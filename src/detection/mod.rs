//! Detection utilities for monthly sales series.
//!
//! This module provides tools for detecting:
//! - Outliers (IQR method)
//! - Monthly seasonal indices and offsets
//! - Recurring sales spikes

mod outlier;
mod seasonality;

pub use outlier::{detect_outliers, OutlierConfig, OutlierResult};
pub use seasonality::{
    annual_patterns, recurrent_events, seasonal_index, seasonal_offsets, AnnualPatterns,
    RecurrentEvent, RecurrentEventKind, SeasonalityConfig,
};
