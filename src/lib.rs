//! # demand-forecast
//!
//! Per-SKU monthly demand forecasting.
//!
//! Blends a trend/seasonal decomposition model with a seasonal
//! autoregressive model, and wraps the blend with outlier-aware
//! seasonality detection, atypical period impact estimation, holdout
//! validation and product family business rules.

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod detection;
pub mod error;
pub mod events;
pub mod models;
pub mod pipeline;
pub mod utils;
pub mod validation;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{ForecastResult, SalesRecord, SkuCategory, SkuSeries};
    pub use crate::error::{ForecastError, Result};
    pub use crate::events::DeclaredPeriod;
    pub use crate::models::{ForecastContext, Forecaster, HybridForecaster};
    pub use crate::pipeline::{DemandForecastPipeline, ForecastConfig, ForecastRun};
}
