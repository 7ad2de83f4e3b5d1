//! Forecaster trait defining the common interface for all models.

use crate::core::SkuSeries;
use crate::events::AtypicalPeriod;

/// Inputs shared by every model for one forecast call.
#[derive(Debug, Clone, Copy)]
pub struct ForecastContext<'a> {
    /// Number of months to forecast.
    pub horizon: usize,
    /// Recent average demand over the horizon; 0 disables the cap it drives.
    pub recent_average: f64,
    /// Declared atypical months.
    pub periods: &'a [AtypicalPeriod],
    /// Year the seasonal lookback counts back from.
    pub reference_year: i32,
}

impl<'a> ForecastContext<'a> {
    pub fn new(horizon: usize, reference_year: i32) -> Self {
        Self {
            horizon,
            recent_average: 0.0,
            periods: &[],
            reference_year,
        }
    }

    pub fn with_recent_average(mut self, recent_average: f64) -> Self {
        self.recent_average = recent_average;
        self
    }

    pub fn with_periods(mut self, periods: &'a [AtypicalPeriod]) -> Self {
        self.periods = periods;
        self
    }

    /// Same context with a different horizon and no recent-average cap.
    pub fn for_holdout(&self, horizon: usize) -> Self {
        Self {
            horizon,
            recent_average: 0.0,
            ..*self
        }
    }
}

/// Common interface for total-demand models.
///
/// Models are stateless: each call fits and projects in one pass.
pub trait Forecaster {
    /// Total demand over `context.horizon` months.
    fn forecast_total(&self, series: &SkuSeries, context: &ForecastContext<'_>) -> f64;

    /// Get the model name.
    fn name(&self) -> &str;
}
