//! Holdout accuracy adjustment.

use crate::core::SkuSeries;
use crate::models::{ForecastContext, Forecaster};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for holdout validation.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldoutConfig {
    /// Share of the history held out.
    pub test_fraction: f64,
    /// Upper bound on the holdout length, in months.
    pub max_test_size: usize,
    /// Holdouts of this length or shorter are skipped.
    pub min_test_size: usize,
    /// Lowest adjustment returned.
    pub lower_bound: f64,
    /// Highest adjustment returned.
    pub upper_bound: f64,
}

impl Default for HoldoutConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            max_test_size: 30,
            min_test_size: 7,
            lower_bound: 0.7,
            upper_bound: 1.3,
        }
    }
}

impl HoldoutConfig {
    /// Set the held out share of the history.
    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Set the adjustment bounds.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower.min(upper);
        self.upper_bound = upper.max(lower);
        self
    }

    /// Holdout length for a history of `n` months.
    pub fn test_size(&self, n: usize) -> usize {
        ((n as f64 * self.test_fraction).floor() as usize).min(self.max_test_size)
    }
}

/// Result of a holdout validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldoutOutcome {
    /// Months held out; 0 when validation was skipped.
    pub test_size: usize,
    /// Model total over the holdout.
    pub forecast: f64,
    /// Observed total over the holdout.
    pub actual: f64,
    /// `min(forecast / actual, actual / forecast)`, when it could be computed.
    pub accuracy: Option<f64>,
    /// Multiplier to apply to the final forecast.
    pub adjustment: f64,
}

impl HoldoutOutcome {
    fn skipped(test_size: usize) -> Self {
        Self {
            test_size,
            forecast: 0.0,
            actual: 0.0,
            accuracy: None,
            adjustment: 1.0,
        }
    }
}

/// Validate `model` on the last months of `series`.
///
/// The model is fit on the head and asked for the held out months with no
/// recent-average cap; declared periods and the reference year are taken
/// from `context`. Short histories and zero actual demand give a neutral
/// adjustment of 1.0.
pub fn validate_holdout<F: Forecaster + ?Sized>(
    model: &F,
    series: &SkuSeries,
    context: &ForecastContext<'_>,
    config: &HoldoutConfig,
) -> HoldoutOutcome {
    let test_size = config.test_size(series.len());
    if test_size <= config.min_test_size {
        return HoldoutOutcome::skipped(test_size);
    }

    let (train, test) = series.split_tail(test_size);
    let forecast = model.forecast_total(&train, &context.for_holdout(test_size));
    let actual: f64 = test.values().iter().sum();

    if actual <= 0.0 {
        debug!(sku = series.sku(), test_size, forecast, "no demand in holdout");
        return HoldoutOutcome {
            forecast,
            ..HoldoutOutcome::skipped(test_size)
        };
    }

    let accuracy = if forecast > 0.0 {
        f64::min(forecast / actual, actual / forecast)
    } else {
        0.0
    };
    let adjustment = accuracy.clamp(config.lower_bound, config.upper_bound);

    debug!(
        sku = series.sku(),
        model = model.name(),
        test_size,
        forecast,
        actual,
        accuracy,
        adjustment,
        "holdout validation"
    );

    HoldoutOutcome {
        test_size,
        forecast,
        actual,
        accuracy: Some(accuracy),
        adjustment,
    }
}
