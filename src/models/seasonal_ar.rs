//! Seasonal autoregressive forecaster.
//!
//! A reduced SARIMA: lag-12 seasonal differencing, one regular difference
//! on top, and an AR(1) coefficient fitted on the twice-differenced series.
//! Each forecast month repeats the value from one season back and adds the
//! last seasonal difference decayed by `phi^h`.

use crate::core::SkuSeries;
use crate::models::{ForecastContext, Forecaster};
use crate::utils::mean;
use tracing::debug;

/// Seasonal autoregressive forecaster.
#[derive(Debug, Clone)]
pub struct SeasonalArForecaster {
    period: usize,
    phi_bound: f64,
}

impl SeasonalArForecaster {
    /// Create a forecaster with the given seasonal period.
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
            phi_bound: 0.8,
        }
    }

    /// Per-month forecasts; every value is non-negative.
    ///
    /// Series shorter than one season forecast their mean.
    pub fn forecast_path(&self, values: &[f64], horizon: usize) -> Vec<f64> {
        let n = values.len();
        if n < self.period {
            return vec![mean(values); horizon];
        }

        let seasonal = seasonal_difference(values, self.period);
        let twice = difference(&seasonal);
        let phi = self.fit_phi(&twice);

        let seasonal_base = values[n - self.period];
        let last_difference = seasonal.last().copied().unwrap_or(0.0);

        debug!(n, phi, seasonal_base, last_difference, "fitted seasonal AR");

        (1..=horizon)
            .map(|h| (seasonal_base + last_difference * phi.powi(h as i32)).max(0.0))
            .collect()
    }

    /// Least-squares AR(1) coefficient, clamped to `[-bound, bound]`.
    pub fn fit_phi(&self, series: &[f64]) -> f64 {
        if series.len() < 2 {
            return 0.0;
        }
        let (numerator, denominator) = series
            .windows(2)
            .fold((0.0, 0.0), |(num, den), w| (num + w[1] * w[0], den + w[0] * w[0]));
        if denominator <= 0.0 {
            return 0.0;
        }
        (numerator / denominator).clamp(-self.phi_bound, self.phi_bound)
    }
}

impl Default for SeasonalArForecaster {
    fn default() -> Self {
        Self::new(12) // Monthly data
    }
}

impl Forecaster for SeasonalArForecaster {
    fn forecast_total(&self, series: &SkuSeries, context: &ForecastContext<'_>) -> f64 {
        self.forecast_path(&series.values(), context.horizon)
            .iter()
            .sum()
    }

    fn name(&self) -> &str {
        "SeasonalAR"
    }
}

/// First differences: `y[t] - y[t-1]`.
pub fn difference(series: &[f64]) -> Vec<f64> {
    series.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Seasonal differences: `y[t] - y[t-period]`.
pub fn seasonal_difference(series: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || series.len() <= period {
        return Vec::new();
    }
    series
        .iter()
        .skip(period)
        .zip(series.iter())
        .map(|(curr, prev)| curr - prev)
        .collect()
}
