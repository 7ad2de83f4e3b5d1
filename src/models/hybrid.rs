//! Hybrid forecasting.
//!
//! Blends the trend/seasonal model with the seasonal autoregressive model.
//! Weights depend on how much history the SKU has and how volatile it is:
//! longer histories lean more on the autoregressive part, volatile ones
//! lean on the trend/seasonal part.

use crate::core::SkuSeries;
use crate::models::{ForecastContext, Forecaster, SeasonalArForecaster, TrendSeasonalForecaster};
use crate::utils::coefficient_of_variation;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Blend weights for the two component models. Always sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridWeights {
    /// Weight of the trend/seasonal model.
    pub trend: f64,
    /// Weight of the seasonal autoregressive model.
    pub autoregressive: f64,
}

impl HybridWeights {
    /// Weights for a series of length `n` with coefficient of variation `cv`.
    pub fn for_series(n: usize, cv: f64) -> Self {
        let mut trend = if n >= 24 {
            0.6
        } else if n < 12 {
            0.8
        } else {
            0.7
        };
        if cv > 1.0 {
            trend = f64::min(0.85, trend + 0.15);
        }
        Self {
            trend,
            autoregressive: 1.0 - trend,
        }
    }

    /// Weighted sum of the two component totals.
    pub fn combine(&self, trend_total: f64, autoregressive_total: f64) -> f64 {
        self.trend * trend_total + self.autoregressive * autoregressive_total
    }
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            trend: 0.7,
            autoregressive: 0.3,
        }
    }
}

/// A hybrid forecast with its components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridForecast {
    pub trend_total: f64,
    pub autoregressive_total: f64,
    pub weights: HybridWeights,
    pub total: f64,
}

/// Weighted blend of [`TrendSeasonalForecaster`] and [`SeasonalArForecaster`].
#[derive(Debug, Clone, Default)]
pub struct HybridForecaster {
    trend: TrendSeasonalForecaster,
    autoregressive: SeasonalArForecaster,
}

impl HybridForecaster {
    /// Create a hybrid from explicit component models.
    pub fn new(trend: TrendSeasonalForecaster, autoregressive: SeasonalArForecaster) -> Self {
        Self {
            trend,
            autoregressive,
        }
    }

    /// Forecast with both component totals and the weights used.
    pub fn forecast_detailed(&self, series: &SkuSeries, context: &ForecastContext<'_>) -> HybridForecast {
        let trend_total = self.trend.forecast_total(series, context);
        let autoregressive_total = self.autoregressive.forecast_total(series, context);

        let values = series.values();
        let weights = HybridWeights::for_series(values.len(), coefficient_of_variation(&values));
        let total = weights.combine(trend_total, autoregressive_total);

        debug!(
            sku = series.sku(),
            trend_total,
            autoregressive_total,
            trend_weight = weights.trend,
            autoregressive_weight = weights.autoregressive,
            total,
            "hybrid forecast"
        );

        HybridForecast {
            trend_total,
            autoregressive_total,
            weights,
            total,
        }
    }
}

impl Forecaster for HybridForecaster {
    fn forecast_total(&self, series: &SkuSeries, context: &ForecastContext<'_>) -> f64 {
        self.forecast_detailed(series, context).total
    }

    fn name(&self) -> &str {
        "Hybrid"
    }
}
