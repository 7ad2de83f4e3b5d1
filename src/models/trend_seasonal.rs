//! Trend plus monthly seasonality forecaster.
//!
//! A decomposition model in the spirit of Prophet, reduced to what monthly
//! SKU histories support:
//!
//! - outliers are replaced by the series mean before fitting the trend
//! - a least-squares line gives the trend, damped for short histories
//! - additive monthly offsets and a multiplicative annual index add the
//!   seasonality
//! - declared atypical months and auto-detected recurring spikes scale
//!   individual forecast months
//!
//! The total is then nudged by the recent trend and clamped between a
//! floor tied to historical means and a cap tied to recent demand.

use crate::core::calendar::add_months;
use crate::core::SkuSeries;
use crate::detection::{
    annual_patterns, detect_outliers, seasonal_offsets, OutlierConfig, SeasonalityConfig,
};
use crate::events::{find_period, seasonal_factor, sku_holiday_multiplier, Observation};
use crate::models::{ForecastContext, Forecaster};
use crate::utils::{linear_trend, mean, round_to};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Trend plus monthly seasonality forecaster.
#[derive(Debug, Clone, Default)]
pub struct TrendSeasonalForecaster {
    outliers: OutlierConfig,
    seasonality: SeasonalityConfig,
}

impl TrendSeasonalForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outlier detection configuration.
    pub fn with_outlier_config(mut self, config: OutlierConfig) -> Self {
        self.outliers = config;
        self
    }

    /// Set the recurring spike detection configuration.
    pub fn with_seasonality_config(mut self, config: SeasonalityConfig) -> Self {
        self.seasonality = config;
        self
    }

    /// Multiplier for a declared seasonal month, from the SKU's own history.
    fn seasonal_period_multiplier(
        &self,
        observations: &[Observation],
        target: NaiveDate,
        reference_year: i32,
    ) -> f64 {
        let seasonal = seasonal_factor(observations, target.month0(), reference_year, 3, 3);
        1.0 + (seasonal.factor - 1.0) * seasonal.confidence.min(1.0) * 0.7
    }
}

impl Forecaster for TrendSeasonalForecaster {
    fn forecast_total(&self, series: &SkuSeries, context: &ForecastContext<'_>) -> f64 {
        let Some(last_date) = series.last_date() else {
            return 0.0;
        };
        let horizon = context.horizon;
        let points = series.points();
        let values = series.values();
        let n = values.len();
        let overall_mean = mean(&values);

        let outliers = detect_outliers(&values, &self.outliers);
        let cleaned: Vec<f64> = values
            .iter()
            .enumerate()
            .map(|(i, &y)| if outliers.is_outlier(i) { overall_mean } else { y })
            .collect();

        let trend = linear_trend(&cleaned);
        let offsets = seasonal_offsets(points, &outliers.mask);
        let patterns = annual_patterns(points, &self.seasonality);
        let trend_weight = (n as f64 / 12.0).min(1.0);
        let observations: Vec<Observation> = points.iter().map(|p| (p.ds, p.y)).collect();

        debug!(
            sku = series.sku(),
            n,
            slope = trend.slope,
            intercept = trend.intercept,
            outliers = outliers.outlier_count(),
            recurring_events = patterns.events.len(),
            "fitted trend/seasonal components"
        );

        let mut total = 0.0;
        for h in 1..=horizon {
            let target = add_months(last_date, h as i32);
            let month = target.month0() as usize;

            let trend_value = trend.intercept + trend.slope * trend_weight * (n + h) as f64;
            let annual = (patterns.seasonal_index[month] - 1.0) * overall_mean;
            let mut step = (trend_value + offsets[month] + annual).max(0.0);

            if let Some(period) = find_period(context.periods, target) {
                let multiplier = if period.classification().is_seasonal() {
                    self.seasonal_period_multiplier(&observations, target, context.reference_year)
                } else {
                    sku_holiday_multiplier(points, context.periods, target, context.reference_year)
                };
                debug!(sku = series.sku(), date = %target, label = %period.label, multiplier, "atypical month");
                step *= multiplier;
            } else if let Some(event) = patterns
                .events
                .iter()
                .find(|e| e.is_near(target, &self.seasonality))
            {
                let multiplier = event.forecast_multiplier();
                debug!(sku = series.sku(), date = %target, kind = ?event.kind, multiplier, "recurring event");
                step *= multiplier;
            }

            total += step;
        }

        let last_12 = mean(&values[n.saturating_sub(12)..]);
        let last_3 = mean(&values[n.saturating_sub(3)..]);
        if last_12 > 0.0 {
            let recent_trend = last_3 / last_12;
            if recent_trend < 0.6 {
                debug!(sku = series.sku(), recent_trend, "recent decline, conservative adjustment");
                total *= 0.95;
            } else if recent_trend > 1.4 && n > 12 {
                debug!(sku = series.sku(), recent_trend, "recent growth, optimistic adjustment");
                total *= 1.05;
            }
        }

        let horizon_f = horizon as f64;
        let cap = if context.recent_average > 0.0 {
            context.recent_average * 2.0
        } else {
            overall_mean * horizon_f * 1.5
        };
        if total > cap {
            debug!(sku = series.sku(), total, cap, "capping forecast");
            total = cap;
        }
        let floor = (overall_mean * horizon_f * 0.5).max(last_12 * horizon_f * 0.6);
        total = total.max(floor);

        round_to(total, 2)
    }

    fn name(&self) -> &str {
        "TrendSeasonal"
    }
}
