//! The per-SKU forecasting loop.

use crate::core::calendar::{format_numeric_month, in_month_range, month_key, months_inclusive};
use crate::core::{ForecastResult, SalesRecord, SkuCategory, SkuSeries};
use crate::error::{ForecastError, Result};
use crate::events::{expand_declared_periods, AtypicalPeriod, DeclaredPeriod};
use crate::models::{ForecastContext, Forecaster, HybridForecaster, SeasonalArForecaster, TrendSeasonalForecaster};
use crate::pipeline::{
    adjust_for_category, recent_lookback, FamilyAction, ForecastConfig, RunSummary, SkuProfile,
};
use crate::utils::{mean, round_to};
use crate::validation::validate_holdout;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Output of a forecast run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRun {
    /// One row per SKU, in order of first appearance.
    pub results: Vec<ForecastResult>,
    pub summary: RunSummary,
}

/// Forecasts every SKU of a request.
#[derive(Debug, Clone)]
pub struct DemandForecastPipeline {
    config: ForecastConfig,
    model: HybridForecaster,
}

impl DemandForecastPipeline {
    pub fn new(config: ForecastConfig) -> Self {
        let trend = TrendSeasonalForecaster::default()
            .with_outlier_config(config.outliers.clone())
            .with_seasonality_config(config.seasonality.clone());
        Self {
            model: HybridForecaster::new(trend, SeasonalArForecaster::default()),
            config,
        }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Year the seasonal lookback counts back from.
    pub fn reference_year(&self) -> i32 {
        self.config.as_of.year()
    }

    /// Forecast all SKUs in `records`.
    ///
    /// Fails before any SKU is forecast when the request is invalid, and
    /// afterwards when every SKU was excluded.
    pub fn run(&self, records: &[SalesRecord], declared: &[DeclaredPeriod]) -> Result<ForecastRun> {
        self.config.validate()?;
        for period in declared {
            period.validate()?;
        }

        let (start, end) = self.analysis_period(records)?;
        let filtered: Vec<SalesRecord> = records
            .iter()
            .filter(|r| in_month_range(r.date, start, end))
            .cloned()
            .collect();
        if filtered.is_empty() {
            return Err(ForecastError::EmptyData);
        }

        info!(
            start = %format_numeric_month(start),
            end = %format_numeric_month(end),
            records = filtered.len(),
            horizon = self.config.horizon,
            "starting forecast run"
        );

        let periods = expand_declared_periods(declared, &filtered, self.reference_year())?;
        let families = family_map(records);

        let mut results = Vec::new();
        for series in SkuSeries::group(&filtered) {
            let family = families.get(series.sku()).copied().unwrap_or_default().to_string();
            let series = series.with_family(family);
            if let Some(result) = self.forecast_sku(&series, &periods) {
                results.push(result);
            }
        }

        if results.is_empty() {
            return Err(ForecastError::NoForecasts);
        }

        let summary = RunSummary::new(
            &filtered,
            months_inclusive(start, end),
            &results,
            periods.len(),
        );
        info!(
            skus = results.len(),
            validated = summary.validation.validated,
            mean_adjustment = summary.validation.mean_adjustment,
            "forecast run complete"
        );

        Ok(ForecastRun { results, summary })
    }

    /// Forecast one SKU, or `None` when its family is excluded.
    pub fn forecast_sku(
        &self,
        series: &SkuSeries,
        periods: &[AtypicalPeriod],
    ) -> Option<ForecastResult> {
        let sku = series.sku();
        let family = series.family();

        let stale = series
            .last_date()
            .map_or(true, |last| last < self.config.recency_cutoff());
        if stale {
            debug!(sku, family, "no recent sales");
            return Some(ForecastResult::zero(sku, family, SkuCategory::NoRecentSales));
        }

        match self.config.family_rules.action(family) {
            FamilyAction::Exclude => {
                debug!(sku, family, "family excluded");
                return None;
            }
            FamilyAction::ZeroResult => {
                debug!(sku, family, "zero-result family");
                return Some(ForecastResult::zero(sku, family, SkuCategory::ZeroResultFamily));
            }
            FamilyAction::Standard => {}
        }

        Some(self.standard_forecast(series, periods))
    }

    fn standard_forecast(&self, series: &SkuSeries, periods: &[AtypicalPeriod]) -> ForecastResult {
        let horizon = self.config.horizon;
        let values = series.values();
        let profile = SkuProfile::from_values(&values);
        let context = ForecastContext::new(horizon, self.reference_year()).with_periods(periods);

        let holdout = validate_holdout(&self.model, series, &context, &self.config.holdout);

        let recent: Vec<f64> = series
            .tail(recent_lookback(profile.category))
            .iter()
            .map(|p| p.y)
            .collect();
        let recent_average = mean(&recent) * horizon as f64;

        let hybrid = self
            .model
            .forecast_detailed(series, &context.with_recent_average(recent_average));
        let adjusted = hybrid.total * holdout.adjustment;
        let total = adjust_for_category(profile.category, adjusted, recent_average).max(0.0);

        debug!(
            sku = series.sku(),
            family = series.family(),
            category = %profile.category,
            mean = profile.mean,
            cv = profile.cv,
            recent_average,
            hybrid = hybrid.total,
            adjustment = holdout.adjustment,
            total,
            "sku forecast"
        );

        ForecastResult {
            sku: series.sku().to_string(),
            total_forecast: round_to(total, 2),
            rounded_mean: total.round() as i64,
            category: profile.category,
            validation_adjustment: round_to(holdout.adjustment, 2),
            family: series.family().to_string(),
        }
    }

    /// Analysis period of the request, checked against the data.
    fn analysis_period(&self, records: &[SalesRecord]) -> Result<(NaiveDate, NaiveDate)> {
        let first = records.iter().map(|r| r.date).min();
        let last = records.iter().map(|r| r.date).max();
        let (Some(first), Some(last)) = (first, last) else {
            return Err(ForecastError::EmptyData);
        };

        let Some((start, end)) = self.config.analysis_period else {
            return Ok((first, last));
        };
        for boundary in [start, end] {
            let key = month_key(boundary);
            if !records.iter().any(|r| month_key(r.date) == key) {
                return Err(ForecastError::MonthNotInData(format_numeric_month(boundary)));
            }
        }
        Ok((start, end))
    }
}

/// Last non-empty family seen for each SKU.
fn family_map(records: &[SalesRecord]) -> HashMap<&str, &str> {
    let mut families = HashMap::new();
    for record in records.iter().filter(|r| !r.family.is_empty()) {
        families.insert(record.sku.as_str(), record.family.as_str());
    }
    families
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FamilyRules;
    use approx::assert_relative_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pipeline(horizon: usize, as_of: NaiveDate) -> DemandForecastPipeline {
        DemandForecastPipeline::new(ForecastConfig::new(horizon, as_of))
    }

    #[test]
    fn stale_series_is_zeroed_before_family_rules() {
        let series = SkuSeries::from_values("A", "PA-012", ymd(2023, 1, 1), &[10.0; 12]);
        let result = pipeline(3, ymd(2025, 7, 15)).forecast_sku(&series, &[]).unwrap();
        assert_eq!(result.category, SkuCategory::NoRecentSales);
        assert_eq!(result.total_forecast, 0.0);
        assert_eq!(result.validation_adjustment, 1.0);
    }

    #[test]
    fn family_rules_apply_to_recent_series() {
        let p = pipeline(3, ymd(2025, 1, 15));
        let excluded = SkuSeries::from_values("A", "PA-012", ymd(2024, 1, 1), &[10.0; 12]);
        assert!(p.forecast_sku(&excluded, &[]).is_none());

        let zeroed = SkuSeries::from_values("B", "PA-016", ymd(2024, 1, 1), &[10.0; 12]);
        let result = p.forecast_sku(&zeroed, &[]).unwrap();
        assert_eq!(result.category, SkuCategory::ZeroResultFamily);
        assert_eq!(result.rounded_mean, 0);
    }

    #[test]
    fn standard_forecast_of_constant_series() {
        let series = SkuSeries::from_values("A", "PA-001", ymd(2024, 1, 1), &[50.0; 12]);
        let result = pipeline(3, ymd(2025, 1, 15)).forecast_sku(&series, &[]).unwrap();
        assert_eq!(result.category, SkuCategory::MidVolume);
        assert_relative_eq!(result.total_forecast, 150.0, epsilon = 1e-9);
        assert_eq!(result.rounded_mean, 150);
        assert_eq!(result.validation_adjustment, 1.0);
        assert_eq!(result.family, "PA-001");
    }

    #[test]
    fn high_volume_is_trimmed() {
        let series = SkuSeries::from_values("A", "PA-001", ymd(2024, 1, 1), &[100.0; 12]);
        let result = pipeline(2, ymd(2025, 1, 15)).forecast_sku(&series, &[]).unwrap();
        assert_eq!(result.category, SkuCategory::HighVolume);
        assert_relative_eq!(result.total_forecast, 196.0, epsilon = 1e-9);
    }

    #[test]
    fn family_comes_from_all_records() {
        let mut records: Vec<SalesRecord> = (1..=12)
            .map(|m| SalesRecord::new(ymd(2024, m, 1), "A", "PA-001", 20))
            .collect();
        records.push(SalesRecord::new(ymd(2023, 6, 1), "A", "PA-013", 20));
        records.push(SalesRecord::new(ymd(2024, 12, 1), "A", "", 0));
        assert_eq!(family_map(&records).get("A"), Some(&"PA-013"));

        let config = ForecastConfig::new(3, ymd(2025, 1, 15))
            .with_analysis_period(ymd(2024, 1, 1), ymd(2024, 12, 1));
        let run = DemandForecastPipeline::new(config).run(&records, &[]).unwrap();
        assert_eq!(run.results[0].category, SkuCategory::ZeroResultFamily);
        assert_eq!(run.summary.total_records, 13);
    }

    #[test]
    fn custom_rules_disable_exclusions() {
        let records: Vec<SalesRecord> = (1..=12)
            .map(|m| SalesRecord::new(ymd(2024, m, 1), "A", "PA-012", 20))
            .collect();
        let config = ForecastConfig::new(3, ymd(2025, 1, 15)).with_family_rules(FamilyRules::none());
        let run = DemandForecastPipeline::new(config).run(&records, &[]).unwrap();
        assert_eq!(run.results.len(), 1);
        assert_eq!(run.results[0].category, SkuCategory::MidVolume);
    }

    #[test]
    fn analysis_period_defaults_to_data_range() {
        let records = vec![
            SalesRecord::new(ymd(2024, 3, 1), "A", "PA-001", 5),
            SalesRecord::new(ymd(2024, 1, 1), "A", "PA-001", 5),
        ];
        let p = pipeline(3, ymd(2024, 4, 1));
        assert_eq!(p.analysis_period(&records).unwrap(), (ymd(2024, 1, 1), ymd(2024, 3, 1)));
        assert_eq!(p.analysis_period(&[]).unwrap_err(), ForecastError::EmptyData);
    }
}
