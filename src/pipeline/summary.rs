//! Run-level statistics.

use crate::core::{ForecastResult, SalesRecord, SkuCategory};
use crate::utils::round_to;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of output rows per volume category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub high_volume: usize,
    pub mid_volume: usize,
    pub low_volume: usize,
    pub seasonal: usize,
}

impl CategoryCounts {
    pub fn from_results(results: &[ForecastResult]) -> Self {
        let count = |category: SkuCategory| {
            results.iter().filter(|r| r.category == category).count()
        };
        Self {
            high_volume: count(SkuCategory::HighVolume),
            mid_volume: count(SkuCategory::MidVolume),
            low_volume: count(SkuCategory::LowVolume),
            seasonal: count(SkuCategory::Seasonal),
        }
    }
}

/// How often holdout validation changed a forecast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationStats {
    /// Rows whose adjustment is not 1.0.
    pub validated: usize,
    /// Mean adjustment over all rows, 2 decimals.
    pub mean_adjustment: f64,
    /// Share of validated rows, as a rounded percentage.
    pub percent_validated: u32,
}

impl ValidationStats {
    pub fn from_results(results: &[ForecastResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }
        let n = results.len() as f64;
        let validated = results
            .iter()
            .filter(|r| r.validation_adjustment != 1.0)
            .count();
        let mean_adjustment = results.iter().map(|r| r.validation_adjustment).sum::<f64>() / n;
        Self {
            validated,
            mean_adjustment: round_to(mean_adjustment, 2),
            percent_validated: (validated as f64 / n * 100.0).round() as u32,
        }
    }
}

/// Summary of a forecast run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Records inside the analysis period.
    pub total_records: usize,
    pub sku_count: usize,
    /// Mean units per record, 2 decimals.
    pub mean_units: f64,
    /// Length of the analysis period in years, 2 decimals.
    pub span_years: f64,
    pub categories: CategoryCounts,
    pub validation: ValidationStats,
    /// Atypical months declared for the run.
    pub atypical_periods: usize,
}

impl RunSummary {
    pub fn new(
        records: &[SalesRecord],
        span_months: i32,
        results: &[ForecastResult],
        atypical_periods: usize,
    ) -> Self {
        let sku_count = records
            .iter()
            .map(|r| r.sku.as_str())
            .collect::<HashSet<_>>()
            .len();
        let mean_units = if records.is_empty() {
            0.0
        } else {
            records.iter().map(|r| r.units as f64).sum::<f64>() / records.len() as f64
        };

        Self {
            total_records: records.len(),
            sku_count,
            mean_units: round_to(mean_units, 2),
            span_years: round_to(span_months as f64 / 12.0, 2),
            categories: CategoryCounts::from_results(results),
            validation: ValidationStats::from_results(results),
            atypical_periods,
        }
    }
}
