//! Historical impact estimation for atypical periods.
//!
//! Seasonal events are measured year over year against the surrounding
//! months; other events are measured against the window that precedes
//! them. Every estimate is clamped so a single noisy year cannot blow up
//! a forecast.

use crate::core::calendar::{add_months, in_month_range, months_inclusive};
use crate::core::{SalesRecord, SkuDataPoint};
use crate::events::{classify_event, find_period, AtypicalPeriod};
use crate::utils::stats;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// A dated sales observation.
pub type Observation = (NaiveDate, f64);

/// Years of history inspected by the seasonal factor.
const LOOKBACK_YEARS: i32 = 3;

/// Year-over-year lift of a calendar month against its neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalFactor {
    /// Median of the yearly event/baseline ratios (1.0 when unknown).
    pub factor: f64,
    /// Confidence in `[0, 1]` from sample count and consistency.
    pub confidence: f64,
    /// Number of years that produced a ratio.
    pub samples: usize,
}

impl SeasonalFactor {
    fn neutral() -> Self {
        Self {
            factor: 1.0,
            confidence: 0.0,
            samples: 0,
        }
    }
}

/// Lift of `month0` over the `window` months on each side of it.
///
/// For each year in `reference_year - lookback_years .. reference_year`
/// the mean of the event month is divided by the mean of the neighbouring
/// months of the same calendar year (wrapping around the year end). Years
/// without data on either side, or with a non-positive baseline, are
/// skipped.
pub fn seasonal_factor(
    observations: &[Observation],
    month0: u32,
    reference_year: i32,
    lookback_years: i32,
    window: i32,
) -> SeasonalFactor {
    let comparison: Vec<u32> = (-window..=window)
        .filter(|&offset| offset != 0)
        .map(|offset| (month0 as i32 + offset).rem_euclid(12) as u32)
        .collect();

    let mut ratios = Vec::new();
    for year in (reference_year - lookback_years)..reference_year {
        let event: Vec<f64> = observations
            .iter()
            .filter(|(date, _)| date.year() == year && date.month0() == month0)
            .map(|&(_, y)| y)
            .collect();
        let base: Vec<f64> = observations
            .iter()
            .filter(|(date, _)| date.year() == year && comparison.contains(&date.month0()))
            .map(|&(_, y)| y)
            .collect();

        if event.is_empty() || base.is_empty() {
            continue;
        }
        let base_mean = stats::mean(&base);
        if base_mean > 0.0 {
            ratios.push(stats::mean(&event) / base_mean);
        }
    }

    if ratios.is_empty() {
        return SeasonalFactor::neutral();
    }

    let factor = stats::median(&ratios);
    let sample_confidence = (ratios.len() as f64 / lookback_years as f64).min(1.0);
    let spread = (ratios.iter().map(|r| (r - factor).powi(2)).sum::<f64>()
        / ratios.len() as f64)
        .sqrt();
    let consistency = if factor > 0.0 {
        (1.0 - spread / factor).max(0.0)
    } else {
        0.0
    };

    SeasonalFactor {
        factor,
        confidence: (sample_confidence + consistency) / 2.0,
        samples: ratios.len(),
    }
}

/// Impact of a declared period, as a relative change (0 is neutral).
///
/// Seasonal labels use the pooled year-over-year factor, damped by its
/// confidence and clamped to `[-0.4, 1.0]`. Other labels compare the
/// period against the window right before it.
pub fn declared_impact(
    label: &str,
    start: NaiveDate,
    end: NaiveDate,
    records: &[SalesRecord],
    reference_year: i32,
) -> f64 {
    let classification = classify_event(label);
    debug!(
        label,
        kind = ?classification.kind,
        intensity = ?classification.intensity,
        recurrence = ?classification.recurrence,
        "classified atypical period"
    );

    if !classification.is_seasonal() {
        return window_impact(records, start, end);
    }

    let observations: Vec<Observation> = records
        .iter()
        .map(|r| (r.date, r.units as f64))
        .collect();
    let seasonal = seasonal_factor(
        &observations,
        start.month0(),
        reference_year,
        LOOKBACK_YEARS,
        3,
    );
    let adjustment = (seasonal.factor - 1.0) * seasonal.confidence.min(0.6);

    debug!(
        label,
        factor = seasonal.factor,
        confidence = seasonal.confidence,
        samples = seasonal.samples,
        adjustment,
        "seasonal period impact"
    );
    adjustment.clamp(-0.4, 1.0)
}

/// Relative change of per-SKU means during `start..=end` against the
/// same number of months immediately before it.
///
/// Only SKUs with sales in both windows and a positive baseline count.
/// The average change is clamped to `[-0.5, 0.5]`; missing data gives 0.
pub fn window_impact(records: &[SalesRecord], start: NaiveDate, end: NaiveDate) -> f64 {
    let months = months_inclusive(start, end);
    if months < 1 {
        return 0.0;
    }
    let before_start = add_months(start, -months);
    let before_end = add_months(start, -1);

    let during = sku_means(records, start, end);
    if during.is_empty() {
        debug!("no sales inside the atypical window");
        return 0.0;
    }
    let before = sku_means(records, before_start, before_end);
    if before.is_empty() {
        debug!("no sales in the comparison window");
        return 0.0;
    }

    let impacts: Vec<f64> = during
        .iter()
        .filter_map(|(sku, &during_mean)| {
            let &before_mean = before.get(sku)?;
            (before_mean > 0.0).then(|| (during_mean - before_mean) / before_mean)
        })
        .collect();

    if impacts.is_empty() {
        debug!("no SKU present in both windows");
        return 0.0;
    }

    let impact = stats::mean(&impacts);
    debug!(skus = impacts.len(), impact, "window impact");
    impact.clamp(-0.5, 0.5)
}

fn sku_means<'a>(
    records: &'a [SalesRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> BTreeMap<&'a str, f64> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in records
        .iter()
        .filter(|r| in_month_range(r.date, start, end))
    {
        let entry = sums.entry(record.sku.as_str()).or_insert((0.0, 0));
        entry.0 += record.units as f64;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(sku, (sum, count))| (sku, sum / count as f64))
        .collect()
}

/// Multiplier for one SKU in a future month covered by a declared period.
///
/// 1. No period on `target`: neutral.
/// 2. Precomputed impact: `1 + impact`, damped by 0.7 for seasonal labels.
/// 3. Seasonal label: the SKU's own factor over +/-2 months, clamped to
///    `[0.5, 1.5]`.
/// 4. Otherwise the SKU's sales on the declared dates against the
///    undeclared dates within a week of them, clamped to `[0.2, 5.0]`.
///    Zero sales on the neighbouring dates give 5.0, or 1.0 when the
///    declared dates are zero as well. With first-of-month points no
///    neighbour exists within a week, so monthly histories always get 1.0
///    from this step.
pub fn sku_holiday_multiplier(
    points: &[SkuDataPoint],
    periods: &[AtypicalPeriod],
    target: NaiveDate,
    reference_year: i32,
) -> f64 {
    let Some(current) = find_period(periods, target) else {
        return 1.0;
    };
    let classification = current.classification();

    if current.impact_factor != 0.0 {
        if classification.is_seasonal() {
            return 1.0 + current.impact_factor * 0.7;
        }
        return 1.0 + current.impact_factor;
    }

    if classification.is_seasonal() {
        let observations: Vec<Observation> = points.iter().map(|p| (p.ds, p.y)).collect();
        let seasonal = seasonal_factor(
            &observations,
            target.month0(),
            reference_year,
            LOOKBACK_YEARS,
            2,
        );
        if seasonal.samples > 0 {
            return seasonal.factor.clamp(0.5, 1.5);
        }
    }

    let declared: HashSet<NaiveDate> = periods.iter().map(|p| p.date).collect();
    let value_on = |date: NaiveDate| points.iter().find(|p| p.ds == date).map(|p| p.y);

    let mut during = Vec::new();
    let mut normal = Vec::new();
    for period in periods.iter().filter(|p| p.label == current.label) {
        let Some(y) = value_on(period.date) else {
            continue;
        };
        during.push(y);
        for offset in (-7..=7).filter(|&d| d != 0) {
            let date = period.date + Duration::days(offset);
            if declared.contains(&date) {
                continue;
            }
            if let Some(y) = value_on(date) {
                normal.push(y);
            }
        }
    }

    if during.is_empty() || normal.is_empty() {
        return 1.0;
    }
    let during_mean = stats::mean(&during);
    let normal_mean = stats::mean(&normal);
    if normal_mean == 0.0 {
        // Sales only on the declared dates: the ratio saturates
        return if during_mean > 0.0 { 5.0 } else { 1.0 };
    }
    (during_mean / normal_mean).clamp(0.2, 5.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SkuSeries;
    use crate::events::{expand_declared_periods, DeclaredPeriod};
    use approx::assert_relative_eq;

    fn ymd(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    /// Three years of monthly sales for two SKUs, November at `peak`.
    fn records_with_november_peak(peak: i64) -> Vec<SalesRecord> {
        let mut records = Vec::new();
        for year in 2022..=2024 {
            for month in 1..=12 {
                let units = if month == 11 { peak } else { 100 };
                records.push(SalesRecord::new(ymd(year, month), "A", "PA-001", units));
                records.push(SalesRecord::new(ymd(year, month), "B", "PA-002", units / 2));
            }
        }
        records
    }

    #[test]
    fn seasonal_factor_measures_consistent_lift() {
        let obs: Vec<Observation> = records_with_november_peak(200)
            .iter()
            .filter(|r| r.sku == "A")
            .map(|r| (r.date, r.units as f64))
            .collect();
        let factor = seasonal_factor(&obs, 10, 2025, 3, 3);

        assert_eq!(factor.samples, 3);
        assert_relative_eq!(factor.factor, 2.0, epsilon = 1e-10);
        assert_relative_eq!(factor.confidence, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn seasonal_factor_without_history_is_neutral() {
        let factor = seasonal_factor(&[], 10, 2025, 3, 3);
        assert_eq!(factor.samples, 0);
        assert_eq!(factor.factor, 1.0);
        assert_eq!(factor.confidence, 0.0);
    }

    #[test]
    fn seasonal_factor_confidence_drops_with_fewer_years() {
        let obs: Vec<Observation> = (1..=12)
            .map(|m| (ymd(2024, m), if m == 11 { 150.0 } else { 100.0 }))
            .collect();
        let factor = seasonal_factor(&obs, 10, 2025, 3, 3);

        assert_eq!(factor.samples, 1);
        assert_relative_eq!(factor.factor, 1.5, epsilon = 1e-10);
        // (1/3 + 1) / 2
        assert_relative_eq!(factor.confidence, 2.0 / 3.0, epsilon = 1e-10);
    }

    #[test]
    fn declared_seasonal_impact_is_capped_by_confidence() {
        let records = records_with_november_peak(200);
        let impact = declared_impact("Black Friday", ymd(2024, 11), ymd(2024, 11), &records, 2025);
        // (2 - 1) * min(0.6, 1.0)
        assert_relative_eq!(impact, 0.6, epsilon = 1e-10);
    }

    #[test]
    fn declared_seasonal_impact_is_clamped_from_below() {
        let records = records_with_november_peak(10);
        let impact = declared_impact("Natal", ymd(2024, 11), ymd(2024, 11), &records, 2025);
        assert!(impact >= -0.4);
        assert!(impact < 0.0);
    }

    #[test]
    fn window_impact_compares_with_preceding_window() {
        let mut records = Vec::new();
        for month in 1..=4 {
            let units = if month >= 3 { 130 } else { 100 };
            records.push(SalesRecord::new(ymd(2024, month), "A", "", units));
        }
        // SKU only present during the period is ignored
        records.push(SalesRecord::new(ymd(2024, 3), "C", "", 1000));

        let impact = window_impact(&records, ymd(2024, 3), ymd(2024, 4));
        assert_relative_eq!(impact, 0.3, epsilon = 1e-10);
    }

    #[test]
    fn window_impact_is_clamped_and_neutral_without_data() {
        let records = vec![
            SalesRecord::new(ymd(2024, 1), "A", "", 10),
            SalesRecord::new(ymd(2024, 2), "A", "", 100),
        ];
        assert_relative_eq!(
            window_impact(&records, ymd(2024, 2), ymd(2024, 2)),
            0.5,
            epsilon = 1e-10
        );
        assert_eq!(window_impact(&records, ymd(2025, 2), ymd(2025, 2)), 0.0);
        assert_eq!(window_impact(&records, ymd(2024, 1), ymd(2024, 1)), 0.0);
    }

    #[test]
    fn sku_multiplier_uses_precomputed_impact() {
        let periods = vec![AtypicalPeriod {
            label: "Campanha".to_string(),
            date: ymd(2025, 3),
            lower_window: 0,
            upper_window: 0,
            impact_factor: 0.2,
        }];
        assert_relative_eq!(
            sku_holiday_multiplier(&[], &periods, ymd(2025, 3), 2025),
            1.2,
            epsilon = 1e-10
        );
        assert_eq!(sku_holiday_multiplier(&[], &periods, ymd(2025, 4), 2025), 1.0);

        let seasonal = vec![AtypicalPeriod {
            label: "Natal".to_string(),
            ..periods[0].clone()
        }];
        assert_relative_eq!(
            sku_holiday_multiplier(&[], &seasonal, ymd(2025, 3), 2025),
            1.14,
            epsilon = 1e-10
        );
    }

    #[test]
    fn sku_multiplier_recomputes_seasonal_factor_locally() {
        let values: Vec<f64> = (0..36)
            .map(|i| if i % 12 == 10 { 300.0 } else { 100.0 })
            .collect();
        let series = SkuSeries::from_values("A", "", ymd(2022, 1), &values);
        let periods = vec![AtypicalPeriod {
            label: "Black Friday".to_string(),
            date: ymd(2025, 11),
            lower_window: 0,
            upper_window: 0,
            impact_factor: 0.0,
        }];

        let multiplier = sku_holiday_multiplier(series.points(), &periods, ymd(2025, 11), 2025);
        assert_relative_eq!(multiplier, 1.5, epsilon = 1e-10);
    }

    #[test]
    fn sku_multiplier_monthly_data_has_no_day_level_neighbours() {
        let series = SkuSeries::from_values("A", "", ymd(2024, 1), &[100.0; 12]);
        let declared = vec![DeclaredPeriod::new(ymd(2024, 6), ymd(2024, 6), "Greve")];
        let periods = expand_declared_periods(&declared, &[], 2025).unwrap();

        assert_eq!(
            sku_holiday_multiplier(series.points(), &periods, ymd(2024, 6), 2025),
            1.0
        );
    }

    #[test]
    fn sku_multiplier_day_level_ratio() {
        let points = vec![
            SkuDataPoint::new(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(), 300.0),
            SkuDataPoint::new(NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(), 100.0),
            SkuDataPoint::new(NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(), 100.0),
        ];
        let periods = vec![AtypicalPeriod {
            label: "Greve".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            lower_window: 0,
            upper_window: 0,
            impact_factor: 0.0,
        }];

        let multiplier = sku_holiday_multiplier(&points, &periods, periods[0].date, 2025);
        assert_relative_eq!(multiplier, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn sku_multiplier_day_level_zero_neighbours_saturate() {
        let declared = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let neighbour = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let periods = vec![AtypicalPeriod {
            label: "Greve".to_string(),
            date: declared,
            lower_window: 0,
            upper_window: 0,
            impact_factor: 0.0,
        }];

        let spike = [SkuDataPoint::new(declared, 40.0), SkuDataPoint::new(neighbour, 0.0)];
        assert_eq!(sku_holiday_multiplier(&spike, &periods, declared, 2025), 5.0);

        let silent = [SkuDataPoint::new(declared, 0.0), SkuDataPoint::new(neighbour, 0.0)];
        assert_eq!(sku_holiday_multiplier(&silent, &periods, declared, 2025), 1.0);
    }
}
