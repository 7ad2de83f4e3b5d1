//! Property-based tests for the forecasting models.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated monthly sales histories.

use chrono::NaiveDate;
use demand_forecast::core::SkuSeries;
use demand_forecast::detection::{detect_outliers, OutlierConfig};
use demand_forecast::models::{
    ForecastContext, Forecaster, HybridForecaster, HybridWeights, SeasonalArForecaster,
    TrendSeasonalForecaster,
};
use demand_forecast::validation::{validate_holdout, HoldoutConfig};
use proptest::prelude::*;

fn make_series(values: &[f64]) -> SkuSeries {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    SkuSeries::from_values("SKU", "PA-001", start, values)
}

/// Strategy for monthly unit sales, including zero months.
fn sales_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0u32..500, min_len..max_len)
        .prop_map(|v| v.into_iter().map(f64::from).collect())
}

/// Strategy for seasonal sales with a yearly peak.
fn seasonal_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len, 10.0..100.0_f64, 1.0..4.0_f64).prop_map(|(len, base, peak)| {
        (0..len)
            .map(|i| if i % 12 == 10 { base * peak } else { base })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn seasonal_ar_never_negative(values in sales_strategy(1, 60), horizon in 1usize..24) {
        let path = SeasonalArForecaster::default().forecast_path(&values, horizon);
        prop_assert_eq!(path.len(), horizon);
        prop_assert!(path.iter().all(|v| *v >= 0.0 && v.is_finite()));
    }

    #[test]
    fn hybrid_weights_sum_to_one(n in 0usize..120, cv in 0.0..5.0_f64) {
        let w = HybridWeights::for_series(n, cv);
        prop_assert!((w.trend + w.autoregressive - 1.0).abs() < 1e-12);
        prop_assert!(w.trend >= 0.6 && w.trend <= 0.85);
    }

    #[test]
    fn holdout_adjustment_is_bounded_or_neutral(values in sales_strategy(1, 80)) {
        let series = make_series(&values);
        let outcome = validate_holdout(
            &HybridForecaster::default(),
            &series,
            &ForecastContext::new(3, 2025),
            &HoldoutConfig::default(),
        );
        prop_assert!(
            outcome.adjustment == 1.0 || (0.7..=1.3).contains(&outcome.adjustment),
            "adjustment {}", outcome.adjustment
        );
    }

    #[test]
    fn constant_series_has_no_outliers(value in 0.0..1000.0_f64, len in 1usize..50) {
        let result = detect_outliers(&vec![value; len], &OutlierConfig::default());
        prop_assert_eq!(result.iqr, 0.0);
        prop_assert_eq!(result.outlier_count(), 0);
    }

    #[test]
    fn trend_seasonal_total_is_finite_and_non_negative(
        values in seasonal_strategy(1, 60),
        horizon in 1usize..18,
    ) {
        let total = TrendSeasonalForecaster::default()
            .forecast_total(&make_series(&values), &ForecastContext::new(horizon, 2025));
        prop_assert!(total.is_finite());
        prop_assert!(total >= 0.0);
    }

    #[test]
    fn hybrid_is_deterministic(values in sales_strategy(12, 48)) {
        let series = make_series(&values);
        let context = ForecastContext::new(6, 2025);
        let model = HybridForecaster::default();
        prop_assert_eq!(
            model.forecast_total(&series, &context),
            model.forecast_total(&series, &context)
        );
    }
}
