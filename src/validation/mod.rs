//! Holdout validation of forecasting models.
//!
//! Scores a model on the tail of its own history and turns that accuracy
//! into a bounded multiplier for the final forecast.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use demand_forecast::core::SkuSeries;
//! use demand_forecast::models::{ForecastContext, HybridForecaster};
//! use demand_forecast::validation::{validate_holdout, HoldoutConfig};
//!
//! let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
//! let values: Vec<f64> = (0..48).map(|i| 40.0 + (i % 12) as f64).collect();
//! let series = SkuSeries::from_values("SKU-1", "PA-001", start, &values);
//!
//! let outcome = validate_holdout(
//!     &HybridForecaster::default(),
//!     &series,
//!     &ForecastContext::new(6, 2025),
//!     &HoldoutConfig::default(),
//! );
//! assert!(outcome.adjustment >= 0.7 && outcome.adjustment <= 1.3);
//! ```

mod holdout;

pub use holdout::{validate_holdout, HoldoutConfig, HoldoutOutcome};
