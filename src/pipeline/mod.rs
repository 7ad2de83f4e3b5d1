//! End-to-end demand forecasting.
//!
//! Takes parsed sales records and declared atypical periods, applies the
//! recency and family rules, and forecasts each remaining SKU with the
//! hybrid model corrected by holdout accuracy and volume category.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use demand_forecast::core::SalesRecord;
//! use demand_forecast::pipeline::{DemandForecastPipeline, ForecastConfig};
//!
//! let records: Vec<SalesRecord> = (1..=12)
//!     .map(|m| SalesRecord::new(NaiveDate::from_ymd_opt(2024, m, 1).unwrap(), "SKU-1", "PA-001", 50))
//!     .collect();
//!
//! let config = ForecastConfig::new(3, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
//! let run = DemandForecastPipeline::new(config).run(&records, &[]).unwrap();
//!
//! assert_eq!(run.results.len(), 1);
//! assert_eq!(run.results[0].rounded_mean, 150);
//! ```

mod category;
mod config;
mod rules;
mod runner;
mod summary;

pub use category::{adjust_for_category, categorize, recent_lookback, SkuProfile};
pub use config::ForecastConfig;
pub use rules::{FamilyAction, FamilyRules};
pub use runner::{DemandForecastPipeline, ForecastRun};
pub use summary::{CategoryCounts, RunSummary, ValidationStats};
