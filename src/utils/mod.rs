//! Utility functions shared by the forecasting models.

pub mod ols;
pub mod stats;

pub use ols::{linear_trend, LinearTrend};
pub use stats::{coefficient_of_variation, mean, median, population_std_dev, round_to};
