//! Forecasting models.

mod traits;

pub mod hybrid;
pub mod seasonal_ar;
pub mod trend_seasonal;

pub use hybrid::{HybridForecast, HybridForecaster, HybridWeights};
pub use seasonal_ar::SeasonalArForecaster;
pub use trend_seasonal::TrendSeasonalForecaster;
pub use traits::{ForecastContext, Forecaster};
