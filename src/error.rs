//! Error types for the demand-forecast library.
//!
//! The numeric core never fails; these errors belong to the request
//! boundary, where inputs are checked before any SKU is forecast.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while preparing or running a forecast request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// No records left to forecast.
    #[error("empty input data")]
    EmptyData,

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A period whose start does not precede its end.
    #[error("invalid period: start {start} must not be after end {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    /// An analysis boundary month has no sales records.
    #[error("month {0} not found in the sales data")]
    MonthNotInData(String),

    /// A month label could not be parsed.
    #[error("invalid month: {0}")]
    InvalidMonth(String),

    /// Every SKU was excluded by the business rules.
    #[error("no SKU produced a forecast")]
    NoForecasts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForecastError::EmptyData;
        assert_eq!(err.to_string(), "empty input data");

        let err = ForecastError::InvalidParameter("horizon must be positive".to_string());
        assert_eq!(err.to_string(), "invalid parameter: horizon must be positive");

        let err = ForecastError::InvalidPeriod {
            start: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "invalid period: start 2024-05-01 must not be after end 2024-01-01"
        );

        let err = ForecastError::MonthNotInData("03/2024".to_string());
        assert_eq!(err.to_string(), "month 03/2024 not found in the sales data");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = ForecastError::NoForecasts;
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
