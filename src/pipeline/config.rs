//! Configuration of a forecast run.

use crate::detection::{OutlierConfig, SeasonalityConfig};
use crate::error::{ForecastError, Result};
use crate::pipeline::FamilyRules;
use crate::validation::HoldoutConfig;
use chrono::{Months, NaiveDate};

/// Configuration for [`DemandForecastPipeline`](crate::pipeline::DemandForecastPipeline).
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    /// Months to forecast.
    pub horizon: usize,
    /// Date the run is made on; drives the recency gate and the seasonal
    /// lookback years.
    pub as_of: NaiveDate,
    /// First and last month of history to use. `None` uses all records.
    pub analysis_period: Option<(NaiveDate, NaiveDate)>,
    /// SKUs whose last sale is older than this many months get a zero forecast.
    pub recency_months: u32,
    pub family_rules: FamilyRules,
    pub holdout: HoldoutConfig,
    pub outliers: OutlierConfig,
    /// Recurring spike detection for the trend/seasonal model.
    pub seasonality: SeasonalityConfig,
}

impl ForecastConfig {
    pub fn new(horizon: usize, as_of: NaiveDate) -> Self {
        Self {
            horizon,
            as_of,
            analysis_period: None,
            recency_months: 6,
            family_rules: FamilyRules::default(),
            holdout: HoldoutConfig::default(),
            outliers: OutlierConfig::default(),
            seasonality: SeasonalityConfig::default(),
        }
    }

    /// Restrict the history to the months `start..=end`.
    pub fn with_analysis_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.analysis_period = Some((start, end));
        self
    }

    /// Set the recency window, in months.
    pub fn with_recency_months(mut self, months: u32) -> Self {
        self.recency_months = months;
        self
    }

    /// Set the family rules.
    pub fn with_family_rules(mut self, rules: FamilyRules) -> Self {
        self.family_rules = rules;
        self
    }

    /// Set the holdout validation configuration.
    pub fn with_holdout(mut self, holdout: HoldoutConfig) -> Self {
        self.holdout = holdout;
        self
    }

    /// Set the outlier detection configuration.
    pub fn with_outliers(mut self, outliers: OutlierConfig) -> Self {
        self.outliers = outliers;
        self
    }

    /// Set the recurring spike detection configuration.
    pub fn with_seasonality(mut self, seasonality: SeasonalityConfig) -> Self {
        self.seasonality = seasonality;
        self
    }

    /// Sales strictly before this date count as stale.
    ///
    /// Calendar-month subtraction with the day clamped to the end of the
    /// target month: `as_of` 2025-08-31 minus 6 months is 2025-02-28.
    pub fn recency_cutoff(&self) -> NaiveDate {
        self.as_of
            .checked_sub_months(Months::new(self.recency_months))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Check the parameters that do not depend on the data.
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon must be positive".to_string(),
            ));
        }
        if let Some((start, end)) = self.analysis_period {
            if start >= end {
                return Err(ForecastError::InvalidPeriod { start, end });
            }
        }
        if self.seasonality.spike_threshold < 0.0 {
            return Err(ForecastError::InvalidParameter(
                "spike threshold must be non-negative".to_string(),
            ));
        }
        if self.outliers.multiplier < 0.0 {
            return Err(ForecastError::InvalidParameter(
                "outlier multiplier must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults() {
        let config = ForecastConfig::new(3, ymd(2025, 7, 15));
        assert_eq!(config.recency_months, 6);
        assert!(config.analysis_period.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn recency_cutoff_is_calendar_months() {
        let config = ForecastConfig::new(3, ymd(2025, 7, 15));
        assert_eq!(config.recency_cutoff(), ymd(2025, 1, 15));

        let config = ForecastConfig::new(3, ymd(2025, 8, 31));
        assert_eq!(config.recency_cutoff(), ymd(2025, 2, 28));

        // Clamped, not rolled over into March
        let config = ForecastConfig::new(3, ymd(2024, 8, 31));
        assert_eq!(config.recency_cutoff(), ymd(2024, 2, 29));
        let config = ForecastConfig::new(3, ymd(2025, 12, 31)).with_recency_months(10);
        assert_eq!(config.recency_cutoff(), ymd(2025, 2, 28));
    }

    #[test]
    fn negative_spike_threshold_is_rejected() {
        let config = ForecastConfig::new(3, ymd(2025, 1, 1))
            .with_seasonality(SeasonalityConfig::default().with_spike_threshold(-1.0));
        assert!(matches!(config.validate(), Err(ForecastError::InvalidParameter(_))));
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let err = ForecastConfig::new(0, ymd(2025, 1, 1)).validate().unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter(_)));
    }

    #[test]
    fn analysis_start_must_precede_end() {
        let same = ForecastConfig::new(3, ymd(2025, 1, 1))
            .with_analysis_period(ymd(2024, 5, 1), ymd(2024, 5, 1));
        assert!(matches!(same.validate(), Err(ForecastError::InvalidPeriod { .. })));

        let ok = ForecastConfig::new(3, ymd(2025, 1, 1))
            .with_analysis_period(ymd(2024, 1, 1), ymd(2024, 5, 1));
        assert!(ok.validate().is_ok());
    }
}
