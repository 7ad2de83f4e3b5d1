//! User-declared atypical periods and their per-month expansion.

use crate::core::calendar::{add_months, format_numeric_month, months_inclusive, parse_numeric_month};
use crate::core::SalesRecord;
use crate::error::{ForecastError, Result};
use crate::events::{classify_event, declared_impact, EventClassification};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Label used when a declared period has no description.
const DEFAULT_LABEL: &str = "periodo_atipico";

/// A period declared by the user, at month granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclaredPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub description: String,
}

impl DeclaredPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            start,
            end,
            description: description.into(),
        }
    }

    /// Build a period from `"MM/YYYY"` boundaries.
    pub fn parse(start: &str, end: &str, description: impl Into<String>) -> Result<Self> {
        let period = Self::new(
            parse_numeric_month(start)?,
            parse_numeric_month(end)?,
            description,
        );
        period.validate()?;
        Ok(period)
    }

    /// Check that the period does not end before it starts.
    pub fn validate(&self) -> Result<()> {
        if months_inclusive(self.start, self.end) < 1 {
            return Err(ForecastError::InvalidPeriod {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Description, or the default label when it is blank.
    pub fn label(&self) -> &str {
        let trimmed = self.description.trim();
        if trimmed.is_empty() {
            DEFAULT_LABEL
        } else {
            &self.description
        }
    }
}

/// One month of a declared period, with its precomputed impact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtypicalPeriod {
    pub label: String,
    /// First day of the covered month.
    pub date: NaiveDate,
    pub lower_window: i32,
    pub upper_window: i32,
    /// Relative demand change attributed to the period (0 is neutral).
    pub impact_factor: f64,
}

impl AtypicalPeriod {
    pub fn classification(&self) -> EventClassification {
        classify_event(&self.label)
    }
}

/// Expand declared periods into one entry per covered month.
///
/// The impact of each period is computed once, from all `records`, and
/// shared by every month it covers.
pub fn expand_declared_periods(
    declared: &[DeclaredPeriod],
    records: &[SalesRecord],
    reference_year: i32,
) -> Result<Vec<AtypicalPeriod>> {
    let mut expanded = Vec::new();

    for period in declared {
        period.validate()?;
        let label = period.label();
        let impact = declared_impact(label, period.start, period.end, records, reference_year);
        let months = months_inclusive(period.start, period.end);

        info!(
            label,
            start = %format_numeric_month(period.start),
            end = %format_numeric_month(period.end),
            months,
            impact,
            "declared atypical period"
        );

        for offset in 0..months {
            let date = add_months(period.start, offset);
            debug!(label, date = %date, "atypical month");
            expanded.push(AtypicalPeriod {
                label: label.to_string(),
                date,
                lower_window: 0,
                upper_window: 0,
                impact_factor: impact,
            });
        }
    }

    Ok(expanded)
}

/// The first atypical entry falling exactly on `date`.
pub fn find_period(periods: &[AtypicalPeriod], date: NaiveDate) -> Option<&AtypicalPeriod> {
    periods.iter().find(|p| p.date == date)
}
