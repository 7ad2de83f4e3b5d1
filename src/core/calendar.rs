//! Month-granularity date helpers.
//!
//! All dates handled by the forecasting core are first-of-month
//! `NaiveDate`s. Month arithmetic goes through a linear month key
//! (`year * 12 + month0`) so that comparisons and offsets never have to
//! deal with day overflow.

use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};

const MONTH_LABELS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Linear month key of a date.
pub fn month_key(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// First day of the month identified by `key`.
pub fn month_start(key: i32) -> NaiveDate {
    let year = key.div_euclid(12);
    let month = key.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

/// Truncate a date to the first day of its month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    month_start(month_key(date))
}

/// Shift a date by a number of months, landing on the first of the month.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    month_start(month_key(date) + months)
}

/// Number of months from `start` to `end`, both inclusive.
pub fn months_inclusive(start: NaiveDate, end: NaiveDate) -> i32 {
    month_key(end) - month_key(start) + 1
}

/// Whether `date` falls within the months `start..=end`.
pub fn in_month_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    let key = month_key(date);
    key >= month_key(start) && key <= month_key(end)
}

/// Parse a numeric month such as `"03/2024"`.
pub fn parse_numeric_month(text: &str) -> Result<NaiveDate> {
    let invalid = || ForecastError::InvalidMonth(text.to_string());
    let (month, year) = text.trim().split_once('/').ok_or_else(invalid)?;
    let month: u32 = month.trim().parse().map_err(|_| invalid())?;
    let year: i32 = year.trim().parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

/// Parse an abbreviated month label such as `"jan/25"` or `"dez/2023"`.
///
/// Two-digit years are read as 20xx.
pub fn parse_month_label(text: &str) -> Result<NaiveDate> {
    let invalid = || ForecastError::InvalidMonth(text.to_string());
    let lower = text.trim().to_lowercase();
    let (month, year) = lower.split_once('/').ok_or_else(invalid)?;
    let month0 = MONTH_LABELS
        .iter()
        .position(|label| *label == month.trim())
        .ok_or_else(invalid)?;
    let year = year.trim();
    let parsed: i32 = year.parse().map_err(|_| invalid())?;
    let year = if year.len() == 2 { 2000 + parsed } else { parsed };
    NaiveDate::from_ymd_opt(year, month0 as u32 + 1, 1).ok_or_else(invalid)
}

/// Format a date as `"MM/YYYY"`.
pub fn format_numeric_month(date: NaiveDate) -> String {
    format!("{:02}/{}", date.month(), date.year())
}

/// Format a date as an abbreviated label, e.g. `"jan/25"`.
pub fn format_month_label(date: NaiveDate) -> String {
    format!(
        "{}/{:02}",
        MONTH_LABELS[date.month0() as usize],
        date.year().rem_euclid(100)
    )
}
