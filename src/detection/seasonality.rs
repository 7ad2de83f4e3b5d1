//! Monthly seasonality and recurring spike detection.
//!
//! Works on a SKU's own history: per-calendar-month indices and additive
//! offsets relative to the overall mean, plus spikes that repeat around
//! the same time of year.

use crate::core::SkuDataPoint;
use crate::utils::stats;
use chrono::{Datelike, NaiveDate};

/// Configuration for recurring spike detection.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalityConfig {
    /// A point is a spike candidate when `y > spike_threshold * mean`.
    pub spike_threshold: f64,
    /// Maximum month-number distance between related spikes.
    pub month_tolerance: u32,
    /// Maximum day-of-month distance between related spikes.
    pub day_tolerance: u32,
    /// Spikes needed (the candidate included) to call it recurring.
    pub min_occurrences: usize,
    /// Impact ratio above which a spike is a price-increase event.
    pub price_increase_ratio: f64,
}

impl Default for SeasonalityConfig {
    fn default() -> Self {
        Self {
            spike_threshold: 1.5,
            month_tolerance: 1,
            day_tolerance: 7,
            min_occurrences: 2,
            price_increase_ratio: 2.0,
        }
    }
}

impl SeasonalityConfig {
    /// Set the spike threshold multiplier.
    pub fn with_spike_threshold(mut self, threshold: f64) -> Self {
        self.spike_threshold = threshold;
        self
    }

    /// Set the month and day tolerances.
    pub fn with_tolerance(mut self, months: u32, days: u32) -> Self {
        self.month_tolerance = months;
        self.day_tolerance = days;
        self
    }

    /// Set the minimum occurrences for a recurring spike.
    pub fn with_min_occurrences(mut self, occurrences: usize) -> Self {
        self.min_occurrences = occurrences;
        self
    }
}

/// Kind of an auto-detected recurring event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrentEventKind {
    /// Strong spike, typically buying ahead of a price increase.
    PriceIncrease,
    /// Moderate spike tied to the season.
    SeasonalEvent,
}

/// A spike that repeats around the same calendar position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecurrentEvent {
    /// Calendar month, 0-based.
    pub month: u32,
    /// Day of month.
    pub day: u32,
    pub kind: RecurrentEventKind,
    /// Spike value divided by the series mean.
    pub impact: f64,
}

impl RecurrentEvent {
    /// Whether `date` lies within the tolerances of this event.
    ///
    /// Month distance is measured on the month number, without wrapping
    /// December to January.
    pub fn is_near(&self, date: NaiveDate, config: &SeasonalityConfig) -> bool {
        is_near(self.month, self.day, date, config)
    }

    /// Multiplier applied to a forecast month that coincides with this event.
    pub fn forecast_multiplier(&self) -> f64 {
        match self.kind {
            RecurrentEventKind::PriceIncrease => (self.impact * 0.8).min(2.5),
            RecurrentEventKind::SeasonalEvent => (self.impact * 0.6).min(1.8),
        }
    }
}

fn is_near(month: u32, day: u32, date: NaiveDate, config: &SeasonalityConfig) -> bool {
    month.abs_diff(date.month0()) <= config.month_tolerance
        && day.abs_diff(date.day()) <= config.day_tolerance
}

/// Seasonal index and recurring events of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualPatterns {
    /// Per-month mean divided by the overall mean (1.0 is neutral).
    pub seasonal_index: [f64; 12],
    pub events: Vec<RecurrentEvent>,
}

/// Per-month average divided by the overall mean.
///
/// Months with no observations, and every month when the overall mean is
/// zero, get the neutral index 1.0.
pub fn seasonal_index(points: &[SkuDataPoint]) -> [f64; 12] {
    let mut sums = [0.0; 12];
    let mut counts = [0usize; 12];
    for point in points {
        let month = point.ds.month0() as usize;
        sums[month] += point.y;
        counts[month] += 1;
    }

    let overall = mean_of(points);
    let mut index = [1.0; 12];
    if overall == 0.0 {
        return index;
    }
    for month in 0..12 {
        if counts[month] > 0 {
            index[month] = (sums[month] / counts[month] as f64) / overall;
        }
    }
    index
}

/// Per-month average of non-outlier points minus the overall mean.
///
/// `outliers` is parallel to `points`; missing flags count as inliers.
/// Months without inliers get an offset of 0.
pub fn seasonal_offsets(points: &[SkuDataPoint], outliers: &[bool]) -> [f64; 12] {
    let mut sums = [0.0; 12];
    let mut counts = [0usize; 12];
    for (i, point) in points.iter().enumerate() {
        if outliers.get(i).copied().unwrap_or(false) {
            continue;
        }
        let month = point.ds.month0() as usize;
        sums[month] += point.y;
        counts[month] += 1;
    }

    let overall = mean_of(points);
    let mut offsets = [0.0; 12];
    for month in 0..12 {
        if counts[month] > 0 {
            offsets[month] = sums[month] / counts[month] as f64 - overall;
        }
    }
    offsets
}

/// Detect spikes that recur near the same calendar position.
///
/// Every confirmed spike yields one event, so a pattern seen in three
/// years produces three entries.
pub fn recurrent_events(points: &[SkuDataPoint], config: &SeasonalityConfig) -> Vec<RecurrentEvent> {
    let overall = mean_of(points);
    let threshold = overall * config.spike_threshold;
    let spikes: Vec<&SkuDataPoint> = points.iter().filter(|p| p.y > threshold).collect();

    spikes
        .iter()
        .filter_map(|spike| {
            let month = spike.ds.month0();
            let day = spike.ds.day();
            let nearby = spikes
                .iter()
                .filter(|other| is_near(month, day, other.ds, config))
                .count();
            if nearby < config.min_occurrences {
                return None;
            }

            let impact = spike.y / overall;
            let kind = if impact > config.price_increase_ratio {
                RecurrentEventKind::PriceIncrease
            } else {
                RecurrentEventKind::SeasonalEvent
            };
            Some(RecurrentEvent {
                month,
                day,
                kind,
                impact,
            })
        })
        .collect()
}

/// Seasonal index and recurring events in one pass over the series.
pub fn annual_patterns(points: &[SkuDataPoint], config: &SeasonalityConfig) -> AnnualPatterns {
    AnnualPatterns {
        seasonal_index: seasonal_index(points),
        events: recurrent_events(points, config),
    }
}

fn mean_of(points: &[SkuDataPoint]) -> f64 {
    let values: Vec<f64> = points.iter().map(|p| p.y).collect();
    stats::mean(&values)
}
