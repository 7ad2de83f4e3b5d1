//! Per-SKU monthly sales series.

use crate::core::calendar::add_months;
use crate::core::SalesRecord;
use crate::utils::stats;
use chrono::NaiveDate;
use std::collections::HashMap;

/// A single monthly observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkuDataPoint {
    /// First day of the month.
    pub ds: NaiveDate,
    /// Units sold.
    pub y: f64,
}

impl SkuDataPoint {
    pub fn new(ds: NaiveDate, y: f64) -> Self {
        Self { ds, y }
    }
}

/// The sales history of one SKU, sorted ascending by month.
#[derive(Debug, Clone, PartialEq)]
pub struct SkuSeries {
    sku: String,
    family: String,
    points: Vec<SkuDataPoint>,
}

impl SkuSeries {
    /// Create a series; points are sorted by date (stable for equal months).
    pub fn new(
        sku: impl Into<String>,
        family: impl Into<String>,
        mut points: Vec<SkuDataPoint>,
    ) -> Self {
        points.sort_by_key(|p| p.ds);
        Self {
            sku: sku.into(),
            family: family.into(),
            points,
        }
    }

    /// Build a series of consecutive months starting at `start`.
    pub fn from_values(
        sku: impl Into<String>,
        family: impl Into<String>,
        start: NaiveDate,
        values: &[f64],
    ) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &y)| SkuDataPoint::new(add_months(start, i as i32), y))
            .collect();
        Self::new(sku, family, points)
    }

    /// Group records by SKU, in order of first appearance.
    ///
    /// The family of a SKU is the last non-empty family seen for it.
    pub fn group(records: &[SalesRecord]) -> Vec<SkuSeries> {
        let mut order: Vec<&str> = Vec::new();
        let mut grouped: HashMap<&str, (String, Vec<SkuDataPoint>)> = HashMap::new();

        for record in records {
            let entry = grouped.entry(record.sku.as_str()).or_insert_with(|| {
                order.push(record.sku.as_str());
                (String::new(), Vec::new())
            });
            if !record.family.is_empty() {
                entry.0 = record.family.clone();
            }
            entry
                .1
                .push(SkuDataPoint::new(record.date, record.units as f64));
        }

        order
            .into_iter()
            .filter_map(|sku| {
                grouped
                    .remove(sku)
                    .map(|(family, points)| SkuSeries::new(sku, family, points))
            })
            .collect()
    }

    /// Replace the product family.
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn points(&self) -> &[SkuDataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sales values in date order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Month of the most recent observation.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.ds)
    }

    /// Mean of all values (0 for an empty series).
    pub fn mean(&self) -> f64 {
        stats::mean(&self.values())
    }

    /// The last `count` points (or all of them when shorter).
    pub fn tail(&self, count: usize) -> &[SkuDataPoint] {
        let start = self.points.len().saturating_sub(count);
        &self.points[start..]
    }

    /// Split into the first `len - tail` points and the trailing `tail` points.
    pub fn split_tail(&self, tail: usize) -> (SkuSeries, SkuSeries) {
        let at = self.points.len().saturating_sub(tail);
        let (head, rest) = self.points.split_at(at);
        (
            SkuSeries {
                sku: self.sku.clone(),
                family: self.family.clone(),
                points: head.to_vec(),
            },
            SkuSeries {
                sku: self.sku.clone(),
                family: self.family.clone(),
                points: rest.to_vec(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn new_sorts_points_by_date() {
        let series = SkuSeries::new(
            "A",
            "PA-001",
            vec![
                SkuDataPoint::new(ymd(2024, 3), 3.0),
                SkuDataPoint::new(ymd(2024, 1), 1.0),
                SkuDataPoint::new(ymd(2024, 2), 2.0),
            ],
        );
        assert_eq!(series.values(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.last_date(), Some(ymd(2024, 3)));
    }

    #[test]
    fn from_values_builds_consecutive_months() {
        let series = SkuSeries::from_values("A", "", ymd(2023, 11), &[1.0, 2.0, 3.0]);
        let dates: Vec<_> = series.points().iter().map(|p| p.ds).collect();
        assert_eq!(dates, vec![ymd(2023, 11), ymd(2023, 12), ymd(2024, 1)]);
    }

    #[test]
    fn group_keeps_first_appearance_order_and_last_family() {
        let records = vec![
            SalesRecord::new(ymd(2024, 2), "B", "PA-002", 5),
            SalesRecord::new(ymd(2024, 1), "A", "PA-001", 1),
            SalesRecord::new(ymd(2024, 1), "B", "", 4),
            SalesRecord::new(ymd(2024, 2), "A", "PA-003", 2),
        ];
        let groups = SkuSeries::group(&records);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].sku(), "B");
        assert_eq!(groups[0].family(), "PA-002");
        assert_eq!(groups[0].values(), vec![4.0, 5.0]);
        assert_eq!(groups[1].sku(), "A");
        assert_eq!(groups[1].family(), "PA-003");
    }

    #[test]
    fn split_tail_partitions_points() {
        let series = SkuSeries::from_values("A", "", ymd(2024, 1), &[1.0, 2.0, 3.0, 4.0]);
        let (train, test) = series.split_tail(1);
        assert_eq!(train.values(), vec![1.0, 2.0, 3.0]);
        assert_eq!(test.values(), vec![4.0]);
        assert_eq!(series.tail(10).len(), 4);
    }
}
