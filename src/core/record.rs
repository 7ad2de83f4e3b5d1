//! Sales records as supplied by the ingestion layer.

use crate::core::calendar::first_of_month;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One month of sales for one SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// First day of the sales month.
    pub date: NaiveDate,
    pub sku: String,
    /// Product family code, e.g. `"PA-001"`. May be empty.
    pub family: String,
    pub units: i64,
}

impl SalesRecord {
    /// Create a record, truncating `date` to the first of its month.
    pub fn new(
        date: NaiveDate,
        sku: impl Into<String>,
        family: impl Into<String>,
        units: i64,
    ) -> Self {
        Self {
            date: first_of_month(date),
            sku: sku.into(),
            family: family.into(),
            units,
        }
    }
}
