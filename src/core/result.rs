//! Forecast output rows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned to a SKU in an output row.
///
/// The four volume categories come from the SKU's own mean and volatility;
/// the last two are emitted by the business rules without running a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkuCategory {
    #[serde(rename = "alto_volume")]
    HighVolume,
    #[serde(rename = "medio_volume")]
    MidVolume,
    #[serde(rename = "baixo_volume")]
    LowVolume,
    #[serde(rename = "sazonal")]
    Seasonal,
    #[serde(rename = "sem_vendas_recentes")]
    NoRecentSales,
    #[serde(rename = "familia_resultado_zero")]
    ZeroResultFamily,
}

impl SkuCategory {
    /// Export label of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkuCategory::HighVolume => "alto_volume",
            SkuCategory::MidVolume => "medio_volume",
            SkuCategory::LowVolume => "baixo_volume",
            SkuCategory::Seasonal => "sazonal",
            SkuCategory::NoRecentSales => "sem_vendas_recentes",
            SkuCategory::ZeroResultFamily => "familia_resultado_zero",
        }
    }
}

impl fmt::Display for SkuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final forecast for one SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub sku: String,
    /// Total demand over the horizon, rounded to 2 decimals.
    pub total_forecast: f64,
    /// `total_forecast` rounded to the nearest integer.
    pub rounded_mean: i64,
    pub category: SkuCategory,
    /// Holdout accuracy multiplier, within `[0.7, 1.3]`.
    pub validation_adjustment: f64,
    pub family: String,
}

impl ForecastResult {
    /// A zero forecast emitted by a business rule.
    pub fn zero(sku: impl Into<String>, family: impl Into<String>, category: SkuCategory) -> Self {
        Self {
            sku: sku.into(),
            total_forecast: 0.0,
            rounded_mean: 0,
            category,
            validation_adjustment: 1.0,
            family: family.into(),
        }
    }
}
