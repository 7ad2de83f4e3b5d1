//! Volume categories of SKUs.

use crate::core::SkuCategory;
use crate::utils::{coefficient_of_variation, mean};

/// Mean above which a SKU is high volume.
const HIGH_VOLUME_MEAN: f64 = 50.0;
/// Mean above which a SKU is mid volume.
const MID_VOLUME_MEAN: f64 = 10.0;
/// Coefficient of variation above which a SKU is seasonal.
const SEASONAL_CV: f64 = 0.8;

/// Volume statistics of one SKU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkuProfile {
    pub mean: f64,
    /// Population coefficient of variation (0 when the mean is 0).
    pub cv: f64,
    pub category: SkuCategory,
}

impl SkuProfile {
    pub fn from_values(values: &[f64]) -> Self {
        let mean = mean(values);
        let cv = coefficient_of_variation(values);
        Self {
            mean,
            cv,
            category: categorize(mean, cv),
        }
    }
}

/// Category from the mean and coefficient of variation of a SKU.
pub fn categorize(mean: f64, cv: f64) -> SkuCategory {
    if mean > HIGH_VOLUME_MEAN {
        if cv > SEASONAL_CV {
            SkuCategory::Seasonal
        } else {
            SkuCategory::HighVolume
        }
    } else if mean > MID_VOLUME_MEAN {
        if cv > SEASONAL_CV {
            SkuCategory::Seasonal
        } else {
            SkuCategory::MidVolume
        }
    } else {
        SkuCategory::LowVolume
    }
}

/// Months averaged for the recent-demand reference of a category.
pub fn recent_lookback(category: SkuCategory) -> usize {
    match category {
        SkuCategory::HighVolume => 6,
        SkuCategory::LowVolume => 12,
        _ => 9,
    }
}

/// Apply the category correction to a forecast total.
pub fn adjust_for_category(category: SkuCategory, total: f64, recent_average: f64) -> f64 {
    match category {
        SkuCategory::HighVolume => total * 0.98,
        SkuCategory::LowVolume => total * 1.05,
        SkuCategory::Seasonal => total.min(recent_average * 2.2),
        _ => total,
    }
}
