//! Outlier detection utilities.
//!
//! Flags anomalous values with the IQR rule. Quartiles are taken by
//! position in the sorted copy (`sorted[n / 4]`, `sorted[3n / 4]`) with no
//! interpolation; the seasonal offsets depend on this exact outlier set.

/// Result of outlier detection.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierResult {
    /// One flag per input value, `true` for outliers.
    pub mask: Vec<bool>,
    /// First quartile.
    pub q1: f64,
    /// Third quartile.
    pub q3: f64,
    /// Interquartile range.
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl OutlierResult {
    /// Get the number of outliers detected.
    pub fn outlier_count(&self) -> usize {
        self.mask.iter().filter(|&&flag| flag).count()
    }

    /// Check if a specific index is an outlier.
    pub fn is_outlier(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }
}

/// Configuration for outlier detection.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierConfig {
    /// IQR multiplier for the fences.
    pub multiplier: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            multiplier: 1.5, // Standard IQR multiplier
        }
    }
}

impl OutlierConfig {
    /// Use the IQR rule with the given multiplier.
    pub fn iqr(multiplier: f64) -> Self {
        Self { multiplier }
    }
}

/// Detect outliers in a value series.
pub fn detect_outliers(series: &[f64], config: &OutlierConfig) -> OutlierResult {
    if series.is_empty() {
        return OutlierResult {
            mask: Vec::new(),
            q1: 0.0,
            q3: 0.0,
            iqr: 0.0,
            lower_bound: 0.0,
            upper_bound: 0.0,
        };
    }

    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let q1 = sorted[n / 4];
    let q3 = sorted[3 * n / 4];
    let iqr = q3 - q1;

    let lower_bound = q1 - config.multiplier * iqr;
    let upper_bound = q3 + config.multiplier * iqr;

    let mask = series
        .iter()
        .map(|&x| x < lower_bound || x > upper_bound)
        .collect();

    OutlierResult {
        mask,
        q1,
        q3,
        iqr,
        lower_bound,
        upper_bound,
    }
}
