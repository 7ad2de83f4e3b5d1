//! Ordinary Least Squares fit of a straight line over the observation index.

/// Slope and intercept of `y = intercept + slope * x`, with `x = 0..n-1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Value of the line at position `x`.
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit a least-squares line through `values` against their indices.
///
/// A degenerate design (fewer than two points) gives a flat line at the mean.
pub fn linear_trend(values: &[f64]) -> LinearTrend {
    let n = values.len();
    if n == 0 {
        return LinearTrend {
            slope: 0.0,
            intercept: 0.0,
        };
    }

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let nf = n as f64;
    let denominator = nf * sum_x2 - sum_x * sum_x;
    let slope = if denominator != 0.0 {
        (nf * sum_xy - sum_x * sum_y) / denominator
    } else {
        0.0
    };
    let intercept = (sum_y - slope * sum_x) / nf;

    LinearTrend { slope, intercept }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_trend_recovers_exact_line() {
        let values: Vec<f64> = (0..10).map(|i| 3.0 + 2.0 * i as f64).collect();
        let trend = linear_trend(&values);
        assert_relative_eq!(trend.slope, 2.0, epsilon = 1e-10);
        assert_relative_eq!(trend.intercept, 3.0, epsilon = 1e-10);
        assert_relative_eq!(trend.at(10.0), 23.0, epsilon = 1e-10);
    }

    #[test]
    fn linear_trend_single_point_is_flat() {
        let trend = linear_trend(&[7.0]);
        assert_eq!(trend.slope, 0.0);
        assert_relative_eq!(trend.intercept, 7.0, epsilon = 1e-10);
    }

    #[test]
    fn linear_trend_empty_is_zero() {
        let trend = linear_trend(&[]);
        assert_eq!(trend.at(5.0), 0.0);
    }
}
