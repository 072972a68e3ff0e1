//! Simple Moving Average (SMA).
//!
//! Rolling mean over a lookback window.
//! Lookback: period - 1 (first valid value at index period-1).

use crate::domain::IndicatorSeries;

/// SMA of an arbitrary series. Absent everywhere when `values.len() < period`.
pub fn sma(values: &[f64], period: usize) -> IndicatorSeries {
    let n = values.len();
    if period == 0 || n < period {
        return IndicatorSeries::absent(n);
    }

    let mut out = Vec::with_capacity(n + 1 - period);
    let mut sum: f64 = values[..period].iter().sum();
    out.push(sum / period as f64);

    // Roll the window forward
    for i in period..n {
        let leaving = values[i - period];
        if leaving.is_finite() && sum.is_finite() {
            sum += values[i] - leaving;
        } else {
            // Resync so a NaN only poisons the windows that contain it
            sum = values[(i + 1 - period)..=i].iter().sum();
        }
        out.push(sum / period as f64);
    }

    IndicatorSeries::with_warmup(period - 1, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sma_3_known_values() {
        let result = sma(&[10.0, 11.0, 12.0, 13.0, 14.0], 3);
        assert_eq!(result.get(0), None);
        assert_eq!(result.get(1), None);
        assert_approx(result.get(2).unwrap(), 11.0, DEFAULT_EPSILON);
        assert_approx(result.get(3).unwrap(), 12.0, DEFAULT_EPSILON);
        assert_approx(result.get(4).unwrap(), 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_period_1_is_identity() {
        let result = sma(&[3.0, 1.0, 4.0], 1);
        assert_eq!(result.as_slice(), &[Some(3.0), Some(1.0), Some(4.0)]);
    }

    #[test]
    fn sma_exact_period_yields_one_value() {
        let result = sma(&[2.0, 4.0, 6.0], 3);
        assert_eq!(result.defined_count(), 1);
        assert_approx(result.last().unwrap(), 4.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_too_few_values() {
        let result = sma(&[1.0, 2.0], 3);
        assert_eq!(result.len(), 2);
        assert_eq!(result.defined_count(), 0);
    }

    #[test]
    fn sma_nan_poisons_only_its_windows() {
        let result = sma(&[1.0, f64::NAN, 3.0, 4.0, 5.0, 6.0], 2);
        assert!(result.get(1).unwrap().is_nan());
        assert!(result.get(2).unwrap().is_nan());
        assert_approx(result.get(3).unwrap(), 3.5, DEFAULT_EPSILON);
        assert_approx(result.get(5).unwrap(), 5.5, DEFAULT_EPSILON);
    }
}
