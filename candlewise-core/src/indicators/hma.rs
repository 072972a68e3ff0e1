//! Hull Moving Average (HMA).
//!
//! HMA = WMA(2 * WMA(v, period/2) - WMA(v, period), round(sqrt(period)))
//! Lookback: period - 1 + round(sqrt(period)) - 1.

use crate::domain::IndicatorSeries;
use crate::indicators::wma::wma;

/// Length of the final smoothing pass.
pub fn hull_root(period: usize) -> usize {
    ((period as f64).sqrt().round() as usize).max(1)
}

pub fn hma_lookback(period: usize) -> usize {
    period.saturating_sub(1) + hull_root(period) - 1
}

pub fn hma(values: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 {
        return IndicatorSeries::absent(values.len());
    }

    let half = wma(values, (period / 2).max(1));
    let full = wma(values, period);
    let raw = half.zip_with(&full, |h, f| 2.0 * h - f);
    raw.chain(|tail| wma(tail, hull_root(period)))
}
