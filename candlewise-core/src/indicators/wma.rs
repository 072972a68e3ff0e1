//! Weighted Moving Average (WMA).
//!
//! Linear weights: the most recent value weighs `period`, the oldest `1`.
//! Lookback: period - 1.

use crate::domain::IndicatorSeries;

pub fn wma(values: &[f64], period: usize) -> IndicatorSeries {
    let n = values.len();
    if period == 0 || n < period {
        return IndicatorSeries::absent(n);
    }

    let denominator = (period * (period + 1)) as f64 / 2.0;
    let out = ((period - 1)..n)
        .map(|i| {
            values[(i + 1 - period)..=i]
                .iter()
                .zip(1..=period)
                .map(|(v, w)| v * w as f64)
                .sum::<f64>()
                / denominator
        })
        .collect();

    IndicatorSeries::with_warmup(period - 1, out)
}
