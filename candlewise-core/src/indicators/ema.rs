//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * value[t] + (1 - alpha) * EMA[t-1]
//! Seed: EMA[period-1] = SMA of the first `period` values.
//! Lookback: period - 1.

use crate::domain::IndicatorSeries;

/// EMA with `alpha = 2 / (period + 1)`.
pub fn ema(values: &[f64], period: usize) -> IndicatorSeries {
    let alpha = 2.0 / (period as f64 + 1.0);
    seeded_exponential(values, period, alpha)
}

/// SMA-seeded exponential smoothing shared by EMA and Wilder's RMA.
///
/// NaN in the seed window or later propagates through the recursion.
pub(crate) fn seeded_exponential(values: &[f64], period: usize, alpha: f64) -> IndicatorSeries {
    let n = values.len();
    if period == 0 || n < period {
        return IndicatorSeries::absent(n);
    }

    let seed = values[..period].iter().sum::<f64>() / period as f64;
    let mut out = Vec::with_capacity(n + 1 - period);
    out.push(seed);

    let mut prev = seed;
    for &value in &values[period..] {
        let next = alpha * value + (1.0 - alpha) * prev;
        out.push(next);
        prev = next;
    }

    IndicatorSeries::with_warmup(period - 1, out)
}
