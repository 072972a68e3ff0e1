//! Wilder smoothing (RMA).
//!
//! Same recursion as the EMA with alpha = 1/period. Used by RSI, RMI, ATR and ADX.
//! Lookback: period - 1.

use crate::domain::IndicatorSeries;
use crate::indicators::ema::seeded_exponential;

pub fn rma(values: &[f64], period: usize) -> IndicatorSeries {
    let alpha = 1.0 / period as f64;
    seeded_exponential(values, period, alpha)
}
