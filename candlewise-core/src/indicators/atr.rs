//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR uses Wilder smoothing (RMA, alpha = 1/period).
//! The first bar has no previous close, so its true range is absent.
//! Lookback: period.

use crate::components::indicator::Indicator;
use crate::domain::{Candle, IndicatorSeries};
use crate::indicators::rma::rma;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: format!("atr_{period}"),
        }
    }
}

/// True Range series. TR[0] is absent; NaN in any input propagates.
pub fn true_range(candles: &[Candle]) -> IndicatorSeries {
    if candles.is_empty() {
        return IndicatorSeries::default();
    }
    let tail = candles
        .windows(2)
        .map(|w| {
            let (prev, cur) = (&w[0], &w[1]);
            if cur.high.is_nan() || cur.low.is_nan() || prev.close.is_nan() {
                return f64::NAN;
            }
            (cur.high - cur.low)
                .max((cur.high - prev.close).abs())
                .max((cur.low - prev.close).abs())
        })
        .collect();
    IndicatorSeries::with_warmup(1, tail)
}

/// Wilder-smoothed true range. Shared by Supertrend, the ATR zigzag and the feature builder.
pub fn average_true_range(candles: &[Candle], period: usize) -> IndicatorSeries {
    true_range(candles).chain(|tr| rma(tr, period))
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries {
        average_true_range(candles, self.period)
    }
}
