//! Supertrend: ATR-based directional indicator.
//!
//! Sequential state machine over the bands `hl2 +/- multiplier * ATR`:
//! - `Up`: the active line is the lower band, which only ratchets upward.
//! - `Down`: the active line is the upper band, which only ratchets downward.
//!
//! A close beyond the active band flips the trend, and the new active band
//! starts from that bar's freshly computed band. The first defined bar starts
//! in `Up` unless its close is already below the lower band.
//!
//! Lookback: period (same as ATR).

use serde::{Deserialize, Serialize};

use crate::components::indicator::Indicator;
use crate::domain::{Candle, IndicatorSeries};
use crate::indicators::atr::average_true_range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

/// Active band line plus the per-bar trend state.
#[derive(Debug, Clone)]
pub struct SupertrendOutput {
    pub line: IndicatorSeries,
    pub trend: Vec<Option<Trend>>,
}

#[derive(Debug, Clone)]
pub struct Supertrend {
    period: usize,
    multiplier: f64,
    name: String,
}

impl Supertrend {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 1, "Supertrend period must be >= 1");
        assert!(multiplier > 0.0, "Supertrend multiplier must be > 0");
        Self {
            period,
            multiplier,
            name: format!("supertrend_{period}_{multiplier}"),
        }
    }

    pub fn trace(&self, candles: &[Candle]) -> SupertrendOutput {
        let n = candles.len();
        let mut line = vec![None; n];
        let mut trend = vec![None; n];

        let atr = average_true_range(candles, self.period);
        let Some(start) = atr.first_defined() else {
            return SupertrendOutput {
                line: line.into(),
                trend,
            };
        };

        let mut state: Option<(Trend, f64)> = None;

        for i in start..n {
            let bar = &candles[i];
            let Some(range) = atr.get(i) else { continue };
            if range.is_nan() || bar.close.is_nan() || bar.high.is_nan() || bar.low.is_nan() {
                line[i] = Some(f64::NAN);
                continue;
            }

            let basic_upper = bar.hl2() + self.multiplier * range;
            let basic_lower = bar.hl2() - self.multiplier * range;

            let next = match state {
                None if bar.close < basic_lower => (Trend::Down, basic_upper),
                None => (Trend::Up, basic_lower),
                Some((Trend::Up, lower)) => {
                    let lower = basic_lower.max(lower);
                    if bar.close < lower {
                        tracing::trace!(
                            index = i,
                            close = bar.close,
                            band = lower,
                            "supertrend flipped down"
                        );
                        (Trend::Down, basic_upper)
                    } else {
                        (Trend::Up, lower)
                    }
                }
                Some((Trend::Down, upper)) => {
                    let upper = basic_upper.min(upper);
                    if bar.close > upper {
                        tracing::trace!(
                            index = i,
                            close = bar.close,
                            band = upper,
                            "supertrend flipped up"
                        );
                        (Trend::Up, basic_lower)
                    } else {
                        (Trend::Down, upper)
                    }
                }
            };

            state = Some(next);
            trend[i] = Some(next.0);
            line[i] = Some(next.1);
        }

        SupertrendOutput {
            line: line.into(),
            trend,
        }
    }
}

impl Indicator for Supertrend {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries {
        self.trace(candles).line
    }
}
