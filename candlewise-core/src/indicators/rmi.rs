//! Relative Momentum Index (RMI).
//!
//! RSI computed on `close[t] - close[t - momentum]` instead of one-bar changes.
//! Lookback: momentum + period - 1.

use crate::components::indicator::Indicator;
use crate::domain::{closes, Candle, IndicatorSeries};
use crate::indicators::rsi::relative_strength;

#[derive(Debug, Clone)]
pub struct Rmi {
    period: usize,
    momentum: usize,
    name: String,
}

impl Rmi {
    pub fn new(period: usize, momentum: usize) -> Self {
        assert!(period >= 1, "RMI period must be >= 1");
        assert!(momentum >= 1, "RMI momentum must be >= 1");
        Self {
            period,
            momentum,
            name: format!("rmi_{period}_{momentum}"),
        }
    }
}

impl Indicator for Rmi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.momentum + self.period - 1
    }

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries {
        relative_strength(&closes(candles), self.momentum, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::rsi::Rsi;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    #[test]
    fn rmi_momentum_1_equals_rsi() {
        let candles = make_candles(&[10.0, 12.0, 11.0, 13.0, 12.5, 14.0, 13.0]);
        let rmi = Rmi::new(3, 1).calculate(&candles);
        let rsi = Rsi::new(3).calculate(&candles);
        for i in 0..candles.len() {
            match (rmi.get(i), rsi.get(i)) {
                (Some(a), Some(b)) => assert_approx(a, b, DEFAULT_EPSILON),
                (None, None) => {}
                other => panic!("alignment mismatch at {i}: {other:?}"),
            }
        }
    }

    #[test]
    fn rmi_known_values() {
        // closes 10, 11, 13, 12, 11
        // momentum-2 diffs: 13-10=3, 12-11=1, 11-13=-2
        // period 2: seed gains (3+1)/2 = 2, losses 0 -> 100
        // next: gain 0.5*0 + 0.5*2 = 1, loss 0.5*2 + 0 = 1 -> 50
        let candles = make_candles(&[10.0, 11.0, 13.0, 12.0, 11.0]);
        let result = Rmi::new(2, 2).calculate(&candles);
        assert_eq!(result.first_defined(), Some(3));
        assert_approx(result.get(3).unwrap(), 100.0, DEFAULT_EPSILON);
        assert_approx(result.get(4).unwrap(), 50.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rmi_lookback() {
        assert_eq!(Rmi::new(14, 3).lookback(), 16);
    }
}
