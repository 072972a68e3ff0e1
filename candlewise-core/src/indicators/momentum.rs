//! Smoothed momentum: lookback difference passed through a moving average.
//!
//! momentum[t] = close[t] - close[t-period]
//! smoothed = MA(momentum, smoothing)
//! Lookback: period + lookback of the smoothing average.

use crate::components::indicator::Indicator;
use crate::domain::{closes, Candle, IndicatorSeries};
use crate::indicators::ma::{moving_average, MaKind};

/// Raw momentum of an arbitrary series.
pub fn momentum(values: &[f64], period: usize) -> IndicatorSeries {
    let n = values.len();
    if period >= n {
        return IndicatorSeries::absent(n);
    }
    let tail = (period..n).map(|i| values[i] - values[i - period]).collect();
    IndicatorSeries::with_warmup(period, tail)
}

#[derive(Debug, Clone)]
pub struct SmoothedMomentum {
    period: usize,
    smoothing: usize,
    kind: MaKind,
    name: String,
}

impl SmoothedMomentum {
    pub fn new(period: usize, smoothing: usize, kind: MaKind) -> Self {
        assert!(period >= 1, "Momentum period must be >= 1");
        assert!(smoothing >= 1, "Momentum smoothing must be >= 1");
        Self {
            period,
            smoothing,
            kind,
            name: format!("momentum_{period}_{kind}_{smoothing}"),
        }
    }
}

impl Indicator for SmoothedMomentum {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period + self.kind.lookback(self.smoothing)
    }

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries {
        momentum(&closes(candles), self.period)
            .chain(|tail| moving_average(tail, self.smoothing, self.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    #[test]
    fn momentum_known_values() {
        let result = momentum(&[100.0, 102.0, 105.0, 103.0, 108.0], 2);
        assert_eq!(result.get(1), None);
        assert_approx(result.get(2).unwrap(), 5.0, DEFAULT_EPSILON);
        assert_approx(result.get(3).unwrap(), 1.0, DEFAULT_EPSILON);
        assert_approx(result.get(4).unwrap(), 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn smoothed_momentum_sma_of_raw() {
        // raw momentum(2) = [_, _, 5, 1, 3] → SMA(2) = [_, _, _, 3, 2]
        let candles = make_candles(&[100.0, 102.0, 105.0, 103.0, 108.0]);
        let ind = SmoothedMomentum::new(2, 2, MaKind::Sma);
        let result = ind.calculate(&candles);
        assert_eq!(result.first_defined(), Some(ind.lookback()));
        assert_approx(result.get(3).unwrap(), 3.0, DEFAULT_EPSILON);
        assert_approx(result.get(4).unwrap(), 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn momentum_zero_for_flat_prices() {
        let candles = make_candles(&[50.0; 10]);
        let result = SmoothedMomentum::new(3, 3, MaKind::Ema).calculate(&candles);
        for v in result.iter().flatten() {
            assert_approx(v, 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn momentum_too_few_bars() {
        let candles = make_candles(&[1.0, 2.0]);
        let result = SmoothedMomentum::new(2, 1, MaKind::Sma).calculate(&candles);
        assert_eq!(result.defined_count(), 0);
    }
}
