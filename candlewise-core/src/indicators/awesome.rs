//! Smoothed Awesome Oscillator.
//!
//! AO = SMA(hl2, fast) - SMA(hl2, slow), then an extra smoothing pass.
//! Defaults: fast 5, slow 34.
//! Lookback: slow - 1 + lookback of the smoothing average.

use crate::components::indicator::Indicator;
use crate::domain::{extract, Candle, IndicatorSeries, PriceSource};
use crate::indicators::ma::{moving_average, MaKind};
use crate::indicators::sma::sma;

#[derive(Debug, Clone)]
pub struct SmoothedAwesome {
    fast: usize,
    slow: usize,
    smoothing: usize,
    kind: MaKind,
    name: String,
}

impl SmoothedAwesome {
    pub fn new(fast: usize, slow: usize, smoothing: usize, kind: MaKind) -> Self {
        assert!(fast >= 1, "AO fast period must be >= 1");
        assert!(slow > fast, "AO slow period must be > fast period");
        assert!(smoothing >= 1, "AO smoothing must be >= 1");
        Self {
            fast,
            slow,
            smoothing,
            kind,
            name: format!("ao_{fast}_{slow}_{kind}_{smoothing}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(5, 34, 5, MaKind::Sma)
    }

    /// The unsmoothed oscillator.
    pub fn raw(&self, candles: &[Candle]) -> IndicatorSeries {
        let median = extract(candles, PriceSource::Hl2);
        sma(&median, self.fast).zip_with(&sma(&median, self.slow), |f, s| f - s)
    }
}

impl Indicator for SmoothedAwesome {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.slow - 1 + self.kind.lookback(self.smoothing)
    }

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries {
        self.raw(candles)
            .chain(|tail| moving_average(tail, self.smoothing, self.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    #[test]
    fn raw_ao_known_values() {
        // make_candles: hl2 = (max(o,c) + min(o,c)) / 2 = (open + close) / 2
        // closes 10, 12, 14, 16 → opens 10, 10, 12, 14 → hl2 10, 11, 13, 15
        // fast 1, slow 2: AO[1] = 11 - 10.5 = 0.5, AO[3] = 15 - 14 = 1
        let candles = make_candles(&[10.0, 12.0, 14.0, 16.0]);
        let ao = SmoothedAwesome::new(1, 2, 1, MaKind::Sma);
        let raw = ao.raw(&candles);
        assert_eq!(raw.get(0), None);
        assert_approx(raw.get(1).unwrap(), 0.5, DEFAULT_EPSILON);
        assert_approx(raw.get(3).unwrap(), 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn smoothing_lookback_matches_output() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let ao = SmoothedAwesome::default_params();
        let result = ao.calculate(&make_candles(&closes));
        assert_eq!(ao.lookback(), 33 + 4);
        assert_eq!(result.first_defined(), Some(ao.lookback()));
    }

    #[test]
    fn ao_positive_in_uptrend() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = SmoothedAwesome::default_params().calculate(&make_candles(&closes));
        assert!(result.last().unwrap() > 0.0);
    }
}
