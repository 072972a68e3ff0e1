//! Moving-average dispatch and the single-source `MovingAverage` indicator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::indicator::Indicator;
use crate::domain::{extract, Candle, IndicatorSeries, PriceSource};
use crate::indicators::ema::ema;
use crate::indicators::hma::{hma, hma_lookback};
use crate::indicators::jma::{jma, DEFAULT_PHASE, DEFAULT_POWER};
use crate::indicators::rma::rma;
use crate::indicators::sma::sma;
use crate::indicators::wma::wma;

/// Moving average type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaKind {
    #[default]
    Sma,
    Ema,
    Wma,
    Rma,
    Hma,
    Jma,
}

impl MaKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            MaKind::Sma => "sma",
            MaKind::Ema => "ema",
            MaKind::Wma => "wma",
            MaKind::Rma => "rma",
            MaKind::Hma => "hma",
            MaKind::Jma => "jma",
        }
    }

    /// Index of the first defined value for this kind.
    pub fn lookback(&self, period: usize) -> usize {
        match self {
            MaKind::Sma | MaKind::Ema | MaKind::Wma | MaKind::Rma => period.saturating_sub(1),
            MaKind::Hma => hma_lookback(period),
            MaKind::Jma => period,
        }
    }
}

impl fmt::Display for MaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Apply a moving average of the given kind. JMA uses its default phase and power.
pub fn moving_average(values: &[f64], period: usize, kind: MaKind) -> IndicatorSeries {
    match kind {
        MaKind::Sma => sma(values, period),
        MaKind::Ema => ema(values, period),
        MaKind::Wma => wma(values, period),
        MaKind::Rma => rma(values, period),
        MaKind::Hma => hma(values, period),
        MaKind::Jma => jma(values, period, DEFAULT_PHASE, DEFAULT_POWER),
    }
}

/// Moving average of one candle field.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    kind: MaKind,
    period: usize,
    source: PriceSource,
    phase: f64,
    power: f64,
    name: String,
}

impl MovingAverage {
    pub fn new(kind: MaKind, period: usize, source: PriceSource) -> Self {
        assert!(period >= 1, "moving average period must be >= 1");
        let name = match source {
            PriceSource::Close => format!("{kind}_{period}"),
            other => format!("{kind}_{period}_{}", other.as_str()),
        };
        Self {
            kind,
            period,
            source,
            phase: DEFAULT_PHASE,
            power: DEFAULT_POWER,
            name,
        }
    }

    pub fn sma(period: usize) -> Self {
        Self::new(MaKind::Sma, period, PriceSource::Close)
    }

    pub fn ema(period: usize) -> Self {
        Self::new(MaKind::Ema, period, PriceSource::Close)
    }

    /// JMA with explicit phase and power.
    pub fn jma(period: usize, phase: f64, power: f64, source: PriceSource) -> Self {
        let mut ma = Self::new(MaKind::Jma, period, source);
        ma.phase = phase;
        ma.power = power;
        ma
    }

    pub fn kind(&self) -> MaKind {
        self.kind
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for MovingAverage {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.kind.lookback(self.period)
    }

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries {
        let values = extract(candles, self.source);
        match self.kind {
            MaKind::Jma => jma(&values, self.period, self.phase, self.power),
            kind => moving_average(&values, self.period, kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    #[test]
    fn names_include_non_close_source() {
        assert_eq!(MovingAverage::sma(20).name(), "sma_20");
        assert_eq!(
            MovingAverage::new(MaKind::Hma, 9, PriceSource::Hl2).name(),
            "hma_9_hl2"
        );
    }

    #[test]
    fn every_kind_yields_exactly_one_value_at_its_warmup() {
        let period = 5;
        for kind in [MaKind::Sma, MaKind::Ema, MaKind::Wma, MaKind::Rma] {
            let values: Vec<f64> = (0..period).map(|i| i as f64).collect();
            let result = moving_average(&values, period, kind);
            assert_eq!(result.defined_count(), 1, "{kind}");
            let short = moving_average(&values[..period - 1], period, kind);
            assert_eq!(short.defined_count(), 0, "{kind}");
        }
    }

    #[test]
    fn lookback_matches_first_defined_index() {
        let candles = make_candles(&(0..60).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        for kind in [
            MaKind::Sma,
            MaKind::Ema,
            MaKind::Wma,
            MaKind::Rma,
            MaKind::Hma,
            MaKind::Jma,
        ] {
            let ma = MovingAverage::new(kind, 10, PriceSource::Close);
            let result = ma.calculate(&candles);
            assert_eq!(result.first_defined(), Some(ma.lookback()), "{kind}");
        }
    }

    #[test]
    fn source_selection_changes_input() {
        let candles = make_candles(&[10.0, 11.0, 12.0]);
        let close = MovingAverage::sma(1).calculate(&candles);
        let high = MovingAverage::new(MaKind::Sma, 1, PriceSource::High).calculate(&candles);
        // make_candles puts high one point above max(open, close)
        assert_approx(high.get(2).unwrap(), close.get(2).unwrap() + 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ma_kind_deserializes_snake_case() {
        let kind: MaKind = serde_json::from_str("\"hma\"").unwrap();
        assert_eq!(kind, MaKind::Hma);
    }
}
