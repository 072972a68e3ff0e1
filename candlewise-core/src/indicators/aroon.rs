//! Aroon: measures time since highest high and lowest low as a percentage.
//!
//! Aroon Up = 100 * (period - bars_since_highest_high) / period
//! Aroon Down = 100 * (period - bars_since_lowest_low) / period
//! Oscillator = Up - Down
//! Window: the trailing `period + 1` bars; the most recent extreme wins ties.
//! Lookback: period.

use serde::{Deserialize, Serialize};

use crate::components::indicator::Indicator;
use crate::domain::{Candle, IndicatorSeries};

/// Which line of the Aroon indicator to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AroonLine {
    Up,
    Down,
    Oscillator,
}

/// All three Aroon lines computed in one pass.
#[derive(Debug, Clone)]
pub struct AroonOutput {
    pub up: IndicatorSeries,
    pub down: IndicatorSeries,
    pub oscillator: IndicatorSeries,
}

#[derive(Debug, Clone)]
pub struct Aroon {
    period: usize,
    line: AroonLine,
    name: String,
}

impl Aroon {
    pub fn new(period: usize, line: AroonLine) -> Self {
        assert!(period >= 1, "Aroon period must be >= 1");
        let name = match line {
            AroonLine::Up => format!("aroon_up_{period}"),
            AroonLine::Down => format!("aroon_down_{period}"),
            AroonLine::Oscillator => format!("aroon_osc_{period}"),
        };
        Self { period, line, name }
    }

    pub fn up(period: usize) -> Self {
        Self::new(period, AroonLine::Up)
    }

    pub fn down(period: usize) -> Self {
        Self::new(period, AroonLine::Down)
    }

    pub fn oscillator(period: usize) -> Self {
        Self::new(period, AroonLine::Oscillator)
    }

    pub fn lines(&self, candles: &[Candle]) -> AroonOutput {
        let n = candles.len();
        let mut up = vec![None; n];
        let mut down = vec![None; n];

        for i in self.period..n {
            let window = &candles[(i - self.period)..=i];
            up[i] = Some(self.score(window.iter().map(|c| c.high), |a, b| a >= b));
            down[i] = Some(self.score(window.iter().map(|c| c.low), |a, b| a <= b));
        }

        let up = IndicatorSeries::from(up);
        let down = IndicatorSeries::from(down);
        let oscillator = up.zip_with(&down, |u, d| u - d);
        AroonOutput {
            up,
            down,
            oscillator,
        }
    }

    /// Percentage score of the extreme's position in the window.
    /// `better(candidate, current)` decides whether a value replaces the extreme.
    fn score(&self, values: impl Iterator<Item = f64>, better: impl Fn(f64, f64) -> bool) -> f64 {
        let mut extreme: Option<f64> = None;
        let mut offset = 0;
        for (j, v) in values.enumerate() {
            if v.is_nan() {
                return f64::NAN;
            }
            if extreme.map_or(true, |e| better(v, e)) {
                extreme = Some(v);
                offset = j;
            }
        }
        let bars_since = self.period - offset;
        100.0 * (self.period - bars_since) as f64 / self.period as f64
    }
}

impl Indicator for Aroon {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries {
        let out = self.lines(candles);
        match self.line {
            AroonLine::Up => out.up,
            AroonLine::Down => out.down,
            AroonLine::Oscillator => out.oscillator,
        }
    }
}
