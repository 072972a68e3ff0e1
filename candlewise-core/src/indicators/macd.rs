//! MACD: difference of two EMAs plus its signal line.
//!
//! MACD = EMA(close, fast) - EMA(close, slow)
//! Signal = EMA(MACD, signal)
//! Histogram = MACD - Signal
//! Lookback: MACD slow - 1, Signal and Histogram slow + signal - 2.

use serde::{Deserialize, Serialize};

use crate::components::indicator::Indicator;
use crate::domain::{closes, Candle, IndicatorSeries};
use crate::indicators::ema::ema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdLine {
    Macd,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct MacdOutput {
    pub macd: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
    name: String,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize, line: MacdLine) -> Self {
        assert!(fast >= 1, "MACD fast period must be >= 1");
        assert!(slow > fast, "MACD slow period must be > fast period");
        assert!(signal >= 1, "MACD signal period must be >= 1");
        let label = match line {
            MacdLine::Macd => "macd",
            MacdLine::Signal => "macd_signal",
            MacdLine::Histogram => "macd_hist",
        };
        Self {
            fast,
            slow,
            signal,
            line,
            name: format!("{label}_{fast}_{slow}_{signal}"),
        }
    }

    /// 12/26/9.
    pub fn standard(line: MacdLine) -> Self {
        Self::new(12, 26, 9, line)
    }

    pub fn lines(&self, candles: &[Candle]) -> MacdOutput {
        let close = closes(candles);
        let macd = ema(&close, self.fast).zip_with(&ema(&close, self.slow), |f, s| f - s);
        let signal = macd.chain(|v| ema(v, self.signal));
        let histogram = macd.zip_with(&signal, |m, s| m - s);
        MacdOutput {
            macd,
            signal,
            histogram,
        }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            MacdLine::Macd => self.slow - 1,
            MacdLine::Signal | MacdLine::Histogram => self.slow + self.signal - 2,
        }
    }

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries {
        let out = self.lines(candles);
        match self.line {
            MacdLine::Macd => out.macd,
            MacdLine::Signal => out.signal,
            MacdLine::Histogram => out.histogram,
        }
    }
}
