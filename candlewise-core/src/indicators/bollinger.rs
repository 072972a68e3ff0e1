//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! Lines (separate Indicator instances):
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//! - %B: (close - lower) / (upper - lower), 0.5 when the bands have zero width
//!
//! Uses population stddev (divide by N).
//! Lookback: period - 1.

use serde::{Deserialize, Serialize};

use crate::components::indicator::Indicator;
use crate::domain::{closes, Candle, IndicatorSeries};

pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Which line of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BollingerLine {
    Upper,
    Middle,
    Lower,
    PercentB,
}

#[derive(Debug, Clone)]
pub struct BollingerOutput {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
    pub percent_b: IndicatorSeries,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    line: BollingerLine,
    name: String,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64, line: BollingerLine) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        assert!(multiplier > 0.0, "Bollinger multiplier must be > 0");
        let label = match line {
            BollingerLine::Upper => "upper",
            BollingerLine::Middle => "middle",
            BollingerLine::Lower => "lower",
            BollingerLine::PercentB => "percent_b",
        };
        Self {
            period,
            multiplier,
            line,
            name: format!("bollinger_{label}_{period}_{multiplier}"),
        }
    }

    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerLine::Upper)
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerLine::Middle)
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerLine::Lower)
    }

    pub fn percent_b(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerLine::PercentB)
    }

    pub fn lines(&self, candles: &[Candle]) -> BollingerOutput {
        let close = closes(candles);
        let n = close.len();
        let mut upper = vec![None; n];
        let mut middle = vec![None; n];
        let mut lower = vec![None; n];
        let mut percent_b = vec![None; n];

        if n >= self.period {
            for i in (self.period - 1)..n {
                let window = &close[(i + 1 - self.period)..=i];
                let mean = window.iter().sum::<f64>() / self.period as f64;
                let variance =
                    window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / self.period as f64;
                let band = self.multiplier * variance.sqrt();
                let (hi, lo) = (mean + band, mean - band);
                let width = hi - lo;

                upper[i] = Some(hi);
                middle[i] = Some(mean);
                lower[i] = Some(lo);
                percent_b[i] = Some(if width == 0.0 {
                    0.5
                } else {
                    (close[i] - lo) / width
                });
            }
        }

        BollingerOutput {
            upper: upper.into(),
            middle: middle.into(),
            lower: lower.into(),
            percent_b: percent_b.into(),
        }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries {
        let out = self.lines(candles);
        match self.line {
            BollingerLine::Upper => out.upper,
            BollingerLine::Middle => out.middle,
            BollingerLine::Lower => out.lower,
            BollingerLine::PercentB => out.percent_b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    #[test]
    fn bollinger_known_values() {
        // closes 2, 4, 4, 4, 5, 5, 7, 9: mean 5, population sigma 2
        let candles = make_candles(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let out = Bollinger::upper(8, 2.0).lines(&candles);
        assert_eq!(out.middle.get(6), None);
        assert_approx(out.middle.get(7).unwrap(), 5.0, DEFAULT_EPSILON);
        assert_approx(out.upper.get(7).unwrap(), 9.0, DEFAULT_EPSILON);
        assert_approx(out.lower.get(7).unwrap(), 1.0, DEFAULT_EPSILON);
        // %B = (9 - 1) / 8 = 1
        assert_approx(out.percent_b.get(7).unwrap(), 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn zero_width_bands_give_half_percent_b() {
        let candles = make_candles(&[50.0; 5]);
        let result = Bollinger::percent_b(3, 2.0).calculate(&candles);
        assert_eq!(result.last(), Some(0.5));
    }

    #[test]
    fn bands_bracket_middle() {
        let candles = make_candles(&[10.0, 12.0, 9.0, 14.0, 11.0, 13.0]);
        let out = Bollinger::middle(3, DEFAULT_MULTIPLIER).lines(&candles);
        for i in 2..candles.len() {
            let (u, m, l) = (
                out.upper.get(i).unwrap(),
                out.middle.get(i).unwrap(),
                out.lower.get(i).unwrap(),
            );
            assert!(u >= m && m >= l);
            assert_approx(u - m, m - l, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn bollinger_names_and_lookback() {
        assert_eq!(Bollinger::upper(20, 2.0).name(), "bollinger_upper_20_2");
        assert_eq!(Bollinger::percent_b(20, 2.5).name(), "bollinger_percent_b_20_2.5");
        assert_eq!(Bollinger::lower(20, 2.0).lookback(), 19);
    }
}
