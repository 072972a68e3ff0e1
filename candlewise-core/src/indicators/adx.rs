//! ADX: Average Directional Index (Wilder).
//!
//! Steps:
//! 1. Compute +DM and -DM from consecutive bars
//! 2. Smooth +DM, -DM, and TR using Wilder smoothing (alpha = 1/period)
//! 3. +DI = 100 * smoothed(+DM) / smoothed(TR), 0 when smoothed TR is 0
//! 4. -DI = 100 * smoothed(-DM) / smoothed(TR), 0 when smoothed TR is 0
//! 5. DX = 100 * |+DI - -DI| / (+DI + -DI), 0 when the sum is 0
//! 6. ADX = Wilder-smoothed DX
//!
//! Lookback: DI lines `period`, ADX `2 * period - 1`.

use serde::{Deserialize, Serialize};

use crate::components::indicator::Indicator;
use crate::domain::{Candle, IndicatorSeries};
use crate::indicators::atr::true_range;
use crate::indicators::rma::rma;

/// Which line of the directional system to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdxLine {
    Adx,
    PlusDi,
    MinusDi,
}

#[derive(Debug, Clone)]
pub struct AdxOutput {
    pub adx: IndicatorSeries,
    pub plus_di: IndicatorSeries,
    pub minus_di: IndicatorSeries,
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    line: AdxLine,
    name: String,
}

impl Adx {
    pub fn new(period: usize, line: AdxLine) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        let name = match line {
            AdxLine::Adx => format!("adx_{period}"),
            AdxLine::PlusDi => format!("plus_di_{period}"),
            AdxLine::MinusDi => format!("minus_di_{period}"),
        };
        Self { period, line, name }
    }

    pub fn adx(period: usize) -> Self {
        Self::new(period, AdxLine::Adx)
    }

    pub fn plus_di(period: usize) -> Self {
        Self::new(period, AdxLine::PlusDi)
    }

    pub fn minus_di(period: usize) -> Self {
        Self::new(period, AdxLine::MinusDi)
    }

    pub fn lines(&self, candles: &[Candle]) -> AdxOutput {
        let n = candles.len();
        if n < 2 {
            return AdxOutput {
                adx: IndicatorSeries::absent(n),
                plus_di: IndicatorSeries::absent(n),
                minus_di: IndicatorSeries::absent(n),
            };
        }

        let (plus_dm, minus_dm): (Vec<f64>, Vec<f64>) = candles
            .windows(2)
            .map(|w| directional_movement(&w[0], &w[1]))
            .unzip();
        let plus_dm = IndicatorSeries::with_warmup(1, plus_dm);
        let minus_dm = IndicatorSeries::with_warmup(1, minus_dm);

        let smooth_tr = true_range(candles).chain(|v| rma(v, self.period));
        let smooth_plus = plus_dm.chain(|v| rma(v, self.period));
        let smooth_minus = minus_dm.chain(|v| rma(v, self.period));

        let plus_di = smooth_plus.zip_with(&smooth_tr, directional_index);
        let minus_di = smooth_minus.zip_with(&smooth_tr, directional_index);

        let dx = plus_di.zip_with(&minus_di, |p, m| {
            let sum = p + m;
            if sum == 0.0 {
                0.0
            } else {
                100.0 * (p - m).abs() / sum
            }
        });
        let adx = dx.chain(|v| rma(v, self.period));

        AdxOutput {
            adx,
            plus_di,
            minus_di,
        }
    }
}

/// (+DM, -DM) between two consecutive bars.
fn directional_movement(prev: &Candle, cur: &Candle) -> (f64, f64) {
    if cur.high.is_nan() || cur.low.is_nan() || prev.high.is_nan() || prev.low.is_nan() {
        return (f64::NAN, f64::NAN);
    }
    let up = cur.high - prev.high;
    let down = prev.low - cur.low;
    let plus = if up > down && up > 0.0 { up } else { 0.0 };
    let minus = if down > up && down > 0.0 { down } else { 0.0 };
    (plus, minus)
}

fn directional_index(smoothed_dm: f64, smoothed_tr: f64) -> f64 {
    if smoothed_tr == 0.0 {
        0.0
    } else {
        100.0 * smoothed_dm / smoothed_tr
    }
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            AdxLine::Adx => 2 * self.period - 1,
            AdxLine::PlusDi | AdxLine::MinusDi => self.period,
        }
    }

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries {
        let out = self.lines(candles);
        match self.line {
            AdxLine::Adx => out.adx,
            AdxLine::PlusDi => out.plus_di,
            AdxLine::MinusDi => out.minus_di,
        }
    }
}
