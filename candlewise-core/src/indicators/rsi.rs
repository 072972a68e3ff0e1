//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period.
//! Edge case: avg_loss == 0 → RSI = 100 (including a perfectly flat series).

use crate::components::indicator::Indicator;
use crate::domain::{extract, Candle, IndicatorSeries, PriceSource};
use crate::indicators::rma::rma;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    source: PriceSource,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self::with_source(period, PriceSource::Close)
    }

    pub fn with_source(period: usize, source: PriceSource) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        let name = match source {
            PriceSource::Close => format!("rsi_{period}"),
            other => format!("rsi_{period}_{}", other.as_str()),
        };
        Self {
            period,
            source,
            name,
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries {
        relative_strength(&extract(candles, self.source), 1, self.period)
    }
}

/// RSI-style ratio over differences `values[i] - values[i - distance]`.
///
/// Shared by RSI (`distance` = 1) and RMI. First defined index is
/// `distance + period - 1`.
pub fn relative_strength(values: &[f64], distance: usize, period: usize) -> IndicatorSeries {
    let n = values.len();
    if period == 0 || distance == 0 || n <= distance {
        return IndicatorSeries::absent(n);
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = (distance..n)
        .map(|i| {
            let change = values[i] - values[i - distance];
            if change.is_nan() {
                (change, change)
            } else {
                (change.max(0.0), (-change).max(0.0))
            }
        })
        .unzip();

    let avg_gain = rma(&gains, period);
    let avg_loss = rma(&losses, period);
    let ratio = avg_gain.zip_with(&avg_loss, index_from_averages);

    let mut aligned = vec![None; distance];
    aligned.extend(ratio.iter());
    aligned.into()
}

fn index_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
