//! Mean reversion off volatility bands.
//!
//! Buy when the close crosses back up through the lower band.
//! Sell when the close crosses back down through the upper band.

use crate::domain::{closes, Candle, IndicatorSeries};
use crate::indicators::Bollinger;

use super::crossing::{cross_down, cross_up};
use super::{warmup_for, Signal, SignalRule};

pub struct BandReversion {
    bands: Bollinger,
    period: usize,
    name: String,
}

impl BandReversion {
    pub fn bollinger(period: usize, multiplier: f64) -> Self {
        Self {
            bands: Bollinger::middle(period, multiplier),
            period,
            name: format!("bollinger_reversion_{period}_{multiplier}"),
        }
    }

    fn series(&self, candles: &[Candle]) -> (IndicatorSeries, IndicatorSeries, IndicatorSeries) {
        let out = self.bands.lines(candles);
        let close = closes(candles).into_iter().map(Some).collect();
        (close, out.lower, out.upper)
    }
}

impl SignalRule for BandReversion {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup(&self) -> usize {
        warmup_for(self.period - 1)
    }

    fn is_buy_signal(&self, candles: &[Candle]) -> Option<bool> {
        let (close, lower, _) = self.series(candles);
        cross_up(&close, &lower)
    }

    fn is_sell_signal(&self, candles: &[Candle]) -> Option<bool> {
        let (close, _, upper) = self.series(candles);
        cross_down(&close, &upper)
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<Signal> {
        let (close, lower, upper) = self.series(candles);
        let buy = cross_up(&close, &lower)?;
        let sell = cross_down(&close, &upper)?;
        Some(Signal::from_sides(buy, sell))
    }
}
