//! Oscillator crossing fixed levels.
//!
//! Buy when the oscillator crosses up through `buy_level`.
//! Sell when it crosses down through `sell_level`.

use crate::components::indicator::Indicator;
use crate::domain::Candle;
use crate::indicators::{
    MaKind, Rmi, Rsi, SmoothedAwesome, SmoothedMomentum, VolumeOscillator,
};

use super::crossing::{cross_down, cross_up};
use super::{warmup_for, Signal, SignalRule};

/// Oversold level an RSI must recover through to buy.
pub const RSI_BUY_LEVEL: f64 = 35.0;
/// Overbought level an RSI must fall through to sell.
pub const RSI_SELL_LEVEL: f64 = 75.0;

pub struct ThresholdCross {
    indicator: Box<dyn Indicator>,
    buy_level: f64,
    sell_level: f64,
    name: String,
}

impl ThresholdCross {
    pub fn new(indicator: Box<dyn Indicator>, buy_level: f64, sell_level: f64) -> Self {
        let name = format!("{}_threshold", indicator.name());
        Self {
            indicator,
            buy_level,
            sell_level,
            name,
        }
    }

    /// RSI with the 35/75 levels.
    pub fn rsi(period: usize) -> Self {
        Self::new(Box::new(Rsi::new(period)), RSI_BUY_LEVEL, RSI_SELL_LEVEL)
    }

    pub fn rmi(period: usize, momentum: usize, buy_level: f64, sell_level: f64) -> Self {
        Self::new(Box::new(Rmi::new(period, momentum)), buy_level, sell_level)
    }

    /// Zero-line cross of smoothed momentum.
    pub fn momentum(period: usize, smoothing: usize, kind: MaKind) -> Self {
        Self::new(
            Box::new(SmoothedMomentum::new(period, smoothing, kind)),
            0.0,
            0.0,
        )
    }

    /// Zero-line cross of the smoothed Awesome Oscillator.
    pub fn awesome(fast: usize, slow: usize, smoothing: usize, kind: MaKind) -> Self {
        Self::new(
            Box::new(SmoothedAwesome::new(fast, slow, smoothing, kind)),
            0.0,
            0.0,
        )
    }

    /// Zero-line cross of the volume oscillator.
    pub fn volume(short: usize, long: usize) -> Self {
        Self::new(Box::new(VolumeOscillator::new(short, long)), 0.0, 0.0)
    }

    pub fn levels(&self) -> (f64, f64) {
        (self.buy_level, self.sell_level)
    }
}

impl SignalRule for ThresholdCross {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup(&self) -> usize {
        warmup_for(self.indicator.lookback())
    }

    fn is_buy_signal(&self, candles: &[Candle]) -> Option<bool> {
        cross_up(&self.indicator.calculate(candles), self.buy_level)
    }

    fn is_sell_signal(&self, candles: &[Candle]) -> Option<bool> {
        cross_down(&self.indicator.calculate(candles), self.sell_level)
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<Signal> {
        let series = self.indicator.calculate(candles);
        let buy = cross_up(&series, self.buy_level)?;
        let sell = cross_down(&series, self.sell_level)?;
        Some(Signal::from_sides(buy, sell))
    }
}
