//! Fast line crossing a slow line.
//!
//! Buy when `fast` crosses above `slow`, sell when it crosses below.
//! Covers MACD vs signal, Aroon up vs down, +DI vs -DI, cloud conversion vs
//! base, moving-average pairs and close vs Supertrend.

use crate::components::indicator::Indicator;
use crate::domain::{Candle, PriceSource};
use crate::indicators::{
    Adx, Aroon, Cloud, CloudLine, CloudParams, Macd, MacdLine, MaKind, MovingAverage, Price,
    Supertrend,
};

use super::crossing::{cross_down, cross_up};
use super::{warmup_for, Signal, SignalRule};

pub struct LineCross {
    fast: Box<dyn Indicator>,
    slow: Box<dyn Indicator>,
    name: String,
}

impl LineCross {
    pub fn new(fast: Box<dyn Indicator>, slow: Box<dyn Indicator>) -> Self {
        let name = format!("{}_x_{}", fast.name(), slow.name());
        Self { fast, slow, name }
    }

    pub fn macd(fast: usize, slow: usize, signal: usize) -> Self {
        Self::new(
            Box::new(Macd::new(fast, slow, signal, MacdLine::Macd)),
            Box::new(Macd::new(fast, slow, signal, MacdLine::Signal)),
        )
    }

    pub fn aroon(period: usize) -> Self {
        Self::new(Box::new(Aroon::up(period)), Box::new(Aroon::down(period)))
    }

    /// +DI against -DI.
    pub fn directional(period: usize) -> Self {
        Self::new(Box::new(Adx::plus_di(period)), Box::new(Adx::minus_di(period)))
    }

    /// Conversion line against base line.
    pub fn cloud(params: CloudParams) -> Self {
        Self::new(
            Box::new(Cloud::new(params, CloudLine::Conversion)),
            Box::new(Cloud::new(params, CloudLine::Base)),
        )
    }

    pub fn moving_average(kind: MaKind, fast: usize, slow: usize, source: PriceSource) -> Self {
        assert!(slow > fast, "slow period must be > fast period");
        Self::new(
            Box::new(MovingAverage::new(kind, fast, source)),
            Box::new(MovingAverage::new(kind, slow, source)),
        )
    }

    /// Close against the Supertrend line.
    pub fn supertrend(period: usize, multiplier: f64) -> Self {
        Self::new(
            Box::new(Price::close()),
            Box::new(Supertrend::new(period, multiplier)),
        )
    }
}

impl SignalRule for LineCross {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup(&self) -> usize {
        warmup_for(self.fast.lookback().max(self.slow.lookback()))
    }

    fn is_buy_signal(&self, candles: &[Candle]) -> Option<bool> {
        cross_up(&self.fast.calculate(candles), &self.slow.calculate(candles))
    }

    fn is_sell_signal(&self, candles: &[Candle]) -> Option<bool> {
        cross_down(&self.fast.calculate(candles), &self.slow.calculate(candles))
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<Signal> {
        let fast = self.fast.calculate(candles);
        let slow = self.slow.calculate(candles);
        let buy = cross_up(&fast, &slow)?;
        let sell = cross_down(&fast, &slow)?;
        Some(Signal::from_sides(buy, sell))
    }
}
