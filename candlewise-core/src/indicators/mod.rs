//! Concrete indicator implementations.
//!
//! Moving-average primitives (`sma`, `ema`, `wma`, `rma`, `hma`, `jma`) are
//! free functions over `&[f64]` so they compose through
//! `IndicatorSeries::chain`. Everything built on candles implements the
//! `Indicator` trait from `components::indicator`.
//!
//! Multi-line indicators (MACD, Bollinger, Aroon, ADX, Cloud) are exposed as
//! separate named instances per line, keeping the single-series `Indicator`
//! trait unchanged, and offer `lines()` to compute all of them at once.

pub mod adx;
pub mod aroon;
pub mod atr;
pub mod awesome;
pub mod bollinger;
pub mod cloud;
pub mod ema;
pub mod hma;
pub mod jma;
pub mod ma;
pub mod macd;
pub mod momentum;
pub mod price;
pub mod rma;
pub mod rmi;
pub mod rsi;
pub mod sma;
pub mod supertrend;
pub mod volume_oscillator;
pub mod wma;

pub use adx::{Adx, AdxLine};
pub use aroon::{Aroon, AroonLine};
pub use atr::Atr;
pub use awesome::SmoothedAwesome;
pub use bollinger::{Bollinger, BollingerLine};
pub use cloud::{Cloud, CloudLine, CloudParams};
pub use ma::{moving_average, MaKind, MovingAverage};
pub use macd::{Macd, MacdLine};
pub use momentum::SmoothedMomentum;
pub use price::Price;
pub use rmi::Rmi;
pub use rsi::Rsi;
pub use supertrend::{Supertrend, Trend};
pub use volume_oscillator::VolumeOscillator;

/// Create synthetic candles from close prices for testing.
///
/// Generates plausible OHLCV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000,
/// one-minute close times starting 2024-01-02.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<crate::domain::Candle> {
    use crate::domain::Candle;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle {
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
                close_time: 1_704_153_600_000 + i as i64 * 60_000,
                trade_count: 10,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
