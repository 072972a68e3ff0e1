//! Candle: the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar for one fixed-interval period.
///
/// The engine assumes `high >= max(open, close, low)` and
/// `low <= min(open, close, high)` but never enforces it. Malformed bars flow
/// through the arithmetic and surface as NaN or nonsensical values downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Close time in epoch milliseconds.
    pub close_time: i64,
    pub trade_count: u64,
}

impl Candle {
    /// Median price, `(high + low) / 2`.
    pub fn hl2(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Returns true if any price or volume field is NaN.
    pub fn is_void(&self) -> bool {
        self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.volume.is_nan()
    }

    /// Basic OHLC sanity check. Diagnostic only; no indicator calls it.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.volume >= 0.0
    }

    /// Close time as a UTC timestamp, `None` if out of chrono's range.
    pub fn close_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.close_time)
    }
}

/// Which candle field feeds a single-input indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Open,
    High,
    Low,
    #[default]
    Close,
    /// (high + low) / 2
    Hl2,
}

impl PriceSource {
    pub fn of(&self, candle: &Candle) -> f64 {
        match self {
            PriceSource::Open => candle.open,
            PriceSource::High => candle.high,
            PriceSource::Low => candle.low,
            PriceSource::Close => candle.close,
            PriceSource::Hl2 => candle.hl2(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceSource::Open => "open",
            PriceSource::High => "high",
            PriceSource::Low => "low",
            PriceSource::Close => "close",
            PriceSource::Hl2 => "hl2",
        }
    }
}

/// Extract one field from every candle, oldest first.
pub fn extract(candles: &[Candle], source: PriceSource) -> Vec<f64> {
    candles.iter().map(|c| source.of(c)).collect()
}

pub fn closes(candles: &[Candle]) -> Vec<f64> {
    extract(candles, PriceSource::Close)
}

pub fn volumes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.volume).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_candle() -> Candle {
        Candle {
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
            volume: 50_000.0,
            close_time: 1_704_153_600_000,
            trade_count: 420,
        }
    }

    #[test]
    fn candle_is_sane() {
        assert!(sample_candle().is_sane());
    }

    #[test]
    fn candle_detects_void() {
        let mut candle = sample_candle();
        candle.open = f64::NAN;
        assert!(candle.is_void());
        assert!(!candle.is_sane());
    }

    #[test]
    fn candle_detects_insane_high_low() {
        let mut candle = sample_candle();
        candle.high = 97.0; // below low
        assert!(!candle.is_sane());
    }

    #[test]
    fn hl2_is_midpoint() {
        assert_eq!(sample_candle().hl2(), 101.5);
    }

    #[test]
    fn close_datetime_converts_millis() {
        let dt = sample_candle().close_datetime().unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-02T00:00:00+00:00");
    }

    #[test]
    fn price_source_selects_field() {
        let c = sample_candle();
        assert_eq!(PriceSource::Open.of(&c), 100.0);
        assert_eq!(PriceSource::High.of(&c), 105.0);
        assert_eq!(PriceSource::Low.of(&c), 98.0);
        assert_eq!(PriceSource::Close.of(&c), 103.0);
        assert_eq!(PriceSource::Hl2.of(&c), 101.5);
    }

    #[test]
    fn price_source_deserializes_snake_case() {
        let src: PriceSource = serde_json::from_str("\"hl2\"").unwrap();
        assert_eq!(src, PriceSource::Hl2);
    }
}
