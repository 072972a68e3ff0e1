//! Fixed-width price bands anchored at a reference price.
//!
//! Band `i` covers `[anchor + i * width, anchor + (i + 1) * width)`.
//! The top edge of the last band is inclusive.

use serde::{Deserialize, Serialize};

use crate::domain::Candle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePosition {
    Below,
    Band(usize),
    Above,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBands {
    anchor: f64,
    width: f64,
    count: usize,
}

impl RangeBands {
    pub fn new(anchor: f64, width: f64, count: usize) -> Self {
        assert!(width > 0.0, "band width must be > 0");
        assert!(count >= 1, "band count must be >= 1");
        Self {
            anchor,
            width,
            count,
        }
    }

    /// Split the range of the last `lookback` candles into `count` bands.
    ///
    /// Anchor is the lowest low; `None` when there is no usable range.
    pub fn from_candles(candles: &[Candle], lookback: usize, count: usize) -> Option<Self> {
        if lookback == 0 || count == 0 || candles.len() < lookback {
            return None;
        }
        let window = &candles[candles.len() - lookback..];
        if window.iter().any(|c| c.high.is_nan() || c.low.is_nan()) {
            return None;
        }
        let high = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let range = high - low;
        if range <= 0.0 {
            return None;
        }
        Some(Self::new(low, range / count as f64, count))
    }

    pub fn anchor(&self) -> f64 {
        self.anchor
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Unbounded band index; negative below the anchor.
    pub fn band_index(&self, price: f64) -> i64 {
        ((price - self.anchor) / self.width).floor() as i64
    }

    /// `(lower, upper)` edges of band `index`.
    pub fn bounds(&self, index: i64) -> (f64, f64) {
        let lower = self.anchor + index as f64 * self.width;
        (lower, lower + self.width)
    }

    pub fn top(&self) -> f64 {
        self.anchor + self.count as f64 * self.width
    }

    /// Bucket a price against the bands; `None` for a NaN price.
    pub fn classify(&self, price: f64) -> Option<RangePosition> {
        if price.is_nan() {
            return None;
        }
        if price < self.anchor {
            return Some(RangePosition::Below);
        }
        if price > self.top() {
            return Some(RangePosition::Above);
        }
        let index = self.band_index(price).clamp(0, self.count as i64 - 1);
        Some(RangePosition::Band(index as usize))
    }

    /// Position within the whole range: 0 at the anchor, 1 at the top.
    pub fn relative_position(&self, price: f64) -> f64 {
        (price - self.anchor) / (self.top() - self.anchor)
    }

    /// Histogram of closes per band. Closes outside the range or NaN are not counted.
    pub fn occupancy(&self, candles: &[Candle]) -> Vec<usize> {
        let mut counts = vec![0; self.count];
        for candle in candles {
            if let Some(RangePosition::Band(i)) = self.classify(candle.close) {
                counts[i] += 1;
            }
        }
        counts
    }
}
