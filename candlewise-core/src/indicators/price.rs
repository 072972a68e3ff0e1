//! Raw price line: a candle field exposed as an indicator.
//!
//! Lets signal rules cross price against another line (e.g., close vs Supertrend).
//! Lookback: 0.

use crate::components::indicator::Indicator;
use crate::domain::{Candle, IndicatorSeries, PriceSource};

#[derive(Debug, Clone)]
pub struct Price {
    source: PriceSource,
}

impl Price {
    pub fn new(source: PriceSource) -> Self {
        Self { source }
    }

    pub fn close() -> Self {
        Self::new(PriceSource::Close)
    }
}

impl Indicator for Price {
    fn name(&self) -> &str {
        self.source.as_str()
    }

    fn lookback(&self) -> usize {
        0
    }

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries {
        candles.iter().map(|c| Some(self.source.of(c))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_candles;

    #[test]
    fn close_line_matches_candles() {
        let candles = make_candles(&[1.0, 2.0]);
        let line = Price::close().calculate(&candles);
        assert_eq!(line.as_slice(), &[Some(1.0), Some(2.0)]);
        assert_eq!(Price::close().name(), "close");
    }
}
