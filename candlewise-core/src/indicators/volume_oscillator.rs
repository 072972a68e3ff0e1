//! Volume Oscillator: percentage spread between a short and a long volume SMA.
//!
//! VO = 100 * (SMA(vol, short) - SMA(vol, long)) / SMA(vol, long)
//! Zero long average → 0.
//! Lookback: long - 1.

use crate::components::indicator::Indicator;
use crate::domain::{volumes, Candle, IndicatorSeries};
use crate::indicators::sma::sma;

#[derive(Debug, Clone)]
pub struct VolumeOscillator {
    short: usize,
    long: usize,
    name: String,
}

impl VolumeOscillator {
    pub fn new(short: usize, long: usize) -> Self {
        assert!(short >= 1, "Volume oscillator short period must be >= 1");
        assert!(long > short, "Volume oscillator long period must be > short period");
        Self {
            short,
            long,
            name: format!("vo_{short}_{long}"),
        }
    }
}

impl Indicator for VolumeOscillator {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.long - 1
    }

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries {
        let volume = volumes(candles);
        sma(&volume, self.short).zip_with(&sma(&volume, self.long), |s, l| {
            if l == 0.0 {
                0.0
            } else {
                100.0 * (s - l) / l
            }
        })
    }
}
