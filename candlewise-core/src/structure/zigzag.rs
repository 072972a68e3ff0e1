//! Zigzag pivot engine.
//!
//! Tracks the running extreme in one direction and confirms it as a pivot
//! once price reverses from it by more than the configured deviation.
//! Highs are read from `high`, lows from `low`.
//!
//! Per bar, continuation is checked before reversal: a bar that extends the
//! provisional extreme revises it and never confirms it in the same step.

use serde::{Deserialize, Serialize};

use crate::domain::Candle;
use crate::indicators::atr::average_true_range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotKind {
    High,
    Low,
}

impl PivotKind {
    pub fn opposite(self) -> Self {
        match self {
            PivotKind::High => PivotKind::Low,
            PivotKind::Low => PivotKind::High,
        }
    }
}

/// A structural extremum. Only the last pivot of a scan can be provisional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    pub index: usize,
    pub price: f64,
    pub kind: PivotKind,
    pub confirmed: bool,
}

/// Reversal threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Deviation {
    /// Percentage of the provisional pivot's price.
    Percent { percent: f64 },
    /// Fixed price distance.
    Absolute { distance: f64 },
    /// `multiplier * ATR(period)` at the reversal bar. No reversal before ATR is defined.
    Atr { period: usize, multiplier: f64 },
}

/// Where the engine stands after the last processed bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZigzagState {
    /// No reversal seen yet.
    Seeking,
    /// Provisional pivot is a high.
    TrackingUp,
    /// Provisional pivot is a low.
    TrackingDown,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZigzagScan {
    pub pivots: Vec<Pivot>,
    pub state: ZigzagState,
}

impl ZigzagScan {
    pub fn confirmed(&self) -> impl Iterator<Item = &Pivot> {
        self.pivots.iter().filter(|p| p.confirmed)
    }

    pub fn provisional(&self) -> Option<&Pivot> {
        self.pivots.last().filter(|p| !p.confirmed)
    }
}

#[derive(Debug, Clone)]
pub struct Zigzag {
    deviation: Deviation,
}

impl Zigzag {
    pub fn new(deviation: Deviation) -> Self {
        match deviation {
            Deviation::Percent { percent } => {
                assert!(percent > 0.0, "zigzag percent must be > 0")
            }
            Deviation::Absolute { distance } => {
                assert!(distance > 0.0, "zigzag distance must be > 0")
            }
            Deviation::Atr { period, multiplier } => {
                assert!(period >= 1, "zigzag ATR period must be >= 1");
                assert!(multiplier > 0.0, "zigzag ATR multiplier must be > 0");
            }
        }
        Self { deviation }
    }

    pub fn percent(percent: f64) -> Self {
        Self::new(Deviation::Percent { percent })
    }

    pub fn absolute(distance: f64) -> Self {
        Self::new(Deviation::Absolute { distance })
    }

    pub fn deviation(&self) -> Deviation {
        self.deviation
    }

    /// Confirmed pivots followed by the provisional one, if any.
    pub fn pivots(&self, candles: &[Candle]) -> Vec<Pivot> {
        self.scan(candles).pivots
    }

    pub fn scan(&self, candles: &[Candle]) -> ZigzagScan {
        let Some(first) = candles.first() else {
            return ZigzagScan {
                pivots: Vec::new(),
                state: ZigzagState::Seeking,
            };
        };

        let atr = match self.deviation {
            Deviation::Atr { period, .. } => Some(average_true_range(candles, period)),
            _ => None,
        };
        let threshold = |reference: f64, index: usize| -> Option<f64> {
            match self.deviation {
                Deviation::Percent { percent } => Some(reference.abs() * percent / 100.0),
                Deviation::Absolute { distance } => Some(distance),
                Deviation::Atr { multiplier, .. } => atr
                    .as_ref()
                    .and_then(|series| series.get(index))
                    .map(|a| a * multiplier),
            }
        };

        let mut confirmed: Vec<Pivot> = Vec::new();
        let mut high = (0, first.high);
        let mut low = (0, first.low);
        let mut state = ZigzagState::Seeking;

        for (i, bar) in candles.iter().enumerate().skip(1) {
            match state {
                ZigzagState::Seeking => {
                    let new_high = bar.high > high.1;
                    let new_low = bar.low < low.1;
                    if new_high {
                        high = (i, bar.high);
                    }
                    if new_low {
                        low = (i, bar.low);
                    }
                    // An outside bar extends both candidates and decides nothing.
                    if new_high && !new_low {
                        if let Some(t) = threshold(low.1, i) {
                            if high.1 - low.1 > t {
                                confirmed.push(confirm(low, PivotKind::Low));
                                state = ZigzagState::TrackingUp;
                            }
                        }
                    } else if new_low && !new_high {
                        if let Some(t) = threshold(high.1, i) {
                            if high.1 - low.1 > t {
                                confirmed.push(confirm(high, PivotKind::High));
                                state = ZigzagState::TrackingDown;
                            }
                        }
                    }
                }
                ZigzagState::TrackingUp => {
                    if bar.high > high.1 {
                        high = (i, bar.high);
                    } else if threshold(high.1, i).is_some_and(|t| bar.low < high.1 - t) {
                        confirmed.push(confirm(high, PivotKind::High));
                        low = (i, bar.low);
                        state = ZigzagState::TrackingDown;
                    }
                }
                ZigzagState::TrackingDown => {
                    if bar.low < low.1 {
                        low = (i, bar.low);
                    } else if threshold(low.1, i).is_some_and(|t| bar.high > low.1 + t) {
                        confirmed.push(confirm(low, PivotKind::Low));
                        high = (i, bar.high);
                        state = ZigzagState::TrackingUp;
                    }
                }
            }
        }

        let provisional = match state {
            ZigzagState::Seeking => None,
            ZigzagState::TrackingUp => Some(provisional(high, PivotKind::High)),
            ZigzagState::TrackingDown => Some(provisional(low, PivotKind::Low)),
        };
        confirmed.extend(provisional);

        ZigzagScan {
            pivots: confirmed,
            state,
        }
    }
}

fn confirm((index, price): (usize, f64), kind: PivotKind) -> Pivot {
    tracing::debug!(index, price, ?kind, "zigzag pivot confirmed");
    Pivot {
        index,
        price,
        kind,
        confirmed: true,
    }
}

fn provisional((index, price): (usize, f64), kind: PivotKind) -> Pivot {
    Pivot {
        index,
        price,
        kind,
        confirmed: false,
    }
}
