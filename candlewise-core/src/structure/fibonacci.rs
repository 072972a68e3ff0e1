//! Fibonacci retracement between the two most recent confirmed pivots.
//!
//! Levels are measured back from the newer pivot toward the older one:
//! `price = newer - ratio * (newer - older)`.

use serde::Serialize;

use crate::structure::zigzag::Pivot;

pub const FIB_RATIOS: [f64; 5] = [0.236, 0.382, 0.5, 0.618, 0.786];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FibLevel {
    pub ratio: f64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Retracement {
    pub older: Pivot,
    pub newer: Pivot,
    pub levels: Vec<FibLevel>,
}

impl Retracement {
    /// `None` when both pivots have the same kind.
    pub fn between(older: Pivot, newer: Pivot) -> Option<Self> {
        if older.kind == newer.kind {
            return None;
        }
        let swing = newer.price - older.price;
        let levels = FIB_RATIOS
            .iter()
            .map(|&ratio| FibLevel {
                ratio,
                price: newer.price - ratio * swing,
            })
            .collect();
        Some(Self {
            older,
            newer,
            levels,
        })
    }

    /// From the last two confirmed pivots of a zigzag scan.
    pub fn from_pivots(pivots: &[Pivot]) -> Option<Self> {
        let mut confirmed = pivots.iter().rev().filter(|p| p.confirmed);
        let newer = *confirmed.next()?;
        let older = *confirmed.next()?;
        Self::between(older, newer)
    }

    pub fn level(&self, ratio: f64) -> Option<f64> {
        self.levels
            .iter()
            .find(|l| (l.ratio - ratio).abs() < 1e-9)
            .map(|l| l.price)
    }

    /// Deepest ratio the given price has retraced through, if any.
    pub fn depth(&self, price: f64) -> Option<f64> {
        let swing = self.newer.price - self.older.price;
        if swing == 0.0 {
            return None;
        }
        let retraced = (self.newer.price - price) / swing;
        FIB_RATIOS.iter().rev().copied().find(|&r| retraced >= r)
    }
}
