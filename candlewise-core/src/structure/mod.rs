//! Structural detectors: zigzag pivots and what is derived from them.
//!
//! Unlike the indicators these produce event lists rather than aligned
//! series, since a provisional pivot can be revised by later candles.

pub mod fibonacci;
pub mod levels;
pub mod range_bands;
pub mod zigzag;

pub use fibonacci::{FibLevel, Retracement, FIB_RATIOS};
pub use levels::{Level, LevelMap, LevelParams};
pub use range_bands::{RangeBands, RangePosition};
pub use zigzag::{Deviation, Pivot, PivotKind, Zigzag, ZigzagScan, ZigzagState};
