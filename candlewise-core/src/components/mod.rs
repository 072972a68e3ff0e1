//! Component traits and the factory that builds them.
//!
//! - Indicator: candle history in, aligned numeric series out
//! - Signal rule: candle history in, buy/sell verdict out
//!
//! Both are stateless trait objects, built from config by `factory`.

pub mod factory;
pub mod indicator;
pub mod signal;

pub use factory::{create_indicator, create_signal};
pub use indicator::{Indicator, IndicatorValues};
pub use signal::{Signal, SignalRule};
