//! Domain types: candles and aligned indicator output.

pub mod candle;
pub mod series;

pub use candle::{closes, extract, volumes, Candle, PriceSource};
pub use series::IndicatorSeries;
