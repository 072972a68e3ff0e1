//! Signal rules: turn candle history into buy/sell verdicts.
//!
//! Every rule is one crossing check per side, built from the primitives in
//! `crossing`. Rules are stateless; each call recomputes from the candles it
//! is given and only looks at the last two points.

pub mod band_reversion;
pub mod crossing;
pub mod line_cross;
pub mod threshold;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Candle;

pub use band_reversion::BandReversion;
pub use crossing::{cross_down, cross_down_at, cross_up, cross_up_at, crossing, Operand};
pub use line_cross::LineCross;
pub use threshold::ThresholdCross;

/// Discrete verdict of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

impl Signal {
    /// Combine the two side checks. A buy takes precedence, though a single
    /// crossing pair can never fire both ways.
    pub fn from_sides(buy: bool, sell: bool) -> Self {
        if buy {
            Signal::Buy
        } else if sell {
            Signal::Sell
        } else {
            Signal::Neutral
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Neutral => "neutral",
        })
    }
}

/// A buy/sell rule over a candle history.
///
/// `None` means "no verdict yet": not enough history for two defined points,
/// or NaN in the compared values.
pub trait SignalRule: Send + Sync {
    /// Human-readable name (e.g., "rsi_14_threshold").
    fn name(&self) -> &str;

    /// Number of candles needed before a verdict is possible.
    fn warmup(&self) -> usize;

    fn is_buy_signal(&self, candles: &[Candle]) -> Option<bool>;

    fn is_sell_signal(&self, candles: &[Candle]) -> Option<bool>;

    fn evaluate(&self, candles: &[Candle]) -> Option<Signal> {
        match (self.is_buy_signal(candles), self.is_sell_signal(candles)) {
            (Some(buy), Some(sell)) => Some(Signal::from_sides(buy, sell)),
            _ => {
                tracing::trace!(rule = self.name(), candles = candles.len(), "no verdict");
                None
            }
        }
    }
}

/// Candles needed for two defined points of a series with this lookback.
pub(crate) fn warmup_for(lookback: usize) -> usize {
    lookback + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_sides() {
        assert_eq!(Signal::from_sides(true, false), Signal::Buy);
        assert_eq!(Signal::from_sides(false, true), Signal::Sell);
        assert_eq!(Signal::from_sides(false, false), Signal::Neutral);
    }

    #[test]
    fn signal_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Signal::Neutral).unwrap(), "\"neutral\"");
        assert_eq!(Signal::Buy.to_string(), "buy");
    }
}
