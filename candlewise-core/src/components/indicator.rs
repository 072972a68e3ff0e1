//! Indicator trait and a named batch of computed series.
//!
//! Indicators are pure functions: candle history in, aligned series out.
//! Every call recomputes the full window; nothing is carried between calls.

use crate::domain::{Candle, IndicatorSeries};
use serde::Serialize;

/// Trait for indicators.
///
/// `calculate` returns a series exactly as long as `candles`. The first
/// `lookback()` positions are absent.
///
/// # Look-ahead contamination guard
/// No value at index t may depend on candles after t. Every indicator must
/// pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "atr_14").
    fn name(&self) -> &str;

    /// Index of the first defined value (number of warm-up positions).
    fn lookback(&self) -> usize;

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries;
}

/// Named indicator outputs in insertion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndicatorValues {
    series: Vec<(String, IndicatorSeries)>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute every indicator over the same candles.
    pub fn compute(indicators: &[Box<dyn Indicator>], candles: &[Candle]) -> Self {
        let mut values = Self::new();
        for indicator in indicators {
            values.insert(indicator.name(), indicator.calculate(candles));
        }
        values
    }

    /// Insert a named series, replacing any previous series of that name.
    pub fn insert(&mut self, name: impl Into<String>, values: IndicatorSeries) {
        let name = name.into();
        match self.series.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = values,
            None => self.series.push((name, values)),
        }
    }

    /// Value of a named series at a specific index.
    pub fn get(&self, name: &str, index: usize) -> Option<f64> {
        self.get_series(name).and_then(|s| s.get(index))
    }

    pub fn get_series(&self, name: &str) -> Option<&IndicatorSeries> {
        self.series.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndicatorSeries)> {
        self.series.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{make_candles, MovingAverage};

    #[test]
    fn indicator_values_insert_and_get() {
        let mut iv = IndicatorValues::new();
        iv.insert("sma_3", IndicatorSeries::with_warmup(2, vec![100.0, 101.0]));
        assert_eq!(iv.get("sma_3", 0), None);
        assert_eq!(iv.get("sma_3", 2), Some(100.0));
        assert_eq!(iv.get("sma_3", 3), Some(101.0));
        assert_eq!(iv.get("sma_3", 4), None); // out of bounds
    }

    #[test]
    fn indicator_values_missing_name() {
        let iv = IndicatorValues::new();
        assert_eq!(iv.get("nonexistent", 0), None);
    }

    #[test]
    fn insert_replaces_same_name() {
        let mut iv = IndicatorValues::new();
        iv.insert("a", IndicatorSeries::with_warmup(0, vec![1.0]));
        iv.insert("a", IndicatorSeries::with_warmup(0, vec![2.0]));
        assert_eq!(iv.len(), 1);
        assert_eq!(iv.get("a", 0), Some(2.0));
    }

    #[test]
    fn compute_keeps_insertion_order() {
        let candles = make_candles(&[1.0, 2.0, 3.0, 4.0]);
        let indicators: Vec<Box<dyn Indicator>> =
            vec![Box::new(MovingAverage::ema(3)), Box::new(MovingAverage::sma(2))];
        let iv = IndicatorValues::compute(&indicators, &candles);
        let names: Vec<&str> = iv.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["ema_3", "sma_2"]);
        assert_eq!(iv.get("sma_2", 3), Some(3.5));
    }
}
