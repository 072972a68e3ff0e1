//! IndicatorSeries: numeric output aligned 1:1 with the input candles.
//!
//! Warm-up positions are `None`. NaN is reserved for malformed input that
//! propagated through the arithmetic, so "not yet defined" and "poisoned"
//! stay distinguishable.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSeries {
    values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    /// A series of `len` absent values.
    pub fn absent(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    /// `warmup` absent positions followed by the defined `tail`.
    pub fn with_warmup(warmup: usize, tail: Vec<f64>) -> Self {
        let mut values = Vec::with_capacity(warmup + tail.len());
        values.resize(warmup, None);
        values.extend(tail.into_iter().map(Some));
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, `None` if absent or out of bounds.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// The last two points as `(previous, current)`, only if both are defined.
    pub fn last_two(&self) -> Option<(f64, f64)> {
        let n = self.values.len();
        if n < 2 {
            return None;
        }
        Some((self.values[n - 2]?, self.values[n - 1]?))
    }

    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Start index and values of the contiguous defined run at the end of the series.
    pub fn defined_suffix(&self) -> (usize, Vec<f64>) {
        let start = self
            .values
            .iter()
            .rposition(Option::is_none)
            .map_or(0, |i| i + 1);
        let tail = self.values[start..].iter().flatten().copied().collect();
        (start, tail)
    }

    /// Run a primitive over the defined suffix and re-align its output.
    ///
    /// `f` must return a series as long as its input.
    pub fn chain(&self, f: impl FnOnce(&[f64]) -> IndicatorSeries) -> IndicatorSeries {
        let (start, tail) = self.defined_suffix();
        let inner = f(&tail);
        let mut values = Vec::with_capacity(self.values.len());
        values.resize(start, None);
        values.extend(inner.values);
        Self { values }
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> IndicatorSeries {
        self.values.iter().map(|v| v.map(&f)).collect()
    }

    /// Combine point-wise with `other`; absent wherever either side is absent.
    pub fn zip_with(
        &self,
        other: &IndicatorSeries,
        f: impl Fn(f64, f64) -> f64,
    ) -> IndicatorSeries {
        (0..self.len())
            .map(|i| match (self.get(i), other.get(i)) {
                (Some(a), Some(b)) => Some(f(a, b)),
                _ => None,
            })
            .collect()
    }

    /// Displace values `n` positions toward the future, keeping the length.
    pub fn shift_forward(&self, n: usize) -> IndicatorSeries {
        let len = self.values.len();
        let mut values = vec![None; len.min(n)];
        values.extend(self.values.iter().take(len.saturating_sub(n)).copied());
        Self { values }
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.values.iter().copied()
    }

    pub fn as_slice(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Bit-level equality, treating NaN payloads as equal to themselves.
    pub fn bit_identical(&self, other: &IndicatorSeries) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.map(f64::to_bits) == b.map(f64::to_bits))
    }
}

impl FromIterator<Option<f64>> for IndicatorSeries {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Option<f64>>> for IndicatorSeries {
    fn from(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_warmup_pads_front() {
        let s = IndicatorSeries::with_warmup(2, vec![1.0, 2.0]);
        assert_eq!(s.as_slice(), &[None, None, Some(1.0), Some(2.0)]);
        assert_eq!(s.first_defined(), Some(2));
        assert_eq!(s.defined_count(), 2);
    }

    #[test]
    fn last_two_requires_both_defined() {
        let s = IndicatorSeries::with_warmup(1, vec![5.0]);
        assert_eq!(s.last(), Some(5.0));
        assert_eq!(s.last_two(), None);

        let s = IndicatorSeries::with_warmup(1, vec![5.0, 6.0]);
        assert_eq!(s.last_two(), Some((5.0, 6.0)));
    }

    #[test]
    fn get_out_of_bounds_is_absent() {
        let s = IndicatorSeries::with_warmup(0, vec![1.0]);
        assert_eq!(s.get(0), Some(1.0));
        assert_eq!(s.get(1), None);
    }

    #[test]
    fn chain_realigns_output() {
        let s = IndicatorSeries::with_warmup(2, vec![1.0, 2.0, 3.0]);
        let doubled = s.chain(|tail| IndicatorSeries::with_warmup(1, tail[1..].iter().map(|v| v * 2.0).collect()));
        assert_eq!(
            doubled.as_slice(),
            &[None, None, None, Some(4.0), Some(6.0)]
        );
    }

    #[test]
    fn defined_suffix_skips_interior_gap() {
        let s: IndicatorSeries = vec![Some(1.0), None, Some(2.0), Some(3.0)].into();
        assert_eq!(s.defined_suffix(), (2, vec![2.0, 3.0]));
    }

    #[test]
    fn zip_with_absent_when_either_absent() {
        let a = IndicatorSeries::with_warmup(1, vec![1.0, 2.0]);
        let b = IndicatorSeries::with_warmup(2, vec![10.0]);
        let c = a.zip_with(&b, |x, y| x + y);
        assert_eq!(c.as_slice(), &[None, None, Some(12.0)]);
    }

    #[test]
    fn shift_forward_keeps_length() {
        let s = IndicatorSeries::with_warmup(0, vec![1.0, 2.0, 3.0]);
        assert_eq!(s.shift_forward(2).as_slice(), &[None, None, Some(1.0)]);
        assert_eq!(s.shift_forward(5).as_slice(), &[None, None, None]);
    }

    #[test]
    fn bit_identical_handles_nan() {
        let a = IndicatorSeries::with_warmup(1, vec![f64::NAN, 1.0]);
        let b = a.clone();
        assert!(a.bit_identical(&b));
        assert_ne!(a, b); // NaN != NaN under PartialEq
    }

    #[test]
    fn serializes_absent_as_null() {
        let s = IndicatorSeries::with_warmup(1, vec![1.5]);
        assert_eq!(serde_json::to_string(&s).unwrap(), "[null,1.5]");
    }
}
