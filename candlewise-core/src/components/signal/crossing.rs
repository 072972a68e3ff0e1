//! Crossing detection between two operands.
//!
//! `a` crosses up through `b` at `t` when `a[t-1] <= b[t-1]` and `a[t] > b[t]`.
//! Crossing down is the mirror image. The verdict is `None` until both
//! operands have two defined points, and for NaN operands.

use crate::domain::IndicatorSeries;

use super::Signal;

/// One side of a crossing comparison.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Series(&'a IndicatorSeries),
    Value(f64),
}

impl Operand<'_> {
    /// `(previous, current)` at the end of the operand.
    fn last_pair(&self) -> Option<(f64, f64)> {
        match self {
            Operand::Series(s) => s.last_two(),
            Operand::Value(v) => Some((*v, *v)),
        }
    }

    /// `(value[t-1], value[t])`.
    fn pair_at(&self, t: usize) -> Option<(f64, f64)> {
        if t == 0 {
            return None;
        }
        match self {
            Operand::Series(s) => Some((s.get(t - 1)?, s.get(t)?)),
            Operand::Value(v) => Some((*v, *v)),
        }
    }
}

impl<'a> From<&'a IndicatorSeries> for Operand<'a> {
    fn from(series: &'a IndicatorSeries) -> Self {
        Operand::Series(series)
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Value(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

fn crossed(a: (f64, f64), b: (f64, f64), direction: Direction) -> Option<bool> {
    let (a_prev, a_cur) = a;
    let (b_prev, b_cur) = b;
    if a_prev.is_nan() || a_cur.is_nan() || b_prev.is_nan() || b_cur.is_nan() {
        return None;
    }
    Some(match direction {
        Direction::Up => a_prev <= b_prev && a_cur > b_cur,
        Direction::Down => a_prev >= b_prev && a_cur < b_cur,
    })
}

/// Did `a` cross above `b` on the last point?
pub fn cross_up<'a>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'a>>) -> Option<bool> {
    crossed(a.into().last_pair()?, b.into().last_pair()?, Direction::Up)
}

/// Did `a` cross below `b` on the last point?
pub fn cross_down<'a>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'a>>) -> Option<bool> {
    crossed(a.into().last_pair()?, b.into().last_pair()?, Direction::Down)
}

pub fn cross_up_at<'a>(
    a: impl Into<Operand<'a>>,
    b: impl Into<Operand<'a>>,
    t: usize,
) -> Option<bool> {
    crossed(a.into().pair_at(t)?, b.into().pair_at(t)?, Direction::Up)
}

pub fn cross_down_at<'a>(
    a: impl Into<Operand<'a>>,
    b: impl Into<Operand<'a>>,
    t: usize,
) -> Option<bool> {
    crossed(a.into().pair_at(t)?, b.into().pair_at(t)?, Direction::Down)
}

/// `Buy` on an upward cross, `Sell` on a downward cross, `Neutral` otherwise.
pub fn crossing<'a>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'a>>) -> Option<Signal> {
    let (a, b) = (a.into(), b.into());
    let up = cross_up(a, b)?;
    let down = cross_down(a, b)?;
    Some(Signal::from_sides(up, down))
}
