//! Ichimoku-style cloud.
//!
//! mid(n) = (highest high + lowest low) / 2 over the trailing n bars
//! Conversion = mid(conversion), Base = mid(base)
//! Span A = (Conversion + Base) / 2, Span B = mid(span_b),
//! both displaced `displacement` bars forward.
//!
//! Only forward displacement is produced; a lagging span would read the future.

use serde::{Deserialize, Serialize};

use crate::components::indicator::Indicator;
use crate::domain::{Candle, IndicatorSeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudLine {
    Conversion,
    Base,
    SpanA,
    SpanB,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudParams {
    pub conversion: usize,
    pub base: usize,
    pub span_b: usize,
    pub displacement: usize,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            conversion: 9,
            base: 26,
            span_b: 52,
            displacement: 26,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CloudOutput {
    pub conversion: IndicatorSeries,
    pub base: IndicatorSeries,
    pub span_a: IndicatorSeries,
    pub span_b: IndicatorSeries,
}

#[derive(Debug, Clone)]
pub struct Cloud {
    params: CloudParams,
    line: CloudLine,
    name: String,
}

impl Cloud {
    pub fn new(params: CloudParams, line: CloudLine) -> Self {
        assert!(
            params.conversion >= 1 && params.base >= 1 && params.span_b >= 1,
            "Cloud periods must be >= 1"
        );
        let label = match line {
            CloudLine::Conversion => "conversion",
            CloudLine::Base => "base",
            CloudLine::SpanA => "span_a",
            CloudLine::SpanB => "span_b",
        };
        let CloudParams {
            conversion,
            base,
            span_b,
            displacement,
        } = params;
        Self {
            params,
            line,
            name: format!("cloud_{label}_{conversion}_{base}_{span_b}_{displacement}"),
        }
    }

    pub fn lines(&self, candles: &[Candle]) -> CloudOutput {
        let p = &self.params;
        let conversion = midpoint(candles, p.conversion);
        let base = midpoint(candles, p.base);
        let span_a = conversion
            .zip_with(&base, |c, b| (c + b) / 2.0)
            .shift_forward(p.displacement);
        let span_b = midpoint(candles, p.span_b).shift_forward(p.displacement);
        CloudOutput {
            conversion,
            base,
            span_a,
            span_b,
        }
    }
}

/// (highest high + lowest low) / 2 over the trailing `period` bars.
pub fn midpoint(candles: &[Candle], period: usize) -> IndicatorSeries {
    let n = candles.len();
    if period == 0 || n < period {
        return IndicatorSeries::absent(n);
    }
    let tail = candles
        .windows(period)
        .map(|window| {
            if window.iter().any(|c| c.high.is_nan() || c.low.is_nan()) {
                return f64::NAN;
            }
            let high = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
            let low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
            (high + low) / 2.0
        })
        .collect();
    IndicatorSeries::with_warmup(period - 1, tail)
}

impl Indicator for Cloud {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        let p = &self.params;
        match self.line {
            CloudLine::Conversion => p.conversion - 1,
            CloudLine::Base => p.base - 1,
            CloudLine::SpanA => p.conversion.max(p.base) - 1 + p.displacement,
            CloudLine::SpanB => p.span_b - 1 + p.displacement,
        }
    }

    fn calculate(&self, candles: &[Candle]) -> IndicatorSeries {
        let out = self.lines(candles);
        match self.line {
            CloudLine::Conversion => out.conversion,
            CloudLine::Base => out.base,
            CloudLine::SpanA => out.span_a,
            CloudLine::SpanB => out.span_b,
        }
    }
}
