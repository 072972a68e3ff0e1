//! Jurik-style adaptive moving average (JMA).
//!
//! Two-stage adaptive filter:
//! 1. Volatility: distance of price from a pair of adaptive bands, averaged
//!    over 10 bars and again over 65 bars. The ratio of the current reading
//!    to that average, clamped to `[1, len1^(1/pow1)]`, drives a power-law
//!    smoothing factor `alpha = beta^(ratio^(pow1 * power / 2))`.
//! 2. Adaptive EMA, then a phase-biased detrend and a second, squared-alpha
//!    smoothing pass.
//!
//! `phase` in [-100, 100] moves the filter from smoother/lagging to
//! faster/overshooting. `power` = 2 gives the classic response curve.
//! Lookback: period (one bar beyond the nominal window).

use crate::domain::IndicatorSeries;

pub const DEFAULT_PHASE: f64 = 0.0;
pub const DEFAULT_POWER: f64 = 2.0;

const VOLATILITY_LENGTH: usize = 10;
const VOLATILITY_AVERAGE_LENGTH: usize = 65;

pub fn jma(values: &[f64], period: usize, phase: f64, power: f64) -> IndicatorSeries {
    let n = values.len();
    if period == 0 || n <= period {
        return IndicatorSeries::absent(n);
    }

    let half_len = 0.5 * (period as f64 - 1.0);
    let phase_ratio = (phase / 100.0 + 1.5).clamp(0.5, 2.5);
    let len1 = if half_len > 0.0 {
        (half_len.sqrt().ln() / 2f64.ln() + 2.0).max(0.0)
    } else {
        0.0
    };
    let pow1 = (len1 - 2.0).max(0.5);
    let len2 = len1 * half_len.sqrt();
    let band_beta = len2 / (len2 + 1.0);
    let beta = 0.45 * (period as f64 - 1.0) / (0.45 * (period as f64 - 1.0) + 2.0);
    let max_ratio = len1.powf(1.0 / pow1);

    let mut out = vec![0.0; n];
    let mut volty = vec![0.0; n];
    let mut volty_sum = vec![0.0; n];

    let mut ma1 = values[0];
    let mut upper = values[0];
    let mut lower = values[0];
    let mut det0 = 0.0;
    let mut det1 = 0.0;
    out[0] = values[0];

    for i in 1..n {
        let price = values[i];
        let del_upper = price - upper;
        let del_lower = price - lower;

        volty[i] = if del_upper.abs() != del_lower.abs() {
            del_upper.abs().max(del_lower.abs())
        } else {
            0.0
        };
        volty_sum[i] = volty_sum[i - 1]
            + (volty[i] - volty[i.saturating_sub(VOLATILITY_LENGTH)]) / VOLATILITY_LENGTH as f64;

        let window = &volty_sum[i.saturating_sub(VOLATILITY_AVERAGE_LENGTH)..=i];
        let avg_volty = window.iter().sum::<f64>() / window.len() as f64;
        let rel_volty = if avg_volty == 0.0 {
            0.0
        } else {
            volty[i] / avg_volty
        };
        let ratio = rel_volty.min(max_ratio).max(1.0);

        // Bands contract toward price faster when volatility is high
        let band_k = band_beta.powf(ratio.powf(pow1).sqrt());
        upper = if del_upper > 0.0 {
            price
        } else {
            price - band_k * del_upper
        };
        lower = if del_lower < 0.0 {
            price
        } else {
            price - band_k * del_lower
        };

        let alpha = beta.powf(ratio.powf(pow1 * power / 2.0));

        ma1 = (1.0 - alpha) * price + alpha * ma1;
        det0 = (price - ma1) * (1.0 - beta) + beta * det0;
        let ma2 = ma1 + phase_ratio * det0;
        det1 = (ma2 - out[i - 1]) * (1.0 - alpha).powi(2) + alpha.powi(2) * det1;
        out[i] = out[i - 1] + det1;
    }

    IndicatorSeries::with_warmup(period, out.split_off(period))
}
