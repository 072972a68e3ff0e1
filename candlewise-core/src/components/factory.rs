//! Factory system: converts `IndicatorSpec` / `SignalSpec` into runtime
//! trait objects.
//!
//! Parameters are checked here and reported as `ConfigError`; the
//! constructors behind each arm assert the same conditions.

use crate::config::{ConfigError, IndicatorSpec, SignalSpec};
use crate::indicators::{
    Adx, Aroon, Atr, Bollinger, Cloud, CloudParams, Macd, MaKind, MovingAverage, Price, Rmi, Rsi,
    SmoothedAwesome, SmoothedMomentum, Supertrend, VolumeOscillator,
};

use super::indicator::Indicator;
use super::signal::{BandReversion, LineCross, SignalRule, ThresholdCross};

// ─── Helpers ─────────────────────────────────────────────────────────

/// Reject a zero period.
fn period(
    indicator: &'static str,
    parameter: &'static str,
    value: usize,
) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidPeriod {
            indicator,
            parameter,
            value,
        });
    }
    Ok(value)
}

/// Require `slow > fast`, both non-zero.
fn fast_slow(indicator: &'static str, fast: usize, slow: usize) -> Result<(), ConfigError> {
    period(indicator, "fast", fast)?;
    period(indicator, "slow", slow)?;
    if slow <= fast {
        return Err(ConfigError::InvalidParameter {
            indicator,
            parameter: "slow",
            reason: format!("must be > fast ({fast}), got {slow}"),
        });
    }
    Ok(())
}

/// Require a finite, strictly positive value.
fn positive(
    indicator: &'static str,
    parameter: &'static str,
    value: f64,
) -> Result<f64, ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidParameter {
            indicator,
            parameter,
            reason: format!("must be a finite value > 0, got {value}"),
        });
    }
    Ok(value)
}

fn finite(
    indicator: &'static str,
    parameter: &'static str,
    value: f64,
) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidParameter {
            indicator,
            parameter,
            reason: format!("must be finite, got {value}"),
        });
    }
    Ok(value)
}

fn levels(indicator: &'static str, buy_level: f64, sell_level: f64) -> Result<(), ConfigError> {
    finite(indicator, "buy_level", buy_level)?;
    finite(indicator, "sell_level", sell_level)?;
    Ok(())
}

fn cloud_params(
    conversion: usize,
    base: usize,
    span_b: usize,
    displacement: usize,
) -> Result<CloudParams, ConfigError> {
    Ok(CloudParams {
        conversion: period("cloud", "conversion", conversion)?,
        base: period("cloud", "base", base)?,
        span_b: period("cloud", "span_b", span_b)?,
        displacement,
    })
}

// ─── Indicator factory ───────────────────────────────────────────────

/// Create an indicator from an `IndicatorSpec`.
pub fn create_indicator(spec: &IndicatorSpec) -> Result<Box<dyn Indicator>, ConfigError> {
    let indicator: Box<dyn Indicator> = match *spec {
        IndicatorSpec::Price { source } => Box::new(Price::new(source)),
        IndicatorSpec::MovingAverage {
            kind,
            period: p,
            source,
            phase,
            power,
        } => {
            let p = period("moving_average", "period", p)?;
            if kind == MaKind::Jma {
                let phase = finite("moving_average", "phase", phase)?;
                let power = positive("moving_average", "power", power)?;
                Box::new(MovingAverage::jma(p, phase, power, source))
            } else {
                Box::new(MovingAverage::new(kind, p, source))
            }
        }
        IndicatorSpec::Rsi { period: p, source } => {
            Box::new(Rsi::with_source(period("rsi", "period", p)?, source))
        }
        IndicatorSpec::Rmi {
            period: p,
            momentum,
        } => Box::new(Rmi::new(
            period("rmi", "period", p)?,
            period("rmi", "momentum", momentum)?,
        )),
        IndicatorSpec::Aroon { period: p, line } => {
            Box::new(Aroon::new(period("aroon", "period", p)?, line))
        }
        IndicatorSpec::Momentum {
            period: p,
            smoothing,
            ma,
        } => Box::new(SmoothedMomentum::new(
            period("momentum", "period", p)?,
            period("momentum", "smoothing", smoothing)?,
            ma,
        )),
        IndicatorSpec::Awesome {
            fast,
            slow,
            smoothing,
            ma,
        } => {
            fast_slow("awesome", fast, slow)?;
            let smoothing = period("awesome", "smoothing", smoothing)?;
            Box::new(SmoothedAwesome::new(fast, slow, smoothing, ma))
        }
        IndicatorSpec::VolumeOscillator { short, long } => {
            fast_slow("volume_oscillator", short, long)?;
            Box::new(VolumeOscillator::new(short, long))
        }
        IndicatorSpec::Macd {
            fast,
            slow,
            signal,
            line,
        } => {
            fast_slow("macd", fast, slow)?;
            let signal = period("macd", "signal", signal)?;
            Box::new(Macd::new(fast, slow, signal, line))
        }
        IndicatorSpec::Atr { period: p } => Box::new(Atr::new(period("atr", "period", p)?)),
        IndicatorSpec::Adx { period: p, line } => {
            Box::new(Adx::new(period("adx", "period", p)?, line))
        }
        IndicatorSpec::Bollinger {
            period: p,
            multiplier,
            line,
        } => Box::new(Bollinger::new(
            period("bollinger", "period", p)?,
            positive("bollinger", "multiplier", multiplier)?,
            line,
        )),
        IndicatorSpec::Supertrend {
            period: p,
            multiplier,
        } => Box::new(Supertrend::new(
            period("supertrend", "period", p)?,
            positive("supertrend", "multiplier", multiplier)?,
        )),
        IndicatorSpec::Cloud {
            conversion,
            base,
            span_b,
            displacement,
            line,
        } => Box::new(Cloud::new(
            cloud_params(conversion, base, span_b, displacement)?,
            line,
        )),
    };
    tracing::debug!(
        indicator = indicator.name(),
        lookback = indicator.lookback(),
        "built indicator"
    );
    Ok(indicator)
}

// ─── Signal factory ──────────────────────────────────────────────────

/// Create a signal rule from a `SignalSpec`.
pub fn create_signal(spec: &SignalSpec) -> Result<Box<dyn SignalRule>, ConfigError> {
    let rule: Box<dyn SignalRule> = match *spec {
        SignalSpec::RsiThreshold {
            period: p,
            buy_level,
            sell_level,
        } => {
            levels("rsi", buy_level, sell_level)?;
            Box::new(ThresholdCross::new(
                Box::new(Rsi::new(period("rsi", "period", p)?)),
                buy_level,
                sell_level,
            ))
        }
        SignalSpec::RmiThreshold {
            period: p,
            momentum,
            buy_level,
            sell_level,
        } => {
            levels("rmi", buy_level, sell_level)?;
            Box::new(ThresholdCross::rmi(
                period("rmi", "period", p)?,
                period("rmi", "momentum", momentum)?,
                buy_level,
                sell_level,
            ))
        }
        SignalSpec::MomentumZero {
            period: p,
            smoothing,
            ma,
        } => Box::new(ThresholdCross::momentum(
            period("momentum", "period", p)?,
            period("momentum", "smoothing", smoothing)?,
            ma,
        )),
        SignalSpec::AwesomeZero {
            fast,
            slow,
            smoothing,
            ma,
        } => {
            fast_slow("awesome", fast, slow)?;
            let smoothing = period("awesome", "smoothing", smoothing)?;
            Box::new(ThresholdCross::awesome(fast, slow, smoothing, ma))
        }
        SignalSpec::VolumeZero { short, long } => {
            fast_slow("volume_oscillator", short, long)?;
            Box::new(ThresholdCross::volume(short, long))
        }
        SignalSpec::MacdCross { fast, slow, signal } => {
            fast_slow("macd", fast, slow)?;
            Box::new(LineCross::macd(fast, slow, period("macd", "signal", signal)?))
        }
        SignalSpec::AroonCross { period: p } => {
            Box::new(LineCross::aroon(period("aroon", "period", p)?))
        }
        SignalSpec::DiCross { period: p } => {
            Box::new(LineCross::directional(period("adx", "period", p)?))
        }
        SignalSpec::CloudCross { conversion, base } => {
            let defaults = CloudParams::default();
            Box::new(LineCross::cloud(cloud_params(
                conversion,
                base,
                defaults.span_b,
                defaults.displacement,
            )?))
        }
        SignalSpec::MaCross {
            kind,
            fast,
            slow,
            source,
        } => {
            fast_slow("ma_cross", fast, slow)?;
            Box::new(LineCross::moving_average(kind, fast, slow, source))
        }
        SignalSpec::SupertrendCross {
            period: p,
            multiplier,
        } => Box::new(LineCross::supertrend(
            period("supertrend", "period", p)?,
            positive("supertrend", "multiplier", multiplier)?,
        )),
        SignalSpec::BollingerReversion {
            period: p,
            multiplier,
        } => Box::new(BandReversion::bollinger(
            period("bollinger", "period", p)?,
            positive("bollinger", "multiplier", multiplier)?,
        )),
        SignalSpec::Threshold {
            ref indicator,
            buy_level,
            sell_level,
        } => {
            levels("threshold", buy_level, sell_level)?;
            Box::new(ThresholdCross::new(
                create_indicator(indicator)?,
                buy_level,
                sell_level,
            ))
        }
        SignalSpec::Cross { ref fast, ref slow } => Box::new(LineCross::new(
            create_indicator(fast)?,
            create_indicator(slow)?,
        )),
    };
    tracing::debug!(rule = rule.name(), warmup = rule.warmup(), "built signal rule");
    Ok(rule)
}

// ─── Tests ───────────────────────────────────────────────────────────
