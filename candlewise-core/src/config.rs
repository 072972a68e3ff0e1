//! Serializable engine configuration.
//!
//! An `EngineConfig` lists the indicators to compute, the signal rules to
//! evaluate and the feature set to assemble. It is read from TOML:
//!
//! ```toml
//! [[indicators]]
//! type = "rsi"
//! period = 14
//!
//! [[signals]]
//! type = "rsi_threshold"
//! buy_level = 30.0
//!
//! [features.enabled]
//! adx = false
//! ```
//!
//! Every spec is validated before any indicator is constructed, so the
//! asserting constructors never see bad parameters coming from a file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::components::factory::{create_indicator, create_signal};
use crate::components::indicator::Indicator;
use crate::components::signal::threshold::{RSI_BUY_LEVEL, RSI_SELL_LEVEL};
use crate::components::signal::SignalRule;
use crate::domain::PriceSource;
use crate::features::FeatureConfig;
use crate::indicators::{AdxLine, AroonLine, BollingerLine, CloudLine, MacdLine, MaKind};

// ─── Error type ──────────────────────────────────────────────────────

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{indicator}: {parameter} must be >= 1, got {value}")]
    InvalidPeriod {
        indicator: &'static str,
        parameter: &'static str,
        value: usize,
    },
    #[error("{indicator}: invalid {parameter}: {reason}")]
    InvalidParameter {
        indicator: &'static str,
        parameter: &'static str,
        reason: String,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ─── Defaults ────────────────────────────────────────────────────────

fn d_14() -> usize {
    14
}
fn d_3() -> usize {
    3
}
fn d_5() -> usize {
    5
}
fn d_9() -> usize {
    9
}
fn d_10() -> usize {
    10
}
fn d_12() -> usize {
    12
}
fn d_20() -> usize {
    20
}
fn d_25() -> usize {
    25
}
fn d_26() -> usize {
    26
}
fn d_34() -> usize {
    34
}
fn d_52() -> usize {
    52
}
fn d_power() -> f64 {
    2.0
}
fn d_bollinger_mult() -> f64 {
    2.0
}
fn d_supertrend_mult() -> f64 {
    3.0
}
fn d_rsi_buy() -> f64 {
    RSI_BUY_LEVEL
}
fn d_rsi_sell() -> f64 {
    RSI_SELL_LEVEL
}
fn d_aroon_line() -> AroonLine {
    AroonLine::Oscillator
}
fn d_macd_line() -> MacdLine {
    MacdLine::Macd
}
fn d_adx_line() -> AdxLine {
    AdxLine::Adx
}
fn d_bollinger_line() -> BollingerLine {
    BollingerLine::Middle
}
fn d_cloud_line() -> CloudLine {
    CloudLine::Conversion
}

// ─── Indicator specs ─────────────────────────────────────────────────

/// One indicator to compute (serializable enum).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IndicatorSpec {
    /// A candle field as-is.
    Price {
        #[serde(default)]
        source: PriceSource,
    },
    MovingAverage {
        kind: MaKind,
        period: usize,
        #[serde(default)]
        source: PriceSource,
        /// JMA only.
        #[serde(default)]
        phase: f64,
        /// JMA only.
        #[serde(default = "d_power")]
        power: f64,
    },
    Rsi {
        #[serde(default = "d_14")]
        period: usize,
        #[serde(default)]
        source: PriceSource,
    },
    Rmi {
        #[serde(default = "d_14")]
        period: usize,
        #[serde(default = "d_3")]
        momentum: usize,
    },
    Aroon {
        #[serde(default = "d_25")]
        period: usize,
        #[serde(default = "d_aroon_line")]
        line: AroonLine,
    },
    Momentum {
        #[serde(default = "d_10")]
        period: usize,
        #[serde(default = "d_5")]
        smoothing: usize,
        #[serde(default)]
        ma: MaKind,
    },
    Awesome {
        #[serde(default = "d_5")]
        fast: usize,
        #[serde(default = "d_34")]
        slow: usize,
        #[serde(default = "d_5")]
        smoothing: usize,
        #[serde(default)]
        ma: MaKind,
    },
    VolumeOscillator {
        #[serde(default = "d_5")]
        short: usize,
        #[serde(default = "d_10")]
        long: usize,
    },
    Macd {
        #[serde(default = "d_12")]
        fast: usize,
        #[serde(default = "d_26")]
        slow: usize,
        #[serde(default = "d_9")]
        signal: usize,
        #[serde(default = "d_macd_line")]
        line: MacdLine,
    },
    Atr {
        #[serde(default = "d_14")]
        period: usize,
    },
    Adx {
        #[serde(default = "d_14")]
        period: usize,
        #[serde(default = "d_adx_line")]
        line: AdxLine,
    },
    Bollinger {
        #[serde(default = "d_20")]
        period: usize,
        #[serde(default = "d_bollinger_mult")]
        multiplier: f64,
        #[serde(default = "d_bollinger_line")]
        line: BollingerLine,
    },
    Supertrend {
        #[serde(default = "d_10")]
        period: usize,
        #[serde(default = "d_supertrend_mult")]
        multiplier: f64,
    },
    Cloud {
        #[serde(default = "d_9")]
        conversion: usize,
        #[serde(default = "d_26")]
        base: usize,
        #[serde(default = "d_52")]
        span_b: usize,
        #[serde(default = "d_26")]
        displacement: usize,
        #[serde(default = "d_cloud_line")]
        line: CloudLine,
    },
}

impl IndicatorSpec {
    pub fn build(&self) -> Result<Box<dyn Indicator>, ConfigError> {
        create_indicator(self)
    }
}

// ─── Signal specs ────────────────────────────────────────────────────

/// One signal rule to evaluate (serializable enum).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalSpec {
    RsiThreshold {
        #[serde(default = "d_14")]
        period: usize,
        #[serde(default = "d_rsi_buy")]
        buy_level: f64,
        #[serde(default = "d_rsi_sell")]
        sell_level: f64,
    },
    RmiThreshold {
        #[serde(default = "d_14")]
        period: usize,
        #[serde(default = "d_3")]
        momentum: usize,
        #[serde(default = "d_rsi_buy")]
        buy_level: f64,
        #[serde(default = "d_rsi_sell")]
        sell_level: f64,
    },
    /// Smoothed momentum crossing zero.
    MomentumZero {
        #[serde(default = "d_10")]
        period: usize,
        #[serde(default = "d_5")]
        smoothing: usize,
        #[serde(default)]
        ma: MaKind,
    },
    /// Smoothed Awesome Oscillator crossing zero.
    AwesomeZero {
        #[serde(default = "d_5")]
        fast: usize,
        #[serde(default = "d_34")]
        slow: usize,
        #[serde(default = "d_5")]
        smoothing: usize,
        #[serde(default)]
        ma: MaKind,
    },
    /// Volume oscillator crossing zero.
    VolumeZero {
        #[serde(default = "d_5")]
        short: usize,
        #[serde(default = "d_10")]
        long: usize,
    },
    MacdCross {
        #[serde(default = "d_12")]
        fast: usize,
        #[serde(default = "d_26")]
        slow: usize,
        #[serde(default = "d_9")]
        signal: usize,
    },
    AroonCross {
        #[serde(default = "d_25")]
        period: usize,
    },
    /// +DI crossing -DI.
    DiCross {
        #[serde(default = "d_14")]
        period: usize,
    },
    /// Cloud conversion line crossing the base line.
    CloudCross {
        #[serde(default = "d_9")]
        conversion: usize,
        #[serde(default = "d_26")]
        base: usize,
    },
    MaCross {
        kind: MaKind,
        fast: usize,
        slow: usize,
        #[serde(default)]
        source: PriceSource,
    },
    /// Close crossing the Supertrend line.
    SupertrendCross {
        #[serde(default = "d_10")]
        period: usize,
        #[serde(default = "d_supertrend_mult")]
        multiplier: f64,
    },
    BollingerReversion {
        #[serde(default = "d_20")]
        period: usize,
        #[serde(default = "d_bollinger_mult")]
        multiplier: f64,
    },
    /// Any indicator against fixed levels.
    Threshold {
        indicator: Box<IndicatorSpec>,
        buy_level: f64,
        sell_level: f64,
    },
    /// Any two indicators against each other.
    Cross {
        fast: Box<IndicatorSpec>,
        slow: Box<IndicatorSpec>,
    },
}

impl SignalSpec {
    pub fn build(&self) -> Result<Box<dyn SignalRule>, ConfigError> {
        create_signal(self)
    }
}

// ─── Engine config ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub indicators: Vec<IndicatorSpec>,
    #[serde(default)]
    pub signals: Vec<SignalSpec>,
    #[serde(default)]
    pub features: FeatureConfig,
}

impl EngineConfig {
    /// Parse and validate.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check every spec without keeping the built objects.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_indicators()?;
        self.build_signals()?;
        self.features.validate()
    }

    pub fn build_indicators(&self) -> Result<Vec<Box<dyn Indicator>>, ConfigError> {
        self.indicators.iter().map(IndicatorSpec::build).collect()
    }

    pub fn build_signals(&self) -> Result<Vec<Box<dyn SignalRule>>, ConfigError> {
        self.signals.iter().map(SignalSpec::build).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[indicators]]
type = "moving_average"
kind = "hma"
period = 9
source = "hl2"

[[indicators]]
type = "rsi"

[[indicators]]
type = "cloud"
line = "span_a"

[[signals]]
type = "rsi_threshold"

[[signals]]
type = "ma_cross"
kind = "jma"
fast = 7
slow = 21

[[signals]]
type = "threshold"
buy_level = -50.0
sell_level = 50.0
indicator = { type = "aroon", period = 14 }

[features]
rsi_period = 21

[features.enabled]
adx = false
"#;

    #[test]
    fn parses_sample_with_defaults() {
        let config = EngineConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.indicators.len(), 3);
        assert_eq!(
            config.indicators[1],
            IndicatorSpec::Rsi {
                period: 14,
                source: PriceSource::Close
            }
        );
        assert_eq!(
            config.signals[0],
            SignalSpec::RsiThreshold {
                period: 14,
                buy_level: 35.0,
                sell_level: 75.0
            }
        );
        assert_eq!(config.features.rsi_period, 21);
        assert!(!config.features.enabled.adx);
        assert!(config.features.enabled.rsi);
    }

    #[test]
    fn builds_named_objects() {
        let config = EngineConfig::from_toml_str(SAMPLE).unwrap();
        let names: Vec<String> = config
            .build_indicators()
            .unwrap()
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        assert_eq!(names, vec!["hma_9_hl2", "rsi_14", "cloud_span_a_9_26_52_26"]);

        let signals = config.build_signals().unwrap();
        assert_eq!(signals[0].name(), "rsi_14_threshold");
        assert_eq!(signals[2].name(), "aroon_osc_14_threshold");
    }

    #[test]
    fn zero_period_is_rejected() {
        let err = EngineConfig::from_toml_str("[[indicators]]\ntype = \"atr\"\nperiod = 0\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPeriod {
                indicator: "atr",
                value: 0,
                ..
            }
        ));
    }

    #[test]
    fn inverted_fast_slow_is_rejected() {
        let text = "[[signals]]\ntype = \"macd_cross\"\nfast = 30\nslow = 26\n";
        let err = EngineConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { .. }));
        assert!(err.to_string().contains("macd"));
    }

    #[test]
    fn unknown_type_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("[[indicators]]\ntype = \"vwap\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EngineConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn empty_config_is_valid() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert!(config.indicators.is_empty());
        assert_eq!(config.features, FeatureConfig::default());
    }
}
