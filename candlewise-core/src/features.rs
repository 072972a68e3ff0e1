//! Feature assembly for an external model.
//!
//! `FeatureConfig` names which features are enabled and with what periods.
//! `FeatureAssembler` reads the last value of each enabled feature in a
//! fixed declaration order. The engine never interprets these values.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::components::indicator::Indicator;
use crate::config::{ConfigError, IndicatorSpec};
use crate::domain::{Candle, PriceSource};
use crate::indicators::{AdxLine, AroonLine, BollingerLine, MacdLine, MaKind};
use crate::structure::{RangeBands, RangePosition};

/// One switch per feature, all on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    pub rsi: bool,
    pub rmi: bool,
    pub aroon: bool,
    pub momentum: bool,
    pub awesome: bool,
    pub volume_oscillator: bool,
    pub macd_histogram: bool,
    pub adx: bool,
    pub atr_percent: bool,
    pub bollinger_percent_b: bool,
    pub supertrend_distance: bool,
    pub range_band: bool,
}

impl FeatureToggles {
    pub fn all() -> Self {
        Self {
            rsi: true,
            rmi: true,
            aroon: true,
            momentum: true,
            awesome: true,
            volume_oscillator: true,
            macd_histogram: true,
            adx: true,
            atr_percent: true,
            bollinger_percent_b: true,
            supertrend_distance: true,
            range_band: true,
        }
    }

    pub fn none() -> Self {
        Self {
            rsi: false,
            rmi: false,
            aroon: false,
            momentum: false,
            awesome: false,
            volume_oscillator: false,
            macd_histogram: false,
            adx: false,
            atr_percent: false,
            bollinger_percent_b: false,
            supertrend_distance: false,
            range_band: false,
        }
    }
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self::all()
    }
}

/// Toggles plus the parameters behind each feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub enabled: FeatureToggles,
    pub rsi_period: usize,
    pub rmi_period: usize,
    pub rmi_momentum: usize,
    pub aroon_period: usize,
    pub momentum_period: usize,
    pub awesome_fast: usize,
    pub awesome_slow: usize,
    /// Smoothing length for momentum and the Awesome Oscillator.
    pub smoothing: usize,
    pub smoothing_ma: MaKind,
    pub volume_short: usize,
    pub volume_long: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub adx_period: usize,
    pub atr_period: usize,
    pub bollinger_period: usize,
    pub bollinger_multiplier: f64,
    pub supertrend_period: usize,
    pub supertrend_multiplier: f64,
    pub range_lookback: usize,
    pub range_bands: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            enabled: FeatureToggles::default(),
            rsi_period: 14,
            rmi_period: 14,
            rmi_momentum: 3,
            aroon_period: 25,
            momentum_period: 10,
            awesome_fast: 5,
            awesome_slow: 34,
            smoothing: 5,
            smoothing_ma: MaKind::Sma,
            volume_short: 5,
            volume_long: 10,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            adx_period: 14,
            atr_period: 14,
            bollinger_period: 20,
            bollinger_multiplier: 2.0,
            supertrend_period: 10,
            supertrend_multiplier: 3.0,
            range_lookback: 50,
            range_bands: 10,
        }
    }
}

impl FeatureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.assembler().map(|_| ())
    }

    /// Build every enabled feature.
    pub fn assembler(&self) -> Result<FeatureAssembler, ConfigError> {
        let on = self.enabled;
        let mut features = Vec::new();

        let mut push = |enabled: bool,
                        name: &'static str,
                        spec: IndicatorSpec,
                        kind: FeatureKind|
         -> Result<(), ConfigError> {
            if enabled {
                features.push(Feature {
                    name,
                    indicator: Some(spec.build()?),
                    kind,
                });
            }
            Ok(())
        };

        push(
            on.rsi,
            "rsi",
            IndicatorSpec::Rsi {
                period: self.rsi_period,
                source: PriceSource::Close,
            },
            FeatureKind::Raw,
        )?;
        push(
            on.rmi,
            "rmi",
            IndicatorSpec::Rmi {
                period: self.rmi_period,
                momentum: self.rmi_momentum,
            },
            FeatureKind::Raw,
        )?;
        push(
            on.aroon,
            "aroon",
            IndicatorSpec::Aroon {
                period: self.aroon_period,
                line: AroonLine::Oscillator,
            },
            FeatureKind::Raw,
        )?;
        push(
            on.momentum,
            "momentum",
            IndicatorSpec::Momentum {
                period: self.momentum_period,
                smoothing: self.smoothing,
                ma: self.smoothing_ma,
            },
            FeatureKind::Raw,
        )?;
        push(
            on.awesome,
            "awesome",
            IndicatorSpec::Awesome {
                fast: self.awesome_fast,
                slow: self.awesome_slow,
                smoothing: self.smoothing,
                ma: self.smoothing_ma,
            },
            FeatureKind::Raw,
        )?;
        push(
            on.volume_oscillator,
            "volume_oscillator",
            IndicatorSpec::VolumeOscillator {
                short: self.volume_short,
                long: self.volume_long,
            },
            FeatureKind::Raw,
        )?;
        push(
            on.macd_histogram,
            "macd_histogram",
            IndicatorSpec::Macd {
                fast: self.macd_fast,
                slow: self.macd_slow,
                signal: self.macd_signal,
                line: MacdLine::Histogram,
            },
            FeatureKind::Raw,
        )?;
        push(
            on.adx,
            "adx",
            IndicatorSpec::Adx {
                period: self.adx_period,
                line: AdxLine::Adx,
            },
            FeatureKind::Raw,
        )?;
        push(
            on.atr_percent,
            "atr_percent",
            IndicatorSpec::Atr {
                period: self.atr_period,
            },
            FeatureKind::PercentOfClose,
        )?;
        push(
            on.bollinger_percent_b,
            "bollinger_percent_b",
            IndicatorSpec::Bollinger {
                period: self.bollinger_period,
                multiplier: self.bollinger_multiplier,
                line: BollingerLine::PercentB,
            },
            FeatureKind::Raw,
        )?;
        push(
            on.supertrend_distance,
            "supertrend_distance",
            IndicatorSpec::Supertrend {
                period: self.supertrend_period,
                multiplier: self.supertrend_multiplier,
            },
            FeatureKind::DistanceFromClose,
        )?;

        if on.range_band {
            let checks = [("lookback", self.range_lookback), ("bands", self.range_bands)];
            for (parameter, value) in checks {
                if value == 0 {
                    return Err(ConfigError::InvalidPeriod {
                        indicator: "range_band",
                        parameter,
                        value,
                    });
                }
            }
            features.push(Feature {
                name: "range_band",
                indicator: None,
                kind: FeatureKind::RangeBand {
                    lookback: self.range_lookback,
                    bands: self.range_bands,
                },
            });
        }

        Ok(FeatureAssembler { features })
    }
}

#[derive(Debug, Clone, Copy)]
enum FeatureKind {
    /// Last indicator value as-is.
    Raw,
    /// Indicator as a percentage of the close.
    PercentOfClose,
    /// Close minus indicator, as a percentage of the close.
    DistanceFromClose,
    /// Band holding the close within the recent high/low range.
    /// `-1` below the range, `bands` above it.
    RangeBand { lookback: usize, bands: usize },
}

struct Feature {
    name: &'static str,
    indicator: Option<Box<dyn Indicator>>,
    kind: FeatureKind,
}

impl Feature {
    fn value(&self, candles: &[Candle]) -> Option<f64> {
        let close = candles.last()?.close;
        match self.kind {
            FeatureKind::Raw => self.latest(candles),
            FeatureKind::PercentOfClose => self.latest(candles).map(|v| v / close * 100.0),
            FeatureKind::DistanceFromClose => {
                self.latest(candles).map(|v| (close - v) / close * 100.0)
            }
            FeatureKind::RangeBand { lookback, bands } => {
                let range = RangeBands::from_candles(candles, lookback, bands)?;
                Some(match range.classify(close)? {
                    RangePosition::Below => -1.0,
                    RangePosition::Band(i) => i as f64,
                    RangePosition::Above => bands as f64,
                })
            }
        }
    }

    fn latest(&self, candles: &[Candle]) -> Option<f64> {
        self.indicator.as_ref()?.calculate(candles).last()
    }

    fn warmup(&self) -> usize {
        match self.kind {
            FeatureKind::RangeBand { lookback, .. } => lookback,
            _ => self.indicator.as_ref().map_or(0, |i| i.lookback() + 1),
        }
    }
}

/// Built feature set, reusable across candle windows.
pub struct FeatureAssembler {
    features: Vec<Feature>,
}

impl FeatureAssembler {
    pub fn names(&self) -> Vec<&'static str> {
        self.features.iter().map(|f| f.name).collect()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Candles needed before every enabled feature is defined.
    pub fn warmup(&self) -> usize {
        self.features.iter().map(Feature::warmup).max().unwrap_or(0)
    }

    /// Latest value of every enabled feature, or `None` if any is absent.
    pub fn assemble(&self, candles: &[Candle]) -> Option<FeatureVector> {
        let mut entries = Vec::with_capacity(self.features.len());
        for feature in &self.features {
            match feature.value(candles) {
                Some(value) => entries.push((feature.name, value)),
                None => {
                    tracing::trace!(
                        feature = feature.name,
                        candles = candles.len(),
                        "feature absent"
                    );
                    return None;
                }
            }
        }
        Some(FeatureVector { entries })
    }
}

/// Ordered `(name, value)` pairs. Serializes as a JSON object in order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(&'static str, f64)>,
}

impl FeatureVector {
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
