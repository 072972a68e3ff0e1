//! Candlewise CLI: run the indicator and signal engine over CSV candles.
//!
//! Commands:
//! - `indicators`: compute every configured indicator series
//! - `signals`: evaluate every configured rule on the latest candles, or replay history
//! - `features`: assemble the feature vector for the latest candle
//! - `pivots`: zigzag pivots, support/resistance levels, retracement and range bands
//!
//! Results are written to stdout as JSON; logs go to stderr.

mod data;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use candlewise_core::components::signal::Signal;
use candlewise_core::config::EngineConfig;
use candlewise_core::domain::Candle;
use candlewise_core::features::FeatureVector;
use candlewise_core::structure::{
    Deviation, Level, LevelMap, LevelParams, Pivot, RangeBands, RangePosition, Retracement,
    Zigzag, ZigzagState,
};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "candlewise",
    about = "Candlewise CLI: indicators, signals and market structure from CSV candles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Input {
    /// CSV file with open,high,low,close,volume,close_time[,trade_count].
    #[arg(long)]
    candles: PathBuf,

    /// Engine config (TOML). Defaults to an empty config.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every configured indicator.
    Indicators {
        #[command(flatten)]
        input: Input,

        /// Only print the last N values of each series.
        #[arg(long)]
        tail: Option<usize>,
    },
    /// Evaluate every configured signal rule.
    Signals {
        #[command(flatten)]
        input: Input,

        /// Replay the whole history and list every buy/sell event.
        #[arg(long, default_value_t = false)]
        replay: bool,
    },
    /// Assemble the feature vector for the latest candle.
    Features {
        #[command(flatten)]
        input: Input,
    },
    /// Detect pivots and derived structure.
    Pivots {
        /// CSV candles file.
        #[arg(long)]
        candles: PathBuf,

        #[command(flatten)]
        deviation: DeviationArgs,

        /// Level clustering tolerance, percent of the cluster's lowest price.
        #[arg(long, default_value_t = 0.5)]
        tolerance: f64,

        /// Minimum pivots per level.
        #[arg(long, default_value_t = 2)]
        min_strength: usize,

        /// Number of range bands.
        #[arg(long, default_value_t = 10)]
        bands: usize,

        /// Candles spanned by the range bands. Defaults to all.
        #[arg(long)]
        range_lookback: Option<usize>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct DeviationArgs {
    /// Reversal threshold as a percentage of the pivot price.
    #[arg(long)]
    percent: Option<f64>,

    /// Reversal threshold as a fixed price distance.
    #[arg(long)]
    absolute: Option<f64>,

    /// Reversal threshold as ATR multiples: PERIOD,MULTIPLIER.
    #[arg(long, value_delimiter = ',', value_name = "PERIOD,MULTIPLIER")]
    atr: Option<Vec<f64>>,
}

impl DeviationArgs {
    fn to_deviation(&self) -> Result<Deviation> {
        let deviation = match (self.percent, self.absolute, self.atr.as_deref()) {
            (Some(percent), None, None) => Deviation::Percent { percent },
            (None, Some(distance), None) => Deviation::Absolute { distance },
            (None, None, Some(atr)) => {
                let &[period, multiplier] = atr else {
                    bail!("--atr takes PERIOD,MULTIPLIER, got {} values", atr.len());
                };
                if period < 1.0 || period.fract() != 0.0 {
                    bail!("--atr period must be a positive integer, got {period}");
                }
                Deviation::Atr {
                    period: period as usize,
                    multiplier,
                }
            }
            _ => bail!("exactly one of --percent, --absolute or --atr is required"),
        };
        let positive = match deviation {
            Deviation::Percent { percent } => percent,
            Deviation::Absolute { distance } => distance,
            Deviation::Atr { multiplier, .. } => multiplier,
        };
        if !(positive.is_finite() && positive > 0.0) {
            bail!("zigzag deviation must be a finite value > 0, got {positive}");
        }
        Ok(deviation)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Indicators { input, tail } => run_indicators(&input, tail),
        Commands::Signals { input, replay } => run_signals(&input, replay),
        Commands::Features { input } => run_features(&input),
        Commands::Pivots {
            candles,
            deviation,
            tolerance,
            min_strength,
            bands,
            range_lookback,
        } => run_pivots(
            &candles,
            deviation.to_deviation()?,
            LevelParams {
                tolerance_pct: tolerance,
                min_strength,
            },
            bands,
            range_lookback,
        ),
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────

fn load(input: &Input) -> Result<(Vec<Candle>, EngineConfig)> {
    let candles = data::load_candles(&input.candles)?;
    let config = match &input.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("invalid engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    Ok((candles, config))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// RFC 3339 close time, if representable.
fn close_time(candle: &Candle) -> Option<String> {
    candle.close_datetime().map(|t| t.to_rfc3339())
}

// ─── Indicators ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct SeriesReport<'a> {
    name: &'a str,
    lookback: usize,
    defined: usize,
    values: Vec<Option<f64>>,
}

fn run_indicators(input: &Input, tail: Option<usize>) -> Result<()> {
    let (candles, config) = load(input)?;
    let indicators = config.build_indicators()?;
    if indicators.is_empty() {
        bail!("config lists no [[indicators]]");
    }

    let reports: Vec<SeriesReport> = indicators
        .par_iter()
        .map(|indicator| {
            let series = indicator.calculate(&candles);
            let skip = tail.map_or(0, |n| series.len().saturating_sub(n));
            SeriesReport {
                name: indicator.name(),
                lookback: indicator.lookback(),
                defined: series.defined_count(),
                values: series.as_slice()[skip..].to_vec(),
            }
        })
        .collect();

    print_json(&reports)
}

// ─── Signals ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct VerdictReport<'a> {
    rule: &'a str,
    warmup: usize,
    verdict: Option<Signal>,
}

#[derive(Serialize)]
struct SignalEvent<'a> {
    index: usize,
    time: Option<String>,
    close: f64,
    rule: &'a str,
    signal: Signal,
}

fn run_signals(input: &Input, replay: bool) -> Result<()> {
    let (candles, config) = load(input)?;
    let rules = config.build_signals()?;
    if rules.is_empty() {
        bail!("config lists no [[signals]]");
    }

    if !replay {
        let reports: Vec<VerdictReport> = rules
            .par_iter()
            .map(|rule| VerdictReport {
                rule: rule.name(),
                warmup: rule.warmup(),
                verdict: rule.evaluate(&candles),
            })
            .collect();
        return print_json(&reports);
    }

    let mut events: Vec<SignalEvent> = rules
        .par_iter()
        .flat_map_iter(|rule| {
            let candles = &candles;
            (rule.warmup().max(2)..=candles.len()).filter_map(move |end| {
                let signal = rule.evaluate(&candles[..end])?;
                if signal == Signal::Neutral {
                    return None;
                }
                let last = &candles[end - 1];
                Some(SignalEvent {
                    index: end - 1,
                    time: close_time(last),
                    close: last.close,
                    rule: rule.name(),
                    signal,
                })
            })
        })
        .collect();
    events.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.rule.cmp(b.rule)));
    tracing::info!(events = events.len(), rules = rules.len(), "replay complete");

    print_json(&events)
}

// ─── Features ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct FeatureReport {
    index: usize,
    time: Option<String>,
    warmup: usize,
    features: Option<FeatureVector>,
}

fn run_features(input: &Input) -> Result<()> {
    let (candles, config) = load(input)?;
    let assembler = config.features.assembler()?;
    let Some(last) = candles.last() else {
        bail!("no candles in {}", input.candles.display());
    };

    let features = assembler.assemble(&candles);
    if features.is_none() {
        tracing::warn!(
            candles = candles.len(),
            warmup = assembler.warmup(),
            "not enough history for every enabled feature"
        );
    }

    print_json(&FeatureReport {
        index: candles.len() - 1,
        time: close_time(last),
        warmup: assembler.warmup(),
        features,
    })
}

// ─── Pivots ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct RangeReport {
    anchor: f64,
    width: f64,
    count: usize,
    last_close: Option<RangePosition>,
    relative_position: f64,
    occupancy: Vec<usize>,
}

#[derive(Serialize)]
struct PivotReport<'a> {
    deviation: Deviation,
    state: ZigzagState,
    pivots: &'a [Pivot],
    levels: &'a [Level],
    retracement: Option<Retracement>,
    retracement_depth: Option<f64>,
    range: Option<RangeReport>,
}

fn run_pivots(
    path: &Path,
    deviation: Deviation,
    level_params: LevelParams,
    bands: usize,
    range_lookback: Option<usize>,
) -> Result<()> {
    if level_params.tolerance_pct.is_nan() || level_params.tolerance_pct < 0.0 {
        bail!("--tolerance must be >= 0, got {}", level_params.tolerance_pct);
    }
    if bands == 0 {
        bail!("--bands must be >= 1");
    }
    let candles = data::load_candles(path)?;
    let Some(last) = candles.last() else {
        bail!("no candles in {}", path.display());
    };

    let scan = Zigzag::new(deviation).scan(&candles);
    let levels = LevelMap::from_pivots(&scan.pivots, level_params);
    let retracement = Retracement::from_pivots(&scan.pivots);
    let retracement_depth = retracement.as_ref().and_then(|r| r.depth(last.close));

    let window = range_lookback.unwrap_or(candles.len()).min(candles.len());
    let window_candles = &candles[candles.len() - window..];
    let range = RangeBands::from_candles(&candles, window, bands).map(|range| RangeReport {
        anchor: range.anchor(),
        width: range.width(),
        count: range.count(),
        last_close: range.classify(last.close),
        relative_position: range.relative_position(last.close),
        occupancy: range.occupancy(window_candles),
    });

    tracing::info!(
        pivots = scan.pivots.len(),
        levels = levels.len(),
        "structure scan complete"
    );

    print_json(&PivotReport {
        deviation,
        state: scan.state,
        pivots: &scan.pivots,
        levels: levels.levels(),
        retracement,
        retracement_depth,
        range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn pivots_requires_one_deviation() {
        let cli = Cli::try_parse_from(["candlewise", "pivots", "--candles", "c.csv"]);
        assert!(cli.is_err());
        let cli = Cli::try_parse_from([
            "candlewise",
            "pivots",
            "--candles",
            "c.csv",
            "--percent",
            "2",
            "--absolute",
            "3",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn atr_deviation_parses_pair() {
        let cli = Cli::try_parse_from([
            "candlewise",
            "pivots",
            "--candles",
            "c.csv",
            "--atr",
            "14,2.5",
        ])
        .unwrap();
        let Commands::Pivots { deviation, .. } = cli.command else {
            panic!("expected pivots command");
        };
        assert_eq!(
            deviation.to_deviation().unwrap(),
            Deviation::Atr {
                period: 14,
                multiplier: 2.5
            }
        );
    }

    #[test]
    fn non_positive_deviation_is_rejected() {
        let args = DeviationArgs {
            percent: Some(0.0),
            absolute: None,
            atr: None,
        };
        assert!(args.to_deviation().is_err());
        let args = DeviationArgs {
            percent: None,
            absolute: None,
            atr: Some(vec![2.5, 1.0]),
        };
        assert!(args.to_deviation().is_err());
    }

    #[test]
    fn signals_takes_config_and_replay() {
        let cli = Cli::try_parse_from([
            "candlewise",
            "signals",
            "--candles",
            "c.csv",
            "--config",
            "engine.toml",
            "--replay",
        ])
        .unwrap();
        match cli.command {
            Commands::Signals { input, replay } => {
                assert!(replay);
                assert_eq!(input.config, Some(PathBuf::from("engine.toml")));
            }
            _ => panic!("expected signals command"),
        }
    }
}
