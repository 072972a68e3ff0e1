//! End-to-end scenarios: TOML config in, verdicts and structure out.
//!
//! Tests:
//! 1. RSI threshold verdicts on hand-checked closes (sell, buy, neutral, none)
//! 2. Moving-average golden and death crosses from config
//! 3. Signal verdicts are `None` until warm-up, then defined
//! 4. Zigzag -> support/resistance -> retracement -> range bands pipeline
//! 5. Feature vector assembled from the same config

use candlewise_core::components::signal::{Signal, SignalRule};
use candlewise_core::config::EngineConfig;
use candlewise_core::domain::Candle;
use candlewise_core::structure::{
    LevelMap, LevelParams, PivotKind, RangeBands, RangePosition, Retracement, Zigzag, ZigzagState,
};

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

/// Candles whose open is the previous close and whose range pads the body by 1.
fn make_candles(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle {
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
                close_time: 1_704_153_600_000 + i as i64 * 60_000,
                trade_count: 10,
            }
        })
        .collect()
}

/// Candles from `(high, low)` pairs with open and close at the midpoint.
fn make_range_candles(ranges: &[(f64, f64)]) -> Vec<Candle> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, &(high, low))| {
            let mid = (high + low) / 2.0;
            Candle {
                open: mid,
                high,
                low,
                close: mid,
                volume: 500.0,
                close_time: 1_704_153_600_000 + i as i64 * 60_000,
                trade_count: 5,
            }
        })
        .collect()
}

const ASCENDING: [f64; 15] = [
    44.0, 44.3, 44.1, 43.6, 44.0, 44.3, 45.0, 45.1, 45.2, 45.5, 45.1, 45.6, 46.1, 46.8, 47.2,
];

fn rsi_rule() -> Box<dyn SignalRule> {
    let config = EngineConfig::from_toml_str("[[signals]]\ntype = \"rsi_threshold\"\n").unwrap();
    config.build_signals().unwrap().remove(0)
}

// ──────────────────────────────────────────────
// 1. RSI thresholds
// ──────────────────────────────────────────────

#[test]
fn rsi_single_value_gives_no_verdict() {
    let rule = rsi_rule();
    assert_eq!(rule.evaluate(&make_candles(&ASCENDING)), None);
}

#[test]
fn rsi_falling_from_overbought_sells() {
    let mut closes = ASCENDING.to_vec();
    closes.push(46.0);
    assert_eq!(rsi_rule().evaluate(&make_candles(&closes)), Some(Signal::Sell));
}

#[test]
fn rsi_recovering_from_oversold_buys() {
    let mut closes: Vec<f64> = ASCENDING.iter().rev().copied().collect();
    closes.push(45.5);
    assert_eq!(rsi_rule().evaluate(&make_candles(&closes)), Some(Signal::Buy));
}

#[test]
fn rsi_lingering_oversold_is_neutral() {
    let mut closes: Vec<f64> = ASCENDING.iter().rev().copied().collect();
    closes.push(44.0);
    assert_eq!(rsi_rule().evaluate(&make_candles(&closes)), Some(Signal::Neutral));
}

#[test]
fn rsi_levels_are_configurable() {
    // With the sell level lowered to 60, a drop to 64.25 no longer crosses it
    let config = EngineConfig::from_toml_str(
        "[[signals]]\ntype = \"rsi_threshold\"\nsell_level = 60.0\n",
    )
    .unwrap();
    let rule = config.build_signals().unwrap().remove(0);
    let mut closes = ASCENDING.to_vec();
    closes.push(46.0);
    assert_eq!(rule.evaluate(&make_candles(&closes)), Some(Signal::Neutral));
}

// ──────────────────────────────────────────────
// 2. Moving-average crosses
// ──────────────────────────────────────────────

const MA_CROSS: &str = r#"
[[signals]]
type = "ma_cross"
kind = "sma"
fast = 1
slow = 3
"#;

#[test]
fn golden_and_death_cross() {
    let rule = EngineConfig::from_toml_str(MA_CROSS)
        .unwrap()
        .build_signals()
        .unwrap()
        .remove(0);

    let up = make_candles(&[100.0, 100.0, 100.0, 100.0, 106.0]);
    assert_eq!(rule.evaluate(&up), Some(Signal::Buy));

    let down = make_candles(&[100.0, 100.0, 100.0, 100.0, 94.0]);
    assert_eq!(rule.evaluate(&down), Some(Signal::Sell));

    let flat = make_candles(&[100.0; 5]);
    assert_eq!(rule.evaluate(&flat), Some(Signal::Neutral));
}

// ──────────────────────────────────────────────
// 3. Warm-up
// ──────────────────────────────────────────────

const ALL_SIGNALS: &str = r#"
[[signals]]
type = "rsi_threshold"

[[signals]]
type = "rmi_threshold"

[[signals]]
type = "momentum_zero"

[[signals]]
type = "awesome_zero"

[[signals]]
type = "volume_zero"

[[signals]]
type = "macd_cross"

[[signals]]
type = "aroon_cross"

[[signals]]
type = "di_cross"

[[signals]]
type = "cloud_cross"

[[signals]]
type = "supertrend_cross"

[[signals]]
type = "bollinger_reversion"
"#;

#[test]
fn every_rule_is_undecided_before_warmup_and_decided_after() {
    let rules = EngineConfig::from_toml_str(ALL_SIGNALS)
        .unwrap()
        .build_signals()
        .unwrap();
    assert_eq!(rules.len(), 11);

    let closes: Vec<f64> = (0..120)
        .map(|i| 100.0 + 8.0 * (i as f64 * 0.2).sin() + 0.05 * i as f64)
        .collect();
    let candles = make_candles(&closes);

    for rule in &rules {
        let warmup = rule.warmup();
        assert!(warmup >= 2, "{}", rule.name());
        assert_eq!(
            rule.evaluate(&candles[..warmup - 1]),
            None,
            "{} decided before warm-up",
            rule.name()
        );
        assert!(
            rule.evaluate(&candles[..warmup]).is_some(),
            "{} undecided at warm-up",
            rule.name()
        );
    }
}

// ──────────────────────────────────────────────
// 4. Structure pipeline
// ──────────────────────────────────────────────

/// Double bottom near 90 and double top near 110, then a pullback.
fn double_bottom() -> Vec<Candle> {
    make_range_candles(&[
        (101.0, 99.0),
        (104.0, 95.0),
        (100.0, 90.0),
        (106.0, 98.0),
        (110.0, 104.0),
        (108.0, 100.0),
        (103.0, 90.2),
        (108.0, 99.0),
        (110.3, 105.0),
        (107.0, 100.0),
        (104.0, 99.0),
    ])
}

#[test]
fn structure_pipeline() {
    let candles = double_bottom();
    let scan = Zigzag::absolute(5.0).scan(&candles);

    let summary: Vec<(usize, f64, PivotKind)> =
        scan.confirmed().map(|p| (p.index, p.price, p.kind)).collect();
    assert_eq!(
        summary,
        vec![
            (1, 104.0, PivotKind::High),
            (2, 90.0, PivotKind::Low),
            (4, 110.0, PivotKind::High),
            (6, 90.2, PivotKind::Low),
            (8, 110.3, PivotKind::High),
        ]
    );
    let provisional = scan.provisional().unwrap();
    assert_eq!((provisional.index, provisional.price), (10, 99.0));
    assert_eq!(scan.state, ZigzagState::TrackingDown);

    // 90 / 90.2 and 110 / 110.3 cluster; the lone 104 high is too weak
    let levels = LevelMap::from_pivots(&scan.pivots, LevelParams::default());
    assert_eq!(levels.len(), 2);
    let support = levels.nearest_support(99.0).unwrap();
    assert!((support.price - 90.1).abs() < 1e-9);
    assert_eq!((support.lows, support.highs), (2, 0));
    let resistance = levels.nearest_resistance(99.0).unwrap();
    assert!((resistance.price - 110.15).abs() < 1e-9);
    assert_eq!(resistance.highs, 2);

    // Retracement of the last swing 90.2 -> 110.3
    let fib = Retracement::from_pivots(&scan.pivots).unwrap();
    assert_eq!(fib.older.index, 6);
    assert_eq!(fib.newer.index, 8);
    assert!((fib.level(0.5).unwrap() - 100.25).abs() < 1e-9);
    assert_eq!(fib.depth(99.0), Some(0.5));

    // Four bands over 90..110.3
    let bands = RangeBands::from_candles(&candles, candles.len(), 4).unwrap();
    assert!((bands.width() - 5.075).abs() < 1e-9);
    assert_eq!(bands.classify(99.0), Some(RangePosition::Band(1)));
    assert_eq!(bands.classify(110.3), Some(RangePosition::Band(3)));
    assert_eq!(bands.classify(89.0), Some(RangePosition::Below));
}

// ──────────────────────────────────────────────
// 5. Features
// ──────────────────────────────────────────────

#[test]
fn feature_vector_from_config() {
    let config = EngineConfig::from_toml_str(
        r#"
[features]
range_lookback = 20

[features.enabled]
awesome = false
macd_histogram = false
"#,
    )
    .unwrap();
    let assembler = config.features.assembler().unwrap();
    assert_eq!(assembler.len(), 10);

    let closes: Vec<f64> = (0..80).map(|i| 50.0 + (i as f64 * 0.4).cos() * 3.0).collect();
    let vector = assembler.assemble(&make_candles(&closes)).unwrap();
    assert_eq!(vector.len(), 10);
    assert!(vector.get("awesome").is_none());
    assert!(vector.get("adx").is_some());
    assert_eq!(vector.names().next(), Some("rsi"));
}
