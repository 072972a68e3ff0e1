//! CSV candle loading.
//!
//! Expected header: `open,high,low,close,volume,close_time[,trade_count]`.
//! `close_time` is epoch milliseconds; `timestamp` is accepted as an alias.
//! Rows must be in ascending time order.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use candlewise_core::domain::Candle;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CandleRow {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    #[serde(alias = "timestamp")]
    close_time: i64,
    #[serde(default)]
    trade_count: u64,
}

impl From<CandleRow> for Candle {
    fn from(row: CandleRow) -> Self {
        Candle {
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
            close_time: row.close_time,
            trade_count: row.trade_count,
        }
    }
}

pub fn load_candles(path: &Path) -> Result<Vec<Candle>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open candles file {}", path.display()))?;
    read_candles(file).with_context(|| format!("failed to read candles from {}", path.display()))
}

pub fn read_candles(reader: impl Read) -> Result<Vec<Candle>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut candles: Vec<Candle> = Vec::new();
    for (i, row) in rdr.deserialize::<CandleRow>().enumerate() {
        let candle: Candle = row.with_context(|| format!("row {}", i + 1))?.into();
        if let Some(prev) = candles.last() {
            if candle.close_time <= prev.close_time {
                bail!(
                    "row {}: close_time {} is not after the previous row ({})",
                    i + 1,
                    candle.close_time,
                    prev.close_time
                );
            }
        }
        if !candle.is_sane() {
            tracing::warn!(row = i + 1, close_time = candle.close_time, "malformed candle");
        }
        candles.push(candle);
    }

    tracing::info!(count = candles.len(), "loaded candles");
    Ok(candles)
}
