//! Candlewise Core: indicators, structural detectors and crossing signals.
//!
//! This crate computes everything a trading decision layer consumes:
//! - Domain types (candles, aligned indicator series)
//! - Moving averages, oscillators, trend and volatility indicators
//! - Zigzag pivots with support/resistance, retracement and range bands
//! - Stateless buy/sell rules built on crossing primitives
//! - TOML configuration, a component factory and feature assembly
//!
//! Nothing here places orders or keeps state between calls.

pub mod components;
pub mod config;
pub mod domain;
pub mod features;
pub mod indicators;
pub mod structure;
