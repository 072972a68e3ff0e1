//! Support/resistance levels from clustered pivots.
//!
//! Confirmed pivots are sorted by price and grouped greedily: a pivot joins
//! the current cluster while it lies within `tolerance_pct` of the cluster's
//! anchor (its lowest price). The level price is the cluster mean and its
//! strength the number of pivots in it.

use serde::{Deserialize, Serialize};

use crate::structure::zigzag::{Pivot, PivotKind};

/// A horizontal price level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub price: f64,
    /// Number of pivots in the cluster.
    pub strength: usize,
    /// Pivot highs in the cluster (resistance touches).
    pub highs: usize,
    /// Pivot lows in the cluster (support touches).
    pub lows: usize,
    /// Index of the most recent pivot in the cluster.
    pub last_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelParams {
    pub tolerance_pct: f64,
    pub min_strength: usize,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            tolerance_pct: 0.5,
            min_strength: 2,
        }
    }
}

/// Levels sorted by ascending price.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LevelMap {
    levels: Vec<Level>,
}

impl LevelMap {
    /// Cluster the confirmed pivots; provisional pivots are ignored.
    pub fn from_pivots(pivots: &[Pivot], params: LevelParams) -> Self {
        assert!(params.tolerance_pct >= 0.0, "level tolerance must be >= 0");

        let mut sorted: Vec<&Pivot> = pivots
            .iter()
            .filter(|p| p.confirmed && p.price.is_finite())
            .collect();
        sorted.sort_by(|a, b| a.price.total_cmp(&b.price));

        let mut levels = Vec::new();
        let mut cluster: Vec<&Pivot> = Vec::new();
        for pivot in sorted {
            if let Some(anchor) = cluster.first() {
                let reach = anchor.price.abs() * params.tolerance_pct / 100.0;
                if pivot.price - anchor.price > reach {
                    levels.extend(summarize(&cluster, params.min_strength));
                    cluster.clear();
                }
            }
            cluster.push(pivot);
        }
        levels.extend(summarize(&cluster, params.min_strength));

        Self { levels }
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Highest level at or below `price`.
    pub fn nearest_support(&self, price: f64) -> Option<&Level> {
        self.levels.iter().rev().find(|l| l.price <= price)
    }

    /// Lowest level at or above `price`.
    pub fn nearest_resistance(&self, price: f64) -> Option<&Level> {
        self.levels.iter().find(|l| l.price >= price)
    }

    pub fn strongest(&self) -> Option<&Level> {
        self.levels.iter().max_by_key(|l| l.strength)
    }
}

fn summarize(cluster: &[&Pivot], min_strength: usize) -> Option<Level> {
    if cluster.is_empty() || cluster.len() < min_strength {
        return None;
    }
    let strength = cluster.len();
    let highs = cluster.iter().filter(|p| p.kind == PivotKind::High).count();
    Some(Level {
        price: cluster.iter().map(|p| p.price).sum::<f64>() / strength as f64,
        strength,
        highs,
        lows: strength - highs,
        last_index: cluster.iter().map(|p| p.index).max().unwrap_or(0),
    })
}
