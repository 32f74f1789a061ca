//! Append-only arena owning every strategy for the life of the process.
//!
//! Archive cells and island collections hold [`StrategyId`] keys into this
//! store rather than owned copies, so one strategy can appear in an island's
//! history and an archive niche at the same time without aliasing.

use serde::{Deserialize, Serialize};

use crate::schema::{Strategy, StrategyId};

/// Arena of all strategies ever created, keyed by sequential ids.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StrategyStore {
    strategies: Vec<Strategy>,
}

impl StrategyStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a strategy, assigning its id.
    pub fn insert(&mut self, mut strategy: Strategy) -> StrategyId {
        let id = StrategyId(self.strategies.len() as u64);
        strategy.id = id;
        self.strategies.push(strategy);
        id
    }

    /// Look up a strategy by id.
    pub fn get(&self, id: StrategyId) -> Option<&Strategy> {
        self.strategies.get(id.0 as usize)
    }

    /// Combined score of a strategy, or negative infinity for a dangling id.
    /// Dangling ids cannot arise from store-assigned keys.
    pub fn score(&self, id: StrategyId) -> f64 {
        self.get(id).map_or(f64::NEG_INFINITY, |s| s.combined_score)
    }

    /// Number of strategies ever inserted.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Iterate over all strategies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Strategy> {
        self.strategies.iter()
    }
}
