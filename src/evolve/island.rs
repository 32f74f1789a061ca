//! Per-category sub-populations for the island model.

use serde::{Deserialize, Serialize};

use crate::schema::StrategyId;

use super::rng::EvolveRng;
use super::store::StrategyStore;

/// One evolutionary island: a category, its full history, and the subset of
/// strategies currently holding an archive niche for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Island {
    /// Island identifier (index into the database's island list).
    pub id: usize,
    /// Strategy category this island explores.
    pub category: String,
    /// Every strategy ever attributed to this island, append-only.
    population: Vec<StrategyId>,
    /// Strategies currently occupying an archive niche for this island.
    elites: Vec<StrategyId>,
}

impl Island {
    /// Create an empty island.
    pub fn new(id: usize, category: impl Into<String>) -> Self {
        Self {
            id,
            category: category.into(),
            population: Vec::new(),
            elites: Vec::new(),
        }
    }

    /// Append a strategy to the population, and to the elites when it won
    /// an archive niche.
    pub fn add(&mut self, id: StrategyId, is_elite: bool) {
        self.population.push(id);
        if is_elite {
            self.elites.push(id);
        }
    }

    /// Record that an already-known strategy won an archive niche.
    pub fn promote(&mut self, id: StrategyId) {
        self.elites.push(id);
    }

    /// Append a migrant to the population only. Migration never touches the
    /// elite set.
    pub fn receive_migrant(&mut self, id: StrategyId) {
        self.population.push(id);
    }

    /// Full population, in admission order.
    pub fn population(&self) -> &[StrategyId] {
        &self.population
    }

    /// Current elites, in promotion order.
    pub fn elites(&self) -> &[StrategyId] {
        &self.elites
    }

    /// Top `n` elites by combined score, descending.
    pub fn best_n(&self, n: usize, store: &StrategyStore) -> Vec<StrategyId> {
        let mut sorted = self.elites.clone();
        sorted.sort_by(|a, b| store.score(*b).total_cmp(&store.score(*a)));
        sorted.truncate(n);
        sorted
    }

    /// Uniform draw from the elites, None when empty.
    pub fn sample_elite(&self, rng: &mut EvolveRng) -> Option<StrategyId> {
        rng.choose(&self.elites).copied()
    }

    /// Uniform draw from the full population, None when empty.
    pub fn sample_population(&self, rng: &mut EvolveRng) -> Option<StrategyId> {
        rng.choose(&self.population).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Strategy, StrategyMetrics, keys};

    fn scored(store: &mut StrategyStore, sharpe: f64) -> StrategyId {
        let mut metrics = StrategyMetrics::new();
        metrics.set(keys::SHARPE_RATIO, sharpe);
        store.insert(Strategy::new("h", "c", metrics, 0, 0, None))
    }

    #[test]
    fn test_add_and_elite_tracking() {
        let mut store = StrategyStore::new();
        let mut island = Island::new(0, "momentum");

        let a = scored(&mut store, 1.0);
        let b = scored(&mut store, 2.0);
        island.add(a, true);
        island.add(b, false);

        assert_eq!(island.population().len(), 2);
        assert_eq!(island.elites(), &[a]);

        island.promote(b);
        assert_eq!(island.elites(), &[a, b]);
    }

    #[test]
    fn test_best_n_sorted_descending() {
        let mut store = StrategyStore::new();
        let mut island = Island::new(0, "momentum");

        let low = scored(&mut store, 0.5);
        let high = scored(&mut store, 3.0);
        let mid = scored(&mut store, 1.5);
        for id in [low, high, mid] {
            island.add(id, true);
        }

        assert_eq!(island.best_n(2, &store), vec![high, mid]);
        assert_eq!(island.best_n(10, &store).len(), 3);
    }

    #[test]
    fn test_sampling_empty_sources() {
        let island = Island::new(0, "momentum");
        let mut rng = EvolveRng::new(1);
        assert!(island.sample_elite(&mut rng).is_none());
        assert!(island.sample_population(&mut rng).is_none());
    }

    #[test]
    fn test_population_sampling_with_empty_elites() {
        let mut island = Island::new(0, "momentum");
        for i in 0..5 {
            island.add(StrategyId(i), false);
        }
        let mut rng = EvolveRng::new(3);
        for _ in 0..1000 {
            let drawn = island.sample_population(&mut rng).unwrap();
            assert!(island.population().contains(&drawn));
        }
        assert!(island.sample_elite(&mut rng).is_none());
    }

    #[test]
    fn test_migrant_never_joins_elites() {
        let mut island = Island::new(1, "breakout");
        island.receive_migrant(StrategyId(9));
        assert_eq!(island.population(), &[StrategyId(9)]);
        assert!(island.elites().is_empty());
    }
}
