//! Evolutionary database: the orchestrator owning the feature map, the
//! islands and the strategy arena.
//!
//! One database instance is mutated by one logical thread of control per
//! generation step. All randomness flows through the owned, seedable RNG so
//! a run is reproducible from its seed.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::schema::{
    ConfigError, CousinParams, DimensionKind, DimensionSpec, EvolveConfig, Strategy, StrategyId,
};

use super::feature_map::{FeatureMap, FeatureMapStats};
use super::insight::{self, Insight};
use super::island::Island;
use super::rng::EvolveRng;
use super::store::StrategyStore;

/// Category label of the reserved extra island.
pub const BENCHMARK_CATEGORY: &str = "benchmark";

const SNAPSHOT_VERSION: u32 = 1;
const DATABASE_FILE: &str = "database.json";
const FEATURE_MAP_FILE: &str = "feature_map.json";

/// Orchestrator state: archive, islands, rejected pool, insight log and
/// generation counter, persisted as one atomic snapshot.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvolutionaryDatabase {
    snapshot_version: u32,
    categories: Vec<String>,
    store: StrategyStore,
    feature_map: FeatureMap,
    islands: Vec<Island>,
    rejected: Vec<StrategyId>,
    insights: Vec<Insight>,
    generation: usize,
    rng_seed: u64,
    #[serde(skip)]
    rng: EvolveRng,
}

impl EvolutionaryDatabase {
    /// Create an uninitialized database from a validated configuration.
    pub fn new(config: &EvolveConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng_seed = config.random_seed.unwrap_or_else(rand::random);
        info!(
            "Creating evolutionary database: {} islands, seed {rng_seed}",
            config.num_islands()
        );
        Ok(Self {
            snapshot_version: SNAPSHOT_VERSION,
            categories: config.categories.clone(),
            store: StrategyStore::new(),
            feature_map: FeatureMap::new(config.dimensions.clone()),
            islands: Vec::new(),
            rejected: Vec::new(),
            insights: Vec::new(),
            generation: 0,
            rng_seed,
            rng: EvolveRng::new(rng_seed),
        })
    }

    /// Initialize the islands from seed strategies, one per island
    /// (categories plus the reserved benchmark island). Each seed becomes
    /// its island's sole initial elite and is inserted into the archive.
    pub fn initialize_islands(&mut self, seeds: Vec<Strategy>) -> Result<(), DatabaseError> {
        if !self.islands.is_empty() {
            return Err(DatabaseError::AlreadyInitialized);
        }
        let expected = self.categories.len() + 1;
        if seeds.len() != expected {
            return Err(DatabaseError::SeedCountMismatch {
                expected,
                actual: seeds.len(),
            });
        }

        let categories: Vec<String> = self
            .categories
            .iter()
            .cloned()
            .chain(std::iter::once(BENCHMARK_CATEGORY.to_string()))
            .collect();

        for (island_id, (category, mut seed)) in categories.into_iter().zip(seeds).enumerate() {
            seed.island_id = island_id;
            let vector = self.feature_map.feature_vector(&seed.metrics);
            seed.feature_vector = Some(vector.clone());
            let score = seed.combined_score;

            let id = self.store.insert(seed);
            let mut island = Island::new(island_id, &category);
            island.add(id, true);
            self.islands.push(island);

            self.feature_map.add(id, score, &vector);
            info!("Initialized island {island_id} for category '{category}'");
        }
        Ok(())
    }

    /// Add a generated strategy to its island and attempt archive
    /// admission. Returns whether the strategy won a niche.
    pub fn add_strategy(
        &mut self,
        mut strategy: Strategy,
        island_id: usize,
    ) -> Result<bool, DatabaseError> {
        self.check_island(island_id)?;
        strategy.island_id = island_id;
        if strategy.feature_vector.is_none() {
            strategy.feature_vector = Some(self.feature_map.feature_vector(&strategy.metrics));
        }
        let vector = strategy
            .feature_vector
            .clone()
            .unwrap_or_default();
        let score = strategy.combined_score;

        let id = self.store.insert(strategy);
        self.islands[island_id].add(id, false);

        let accepted = self.feature_map.add(id, score, &vector);
        if accepted {
            self.islands[island_id].promote(id);
            debug!("{id} admitted to the archive from island {island_id}");
        } else {
            self.rejected.push(id);
            debug!("{id} rejected from the archive");
        }
        Ok(accepted)
    }

    /// Sample a parent from an island: with probability `alpha` uniformly
    /// from its elites (exploitation), otherwise uniformly from its entire
    /// population (exploration). None when the chosen source is empty;
    /// the caller should skip this island for the current cycle.
    pub fn sample_parent(
        &mut self,
        island_id: usize,
        alpha: f64,
    ) -> Result<Option<StrategyId>, DatabaseError> {
        self.check_island(island_id)?;
        let island = &self.islands[island_id];
        let parent = if self.rng.chance(alpha) {
            island.sample_elite(&mut self.rng)
        } else {
            island.sample_population(&mut self.rng)
        };
        Ok(parent)
    }

    /// Sample cousin strategies related to a parent: top elites, archive
    /// neighbors found by perturbing the parent's feature vector, and random
    /// population members. The parent is never included; fewer cousins than
    /// requested are returned when the pools are too small.
    pub fn sample_cousins(
        &mut self,
        parent_id: StrategyId,
        island_id: usize,
        params: &CousinParams,
    ) -> Result<Vec<StrategyId>, DatabaseError> {
        self.check_island(island_id)?;
        let parent = self
            .store
            .get(parent_id)
            .ok_or(DatabaseError::UnknownStrategy(parent_id))?;
        let parent_vector = parent.feature_vector.clone();

        let mut cousins = Vec::new();

        // Best cousins: oversample the top elites so the parent can be
        // filtered out without starving the result.
        let mut best = self.islands[island_id].best_n(params.num_best * 2, &self.store);
        best.retain(|id| *id != parent_id);
        best.truncate(params.num_best);
        cousins.extend(best);

        // Diverse cousins: perturb the parent's niche coordinates and look
        // up the resulting cells, within a bounded attempt budget.
        if let Some(vector) = parent_vector {
            let mut diverse: Vec<StrategyId> = Vec::new();
            for _ in 0..params.num_diverse * 3 {
                if diverse.len() >= params.num_diverse {
                    break;
                }
                let perturbed = perturb_vector(
                    &mut self.rng,
                    self.feature_map.dimensions(),
                    &vector,
                    params.sigma,
                    params.bitflip_rate,
                );
                if let Some(entry) = self.feature_map.get(&perturbed)
                    && entry.id != parent_id
                    && !diverse.contains(&entry.id)
                {
                    diverse.push(entry.id);
                }
            }
            cousins.extend(diverse);
        }

        // Random cousins: uniform without replacement from the population.
        let pool: Vec<StrategyId> = self.islands[island_id]
            .population()
            .iter()
            .copied()
            .filter(|id| *id != parent_id)
            .collect();
        cousins.extend(
            self.rng
                .choose_multiple(&pool, params.num_random)
                .into_iter()
                .copied(),
        );

        debug!(
            "Sampled {} cousins for parent {parent_id} on island {island_id}",
            cousins.len()
        );
        Ok(cousins)
    }

    /// Migrate the top `num_migrants` elites of every island into every
    /// other island's population. Gene flow only: migrants never enter the
    /// destination's elite set and keep their generation numbers.
    pub fn migrate(&mut self, num_migrants: usize) {
        let migrants: Vec<Vec<StrategyId>> = self
            .islands
            .iter()
            .map(|island| island.best_n(num_migrants, &self.store))
            .collect();

        for target in 0..self.islands.len() {
            for (source, ids) in migrants.iter().enumerate() {
                if source == target {
                    continue;
                }
                for id in ids {
                    self.islands[target].receive_migrant(*id);
                }
            }
        }
        info!(
            "Migrated up to {num_migrants} strategies between {} islands",
            self.islands.len()
        );
    }

    /// Record an insight at the current generation. `source_score` is the
    /// combined score of the strategy that produced it (0.0 when unknown).
    pub fn add_insight(&mut self, island_id: usize, text: impl Into<String>, source_score: f64) {
        self.insights.push(Insight {
            text: text.into(),
            generation: self.generation,
            island_id,
            source_score,
        });
    }

    /// The last `n` insights, fewer if the log is shorter.
    pub fn recent_insights(&self, n: usize) -> &[Insight] {
        let start = self.insights.len().saturating_sub(n);
        &self.insights[start..]
    }

    /// Curate each island's insights once its count exceeds
    /// `max_per_island`, trimming to `keep` entries by weighted score with
    /// a diversity filter.
    pub fn curate_insights(&mut self, max_per_island: usize, keep: usize) {
        for island_id in 0..self.islands.len() {
            let count = self
                .insights
                .iter()
                .filter(|i| i.island_id == island_id)
                .count();
            if count <= max_per_island {
                continue;
            }

            info!(
                "Curating {count} insights for island {island_id} ({})",
                self.islands[island_id].category
            );
            let (mine, rest): (Vec<Insight>, Vec<Insight>) = std::mem::take(&mut self.insights)
                .into_iter()
                .partition(|i| i.island_id == island_id);
            let curated = insight::curate(mine, self.generation, keep);
            self.insights = rest;
            self.insights.extend(curated);
        }
    }

    /// Set the current generation counter.
    pub fn set_generation(&mut self, generation: usize) {
        self.generation = generation;
    }

    /// Increment the generation counter, returning the new value.
    pub fn advance_generation(&mut self) -> usize {
        self.generation += 1;
        self.generation
    }

    /// Current generation.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The strategy arena.
    pub fn store(&self) -> &StrategyStore {
        &self.store
    }

    /// The niche archive.
    pub fn feature_map(&self) -> &FeatureMap {
        &self.feature_map
    }

    /// All islands.
    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// Strategies that never won a niche.
    pub fn rejected(&self) -> &[StrategyId] {
        &self.rejected
    }

    /// All recorded insights.
    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    /// Top `n` archive occupants by combined score, descending.
    pub fn top_strategies(&self, n: usize) -> Vec<&Strategy> {
        let mut occupants: Vec<&Strategy> = self
            .feature_map
            .occupied()
            .filter_map(|cell| self.store.get(cell.id))
            .collect();
        occupants.sort_by(|a, b| b.combined_score.total_cmp(&a.combined_score));
        occupants.truncate(n);
        occupants
    }

    /// Aggregate statistics: archive stats plus per-island counts.
    pub fn statistics(&self) -> DatabaseStats {
        let islands = self
            .islands
            .iter()
            .map(|island| {
                let elites = island.elites();
                let (mean_score, max_score, best) = if elites.is_empty() {
                    (None, None, None)
                } else {
                    let scores: Vec<f64> = elites.iter().map(|id| self.store.score(*id)).collect();
                    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
                    let (best_idx, max) = scores
                        .iter()
                        .enumerate()
                        .fold((0, f64::NEG_INFINITY), |acc, (i, s)| {
                            if *s > acc.1 { (i, *s) } else { acc }
                        });
                    (Some(mean), Some(max), Some(elites[best_idx]))
                };
                IslandStats {
                    id: island.id,
                    category: island.category.clone(),
                    population: island.population().len(),
                    elites: elites.len(),
                    mean_score,
                    max_score,
                    best,
                }
            })
            .collect();

        DatabaseStats {
            generation: self.generation,
            num_islands: self.islands.len(),
            total_strategies: self.islands.iter().map(|i| i.population().len()).sum(),
            total_elites: self.islands.iter().map(|i| i.elites().len()).sum(),
            total_rejected: self.rejected.len(),
            num_insights: self.insights.len(),
            feature_map: self.feature_map.statistics(),
            islands,
        }
    }

    /// Write an atomic snapshot of the full database plus a standalone
    /// archive snapshot for lighter inspection.
    pub fn save(&self, directory: &Path) -> Result<(), PersistError> {
        fs::create_dir_all(directory)?;
        write_atomic(
            &directory.join(DATABASE_FILE),
            &serde_json::to_vec_pretty(self)?,
        )?;
        write_atomic(
            &directory.join(FEATURE_MAP_FILE),
            &serde_json::to_vec_pretty(&self.feature_map)?,
        )?;
        info!("Saved evolutionary database to {}", directory.display());
        Ok(())
    }

    /// Reconstruct a database from a snapshot directory. The RNG stream
    /// restarts from the stored seed; `statistics()` round-trips
    /// bit-identically.
    pub fn load(directory: &Path) -> Result<Self, PersistError> {
        let content = fs::read_to_string(directory.join(DATABASE_FILE))?;
        let mut database: Self = serde_json::from_str(&content)?;
        if database.snapshot_version != SNAPSHOT_VERSION {
            return Err(PersistError::UnsupportedVersion(database.snapshot_version));
        }
        database.rng = EvolveRng::new(database.rng_seed);
        info!("Loaded evolutionary database from {}", directory.display());
        Ok(database)
    }

    fn check_island(&self, island_id: usize) -> Result<(), DatabaseError> {
        if self.islands.is_empty() {
            return Err(DatabaseError::NotInitialized);
        }
        if island_id >= self.islands.len() {
            return Err(DatabaseError::UnknownIsland(island_id));
        }
        Ok(())
    }
}

/// Perturb a feature vector to find nearby niches: Gaussian bin shift on
/// continuous dimensions, bit flips on categorical ones.
fn perturb_vector(
    rng: &mut EvolveRng,
    dimensions: &[DimensionSpec],
    vector: &[usize],
    sigma: f64,
    bitflip_rate: f64,
) -> Vec<usize> {
    vector
        .iter()
        .zip(dimensions)
        .map(|(v, dim)| match dim.kind {
            DimensionKind::Continuous => {
                let drawn = rng.normal(*v as f64, sigma).floor();
                drawn.clamp(0.0, (dim.bins - 1) as f64) as usize
            }
            DimensionKind::CategoricalBits => {
                let num_bits = if dim.bins > 1 {
                    (dim.bins as f64).log2() as usize
                } else {
                    1
                };
                let flips = ((num_bits as f64 * bitflip_rate) as usize).max(1);
                let mut value = *v as u64;
                for _ in 0..flips {
                    value ^= 1 << rng.index(num_bits);
                }
                (value % dim.bins as u64) as usize
            }
        })
        .collect()
}

/// Atomic file replacement: write to a sibling temp file, then rename.
/// Handles are released on every path.
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

/// Structural errors in orchestrator usage.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Islands are already initialized")]
    AlreadyInitialized,
    #[error("Islands are not initialized yet")]
    NotInitialized,
    #[error("Expected {expected} seed strategies (one per island), got {actual}")]
    SeedCountMismatch { expected: usize, actual: usize },
    #[error("Unknown island {0}")]
    UnknownIsland(usize),
    #[error("Unknown strategy {0}")]
    UnknownStrategy(crate::schema::StrategyId),
}

/// Snapshot persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
}

/// Aggregate orchestrator statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseStats {
    /// Current generation.
    pub generation: usize,
    /// Number of islands.
    pub num_islands: usize,
    /// Sum of island population sizes.
    pub total_strategies: usize,
    /// Sum of island elite counts.
    pub total_elites: usize,
    /// Size of the rejected pool.
    pub total_rejected: usize,
    /// Size of the insight log.
    pub num_insights: usize,
    /// Archive statistics.
    pub feature_map: FeatureMapStats,
    /// Per-island statistics.
    pub islands: Vec<IslandStats>,
}

/// Per-island statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IslandStats {
    /// Island identifier.
    pub id: usize,
    /// Island category.
    pub category: String,
    /// Full population size.
    pub population: usize,
    /// Elite count.
    pub elites: usize,
    /// Mean elite score, when elites exist.
    pub mean_score: Option<f64>,
    /// Best elite score, when elites exist.
    pub max_score: Option<f64>,
    /// Id of the best elite, when elites exist.
    pub best: Option<StrategyId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EvolveConfig, StrategyMetrics, keys};
    use tempfile::tempdir;

    fn test_config() -> EvolveConfig {
        EvolveConfig {
            dimensions: vec![
                DimensionSpec::continuous(keys::NUM_TRADES, 4, 0.0, 4.0),
                DimensionSpec::continuous(keys::WIN_RATE, 4, 0.0, 1.0),
            ],
            categories: vec!["momentum".to_string()],
            random_seed: Some(42),
            ..EvolveConfig::default()
        }
    }

    fn strategy(sharpe: f64, trades: f64, win_rate: f64) -> Strategy {
        let mut metrics = StrategyMetrics::new();
        metrics.set(keys::SHARPE_RATIO, sharpe);
        metrics.set(keys::NUM_TRADES, trades);
        metrics.set(keys::WIN_RATE, win_rate);
        Strategy::new("hypothesis", "code", metrics, 0, 0, None)
    }

    fn initialized() -> EvolutionaryDatabase {
        let mut db = EvolutionaryDatabase::new(&test_config()).unwrap();
        db.initialize_islands(vec![strategy(1.0, 0.5, 0.1), strategy(0.5, 3.5, 0.9)])
            .unwrap();
        db
    }

    #[test]
    fn test_seed_count_mismatch_is_fatal() {
        let mut db = EvolutionaryDatabase::new(&test_config()).unwrap();
        let result = db.initialize_islands(vec![strategy(1.0, 0.0, 0.0)]);
        assert!(matches!(
            result,
            Err(DatabaseError::SeedCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_operations_require_initialization() {
        let mut db = EvolutionaryDatabase::new(&test_config()).unwrap();
        assert!(matches!(
            db.add_strategy(strategy(1.0, 0.0, 0.0), 0),
            Err(DatabaseError::NotInitialized)
        ));
        assert!(matches!(
            db.sample_parent(0, 0.5),
            Err(DatabaseError::NotInitialized)
        ));
    }

    #[test]
    fn test_initialization_seeds_islands_and_archive() {
        let db = initialized();
        assert_eq!(db.islands().len(), 2);
        assert_eq!(db.islands()[1].category, BENCHMARK_CATEGORY);
        let stats = db.statistics();
        assert_eq!(stats.total_strategies, 2);
        assert_eq!(stats.total_elites, 2);
        assert_eq!(stats.feature_map.count, 2);
    }

    #[test]
    fn test_add_strategy_promotes_or_rejects() {
        let mut db = initialized();

        // New niche: accepted and promoted to elite
        let accepted = db.add_strategy(strategy(2.0, 2.5, 0.5), 0).unwrap();
        assert!(accepted);
        assert_eq!(db.islands()[0].elites().len(), 2);
        assert!(db.rejected().is_empty());

        // Same niche, worse score: population grows, rejected pool grows
        let accepted = db.add_strategy(strategy(1.0, 2.5, 0.5), 0).unwrap();
        assert!(!accepted);
        assert_eq!(db.islands()[0].population().len(), 3);
        assert_eq!(db.islands()[0].elites().len(), 2);
        assert_eq!(db.rejected().len(), 1);
    }

    #[test]
    fn test_sentinel_candidate_is_rejected() {
        let mut db = initialized();
        // Occupy the sentinel's target niche with a normal-score strategy
        let mut occupant = StrategyMetrics::worst_case();
        occupant.set(keys::SHARPE_RATIO, 1.5);
        occupant.set(keys::MAX_DRAWDOWN, -0.1);
        occupant.set(keys::INFORMATION_RATIO, 0.2);
        let occupant = Strategy::new("good", "code", occupant, 0, 0, None);
        assert!(db.add_strategy(occupant, 0).unwrap());

        let failed = Strategy::new("failed", "code", StrategyMetrics::worst_case(), 1, 0, None);
        assert!(failed.combined_score < -100.0);
        let accepted = db.add_strategy(failed, 0).unwrap();
        assert!(!accepted);
        assert_eq!(db.rejected().len(), 1);
    }

    #[test]
    fn test_sample_parent_alpha_extremes() {
        let mut db = initialized();
        for _ in 0..4 {
            db.add_strategy(strategy(0.1, 1.5, 0.5), 0).unwrap();
        }
        let population: Vec<StrategyId> = db.islands()[0].population().to_vec();
        let elites: Vec<StrategyId> = db.islands()[0].elites().to_vec();

        for _ in 0..1000 {
            let parent = db.sample_parent(0, 0.0).unwrap().unwrap();
            assert!(population.contains(&parent));
        }
        for _ in 0..1000 {
            let parent = db.sample_parent(0, 1.0).unwrap().unwrap();
            assert!(elites.contains(&parent));
        }
    }

    #[test]
    fn test_sample_cousins_excludes_parent_and_bounds_count() {
        let mut db = initialized();
        // Populate several niches on island 0
        for i in 0..4 {
            for j in 0..4 {
                db.add_strategy(
                    strategy(0.5 + (i * 4 + j) as f64 * 0.1, i as f64 + 0.5, j as f64 / 4.0),
                    0,
                )
                .unwrap();
            }
        }
        let parent = db.sample_parent(0, 1.0).unwrap().unwrap();
        let params = CousinParams::default();

        for _ in 0..50 {
            let cousins = db.sample_cousins(parent, 0, &params).unwrap();
            assert!(!cousins.contains(&parent));
            assert!(cousins.len() <= params.num_best + params.num_diverse + params.num_random);
        }
    }

    #[test]
    fn test_sample_cousins_unknown_parent() {
        let mut db = initialized();
        let result = db.sample_cousins(StrategyId(999), 0, &CousinParams::default());
        assert!(matches!(result, Err(DatabaseError::UnknownStrategy(_))));
    }

    #[test]
    fn test_migration_updates_population_not_elites() {
        let mut db = initialized();
        let island0_best = db.islands()[0].elites()[0];
        let island1_elites_before = db.islands()[1].elites().to_vec();

        db.migrate(1);

        assert!(db.islands()[1].population().contains(&island0_best));
        assert_eq!(db.islands()[1].elites(), island1_elites_before);
        // Best elite of island 1 unchanged until a future admission cycle
        let stats = db.statistics();
        assert_eq!(stats.islands[1].max_score, Some(0.5));
    }

    #[test]
    fn test_insights_recent_window_and_curation() {
        let mut db = initialized();
        db.set_generation(10);
        for i in 0..120 {
            db.add_insight(0, format!("recurring observation {}", i % 3), 1.0);
        }
        db.add_insight(1, "benchmark island note", 0.0);

        assert_eq!(db.recent_insights(5).len(), 5);
        assert_eq!(db.recent_insights(500).len(), 121);

        db.curate_insights(100, 50);
        let island0 = db.insights().iter().filter(|i| i.island_id == 0).count();
        let island1 = db.insights().iter().filter(|i| i.island_id == 1).count();
        assert_eq!(island0, 50);
        assert_eq!(island1, 1);
    }

    #[test]
    fn test_save_load_roundtrip_statistics() {
        let mut db = initialized();
        for i in 0..8 {
            db.add_strategy(strategy(1.0 + i as f64 * 0.3, i as f64 / 2.0, 0.5), 0)
                .unwrap();
        }
        for _ in 0..7 {
            db.advance_generation();
        }
        assert_eq!(db.generation(), 7);
        db.add_insight(0, "volume confirms breakouts", 1.2);
        db.migrate(2);

        let dir = tempdir().unwrap();
        db.save(dir.path()).unwrap();
        assert!(dir.path().join("database.json").exists());
        assert!(dir.path().join("feature_map.json").exists());

        let restored = EvolutionaryDatabase::load(dir.path()).unwrap();
        assert_eq!(restored.statistics(), db.statistics());
    }

    #[test]
    fn test_load_missing_snapshot_fails() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            EvolutionaryDatabase::load(dir.path()),
            Err(PersistError::Io(_))
        ));
    }
}
