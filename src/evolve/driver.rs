//! Generation loop driving the database through its collaborators.
//!
//! The driver owns the database plus a hypothesis generator and a strategy
//! evaluator, and runs the per-island evolution cycle: sample a parent and
//! cousins, generate a candidate, evaluate it, submit it for archive
//! admission, then apply migration, insight curation and checkpointing on
//! their configured intervals.

use std::path::PathBuf;

use log::{info, warn};

use crate::schema::{EvolveConfig, Strategy, StrategyMetrics, keys};

use super::boundary::{
    GenerationContext, HypothesisGenerator, StrategyAnalysis, StrategyDraft, StrategyEvaluator,
};
use super::database::{DatabaseError, EvolutionaryDatabase, PersistError};
use super::insight::Insight;

/// A zero interval disables the task.
fn on_interval(generation: usize, interval: usize) -> bool {
    interval > 0 && generation > 0 && generation % interval == 0
}

/// Runs the evolution loop against pluggable generation and evaluation
/// backends.
pub struct EvolutionDriver<G, E> {
    database: EvolutionaryDatabase,
    generator: G,
    evaluator: E,
    config: EvolveConfig,
    checkpoint_dir: Option<PathBuf>,
}

/// Driver-level failures. Generator and evaluator errors are absorbed by
/// the loop; only structural and persistence errors surface.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl<G: HypothesisGenerator, E: StrategyEvaluator> EvolutionDriver<G, E> {
    pub fn new(
        database: EvolutionaryDatabase,
        generator: G,
        evaluator: E,
        config: EvolveConfig,
    ) -> Self {
        Self {
            database,
            generator,
            evaluator,
            config,
            checkpoint_dir: None,
        }
    }

    /// Snapshot the database to this directory on the checkpoint interval.
    pub fn with_checkpoints(mut self, directory: impl Into<PathBuf>) -> Self {
        self.checkpoint_dir = Some(directory.into());
        self
    }

    pub fn database(&self) -> &EvolutionaryDatabase {
        &self.database
    }

    /// Run `num_generations` generation cycles, then return the database.
    pub fn run(mut self, num_generations: usize) -> Result<EvolutionaryDatabase, DriverError> {
        let start = self.database.generation();
        for generation in start..start + num_generations {
            self.step(generation)?;
        }
        info!(
            "Evolution finished at generation {}",
            self.database.generation()
        );
        Ok(self.database)
    }

    /// One full generation: evolve every island, then run the interval
    /// maintenance tasks.
    fn step(&mut self, generation: usize) -> Result<(), DriverError> {
        self.database.set_generation(generation);
        info!("Generation {generation} starting");

        for island_id in 0..self.database.islands().len() {
            self.evolve_island(island_id, generation)?;
        }

        let params = &self.config.evolution;
        if on_interval(generation, params.migration_interval) {
            self.database.migrate(params.num_migrants);
        }
        if on_interval(generation, params.insight_curation_interval) {
            self.database
                .curate_insights(self.config.insights.max_per_island, self.config.insights.keep);
        }
        if let Some(dir) = &self.checkpoint_dir
            && on_interval(generation, params.checkpoint_interval)
        {
            self.database.save(dir)?;
        }
        Ok(())
    }

    fn evolve_island(&mut self, island_id: usize, generation: usize) -> Result<(), DriverError> {
        let alpha = self.config.evolution.alpha;
        let Some(parent_id) = self.database.sample_parent(island_id, alpha)? else {
            warn!("Island {island_id} has no sampleable parent, skipping");
            return Ok(());
        };
        let cousin_ids = self
            .database
            .sample_cousins(parent_id, island_id, &self.config.sampling)?;

        // Generation failure still produces a candidate: a placeholder
        // draft paired with sentinel worst-case metrics, so the lineage is
        // recorded and rejected by score comparison like any other failure.
        let (draft, generation_failed) = {
            let store = self.database.store();
            // Parent and cousins come straight out of the arena; sampling
            // only ever returns live ids.
            let parent = store
                .get(parent_id)
                .ok_or(DatabaseError::UnknownStrategy(parent_id))?;
            let cousins: Vec<&Strategy> =
                cousin_ids.iter().filter_map(|id| store.get(*id)).collect();
            let insights: Vec<&Insight> = self
                .database
                .recent_insights(self.config.insights.recent_window)
                .iter()
                .filter(|i| i.island_id == island_id)
                .collect();
            let context = GenerationContext {
                parent,
                cousins,
                category: &self.database.islands()[island_id].category,
                insights,
                generation,
            };
            match self.generator.generate(&context) {
                Ok(draft) => (draft, false),
                Err(err) => {
                    warn!("Generation failed on island {island_id}: {err}");
                    (
                        StrategyDraft {
                            hypothesis: String::new(),
                            code: String::new(),
                        },
                        true,
                    )
                }
            }
        };

        // Evaluation failure likewise substitutes sentinel worst-case
        // metrics, keeping the lineage recorded without poisoning the
        // archive. A placeholder draft is never evaluated or analyzed.
        let metrics = if generation_failed {
            StrategyMetrics::worst_case()
        } else {
            match self.evaluator.evaluate(&draft.code) {
                Ok(metrics) => metrics,
                Err(err) => {
                    warn!("Evaluation failed on island {island_id}: {err}");
                    StrategyMetrics::worst_case()
                }
            }
        };

        let analysis = if generation_failed {
            StrategyAnalysis::default()
        } else {
            self.evaluator.analyze(&draft, &metrics)
        };
        let mut metrics = metrics;
        if let Some(bin) = analysis.category_bin {
            metrics.set(keys::STRATEGY_CATEGORY_BIN, bin as f64);
        }

        let strategy = Strategy::new(
            draft.hypothesis,
            draft.code,
            metrics,
            generation,
            island_id,
            Some(parent_id),
        );
        let source_score = strategy.combined_score;
        self.database.add_strategy(strategy, island_id)?;

        for text in analysis.insights {
            self.database.add_insight(island_id, text, source_score);
        }
        Ok(())
    }
}
