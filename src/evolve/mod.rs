//! Quality-diversity evolution core.
//!
//! The archive ([`FeatureMap`]) keeps one elite per behavioral niche;
//! [`Island`]s evolve semi-independent populations that exchange elites
//! through migration; [`EvolutionaryDatabase`] orchestrates both plus the
//! insight log, and [`EvolutionDriver`] runs the generation loop against
//! pluggable generation and evaluation backends.

pub mod boundary;
pub mod database;
pub mod driver;
pub mod feature_map;
pub mod insight;
pub mod island;
pub mod rng;
pub mod store;

pub use boundary::{
    BoundaryError, GenerationContext, HypothesisGenerator, StrategyAnalysis, StrategyDraft,
    StrategyEvaluator,
};
pub use database::{
    BENCHMARK_CATEGORY, DatabaseError, DatabaseStats, EvolutionaryDatabase, IslandStats,
    PersistError,
};
pub use driver::{DriverError, EvolutionDriver};
pub use feature_map::{CellEntry, FeatureMap, FeatureMapStats};
pub use insight::{Insight, curate, score_insight, token_similarity};
pub use island::Island;
pub use rng::EvolveRng;
pub use store::StrategyStore;
