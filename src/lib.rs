//! QuantEvolve - Quality-diversity evolution of trading strategies.
//!
//! This crate provides a MAP-Elites style evolutionary system for trading
//! strategies: a niche archive keeping one elite per behavioral cell, an
//! island model with periodic migration, and an insight log distilling
//! learnings from evaluated candidates.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, dimension specs, strategies and metrics
//! - `evolve`: Archive, islands, orchestrator and the generation loop
//!
//! # Example
//!
//! ```rust,no_run
//! use quant_evolve::{
//!     evolve::EvolutionaryDatabase,
//!     schema::{EvolveConfig, Strategy, StrategyMetrics, keys},
//! };
//!
//! // Create configuration
//! let config = EvolveConfig::default();
//!
//! // One seed strategy per island (categories plus the benchmark island)
//! let seeds: Vec<Strategy> = (0..config.num_islands())
//!     .map(|i| {
//!         let mut metrics = StrategyMetrics::new();
//!         metrics.set(keys::SHARPE_RATIO, 0.5);
//!         metrics.set(keys::STRATEGY_CATEGORY_BIN, i as f64);
//!         Strategy::new("buy and hold", "hold()", metrics, 0, i, None)
//!     })
//!     .collect();
//!
//! // Create the database and register the seeds
//! let mut database = EvolutionaryDatabase::new(&config).unwrap();
//! database.initialize_islands(seeds).unwrap();
//!
//! println!("Archive coverage: {:.4}", database.feature_map().coverage());
//! ```

pub mod evolve;
pub mod schema;

// Re-export commonly used types
pub use evolve::{EvolutionDriver, EvolutionaryDatabase, FeatureMap, Island};
pub use schema::{EvolveConfig, Strategy, StrategyId, StrategyMetrics};
