//! Declarative types: configuration, dimensions, strategies and metrics.

mod config;
mod strategy;

pub use config::{
    ConfigError, CousinParams, DimensionKind, DimensionSpec, EvolutionParams, EvolveConfig,
    InsightParams,
};
pub use strategy::{Strategy, StrategyId, StrategyMetrics, keys};
