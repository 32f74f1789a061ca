//! Configuration types for the evolutionary process.

use serde::{Deserialize, Serialize};

/// Kind of a feature-map dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    /// Numeric metric normalized into evenly sized bins over a declared range.
    Continuous,
    /// Integer bitset metric reduced modulo the bin count.
    CategoricalBits,
}

/// One axis of the diversity grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionSpec {
    /// Metric key read when binning a strategy.
    pub name: String,
    /// Binning mode.
    pub kind: DimensionKind,
    /// Number of bins on this axis (>= 1).
    pub bins: usize,
    /// Value range for continuous dimensions. Without a range the axis
    /// always bins to 0.
    #[serde(default)]
    pub range: Option<(f64, f64)>,
}

impl DimensionSpec {
    /// Continuous dimension with a declared range.
    pub fn continuous(name: impl Into<String>, bins: usize, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            kind: DimensionKind::Continuous,
            bins,
            range: Some((min, max)),
        }
    }

    /// Categorical bitset dimension.
    pub fn categorical_bits(name: impl Into<String>, bins: usize) -> Self {
        Self {
            name: name.into(),
            kind: DimensionKind::CategoricalBits,
            bins,
            range: None,
        }
    }
}

/// Top-level configuration for an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolveConfig {
    /// Feature-map dimensions in declared order.
    pub dimensions: Vec<DimensionSpec>,
    /// Strategy categories. One island per category plus a reserved
    /// benchmark island.
    pub categories: Vec<String>,
    /// Generation-loop parameters.
    #[serde(default)]
    pub evolution: EvolutionParams,
    /// Cousin sampling parameters.
    #[serde(default)]
    pub sampling: CousinParams,
    /// Insight retention parameters.
    #[serde(default)]
    pub insights: InsightParams,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolveConfig {
    fn default() -> Self {
        Self {
            dimensions: vec![
                DimensionSpec::categorical_bits("strategy_category_bin", 16),
                DimensionSpec::continuous("num_trades", 10, 0.0, 1000.0),
                DimensionSpec::continuous("win_rate", 10, 0.0, 1.0),
            ],
            categories: vec![
                "momentum".to_string(),
                "mean_reversion".to_string(),
                "breakout".to_string(),
                "volatility".to_string(),
            ],
            evolution: EvolutionParams::default(),
            sampling: CousinParams::default(),
            insights: InsightParams::default(),
            random_seed: None,
        }
    }
}

impl EvolveConfig {
    /// Number of islands: one per category plus the benchmark island.
    pub fn num_islands(&self) -> usize {
        self.categories.len() + 1
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimensions.is_empty() {
            return Err(ConfigError::NoDimensions);
        }
        for (i, dim) in self.dimensions.iter().enumerate() {
            if dim.bins == 0 {
                return Err(ConfigError::InvalidBinCount { dimension: i });
            }
            if let Some((min, max)) = dim.range
                && min >= max
            {
                return Err(ConfigError::InvalidRange { dimension: i });
            }
        }
        if self.categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }
        if !(0.0..=1.0).contains(&self.evolution.alpha) {
            return Err(ConfigError::InvalidAlpha(self.evolution.alpha));
        }
        if !(0.0..=1.0).contains(&self.sampling.bitflip_rate) {
            return Err(ConfigError::InvalidBitflipRate(self.sampling.bitflip_rate));
        }
        if self.insights.keep > self.insights.max_per_island {
            return Err(ConfigError::InvalidInsightCap {
                keep: self.insights.keep,
                max: self.insights.max_per_island,
            });
        }
        Ok(())
    }
}

/// Generation-loop parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionParams {
    /// Number of generations to run.
    #[serde(default = "default_num_generations")]
    pub num_generations: usize,
    /// Probability of sampling a parent from the elites rather than the
    /// full population.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Generations between migrations.
    #[serde(default = "default_migration_interval")]
    pub migration_interval: usize,
    /// Elites each island contributes per migration.
    #[serde(default = "default_num_migrants")]
    pub num_migrants: usize,
    /// Generations between insight curation passes.
    #[serde(default = "default_curation_interval")]
    pub insight_curation_interval: usize,
    /// Generations between snapshot checkpoints (0 disables).
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: usize,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            num_generations: default_num_generations(),
            alpha: default_alpha(),
            migration_interval: default_migration_interval(),
            num_migrants: default_num_migrants(),
            insight_curation_interval: default_curation_interval(),
            checkpoint_interval: default_checkpoint_interval(),
        }
    }
}

fn default_num_generations() -> usize {
    150
}
fn default_alpha() -> f64 {
    0.5
}
fn default_migration_interval() -> usize {
    10
}
fn default_num_migrants() -> usize {
    5
}
fn default_curation_interval() -> usize {
    50
}
fn default_checkpoint_interval() -> usize {
    10
}

/// Cousin sampling parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CousinParams {
    /// Top-scoring cousins drawn from the island's elites.
    #[serde(default = "default_num_best")]
    pub num_best: usize,
    /// Cousins found by perturbing the parent's feature vector.
    #[serde(default = "default_num_diverse")]
    pub num_diverse: usize,
    /// Cousins drawn uniformly from the island's population.
    #[serde(default = "default_num_random")]
    pub num_random: usize,
    /// Gaussian perturbation width (in bins) for continuous dimensions.
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    /// Fraction of bits flipped on categorical dimensions.
    #[serde(default = "default_bitflip_rate")]
    pub bitflip_rate: f64,
}

impl Default for CousinParams {
    fn default() -> Self {
        Self {
            num_best: default_num_best(),
            num_diverse: default_num_diverse(),
            num_random: default_num_random(),
            sigma: default_sigma(),
            bitflip_rate: default_bitflip_rate(),
        }
    }
}

fn default_num_best() -> usize {
    2
}
fn default_num_diverse() -> usize {
    3
}
fn default_num_random() -> usize {
    2
}
fn default_sigma() -> f64 {
    1.0
}
fn default_bitflip_rate() -> f64 {
    0.25
}

/// Insight retention parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightParams {
    /// Per-island insight count that triggers curation.
    #[serde(default = "default_max_per_island")]
    pub max_per_island: usize,
    /// Insights kept per island after curation.
    #[serde(default = "default_keep")]
    pub keep: usize,
    /// Recent insights handed to the generator as context.
    #[serde(default = "default_recent_window")]
    pub recent_window: usize,
}

impl Default for InsightParams {
    fn default() -> Self {
        Self {
            max_per_island: default_max_per_island(),
            keep: default_keep(),
            recent_window: default_recent_window(),
        }
    }
}

fn default_max_per_island() -> usize {
    100
}
fn default_keep() -> usize {
    50
}
fn default_recent_window() -> usize {
    50
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("At least one feature dimension is required")]
    NoDimensions,
    #[error("Dimension {dimension} must have at least one bin")]
    InvalidBinCount { dimension: usize },
    #[error("Dimension {dimension} range must satisfy min < max")]
    InvalidRange { dimension: usize },
    #[error("At least one strategy category is required")]
    NoCategories,
    #[error("Alpha must lie in [0, 1], got {0}")]
    InvalidAlpha(f64),
    #[error("Bit flip rate must lie in [0, 1], got {0}")]
    InvalidBitflipRate(f64),
    #[error("Insight keep count {keep} exceeds curation trigger {max}")]
    InvalidInsightCap { keep: usize, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = EvolveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_islands(), 5);
    }

    #[test]
    fn test_invalid_bins() {
        let mut config = EvolveConfig::default();
        config.dimensions[0].bins = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBinCount { dimension: 0 })
        ));
    }

    #[test]
    fn test_invalid_range() {
        let mut config = EvolveConfig::default();
        config.dimensions[1].range = Some((5.0, 5.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { dimension: 1 })
        ));
    }

    #[test]
    fn test_invalid_alpha() {
        let mut config = EvolveConfig::default();
        config.evolution.alpha = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAlpha(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip_with_defaults() {
        let json = r#"{
            "dimensions": [
                {"name": "strategy_category_bin", "kind": "categorical_bits", "bins": 16},
                {"name": "win_rate", "kind": "continuous", "bins": 10, "range": [0.0, 1.0]}
            ],
            "categories": ["momentum"]
        }"#;
        let config: EvolveConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.evolution.num_generations, 150);
        assert_eq!(config.sampling.num_diverse, 3);
        assert_eq!(config.insights.max_per_island, 100);
        assert!(config.validate().is_ok());
    }
}
