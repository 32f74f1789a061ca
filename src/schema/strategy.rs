//! Strategy records and backtest metrics.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Metric keys fixed by the evaluator contract.
pub mod keys {
    /// Risk-adjusted return ratio.
    pub const SHARPE_RATIO: &str = "sharpe_ratio";
    /// Downside-risk-adjusted return ratio.
    pub const SORTINO_RATIO: &str = "sortino_ratio";
    /// Benchmark-relative return ratio.
    pub const INFORMATION_RATIO: &str = "information_ratio";
    /// Total return over the backtest, in percent.
    pub const TOTAL_RETURN: &str = "total_return";
    /// Maximum drawdown in percent. Non-positive, acts as a penalty.
    pub const MAX_DRAWDOWN: &str = "max_drawdown";
    /// Number of trades executed.
    pub const NUM_TRADES: &str = "num_trades";
    /// Fraction of winning trades.
    pub const WIN_RATE: &str = "win_rate";
    /// Gross profit over gross loss.
    pub const PROFIT_FACTOR: &str = "profit_factor";
    /// Pre-encoded categorical bitset supplied by the evaluation stage.
    pub const STRATEGY_CATEGORY_BIN: &str = "strategy_category_bin";
}

/// Backtest metrics keyed by name.
///
/// Keys follow the evaluator contract in [`keys`]; unknown keys are carried
/// through untouched. Missing keys read as 0.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyMetrics {
    values: BTreeMap<String, f64>,
}

impl StrategyMetrics {
    /// Empty metrics set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed worst-case metrics substituted when evaluation fails, so the
    /// candidate is rejected by score comparison rather than crashing the
    /// generation loop.
    pub fn worst_case() -> Self {
        let mut m = Self::new();
        m.set(keys::SHARPE_RATIO, -1.0);
        m.set(keys::SORTINO_RATIO, -1.0);
        m.set(keys::INFORMATION_RATIO, -1.0);
        m.set(keys::TOTAL_RETURN, -50.0);
        m.set(keys::MAX_DRAWDOWN, -100.0);
        m.set(keys::NUM_TRADES, 0.0);
        m.set(keys::WIN_RATE, 0.0);
        m.set(keys::PROFIT_FACTOR, 0.0);
        m.set(keys::STRATEGY_CATEGORY_BIN, 1.0);
        m
    }

    /// Set a metric value.
    pub fn set(&mut self, key: impl Into<String>, value: f64) -> &mut Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Read a metric, defaulting to 0.0 when absent.
    pub fn get(&self, key: &str) -> f64 {
        self.values.get(key).copied().unwrap_or(0.0)
    }

    /// Read a metric with an explicit fallback.
    pub fn get_or(&self, key: &str, default: f64) -> f64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    /// Whether a metric key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over all metric entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Combined fitness score: Sharpe + information ratio + max drawdown.
    /// Max drawdown is non-positive, so adding it acts as a penalty.
    pub fn combined_score(&self) -> f64 {
        self.get(keys::SHARPE_RATIO) + self.get(keys::INFORMATION_RATIO)
            + self.get(keys::MAX_DRAWDOWN)
    }
}

impl FromIterator<(String, f64)> for StrategyMetrics {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Opaque arena key identifying a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyId(pub u64);

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "strat_{}", self.0)
    }
}

/// One evolutionary individual: hypothesis, implementation and scored
/// backtest metrics. Immutable after admission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    /// Arena key, assigned by the store on insert.
    pub id: StrategyId,
    /// Free-text hypothesis behind the strategy.
    pub hypothesis: String,
    /// Opaque implementation blob.
    pub code: String,
    /// Backtest metrics from the evaluator.
    pub metrics: StrategyMetrics,
    /// Niche coordinates, computed once and cached.
    pub feature_vector: Option<Vec<usize>>,
    /// Scalar fitness used for archive admission. Computed once at
    /// construction, never mutated afterward.
    pub combined_score: f64,
    /// Generation this strategy was created in.
    pub generation: usize,
    /// Island that produced it.
    pub island_id: usize,
    /// Parent strategy, if any.
    pub parent_id: Option<StrategyId>,
}

impl Strategy {
    /// Create a strategy from generated content and evaluated metrics.
    pub fn new(
        hypothesis: impl Into<String>,
        code: impl Into<String>,
        metrics: StrategyMetrics,
        generation: usize,
        island_id: usize,
        parent_id: Option<StrategyId>,
    ) -> Self {
        let combined_score = metrics.combined_score();
        Self {
            id: StrategyId(0),
            hypothesis: hypothesis.into(),
            code: code.into(),
            metrics,
            feature_vector: None,
            combined_score,
            generation,
            island_id,
            parent_id,
        }
    }
}
