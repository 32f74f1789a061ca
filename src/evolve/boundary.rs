//! Boundary contracts for the external generation and evaluation services.
//!
//! The core treats both collaborators as black boxes returning structured
//! results. Failures surface as [`BoundaryError`]; the driver substitutes
//! [`StrategyMetrics::worst_case`](crate::schema::StrategyMetrics::worst_case)
//! on evaluation failure so evolutionary pressure rejects the candidate
//! instead of the loop crashing.

use crate::schema::{Strategy, StrategyMetrics};

use super::insight::Insight;

/// Context handed to the generator when producing a new candidate.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    /// The sampled parent.
    pub parent: &'a Strategy,
    /// Related strategies for diversity signals.
    pub cousins: Vec<&'a Strategy>,
    /// Category of the island being evolved.
    pub category: &'a str,
    /// Recent insights from the same island for additional context.
    pub insights: Vec<&'a Insight>,
    /// Current generation number.
    pub generation: usize,
}

/// A generated candidate before evaluation.
#[derive(Debug, Clone)]
pub struct StrategyDraft {
    /// Free-text hypothesis.
    pub hypothesis: String,
    /// Implementation blob to hand to the evaluator.
    pub code: String,
}

/// Analysis of an evaluated candidate: insights plus its categorical bin.
#[derive(Debug, Clone, Default)]
pub struct StrategyAnalysis {
    /// Free-text learnings extracted from the run.
    pub insights: Vec<String>,
    /// Categorical bitset for the category dimension, when recognized.
    pub category_bin: Option<u64>,
}

/// Collaborator producing candidate hypotheses and implementations.
pub trait HypothesisGenerator {
    /// Generate a draft for the given parent and context.
    fn generate(&mut self, ctx: &GenerationContext<'_>) -> Result<StrategyDraft, BoundaryError>;
}

/// Collaborator scoring a candidate implementation.
pub trait StrategyEvaluator {
    /// Backtest the implementation and return its metrics.
    fn evaluate(&mut self, code: &str) -> Result<StrategyMetrics, BoundaryError>;

    /// Analyze an evaluated candidate. The default produces no insights.
    fn analyze(&mut self, _draft: &StrategyDraft, _metrics: &StrategyMetrics) -> StrategyAnalysis {
        StrategyAnalysis::default()
    }
}

/// Collaborator failures. Always recoverable for the caller: the driver
/// logs them and continues with sentinel results.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("Generation failed: {0}")]
    Generation(String),
    #[error("Evaluation failed: {0}")]
    Evaluation(String),
}
