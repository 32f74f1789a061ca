//! Multi-dimensional niche archive maintaining strategy diversity.
//!
//! MAP-Elites style feature map: one cell per combination of dimension bins,
//! each holding at most the best strategy seen for that niche.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::schema::{DimensionKind, DimensionSpec, StrategyId, StrategyMetrics};

/// Occupant of one niche.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellEntry {
    /// Arena key of the elite occupying this cell.
    pub id: StrategyId,
    /// Its combined score, cached so admission never consults the arena.
    pub score: f64,
    /// The cell's coordinates.
    pub vector: Vec<usize>,
}

/// Dense N-dimensional grid of niches.
#[derive(Debug, Serialize, Deserialize)]
pub struct FeatureMap {
    dimensions: Vec<DimensionSpec>,
    cells: Vec<Option<CellEntry>>,
    added: u64,
    improved: u64,
    rejected: u64,
}

impl FeatureMap {
    /// Create an empty feature map. Dimensions are expected to come from a
    /// validated [`EvolveConfig`](crate::schema::EvolveConfig).
    pub fn new(dimensions: Vec<DimensionSpec>) -> Self {
        let total: usize = dimensions.iter().map(|d| d.bins.max(1)).product();
        let shape: Vec<usize> = dimensions.iter().map(|d| d.bins).collect();
        info!("Initialized feature map with shape {shape:?} ({total} cells)");
        Self {
            dimensions,
            cells: vec![None; total],
            added: 0,
            improved: 0,
            rejected: 0,
        }
    }

    /// Declared dimensions in order.
    pub fn dimensions(&self) -> &[DimensionSpec] {
        &self.dimensions
    }

    /// Deterministic binning of metrics into niche coordinates.
    ///
    /// Categorical bitset dimensions reduce the integer metric modulo the
    /// bin count (absent metric defaults to 1). Continuous dimensions
    /// normalize into [0, 1) over the declared range, clipped to 0.9999 to
    /// keep the top bin reachable without overflow; a dimension without a
    /// range always bins to 0.
    pub fn feature_vector(&self, metrics: &StrategyMetrics) -> Vec<usize> {
        self.dimensions
            .iter()
            .map(|dim| match dim.kind {
                DimensionKind::CategoricalBits => {
                    let raw = metrics.get_or(&dim.name, 1.0) as i64;
                    raw.rem_euclid(dim.bins as i64) as usize
                }
                DimensionKind::Continuous => match dim.range {
                    Some((min, max)) => {
                        let value = metrics.get(&dim.name);
                        let normalized = ((value - min) / (max - min)).clamp(0.0, 0.9999);
                        ((normalized * dim.bins as f64) as usize).min(dim.bins - 1)
                    }
                    None => 0,
                },
            })
            .collect()
    }

    /// Attempt admission of a strategy into its niche.
    ///
    /// Empty cell: occupy. Occupied cell: replace only on strictly greater
    /// score (ties reject). Returns whether the strategy now occupies the
    /// cell.
    pub fn add(&mut self, id: StrategyId, score: f64, vector: &[usize]) -> bool {
        let Some(index) = self.flat_index(vector) else {
            warn!("Rejected {id}: feature vector out of range: {vector:?}");
            self.rejected += 1;
            return false;
        };

        match self.cells[index].take() {
            None => {
                self.cells[index] = Some(CellEntry {
                    id,
                    score,
                    vector: vector.to_vec(),
                });
                self.added += 1;
                debug!("Added {id} to cell {vector:?} (score {score:.3})");
                true
            }
            Some(existing) if score > existing.score => {
                debug!(
                    "Replaced {} in cell {vector:?}: {:.3} -> {score:.3}",
                    existing.id, existing.score
                );
                self.cells[index] = Some(CellEntry {
                    id,
                    score,
                    vector: vector.to_vec(),
                });
                self.improved += 1;
                true
            }
            Some(existing) => {
                self.cells[index] = Some(existing);
                self.rejected += 1;
                debug!("Rejected {id} at cell {vector:?} (score {score:.3})");
                false
            }
        }
    }

    /// Occupant of a cell, None when empty or out of range.
    pub fn get(&self, vector: &[usize]) -> Option<&CellEntry> {
        self.cells[self.flat_index(vector)?].as_ref()
    }

    /// Iterate over all occupied cells.
    pub fn occupied(&self) -> impl Iterator<Item = &CellEntry> {
        self.cells.iter().filter_map(|c| c.as_ref())
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of cells in the grid.
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    /// Fraction of cells occupied, in [0, 1].
    pub fn coverage(&self) -> f64 {
        self.len() as f64 / self.total_cells() as f64
    }

    /// Archive statistics over occupied cells.
    pub fn statistics(&self) -> FeatureMapStats {
        let scores: Vec<f64> = self.occupied().map(|c| c.score).collect();
        if scores.is_empty() {
            return FeatureMapStats {
                count: 0,
                coverage: 0.0,
                added: self.added,
                improved: self.improved,
                rejected: self.rejected,
                mean_score: 0.0,
                max_score: 0.0,
                min_score: 0.0,
                std_score: 0.0,
            };
        }

        let count = scores.len();
        let mean = scores.iter().sum::<f64>() / count as f64;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count as f64;
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);

        FeatureMapStats {
            count,
            coverage: self.coverage(),
            added: self.added,
            improved: self.improved,
            rejected: self.rejected,
            mean_score: mean,
            max_score: max,
            min_score: min,
            std_score: variance.sqrt(),
        }
    }

    /// Row-major flat index, None when the vector is out of range.
    fn flat_index(&self, vector: &[usize]) -> Option<usize> {
        if vector.len() != self.dimensions.len() {
            return None;
        }
        let mut index = 0usize;
        for (v, dim) in vector.iter().zip(&self.dimensions) {
            if *v >= dim.bins {
                return None;
            }
            index = index * dim.bins + v;
        }
        Some(index)
    }
}

/// Archive statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMapStats {
    /// Occupied cell count.
    pub count: usize,
    /// Occupied fraction of the grid.
    pub coverage: f64,
    /// Admissions into empty cells.
    pub added: u64,
    /// Replacements of weaker occupants.
    pub improved: u64,
    /// Rejections.
    pub rejected: u64,
    /// Mean combined score over occupied cells.
    pub mean_score: f64,
    /// Best combined score.
    pub max_score: f64,
    /// Worst combined score.
    pub min_score: f64,
    /// Population standard deviation of scores.
    pub std_score: f64,
}
