//! Seedable random number source for sampling and perturbation.
//!
//! Owned by the database so every draw is reproducible from one seed.

use rand::prelude::*;

/// Random number generator wrapper for evolutionary sampling.
pub struct EvolveRng {
    rng: StdRng,
}

impl EvolveRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Uniform draw in [0, 1).
    pub fn uniform(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Bernoulli draw with probability `p` (clamped to [0, 1]).
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform integer in [0, n).
    pub fn index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    /// Gaussian draw centered on `mean` with standard deviation `sigma`.
    pub fn normal(&mut self, mean: f64, sigma: f64) -> f64 {
        let noise: f64 = self.rng.sample(rand_distr::StandardNormal);
        mean + noise * sigma
    }

    /// Uniform draw from a slice, None when empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Up to `n` distinct elements drawn uniformly without replacement.
    pub fn choose_multiple<'a, T>(&mut self, items: &'a [T], n: usize) -> Vec<&'a T> {
        items.choose_multiple(&mut self.rng, n).collect()
    }

    /// Generate next u64 for seeding child RNGs.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }
}

impl Default for EvolveRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl std::fmt::Debug for EvolveRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvolveRng").finish_non_exhaustive()
    }
}
