// src/rng.rs
//! Random Number Generation for Monte Carlo Simulations
//!
//! # Design
//!
//! There is no process-wide generator. Callers either hand a generator to the
//! simulator directly, or the simulator derives one stream per path from a base
//! seed through [`RngFactory`]:
//! 1. **Reproducibility**: same base seed → same paths, regardless of thread count
//! 2. **Parallel safety**: every path owns its generator, no shared state
//! 3. **Independence**: streams are seeded from distinct `(base_seed + path_id)`
//!    values through `StdRng::seed_from_u64`, which scrambles the seed with PCG32
//!    so adjacent ids do not produce correlated streams

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// RNG factory for reproducible parallel simulations
#[derive(Debug, Clone, Copy)]
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Factory seeded from OS entropy. The chosen seed is readable through
    /// [`RngFactory::base_seed`] so a run can be replayed.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Create the generator for a specific path
    pub fn create_std_rng(&self, path_id: u64) -> StdRng {
        seed_rng_from_u64(self.base_seed.wrapping_add(path_id))
    }
}

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}
