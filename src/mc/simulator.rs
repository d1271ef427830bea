// src/mc/simulator.rs
//! GBM path simulation
//!
//! # Algorithm
//!
//! For every simulation column `j` and step `t`:
//! ```text
//! S[0, j]   = S0
//! S[t+1, j] = S[t, j] * exp((μ - σ²/2)dt + σ√dt * Z[t, j])
//! ```
//! The product is accumulated strictly in time order, so each price depends
//! only on the previous price of the same column and that step's shock.

use crate::analytics::engine::{self, AnalyticsResult};
use crate::error::{validation::*, SimError, SimResult};
use crate::math_utils::Timer;
use crate::mc::config::SimulationConfig;
use crate::mc::paths::PathMatrix;
use crate::render::{self, ChartSet, ChartSink};
use crate::rng::{self, RngFactory};
use ndarray::parallel::prelude::*;
use ndarray::{Array2, Axis};
use rand::Rng;
use std::path::Path;
use tracing::{debug, warn};

const LARGE_MATRIX_BYTES: usize = 100 * 1024 * 1024;

/// Simulator bound to one validated configuration
#[derive(Debug, Clone)]
pub struct GbmSimulator {
    config: SimulationConfig,
}

impl GbmSimulator {
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(GbmSimulator { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulate all paths in parallel, one independent stream per column.
    ///
    /// Streams derive from `config.seed`; without a seed a base seed is drawn
    /// from OS entropy and logged.
    pub fn simulate(&self) -> SimResult<PathMatrix> {
        let factory = match self.config.seed {
            Some(seed) => RngFactory::new(seed),
            None => RngFactory::from_entropy(),
        };
        self.simulate_with_factory(&factory)
    }

    /// Simulate all paths in parallel with streams taken from `factory`
    pub fn simulate_with_factory(&self, factory: &RngFactory) -> SimResult<PathMatrix> {
        let cfg = &self.config;
        log_allocation(cfg);
        debug!(
            steps = cfg.steps,
            n_sims = cfg.n_sims,
            seed = factory.base_seed(),
            "simulating GBM paths"
        );
        let timer = Timer::new();

        let stepper = cfg.model().stepper(cfg.dt());
        let mut prices = Array2::<f64>::zeros((cfg.steps + 1, cfg.n_sims));

        prices
            .axis_iter_mut(Axis(1))
            .into_par_iter()
            .enumerate()
            .for_each(|(j, mut column)| {
                let mut rng = factory.create_std_rng(j as u64);
                let mut current_s = cfg.s0;
                column[0] = current_s;
                for t in 1..=cfg.steps {
                    current_s *= stepper.growth(rng::get_normal_draw(&mut rng));
                    column[t] = current_s;
                }
            });

        let paths = PathMatrix::from_array(prices);
        check_degeneracy(&paths)?;
        debug!(elapsed_ms = timer.elapsed_ms(), "simulation finished");
        Ok(paths)
    }

    /// Simulate sequentially from a caller-owned generator.
    ///
    /// Draws are consumed row by row (`steps × n_sims`), one shock per
    /// simulation per time step.
    pub fn simulate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<PathMatrix> {
        let cfg = &self.config;
        log_allocation(cfg);
        debug!(steps = cfg.steps, n_sims = cfg.n_sims, "simulating GBM paths from supplied rng");

        let stepper = cfg.model().stepper(cfg.dt());
        let mut prices = Array2::<f64>::zeros((cfg.steps + 1, cfg.n_sims));
        prices.row_mut(0).fill(cfg.s0);

        for t in 0..cfg.steps {
            for j in 0..cfg.n_sims {
                let growth = stepper.growth(rng::get_normal_draw(rng));
                prices[[t + 1, j]] = prices[[t, j]] * growth;
            }
        }

        let paths = PathMatrix::from_array(prices);
        check_degeneracy(&paths)?;
        Ok(paths)
    }

    /// Simulate once and derive every analytic from that single matrix
    pub fn compute_analytics(&self, strike: f64) -> SimResult<AnalyticsResult> {
        validate_non_negative("strike", strike)?;
        let paths = self.simulate()?;
        engine::analyze_paths(&self.config, &paths, strike)
    }

    /// Same as [`GbmSimulator::compute_analytics`] but drawing from `rng`
    pub fn compute_analytics_with_rng<R: Rng + ?Sized>(
        &self,
        strike: f64,
        rng: &mut R,
    ) -> SimResult<AnalyticsResult> {
        validate_non_negative("strike", strike)?;
        let paths = self.simulate_with_rng(rng)?;
        engine::analyze_paths(&self.config, &paths, strike)
    }

    /// Compute the analytics and hand the four charts to `sink`, written under `out_dir`.
    ///
    /// The path matrix is dropped before rendering starts.
    pub fn run_analytics<S: ChartSink + ?Sized>(
        &self,
        strike: f64,
        sink: &mut S,
        out_dir: &Path,
    ) -> SimResult<AnalyticsResult> {
        let result = self.compute_analytics(strike)?;
        render::render_charts(&result, sink, out_dir, ChartSet::ALL)?;
        Ok(result)
    }
}

/// Validate `config` and simulate it with [`GbmSimulator::simulate`]
pub fn simulate(config: &SimulationConfig) -> SimResult<PathMatrix> {
    GbmSimulator::new(config.clone())?.simulate()
}

fn log_allocation(cfg: &SimulationConfig) {
    let bytes = cfg.matrix_bytes();
    if bytes > LARGE_MATRIX_BYTES {
        warn!(
            megabytes = bytes / (1024 * 1024),
            "path matrix is large; only one is kept alive per run"
        );
    }
}

fn check_degeneracy(paths: &PathMatrix) -> SimResult<()> {
    let bad = paths
        .as_array()
        .indexed_iter()
        .find(|&(_, &price)| !(price.is_finite() && price > 0.0))
        .map(|(index, &price)| (index, price));

    match bad {
        Some(((t, j), price)) => Err(SimError::NumericDegeneracy {
            method: "GBM path simulation".to_string(),
            reason: format!(
                "price {} at step {} of simulation {} is not a finite positive number",
                price, t, j
            ),
        }),
        None => Ok(()),
    }
}
