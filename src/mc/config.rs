// src/mc/config.rs
use crate::error::{validation::*, SimError, SimResult};
use crate::models::gbm::Gbm;

/// Parameters of one simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
    pub t: f64,
    pub steps: usize,
    pub n_sims: usize,
    /// Base seed for the per-path streams; `None` draws one from OS entropy
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn new(s0: f64, mu: f64, sigma: f64, t: f64, steps: usize, n_sims: usize) -> Self {
        SimulationConfig {
            s0,
            mu,
            sigma,
            t,
            steps,
            n_sims,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the simulation configuration
    pub fn validate(&self) -> SimResult<()> {
        validate_count("steps", self.steps)?;
        validate_count("n_sims", self.n_sims)?;
        validate_positive("s0", self.s0)?;
        validate_finite("mu", self.mu)?;
        validate_non_negative("sigma", self.sigma)?;
        validate_positive("t", self.t)?;
        validate_finite("sigma*sqrt(dt)", self.sigma * self.dt().sqrt())?;

        let discount = self.discount_factor();
        if !(discount.is_finite() && discount > 0.0) {
            return Err(SimError::NumericDegeneracy {
                method: "payoff discounting".to_string(),
                reason: format!(
                    "discount factor e^(-mu*t) = {} for mu*t = {} is not a finite positive number",
                    discount,
                    self.mu * self.t
                ),
            });
        }
        Ok(())
    }

    pub fn dt(&self) -> f64 {
        self.t / self.steps as f64
    }

    /// Discount factor applied to payoffs, `e^(-μT)`
    pub fn discount_factor(&self) -> f64 {
        (-self.mu * self.t).exp()
    }

    pub fn model(&self) -> Gbm {
        Gbm::new(self.mu, self.sigma)
    }

    /// Bytes held by a full path matrix for this configuration
    pub fn matrix_bytes(&self) -> usize {
        (self.steps + 1)
            .saturating_mul(self.n_sims)
            .saturating_mul(std::mem::size_of::<f64>())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            s0: 100.0,
            mu: 0.05,
            sigma: 0.2,
            t: 1.0,
            steps: 252,
            n_sims: 100_000,
            seed: None,
        }
    }
}
