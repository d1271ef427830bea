// src/models/gbm.rs
//! Geometric Brownian Motion dynamics
//!
//! ```text
//! dS_t = μ S_t dt + σ S_t dW_t
//! ```
//!
//! Stepped with the exact log-normal transition, so there is no
//! discretisation bias and prices stay strictly positive:
//! ```text
//! S_{t+dt} = S_t * exp((μ - σ²/2)dt + σ√dt * Z)
//! ```

use std::f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gbm {
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Gbm { mu, sigma }
    }

    /// Deterministic part of one log-return, `(μ - σ²/2)dt`
    pub fn log_drift(&self, dt: f64) -> f64 {
        (self.mu - 0.5 * self.sigma * self.sigma) * dt
    }

    /// Scale applied to the normal draw in one log-return, `σ√dt`
    pub fn diffusion_scale(&self, dt: f64) -> f64 {
        self.sigma * dt.sqrt()
    }

    /// Precomputed stepper for a fixed `dt`, used in the simulation hot loop
    pub fn stepper(&self, dt: f64) -> GbmStepper {
        GbmStepper {
            drift: self.log_drift(dt),
            vol: self.diffusion_scale(dt),
        }
    }
}

/// Per-step multiplicative return with the drift and diffusion terms hoisted
#[derive(Debug, Clone, Copy)]
pub struct GbmStepper {
    drift: f64,
    vol: f64,
}

impl GbmStepper {
    #[inline]
    pub fn growth(&self, normal_draw: f64) -> f64 {
        (self.drift + self.vol * normal_draw).exp()
    }
}
