//! # gbm-risk: Monte Carlo GBM Pricing and Risk Analytics
//!
//! Simulates a single asset under Geometric Brownian Motion and derives a fixed
//! set of analytics from one simulated path matrix:
//!
//! - **Pricing**: European call priced as the discounted mean payoff
//! - **Tail risk**: 95% Value-at-Risk and Conditional VaR of the terminal loss
//! - **Convergence**: running price estimate over the simulation count
//! - **Drawdown**: peak-to-trough profile of a representative path
//!
//! ## Quick Start
//!
//! ```rust
//! use gbm_risk::mc::config::SimulationConfig;
//! use gbm_risk::mc::simulator::GbmSimulator;
//!
//! let config = SimulationConfig {
//!     n_sims: 2_000,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let simulator = GbmSimulator::new(config).expect("Valid configuration");
//! let result = simulator.compute_analytics(105.0).expect("Valid strike");
//! assert!(result.var_95 <= result.cvar_95);
//! println!("Call price: {:.2}", result.call_price);
//! ```
//!
//! ## Mathematical Foundation
//!
//! Prices follow the exact GBM discretisation
//! ```text
//! S_{t+dt} = S_t * exp((μ - σ²/2)dt + σ√dt * Z),   Z ~ N(0,1)
//! ```
//! and the call price is discounted with the same drift `μ` used to simulate.

pub mod analytics;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod render;
pub mod rng;

// Re-export commonly used types for convenience
pub use analytics::engine::{compute_analytics, AnalyticsResult};
pub use error::{SimError, SimResult};
pub use mc::config::SimulationConfig;
pub use mc::paths::PathMatrix;
pub use mc::simulator::{simulate, GbmSimulator};
