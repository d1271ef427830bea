// src/analytics/engine.rs
//! Analytics over one simulated path matrix
//!
//! Every figure in [`AnalyticsResult`] is derived from the same matrix, so the
//! paths shown, the price reported and the risk figures never disagree.

use super::{bs_analytic, drawdown, pricing, risk};
use crate::error::{validation::*, SimResult};
use crate::mc::config::SimulationConfig;
use crate::mc::paths::PathMatrix;
use crate::mc::simulator::GbmSimulator;
use tracing::info;

/// Number of trajectories kept for the price-path chart
pub const SAMPLE_PATHS: usize = 100;
/// Bin count of the loss histogram
pub const LOSS_BINS: usize = 60;
/// Trajectory used for the drawdown profile
pub const DRAWDOWN_PATH: usize = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsResult {
    pub strike: f64,
    pub discount_factor: f64,
    pub terminal_prices: Vec<f64>,
    pub payoffs: Vec<f64>,
    pub losses: Vec<f64>,
    pub call_price: f64,
    /// Standard error of `call_price`
    pub std_error: f64,
    /// Closed-form price the estimator converges to
    pub reference_price: f64,
    pub var_95: f64,
    pub cvar_95: f64,
    pub loss_histogram: risk::Histogram,
    /// Discounted running mean payoff, one entry per simulation count
    pub running_price: Vec<f64>,
    /// Drawdown profile of path 0
    pub drawdown: Vec<f64>,
    pub max_drawdown: f64,
    /// Deepest drawdown over all paths
    pub worst_max_drawdown: f64,
    /// First [`SAMPLE_PATHS`] trajectories, for plotting
    pub sample_paths: Vec<Vec<f64>>,
}

/// Validate everything, simulate once, and derive all analytics
pub fn compute_analytics(config: &SimulationConfig, strike: f64) -> SimResult<AnalyticsResult> {
    GbmSimulator::new(config.clone())?.compute_analytics(strike)
}

/// Derive all analytics from an existing path matrix
pub fn analyze_paths(
    config: &SimulationConfig,
    paths: &PathMatrix,
    strike: f64,
) -> SimResult<AnalyticsResult> {
    validate_non_negative("strike", strike)?;

    let terminal_prices = paths.terminal_prices().to_vec();
    let discount_factor = config.discount_factor();

    let payoffs = pricing::call_payoffs(&terminal_prices, strike);
    let call_price = pricing::call_price(&payoffs, discount_factor);
    let std_error = pricing::standard_error(&payoffs, discount_factor);
    let reference_price =
        bs_analytic::bs_call_price(config.s0, strike, config.mu, config.sigma, config.t);

    let losses = risk::losses(config.s0, &terminal_prices);
    let var_95 = risk::value_at_risk(&losses, risk::CONFIDENCE_95);
    let cvar_95 = risk::conditional_var(&losses, var_95);
    let loss_histogram = risk::Histogram::density(&losses, LOSS_BINS);

    let running_price = pricing::running_price(&payoffs, discount_factor);

    let drawdown = drawdown::drawdown_series(paths.path(DRAWDOWN_PATH).iter().copied());
    let max_drawdown = drawdown::max_drawdown(&drawdown);
    let worst_max_drawdown = drawdown::worst_max_drawdown(paths);

    info!(
        strike,
        call_price,
        std_error,
        reference_price,
        var_95,
        cvar_95,
        max_drawdown,
        "analytics computed"
    );

    Ok(AnalyticsResult {
        strike,
        discount_factor,
        terminal_prices,
        payoffs,
        losses,
        call_price,
        std_error,
        reference_price,
        var_95,
        cvar_95,
        loss_histogram,
        running_price,
        drawdown,
        max_drawdown,
        worst_max_drawdown,
        sample_paths: paths.leading_paths(SAMPLE_PATHS),
    })
}
