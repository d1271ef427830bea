// src/analytics/pricing.rs
//! European call pricing from terminal prices
//!
//! ```text
//! payoff_i = max(S_T,i - K, 0)
//! C        = e^(-μT) * (1/n) Σ payoff_i
//! ```
//! The discount uses the simulation drift `μ`, not a separate risk-free rate.

use statrs::statistics::Statistics;

/// Call payoff for every terminal price
pub fn call_payoffs<'a, I>(terminal_prices: I, strike: f64) -> Vec<f64>
where
    I: IntoIterator<Item = &'a f64>,
{
    terminal_prices
        .into_iter()
        .map(|&st| (st - strike).max(0.0))
        .collect()
}

/// Discounted mean payoff
pub fn call_price(payoffs: &[f64], discount: f64) -> f64 {
    discount * payoffs.mean()
}

/// Discounted running mean of the payoffs, one entry per simulation count `1..=n`.
///
/// The last entry equals [`call_price`] up to summation order.
pub fn running_price(payoffs: &[f64], discount: f64) -> Vec<f64> {
    payoffs
        .iter()
        .scan(0.0, |sum, &payoff| {
            *sum += payoff;
            Some(*sum)
        })
        .enumerate()
        .map(|(i, cumulative)| discount * cumulative / (i + 1) as f64)
        .collect()
}

/// Standard error of the discounted price estimate, zero below two samples
pub fn standard_error(payoffs: &[f64], discount: f64) -> f64 {
    if payoffs.len() < 2 {
        return 0.0;
    }
    discount * payoffs.std_dev() / (payoffs.len() as f64).sqrt()
}
