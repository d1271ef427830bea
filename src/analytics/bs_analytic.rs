// src/analytics/bs_analytic.rs
//! Closed-form reference price for the Monte Carlo estimator
//!
//! # Mathematical Foundation
//!
//! The simulator grows prices at drift `μ` and discounts payoffs at `μ`, so the
//! estimator converges to the Black-Scholes call price with `r = μ`:
//! ```text
//! C(S,K,μ,σ,T) = S*Φ(d₁) - K*e^(-μT)*Φ(d₂)
//! d₁ = [ln(S/K) + (μ + σ²/2)T] / (σ√T)
//! d₂ = d₁ - σ√T
//! ```

use crate::math_utils::norm_cdf;

/// Black-Scholes European call option price
///
/// # Parameters
/// - `s`: Current stock price
/// - `k`: Strike price
/// - `r`: Continuously compounded growth and discount rate
/// - `sigma`: Volatility
/// - `t`: Time to expiration
///
/// Zero volatility and zero strike collapse to the discounted forward payoff.
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let discounted_strike = k * (-r * t).exp();
    if k <= 0.0 || sigma <= 0.0 || t <= 0.0 {
        return (s - discounted_strike).max(0.0);
    }
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt());
    let d2 = d1 - sigma * t.sqrt();
    s * norm_cdf(d1) - discounted_strike * norm_cdf(d2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_textbook_value() {
        // S=100, K=100, r=5%, σ=20%, T=1
        assert_relative_eq!(bs_call_price(100.0, 100.0, 0.05, 0.2, 1.0), 10.450_583_572_185_565, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_vol_is_discounted_forward_payoff() {
        let price = bs_call_price(100.0, 105.0, 0.05, 0.0, 1.0);
        let expected = ((100.0 * 0.05f64.exp()) - 105.0) * (-0.05f64).exp();
        assert_relative_eq!(price, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_strike_is_spot() {
        assert_eq!(bs_call_price(100.0, 0.0, 0.05, 0.2, 1.0), 100.0);
    }
}
