pub mod bs_analytic;
pub mod drawdown;
pub mod engine;
pub mod pricing;
pub mod risk;
