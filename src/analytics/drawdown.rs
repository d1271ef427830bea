// src/analytics/drawdown.rs
//! Peak-to-trough drawdown of a price path
//!
//! ```text
//! peak_t = max(S_0, ..., S_t)
//! dd_t   = (S_t - peak_t) / peak_t        (always ≤ 0)
//! ```

use crate::mc::paths::PathMatrix;
use ndarray::parallel::prelude::*;
use ndarray::Axis;

/// Drawdown at every time step of `path`; the first entry is exactly zero
pub fn drawdown_series<I>(path: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut peak = f64::NEG_INFINITY;
    path.into_iter()
        .map(|price| {
            peak = peak.max(price);
            (price - peak) / peak
        })
        .collect()
}

/// Deepest drawdown of a series, zero for an empty series
pub fn max_drawdown(drawdowns: &[f64]) -> f64 {
    drawdowns.iter().copied().fold(0.0, f64::min)
}

/// Deepest single-path drawdown across every simulated path
pub fn worst_max_drawdown(paths: &PathMatrix) -> f64 {
    paths
        .as_array()
        .axis_iter(Axis(1))
        .into_par_iter()
        .map(|column| max_drawdown(&drawdown_series(column.iter().copied())))
        .reduce(|| 0.0, f64::min)
}
