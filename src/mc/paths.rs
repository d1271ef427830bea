// src/mc/paths.rs
use ndarray::{s, Array2, ArrayView1, ArrayView2, Axis};

/// Simulated prices, one row per time step and one column per simulation.
///
/// Row 0 holds the spot price for every column; row `steps` holds the terminal
/// prices. The matrix is immutable once the simulator hands it out.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatrix {
    prices: Array2<f64>,
}

impl PathMatrix {
    pub(crate) fn from_array(prices: Array2<f64>) -> Self {
        PathMatrix { prices }
    }

    /// Number of time steps (rows minus the initial row)
    pub fn steps(&self) -> usize {
        self.prices.nrows() - 1
    }

    pub fn n_sims(&self) -> usize {
        self.prices.ncols()
    }

    pub fn as_array(&self) -> ArrayView2<'_, f64> {
        self.prices.view()
    }

    /// Prices of every simulation at time index `t`
    pub fn row(&self, t: usize) -> ArrayView1<'_, f64> {
        self.prices.row(t)
    }

    pub fn terminal_prices(&self) -> ArrayView1<'_, f64> {
        self.prices.row(self.steps())
    }

    /// One simulated trajectory, `steps + 1` prices
    pub fn path(&self, index: usize) -> ArrayView1<'_, f64> {
        self.prices.column(index)
    }

    pub fn paths(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.prices.axis_iter(Axis(1))
    }

    /// Owned copies of the first `count` trajectories (fewer if the matrix is narrower)
    pub fn leading_paths(&self, count: usize) -> Vec<Vec<f64>> {
        let count = count.min(self.n_sims());
        self.prices
            .slice(s![.., ..count])
            .axis_iter(Axis(1))
            .map(|column| column.to_vec())
            .collect()
    }
}
