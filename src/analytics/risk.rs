// src/analytics/risk.rs
//! Terminal loss distribution and tail risk
//!
//! Loss is measured against the spot price, `L_i = S0 - S_T,i`, so positive
//! values are losses. VaR is the linearly interpolated percentile of the loss
//! sample; CVaR is the mean of every loss at or above VaR.

use statrs::statistics::Statistics;

/// Confidence level used for the reported VaR / CVaR pair
pub const CONFIDENCE_95: f64 = 0.95;

pub fn losses<'a, I>(s0: f64, terminal_prices: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a f64>,
{
    terminal_prices.into_iter().map(|&st| s0 - st).collect()
}

/// Percentile with linear interpolation between closest ranks.
///
/// `q` is a fraction in `[0, 1]`; the rank is `q * (n - 1)` on the sorted
/// sample. Returns NaN for an empty sample.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let lower = sorted[lo];
    let upper = sorted[hi];
    if lo == hi || lower == upper {
        lower
    } else {
        lower + (rank - lo as f64) * (upper - lower)
    }
}

pub fn value_at_risk(losses: &[f64], confidence: f64) -> f64 {
    percentile(losses, confidence)
}

/// Mean of the losses at or beyond `var` (inclusive threshold)
pub fn conditional_var(losses: &[f64], var: f64) -> f64 {
    losses.iter().filter(|&&loss| loss >= var).mean()
}

/// Equal-width histogram normalised so the bars integrate to one
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending bin edges
    pub edges: Vec<f64>,
    /// Density of each bin, `count / (n * width)`
    pub densities: Vec<f64>,
}

impl Histogram {
    /// Bin `values` over `[min, max]`; the last bin is closed on the right.
    ///
    /// A degenerate sample (all values equal) is binned over `[v - 0.5, v + 0.5]`.
    pub fn density(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        if values.is_empty() {
            return Histogram {
                edges: (0..=bins).map(|i| i as f64 / bins as f64).collect(),
                densities: vec![0.0; bins],
            };
        }

        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let norm = values.len() as f64 * width;
        Histogram {
            edges: (0..=bins).map(|i| lo + i as f64 * width).collect(),
            densities: counts.iter().map(|&c| c as f64 / norm).collect(),
        }
    }

    /// `(left edge, right edge, density)` for each bin
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.densities)
            .map(|(edge, &density)| (edge[0], edge[1], density))
    }
}
