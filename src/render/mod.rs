// src/render/mod.rs
//! Chart descriptions and the sinks that draw them
//!
//! Analytics are turned into plain [`ChartSpec`] values (series, markers and a
//! title); a [`ChartSink`] decides how to materialise them. The four standard
//! charts are written under fixed file names.

mod csv;
#[cfg(feature = "charts")]
mod png;

pub use self::csv::CsvChartSink;
#[cfg(feature = "charts")]
pub use self::png::PngChartSink;

use crate::analytics::engine::AnalyticsResult;
use crate::analytics::risk::Histogram;
use crate::error::SimResult;
use bitflags::bitflags;
use std::path::{Path, PathBuf};
use tracing::debug;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ChartSet: u32 {
        const NONE              = 0;
        const PRICE_PATHS       = 1 << 0;
        const LOSS_DISTRIBUTION = 1 << 1;
        const CONVERGENCE       = 1 << 2;
        const DRAWDOWN          = 1 << 3;
        const ALL = Self::PRICE_PATHS.bits()
            | Self::LOSS_DISTRIBUTION.bits()
            | Self::CONVERGENCE.bits()
            | Self::DRAWDOWN.bits();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    PricePaths,
    LossDistribution,
    Convergence,
    Drawdown,
}

impl ChartKind {
    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::PricePaths => "01_price_paths.png",
            ChartKind::LossDistribution => "02_loss_distribution.png",
            ChartKind::Convergence => "03_convergence.png",
            ChartKind::Drawdown => "04_max_drawdown.png",
        }
    }

    fn flag(self) -> ChartSet {
        match self {
            ChartKind::PricePaths => ChartSet::PRICE_PATHS,
            ChartKind::LossDistribution => ChartSet::LOSS_DISTRIBUTION,
            ChartKind::Convergence => ChartSet::CONVERGENCE,
            ChartKind::Drawdown => ChartSet::DRAWDOWN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Palette,
    Grey,
    Black,
    Red,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    /// Polylines over the index axis, one per inner vector
    Lines { lines: Vec<Vec<f64>>, tone: Tone },
    /// Density histogram
    Bars { histogram: Histogram, tone: Tone },
    /// Line over the index axis with the area to zero filled
    Area { values: Vec<f64>, tone: Tone },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Reference line at a fixed coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub orientation: Orientation,
    pub value: f64,
    pub label: Option<String>,
    pub tone: Tone,
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub series: Vec<Series>,
    pub markers: Vec<Marker>,
    pub grid: bool,
}

/// Destination for rendered charts
pub trait ChartSink {
    fn render(&mut self, chart: &ChartSpec, path: &Path) -> SimResult<()>;
}

pub fn price_paths_chart(result: &AnalyticsResult) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::PricePaths,
        title: format!("GBM Paths Simulation (Price: {:.2})", result.call_price),
        series: vec![Series::Lines {
            lines: result.sample_paths.clone(),
            tone: Tone::Palette,
        }],
        markers: Vec::new(),
        grid: true,
    }
}

pub fn loss_distribution_chart(result: &AnalyticsResult) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::LossDistribution,
        title: "Terminal Loss Distribution (VaR & CVaR)".to_string(),
        series: vec![Series::Bars {
            histogram: result.loss_histogram.clone(),
            tone: Tone::Grey,
        }],
        markers: vec![
            Marker {
                orientation: Orientation::Vertical,
                value: result.var_95,
                label: Some(format!("VaR 95%: {:.2}", result.var_95)),
                tone: Tone::Black,
                style: LineStyle::Dashed,
            },
            Marker {
                orientation: Orientation::Vertical,
                value: result.cvar_95,
                label: Some(format!("CVaR 95%: {:.2}", result.cvar_95)),
                tone: Tone::Red,
                style: LineStyle::Solid,
            },
        ],
        grid: false,
    }
}

pub fn convergence_chart(result: &AnalyticsResult) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Convergence,
        title: "Monte Carlo Price Convergence".to_string(),
        series: vec![Series::Lines {
            lines: vec![result.running_price.clone()],
            tone: Tone::Blue,
        }],
        markers: vec![Marker {
            orientation: Orientation::Horizontal,
            value: result.call_price,
            label: None,
            tone: Tone::Red,
            style: LineStyle::Dotted,
        }],
        grid: true,
    }
}

pub fn drawdown_chart(result: &AnalyticsResult) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Drawdown,
        title: format!("Max Drawdown Profile: {}", format_percent(result.max_drawdown)),
        series: vec![Series::Area {
            values: result.drawdown.clone(),
            tone: Tone::Red,
        }],
        markers: Vec::new(),
        grid: true,
    }
}

/// Fraction as a percentage with two decimals, `-0.1234` → `-12.34%`
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Chart specs for every kind selected in `set`, in file-name order
pub fn chart_specs(result: &AnalyticsResult, set: ChartSet) -> Vec<ChartSpec> {
    let builders: [(ChartKind, fn(&AnalyticsResult) -> ChartSpec); 4] = [
        (ChartKind::PricePaths, price_paths_chart),
        (ChartKind::LossDistribution, loss_distribution_chart),
        (ChartKind::Convergence, convergence_chart),
        (ChartKind::Drawdown, drawdown_chart),
    ];
    builders
        .iter()
        .filter(|(kind, _)| set.contains(kind.flag()))
        .map(|(_, build)| build(result))
        .collect()
}

/// Hand the selected charts to `sink`, one file per chart under `out_dir`
pub fn render_charts<S: ChartSink + ?Sized>(
    result: &AnalyticsResult,
    sink: &mut S,
    out_dir: &Path,
    set: ChartSet,
) -> SimResult<Vec<PathBuf>> {
    let mut written = Vec::new();
    for chart in chart_specs(result, set) {
        let path = out_dir.join(chart.kind.file_name());
        debug!(path = %path.display(), title = %chart.title, "rendering chart");
        sink.render(&chart, &path)?;
        written.push(path);
    }
    Ok(written)
}
