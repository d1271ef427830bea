// src/render/csv.rs
use super::{ChartSink, ChartSpec, Orientation, Series};
use crate::error::SimResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes each chart's data as CSV beside the requested image path
/// (`01_price_paths.png` → `01_price_paths.csv`).
///
/// Title and markers go into leading `#` comment lines.
#[derive(Debug, Default)]
pub struct CsvChartSink {
    written: Vec<PathBuf>,
}

impl CsvChartSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files produced so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ChartSink for CsvChartSink {
    fn render(&mut self, chart: &ChartSpec, path: &Path) -> SimResult<()> {
        let target = path.with_extension("csv");
        let mut out = BufWriter::new(File::create(&target)?);

        writeln!(out, "# {}", chart.title)?;
        for marker in &chart.markers {
            let orientation = match marker.orientation {
                Orientation::Vertical => "vertical",
                Orientation::Horizontal => "horizontal",
            };
            writeln!(
                out,
                "# marker,{},{},{}",
                orientation,
                marker.value,
                marker.label.as_deref().unwrap_or("")
            )?;
        }

        for series in &chart.series {
            match series {
                Series::Lines { lines, .. } => write_lines(&mut out, lines)?,
                Series::Bars { histogram, .. } => {
                    writeln!(out, "bin_left,bin_right,density")?;
                    for (left, right, density) in histogram.bins() {
                        writeln!(out, "{},{},{}", left, right, density)?;
                    }
                }
                Series::Area { values, .. } => {
                    writeln!(out, "step,value")?;
                    for (i, value) in values.iter().enumerate() {
                        writeln!(out, "{},{}", i, value)?;
                    }
                }
            }
        }

        out.flush()?;
        self.written.push(target);
        Ok(())
    }
}

fn write_lines<W: Write>(out: &mut W, lines: &[Vec<f64>]) -> SimResult<()> {
    let header: Vec<String> = std::iter::once("step".to_string())
        .chain((0..lines.len()).map(|i| format!("series_{}", i)))
        .collect();
    writeln!(out, "{}", header.join(","))?;

    let len = lines.iter().map(Vec::len).max().unwrap_or(0);
    for step in 0..len {
        write!(out, "{}", step)?;
        for line in lines {
            match line.get(step) {
                Some(value) => write!(out, ",{}", value)?,
                None => write!(out, ",")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
