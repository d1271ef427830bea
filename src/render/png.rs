// src/render/png.rs
use super::{ChartSink, ChartSpec, LineStyle, Marker, Orientation, Series, Tone};
use crate::error::{SimError, SimResult};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

/// 10 × 6 inches at 300 dpi
const CANVAS: (u32, u32) = (3000, 1800);
const FONT: &str = "sans-serif";

/// Draws charts to PNG files with plotters' bitmap backend
#[derive(Debug, Clone, Copy, Default)]
pub struct PngChartSink;

impl PngChartSink {
    pub fn new() -> Self {
        PngChartSink
    }
}

impl ChartSink for PngChartSink {
    fn render(&mut self, chart: &ChartSpec, path: &Path) -> SimResult<()> {
        draw(chart, path).map_err(|e| SimError::Render {
            artifact: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

fn color(tone: Tone, index: usize) -> RGBAColor {
    match tone {
        Tone::Palette => Palette99::pick(index).mix(0.5),
        Tone::Grey => RGBColor(169, 169, 169).mix(1.0),
        Tone::Black => BLACK.mix(1.0),
        Tone::Red => RED.mix(1.0),
        Tone::Blue => BLUE.mix(1.0),
    }
}

fn bounds(chart: &ChartSpec) -> (Range<f64>, Range<f64>) {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    let extend = |range: &mut (f64, f64), v: f64| {
        if v.is_finite() {
            range.0 = range.0.min(v);
            range.1 = range.1.max(v);
        }
    };

    for series in &chart.series {
        match series {
            Series::Lines { lines, .. } => {
                for line in lines {
                    extend(&mut x, 0.0);
                    extend(&mut x, line.len().saturating_sub(1) as f64);
                    line.iter().for_each(|&v| extend(&mut y, v));
                }
            }
            Series::Bars { histogram, .. } => {
                for (left, right, density) in histogram.bins() {
                    extend(&mut x, left);
                    extend(&mut x, right);
                    extend(&mut y, density);
                }
                extend(&mut y, 0.0);
            }
            Series::Area { values, .. } => {
                extend(&mut x, 0.0);
                extend(&mut x, values.len().saturating_sub(1) as f64);
                values.iter().for_each(|&v| extend(&mut y, v));
                extend(&mut y, 0.0);
            }
        }
    }
    for marker in &chart.markers {
        match marker.orientation {
            Orientation::Vertical => extend(&mut x, marker.value),
            Orientation::Horizontal => extend(&mut y, marker.value),
        }
    }

    (padded(x), padded(y))
}

fn padded((lo, hi): (f64, f64)) -> Range<f64> {
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - pad)..(hi + pad)
}

fn marker_points(marker: &Marker, x: &Range<f64>, y: &Range<f64>) -> Vec<(f64, f64)> {
    match marker.orientation {
        Orientation::Vertical => vec![(marker.value, y.start), (marker.value, y.end)],
        Orientation::Horizontal => vec![(x.start, marker.value), (x.end, marker.value)],
    }
}

fn draw(chart: &ChartSpec, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_range, y_range) = bounds(chart);
    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, (FONT, 56))
        .margin(40)
        .x_label_area_size(90)
        .y_label_area_size(140)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    let mut mesh = ctx.configure_mesh();
    mesh.label_style((FONT, 36));
    if chart.grid {
        mesh.light_line_style(BLACK.mix(0.05))
            .bold_line_style(BLACK.mix(0.25));
    } else {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    for series in &chart.series {
        match series {
            Series::Lines { lines, tone } => {
                for (i, line) in lines.iter().enumerate() {
                    ctx.draw_series(LineSeries::new(
                        line.iter().enumerate().map(|(t, &v)| (t as f64, v)),
                        color(*tone, i).stroke_width(2),
                    ))?;
                }
            }
            Series::Bars { histogram, tone } => {
                let fill = color(*tone, 0);
                ctx.draw_series(histogram.bins().map(|(left, right, density)| {
                    Rectangle::new([(left, 0.0), (right, density)], fill.filled())
                }))?;
                ctx.draw_series(histogram.bins().map(|(left, right, density)| {
                    Rectangle::new([(left, 0.0), (right, density)], WHITE.stroke_width(1))
                }))?;
            }
            Series::Area { values, tone } => {
                let base = color(*tone, 0);
                let points: Vec<(f64, f64)> =
                    values.iter().enumerate().map(|(t, &v)| (t as f64, v)).collect();
                ctx.draw_series(
                    AreaSeries::new(points.iter().copied(), 0.0, base.mix(0.2))
                        .border_style(base.stroke_width(2)),
                )?;
            }
        }
    }

    let mut labelled = false;
    for marker in &chart.markers {
        let stroke = color(marker.tone, 0).stroke_width(match marker.style {
            LineStyle::Solid => 3,
            LineStyle::Dashed | LineStyle::Dotted => 2,
        });
        let points = marker_points(marker, &x_range, &y_range);
        let drawn = match marker.style {
            LineStyle::Solid => ctx.draw_series(LineSeries::new(points, stroke))?,
            LineStyle::Dashed => ctx.draw_series(DashedLineSeries::new(points, 24, 12, stroke))?,
            LineStyle::Dotted => ctx.draw_series(DashedLineSeries::new(points, 4, 8, stroke))?,
        };
        if let Some(label) = &marker.label {
            labelled = true;
            drawn
                .label(label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 40, y)], stroke));
        }
    }

    if labelled {
        ctx.configure_series_labels()
            .label_font((FONT, 36))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::risk::Histogram;
    use crate::render::ChartKind;

    #[test]
    fn test_bounds_cover_markers_and_zero() {
        let chart = ChartSpec {
            kind: ChartKind::LossDistribution,
            title: String::new(),
            series: vec![Series::Bars {
                histogram: Histogram::density(&[1.0, 2.0, 3.0], 3),
                tone: Tone::Grey,
            }],
            markers: vec![Marker {
                orientation: Orientation::Vertical,
                value: 10.0,
                label: None,
                tone: Tone::Red,
                style: LineStyle::Solid,
            }],
            grid: false,
        };
        let (x, y) = bounds(&chart);
        assert!(x.start < 1.0 && x.end > 10.0);
        assert!(y.start < 0.0);
    }

    #[test]
    fn test_padded_degenerate_range() {
        assert_eq!(padded((2.0, 2.0)), 1.5..2.5);
        assert_eq!(padded((f64::INFINITY, f64::NEG_INFINITY)), 0.0..1.0);
    }
}
