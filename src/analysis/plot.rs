//! # Plot Module / 图表模块
//!
//! Draws one three-panel SVG chart per test: duration, memory in MiB and the
//! rolling success rate, each against the run index.
//!
//! 为每个测试绘制一张三面板 SVG 图表：耗时、以 MiB 为单位的内存和滚动成功率，
//! 横轴为运行序号。

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

use crate::analysis::history::TestMetric;
use crate::analysis::trend::{ROLLING_WINDOW, success_rate_series};
use crate::error::{HarnessError, Result};
use crate::infra::fs::sanitize_file_name;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;
const PLOT_SIZE: (u32, u32) = (1200, 900);

/// `<output_dir>/<test>_trends.svg`
pub fn plot_path(output_dir: &Path, test_name: &str) -> PathBuf {
    output_dir.join(format!("{}_trends.svg", sanitize_file_name(test_name)))
}

/// Renders the chart for one test and returns its path.
pub fn plot_test_metrics(test_name: &str, metrics: &[TestMetric], output_dir: &Path) -> Result<PathBuf> {
    let path = plot_path(output_dir, test_name);
    let fail = |reason: String| HarnessError::Plot {
        path: path.clone(),
        reason,
    };

    let durations: Vec<(f64, f64)> = metrics
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.duration))
        .collect();
    let memories: Vec<(f64, f64)> = metrics
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.memory / BYTES_PER_MIB))
        .collect();
    let rates: Vec<(f64, f64)> = success_rate_series(metrics)
        .iter()
        .enumerate()
        .map(|(i, s)| ((i + ROLLING_WINDOW - 1) as f64, s.value))
        .collect();

    {
        let root = SVGBackend::new(&path, PLOT_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| fail(e.to_string()))?;
        let panels = root.split_evenly((3, 1));

        let title = format!("{test_name} - Performance Trends");
        draw_panel(&panels[0], Some(&title), "Duration (s)", "Duration", &durations, BLUE)
            .map_err(&fail)?;
        draw_panel(&panels[1], None, "Memory (MiB)", "Memory Usage", &memories, GREEN)
            .map_err(&fail)?;
        draw_panel(&panels[2], None, "Success Rate", "Success Rate", &rates, RED)
            .map_err(&fail)?;

        root.present().map_err(|e| fail(e.to_string()))?;
    }

    Ok(path)
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    caption: Option<&str>,
    y_desc: &str,
    label: &str,
    points: &[(f64, f64)],
    color: RGBColor,
) -> std::result::Result<(), String> {
    let x_max = points.iter().map(|p| p.0).fold(0.0, f64::max) + 1.0;
    let (y_min, y_max) = y_bounds(points);

    let mut builder = ChartBuilder::on(area);
    builder.margin(10).x_label_area_size(30).y_label_area_size(60);
    if let Some(caption) = caption {
        builder.caption(caption, ("sans-serif", 22));
    }
    let mut chart = builder
        .build_cartesian_2d(0f64..x_max, y_min..y_max)
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .x_desc("Run")
        .y_desc(y_desc)
        .draw()
        .map_err(|e| e.to_string())?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
        .map_err(|e| e.to_string())?
        .label(label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| e.to_string())?;

    Ok(())
}

/// Value range with some headroom; a flat or empty series still gets a
/// non-empty range.
fn y_bounds(points: &[(f64, f64)]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 1.0);
    }
    let min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.1;
    (min - pad, max + pad)
}
