//! # Trend Report Module / 趋势报告模块
//!
//! Renders the plain-text trend report, one section per test.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

use crate::analysis::trend::{ROLLING_WINDOW, TestTrends, TrendAnalysis};

/// File name of the text report inside the output directory.
pub const TREND_REPORT_FILE: &str = "trend_analysis.txt";

const ANOMALY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn render_trend_report(trends: &IndexMap<String, TestTrends>) -> String {
    let mut out = String::new();
    out.push_str("Test Performance Trend Analysis\n");
    out.push_str("===============================\n\n");

    if trends.is_empty() {
        out.push_str("No test history found.\n");
        return out;
    }

    for (name, test) in trends {
        out.push_str(&format!("\n{name}\n"));
        out.push_str(&format!("{}\n\n", "-".repeat(name.chars().count())));
        out.push_str(&format!("Runs analyzed: {}\n\n", test.runs));

        out.push_str("Duration Analysis:\n");
        write_metric_analysis(&mut out, &test.duration);

        out.push_str("\nMemory Usage Analysis:\n");
        write_metric_analysis(&mut out, &test.memory);

        out.push_str("\nSuccess Rate Analysis:\n");
        match &test.success_rate {
            Some(analysis) => write_metric_analysis(&mut out, analysis),
            None => out.push_str(&format!(
                "  Insufficient history: {} run(s), {} needed for a rolling window\n",
                test.runs, ROLLING_WINDOW
            )),
        }

        out.push_str(&format!("\n{}\n", "=".repeat(50)));
    }
    out
}

fn write_metric_analysis(out: &mut String, analysis: &TrendAnalysis) {
    out.push_str(&format!("  Mean: {:.2}\n", analysis.mean));
    out.push_str(&format!("  Standard Deviation: {:.2}\n", analysis.std_dev));
    out.push_str(&format!(
        "  Trend: {} ({:.2} per test)\n",
        analysis.direction(),
        analysis.trend.abs()
    ));
    if !analysis.anomalies.is_empty() {
        out.push_str("  Anomalies detected at:\n");
        for timestamp in &analysis.anomalies {
            out.push_str(&format!("    - {}\n", timestamp.format(ANOMALY_TIME_FORMAT)));
        }
    }
    out.push_str(&format!("  Next predicted value: {:.2}\n", analysis.prediction));
}

/// Writes the rendered report to `path`.
pub fn write_trend_report(trends: &IndexMap<String, TestTrends>, path: &Path) -> Result<()> {
    fs::write(path, render_trend_report(trends))
        .with_context(|| format!("Failed to write trend report: {}", path.display()))
}
