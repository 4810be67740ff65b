//! # Analyze Command Module / 分析命令模块
//!
//! Implements `analyze-trends`: load history, draw plots, write the text report.
//!
//! 实现 `analyze-trends`：加载历史数据，绘制图表，写出文本报告。

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{
    MetricHistory, analyze_all,
    plot::plot_test_metrics,
    report::{TREND_REPORT_FILE, write_trend_report},
};

/// What an analysis run produced.
#[derive(Debug)]
pub struct AnalysisOutput {
    pub report: PathBuf,
    pub plots: Vec<PathBuf>,
    pub tests: usize,
    pub skipped_reports: usize,
}

/// Runs the trend analysis over `report_dir` and writes into `output_dir`.
/// Unreadable reports and failed plots are reported and skipped.
pub fn execute(report_dir: &Path, output_dir: &Path) -> Result<AnalysisOutput> {
    let history = MetricHistory::load(report_dir)
        .with_context(|| format!("Failed to load reports from {}", report_dir.display()))?;

    for (path, reason) in &history.skipped {
        println!("{}", format!("Error loading {}: {reason}", path.display()).yellow());
    }
    println!(
        "Loaded {} report(s) covering {} test(s)",
        history.loaded.len(),
        history.by_test.len()
    );

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let mut plots = Vec::new();
    for (name, metrics) in &history.by_test {
        match plot_test_metrics(name, metrics, output_dir) {
            Ok(path) => plots.push(path),
            Err(e) => tracing::warn!("Skipping plot for {name}: {e}"),
        }
    }

    let trends = analyze_all(&history);
    let report = output_dir.join(TREND_REPORT_FILE);
    write_trend_report(&trends, &report)?;

    println!(
        "{}",
        format!("Analysis completed. Results saved to {}", output_dir.display()).green()
    );

    Ok(AnalysisOutput {
        report,
        plots,
        tests: trends.len(),
        skipped_reports: history.skipped.len(),
    })
}
