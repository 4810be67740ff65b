//! # CSV Reporting Module / CSV 报告模块
//!
//! One row per category, in execution order.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::models::Results;

pub const CSV_HEADER: &str = "Category,Total,Passed,Failed,Skipped,Duration";

/// Renders the per-category table. Durations use two decimals and every row
/// ends with `\n`.
///
/// ```text
/// Category,Total,Passed,Failed,Skipped,Duration
/// unit,10,9,1,0,1.23
/// ```
pub fn render_csv(results: &Results) -> String {
    let mut csv = String::new();
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for (name, category) in results.categories() {
        csv.push_str(&format!(
            "{},{},{},{},{},{:.2}\n",
            escape_field(name),
            category.total,
            category.passed,
            category.failed,
            category.skipped,
            category.duration
        ));
    }
    csv
}

/// Writes [`render_csv`] to `output_path`.
pub fn write_csv_report(results: &Results, output_path: &Path) -> Result<()> {
    fs::write(output_path, render_csv(results))
        .with_context(|| format!("Failed to write CSV report: {}", output_path.display()))?;
    tracing::info!(path = %output_path.display(), "Wrote CSV report");
    Ok(())
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
