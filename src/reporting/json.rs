//! # JSON Reporting Module / JSON 报告模块
//!
//! The JSON report is the durable record the trend analyzer reads back.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::models::Results;

/// Pretty-printed JSON of the whole run.
pub fn render_json(results: &Results) -> Result<String> {
    serde_json::to_string_pretty(results).context("Failed to serialize results")
}

/// Writes [`render_json`] to `output_path`.
pub fn write_json_report(results: &Results, output_path: &Path) -> Result<()> {
    let json = render_json(results)?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report: {}", output_path.display()))?;
    tracing::info!(path = %output_path.display(), "Wrote JSON report");
    Ok(())
}
