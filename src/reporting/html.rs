//! # HTML Reporting Module / HTML 报告模块
//!
//! The HTML report is a user-supplied template in which the literal token
//! `"{{RESULTS}}"` (quotes included) is replaced by the JSON results, so the
//! template's script receives them as an object literal.
//!
//! HTML 报告基于用户提供的模板，其中的字面量 `"{{RESULTS}}"`（包括引号）
//! 会被替换为 JSON 结果，模板中的脚本因此得到一个对象字面量。

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::models::Results;
use crate::reporting::json::render_json;

/// The placeholder replaced in the template.
pub const RESULTS_TOKEN: &str = "\"{{RESULTS}}\"";

/// Substitutes every occurrence of [`RESULTS_TOKEN`] in `template`.
pub fn render_html(template: &str, results: &Results) -> Result<String> {
    let json = render_json(results)?;
    Ok(template.replace(RESULTS_TOKEN, &json))
}

/// Renders `template_path` into `output_path`. Returns `Ok(false)` and logs a
/// warning when the template does not exist; that is not an error.
///
/// 将 `template_path` 渲染到 `output_path`。模板不存在时记录警告并返回 `Ok(false)`，不视为错误。
pub fn generate_html_report(
    results: &Results,
    template_path: &Path,
    output_path: &Path,
) -> Result<bool> {
    if !template_path.is_file() {
        tracing::warn!(
            template = %template_path.display(),
            "HTML template not found, skipping HTML report"
        );
        return Ok(false);
    }

    let template = fs::read_to_string(template_path)
        .with_context(|| format!("Failed to read HTML template: {}", template_path.display()))?;
    let html = render_html(&template, results)?;
    fs::write(output_path, html)
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))?;
    tracing::info!(path = %output_path.display(), "Wrote HTML report");
    Ok(true)
}
