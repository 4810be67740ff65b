//! # Reporting Module / 报告模块
//!
//! This module serializes a finished run into the configured report formats and
//! prints the console summary.
//!
//! 此模块将完成的运行序列化为配置的报告格式，并打印控制台摘要。

pub mod console;
pub mod csv;
pub mod html;
pub mod json;

use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

use crate::core::config::{ReportFormat, TestConfig};
use crate::core::models::Results;

pub use console::{print_failure_details, print_summary};

/// Timestamp format embedded in report file names. Lexical order of the
/// resulting names equals chronological order.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `20240101_000000` style stamp for report file names.
pub fn report_timestamp(at: DateTime<Local>) -> String {
    at.format(REPORT_TIMESTAMP_FORMAT).to_string()
}

/// `<reports_dir>/report_<timestamp>.<ext>`
pub fn report_path(reports_dir: &Path, timestamp: &str, format: ReportFormat) -> PathBuf {
    reports_dir.join(format!("report_{timestamp}.{}", format.extension()))
}

/// Writes every configured format under `<outputDirectory>/reports/` with a
/// shared timestamp. A missing HTML template skips that format with a warning.
/// Returns the paths written.
///
/// 以共享时间戳在 `<outputDirectory>/reports/` 下写出所有配置的格式。
/// 缺少 HTML 模板时跳过该格式并给出警告。返回写出的路径。
pub fn generate_reports(
    results: &Results,
    config: &TestConfig,
    timestamp: &str,
) -> Result<Vec<PathBuf>> {
    let reports_dir = config.reports_dir();
    std::fs::create_dir_all(&reports_dir)?;

    let mut written = Vec::new();
    for format in &config.reporting.formats {
        let path = report_path(&reports_dir, timestamp, *format);
        match format {
            ReportFormat::Json => {
                json::write_json_report(results, &path)?;
                written.push(path);
            }
            ReportFormat::Csv => {
                csv::write_csv_report(results, &path)?;
                written.push(path);
            }
            ReportFormat::Html => {
                if html::generate_html_report(results, &config.general.html_template, &path)? {
                    written.push(path);
                }
            }
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_report_names_sort_chronologically() {
        let earlier = Local.with_ymd_and_hms(2024, 1, 2, 9, 5, 0).unwrap();
        let later = Local.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let a = report_path(Path::new("r"), &report_timestamp(earlier), ReportFormat::Json);
        let b = report_path(Path::new("r"), &report_timestamp(later), ReportFormat::Json);
        assert_eq!(a, PathBuf::from("r/report_20240102_090500.json"));
        assert!(a < b);
    }
}
