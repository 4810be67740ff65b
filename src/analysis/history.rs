//! # History Module / 历史数据模块
//!
//! Rebuilds per-test metric sequences from persisted JSON reports. Reports are
//! read in file-name order, which is chronological because the names embed a
//! `%Y%m%d_%H%M%S` stamp.
//!
//! 从持久化的 JSON 报告重建每个测试的指标序列。报告按文件名顺序读取，
//! 由于文件名包含 `%Y%m%d_%H%M%S` 时间戳，这一顺序即时间顺序。

use chrono::{DateTime, NaiveDateTime};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HarnessError, Result};

/// File-name pattern of persisted JSON reports.
pub const REPORT_GLOB: &str = "report_*.json";

/// One run of one test.
/// 一个测试的一次运行。
#[derive(Debug, Clone, PartialEq)]
pub struct TestMetric {
    /// Start time of the run that produced this metric.
    pub timestamp: NaiveDateTime,
    /// Seconds.
    pub duration: f64,
    /// Bytes.
    pub memory: f64,
    pub success: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredReport {
    start_time: String,
    #[serde(default)]
    categories: IndexMap<String, StoredCategory>,
}

#[derive(Debug, Deserialize)]
struct StoredCategory {
    #[serde(default)]
    tests: Vec<StoredTest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTest {
    name: String,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    memory_usage: f64,
    #[serde(default)]
    passed: bool,
}

/// Accepts RFC 3339 (`2024-01-01T10:00:00+02:00`, local wall time kept) and
/// naive ISO 8601 (`2024-01-01T10:00:00.123456`).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Lists `report_*.json` files in `dir`, sorted by file name.
pub fn discover_reports(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/{}", glob::Pattern::escape(&dir.to_string_lossy()), REPORT_GLOB);
    let mut files: Vec<PathBuf> = glob::glob(&pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Metric sequences per test name. Test names keep first-seen order; each
/// sequence keeps report order.
///
/// 按测试名称分组的指标序列。测试名称保持首次出现的顺序，每个序列保持报告顺序。
#[derive(Debug, Default)]
pub struct MetricHistory {
    pub by_test: IndexMap<String, Vec<TestMetric>>,
    /// Reports that were read successfully.
    pub loaded: Vec<PathBuf>,
    /// Reports that were skipped, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

impl MetricHistory {
    /// Loads every report in `dir`. A report that cannot be read or parsed is
    /// recorded in `skipped` and does not stop the others.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(HarnessError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("report directory not found: {}", dir.display()),
            )));
        }

        let mut history = MetricHistory::default();
        for path in discover_reports(dir)? {
            let outcome = fs::read_to_string(&path)
                .map_err(HarnessError::from)
                .and_then(|content| history.ingest(&content, &path));
            match outcome {
                Ok(()) => history.loaded.push(path),
                Err(e) => {
                    tracing::warn!("Error loading {}: {e}", path.display());
                    history.skipped.push((path, e.to_string()));
                }
            }
        }
        Ok(history)
    }

    /// Appends the metrics of one report. Nothing is appended when the report
    /// fails to parse.
    pub fn ingest(&mut self, content: &str, origin: &Path) -> Result<()> {
        let report: StoredReport =
            serde_json::from_str(content).map_err(|e| HarnessError::ReportParse {
                path: origin.to_path_buf(),
                reason: e.to_string(),
            })?;
        let timestamp =
            parse_timestamp(&report.start_time).ok_or_else(|| HarnessError::ReportParse {
                path: origin.to_path_buf(),
                reason: format!("invalid startTime `{}`", report.start_time),
            })?;

        for category in report.categories.into_values() {
            for test in category.tests {
                self.by_test.entry(test.name).or_default().push(TestMetric {
                    timestamp,
                    duration: test.duration,
                    memory: test.memory_usage,
                    success: test.passed,
                });
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.by_test.is_empty()
    }
}
