//! # Cleanup Module / 清理模块
//!
//! Empties the temp directory and expires old report files according to the
//! retention policy. Deletion is immediate; there is no backup step.
//!
//! 清空临时目录，并根据保留策略删除过期的报告文件。删除立即生效，没有备份步骤。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::core::config::{ReportFormat, TestConfig};
use crate::infra::fs::recreate_dir;

const SECONDS_PER_DAY: u64 = 86_400;

/// Glob pattern (relative to the reports directory) for a retention key.
/// Keys naming a report format match the runner's own `report_*.<ext>` files;
/// any other key matches `*_<key>.*`.
///
/// 保留策略键对应的 glob 模式（相对于报告目录）。
pub fn retention_pattern(report_type: &str) -> String {
    match ReportFormat::from_name(report_type) {
        Some(format) => format!("report_*.{}", format.extension()),
        None => format!("*_{report_type}.*"),
    }
}

/// Deletes files in `directory` matching `pattern` whose modification time is
/// at least `days` days before `now`. Returns the deleted paths.
///
/// A retention of 0 days deletes every matching file; a retention so large that
/// the cutoff precedes the epoch deletes nothing.
pub fn remove_expired(
    directory: &Path,
    pattern: &str,
    days: u64,
    now: SystemTime,
) -> Result<Vec<PathBuf>> {
    let Some(cutoff) = days
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|secs| now.checked_sub(Duration::from_secs(secs)))
    else {
        return Ok(Vec::new());
    };

    let full_pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&directory.to_string_lossy()),
        pattern
    );
    let mut removed = Vec::new();

    for entry in glob::glob(&full_pattern)
        .with_context(|| format!("Invalid retention pattern: {full_pattern}"))?
    {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Skipping unreadable path during cleanup: {e}");
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .with_context(|| format!("Failed to read modification time: {}", path.display()))?;
        if modified <= cutoff {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete {}", path.display()))?;
            tracing::info!(path = %path.display(), "Removed expired report");
            removed.push(path);
        }
    }

    Ok(removed)
}

/// Runs the full cleanup: recreate the temp directory, then apply every
/// retention rule to the reports directory.
pub fn run_cleanup(config: &TestConfig) -> Result<Vec<PathBuf>> {
    recreate_dir(&config.general.temp_directory)?;

    let reports_dir = config.reports_dir();
    let now = SystemTime::now();
    let mut removed = Vec::new();
    for (report_type, days) in &config.reporting.retention {
        let pattern = retention_pattern(report_type);
        removed.extend(remove_expired(&reports_dir, &pattern, *days, now)?);
    }
    Ok(removed)
}
