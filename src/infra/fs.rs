//! # File System Operations Module / 文件系统操作模块
//!
//! Helpers for the output directory layout, per-category logs and file-name
//! sanitizing.
//!
//! 输出目录结构、类别日志和文件名清理的辅助函数。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Sub-directories created under the output directory.
pub const OUTPUT_SUBDIRS: [&str; 3] = ["logs", "reports", "metrics"];

/// Creates the output directory with its `logs/`, `reports/` and `metrics/`
/// sub-directories, and the temp directory.
pub fn prepare_directories(output_dir: &Path, temp_dir: &Path) -> Result<()> {
    for subdir in OUTPUT_SUBDIRS {
        let path = output_dir.join(subdir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    fs::create_dir_all(temp_dir)
        .with_context(|| format!("Failed to create temp directory: {}", temp_dir.display()))?;
    Ok(())
}

/// Removes `path` with everything in it and creates it again, empty.
pub fn recreate_dir(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory: {}", path.display()))?;
    }
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    Ok(())
}

/// Replaces every character that is not alphanumeric, `-`, `_` or `.` so the
/// name can be used as a file name.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Writes the captured output of a category to `<logs_dir>/<category>.log`.
pub fn write_category_log(logs_dir: &Path, category: &str, output: &str) -> Result<PathBuf> {
    let path = logs_dir.join(format!("{}.log", sanitize_file_name(category)));
    fs::write(&path, output)
        .with_context(|| format!("Failed to write log file: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("Radio.TimeWindow"), "Radio.TimeWindow");
        assert_eq!(sanitize_file_name("Suite/Param 1"), "Suite_Param_1");
    }
}
