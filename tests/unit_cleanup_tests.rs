//! # Cleanup Unit Tests / 清理模块单元测试

mod common;

use fw_test_runner::core::cleanup::{remove_expired, retention_pattern, run_cleanup};
use serde_json::json;
use std::fs;
use std::time::{Duration, SystemTime};

fn seed_reports(dir: &std::path::Path) {
    fs::create_dir_all(dir).unwrap();
    for name in [
        "report_20240101_000000.json",
        "report_20240102_000000.json",
        "report_20240101_000000.csv",
        "notes.txt",
    ] {
        fs::write(dir.join(name), "{}").unwrap();
    }
}

#[test]
fn test_zero_days_removes_every_match() {
    let ws = common::Workspace::new();
    let dir = ws.reports_dir();
    seed_reports(&dir);

    let removed = remove_expired(&dir, &retention_pattern("json"), 0, SystemTime::now()).unwrap();

    assert_eq!(removed.len(), 2);
    assert!(!dir.join("report_20240101_000000.json").exists());
    assert!(dir.join("report_20240101_000000.csv").exists());
    assert!(dir.join("notes.txt").exists());
}

#[test]
fn test_fresh_files_are_kept() {
    let ws = common::Workspace::new();
    let dir = ws.reports_dir();
    seed_reports(&dir);

    let removed = remove_expired(&dir, "report_*.json", 30, SystemTime::now()).unwrap();
    assert!(removed.is_empty());
    assert!(dir.join("report_20240102_000000.json").exists());
}

#[test]
fn test_files_older_than_retention_are_removed() {
    let ws = common::Workspace::new();
    let dir = ws.reports_dir();
    seed_reports(&dir);

    // Pretend ten days have passed.
    let later = SystemTime::now() + Duration::from_secs(10 * 86_400);
    let removed = remove_expired(&dir, "report_*.csv", 7, later).unwrap();
    assert_eq!(removed, vec![dir.join("report_20240101_000000.csv")]);
}

#[test]
fn test_huge_retention_removes_nothing() {
    let ws = common::Workspace::new();
    let dir = ws.reports_dir();
    seed_reports(&dir);

    let removed = remove_expired(&dir, "report_*.json", u64::MAX, SystemTime::now()).unwrap();
    assert!(removed.is_empty());
}

#[test]
fn test_missing_directory_removes_nothing() {
    let ws = common::Workspace::new();
    let removed =
        remove_expired(&ws.path().join("absent"), "report_*.json", 0, SystemTime::now()).unwrap();
    assert!(removed.is_empty());
}

#[test]
fn test_run_cleanup_recreates_temp_and_applies_retention() {
    let ws = common::Workspace::new();
    let mut config = ws.base_config(json!({}));
    config["reporting"]["retention"] = json!({ "json": 0, "csv": 365 });
    config["cleanup"]["enabled"] = json!(true);
    let config = ws.load(&config);

    let temp = ws.path().join("tmp");
    fs::create_dir_all(&temp).unwrap();
    fs::write(temp.join("scratch.bin"), "x").unwrap();
    seed_reports(&ws.reports_dir());

    let removed = run_cleanup(&config).unwrap();

    assert_eq!(removed.len(), 2);
    assert!(temp.is_dir());
    assert!(!temp.join("scratch.bin").exists());
    assert!(ws.reports_dir().join("report_20240101_000000.csv").exists());
}
