//! # Models Unit Tests / 数据模型单元测试
//!
//! The summary of a `Results` must always equal the per-category sums.

use chrono::Local;
use fw_test_runner::models::{CategoryResult, FailureReason, Results, Summary, TestEntry, TestStatus};
use std::time::Duration;

fn category(total: u64, passed: u64, failed: u64, skipped: u64) -> CategoryResult {
    CategoryResult {
        total,
        passed,
        failed,
        skipped,
        ..CategoryResult::default()
    }
}

#[test]
fn test_summary_equals_sum_of_categories() {
    let samples = [
        category(10, 9, 1, 0),
        category(5, 5, 0, 0),
        category(0, 0, 0, 0),
        CategoryResult::failed_with(FailureReason::Build, "boom", Duration::ZERO),
        category(7, 3, 2, 2),
    ];

    let mut results = Results::new(Local::now());
    for (i, sample) in samples.iter().enumerate() {
        results.record(format!("cat{i}"), sample.clone());

        let summary = results.summary();
        let cats = results.categories().values();
        assert_eq!(summary.total, cats.clone().map(|c| c.total).sum::<u64>());
        assert_eq!(summary.passed, cats.clone().map(|c| c.passed).sum::<u64>());
        assert_eq!(summary.failed, cats.clone().map(|c| c.failed).sum::<u64>());
        assert_eq!(summary.skipped, cats.map(|c| c.skipped).sum::<u64>());
    }

    assert_eq!(
        results.summary(),
        Summary { total: 22, passed: 17, failed: 4, skipped: 2 }
    );
}

#[test]
fn test_empty_results() {
    let mut results = Results::new(Local::now());
    results.finish(Local::now());
    assert_eq!(results.summary(), Summary::default());
    assert!(!results.has_failures());
    assert!(results.end_time().is_some());
    assert!(results.duration() >= 0.0);
}

#[test]
fn test_output_is_not_serialized() {
    let mut result = category(1, 1, 0, 0);
    result.output = "secret console noise".to_string();
    result.tests.push(TestEntry::new("A.a", TestStatus::Passed).with_memory(512));

    let mut results = Results::new(Local::now());
    results.record("unit", result);
    let json = serde_json::to_string(&results).unwrap();

    assert!(!json.contains("secret console noise"));
    assert!(json.contains("\"memoryUsage\":512"));
    assert!(json.contains("\"passed\":true"));
}

#[test]
fn test_failure_reason_serialization() {
    let result = CategoryResult::failed_with(FailureReason::Timeout, "too slow", Duration::from_secs(2));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["failure"]["reason"], "timeout");
    assert_eq!(json["failed"], 1);
    assert_eq!(json["duration"], 2.0);
}
