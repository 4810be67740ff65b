//! # Data Models Module / 数据模型模块
//!
//! This module defines the result structures produced by a run: per-test
//! entries, per-category results, the summary and the overall `Results`
//! record that is persisted as JSON.
//!
//! 此模块定义一次运行产生的结果结构：单个测试条目、类别结果、
//! 汇总以及以 JSON 形式持久化的整体 `Results` 记录。

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Enumerates the reasons a whole category is marked as failed, as opposed to
/// individual tests failing inside it.
/// 枚举整个类别被标记为失败的原因（区别于类别内单个测试失败）。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureReason {
    /// The build step exited unsuccessfully.
    /// 构建步骤以失败状态退出。
    Build,
    /// The test executable exceeded its timeout and was killed.
    /// 测试可执行文件超时并被终止。
    Timeout,
    /// A process could not be started or its output could not be collected.
    /// 进程无法启动或无法收集其输出。
    Spawn,
    /// The test executable exited non-zero without reporting a failed test.
    /// 测试可执行文件以非零状态退出，但没有报告失败的测试。
    Crashed,
    /// The run was interrupted while this category was executing.
    /// 运行在执行此类别时被中断。
    Interrupted,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureReason::Build => "Build Failure",
            FailureReason::Timeout => "Timeout",
            FailureReason::Spawn => "Execution Error",
            FailureReason::Crashed => "Crashed",
            FailureReason::Interrupted => "Interrupted",
        };
        f.write_str(label)
    }
}

/// Outcome of a single test inside a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    #[default]
    Passed,
    Failed,
    Skipped,
}

/// A single test reported by a category's executable.
/// 类别可执行文件报告的单个测试。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEntry {
    pub name: String,
    pub status: TestStatus,
    /// Mirrors `status == Passed`; the trend analyzer reads this flag.
    pub passed: bool,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
    /// Bytes.
    #[serde(default)]
    pub memory_usage: u64,
}

impl TestEntry {
    pub fn new(name: impl Into<String>, status: TestStatus) -> Self {
        Self {
            name: name.into(),
            status,
            passed: status == TestStatus::Passed,
            duration: 0.0,
            memory_usage: 0,
        }
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_memory(mut self, bytes: u64) -> Self {
        self.memory_usage = bytes;
        self
    }
}

/// Details recorded when a category fails as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFailure {
    pub reason: FailureReason,
    pub message: String,
}

/// The result of running one category.
/// 运行一个类别的结果。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    /// Seconds from category start to completion or to the point of failure.
    /// 从类别开始到完成或失败时刻的秒数。
    pub duration: f64,
    #[serde(default)]
    pub tests: Vec<TestEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<CategoryFailure>,
    /// Captured build and test output, kept for logs and console details.
    #[serde(skip)]
    pub output: String,
}

impl CategoryResult {
    /// A category that failed as a whole counts exactly one failure, whatever
    /// the true number of failing tests would have been.
    pub fn failed_with(reason: FailureReason, message: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            failed: 1,
            duration: elapsed.as_secs_f64(),
            failure: Some(CategoryFailure {
                reason,
                message: message.into(),
            }),
            ..Self::default()
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failed > 0
    }
}

/// Aggregate counters over all recorded categories.
/// 所有已记录类别的汇总计数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
}

impl Summary {
    fn add(&mut self, result: &CategoryResult) {
        self.total += result.total;
        self.passed += result.passed;
        self.failed += result.failed;
        self.skipped += result.skipped;
    }

    /// Recomputes the counters from scratch.
    pub fn from_categories<'a>(results: impl IntoIterator<Item = &'a CategoryResult>) -> Self {
        let mut summary = Summary::default();
        for result in results {
            summary.add(result);
        }
        summary
    }
}

/// The full record of a run. The summary can only change through
/// [`Results::record`], so it always equals the per-category sums.
///
/// 一次运行的完整记录。汇总只能通过 [`Results::record`] 修改，
/// 因此它始终等于各类别计数之和。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Results {
    start_time: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_time: Option<DateTime<Local>>,
    /// Seconds.
    #[serde(default)]
    duration: f64,
    categories: IndexMap<String, CategoryResult>,
    summary: Summary,
}

impl Results {
    pub fn new(start_time: DateTime<Local>) -> Self {
        Self {
            start_time,
            end_time: None,
            duration: 0.0,
            categories: IndexMap::new(),
            summary: Summary::default(),
        }
    }

    /// Records the result of `category`. Recording the same category twice
    /// replaces the earlier result.
    pub fn record(&mut self, category: impl Into<String>, result: CategoryResult) {
        self.categories.insert(category.into(), result);
        self.summary = Summary::from_categories(self.categories.values());
    }

    /// Stamps the end time and total duration.
    pub fn finish(&mut self, end_time: DateTime<Local>) {
        let elapsed = end_time.signed_duration_since(self.start_time);
        self.duration = elapsed.num_milliseconds().max(0) as f64 / 1000.0;
        self.end_time = Some(end_time);
    }

    pub fn start_time(&self) -> DateTime<Local> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Local>> {
        self.end_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn categories(&self) -> &IndexMap<String, CategoryResult> {
        &self.categories
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn has_failures(&self) -> bool {
        self.categories.values().any(CategoryResult::is_failure)
    }
}
