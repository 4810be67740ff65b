//! # Output Parser Module / 输出解析模块
//!
//! Extracts pass/fail/skip counts from the captured stdout of a test
//! executable. Two formats are understood:
//!
//! - `gtest`: best-effort scan for fixed marker substrings in Google-Test style
//!   console output. Lines that match none of the markers are ignored, so the
//!   counters can disagree with each other when the output format drifts.
//! - `jsonl`: one JSON object per line with `name` and `status` fields.
//!
//! 从测试可执行文件捕获的 stdout 中提取通过/失败/跳过计数。
//! 支持 `gtest` 标记行和 `jsonl` 结构化行两种格式。

use serde::Deserialize;

use crate::core::config::ResultFormat;
use crate::core::models::{TestEntry, TestStatus};

/// Marker of the totals line, which must also contain [`TOTALS_PHRASE`].
pub const TOTALS_MARKER: &str = "[==========]";
pub const TOTALS_PHRASE: &str = "tests from";
pub const PASSED_MARKER: &str = "[ PASSED ]";
pub const FAILED_MARKER: &str = "[ FAILED ]";
pub const SKIPPED_MARKER: &str = "[ SKIPPED ]";

/// Counts and per-test entries extracted from one captured output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedOutput {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub tests: Vec<TestEntry>,
}

/// Parses `stdout` according to `format`. Pure: the same input always yields
/// the same counts.
pub fn parse_output(stdout: &str, format: ResultFormat) -> ParsedOutput {
    match format {
        ResultFormat::Gtest => parse_gtest_output(stdout),
        ResultFormat::Jsonl => parse_jsonl_output(stdout),
    }
}

/// Scans Google-Test style output line by line. The first matching rule wins:
///
/// 1. `[==========]` together with `tests from`: total is the second
///    whitespace-separated token; left unchanged if it is not a number.
/// 2. `[ PASSED ]`, `[ FAILED ]`, `[ SKIPPED ]`: increment the counter.
///
/// Text after a per-test marker of the form `Suite.name (12 ms)` also becomes a
/// [`TestEntry`].
pub fn parse_gtest_output(stdout: &str) -> ParsedOutput {
    let mut parsed = ParsedOutput::default();

    for line in stdout.lines() {
        if line.contains(TOTALS_MARKER) {
            if line.contains(TOTALS_PHRASE) {
                if let Some(total) = line
                    .split_whitespace()
                    .nth(1)
                    .and_then(|token| token.parse::<u64>().ok())
                {
                    parsed.total = total;
                }
            }
        } else if let Some(rest) = after_marker(line, PASSED_MARKER) {
            parsed.passed += 1;
            parsed.tests.extend(parse_test_entry(rest, TestStatus::Passed));
        } else if let Some(rest) = after_marker(line, FAILED_MARKER) {
            parsed.failed += 1;
            parsed.tests.extend(parse_test_entry(rest, TestStatus::Failed));
        } else if let Some(rest) = after_marker(line, SKIPPED_MARKER) {
            parsed.skipped += 1;
            parsed.tests.extend(parse_test_entry(rest, TestStatus::Skipped));
        }
    }

    parsed
}

fn after_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.find(marker).map(|pos| &line[pos + marker.len()..])
}

/// Turns `Suite.name (12 ms)` into an entry. Returns `None` when no test name
/// follows the marker or when the text looks like a summary count.
fn parse_test_entry(rest: &str, status: TestStatus) -> Option<TestEntry> {
    let rest = rest.trim();
    let name = rest.split_whitespace().next()?.trim_end_matches(',');
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let duration = rest
        .rfind('(')
        .and_then(|open| {
            let inner = rest[open + 1..].trim_end().strip_suffix(')')?;
            inner.trim().strip_suffix("ms")?.trim().parse::<f64>().ok()
        })
        .map(|ms| ms / 1000.0)
        .unwrap_or(0.0);

    Some(TestEntry::new(name, status).with_duration(duration))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonlRecord {
    name: String,
    status: TestStatus,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    memory_usage: u64,
}

/// Parses line-delimited JSON records. Every line that deserializes into a
/// record with `name` and `status` yields one entry; anything else is ignored.
/// The total is the number of records.
pub fn parse_jsonl_output(stdout: &str) -> ParsedOutput {
    let mut parsed = ParsedOutput::default();

    for line in stdout.lines().map(str::trim) {
        if !line.starts_with('{') {
            continue;
        }
        let Ok(record) = serde_json::from_str::<JsonlRecord>(line) else {
            continue;
        };
        match record.status {
            TestStatus::Passed => parsed.passed += 1,
            TestStatus::Failed => parsed.failed += 1,
            TestStatus::Skipped => parsed.skipped += 1,
        }
        parsed.total += 1;
        parsed.tests.push(
            TestEntry::new(record.name, record.status)
                .with_duration(record.duration)
                .with_memory(record.memory_usage),
        );
    }

    parsed
}
