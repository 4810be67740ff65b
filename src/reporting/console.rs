//! # Console Reporting Module / 控制台报告模块
//!
//! Prints the coloured end-of-run summary and the captured output of failed
//! categories.
//!
//! 打印带颜色的运行结束摘要，以及失败类别的捕获输出。

use colored::*;

use crate::core::models::{CategoryResult, FailureReason, Results};

/// How many trailing output lines of a failed category are shown.
const FAILURE_OUTPUT_TAIL: usize = 50;

/// Prints a table of category results followed by the summary totals.
///
/// # Output Format / 输出格式
/// ```text
/// --- Test Summary ---
///   - Status     | Category             |  Total Passed Failed Skipped |   Duration
///   - Passed     | unit                 |     10     10      0       0 |      1.23s
///   - Failed     | integration          |      1      0      1       0 |      0.45s
/// ```
pub fn print_summary(results: &Results) {
    println!("\n{}", "--- Test Summary ---".bold());
    println!(
        "  - {:<10} | {:<20} | {:>6} {:>6} {:>6} {:>7} | {:>10}",
        "Status", "Category", "Total", "Passed", "Failed", "Skipped", "Duration"
    );

    for (name, result) in results.categories() {
        println!(
            "  - {:<10} | {:<20} | {:>6} {:>6} {:>6} {:>7} | {:>9.2}s",
            status_label(result),
            name,
            result.total,
            result.passed,
            result.failed,
            result.skipped,
            result.duration
        );
    }

    let summary = results.summary();
    println!(
        "\n{} total, {} passed, {} failed, {} skipped in {:.2}s",
        summary.total,
        summary.passed.to_string().green(),
        if summary.failed > 0 {
            summary.failed.to_string().red()
        } else {
            summary.failed.to_string().normal()
        },
        summary.skipped.to_string().dimmed(),
        results.duration()
    );
}

fn status_label(result: &CategoryResult) -> ColoredString {
    match &result.failure {
        Some(failure) if failure.reason == FailureReason::Timeout => "Timeout".red(),
        Some(failure) if failure.reason == FailureReason::Interrupted => "Interrupted".yellow(),
        Some(_) => "Error".red(),
        None if result.is_failure() => "Failed".red(),
        None => "Passed".green(),
    }
}

/// Prints the tail of the captured output for every failed category.
pub fn print_failure_details(results: &Results) {
    let failures: Vec<_> = results
        .categories()
        .iter()
        .filter(|(_, r)| r.is_failure())
        .collect();
    if failures.is_empty() {
        return;
    }

    println!("\n{}", "!!! FAILURES DETECTED !!!".red().bold());
    println!("{}", "-".repeat(80));

    for (i, (name, result)) in failures.iter().enumerate() {
        let reason = result
            .failure
            .as_ref()
            .map(|f| format!(" ({})", f.reason))
            .unwrap_or_default();
        println!(
            "[{}/{}] {} '{}'{}",
            i + 1,
            failures.len(),
            "Failure in category".red(),
            name.cyan(),
            reason
        );
        if let Some(failure) = &result.failure {
            println!("  {}", failure.message);
        }

        let lines: Vec<&str> = result.output.lines().collect();
        if !lines.is_empty() {
            let start = lines.len().saturating_sub(FAILURE_OUTPUT_TAIL);
            println!("\n--- {} ---\n", "Output".yellow());
            println!("{}", lines[start..].join("\n"));
        }
        println!("\n{}", "-".repeat(80));
    }
}
