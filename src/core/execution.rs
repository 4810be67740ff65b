//! # Test Execution Engine Module / 测试执行引擎模块
//!
//! Runs categories one after another: build step, then the test executable
//! under a timeout, then output parsing. Any failure of the surrounding
//! machinery (build, timeout, spawn, interruption) marks the category with a
//! single failure.
//!
//! 依次运行各个类别：先执行构建步骤，再在超时限制下运行测试可执行文件，
//! 最后解析输出。外围流程的任何失败（构建、超时、启动、中断）都会把该类别
//! 记为一次失败。

use chrono::Local;
use colored::*;
use indexmap::IndexMap;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::{CategorySettings, TestConfig},
        models::{CategoryFailure, CategoryResult, FailureReason, Results},
        parser::parse_output,
        planner::ExecutionPlan,
    },
    infra::{
        command::{self, CapturedOutput, CommandLine, CATEGORY_ENV_VAR},
        fs::write_category_log,
    },
};

/// Why a category stopped before its output could be parsed.
#[derive(Debug)]
struct StepFailure {
    reason: FailureReason,
    message: String,
    output: String,
}

impl StepFailure {
    fn new(reason: FailureReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
            output: String::new(),
        }
    }

    fn with_output(mut self, output: String) -> Self {
        self.output = output;
        self
    }
}

/// The outcome of a whole run.
#[derive(Debug)]
pub struct RunOutcome {
    pub results: Results,
    /// `abortOnFailure` stopped the run early.
    pub aborted: bool,
    /// A stop signal arrived before every category ran.
    pub interrupted: bool,
}

impl RunOutcome {
    /// `true` when every planned category ran and none failed.
    pub fn is_success(&self) -> bool {
        !self.results.has_failures() && !self.aborted && !self.interrupted
    }
}

/// Runs the planned categories strictly in order and collects their results.
/// With `abortOnFailure` the loop stops after the first failing category; the
/// results gathered so far are still returned and finalized.
///
/// 严格按顺序运行计划中的类别并收集结果。
/// 启用 `abortOnFailure` 时，在第一个失败的类别之后停止；已收集的结果仍会返回并完成。
pub async fn run_categories(
    config: &TestConfig,
    plan: &ExecutionPlan,
    stop_token: &CancellationToken,
) -> RunOutcome {
    let mut results = Results::new(Local::now());
    let mut aborted = false;
    let mut interrupted = false;

    for name in &plan.disabled {
        println!("{}", format!("Skipping disabled category: {name}").dimmed());
    }

    for (name, settings) in &plan.categories {
        if stop_token.is_cancelled() {
            interrupted = true;
            break;
        }

        println!("\n{}", format!("Running {name} tests...").blue().bold());
        let result = run_category(name, settings, config, stop_token).await;

        if let Err(e) = write_category_log(&config.logs_dir(), name, &result.output) {
            tracing::warn!("Could not write log for category {name}: {e:#}");
        }
        print_category_line(name, &result);

        let failed = result.is_failure();
        let was_interrupted = matches!(
            result.failure,
            Some(CategoryFailure { reason: FailureReason::Interrupted, .. })
        );
        results.record(name.clone(), result);

        if was_interrupted {
            interrupted = true;
            break;
        }
        if failed && config.general.abort_on_failure {
            println!("{}", format!("Aborting due to failures in {name}").red().bold());
            aborted = true;
            break;
        }
    }

    results.finish(Local::now());
    RunOutcome {
        results,
        aborted,
        interrupted,
    }
}

fn print_category_line(name: &str, result: &CategoryResult) {
    match &result.failure {
        Some(failure) => println!(
            "{}",
            format!(
                "Category {name} failed ({}) after {:.2}s: {}",
                failure.reason, result.duration, failure.message
            )
            .red()
        ),
        None if result.is_failure() => println!(
            "{}",
            format!(
                "Category {name}: {} passed, {} failed, {} skipped in {:.2}s",
                result.passed, result.failed, result.skipped, result.duration
            )
            .red()
        ),
        None => println!(
            "{}",
            format!(
                "Category {name}: {} passed, {} skipped in {:.2}s",
                result.passed, result.skipped, result.duration
            )
            .green()
        ),
    }
}

/// Runs a single category: optional build step, then the test executable with
/// `TEST_CATEGORY` and the category's `env` set on the child only.
///
/// 运行单个类别：可选的构建步骤，然后运行测试可执行文件，
/// `TEST_CATEGORY` 和类别的 `env` 只设置在子进程上。
pub async fn run_category(
    name: &str,
    settings: &CategorySettings,
    config: &TestConfig,
    stop_token: &CancellationToken,
) -> CategoryResult {
    let start_time = Instant::now();

    match run_category_inner(name, settings, config, stop_token).await {
        Ok(mut result) => {
            result.duration = start_time.elapsed().as_secs_f64();
            result
        }
        Err(failure) => {
            let mut result =
                CategoryResult::failed_with(failure.reason, failure.message, start_time.elapsed());
            result.output = failure.output;
            result
        }
    }
}

async fn run_category_inner(
    name: &str,
    settings: &CategorySettings,
    config: &TestConfig,
    stop_token: &CancellationToken,
) -> Result<CategoryResult, StepFailure> {
    let working_dir = config.general.build_directory.as_path();
    let mut log = String::new();

    if let Some(template) = config.build_command_for(settings) {
        let line = CommandLine::from_template(template, name)
            .map_err(|e| StepFailure::new(FailureReason::Spawn, e.to_string()))?;
        println!("{}", format!("Building: {line}").blue());

        let captured = run_step(&line, working_dir, &IndexMap::new(), None, stop_token).await?;
        log.push_str(&format!("$ {line}\n"));
        log.push_str(&captured.combined());

        if !captured.status.success() {
            return Err(StepFailure::new(
                FailureReason::Build,
                format!("build step exited with {}", captured.status),
            )
            .with_output(log));
        }
    }

    let line = CommandLine::from_template(config.test_command_for(settings), name)
        .map_err(|e| StepFailure::new(FailureReason::Spawn, e.to_string()).with_output(log.clone()))?;
    let mut env = settings.env.clone();
    env.insert(CATEGORY_ENV_VAR.to_string(), name.to_string());
    let timeout = Duration::from_secs(settings.timeout);

    tracing::debug!(category = name, command = %line, timeout_secs = settings.timeout, "Starting test executable");
    let captured = match run_step(&line, working_dir, &env, Some(timeout), stop_token).await {
        Ok(captured) => captured,
        Err(failure) => {
            let output = format!("{log}$ {line}\n");
            return Err(failure.with_output(output));
        }
    };
    log.push_str(&format!("$ {line}\n"));
    log.push_str(&captured.combined());

    let parsed = parse_output(&captured.stdout, settings.result_format);
    let mut result = CategoryResult {
        total: parsed.total,
        passed: parsed.passed,
        failed: parsed.failed,
        skipped: parsed.skipped,
        tests: parsed.tests,
        exit_code: captured.status.code(),
        output: log,
        ..CategoryResult::default()
    };

    if !captured.status.success() && result.failed == 0 {
        tracing::warn!(
            category = name,
            "Test executable exited with {} without reporting a failure",
            captured.status
        );
        result.failed = 1;
        result.failure = Some(CategoryFailure {
            reason: FailureReason::Crashed,
            message: format!("test executable exited with {}", captured.status),
        });
    }

    Ok(result)
}

/// Spawns one step and waits for it, honouring the optional timeout and the
/// stop token. Dropping the pending future kills the child.
async fn run_step(
    line: &CommandLine,
    working_dir: &Path,
    env: &IndexMap<String, String>,
    timeout: Option<Duration>,
    stop_token: &CancellationToken,
) -> Result<CapturedOutput, StepFailure> {
    let cmd = line
        .to_command(working_dir, env)
        .map_err(|e| StepFailure::new(FailureReason::Spawn, e.to_string()))?;

    let execution = async {
        match timeout {
            Some(limit) => tokio::time::timeout(limit, command::spawn_and_capture(cmd))
                .await
                .map_err(|_| {
                    StepFailure::new(
                        FailureReason::Timeout,
                        format!("`{line}` timed out after {}s", limit.as_secs()),
                    )
                }),
            None => Ok(command::spawn_and_capture(cmd).await),
        }
    };

    let captured = tokio::select! {
        biased;
        _ = stop_token.cancelled() => {
            return Err(StepFailure::new(FailureReason::Interrupted, format!("`{line}` was interrupted")));
        }
        res = execution => res?,
    };

    captured.map_err(|e| StepFailure::new(FailureReason::Spawn, format!("failed to run `{line}`: {e}")))
}
