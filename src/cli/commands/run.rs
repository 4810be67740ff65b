//! # Run Command Module / 运行命令模块
//!
//! Implements `run-tests`: load the configuration, run the selected categories
//! in order, print the summary, write reports and clean up.
//!
//! 实现 `run-tests`：加载配置，按顺序运行所选类别，打印摘要，写出报告并清理。

use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use std::path::PathBuf;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        cleanup::run_cleanup,
        config::load_config,
        execution::run_categories,
        planner::plan_execution,
    },
    infra::fs::prepare_directories,
    reporting::{generate_reports, print_failure_details, print_summary, report_timestamp},
};

/// Executes a test run.
///
/// # Arguments
/// * `config_path` - Path to the JSON configuration
/// * `categories` - Optional subset of category names
///
/// # Returns
/// `Ok(true)` when every selected category ran and passed, `Ok(false)` when
/// any category failed or the run was cut short, `Err` when the run could not
/// be carried out at all.
pub async fn execute(config_path: PathBuf, categories: Option<Vec<String>>) -> Result<bool> {
    let config = load_config(&config_path).with_context(|| {
        format!("Failed to load configuration from {}", config_path.display())
    })?;
    println!(
        "{}",
        format!("Loaded test configuration from {}", config_path.display()).cyan()
    );

    prepare_directories(&config.general.output_directory, &config.general.temp_directory)?;

    let plan = plan_execution(&config, categories.as_deref());
    for name in &plan.unknown {
        println!(
            "{}",
            format!("Unknown category requested: {name}").yellow()
        );
    }
    if plan.is_empty() {
        println!("{}", "No categories to run.".yellow());
    }

    let stop_token = setup_signal_handler();
    let outcome = run_categories(&config, &plan, &stop_token).await;

    print_summary(&outcome.results);
    print_failure_details(&outcome.results);

    if outcome.interrupted {
        println!("\n{}", "Run interrupted before all categories finished.".yellow());
    }

    if config.general.generate_reports {
        let timestamp = report_timestamp(Local::now());
        let written = generate_reports(&outcome.results, &config, &timestamp)
            .context("Failed to generate reports")?;
        for path in &written {
            println!("Report written: {}", path.display());
        }
    }

    if config.cleanup.enabled {
        let removed = run_cleanup(&config).context("Cleanup failed")?;
        if !removed.is_empty() {
            println!("Removed {} expired report file(s).", removed.len());
        }
    }

    if outcome.is_success() {
        println!("\n{}", "ALL TEST CATEGORIES PASSED".green().bold());
    } else {
        println!("\n{}", "TEST RUN FAILED".red().bold());
    }
    Ok(outcome.is_success())
}

/// Cancels the returned token on Ctrl-C so the run stops before the next
/// category and the running child is killed.
fn setup_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", "Interrupt received, stopping the run...".yellow());
            token_clone.cancel();
        }
    });

    token
}
