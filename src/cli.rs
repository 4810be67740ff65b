//! # CLI Module / 命令行模块
//!
//! Argument definitions for the two binaries, `run-tests` and
//! `analyze-trends`, and the glue that hands parsed arguments to the commands.
//!
//! 两个可执行文件 `run-tests` 和 `analyze-trends` 的参数定义，
//! 以及将解析后的参数交给命令的衔接代码。

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

pub mod commands {
    pub mod analyze;
    pub mod run;
}

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "test_config.json";

pub fn build_run_cli() -> Command {
    Command::new("run-tests")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build and run firmware test categories, then write reports.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to the test configuration file")
                .value_name("CONFIG")
                .default_value(DEFAULT_CONFIG_FILE)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("categories")
                .long("categories")
                .help("Test categories to run (default: all enabled categories)")
                .value_name("CATEGORY")
                .num_args(1..)
                .action(ArgAction::Append),
        )
}

pub fn build_analyze_cli() -> Command {
    Command::new("analyze-trends")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Analyze test performance trends across historical JSON reports.")
        .arg(
            Arg::new("report-dir")
                .long("report-dir")
                .help("Directory containing report_*.json files")
                .value_name("REPORT_DIR")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for the trend report and plots")
                .value_name("OUTPUT_DIR")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
}

/// Parses the `run-tests` arguments and runs the categories.
/// Returns `Ok(false)` when any category failed.
pub async fn run_tests() -> Result<bool> {
    let matches = build_run_cli().get_matches();
    run_tests_with(&matches).await
}

pub async fn run_tests_with(matches: &ArgMatches) -> Result<bool> {
    let config = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let categories: Option<Vec<String>> = matches
        .get_many::<String>("categories")
        .map(|values| values.cloned().collect());

    commands::run::execute(config, categories).await
}

/// Parses the `analyze-trends` arguments and runs the analysis.
pub fn analyze_trends() -> Result<()> {
    let matches = build_analyze_cli().get_matches();
    analyze_trends_with(&matches)
}

pub fn analyze_trends_with(matches: &ArgMatches) -> Result<()> {
    // Both arguments are required, clap rejects the invocation otherwise.
    let report_dir = matches
        .get_one::<PathBuf>("report-dir")
        .cloned()
        .unwrap_or_default();
    let output_dir = matches
        .get_one::<PathBuf>("output-dir")
        .cloned()
        .unwrap_or_default();

    commands::analyze::execute(&report_dir, &output_dir).map(|_| ())
}
