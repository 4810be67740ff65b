//! # Firmware Test Runner Library / 固件测试运行器库
//!
//! This library provides the functionality behind two tools for an embedded
//! firmware project:
//!
//! - `run-tests` builds and runs test categories described by a JSON
//!   configuration, parses their console output and writes JSON/CSV/HTML
//!   reports.
//! - `analyze-trends` reads historical JSON reports back and produces per-test
//!   statistics, a text report and plots.
//!
//! 此库为嵌入式固件项目的两个工具提供功能：`run-tests` 根据 JSON 配置构建并运行
//! 测试类别、解析输出并写出报告；`analyze-trends` 读取历史 JSON 报告，
//! 生成每个测试的统计数据、文本报告和图表。
//!
//! ## Modules / 模块
//!
//! - `core` - Configuration, data models, output parsing, execution and cleanup
//! - `infra` - Process spawning and file system helpers
//! - `reporting` - Report serialization and console summaries
//! - `analysis` - Historical trend analysis
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 配置、数据模型、输出解析、执行和清理
//! - `infra` - 进程派生和文件系统辅助
//! - `reporting` - 报告序列化和控制台摘要
//! - `analysis` - 历史趋势分析
//! - `cli` - 命令行接口和命令

pub mod analysis;
pub mod cli;
pub mod core;
pub mod error;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::models;
pub use error::{HarnessError, Result};

use tracing_subscriber::EnvFilter;

/// Installs the `tracing` subscriber used by both binaries. Diagnostics go to
/// stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed when running under a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
