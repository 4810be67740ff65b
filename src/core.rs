//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the test runner,
//! including configuration, data models, output parsing and category execution.
//!
//! 此模块包含测试运行器的核心功能，
//! 包括配置、数据模型、输出解析和类别执行。

pub mod cleanup;
pub mod config;
pub mod execution;
pub mod models;
pub mod parser;
pub mod planner;

// Re-exports
pub use config::TestConfig;
pub use execution::{run_categories, run_category};
pub use models::{CategoryResult, Results};
