//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the test runner,
//! namely child process execution and file system operations.
//!
//! 此模块为测试运行器提供基础设施服务，即子进程执行和文件系统操作。

pub mod command;
pub mod fs;
