//! # Configuration Module / 配置模块
//!
//! This module defines the JSON configuration consumed by the test runner and
//! the functions that load and validate it. Category order in the file is kept,
//! since categories run in declaration order.
//!
//! 此模块定义测试运行器使用的 JSON 配置，以及加载和校验配置的函数。
//! 配置文件中类别的顺序会被保留，因为类别按声明顺序执行。

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HarnessError, Result};

/// Default build step. `{category}` is replaced by the category name.
pub const DEFAULT_BUILD_COMMAND: &str = "cmake --build . --target test_{category}";
/// Default test executable. `{category}` is replaced by the category name.
pub const DEFAULT_TEST_COMMAND: &str = "./test_{category}";
/// Default per-category timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
/// Placeholder replaced in command templates.
pub const CATEGORY_PLACEHOLDER: &str = "{category}";

/// The complete test runner configuration, loaded from a JSON file.
/// 从 JSON 文件加载的完整测试运行器配置。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestConfig {
    /// Directories and global switches.
    /// 目录和全局开关。
    #[serde(default)]
    pub general: GeneralSettings,
    /// Test categories in declaration order.
    /// 按声明顺序排列的测试类别。
    #[serde(default)]
    pub categories: IndexMap<String, CategorySettings>,
    /// Output formats and retention policy.
    /// 输出格式和保留策略。
    #[serde(default)]
    pub reporting: ReportingSettings,
    /// Post-run cleanup switch.
    /// 运行结束后的清理开关。
    #[serde(default)]
    pub cleanup: CleanupSettings,
}

/// The `general` section of the configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    /// Root directory for `logs/`, `reports/` and `metrics/`.
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
    /// Scratch directory, emptied by cleanup.
    #[serde(default = "default_temp_directory")]
    pub temp_directory: PathBuf,
    /// Stop processing further categories after the first failing one.
    #[serde(default)]
    pub abort_on_failure: bool,
    /// Write reports in the configured formats at the end of the run.
    #[serde(default = "default_true")]
    pub generate_reports: bool,
    /// Working directory for build and test commands.
    #[serde(default = "default_build_directory")]
    pub build_directory: PathBuf,
    /// Build step template. `null` or an empty string disables the build step.
    #[serde(default = "default_build_command")]
    pub build_command: Option<String>,
    /// Test executable template.
    #[serde(default = "default_test_command")]
    pub test_command: String,
    /// HTML template holding the `"{{RESULTS}}"` token.
    /// Relative paths are resolved against the configuration file's directory.
    #[serde(default = "default_html_template")]
    pub html_template: PathBuf,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
            temp_directory: default_temp_directory(),
            abort_on_failure: false,
            generate_reports: true,
            build_directory: default_build_directory(),
            build_command: default_build_command(),
            test_command: default_test_command(),
            html_template: default_html_template(),
        }
    }
}

/// How a category's test executable reports its results on stdout.
/// 类别的测试可执行文件在 stdout 上报告结果的方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFormat {
    /// Google-Test style console marker lines.
    /// Google Test 风格的控制台标记行。
    #[default]
    Gtest,
    /// One JSON object per line.
    /// 每行一个 JSON 对象。
    Jsonl,
}

/// Settings for a single test category.
/// 单个测试类别的设置。
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySettings {
    /// Disabled categories are neither built nor run.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Timeout in seconds for the test executable.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub result_format: ResultFormat,
    /// Extra environment variables for the test process.
    #[serde(default)]
    pub env: IndexMap<String, String>,
    /// Overrides `general.buildCommand`. An empty string disables the build step.
    #[serde(default)]
    pub build_command: Option<String>,
    /// Overrides `general.testCommand`.
    #[serde(default)]
    pub test_command: Option<String>,
}

impl Default for CategorySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: DEFAULT_TIMEOUT_SECS,
            result_format: ResultFormat::default(),
            env: IndexMap::new(),
            build_command: None,
            test_command: None,
        }
    }
}

/// Report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Html,
    Csv,
}

impl ReportFormat {
    /// File extension used for reports of this format.
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Html => "html",
            ReportFormat::Csv => "csv",
        }
    }

    /// Maps a retention key to a format, if it names one.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" => Some(ReportFormat::Json),
            "html" => Some(ReportFormat::Html),
            "csv" => Some(ReportFormat::Csv),
            _ => None,
        }
    }
}

/// The `reporting` section of the configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingSettings {
    #[serde(default = "default_formats")]
    pub formats: Vec<ReportFormat>,
    /// Report type → maximum age in days.
    #[serde(default)]
    pub retention: IndexMap<String, u64>,
}

impl Default for ReportingSettings {
    fn default() -> Self {
        Self {
            formats: default_formats(),
            retention: IndexMap::new(),
        }
    }
}

/// The `cleanup` section of the configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupSettings {
    #[serde(default)]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("test_output")
}

fn default_temp_directory() -> PathBuf {
    PathBuf::from("test_temp")
}

fn default_build_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_build_command() -> Option<String> {
    Some(DEFAULT_BUILD_COMMAND.to_string())
}

fn default_test_command() -> String {
    DEFAULT_TEST_COMMAND.to_string()
}

fn default_html_template() -> PathBuf {
    PathBuf::from("report_template.html")
}

fn default_formats() -> Vec<ReportFormat> {
    vec![ReportFormat::Json]
}

impl TestConfig {
    /// Parses a configuration from a JSON string and validates it.
    /// The `origin` path is only used in error messages.
    pub fn from_json(content: &str, origin: &Path) -> Result<Self> {
        let config: TestConfig =
            serde_json::from_str(content).map_err(|source| HarnessError::ConfigParse {
                path: origin.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<()> {
        for (name, settings) in &self.categories {
            if name.trim().is_empty() {
                return Err(HarnessError::ConfigInvalid(
                    "category names must not be empty".to_string(),
                ));
            }
            if settings.timeout == 0 {
                return Err(HarnessError::ConfigInvalid(format!(
                    "category `{name}` has a zero timeout"
                )));
            }
        }
        if self.general.test_command.trim().is_empty() {
            return Err(HarnessError::ConfigInvalid(
                "general.testCommand must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the build command template that applies to `category`,
    /// or `None` when the build step is disabled.
    pub fn build_command_for<'a>(&'a self, settings: &'a CategorySettings) -> Option<&'a str> {
        let template = match &settings.build_command {
            Some(cmd) => Some(cmd.as_str()),
            None => self.general.build_command.as_deref(),
        };
        template.filter(|t| !t.trim().is_empty())
    }

    /// Returns the test command template that applies to `category`.
    pub fn test_command_for<'a>(&'a self, settings: &'a CategorySettings) -> &'a str {
        settings
            .test_command
            .as_deref()
            .unwrap_or(&self.general.test_command)
    }

    /// `<outputDirectory>/reports`
    pub fn reports_dir(&self) -> PathBuf {
        self.general.output_directory.join("reports")
    }

    /// `<outputDirectory>/logs`
    pub fn logs_dir(&self) -> PathBuf {
        self.general.output_directory.join("logs")
    }

    /// `<outputDirectory>/metrics`
    pub fn metrics_dir(&self) -> PathBuf {
        self.general.output_directory.join("metrics")
    }
}

/// Reads, parses and validates the configuration file at `path`.
/// A relative `general.htmlTemplate` is resolved against the file's directory.
///
/// 读取、解析并校验 `path` 处的配置文件。
/// 相对的 `general.htmlTemplate` 路径会相对于配置文件所在目录解析。
pub fn load_config(path: &Path) -> Result<TestConfig> {
    let content = fs::read_to_string(path).map_err(|source| HarnessError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = TestConfig::from_json(&content, path)?;

    if config.general.html_template.is_relative() {
        if let Some(dir) = path.parent() {
            config.general.html_template = dir.join(&config.general.html_template);
        }
    }
    Ok(config)
}
