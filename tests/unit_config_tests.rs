//! # Config Module Unit Tests / Config 模块单元测试
//!
//! Loading, defaults and validation of the JSON configuration.

mod common;

use fw_test_runner::HarnessError;
use fw_test_runner::config::{
    DEFAULT_BUILD_COMMAND, DEFAULT_TIMEOUT_SECS, ReportFormat, ResultFormat, TestConfig, load_config,
};
use std::fs;
use std::path::{Path, PathBuf};

const FULL_CONFIG: &str = r#"{
    "general": {
        "outputDirectory": "results",
        "tempDirectory": "tmp",
        "abortOnFailure": true,
        "generateReports": true
    },
    "categories": {
        "unit": { "enabled": true, "timeout": 60 },
        "integration": { "enabled": false, "timeout": 600 },
        "performance": { "enabled": true, "resultFormat": "jsonl", "env": { "PERF_ITER": "10" } }
    },
    "reporting": {
        "formats": ["json", "html", "csv"],
        "retention": { "json": 30, "html": 7 }
    },
    "cleanup": { "enabled": true }
}"#;

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let config = TestConfig::from_json(FULL_CONFIG, Path::new("test_config.json")).unwrap();

        assert_eq!(config.general.output_directory, PathBuf::from("results"));
        assert!(config.general.abort_on_failure);
        assert_eq!(config.reporting.formats, vec![ReportFormat::Json, ReportFormat::Html, ReportFormat::Csv]);
        assert_eq!(config.reporting.retention["json"], 30);
        assert!(config.cleanup.enabled);

        let unit = &config.categories["unit"];
        assert!(unit.enabled);
        assert_eq!(unit.timeout, 60);
        assert_eq!(unit.result_format, ResultFormat::Gtest);

        let perf = &config.categories["performance"];
        assert_eq!(perf.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(perf.result_format, ResultFormat::Jsonl);
        assert_eq!(perf.env["PERF_ITER"], "10");
        assert_eq!(config.build_command_for(perf), Some(DEFAULT_BUILD_COMMAND));
    }

    #[test]
    fn test_category_order_is_preserved() {
        let config = TestConfig::from_json(FULL_CONFIG, Path::new("test_config.json")).unwrap();
        let names: Vec<&str> = config.categories.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["unit", "integration", "performance"]);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let json = r#"{ "reporting": { "formats": ["json", "pdf"] } }"#;
        let err = TestConfig::from_json(json, Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, HarnessError::ConfigParse { .. }));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = TestConfig::from_json("{ \"general\": ", Path::new("bad.json")).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_empty_test_command_is_rejected() {
        let json = r#"{ "general": { "testCommand": " " } }"#;
        let err = TestConfig::from_json(json, Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, HarnessError::ConfigInvalid(_)));
    }

    #[test]
    fn test_output_subdirectories() {
        let config = TestConfig::from_json(FULL_CONFIG, Path::new("test_config.json")).unwrap();
        assert_eq!(config.reports_dir(), PathBuf::from("results/reports"));
        assert_eq!(config.logs_dir(), PathBuf::from("results/logs"));
        assert_eq!(config.metrics_dir(), PathBuf::from("results/metrics"));
    }
}

#[cfg(test)]
mod load_tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("definitely_missing_config.json")).unwrap_err();
        assert!(matches!(err, HarnessError::ConfigRead { .. }));
    }

    #[test]
    fn test_relative_template_resolves_next_to_config() {
        let ws = common::Workspace::new();
        let path = ws.path().join("test_config.json");
        fs::write(&path, FULL_CONFIG).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.general.html_template, ws.path().join("report_template.html"));
    }

    #[test]
    fn test_absolute_template_is_kept() {
        let ws = common::Workspace::new();
        let template = ws.path().join("templates").join("custom.html");
        let config = serde_json::json!({ "general": { "htmlTemplate": template } });
        let path = ws.write_config(&config);

        let config = load_config(&path).unwrap();
        assert_eq!(config.general.html_template, template);
    }
}
