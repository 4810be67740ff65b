//! # Reporting Unit Tests / 报告模块单元测试
//!
//! CSV layout, HTML template substitution and report file naming.

mod common;

use chrono::{Local, TimeZone};
use fw_test_runner::models::{CategoryResult, Results};
use fw_test_runner::reporting::{
    csv::render_csv,
    generate_reports,
    html::{generate_html_report, render_html},
    json::render_json,
    report_timestamp,
};
use std::fs;

fn sample_results() -> Results {
    let mut results = Results::new(Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    results.record(
        "unit",
        CategoryResult {
            total: 10,
            passed: 9,
            failed: 1,
            skipped: 0,
            duration: 1.234,
            ..CategoryResult::default()
        },
    );
    results.record(
        "integration",
        CategoryResult {
            total: 5,
            passed: 5,
            failed: 0,
            skipped: 0,
            duration: 4.56,
            ..CategoryResult::default()
        },
    );
    results.finish(Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 6).unwrap());
    results
}

#[cfg(test)]
mod csv_tests {
    use super::*;

    #[test]
    fn test_csv_layout() {
        assert_eq!(
            render_csv(&sample_results()),
            "Category,Total,Passed,Failed,Skipped,Duration\n\
             unit,10,9,1,0,1.23\n\
             integration,5,5,0,0,4.56\n"
        );
    }

    #[test]
    fn test_csv_quotes_awkward_names() {
        let mut results = Results::new(Local::now());
        results.record(
            "radio,ble",
            CategoryResult {
                total: 2,
                passed: 2,
                duration: 0.5,
                ..CategoryResult::default()
            },
        );
        assert_eq!(
            render_csv(&results),
            "Category,Total,Passed,Failed,Skipped,Duration\n\"radio,ble\",2,2,0,0,0.50\n"
        );
    }

    #[test]
    fn test_csv_without_categories() {
        let results = Results::new(Local::now());
        assert_eq!(render_csv(&results), "Category,Total,Passed,Failed,Skipped,Duration\n");
    }
}

#[cfg(test)]
mod html_tests {
    use super::*;

    #[test]
    fn test_token_is_replaced_by_results_json() {
        let results = sample_results();
        let template = "<script>const results = \"{{RESULTS}}\";</script>";
        let html = render_html(template, &results).unwrap();

        let expected = format!("<script>const results = {};</script>", render_json(&results).unwrap());
        assert_eq!(html, expected);
        assert!(!html.contains("{{RESULTS}}"));
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let html = render_html("\"{{RESULTS}}\" and \"{{RESULTS}}\"", &sample_results()).unwrap();
        assert!(!html.contains("{{RESULTS}}"));
        assert_eq!(html.matches("\"summary\"").count(), 2);
    }

    #[test]
    fn test_missing_template_is_skipped() {
        let ws = common::Workspace::new();
        let output = ws.path().join("report.html");
        let written =
            generate_html_report(&sample_results(), &ws.path().join("nope.html"), &output).unwrap();
        assert!(!written);
        assert!(!output.exists());
    }
}

#[cfg(test)]
mod generate_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reports_share_one_timestamp() {
        let ws = common::Workspace::new();
        fs::write(ws.path().join("template.html"), "<pre>\"{{RESULTS}}\"</pre>").unwrap();
        let mut config = ws.base_config(json!({}));
        config["reporting"]["formats"] = json!(["json", "html", "csv"]);
        config["general"]["htmlTemplate"] = json!("template.html");
        let config = ws.load(&config);

        let timestamp = report_timestamp(Local.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap());
        let written = generate_reports(&sample_results(), &config, &timestamp).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "report_20240305_070809.json",
                "report_20240305_070809.html",
                "report_20240305_070809.csv"
            ]
        );
        assert!(written.iter().all(|p| p.starts_with(ws.reports_dir())));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
        assert_eq!(json["summary"]["total"], 15);
        assert_eq!(json["summary"]["failed"], 1);
        assert!(json["categories"]["unit"].is_object());
    }

    #[test]
    fn test_html_without_template_writes_other_formats() {
        let ws = common::Workspace::new();
        let mut config = ws.base_config(json!({}));
        config["reporting"]["formats"] = json!(["html", "json"]);
        config["general"]["htmlTemplate"] = json!("missing_template.html");
        let config = ws.load(&config);

        let written = generate_reports(&sample_results(), &config, "20240101_000000").unwrap();
        assert_eq!(written, vec![ws.reports_dir().join("report_20240101_000000.json")]);
    }
}
