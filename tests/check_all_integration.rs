//! End-to-end checks: coverage JSON and TOML config in, results out.

use coverage_threshold::config::parse_config;
use coverage_threshold::{
    CheckResult, Cli, OutputFormat, Report, check_all, each_file_line_coverage_metric, run,
    total_line_coverage_metric,
};
use clap::Parser;
use rust_decimal::Decimal;
use std::fs;
use std::str::FromStr;
use tempfile::TempDir;

const TWO_FILE_REPORT: &str = r#"{
    "meta": {"branch_coverage": false},
    "files": {
        "src/main.py": {"summary": {
            "covered_lines": 1, "num_statements": 2, "percent_covered": 50.0,
            "missing_lines": 0, "excluded_lines": 0
        }},
        "src/lib.py": {"summary": {
            "covered_lines": 2, "num_statements": 2, "percent_covered": 100.0,
            "missing_lines": 0, "excluded_lines": 0
        }}
    },
    "totals": {
        "covered_lines": 3, "num_statements": 4, "percent_covered": 75.0,
        "missing_lines": 0, "excluded_lines": 0
    }
}"#;

const BRANCH_REPORT: &str = r#"{
    "meta": {"branch_coverage": true},
    "files": {
        "pkg/core/engine.py": {"summary": {
            "covered_lines": 9, "num_statements": 10, "percent_covered": 90.0,
            "missing_lines": 1, "excluded_lines": 0,
            "num_branches": 4, "num_partial_branches": 1,
            "covered_branches": 3, "missing_branches": 1
        }},
        "pkg/core/util.py": {"summary": {
            "covered_lines": 3, "num_statements": 10, "percent_covered": 30.0,
            "missing_lines": 7, "excluded_lines": 0,
            "num_branches": 2, "num_partial_branches": 0,
            "covered_branches": 0, "missing_branches": 2
        }},
        "pkg/legacy/old.py": {"summary": {
            "covered_lines": 1, "num_statements": 10, "percent_covered": 10.0,
            "missing_lines": 9, "excluded_lines": 0,
            "num_branches": 2, "num_partial_branches": 0,
            "covered_branches": 0, "missing_branches": 2
        }}
    },
    "totals": {
        "covered_lines": 13, "num_statements": 30, "percent_covered": 43.333333333333336,
        "missing_lines": 17, "excluded_lines": 0,
        "num_branches": 8, "num_partial_branches": 1,
        "covered_branches": 3, "missing_branches": 5
    }
}"#;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn test_all_files_at_or_above_threshold() {
    let report = Report::from_json_str(TWO_FILE_REPORT).expect("report should parse");

    assert_eq!(
        each_file_line_coverage_metric(&report, dec("50.0")),
        CheckResult::Pass
    );
    assert_eq!(
        each_file_line_coverage_metric(&report, dec("75.0")),
        CheckResult::Fail(vec![
            "File: \"src/main.py\" failed line coverage metric, expected: 75.0, was 50.00"
                .to_string()
        ])
    );
}

#[test]
fn test_average_line_coverage_at_or_above_threshold() {
    let report = Report::from_json_str(TWO_FILE_REPORT).expect("report should parse");
    assert!(total_line_coverage_metric(&report, dec("75.0")));
}

#[test]
fn test_check_all_with_modules_and_branches() {
    let report = Report::from_json_str(BRANCH_REPORT).expect("report should parse");
    let config = parse_config(
        r#"
[coverage-threshold]
total_line_coverage_threshold = "40"
line_coverage_threshold_for_every_file = "50.0"
file_branch_coverage_min = "50"

[coverage-threshold.modules."pkg/"]
file_line_coverage_min = "25"

[coverage-threshold.modules."pkg/legacy/"]
file_line_coverage_min = "5"
file_branch_coverage_min = "0"
"#,
    )
    .expect("config should parse");

    let result = check_all(&report, &config);

    assert_eq!(
        result.problems(),
        &["File: \"pkg/core/util.py\" failed BRANCH coverage metric, expected: 50, was 0.00"
            .to_string()],
        "pkg/ lowers the line minimum to 25, pkg/legacy/ waives branches, totals pass"
    );
}

#[test]
fn test_run_writes_json_output_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = dir.path().join("coverage.json");
    let config_path = dir.path().join("pyproject.toml");
    let output_path = dir.path().join("result.json");
    fs::write(&report_path, TWO_FILE_REPORT).expect("Failed to write report");
    fs::write(
        &config_path,
        "[tool.coverage-threshold]\nline_coverage_threshold_for_every_file = \"60\"\n",
    )
    .expect("Failed to write config");

    let cli = Cli::parse_from([
        "coverage-threshold",
        "--coverage-json",
        report_path.to_str().unwrap(),
        "--config",
        config_path.to_str().unwrap(),
        "--total-line-coverage-threshold",
        "80",
        "--output",
        "json",
        "--output-file",
        output_path.to_str().unwrap(),
    ]);
    assert_eq!(cli.output, OutputFormat::Json);

    let result = run(&cli).expect("run should succeed");
    assert!(!result.is_pass());

    let written = fs::read_to_string(&output_path).expect("output file should exist");
    let parsed: serde_json::Value = serde_json::from_str(&written).expect("valid JSON");
    assert_eq!(parsed["result"], false);
    assert_eq!(
        parsed["problems"][0],
        "File: \"src/main.py\" failed LINE coverage metric, expected: 60, was 50.00"
    );
    assert_eq!(
        parsed["problems"][1],
        "Total line coverage metric failed, expected: 80, was 75.00"
    );
}

#[test]
fn test_run_junit_snapshot() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = dir.path().join("coverage.json");
    let config_path = dir.path().join("thresholds.toml");
    let output_path = dir.path().join("junit.xml");
    fs::write(&report_path, TWO_FILE_REPORT).expect("Failed to write report");
    fs::write(
        &config_path,
        "[coverage-threshold]\nline_coverage_threshold_for_every_file = 60\n",
    )
    .expect("Failed to write config");

    let cli = Cli::parse_from([
        "coverage-threshold",
        "--coverage-json",
        report_path.to_str().unwrap(),
        "--config",
        config_path.to_str().unwrap(),
        "--output",
        "junit",
        "--output-file",
        output_path.to_str().unwrap(),
    ]);
    run(&cli).expect("run should succeed");

    let xml = fs::read_to_string(&output_path).expect("output file should exist");
    insta::assert_snapshot!(xml, @r#"<?xml version="1.0" encoding="UTF-8"?><testsuites name="coverage-threshold" tests="2" failures="1" errors="0" skipped="0"><testsuite name="coverage-threshold" tests="2" failures="1" errors="0" skipped="0"><testcase name="File: &quot;src/main.py&quot; failed LINE coverage metric, expected: 60, was 50.00" classname="coverage-threshold.file-coverage"><failure message="src/main.py: File: &quot;src/main.py&quot; failed LINE coverage metric, expected: 60, was 50.00"/></testcase><testcase name="Line coverage of the report totals: passed" classname="coverage-threshold.total-coverage"/></testsuite></testsuites>"#);
}

#[test]
fn test_run_missing_report_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = dir.path().join("pyproject.toml");
    fs::write(&config_path, "").expect("Failed to write config");

    let cli = Cli::parse_from([
        "coverage-threshold",
        "--coverage-json",
        dir.path().join("missing.json").to_str().unwrap(),
        "--config",
        config_path.to_str().unwrap(),
    ]);
    let err = run(&cli).expect_err("missing report should fail");
    assert_eq!(err.name(), "IoError");
    assert!(err.suggestions().iter().any(|s| s.contains("--coverage-json")));
}

#[test]
fn test_measured_percentage_is_rounded_in_messages() {
    let report = Report::from_json_str(
        r#"{
    "meta": {"branch_coverage": false},
    "files": {
        "src/two_thirds.py": {"summary": {
            "covered_lines": 2, "num_statements": 3, "percent_covered": 66.666666666666667,
            "missing_lines": 1, "excluded_lines": 0
        }}
    },
    "totals": {
        "covered_lines": 2, "num_statements": 3, "percent_covered": 66.666666666666667,
        "missing_lines": 1, "excluded_lines": 0
    }
}"#,
    )
    .expect("report should parse");

    assert_eq!(
        each_file_line_coverage_metric(&report, dec("100")).problems(),
        &["File: \"src/two_thirds.py\" failed line coverage metric, expected: 100, was 66.67"
            .to_string()]
    );
}
