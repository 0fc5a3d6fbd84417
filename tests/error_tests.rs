//! Error path testing
//!
//! This module tests error handling in various failure scenarios to ensure
//! the application properly handles and reports errors.

use junit_reporter::commands::{Command, CompareBaselineCommand, ReportCommand};
use junit_reporter::config::ReportOptions;
use junit_reporter::error::{Error, Result};
use junit_reporter::ui::UI;
use std::fs;
use tempfile::TempDir;

// Test UI implementation
struct TestUI {
    pub output: Vec<String>,
    pub errors: Vec<String>,
}

impl TestUI {
    fn new() -> Self {
        TestUI {
            output: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl UI for TestUI {
    fn output(&mut self, message: &str) -> Result<()> {
        self.output.push(message.to_string());
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<()> {
        self.errors.push(message.to_string());
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        self.errors.push(message.to_string());
        Ok(())
    }

    fn diagnostic(&mut self, message: &str) -> Result<()> {
        self.errors.push(message.to_string());
        Ok(())
    }
}

fn options_for(temp: &TempDir) -> ReportOptions {
    ReportOptions {
        directory: temp.path().to_path_buf(),
        ..Default::default()
    }
}

const PASSING_SUITE: &str = r#"<testsuite name="s">
  <testcase name="testA" classname="pkg.AlphaTest" time="1"/>
</testsuite>"#;

#[test]
fn test_report_empty_directory() {
    let temp = TempDir::new().unwrap();

    let mut ui = TestUI::new();
    let result = ReportCommand::new(options_for(&temp)).execute(&mut ui);

    match result {
        Err(Error::NoFiles(path)) => assert_eq!(path, temp.path()),
        other => panic!("expected NoFiles, got {:?}", other),
    }
    assert!(ui.output.is_empty());
}

#[test]
fn test_report_only_unrelated_files() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("results.xml"), PASSING_SUITE).unwrap();
    fs::write(temp.path().join("junit-1.0.txt"), PASSING_SUITE).unwrap();
    fs::create_dir(temp.path().join("junit-2.0.xml")).unwrap();

    let mut ui = TestUI::new();
    let result = ReportCommand::new(options_for(&temp)).execute(&mut ui);

    assert!(matches!(result, Err(Error::NoFiles(_))));
    let message = result.unwrap_err().to_string();
    assert!(message.starts_with("files not found: "));
}

#[test]
fn test_report_missing_directory() {
    let temp = TempDir::new().unwrap();

    let mut ui = TestUI::new();
    let result = ReportCommand::new(ReportOptions {
        directory: temp.path().join("nonexistent"),
        ..Default::default()
    })
    .execute(&mut ui);

    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_report_malformed_xml_names_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("junit-1.0.xml"), PASSING_SUITE).unwrap();
    fs::write(
        temp.path().join("junit-2.0.xml"),
        "<testsuite name=\"s\"><testcase name=\"testA\"",
    )
    .unwrap();

    let mut ui = TestUI::new();
    let result = ReportCommand::new(options_for(&temp)).execute(&mut ui);

    match result {
        Err(Error::Ingest { path, .. }) => assert!(path.ends_with("junit-2.0.xml")),
        other => panic!("expected Ingest error, got {:?}", other),
    }
    assert!(ui.output.is_empty());
}

#[test]
fn test_report_invalid_test_name() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("junit-1.0.xml"),
        r#"<testsuite name="s"><testcase name="   " classname="pkg.AlphaTest" time="1"/></testsuite>"#,
    )
    .unwrap();

    let mut ui = TestUI::new();
    let result = ReportCommand::new(options_for(&temp)).execute(&mut ui);

    assert!(matches!(result, Err(Error::Ingest { .. })));
}

#[test]
fn test_report_unsupported_format_after_table() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("junit-1.0.xml"), PASSING_SUITE).unwrap();

    let mut ui = TestUI::new();
    let result = ReportCommand::new(ReportOptions {
        export_format: Some("yaml".to_string()),
        ..options_for(&temp)
    })
    .execute(&mut ui);

    match result {
        Err(e @ Error::UnsupportedExportFormat(_)) => {
            assert_eq!(e.to_string(), "unsupported output format: yaml")
        }
        other => panic!("expected UnsupportedExportFormat, got {:?}", other),
    }
    // The table is still printed before the failure.
    assert_eq!(ui.output.len(), 3);
    assert!(!temp.path().join("report.yaml").exists());
}

#[test]
fn test_compare_missing_baseline() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("junit-1.0.xml"), PASSING_SUITE).unwrap();

    let mut ui = TestUI::new();
    let result =
        CompareBaselineCommand::new(options_for(&temp), temp.path().join("nope.txt"))
            .execute(&mut ui);

    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_config_unknown_key() {
    let result = ReportOptions::parse("[DEFAULT]\ncolour = true\n");
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_config_bad_boolean() {
    let result = ReportOptions::parse("[DEFAULT]\nticks = maybe\n");
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_config_missing_file() {
    let temp = TempDir::new().unwrap();
    let result = ReportOptions::load_from_file(&temp.path().join("missing.ini"));
    assert!(matches!(result, Err(Error::Config(_))));
}
