//! Tests for expectation file loading.

use std::fs;

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use serde_json::json;
use tempfile::TempDir;

use noshow_ingest::Datasets;
use noshow_validate::{DqError, load_expectations, load_expectations_file, run_checks};

#[test]
fn test_loads_exp_files_in_name_order() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("EXP_002_unique.json"),
        r#"{"expectation_id": "EXP_002", "table": "raw_appointments",
            "expectation_type": "expect_unique", "kwargs": {"columns": ["appointment_id"]}}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("EXP_001_required.json"),
        r#"[
            {"expectation_id": "EXP_001a", "table": "fact_appointments",
             "expectation_type": "expect_required_columns", "severity": "high",
             "kwargs": {"columns": ["appointment_id"]}},
            {"expectation_id": "EXP_001b", "expectation_type": "expect_non_null",
             "kwargs": {"column": "age"}}
        ]"#,
    )
    .unwrap();
    fs::write(dir.path().join("README.json"), "not json at all").unwrap();

    let expectations = load_expectations(dir.path()).unwrap();

    let ids: Vec<&str> = expectations
        .iter()
        .map(|e| e.expectation_id.as_str())
        .collect();
    assert_eq!(ids, ["EXP_001a", "EXP_001b", "EXP_002"]);
    assert_eq!(expectations[0].severity, "high");
    assert_eq!(expectations[1].severity, "medium");
    assert_eq!(expectations[1].table, "unknown_table");
}

#[test]
fn test_missing_directory() {
    let dir = TempDir::new().unwrap();
    let result = load_expectations(&dir.path().join("nope"));
    assert!(matches!(result, Err(DqError::DirectoryNotFound { .. })));
}

#[test]
fn test_malformed_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("EXP_bad.json");
    fs::write(&path, "{ broken").unwrap();

    match load_expectations_file(&path) {
        Err(DqError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_malformed_rule_fails_alone() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("EXP_001_required.json"),
        r#"{"expectation_id": "EXP_001", "table": "fact_appointments",
            "expectation_type": "expect_required_columns",
            "kwargs": {"columns": ["appointment_id"]}}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("EXP_002_broken.json"),
        r#"{"expectation_id": "EXP_002", "table": "fact_appointments",
            "expectation_type": "expect_in_set", "severity": 3, "kwargs": ["a"]}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("EXP_003_unique.json"),
        r#"{"expectation_id": "EXP_003", "table": "fact_appointments",
            "expectation_type": "expect_unique",
            "kwargs": {"columns": ["appointment_id"]}}"#,
    )
    .unwrap();

    let expectations = load_expectations(dir.path()).unwrap();
    let fact = DataFrame::new(vec![
        Series::new("appointment_id".into(), ["A1", "A2"]).into_column(),
    ])
    .unwrap();
    let datasets: Datasets = [("fact_appointments".to_string(), fact)].into_iter().collect();
    let results = run_checks(&datasets, &expectations).unwrap();

    assert_eq!(results.len(), 3);
    assert!(results[0].passed);
    assert!(!results[1].passed);
    assert_eq!(results[1].severity, "3");
    assert_eq!(
        results[1].details,
        json!({"error": "invalid_kwargs: kwargs must be an object"})
    );
    assert!(results[2].passed);
}
