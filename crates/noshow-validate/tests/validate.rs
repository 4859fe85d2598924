//! Integration tests for the expectation engine.

use chrono::{NaiveDate, TimeZone, Utc};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use serde_json::{Value, json};

use noshow_ingest::Datasets;
use noshow_model::Expectation;
use noshow_validate::{
    DqError, MAX_INVALID_SAMPLES, issue_register, run_checks, summarize,
};

fn str_column(name: &str, values: &[Option<&str>]) -> Column {
    Series::new(name.into(), values.to_vec()).into_column()
}

fn f64_column(name: &str, values: &[Option<f64>]) -> Column {
    Series::new(name.into(), values.to_vec()).into_column()
}

fn datasets(entries: Vec<(&str, DataFrame)>) -> Datasets {
    entries
        .into_iter()
        .map(|(name, df)| (name.to_string(), df))
        .collect()
}

fn single(table: &str, df: DataFrame) -> Datasets {
    datasets(vec![(table, df)])
}

fn exp(id: &str, table: &str, kind: &str, kwargs: Value) -> Expectation {
    Expectation::new(id, table, kind, kwargs)
}

fn fact_frame() -> DataFrame {
    DataFrame::new(vec![
        str_column(
            "appointment_id",
            &[Some("A1"), Some("A2"), Some("A3"), Some("A4")],
        ),
        f64_column(
            "deprivation_index",
            &[Some(0.2), None, None, None],
        ),
        f64_column("lead_time_days", &[Some(3.0), Some(-2.0), Some(0.0), Some(14.0)]),
        str_column(
            "booking_channel",
            &[Some("web"), Some("phone"), Some("fax"), None],
        ),
    ])
    .unwrap()
}

#[test]
fn test_non_null_reports_missing_count() {
    let data = single("fact_appointments", fact_frame());
    let results = run_checks(
        &data,
        &[exp(
            "EXP_001",
            "fact_appointments",
            "non_null",
            json!({"column": "deprivation_index"}),
        )],
    )
    .unwrap();

    assert_eq!(results.len(), 1);
    assert!(!results[0].passed);
    assert_eq!(results[0].details["null_count"], 3);
}

#[test]
fn test_non_null_missing_column_has_undefined_count() {
    let data = single("fact_appointments", fact_frame());
    let results = run_checks(
        &data,
        &[exp("E", "fact_appointments", "non_null", json!({"column": "age"}))],
    )
    .unwrap();

    assert!(!results[0].passed);
    assert!(results[0].details["null_count"].is_null());
}

#[test]
fn test_non_null_treats_blank_strings_as_missing() {
    let df = DataFrame::new(vec![str_column("clinic_id", &[Some("C1"), Some("  ")])]).unwrap();
    let results = run_checks(
        &single("dim_clinic", df),
        &[exp("E", "dim_clinic", "expect_non_null", json!({"column": "clinic_id"}))],
    )
    .unwrap();

    assert_eq!(results[0].details["null_count"], 1);
}

#[test]
fn test_required_columns_lists_missing_in_order() {
    let data = single("fact_appointments", fact_frame());
    let results = run_checks(
        &data,
        &[exp(
            "E",
            "fact_appointments",
            "expect_required_columns",
            json!({"columns": ["zeta", "appointment_id", "alpha"]}),
        )],
    )
    .unwrap();

    assert!(!results[0].passed);
    assert_eq!(results[0].details["missing_columns"], json!(["zeta", "alpha"]));
}

#[test]
fn test_non_negative_counts_negatives_and_ignores_text() {
    let df = DataFrame::new(vec![str_column(
        "lead_time_days",
        &[Some("3"), Some("-1"), Some("soon"), None, Some("-0.5")],
    )])
    .unwrap();
    let results = run_checks(
        &single("staged_appointments", df),
        &[exp(
            "E",
            "staged_appointments",
            "non_negative",
            json!({"column": "lead_time_days"}),
        )],
    )
    .unwrap();

    assert!(!results[0].passed);
    assert_eq!(results[0].details["negative_count"], 2);
}

#[test]
fn test_numeric_checks_on_empty_column_pass() {
    let df = DataFrame::new(vec![f64_column("age", &[])]).unwrap();
    let results = run_checks(
        &single("dim_patient", df),
        &[
            exp("E1", "dim_patient", "non_negative", json!({"column": "age"})),
            exp(
                "E2",
                "dim_patient",
                "between",
                json!({"column": "age", "min": 0, "max": 110}),
            ),
        ],
    )
    .unwrap();

    assert!(results[0].passed);
    assert_eq!(results[0].details["negative_count"], 0);
    assert!(results[1].passed);
    assert_eq!(results[1].details["out_of_range_count"], 0);
}

#[test]
fn test_between_reports_bounds() {
    let df = DataFrame::new(vec![f64_column(
        "age",
        &[Some(-1.0), Some(0.0), Some(110.0), Some(111.0), None],
    )])
    .unwrap();
    let results = run_checks(
        &single("dim_patient", df),
        &[exp(
            "E",
            "dim_patient",
            "expect_between",
            json!({"column": "age", "min": 0, "max": 110}),
        )],
    )
    .unwrap();

    let details = &results[0].details;
    assert!(!results[0].passed);
    assert_eq!(details["out_of_range_count"], 2);
    assert_eq!(details["min"], 0.0);
    assert_eq!(details["max"], 110.0);
}

#[test]
fn test_missing_column_errors() {
    let data = single("fact_appointments", fact_frame());
    let expectations = vec![
        exp("E1", "fact_appointments", "non_negative", json!({"column": "nope"})),
        exp(
            "E2",
            "fact_appointments",
            "between",
            json!({"column": "nope", "min": 0, "max": 1}),
        ),
        exp(
            "E3",
            "fact_appointments",
            "unique",
            json!({"columns": ["appointment_id", "nope"]}),
        ),
        exp(
            "E4",
            "fact_appointments",
            "in_set",
            json!({"column": "nope", "allowed_values": ["a"]}),
        ),
    ];

    let results = run_checks(&data, &expectations).unwrap();

    for result in &results {
        assert!(!result.passed, "{} should fail", result.expectation_id);
        assert_eq!(result.details, json!({"error": "missing_column"}));
    }
}

#[test]
fn test_unique_counts_repeats_after_first() {
    let df = DataFrame::new(vec![
        str_column("appointment_id", &[Some("A1"), Some("A2"), Some("A1"), Some("A1")]),
        str_column("clinic_id", &[Some("C1"), Some("C1"), Some("C1"), Some("C2")]),
    ])
    .unwrap();
    let data = single("raw_appointments", df);

    let results = run_checks(
        &data,
        &[
            exp(
                "single",
                "raw_appointments",
                "unique",
                json!({"columns": ["appointment_id"]}),
            ),
            exp(
                "composite",
                "raw_appointments",
                "unique",
                json!({"columns": ["appointment_id", "clinic_id"]}),
            ),
        ],
    )
    .unwrap();

    assert_eq!(results[0].details["duplicate_rows"], 2);
    assert_eq!(results[1].details["duplicate_rows"], 1);
    assert!(!results[1].passed);
}

#[test]
fn test_unique_treats_nulls_as_equal() {
    let df = DataFrame::new(vec![str_column("patient_id", &[None, Some("P1"), None])]).unwrap();
    let results = run_checks(
        &single("dim_patient", df),
        &[exp("E", "dim_patient", "unique", json!({"columns": ["patient_id"]}))],
    )
    .unwrap();

    assert_eq!(results[0].details["duplicate_rows"], 1);
}

#[test]
fn test_in_set_counts_and_samples() {
    let data = single("fact_appointments", fact_frame());
    let results = run_checks(
        &data,
        &[exp(
            "E",
            "fact_appointments",
            "in_set",
            json!({"column": "booking_channel", "allowed_values": ["web", "phone"]}),
        )],
    )
    .unwrap();

    let details = &results[0].details;
    assert!(!results[0].passed);
    assert_eq!(details["invalid_count"], 2);
    assert_eq!(details["sample_invalid_values"], json!(["fax", "NA"]));
}

#[test]
fn test_in_set_treats_blank_as_missing() {
    let df = DataFrame::new(vec![str_column(
        "booking_channel",
        &[Some("web"), Some("  "), None],
    )])
    .unwrap();
    let data = single("fact_appointments", df);
    let strict = exp(
        "E1",
        "fact_appointments",
        "in_set",
        json!({"column": "booking_channel", "allowed_values": ["web"]}),
    );
    let lenient = exp(
        "E2",
        "fact_appointments",
        "in_set",
        json!({"column": "booking_channel", "allowed_values": ["web", null]}),
    );
    let non_null = exp(
        "E3",
        "fact_appointments",
        "non_null",
        json!({"column": "booking_channel"}),
    );

    let results = run_checks(&data, &[strict, lenient, non_null]).unwrap();

    assert_eq!(results[0].details["invalid_count"], 2);
    assert_eq!(results[0].details["sample_invalid_values"], json!(["NA", "NA"]));
    assert!(results[1].passed);
    assert_eq!(results[2].details["null_count"], 2);
}

#[test]
fn test_in_set_caps_samples() {
    let values: Vec<Option<&str>> = ["a", "b", "c", "d", "e", "f", "g", "ok"]
        .into_iter()
        .map(Some)
        .collect();
    let df = DataFrame::new(vec![str_column("risk_band", &values)]).unwrap();
    let results = run_checks(
        &single("fact_appointments", df),
        &[exp(
            "E",
            "fact_appointments",
            "in_set",
            json!({"column": "risk_band", "allowed_values": ["ok"]}),
        )],
    )
    .unwrap();

    let details = &results[0].details;
    assert_eq!(details["invalid_count"], 7);
    let samples = details["sample_invalid_values"].as_array().unwrap();
    assert_eq!(samples.len(), MAX_INVALID_SAMPLES);
    assert_eq!(samples[0], "a");
}

#[test]
fn test_in_set_matches_numeric_values() {
    let df = DataFrame::new(vec![
        Series::new("no_show".into(), vec![0i64, 1, 1, 2]).into_column(),
    ])
    .unwrap();
    let results = run_checks(
        &single("fact_appointments", df),
        &[exp(
            "E",
            "fact_appointments",
            "in_set",
            json!({"column": "no_show", "allowed_values": [0, 1]}),
        )],
    )
    .unwrap();

    assert_eq!(results[0].details["invalid_count"], 1);
    assert_eq!(results[0].details["sample_invalid_values"], json!(["2"]));
}

#[test]
fn test_unknown_table_and_type_do_not_stop_batch() {
    let data = single("fact_appointments", fact_frame());
    let expectations = vec![
        exp("E1", "dim_missing", "non_null", json!({"column": "x"})),
        exp("E2", "fact_appointments", "expect_regex", json!({})),
        exp("E3", "fact_appointments", "non_null", json!({})),
        exp(
            "E4",
            "fact_appointments",
            "required_columns",
            json!({"columns": ["appointment_id"]}),
        ),
    ];

    let results = run_checks(&data, &expectations).unwrap();

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].details, json!({"error": "unknown_table"}));
    assert_eq!(results[0].table, "dim_missing");
    assert_eq!(
        results[1].details,
        json!({"error": "unknown_expectation_type: expect_regex"})
    );
    assert_eq!(
        results[2].details,
        json!({"error": "invalid_kwargs: missing 'column'"})
    );
    assert!(results[3].passed);
}

#[test]
fn test_results_echo_expectation_fields() {
    let data = single("fact_appointments", fact_frame());
    let expectation = exp(
        "EXP_042",
        "fact_appointments",
        "expect_required_columns",
        json!({"columns": ["appointment_id"]}),
    )
    .with_severity("high");

    let results = run_checks(&data, &[expectation]).unwrap();

    assert_eq!(results[0].expectation_id, "EXP_042");
    assert_eq!(results[0].expectation_type, "expect_required_columns");
    assert_eq!(results[0].severity, "high");
}

#[test]
fn test_no_datasets_is_fatal() {
    let result = run_checks(
        &Datasets::new(),
        &[exp("E", "fact_appointments", "non_null", json!({"column": "x"}))],
    );
    assert!(matches!(result, Err(DqError::NoDatasets)));
}

#[test]
fn test_summary_and_issue_register() {
    let data = datasets(vec![
        ("fact_appointments", fact_frame()),
        (
            "dim_clinic",
            DataFrame::new(vec![str_column("clinic_id", &[Some("C1")])]).unwrap(),
        ),
    ]);
    let expectations = vec![
        exp(
            "E1",
            "fact_appointments",
            "non_null",
            json!({"column": "deprivation_index"}),
        )
        .with_severity("high"),
        exp("E2", "dim_clinic", "non_null", json!({"column": "clinic_id"})),
        exp(
            "E3",
            "fact_appointments",
            "non_negative",
            json!({"column": "lead_time_days"}),
        ),
    ];
    let results = run_checks(&data, &expectations).unwrap();

    let generated_at = Utc.with_ymd_and_hms(2026, 2, 9, 8, 0, 0).unwrap();
    let summary = summarize(&results, generated_at);
    assert_eq!(summary.overall.passed, 1);
    assert_eq!(summary.overall.failed, 2);
    assert_eq!(summary.tables["fact_appointments"].failed, 2);
    assert_eq!(summary.tables["dim_clinic"].passed, 1);
    assert!(summary.has_failures());

    let date = NaiveDate::from_ymd_opt(2026, 2, 9).unwrap();
    let issues = issue_register(&results, date);
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].issue_id, "DQ-0001");
    assert_eq!(issues[0].expectation_id, "E1");
    assert_eq!(issues[0].severity, "high");
    assert_eq!(
        issues[0].description,
        "Expectation failed: non_null ({\"null_count\":3})"
    );
    assert_eq!(issues[1].issue_id, "DQ-0002");
    assert_eq!(issues[1].expectation_id, "E3");
    assert_eq!(issues[1].status, "Open");
}
