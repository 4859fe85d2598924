//! Freshness, alerting and end-to-end monitoring runs.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

use noshow_model::{AlertSeverity, AlertType, FreshnessStatus, LatencySample};
use noshow_monitor::{
    API_ENTITY, MonitorConfig, MonitorError, evaluate_freshness, freshness_snapshot,
    run_monitoring, simulate_latency,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 9, 6, 30, 0).unwrap()
}

fn sample(p95_ms: f64, error_rate: f64) -> LatencySample {
    LatencySample {
        date: date(2026, 2, 8),
        p50_ms: 120.0,
        p95_ms,
        p99_ms: p95_ms * 1.2,
        error_rate,
    }
}

fn healthy() -> Vec<LatencySample> {
    vec![sample(290.0, 0.01)]
}

/// Fact table where `age` is stable and `risk_band` shifts heavily.
fn drifting_fact(last_current_day: u32) -> DataFrame {
    let mut dates = Vec::new();
    let mut ages = Vec::new();
    let mut bands = Vec::new();
    for i in 0..310u32 {
        dates.push(format!("2025-12-{:02}", i % 31 + 1));
        ages.push(f64::from(i % 90));
        bands.push(if i % 10 == 0 { "high" } else { "low" });
    }
    for i in 0..240u32 {
        dates.push(format!("2026-02-{:02}", i % last_current_day + 1));
        ages.push(f64::from(i % 90));
        bands.push(if i % 2 == 0 { "high" } else { "low" });
    }

    DataFrame::new(vec![
        Series::new("date_key".into(), dates).into_column(),
        Series::new("age".into(), ages).into_column(),
        Series::new("risk_band".into(), bands).into_column(),
    ])
    .unwrap()
}

fn config() -> MonitorConfig {
    let mut config = MonitorConfig::default();
    config.drift.numeric_features = vec!["age".to_string()];
    config.drift.categorical_features = vec!["risk_band".to_string()];
    config
}

#[test]
fn test_freshness_on_time_and_late() {
    let on_time = evaluate_freshness(date(2026, 2, 8), date(2026, 2, 8), 2);
    assert_eq!(on_time.lag_days, 0);
    assert_eq!(on_time.freshness_status, FreshnessStatus::Ok);

    let late = evaluate_freshness(date(2026, 2, 8), date(2026, 2, 3), 2);
    assert_eq!(late.lag_days, 5);
    assert_eq!(late.freshness_status, FreshnessStatus::Alert);

    let ahead = evaluate_freshness(date(2026, 2, 8), date(2026, 2, 12), 2);
    assert_eq!(ahead.lag_days, -4);
    assert_eq!(ahead.freshness_status, FreshnessStatus::Ok);
}

#[test]
fn test_freshness_reads_latest_date_from_table() {
    let config = config();
    let snapshot =
        freshness_snapshot(&drifting_fact(3), &config.drift.date_column, &config.freshness)
            .unwrap();
    assert_eq!(snapshot.observed_latest_date, date(2026, 2, 3));
    assert_eq!(snapshot.lag_days, 5);
    assert_eq!(snapshot.freshness_status, FreshnessStatus::Alert);
}

#[test]
fn test_table_without_dates_is_fatal() {
    let df = DataFrame::new(vec![
        Series::new("date_key".into(), vec!["soon", "later"]).into_column(),
    ])
    .unwrap();
    let config = config();
    let err = freshness_snapshot(&df, "date_key", &config.freshness).unwrap_err();
    assert!(matches!(err, MonitorError::NoObservedDates { column } if column == "date_key"));
}

#[test]
fn test_run_raises_sequential_alerts() {
    let run = run_monitoring(
        &drifting_fact(3),
        vec![sample(250.0, 0.01), sample(720.5, 0.012)],
        &config(),
        now(),
    )
    .unwrap();

    assert!(run.has_alerts());
    let ids: Vec<&str> = run.alerts.iter().map(|a| a.alert_id.as_str()).collect();
    assert_eq!(ids, ["AL-0001", "AL-0002", "AL-0003"]);

    let drift = &run.alerts[0];
    assert_eq!(drift.alert_type, AlertType::Drift);
    assert_eq!(drift.severity, AlertSeverity::High);
    assert_eq!(drift.entity, "risk_band");
    assert!(drift.message.starts_with("PSI drift ALERT for risk_band (psi="));

    let freshness = &run.alerts[1];
    assert_eq!(freshness.alert_type, AlertType::Freshness);
    assert_eq!(freshness.entity, "fact_appointments");
    assert_eq!(freshness.message, "Freshness SLA breach. Lag days=5, SLA=2");

    let api = &run.alerts[2];
    assert_eq!(api.alert_type, AlertType::ApiPerf);
    assert_eq!(api.entity, API_ENTITY);
    assert_eq!(api.message, "API performance alert. p95_ms=720.5 error_rate=0.012");

    for alert in &run.alerts {
        assert_eq!(alert.timestamp_utc, now());
        assert_eq!(alert.status, "Open");
    }

    assert_eq!(run.snapshot.drift_alert_count, 1);
    assert_eq!(run.snapshot.drift_warn_count, 0);
    assert_eq!(run.snapshot.freshness_lag_days, 5);
    assert_eq!(run.snapshot.api_p95_ms, 720.5);
    assert_eq!(run.latency.len(), 2);
}

#[test]
fn test_error_rate_alone_raises_api_alert() {
    let mut config = config();
    config.drift.categorical_features.clear();
    let run = run_monitoring(&drifting_fact(8), vec![sample(300.0, 0.031)], &config, now()).unwrap();

    assert_eq!(run.alerts.len(), 1);
    assert_eq!(run.alerts[0].alert_id, "AL-0001");
    assert_eq!(run.alerts[0].alert_type, AlertType::ApiPerf);
}

#[test]
fn test_quiet_run_has_no_alerts() {
    let mut config = config();
    config.drift.categorical_features.clear();
    let run = run_monitoring(&drifting_fact(8), healthy(), &config, now()).unwrap();

    assert!(!run.has_alerts());
    assert_eq!(run.freshness.lag_days, 0);
    assert_eq!(run.snapshot.freshness_status, FreshnessStatus::Ok);
}

#[test]
fn test_run_preconditions() {
    let config = config();
    let empty = drifting_fact(8).head(Some(0));
    assert!(matches!(
        run_monitoring(&empty, healthy(), &config, now()),
        Err(MonitorError::EmptyFactTable)
    ));
    assert!(matches!(
        run_monitoring(&drifting_fact(8), Vec::new(), &config, now()),
        Err(MonitorError::NoLatency)
    ));

    let mut bad = config.clone();
    bad.drift.bins = 0;
    assert!(matches!(
        run_monitoring(&drifting_fact(8), healthy(), &bad, now()),
        Err(MonitorError::Config(_))
    ));
}

#[test]
fn test_simulated_latency_feeds_a_run() {
    let config = config();
    let latency = simulate_latency(&config.latency, config.drift.current_window.end);
    let last = latency.last().cloned().unwrap();

    let run = run_monitoring(&drifting_fact(8), latency, &config, now()).unwrap();

    assert_eq!(run.latency.len(), 30);
    assert_eq!(run.snapshot.api_p95_ms, last.p95_ms);
    assert_eq!(run.snapshot.api_error_rate, last.error_rate);
}
