//! DQ and monitoring stages: load inputs, run the engines, write reports.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{info, info_span};

use noshow_ingest::{load_datasets, load_fact_table};
use noshow_model::{CheckResult, DqIssue, DqSummary};
use noshow_monitor::{MonitorConfig, MonitoringRun, run_monitoring, simulate_latency};
use noshow_report::{
    dq_files, monitor_files, read_latency_csv, write_alerts_csv, write_dq_html,
    write_dq_summary_json, write_drift_csv, write_drift_json, write_issue_register_csv,
    write_latency_csv, write_snapshot_csv,
};
use noshow_validate::{issue_register, load_expectations, run_checks, summarize};

/// Inputs and output folders of a DQ run.
#[derive(Debug, Clone)]
pub struct DqPaths {
    pub data_dir: PathBuf,
    pub expectations_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub logs_dir: PathBuf,
}

/// Everything a DQ run produced.
#[derive(Debug, Clone)]
pub struct DqOutcome {
    pub results: Vec<CheckResult>,
    pub summary: DqSummary,
    pub issues: Vec<DqIssue>,
    pub outputs: Vec<PathBuf>,
}

impl DqOutcome {
    pub fn has_failures(&self) -> bool {
        self.summary.has_failures()
    }
}

/// Inputs and output folder of a monitoring run.
#[derive(Debug, Clone)]
pub struct MonitorPaths {
    pub data_dir: PathBuf,
    pub config: Option<PathBuf>,
    pub latency: Option<PathBuf>,
    pub reports_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct MonitorOutcome {
    pub run: MonitoringRun,
    pub outputs: Vec<PathBuf>,
}

pub fn run_dq(paths: &DqPaths, now: DateTime<Utc>) -> Result<DqOutcome> {
    let span = info_span!("dq", data_dir = %paths.data_dir.display());
    let _guard = span.enter();

    let datasets = load_datasets(&paths.data_dir)
        .with_context(|| format!("load datasets from {}", paths.data_dir.display()))?;
    let expectations = load_expectations(&paths.expectations_dir).with_context(|| {
        format!(
            "load expectations from {}",
            paths.expectations_dir.display()
        )
    })?;
    info!(
        datasets = datasets.len(),
        expectations = expectations.len(),
        "inputs loaded"
    );

    let results = run_checks(&datasets, &expectations).context("run data-quality checks")?;
    let summary = summarize(&results, now);
    let issues = issue_register(&results, now.date_naive());

    let summary_path = paths.reports_dir.join(dq_files::SUMMARY_JSON);
    let html_path = paths.reports_dir.join(dq_files::REPORT_HTML);
    let issues_path = paths.logs_dir.join(dq_files::ISSUE_REGISTER_CSV);
    write_dq_summary_json(&summary_path, &summary)?;
    write_dq_html(&html_path, &results, now)?;
    write_issue_register_csv(&issues_path, &issues)?;
    info!(
        passed = summary.overall.passed,
        failed = summary.overall.failed,
        "DQ reports written"
    );

    Ok(DqOutcome {
        results,
        summary,
        issues,
        outputs: vec![summary_path, html_path, issues_path],
    })
}

pub fn run_monitor(paths: &MonitorPaths, now: DateTime<Utc>) -> Result<MonitorOutcome> {
    let span = info_span!("monitor", data_dir = %paths.data_dir.display());
    let _guard = span.enter();

    let config = match &paths.config {
        Some(path) => MonitorConfig::from_path(path)
            .with_context(|| format!("load monitoring config {}", path.display()))?,
        None => MonitorConfig::default(),
    };
    let fact = load_fact_table(&paths.data_dir)
        .with_context(|| format!("load fact table from {}", paths.data_dir.display()))?;
    let latency = match &paths.latency {
        Some(path) => read_latency_csv(path)?,
        None => simulate_latency(&config.latency, config.drift.current_window.end),
    };

    let run = run_monitoring(&fact, latency, &config, now).context("run monitoring")?;
    let outputs = write_monitoring_reports(&paths.reports_dir, &run)?;

    Ok(MonitorOutcome { run, outputs })
}

fn write_monitoring_reports(reports_dir: &Path, run: &MonitoringRun) -> Result<Vec<PathBuf>> {
    let drift_csv = reports_dir.join(monitor_files::DRIFT_CSV);
    let drift_json = reports_dir.join(monitor_files::DRIFT_JSON);
    let latency_csv = reports_dir.join(monitor_files::LATENCY_CSV);
    let snapshot_csv = reports_dir.join(monitor_files::SNAPSHOT_CSV);
    let alerts_csv = reports_dir.join(monitor_files::ALERTS_CSV);

    write_drift_csv(&drift_csv, &run.drift)?;
    write_drift_json(&drift_json, &run.drift)?;
    write_latency_csv(&latency_csv, &run.latency)?;
    write_snapshot_csv(&snapshot_csv, &run.snapshot)?;
    write_alerts_csv(&alerts_csv, &run.alerts)?;
    info!(dir = %reports_dir.display(), alerts = run.alerts.len(), "monitoring reports written");

    Ok(vec![
        drift_csv,
        snapshot_csv,
        alerts_csv,
        latency_csv,
        drift_json,
    ])
}
