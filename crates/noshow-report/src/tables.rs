//! CSV registers and reports.
//!
//! Every file starts with its header row, including registers with no
//! entries, so downstream readers always see the columns.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use noshow_model::{Alert, DqIssue, FeatureDrift, LatencySample, MonitoringSnapshot};

use crate::error::{ReportError, Result};

pub const ISSUE_REGISTER_COLUMNS: [&str; 8] = [
    "issue_id",
    "date",
    "table",
    "expectation_id",
    "severity",
    "description",
    "status",
    "notes",
];

pub const DRIFT_COLUMNS: [&str; 6] = [
    "feature",
    "feature_type",
    "psi",
    "status",
    "reference_window",
    "current_window",
];

pub const LATENCY_COLUMNS: [&str; 5] = ["date", "p50_ms", "p95_ms", "p99_ms", "error_rate"];

pub const SNAPSHOT_COLUMNS: [&str; 7] = [
    "snapshot_time_utc",
    "drift_alert_count",
    "drift_warn_count",
    "freshness_status",
    "freshness_lag_days",
    "api_p95_ms",
    "api_error_rate",
];

pub const ALERT_COLUMNS: [&str; 7] = [
    "alert_id",
    "timestamp_utc",
    "alert_type",
    "severity",
    "entity",
    "message",
    "status",
];

/// Write the DQ issue register (one row per failed check).
pub fn write_issue_register_csv(path: &Path, issues: &[DqIssue]) -> Result<()> {
    write_rows(path, &ISSUE_REGISTER_COLUMNS, issues)
}

/// Write drift records; undefined PSI is an empty field.
pub fn write_drift_csv(path: &Path, drift: &[FeatureDrift]) -> Result<()> {
    write_rows(path, &DRIFT_COLUMNS, drift)
}

pub fn write_latency_csv(path: &Path, samples: &[LatencySample]) -> Result<()> {
    write_rows(path, &LATENCY_COLUMNS, samples)
}

pub fn write_snapshot_csv(path: &Path, snapshot: &MonitoringSnapshot) -> Result<()> {
    write_rows(path, &SNAPSHOT_COLUMNS, std::slice::from_ref(snapshot))
}

pub fn write_alerts_csv(path: &Path, alerts: &[Alert]) -> Result<()> {
    write_rows(path, &ALERT_COLUMNS, alerts)
}

/// Read daily latency samples, oldest first as stored.
pub fn read_latency_csv(path: &Path) -> Result<Vec<LatencySample>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| ReportError::csv(path, e))?;

    let samples = reader
        .deserialize()
        .collect::<std::result::Result<Vec<LatencySample>, _>>()
        .map_err(|e| ReportError::csv(path, e))?;
    tracing::debug!(path = %path.display(), samples = samples.len(), "read latency samples");
    Ok(samples)
}

fn write_rows<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    let file = create_file(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer
        .write_record(header)
        .map_err(|e| ReportError::csv(path, e))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| ReportError::csv(path, e))?;
    }
    writer.flush().map_err(|e| ReportError::io(path, e))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote CSV");
    Ok(())
}

pub(crate) fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }
    File::create(path).map_err(|e| ReportError::io(path, e))
}
