use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::status::FreshnessStatus;

/// Lag between the expected and the observed latest data date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreshnessSnapshot {
    pub expected_latest_date: NaiveDate,
    pub observed_latest_date: NaiveDate,
    /// Negative when data is ahead of the expected date.
    pub lag_days: i64,
    pub sla_days: i64,
    pub freshness_status: FreshnessStatus,
}

/// Daily serving latency and error-rate sample for the prediction API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySample {
    pub date: NaiveDate,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub error_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    Drift,
    Freshness,
    ApiPerf,
}

impl AlertType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drift => "DRIFT",
            Self::Freshness => "FRESHNESS",
            Self::ApiPerf => "API_PERF",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Medium,
    High,
}

impl AlertSeverity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry in the alert register. Ids are sequential within one run only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub alert_id: String,
    pub timestamp_utc: DateTime<Utc>,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub entity: String,
    pub message: String,
    pub status: String,
}

/// Single-row roll-up of one monitoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringSnapshot {
    pub snapshot_time_utc: DateTime<Utc>,
    pub drift_alert_count: usize,
    pub drift_warn_count: usize,
    pub freshness_status: FreshnessStatus,
    pub freshness_lag_days: i64,
    pub api_p95_ms: f64,
    pub api_error_rate: f64,
}
