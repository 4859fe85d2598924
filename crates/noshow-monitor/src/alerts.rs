//! Alert register and the monitoring snapshot.

use chrono::{DateTime, Utc};

use noshow_model::{
    Alert, AlertSeverity, AlertType, DriftStatus, FeatureDrift, FreshnessSnapshot, FreshnessStatus,
    LatencySample, MonitoringSnapshot,
};

use crate::config::{FreshnessConfig, LatencyConfig};
use crate::drift::count_status;
use crate::error::{MonitorError, Result};

/// Entity named on serving-health alerts.
pub const API_ENTITY: &str = "predict_api";

const OPEN: &str = "Open";

/// Derive the alert register for one run.
///
/// Drift alerts follow report order, then freshness, then serving health
/// judged on the most recent latency sample. Ids are `AL-0001` onwards.
///
/// # Errors
///
/// [`MonitorError::NoLatency`] when `latency` is empty.
pub fn derive_alerts(
    drift: &[FeatureDrift],
    freshness: &FreshnessSnapshot,
    latency: &[LatencySample],
    freshness_config: &FreshnessConfig,
    latency_config: &LatencyConfig,
    now: DateTime<Utc>,
) -> Result<Vec<Alert>> {
    let last = latency.last().ok_or(MonitorError::NoLatency)?;
    let mut alerts = AlertLog::new(now);

    for record in drift {
        let severity = match record.status {
            DriftStatus::Alert => AlertSeverity::High,
            DriftStatus::Warn => AlertSeverity::Medium,
            DriftStatus::Ok | DriftStatus::Na => continue,
        };
        alerts.push(
            AlertType::Drift,
            severity,
            &record.feature,
            format!(
                "PSI drift {} for {} (psi={})",
                record.status, record.feature, record.psi
            ),
        );
    }

    if freshness.freshness_status == FreshnessStatus::Alert {
        alerts.push(
            AlertType::Freshness,
            AlertSeverity::High,
            &freshness_config.table,
            format!(
                "Freshness SLA breach. Lag days={}, SLA={}",
                freshness.lag_days, freshness.sla_days
            ),
        );
    }

    if last.p95_ms > latency_config.p95_ceiling_ms
        || last.error_rate > latency_config.error_rate_ceiling
    {
        alerts.push(
            AlertType::ApiPerf,
            AlertSeverity::High,
            API_ENTITY,
            format!(
                "API performance alert. p95_ms={} error_rate={}",
                last.p95_ms, last.error_rate
            ),
        );
    }

    let alerts = alerts.finish();
    if !alerts.is_empty() {
        tracing::warn!(count = alerts.len(), "monitoring raised alerts");
    }
    Ok(alerts)
}

/// Roll a run up into a single snapshot row.
///
/// # Errors
///
/// [`MonitorError::NoLatency`] when `latency` is empty.
pub fn build_snapshot(
    drift: &[FeatureDrift],
    freshness: &FreshnessSnapshot,
    latency: &[LatencySample],
    now: DateTime<Utc>,
) -> Result<MonitoringSnapshot> {
    let last = latency.last().ok_or(MonitorError::NoLatency)?;
    Ok(MonitoringSnapshot {
        snapshot_time_utc: now,
        drift_alert_count: count_status(drift, DriftStatus::Alert),
        drift_warn_count: count_status(drift, DriftStatus::Warn),
        freshness_status: freshness.freshness_status,
        freshness_lag_days: freshness.lag_days,
        api_p95_ms: last.p95_ms,
        api_error_rate: last.error_rate,
    })
}

struct AlertLog {
    timestamp: DateTime<Utc>,
    alerts: Vec<Alert>,
}

impl AlertLog {
    fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            alerts: Vec::new(),
        }
    }

    fn push(&mut self, alert_type: AlertType, severity: AlertSeverity, entity: &str, message: String) {
        let alert_id = format!("AL-{:04}", self.alerts.len() + 1);
        self.alerts.push(Alert {
            alert_id,
            timestamp_utc: self.timestamp,
            alert_type,
            severity,
            entity: entity.to_string(),
            message,
            status: OPEN.to_string(),
        });
    }

    fn finish(self) -> Vec<Alert> {
        self.alerts
    }
}
