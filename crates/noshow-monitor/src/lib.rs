//! Model monitoring for the no-show pipeline.
//!
//! Compares feature distributions of the scored fact table between a
//! reference and a current date window using the Population Stability
//! Index, checks data freshness against an SLA, and turns drift,
//! freshness and API latency into an alert register.
//!
//! # Example
//!
//! ```ignore
//! use chrono::Utc;
//! use noshow_monitor::{MonitorConfig, run_monitoring, simulate_latency};
//!
//! let config = MonitorConfig::default();
//! let latency = simulate_latency(&config.latency, config.drift.current_window.end);
//! let run = run_monitoring(&fact, latency, &config, Utc::now())?;
//! ```

mod alerts;
mod config;
mod drift;
mod error;
mod freshness;
mod latency;
pub mod psi;

use chrono::{DateTime, Utc};
use polars::prelude::DataFrame;
use tracing::info;

use noshow_model::{Alert, FeatureDrift, FreshnessSnapshot, LatencySample, MonitoringSnapshot};

// === Configuration ===
pub use config::{DriftConfig, FreshnessConfig, LatencyConfig, MonitorConfig};

// === Errors ===
pub use error::{MonitorError, Result};

// === Engines ===
pub use alerts::{API_ENTITY, build_snapshot, derive_alerts};
pub use drift::{MISSING_CATEGORY, WindowSlices, build_drift_report, count_status, sort_by_severity};
pub use freshness::{evaluate_freshness, freshness_snapshot, observed_latest_date};
pub use latency::simulate_latency;

/// Everything one monitoring run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoringRun {
    pub drift: Vec<FeatureDrift>,
    pub freshness: FreshnessSnapshot,
    pub latency: Vec<LatencySample>,
    pub snapshot: MonitoringSnapshot,
    pub alerts: Vec<Alert>,
}

impl MonitoringRun {
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}

/// Run drift, freshness and alerting over the fact table.
///
/// `latency` is the daily serving history, oldest first; the last sample
/// drives the snapshot and the API alert.
///
/// # Errors
///
/// Fails on an invalid `config`, an empty fact table, a table without any
/// parseable date, or empty `latency`.
pub fn run_monitoring(
    fact: &DataFrame,
    latency: Vec<LatencySample>,
    config: &MonitorConfig,
    now: DateTime<Utc>,
) -> Result<MonitoringRun> {
    config.validate()?;
    if latency.is_empty() {
        return Err(MonitorError::NoLatency);
    }

    let drift = build_drift_report(fact, &config.drift)?;
    let freshness = freshness_snapshot(fact, &config.drift.date_column, &config.freshness)?;
    let snapshot = build_snapshot(&drift, &freshness, &latency, now)?;
    let alerts = derive_alerts(
        &drift,
        &freshness,
        &latency,
        &config.freshness,
        &config.latency,
        now,
    )?;

    info!(
        rows = fact.height(),
        drift_alerts = snapshot.drift_alert_count,
        drift_warnings = snapshot.drift_warn_count,
        freshness = %freshness.freshness_status,
        alerts = alerts.len(),
        "monitoring run complete"
    );

    Ok(MonitoringRun {
        drift,
        freshness,
        latency,
        snapshot,
        alerts,
    })
}
