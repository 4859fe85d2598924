//! Monitoring configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration. Dates are ISO strings and windows are written as
//! `"YYYY-MM-DD..YYYY-MM-DD"`:
//!
//! ```toml
//! [drift]
//! reference_window = "2025-12-01..2025-12-31"
//! current_window = "2026-02-01..2026-02-08"
//! bins = 10
//!
//! [freshness]
//! expected_latest_date = "2026-02-08"
//! sla_days = 2
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use noshow_model::{DateWindow, Thresholds};

use crate::error::{MonitorError, Result};

/// Top-level monitoring configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub drift: DriftConfig,
    pub freshness: FreshnessConfig,
    pub latency: LatencyConfig,
}

/// Drift windows, binning, thresholds and the monitored features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub reference_window: DateWindow,
    pub current_window: DateWindow,
    /// Number of quantile bins for numeric features.
    pub bins: usize,
    pub warn_threshold: f64,
    pub alert_threshold: f64,
    /// Column holding each row's calendar date.
    pub date_column: String,
    pub numeric_features: Vec<String>,
    pub categorical_features: Vec<String>,
}

impl Default for DriftConfig {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            reference_window: DateWindow::new(date(2025, 12, 1), date(2025, 12, 31)),
            current_window: DateWindow::new(date(2026, 2, 1), date(2026, 2, 8)),
            bins: 10,
            warn_threshold: thresholds.warn,
            alert_threshold: thresholds.alert,
            date_column: "date_key".to_string(),
            numeric_features: to_strings(&[
                "lead_time_days",
                "age",
                "deprivation_index",
                "predicted_no_show_proba",
                "prior_no_show_count",
            ]),
            categorical_features: to_strings(&[
                "clinic_id",
                "booking_channel",
                "appointment_type",
                "risk_band",
                "clinic_region",
                "age_band",
            ]),
        }
    }
}

impl DriftConfig {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            warn: self.warn_threshold,
            alert: self.alert_threshold,
        }
    }
}

/// Data freshness SLA for the fact table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreshnessConfig {
    pub expected_latest_date: NaiveDate,
    pub sla_days: i64,
    /// Entity name used for freshness alerts.
    pub table: String,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            expected_latest_date: date(2026, 2, 8),
            sla_days: 2,
            table: "fact_appointments".to_string(),
        }
    }
}

/// Latency simulation and serving-health ceilings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    /// Number of daily samples to simulate, ending at the current window end.
    pub days: u32,
    pub seed: u64,
    pub p95_ceiling_ms: f64,
    pub error_rate_ceiling: f64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            days: 30,
            seed: 20_260_209,
            p95_ceiling_ms: 600.0,
            error_rate_ceiling: 0.03,
        }
    }
}

impl MonitorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| MonitorError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded monitoring config");
        Ok(config)
    }

    /// Check cross-field consistency.
    pub fn validate(&self) -> Result<()> {
        let drift = &self.drift;
        for (name, window) in [
            ("reference_window", drift.reference_window),
            ("current_window", drift.current_window),
        ] {
            if !window.is_ordered() {
                return Err(MonitorError::Config(format!(
                    "{name} starts after it ends ({window})"
                )));
            }
        }
        if drift.reference_window.overlaps(&drift.current_window) {
            return Err(MonitorError::Config(format!(
                "reference_window {} overlaps current_window {}",
                drift.reference_window, drift.current_window
            )));
        }
        if drift.bins < 2 {
            return Err(MonitorError::Config(format!(
                "bins must be at least 2, got {}",
                drift.bins
            )));
        }
        if drift.warn_threshold > drift.alert_threshold {
            return Err(MonitorError::Config(format!(
                "warn_threshold {} exceeds alert_threshold {}",
                drift.warn_threshold, drift.alert_threshold
            )));
        }
        if drift.date_column.trim().is_empty() {
            return Err(MonitorError::Config("date_column is empty".to_string()));
        }
        if self.freshness.sla_days < 0 {
            return Err(MonitorError::Config(format!(
                "sla_days must not be negative, got {}",
                self.freshness.sla_days
            )));
        }
        if self.latency.days == 0 {
            return Err(MonitorError::Config("latency days must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}
