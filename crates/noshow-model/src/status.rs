//! Status tiers shared by drift classification, freshness and alerting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a feature's PSI against the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriftStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "WARN")]
    Warn,
    #[serde(rename = "ALERT")]
    Alert,
    /// PSI could not be computed with enough samples.
    #[serde(rename = "NA")]
    Na,
}

impl DriftStatus {
    /// Classify a PSI value. NaN is never compared against the thresholds.
    pub fn classify(psi: f64, thresholds: Thresholds) -> Self {
        if psi.is_nan() {
            Self::Na
        } else if psi >= thresholds.alert {
            Self::Alert
        } else if psi >= thresholds.warn {
            Self::Warn
        } else {
            Self::Ok
        }
    }

    /// Ordering weight used when sorting drift reports, highest first.
    pub const fn severity_rank(self) -> u8 {
        match self {
            Self::Alert => 3,
            Self::Warn => 2,
            Self::Na => 1,
            Self::Ok => 0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warn => "WARN",
            Self::Alert => "ALERT",
            Self::Na => "NA",
        }
    }
}

impl fmt::Display for DriftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Warn/alert cut-offs for PSI. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub warn: f64,
    pub alert: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warn: 0.1,
            alert: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreshnessStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ALERT")]
    Alert,
}

impl FreshnessStatus {
    /// Only lag beyond the SLA alerts; data ahead of schedule is fine.
    pub fn from_lag(lag_days: i64, sla_days: i64) -> Self {
        if lag_days > sla_days {
            Self::Alert
        } else {
            Self::Ok
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Alert => "ALERT",
        }
    }
}

impl fmt::Display for FreshnessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
