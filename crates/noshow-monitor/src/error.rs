//! Error types for monitoring runs.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal preconditions of a monitoring run.
///
/// Features without enough data are not errors; they are reported with an
/// `NA` status instead.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The fact table has no rows at all.
    #[error("fact table is empty")]
    EmptyFactTable,

    /// No row of the fact table carries a parseable date.
    #[error("no parseable dates in column '{column}'")]
    NoObservedDates { column: String },

    /// Alerts and the snapshot need at least one latency sample.
    #[error("no API latency samples available")]
    NoLatency,

    /// Configuration values are inconsistent.
    #[error("invalid monitoring configuration: {0}")]
    Config(String),

    /// Failed to read the configuration file.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`MonitorConfig`](crate::MonitorConfig).
    #[error("failed to parse monitoring config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for monitoring operations.
pub type Result<T> = std::result::Result<T, MonitorError>;
