//! Error types for the data-quality runner.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors of a DQ run. Per-expectation problems never surface here;
/// they become failed check results instead.
#[derive(Debug, Error)]
pub enum DqError {
    /// No dataset was supplied, so there is nothing to check.
    #[error("no datasets available for data-quality checks")]
    NoDatasets,

    /// Expectation directory not found.
    #[error("expectation directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read an expectation file or directory.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Expectation file is not a valid expectation document.
    #[error("failed to parse expectation file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for DQ runs.
pub type Result<T> = std::result::Result<T, DqError>;
