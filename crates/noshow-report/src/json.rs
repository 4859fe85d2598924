//! Pretty-printed JSON reports.

use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use noshow_model::{DqSummary, FeatureDrift};

use crate::error::{ReportError, Result};
use crate::tables::create_file;

/// Write the per-table DQ summary.
pub fn write_dq_summary_json(path: &Path, summary: &DqSummary) -> Result<()> {
    write_pretty(path, summary)
}

/// Write drift records as a JSON array; undefined PSI is `null`.
pub fn write_drift_json(path: &Path, drift: &[FeatureDrift]) -> Result<()> {
    write_pretty(path, drift)
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(create_file(path)?);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| ReportError::io(path, e))?;
    tracing::debug!(path = %path.display(), "wrote JSON");
    Ok(())
}
