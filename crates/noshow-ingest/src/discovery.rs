//! Dataset discovery for the pipeline's data directory.
//!
//! The ETL stage lays its outputs out as `raw/`, `staged/` and `curated/`
//! folders. Each known file maps to a logical dataset name that
//! expectations refer to.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};

/// Logical name of the scored fact table the drift monitor reads.
pub const FACT_TABLE: &str = "fact_appointments";

/// Curated star-schema tables loaded for data-quality checks.
pub const CURATED_TABLES: [&str; 5] = [
    FACT_TABLE,
    "dim_patient",
    "dim_clinic",
    "dim_neighbourhood",
    "dim_date",
];

/// Datasets keyed by logical name.
pub type Datasets = BTreeMap<String, DataFrame>;

/// A dataset file expected under the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    /// Logical dataset name (e.g., "raw_appointments").
    pub name: String,
    /// Path relative to the data directory.
    pub relative_path: PathBuf,
}

impl DatasetSource {
    fn new(name: &str, relative_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            relative_path: relative_path.into(),
        }
    }
}

/// Known dataset files in load order.
pub fn dataset_sources() -> Vec<DatasetSource> {
    let mut sources = vec![
        DatasetSource::new("raw_appointments", "raw/appointments_raw.csv"),
        DatasetSource::new("staged_appointments", "staged/appointments_staged.csv"),
    ];
    sources.extend(
        CURATED_TABLES
            .iter()
            .map(|name| DatasetSource::new(name, Path::new("curated").join(format!("{name}.csv")))),
    );
    sources
}

/// Loads every known dataset present under `data_dir`.
///
/// Missing files are skipped; an unreadable file is an error. The result
/// may be empty, which callers treat as a precondition failure.
pub fn load_datasets(data_dir: &Path) -> Result<Datasets> {
    if !data_dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: data_dir.to_path_buf(),
        });
    }

    let mut datasets = Datasets::new();
    for source in dataset_sources() {
        let path = data_dir.join(&source.relative_path);
        if !path.is_file() {
            tracing::debug!(dataset = %source.name, path = %path.display(), "dataset not present");
            continue;
        }
        let df = read_csv_table(&path)?;
        tracing::info!(dataset = %source.name, rows = df.height(), "loaded dataset");
        datasets.insert(source.name, df);
    }
    Ok(datasets)
}

/// Loads the curated fact table the drift monitor runs against.
pub fn load_fact_table(data_dir: &Path) -> Result<DataFrame> {
    let path = data_dir.join("curated").join(format!("{FACT_TABLE}.csv"));
    if !path.is_file() {
        return Err(IngestError::FileNotFound { path });
    }
    read_csv_table(&path)
}
