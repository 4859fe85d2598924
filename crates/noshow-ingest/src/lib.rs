//! Pipeline dataset ingestion.
//!
//! This crate loads the ETL collaborator's CSV outputs into Polars
//! DataFrames keyed by logical dataset name.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use noshow_ingest::{load_datasets, load_fact_table};
//!
//! let datasets = load_datasets(Path::new("data"))?;
//! let fact = load_fact_table(Path::new("data"))?;
//! ```

mod csv;
mod discovery;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{read_csv_table, validate_encoding};

// === Dataset Discovery ===
pub use discovery::{
    CURATED_TABLES, DatasetSource, Datasets, FACT_TABLE, dataset_sources, load_datasets,
    load_fact_table,
};
