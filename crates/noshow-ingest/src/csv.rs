//! CSV file reading into Polars DataFrames.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        match buffer {
            [0xFF, 0xFE] => {
                return Err(IngestError::UnsupportedEncoding {
                    path: path.to_path_buf(),
                    encoding: "UTF-16 LE",
                });
            }
            [0xFE, 0xFF] => {
                return Err(IngestError::UnsupportedEncoding {
                    path: path.to_path_buf(),
                    encoding: "UTF-16 BE",
                });
            }
            _ => {}
        }
    }

    Ok(())
}

/// Reads a single-header CSV file into a Polars DataFrame.
///
/// The whole file is scanned for schema inference so that a late
/// non-numeric value turns its column into strings instead of failing the
/// parse. Empty fields load as nulls; a header-only file yields zero rows.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.get_column_names().iter().any(|name| name.trim().is_empty()) {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded CSV table"
    );

    Ok(df)
}
