//! Expectation document loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use noshow_model::Expectation;

use crate::error::{DqError, Result};

/// A file holds either one expectation or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExpectationFile {
    Many(Vec<Expectation>),
    One(Box<Expectation>),
}

/// Load every `EXP_*.json` file in `dir`, ordered by file name.
pub fn load_expectations(dir: &Path) -> Result<Vec<Expectation>> {
    if !dir.is_dir() {
        return Err(DqError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut expectations = Vec::new();
    for path in expectation_files(dir)? {
        expectations.extend(load_expectations_file(&path)?);
    }
    tracing::debug!(
        dir = %dir.display(),
        count = expectations.len(),
        "loaded expectations"
    );
    Ok(expectations)
}

/// Load the expectations stored in a single JSON file.
pub fn load_expectations_file(path: &Path) -> Result<Vec<Expectation>> {
    let content = std::fs::read_to_string(path).map_err(|source| DqError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ExpectationFile =
        serde_json::from_str(&content).map_err(|source| DqError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(match parsed {
        ExpectationFile::Many(list) => list,
        ExpectationFile::One(single) => vec![*single],
    })
}

fn expectation_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source| DqError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let matches = path.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("EXP_") && name.ends_with(".json"));
        if matches {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
