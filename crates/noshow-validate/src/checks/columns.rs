//! Column presence checks.

use polars::prelude::DataFrame;
use serde_json::json;

use super::{Outcome, has_column};

/// Passes when every listed column exists. Missing names keep list order.
pub fn required_columns(df: &DataFrame, columns: &[String]) -> Outcome {
    let missing: Vec<&str> = columns
        .iter()
        .map(String::as_str)
        .filter(|column| !has_column(df, column))
        .collect();
    Outcome::new(missing.is_empty(), json!({ "missing_columns": missing }))
}
