//! Row uniqueness over a column combination.

use std::collections::HashSet;

use polars::prelude::DataFrame;
use serde_json::json;

use noshow_common::column_strings;

use super::Outcome;

/// Passes when no row repeats an earlier row on the listed columns.
///
/// Every repeat after the first occurrence counts once; missing cells
/// compare equal to each other.
pub fn unique(df: &DataFrame, columns: &[String]) -> Outcome {
    let mut extracted = Vec::with_capacity(columns.len());
    for column in columns {
        let Some(values) = column_strings(df, column) else {
            return Outcome::missing_column();
        };
        extracted.push(values);
    }

    let mut seen: HashSet<Vec<Option<&str>>> = HashSet::with_capacity(df.height());
    let mut duplicate_rows = 0usize;
    for idx in 0..df.height() {
        let key: Vec<Option<&str>> = extracted
            .iter()
            .map(|values| values.get(idx).and_then(|v| v.as_deref()))
            .collect();
        if !seen.insert(key) {
            duplicate_rows += 1;
        }
    }

    Outcome::new(duplicate_rows == 0, json!({ "duplicate_rows": duplicate_rows }))
}
