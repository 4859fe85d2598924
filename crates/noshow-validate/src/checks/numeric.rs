//! Numeric range checks.
//!
//! Cells are coerced to numbers first; anything that does not coerce is
//! not comparable and never counts as a violation.

use polars::prelude::DataFrame;
use serde_json::json;

use noshow_common::column_f64;

use super::Outcome;

/// Passes when no coercible value is below zero.
pub fn non_negative(df: &DataFrame, column: &str) -> Outcome {
    let Some(values) = column_f64(df, column) else {
        return Outcome::missing_column();
    };
    let negative_count = values.iter().flatten().filter(|v| **v < 0.0).count();
    Outcome::new(negative_count == 0, json!({ "negative_count": negative_count }))
}

/// Passes when no coercible value falls outside `[min, max]`.
pub fn between(df: &DataFrame, column: &str, min: f64, max: f64) -> Outcome {
    let Some(values) = column_f64(df, column) else {
        return Outcome::missing_column();
    };
    let out_of_range_count = values
        .iter()
        .flatten()
        .filter(|v| **v < min || **v > max)
        .count();
    Outcome::new(
        out_of_range_count == 0,
        json!({
            "out_of_range_count": out_of_range_count,
            "min": min,
            "max": max,
        }),
    )
}
