//! Missing-value checks.

use polars::prelude::{AnyValue, DataFrame};
use serde_json::json;

use noshow_common::is_missing;

use super::Outcome;

/// Passes when the column exists and has no missing cells.
///
/// An absent column fails with `null_count: null`.
pub fn non_null(df: &DataFrame, column: &str) -> Outcome {
    let Ok(series) = df.column(column) else {
        return Outcome::new(false, json!({ "null_count": null }));
    };

    let null_count = (0..df.height())
        .filter(|&idx| is_missing(&series.get(idx).unwrap_or(AnyValue::Null)))
        .count();

    Outcome::new(null_count == 0, json!({ "null_count": null_count }))
}
