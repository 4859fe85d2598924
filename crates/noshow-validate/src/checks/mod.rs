//! Evaluation functions, one module per expectation family.
//!
//! Every function returns an [`Outcome`]; a missing column is reported in
//! the details rather than as an error.

mod columns;
mod membership;
mod nulls;
mod numeric;
mod uniqueness;

use polars::prelude::DataFrame;
use serde_json::{Value, json};

use crate::check::Check;

pub use columns::required_columns;
pub use membership::{MAX_INVALID_SAMPLES, in_set};
pub use nulls::non_null;
pub use numeric::{between, non_negative};
pub use uniqueness::unique;

/// Pass/fail plus the structured diagnostic for one check.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub passed: bool,
    pub details: Value,
}

impl Outcome {
    pub fn new(passed: bool, details: Value) -> Self {
        Self { passed, details }
    }

    /// Failed outcome carrying `{"error": <message>}`.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(false, json!({ "error": message.into() }))
    }

    pub(crate) fn missing_column() -> Self {
        Self::error("missing_column")
    }
}

/// Dispatch a parsed check to its evaluation function.
pub fn evaluate(check: &Check, df: &DataFrame) -> Outcome {
    match check {
        Check::RequiredColumns { columns } => required_columns(df, columns),
        Check::NonNull { column } => non_null(df, column),
        Check::NonNegative { column } => non_negative(df, column),
        Check::Between { column, min, max } => between(df, column, *min, *max),
        Check::Unique { columns } => unique(df, columns),
        Check::InSet {
            column,
            allowed_values,
        } => in_set(df, column, allowed_values),
    }
}

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}
