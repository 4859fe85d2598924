//! Allowed-value membership checks.

use std::collections::HashSet;

use polars::prelude::{AnyValue, DataFrame};
use serde_json::{Value, json};

use noshow_common::{any_to_string, format_numeric, is_missing};

use super::Outcome;

/// Upper bound on invalid values echoed back for diagnosis.
pub const MAX_INVALID_SAMPLES: usize = 5;

/// Passes when every cell is one of `allowed_values`.
///
/// Cells and allowed values are compared by their display form, so `3`
/// in the data matches `3` or `3.0` in the rule. Missing cells (null, NaN
/// or blank) are invalid unless the rule lists `null`.
pub fn in_set(df: &DataFrame, column: &str, allowed_values: &[Value]) -> Outcome {
    let Ok(series) = df.column(column) else {
        return Outcome::missing_column();
    };

    let allow_null = allowed_values.iter().any(Value::is_null);
    let allowed: HashSet<String> = allowed_values.iter().filter_map(render_allowed).collect();

    let mut invalid_count = 0usize;
    let mut samples = Vec::new();
    for idx in 0..df.height() {
        let value = series.get(idx).unwrap_or(AnyValue::Null);
        let rendered = if is_missing(&value) {
            if allow_null {
                continue;
            }
            "NA".to_string()
        } else {
            let rendered = any_to_string(value);
            if allowed.contains(&rendered) {
                continue;
            }
            rendered
        };
        invalid_count += 1;
        if samples.len() < MAX_INVALID_SAMPLES {
            samples.push(rendered);
        }
    }

    Outcome::new(
        invalid_count == 0,
        json!({
            "invalid_count": invalid_count,
            "sample_invalid_values": samples,
        }),
    )
}

fn render_allowed(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "Y" } else { "N" }.to_string()),
        Value::Number(n) => Some(match (n.as_i64(), n.as_u64()) {
            (Some(v), _) => v.to_string(),
            (None, Some(v)) => v.to_string(),
            (None, None) => n.as_f64().map(format_numeric).unwrap_or_else(|| n.to_string()),
        }),
        other => Some(other.to_string()),
    }
}
