use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Severity applied when an expectation document omits one.
pub const DEFAULT_SEVERITY: &str = "medium";

/// A single declarative data-quality rule as stored on disk.
///
/// The document is kept loosely typed so that a malformed rule can still be
/// reported as a failed check instead of aborting the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    pub expectation_id: String,
    /// Logical name of the dataset the rule targets.
    #[serde(default = "default_table")]
    pub table: String,
    /// Absent tags read as empty and fail as an unknown type.
    #[serde(default)]
    pub expectation_type: String,
    /// Free-text tier, passed through to results untouched. Non-string
    /// values are kept in their JSON text form.
    #[serde(default = "default_severity", deserialize_with = "severity_text")]
    pub severity: String,
    /// Type-specific parameters (column names, bounds, allowed values).
    /// Expected to be an object; anything else fails when the rule is parsed.
    #[serde(default = "empty_kwargs")]
    pub kwargs: Value,
}

impl Expectation {
    pub fn new(
        expectation_id: impl Into<String>,
        table: impl Into<String>,
        expectation_type: impl Into<String>,
        kwargs: Value,
    ) -> Self {
        Self {
            expectation_id: expectation_id.into(),
            table: table.into(),
            expectation_type: expectation_type.into(),
            severity: default_severity(),
            kwargs,
        }
    }

    #[must_use]
    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = severity.into();
        self
    }
}

fn default_table() -> String {
    "unknown_table".to_string()
}

fn default_severity() -> String {
    DEFAULT_SEVERITY.to_string()
}

fn empty_kwargs() -> Value {
    Value::Object(Map::new())
}

fn severity_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => default_severity(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_fill_missing_fields() {
        let exp: Expectation = serde_json::from_value(json!({
            "expectation_id": "EXP_010",
            "expectation_type": "expect_unique"
        }))
        .unwrap();
        assert_eq!(exp.table, "unknown_table");
        assert_eq!(exp.severity, "medium");
        assert_eq!(exp.kwargs, json!({}));
    }

    #[test]
    fn loose_documents_still_deserialize() {
        let exp: Expectation = serde_json::from_value(json!({
            "expectation_id": "EXP_011",
            "table": "dim_clinic",
            "severity": 3,
            "kwargs": ["a"]
        }))
        .unwrap();
        assert_eq!(exp.severity, "3");
        assert_eq!(exp.expectation_type, "");
        assert_eq!(exp.kwargs, json!(["a"]));

        let null_severity: Expectation = serde_json::from_value(json!({
            "expectation_id": "EXP_012",
            "expectation_type": "unique",
            "severity": null
        }))
        .unwrap();
        assert_eq!(null_severity.severity, "medium");
    }

    #[test]
    fn builder_keeps_object_kwargs() {
        let exp = Expectation::new("E1", "dim_patient", "non_null", json!({"column": "age"}))
            .with_severity("high");
        assert_eq!(exp.kwargs.get("column"), Some(&json!("age")));
        assert_eq!(exp.severity, "high");
    }
}
