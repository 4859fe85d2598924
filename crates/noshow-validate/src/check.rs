//! Typed form of an expectation document.
//!
//! Expectation files carry a type tag plus free-form kwargs. Parsing turns
//! them into a closed [`Check`] enum; anything that does not parse is a
//! [`CheckSpecError`], which the engine reports as a failed check.

use serde_json::{Map, Value};
use thiserror::Error;

use noshow_model::Expectation;

/// Supported type tags, without the `expect_` prefix.
pub const KINDS: [&str; 6] = [
    "required_columns",
    "non_null",
    "non_negative",
    "between",
    "unique",
    "in_set",
];

/// A parsed data-quality rule, one variant per supported expectation type.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    RequiredColumns { columns: Vec<String> },
    NonNull { column: String },
    NonNegative { column: String },
    Between { column: String, min: f64, max: f64 },
    Unique { columns: Vec<String> },
    InSet { column: String, allowed_values: Vec<Value> },
}

/// Why an expectation document could not be turned into a [`Check`].
///
/// The display strings are the `error` values written into check details.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckSpecError {
    #[error("unknown_expectation_type: {0}")]
    UnknownType(String),
    #[error("invalid_kwargs: {0}")]
    InvalidKwargs(String),
}

impl Check {
    /// Parse an expectation document.
    ///
    /// Type tags are accepted with or without the `expect_` prefix.
    pub fn from_expectation(expectation: &Expectation) -> Result<Self, CheckSpecError> {
        let raw_type = expectation.expectation_type.as_str();
        let tag = raw_type.strip_prefix("expect_").unwrap_or(raw_type);
        let kwargs = expectation.kwargs.as_object().ok_or_else(|| {
            if KINDS.contains(&tag) {
                CheckSpecError::InvalidKwargs("kwargs must be an object".to_string())
            } else {
                CheckSpecError::UnknownType(raw_type.to_string())
            }
        })?;

        match tag {
            "required_columns" => Ok(Self::RequiredColumns {
                columns: string_list_arg(kwargs, "columns")?,
            }),
            "non_null" => Ok(Self::NonNull {
                column: string_arg(kwargs, "column")?,
            }),
            "non_negative" => Ok(Self::NonNegative {
                column: string_arg(kwargs, "column")?,
            }),
            "between" => Ok(Self::Between {
                column: string_arg(kwargs, "column")?,
                min: number_arg(kwargs, "min")?,
                max: number_arg(kwargs, "max")?,
            }),
            "unique" => Ok(Self::Unique {
                columns: string_list_arg(kwargs, "columns")?,
            }),
            "in_set" => Ok(Self::InSet {
                column: string_arg(kwargs, "column")?,
                allowed_values: list_arg(kwargs, "allowed_values")?.to_vec(),
            }),
            _ => Err(CheckSpecError::UnknownType(raw_type.to_string())),
        }
    }

    /// Canonical type tag without the `expect_` prefix.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RequiredColumns { .. } => "required_columns",
            Self::NonNull { .. } => "non_null",
            Self::NonNegative { .. } => "non_negative",
            Self::Between { .. } => "between",
            Self::Unique { .. } => "unique",
            Self::InSet { .. } => "in_set",
        }
    }
}

fn arg<'a>(kwargs: &'a Map<String, Value>, key: &str) -> Result<&'a Value, CheckSpecError> {
    kwargs
        .get(key)
        .ok_or_else(|| CheckSpecError::InvalidKwargs(format!("missing '{key}'")))
}

fn string_arg(kwargs: &Map<String, Value>, key: &str) -> Result<String, CheckSpecError> {
    arg(kwargs, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CheckSpecError::InvalidKwargs(format!("'{key}' must be a string")))
}

fn number_arg(kwargs: &Map<String, Value>, key: &str) -> Result<f64, CheckSpecError> {
    arg(kwargs, key)?
        .as_f64()
        .ok_or_else(|| CheckSpecError::InvalidKwargs(format!("'{key}' must be a number")))
}

fn list_arg<'a>(kwargs: &'a Map<String, Value>, key: &str) -> Result<&'a [Value], CheckSpecError> {
    arg(kwargs, key)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| CheckSpecError::InvalidKwargs(format!("'{key}' must be a list")))
}

fn string_list_arg(kwargs: &Map<String, Value>, key: &str) -> Result<Vec<String>, CheckSpecError> {
    list_arg(kwargs, key)?
        .iter()
        .map(|value| {
            value.as_str().map(str::to_string).ok_or_else(|| {
                CheckSpecError::InvalidKwargs(format!("'{key}' must be a list of strings"))
            })
        })
        .collect()
}
