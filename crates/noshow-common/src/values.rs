//! Polars AnyValue utility functions.
//!
//! This module provides helper functions for working with Polars `AnyValue` types,
//! including string conversions, numeric and date parsing, and column extraction
//! that never fails on malformed cells.

use chrono::{DateTime, NaiveDate, TimeDelta};
use polars::prelude::{AnyValue, DataFrame, TimeUnit};

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`, properly formats numeric types without
/// unnecessary trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use noshow_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("hello")), "hello");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => if b { "Y" } else { "N" }.to_string(),
        AnyValue::Date(_) | AnyValue::Datetime(..) => any_to_date(value)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use noshow_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(10.0), "10");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric, non-finite or null values.
///
/// Handles integer types, floating-point types, and string parsing.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    let parsed = match value {
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Returns true for null cells, NaN floats and blank strings.
pub fn is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        AnyValue::String(s) => s.trim().is_empty(),
        AnyValue::StringOwned(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Converts a date-like `AnyValue` to a calendar date.
///
/// Accepts Polars `Date` and `Datetime` cells as well as ISO 8601 strings
/// (`YYYY-MM-DD`, optionally followed by a time part).
pub fn any_to_date(value: AnyValue<'_>) -> Option<NaiveDate> {
    match value {
        AnyValue::Date(days) => NaiveDate::from_ymd_opt(1970, 1, 1)?
            .checked_add_signed(TimeDelta::days(i64::from(days))),
        AnyValue::Datetime(v, unit, _) => {
            let millis = match unit {
                TimeUnit::Nanoseconds => v.div_euclid(1_000_000),
                TimeUnit::Microseconds => v.div_euclid(1_000),
                TimeUnit::Milliseconds => v,
            };
            DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
        }
        AnyValue::String(s) => parse_date(s),
        AnyValue::StringOwned(s) => parse_date(&s),
        _ => None,
    }
}

/// Parses the leading `YYYY-MM-DD` of an ISO 8601 string.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date_part = match trimmed.get(10..11) {
        Some("T" | " ") => trimmed.get(..10)?,
        Some(_) => return None,
        None => trimmed,
    };
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Extracts a column as optional numbers; `None` when the column is absent.
///
/// Cells that cannot be coerced become `None` rather than an error.
pub fn column_f64(df: &DataFrame, name: &str) -> Option<Vec<Option<f64>>> {
    let column = df.column(name).ok()?;
    Some(
        (0..df.height())
            .map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect(),
    )
}

/// Extracts a column as display strings, with missing cells as `None`.
pub fn column_strings(df: &DataFrame, name: &str) -> Option<Vec<Option<String>>> {
    let column = df.column(name).ok()?;
    Some(
        (0..df.height())
            .map(|idx| {
                let value = column.get(idx).unwrap_or(AnyValue::Null);
                if is_missing(&value) {
                    None
                } else {
                    Some(any_to_string(value))
                }
            })
            .collect(),
    )
}

/// Extracts a column as calendar dates; unparsable cells become `None`.
pub fn column_dates(df: &DataFrame, name: &str) -> Option<Vec<Option<NaiveDate>>> {
    let column = df.column(name).ok()?;
    Some(
        (0..df.height())
            .map(|idx| any_to_date(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect(),
    )
}
