//! Shared utilities for the no-show pipeline crates.
//!
//! This crate provides the cell-level coercions every engine relies on:
//! display strings, safe numeric parsing, missing-value detection and
//! calendar-date extraction from Polars `AnyValue`s.

pub mod values;

// Re-export commonly used functions at crate root for convenience
pub use values::{
    any_to_date, any_to_f64, any_to_string, column_dates, column_f64, column_strings,
    format_numeric, is_missing, parse_date, parse_f64,
};
