use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of evaluating one expectation against its dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub expectation_id: String,
    pub table: String,
    pub expectation_type: String,
    pub severity: String,
    pub passed: bool,
    /// Structured diagnostic, always a JSON object.
    pub details: Value,
}

/// A result entry as listed under its table in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableResult {
    pub expectation_id: String,
    pub expectation_type: String,
    pub severity: String,
    pub passed: bool,
    pub details: Value,
}

impl From<&CheckResult> for TableResult {
    fn from(result: &CheckResult) -> Self {
        Self {
            expectation_id: result.expectation_id.clone(),
            expectation_type: result.expectation_type.clone(),
            severity: result.severity.clone(),
            passed: result.passed,
            details: result.details.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<TableResult>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallCounts {
    pub passed: usize,
    pub failed: usize,
}

/// Per-table aggregation of a DQ run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqSummary {
    pub generated_at: DateTime<Utc>,
    pub tables: BTreeMap<String, TableSummary>,
    pub overall: OverallCounts,
}

impl DqSummary {
    pub fn has_failures(&self) -> bool {
        self.overall.failed > 0
    }
}

/// One row of the DQ issue register, raised for every failed check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqIssue {
    pub issue_id: String,
    pub date: NaiveDate,
    pub table: String,
    pub expectation_id: String,
    pub severity: String,
    pub description: String,
    pub status: String,
    pub notes: String,
}
