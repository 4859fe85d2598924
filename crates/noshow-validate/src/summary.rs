//! Aggregations over check results for reporting.

use chrono::{DateTime, NaiveDate, Utc};

use noshow_model::{CheckResult, DqIssue, DqSummary, OverallCounts, TableResult};

/// Group results by table with pass/fail counts.
pub fn summarize(results: &[CheckResult], generated_at: DateTime<Utc>) -> DqSummary {
    let mut summary = DqSummary {
        generated_at,
        tables: Default::default(),
        overall: OverallCounts::default(),
    };

    for result in results {
        let table = summary.tables.entry(result.table.clone()).or_default();
        if result.passed {
            table.passed += 1;
            summary.overall.passed += 1;
        } else {
            table.failed += 1;
            summary.overall.failed += 1;
        }
        table.results.push(TableResult::from(result));
    }

    summary
}

/// Raise one open issue per failed check, numbered `DQ-0001` onwards.
pub fn issue_register(results: &[CheckResult], date: NaiveDate) -> Vec<DqIssue> {
    results
        .iter()
        .filter(|result| !result.passed)
        .enumerate()
        .map(|(idx, result)| DqIssue {
            issue_id: format!("DQ-{:04}", idx + 1),
            date,
            table: result.table.clone(),
            expectation_id: result.expectation_id.clone(),
            severity: result.severity.clone(),
            description: format!(
                "Expectation failed: {} ({})",
                result.expectation_type, result.details
            ),
            status: "Open".to_string(),
            notes: "Fix upstream in ETL or adjust expectation if justified.".to_string(),
        })
        .collect()
}
