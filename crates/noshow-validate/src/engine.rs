//! Expectation engine: runs a batch of expectations over named datasets.
//!
//! A malformed expectation, an unknown type or an unknown table produce a
//! failed [`CheckResult`] and the batch carries on. Only a completely empty
//! dataset map aborts the run.

use polars::prelude::DataFrame;
use serde_json::json;
use tracing::{debug, info, warn};

use noshow_ingest::Datasets;
use noshow_model::{CheckResult, Expectation};

use crate::check::Check;
use crate::checks::{Outcome, evaluate};
use crate::error::{DqError, Result};

/// Evaluate `expectations` against `datasets`, one result per expectation.
///
/// # Errors
///
/// Returns [`DqError::NoDatasets`] when `datasets` is empty.
pub fn run_checks(datasets: &Datasets, expectations: &[Expectation]) -> Result<Vec<CheckResult>> {
    if datasets.is_empty() {
        return Err(DqError::NoDatasets);
    }

    let results: Vec<CheckResult> = expectations
        .iter()
        .map(|expectation| {
            let outcome = match datasets.get(&expectation.table) {
                Some(df) => evaluate_expectation(df, expectation),
                None => {
                    warn!(
                        expectation_id = %expectation.expectation_id,
                        table = %expectation.table,
                        "expectation targets an unknown table"
                    );
                    Outcome::error("unknown_table")
                }
            };
            into_result(expectation, outcome)
        })
        .collect();

    let failed = results.iter().filter(|r| !r.passed).count();
    info!(
        checks = results.len(),
        passed = results.len() - failed,
        failed,
        "data-quality checks complete"
    );
    Ok(results)
}

/// Evaluate a single expectation against one dataset.
///
/// Unknown types and malformed kwargs yield a failed outcome with an
/// `error` detail; this function never panics on bad input.
pub fn evaluate_expectation(df: &DataFrame, expectation: &Expectation) -> Outcome {
    match Check::from_expectation(expectation) {
        Ok(check) => {
            let outcome = evaluate(&check, df);
            debug!(
                expectation_id = %expectation.expectation_id,
                check = check.kind(),
                passed = outcome.passed,
                "evaluated expectation"
            );
            outcome
        }
        Err(error) => {
            warn!(
                expectation_id = %expectation.expectation_id,
                %error,
                "expectation could not be evaluated"
            );
            Outcome::new(false, json!({ "error": error.to_string() }))
        }
    }
}

fn into_result(expectation: &Expectation, outcome: Outcome) -> CheckResult {
    CheckResult {
        expectation_id: expectation.expectation_id.clone(),
        table: expectation.table.clone(),
        expectation_type: expectation.expectation_type.clone(),
        severity: expectation.severity.clone(),
        passed: outcome.passed,
        details: outcome.details,
    }
}
