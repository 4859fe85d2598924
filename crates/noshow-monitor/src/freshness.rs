//! Data freshness against the expected latest date.

use chrono::NaiveDate;
use polars::prelude::DataFrame;

use noshow_common::column_dates;
use noshow_model::{FreshnessSnapshot, FreshnessStatus};

use crate::config::FreshnessConfig;
use crate::error::{MonitorError, Result};

/// Latest parseable date in `date_column`, if any.
pub fn observed_latest_date(fact: &DataFrame, date_column: &str) -> Option<NaiveDate> {
    column_dates(fact, date_column)?.into_iter().flatten().max()
}

/// Compare the expected latest date with an observed one.
pub fn evaluate_freshness(
    expected_latest_date: NaiveDate,
    observed_latest_date: NaiveDate,
    sla_days: i64,
) -> FreshnessSnapshot {
    let lag_days = (expected_latest_date - observed_latest_date).num_days();
    FreshnessSnapshot {
        expected_latest_date,
        observed_latest_date,
        lag_days,
        sla_days,
        freshness_status: FreshnessStatus::from_lag(lag_days, sla_days),
    }
}

/// Freshness of the fact table.
///
/// # Errors
///
/// [`MonitorError::EmptyFactTable`] for a table without rows and
/// [`MonitorError::NoObservedDates`] when no row has a parseable date.
pub fn freshness_snapshot(
    fact: &DataFrame,
    date_column: &str,
    config: &FreshnessConfig,
) -> Result<FreshnessSnapshot> {
    if fact.height() == 0 {
        return Err(MonitorError::EmptyFactTable);
    }
    let observed =
        observed_latest_date(fact, date_column).ok_or_else(|| MonitorError::NoObservedDates {
            column: date_column.to_string(),
        })?;
    let snapshot = evaluate_freshness(config.expected_latest_date, observed, config.sla_days);
    if snapshot.freshness_status == FreshnessStatus::Alert {
        tracing::warn!(
            lag_days = snapshot.lag_days,
            sla_days = snapshot.sla_days,
            "freshness SLA breached"
        );
    }
    Ok(snapshot)
}
