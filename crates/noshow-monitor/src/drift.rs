//! Per-feature drift report between the reference and current windows.

use std::cmp::Ordering;

use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use noshow_common::{column_dates, column_f64, column_strings};
use noshow_model::{DriftStatus, FeatureDrift, FeatureType, Thresholds};

use crate::config::DriftConfig;
use crate::error::{MonitorError, Result};
use crate::psi::{psi_categorical, psi_numeric};

/// Label used for missing categorical cells.
pub const MISSING_CATEGORY: &str = "NA";

/// Row indices of the reference and current slices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowSlices {
    pub reference: Vec<usize>,
    pub current: Vec<usize>,
}

impl WindowSlices {
    /// Split rows by their date. Rows without a parseable date, or with no
    /// date column at all, belong to neither slice.
    pub fn from_frame(fact: &DataFrame, config: &DriftConfig) -> Self {
        let mut slices = Self::default();
        let Some(dates) = column_dates(fact, &config.date_column) else {
            warn!(column = %config.date_column, "date column missing from fact table");
            return slices;
        };
        for (idx, date) in dates.into_iter().enumerate() {
            let Some(date) = date else { continue };
            if config.reference_window.contains(date) {
                slices.reference.push(idx);
            }
            if config.current_window.contains(date) {
                slices.current.push(idx);
            }
        }
        slices
    }
}

/// Compute PSI and status for every monitored feature, sorted by severity.
///
/// # Errors
///
/// Returns [`MonitorError::EmptyFactTable`] when `fact` has no rows.
pub fn build_drift_report(fact: &DataFrame, config: &DriftConfig) -> Result<Vec<FeatureDrift>> {
    if fact.height() == 0 {
        return Err(MonitorError::EmptyFactTable);
    }
    let slices = WindowSlices::from_frame(fact, config);
    debug!(
        reference_rows = slices.reference.len(),
        current_rows = slices.current.len(),
        "sliced fact table"
    );

    let numeric = config
        .numeric_features
        .iter()
        .map(|feature| (feature, FeatureType::Numeric));
    let categorical = config
        .categorical_features
        .iter()
        .map(|feature| (feature, FeatureType::Categorical));

    let mut report: Vec<FeatureDrift> = numeric
        .chain(categorical)
        .map(|(feature, feature_type)| {
            let (psi, status) = scored(
                feature_psi(fact, feature, feature_type, &slices, config.bins),
                config.thresholds(),
            );
            if status == DriftStatus::Na {
                warn!(feature = %feature, "not enough data to compute PSI");
            } else {
                debug!(feature = %feature, psi, %status, "computed PSI");
            }
            FeatureDrift {
                feature: feature.clone(),
                feature_type,
                psi,
                status,
                reference_window: config.reference_window,
                current_window: config.current_window,
            }
        })
        .collect();

    sort_by_severity(&mut report);

    info!(
        features = report.len(),
        alerts = count_status(&report, DriftStatus::Alert),
        warnings = count_status(&report, DriftStatus::Warn),
        "drift report built"
    );
    Ok(report)
}

/// Order records by status severity, then PSI descending with NaN last.
///
/// The sort is stable, so ties keep their input order.
pub fn sort_by_severity(report: &mut [FeatureDrift]) {
    report.sort_by(|a, b| {
        b.status
            .severity_rank()
            .cmp(&a.status.severity_rank())
            .then_with(|| psi_descending(a.psi, b.psi))
    });
}

pub fn count_status(report: &[FeatureDrift], status: DriftStatus) -> usize {
    report.iter().filter(|record| record.status == status).count()
}

fn feature_psi(
    fact: &DataFrame,
    feature: &str,
    feature_type: FeatureType,
    slices: &WindowSlices,
    bins: usize,
) -> f64 {
    match feature_type {
        FeatureType::Numeric => {
            let Some(values) = column_f64(fact, feature) else {
                return f64::NAN;
            };
            psi_numeric(
                &pick_numbers(&values, &slices.reference),
                &pick_numbers(&values, &slices.current),
                bins,
            )
        }
        FeatureType::Categorical => {
            let Some(values) = column_strings(fact, feature) else {
                return f64::NAN;
            };
            psi_categorical(
                &pick_categories(&values, &slices.reference),
                &pick_categories(&values, &slices.current),
            )
        }
    }
}

fn pick_numbers(values: &[Option<f64>], rows: &[usize]) -> Vec<f64> {
    rows.iter().filter_map(|&idx| values[idx]).collect()
}

fn pick_categories<'a>(values: &'a [Option<String>], rows: &[usize]) -> Vec<&'a str> {
    rows.iter()
        .map(|&idx| values[idx].as_deref().unwrap_or(MISSING_CATEGORY))
        .collect()
}

/// Status from the raw PSI; only the reported value is rounded.
fn scored(psi: f64, thresholds: Thresholds) -> (f64, DriftStatus) {
    (round_psi(psi), DriftStatus::classify(psi, thresholds))
}

fn round_psi(psi: f64) -> f64 {
    (psi * 1e6).round() / 1e6
}

fn psi_descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}
