//! Population Stability Index.
//!
//! Both variants compare two probability distributions over the same
//! buckets: `PSI = Σ (cur − ref) · ln(cur / ref)`. Empty buckets are
//! floored at [`EPSILON`] so the logarithm stays finite.

use std::collections::BTreeMap;

/// Floor applied to zero-probability buckets.
pub const EPSILON: f64 = 1e-6;

/// Minimum number of valid numeric values required on each side.
pub const MIN_SAMPLES: usize = 100;

/// Numeric PSI over `bins` reference quantile buckets.
///
/// Non-finite values are ignored. Returns NaN when either side has fewer
/// than [`MIN_SAMPLES`] values and `0.0` when the reference is too
/// concentrated to form two buckets.
pub fn psi_numeric(reference: &[f64], current: &[f64], bins: usize) -> f64 {
    let reference = finite(reference);
    let current = finite(current);
    if reference.len() < MIN_SAMPLES || current.len() < MIN_SAMPLES {
        return f64::NAN;
    }

    let edges = quantile_edges(&reference, bins);
    if edges.len() < 3 {
        return 0.0;
    }

    let reference_dist = densities(&histogram(&reference, &edges));
    let current_dist = densities(&histogram(&current, &edges));
    reference_dist
        .iter()
        .zip(&current_dist)
        .map(|(&r, &c)| term(r, c))
        .sum()
}

/// Categorical PSI over the union of observed categories.
pub fn psi_categorical<S: AsRef<str>>(reference: &[S], current: &[S]) -> f64 {
    let reference_freq = frequencies(reference);
    let current_freq = frequencies(current);

    let mut categories: Vec<&str> = reference_freq
        .keys()
        .chain(current_freq.keys())
        .copied()
        .collect();
    categories.sort_unstable();
    categories.dedup();

    categories
        .into_iter()
        .map(|category| {
            let r = reference_freq.get(category).copied().unwrap_or(EPSILON);
            let c = current_freq.get(category).copied().unwrap_or(EPSILON);
            term(r.max(EPSILON), c.max(EPSILON))
        })
        .sum()
}

/// Linear-interpolated quantile of sorted data, `q` in `[0, 1]`.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let position = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = position.floor() as usize;
            let upper = position.ceil() as usize;
            let fraction = position - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
        }
    }
}

/// Distinct, ascending quantile edges at `0, 1/bins, ..., 1`.
pub fn quantile_edges(values: &[f64], bins: usize) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut edges: Vec<f64> = (0..=bins)
        .map(|i| quantile(&sorted, i as f64 / bins as f64))
        .collect();
    edges.dedup();
    edges
}

/// Bucket counts on `edges`.
///
/// Buckets are half-open except the last, which includes its upper edge.
/// Values outside `[first, last]` are not counted.
pub fn histogram(values: &[f64], edges: &[f64]) -> Vec<usize> {
    let Some(buckets) = edges.len().checked_sub(1).filter(|n| *n > 0) else {
        return Vec::new();
    };
    let (first, last) = (edges[0], edges[buckets]);

    let mut counts = vec![0; buckets];
    for &value in values {
        let in_range = value >= first && value <= last;
        if !in_range {
            continue;
        }
        let idx = if value >= last {
            buckets - 1
        } else {
            let Some(idx) = edges.partition_point(|edge| *edge <= value).checked_sub(1) else {
                continue;
            };
            idx
        };
        counts[idx] += 1;
    }
    counts
}

fn finite(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

fn densities(counts: &[usize]) -> Vec<f64> {
    let total = counts.iter().sum::<usize>().max(1) as f64;
    counts
        .iter()
        .map(|&count| {
            let density = count as f64 / total;
            if density == 0.0 { EPSILON } else { density }
        })
        .collect()
}

fn frequencies<S: AsRef<str>>(values: &[S]) -> BTreeMap<&str, f64> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value.as_ref()).or_default() += 1;
    }
    let total = values.len() as f64;
    counts
        .into_iter()
        .map(|(category, count)| (category, count as f64 / total))
        .collect()
}

fn term(reference: f64, current: f64) -> f64 {
    (current - reference) * (current / reference).ln()
}
