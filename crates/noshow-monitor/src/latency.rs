//! Daily API latency samples.
//!
//! Serving metrics come from outside the pipeline. When none are supplied
//! a seeded simulator produces a reproducible series with weekday load and
//! occasional incident spikes.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use noshow_model::LatencySample;

use crate::config::LatencyConfig;

const BASE_P50_MS: f64 = 120.0;
const BUSY_DAY_UPLIFT: f64 = 0.08;
const SPIKE_PROBABILITY: f64 = 0.08;

/// Simulate `config.days` daily samples ending on `end` (inclusive).
pub fn simulate_latency(config: &LatencyConfig, end: NaiveDate) -> Vec<LatencySample> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let Some(start) = end.checked_sub_days(Days::new(u64::from(config.days.saturating_sub(1))))
    else {
        return Vec::new();
    };

    start
        .iter_days()
        .take(config.days as usize)
        .map(|date| {
            let spike = if rng.r#gen::<f64>() < SPIKE_PROBABILITY {
                rng.gen_range(1.5..3.2)
            } else {
                1.0
            };
            let uplift = if matches!(date.weekday(), Weekday::Mon | Weekday::Tue) {
                1.0 + BUSY_DAY_UPLIFT
            } else {
                1.0
            };

            let p50 = BASE_P50_MS * uplift * spike;
            let p95 = p50 * rng.gen_range(2.1..2.7);
            let p99 = p95 * rng.gen_range(1.15..1.35);
            let error_rate = rng.gen_range(0.002..0.018) * spike;

            LatencySample {
                date,
                p50_ms: round_to(p50, 1),
                p95_ms: round_to(p95, 1),
                p99_ms: round_to(p99, 1),
                error_rate: round_to(error_rate, 4),
            }
        })
        .collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
