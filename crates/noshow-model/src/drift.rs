use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::status::DriftStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureType {
    Numeric,
    Categorical,
}

impl FeatureType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
        }
    }
}

/// An inclusive date range, rendered as `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

impl FromStr for DateWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once("..")
            .ok_or_else(|| format!("expected 'YYYY-MM-DD..YYYY-MM-DD', got '{s}'"))?;
        let parse = |part: &str| {
            NaiveDate::parse_from_str(part.trim(), "%Y-%m-%d")
                .map_err(|e| format!("invalid date '{}': {e}", part.trim()))
        };
        Ok(Self::new(parse(start)?, parse(end)?))
    }
}

impl Serialize for DateWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateWindow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// PSI outcome for one monitored feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDrift {
    pub feature: String,
    pub feature_type: FeatureType,
    /// NaN when the sample floor was not met; written as null/empty.
    #[serde(with = "nan_as_null")]
    pub psi: f64,
    pub status: DriftStatus,
    pub reference_window: DateWindow,
    pub current_window: DateWindow,
}

mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_parses_and_displays() {
        let window: DateWindow = "2026-02-01..2026-02-08".parse().unwrap();
        assert_eq!(window.start, date(2026, 2, 1));
        assert_eq!(window.end, date(2026, 2, 8));
        assert_eq!(window.to_string(), "2026-02-01..2026-02-08");
        assert!("2026-02-01".parse::<DateWindow>().is_err());
        assert!("2026-02-01..soon".parse::<DateWindow>().is_err());
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = DateWindow::new(date(2025, 12, 1), date(2025, 12, 31));
        assert!(window.contains(date(2025, 12, 1)));
        assert!(window.contains(date(2025, 12, 31)));
        assert!(!window.contains(date(2026, 1, 1)));
    }

    #[test]
    fn overlapping_windows_are_detected() {
        let reference = DateWindow::new(date(2025, 12, 1), date(2025, 12, 31));
        let current = DateWindow::new(date(2026, 2, 1), date(2026, 2, 8));
        let touching = DateWindow::new(date(2025, 12, 31), date(2026, 1, 5));
        assert!(!reference.overlaps(&current));
        assert!(reference.overlaps(&touching));
    }
}
