pub mod check;
pub mod drift;
pub mod expectation;
pub mod monitoring;
pub mod status;

pub use check::{CheckResult, DqIssue, DqSummary, OverallCounts, TableResult, TableSummary};
pub use drift::{DateWindow, FeatureDrift, FeatureType};
pub use expectation::{DEFAULT_SEVERITY, Expectation};
pub use monitoring::{
    Alert, AlertSeverity, AlertType, FreshnessSnapshot, LatencySample, MonitoringSnapshot,
};
pub use status::{DriftStatus, FreshnessStatus, Thresholds};
