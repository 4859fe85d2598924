//! Report writers for data-quality and monitoring runs.
//!
//! Thin serializers over the model types: JSON summaries, CSV registers
//! and a self-contained HTML page. Parent directories are created on
//! demand.

mod error;
mod html;
mod json;
mod tables;

pub use error::{ReportError, Result};
pub use html::{escape_html, render_dq_html, write_dq_html};
pub use json::{write_drift_json, write_dq_summary_json};
pub use tables::{
    ALERT_COLUMNS, DRIFT_COLUMNS, ISSUE_REGISTER_COLUMNS, LATENCY_COLUMNS, SNAPSHOT_COLUMNS,
    read_latency_csv, write_alerts_csv, write_drift_csv, write_issue_register_csv,
    write_latency_csv, write_snapshot_csv,
};

/// File names written by the DQ runner.
pub mod dq_files {
    pub const SUMMARY_JSON: &str = "dq_summary.json";
    pub const REPORT_HTML: &str = "dq_report.html";
    pub const ISSUE_REGISTER_CSV: &str = "V2_DQ_ISSUE_REGISTER.csv";
}

/// File names written by the monitoring runner.
pub mod monitor_files {
    pub const DRIFT_CSV: &str = "drift_report.csv";
    pub const DRIFT_JSON: &str = "drift_report.json";
    pub const LATENCY_CSV: &str = "api_latency_daily.csv";
    pub const SNAPSHOT_CSV: &str = "monitoring_snapshot.csv";
    pub const ALERTS_CSV: &str = "alerts_register.csv";
}
