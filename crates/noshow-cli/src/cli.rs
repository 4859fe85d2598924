//! CLI argument definitions for the no-show pipeline runner.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "noshow",
    version,
    about = "No-show pipeline quality gate - data-quality checks and model monitoring",
    long_about = "Run declarative data-quality expectations over the ETL outputs and\n\
                  monitor the scored fact table for feature drift, data freshness and\n\
                  prediction API health."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run data-quality expectations and write the DQ reports.
    Dq(DqArgs),

    /// Compute drift, freshness and API alerts for the fact table.
    Monitor(MonitorArgs),

    /// Run the DQ gate, then monitoring.
    Run(RunArgs),
}

#[derive(Args)]
pub struct DqArgs {
    /// Pipeline data folder containing raw/, staged/ and curated/.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Folder holding EXP_*.json expectation files.
    #[arg(long = "expectations", value_name = "DIR")]
    pub expectations: PathBuf,

    /// Output directory for reports (default: reports/ next to DATA_DIR).
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Output directory for the issue register (default: logs/ next to DATA_DIR).
    #[arg(long = "logs-dir", value_name = "DIR")]
    pub logs_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct MonitorArgs {
    /// Pipeline data folder containing curated/fact_appointments.csv.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Monitoring configuration (TOML). Built-in defaults when omitted.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Daily API latency CSV. Simulated from the config seed when omitted.
    #[arg(long = "latency", value_name = "CSV")]
    pub latency: Option<PathBuf>,

    /// Output directory for reports (default: reports/ next to DATA_DIR).
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub dq: DqArgs,

    /// Monitoring configuration (TOML).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Daily API latency CSV.
    #[arg(long = "latency", value_name = "CSV")]
    pub latency: Option<PathBuf>,

    /// Run monitoring even when data-quality checks fail.
    #[arg(long = "no-gate")]
    pub no_gate: bool,
}

impl RunArgs {
    pub fn monitor_args(&self) -> MonitorArgs {
        MonitorArgs {
            data_dir: self.dq.data_dir.clone(),
            config: self.config.clone(),
            latency: self.latency.clone(),
            reports_dir: self.dq.reports_dir.clone(),
        }
    }
}

/// `<DATA_DIR>/../<name>`, matching the pipeline's folder layout.
pub fn sibling_dir(data_dir: &Path, name: &str) -> PathBuf {
    match data_dir.parent() {
        Some(parent) => parent.join(name),
        None => data_dir.join(name),
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
