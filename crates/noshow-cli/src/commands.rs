use chrono::Utc;

use noshow_cli::pipeline::{DqOutcome, DqPaths, MonitorOutcome, MonitorPaths, run_dq, run_monitor};

use crate::cli::{DqArgs, MonitorArgs, RunArgs, sibling_dir};

/// Combined outcome of `noshow run`.
pub struct RunOutcome {
    pub dq: DqOutcome,
    /// `None` when the DQ gate stopped the run.
    pub monitor: Option<MonitorOutcome>,
}

impl RunOutcome {
    pub fn failed(&self) -> bool {
        self.dq.has_failures()
            || self
                .monitor
                .as_ref()
                .is_some_and(|outcome| outcome.run.has_alerts())
    }
}

pub fn run_dq_command(args: &DqArgs) -> anyhow::Result<DqOutcome> {
    run_dq(&dq_paths(args), Utc::now())
}

pub fn run_monitor_command(args: &MonitorArgs) -> anyhow::Result<MonitorOutcome> {
    run_monitor(&monitor_paths(args), Utc::now())
}

pub fn run_pipeline(args: &RunArgs) -> anyhow::Result<RunOutcome> {
    let now = Utc::now();
    let dq = run_dq(&dq_paths(&args.dq), now)?;
    if dq.has_failures() && !args.no_gate {
        tracing::warn!(
            failed = dq.summary.overall.failed,
            "data-quality gate failed; skipping monitoring"
        );
        return Ok(RunOutcome { dq, monitor: None });
    }
    let monitor = run_monitor(&monitor_paths(&args.monitor_args()), now)?;
    Ok(RunOutcome {
        dq,
        monitor: Some(monitor),
    })
}

fn dq_paths(args: &DqArgs) -> DqPaths {
    DqPaths {
        data_dir: args.data_dir.clone(),
        expectations_dir: args.expectations.clone(),
        reports_dir: args
            .reports_dir
            .clone()
            .unwrap_or_else(|| sibling_dir(&args.data_dir, "reports")),
        logs_dir: args
            .logs_dir
            .clone()
            .unwrap_or_else(|| sibling_dir(&args.data_dir, "logs")),
    }
}

fn monitor_paths(args: &MonitorArgs) -> MonitorPaths {
    MonitorPaths {
        data_dir: args.data_dir.clone(),
        config: args.config.clone(),
        latency: args.latency.clone(),
        reports_dir: args
            .reports_dir
            .clone()
            .unwrap_or_else(|| sibling_dir(&args.data_dir, "reports")),
    }
}
