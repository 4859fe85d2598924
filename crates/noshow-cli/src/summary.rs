use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use noshow_cli::pipeline::{DqOutcome, MonitorOutcome};
use noshow_model::{AlertSeverity, DriftStatus, FreshnessStatus};

use crate::commands::RunOutcome;

pub fn print_dq_summary(outcome: &DqOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Checks"),
        header_cell("Passed"),
        header_cell("Failed"),
    ]);
    apply_table_style(&mut table, 100);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for (name, summary) in &outcome.summary.tables {
        table.add_row(vec![
            table_cell(name),
            Cell::new(summary.passed + summary.failed),
            count_cell(summary.passed, Color::Green),
            count_cell(summary.failed, Color::Red),
        ]);
    }
    let overall = outcome.summary.overall;
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(overall.passed + overall.failed).add_attribute(Attribute::Bold),
        count_cell(overall.passed, Color::Green).add_attribute(Attribute::Bold),
        count_cell(overall.failed, Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_failed_checks(outcome);
    print_outputs(&outcome.outputs);
}

fn print_failed_checks(outcome: &DqOutcome) {
    let failed: Vec<_> = outcome.results.iter().filter(|r| !r.passed).collect();
    if failed.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Expectation"),
        header_cell("Table"),
        header_cell("Type"),
        header_cell("Severity"),
        header_cell("Details"),
    ]);
    apply_table_style(&mut table, 160);
    align_column(&mut table, 3, CellAlignment::Center);
    for result in failed {
        table.add_row(vec![
            Cell::new(&result.expectation_id),
            table_cell(&result.table),
            Cell::new(&result.expectation_type),
            severity_cell(&result.severity),
            Cell::new(result.details.to_string()),
        ]);
    }
    println!();
    println!("Failed checks:");
    println!("{table}");
}

pub fn print_monitor_summary(outcome: &MonitorOutcome) {
    let run = &outcome.run;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Feature"),
        header_cell("Type"),
        header_cell("PSI"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table, 100);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for drift in &run.drift {
        let psi = if drift.psi.is_nan() {
            dim_cell("-")
        } else {
            Cell::new(format!("{:.6}", drift.psi))
        };
        table.add_row(vec![
            Cell::new(&drift.feature),
            dim_cell(drift.feature_type.as_str()),
            psi,
            drift_status_cell(drift.status),
        ]);
    }
    if let Some(drift) = run.drift.first() {
        println!(
            "Reference: {}  Current: {}",
            drift.reference_window, drift.current_window
        );
    }
    println!("{table}");

    let freshness = &run.freshness;
    println!(
        "Freshness: {} {} (latest {}, expected {}, lag {} days, SLA {} days)",
        freshness.freshness_status,
        freshness_label(freshness.freshness_status),
        freshness.observed_latest_date,
        freshness.expected_latest_date,
        freshness.lag_days,
        freshness.sla_days
    );
    println!(
        "API: p95 {} ms, error rate {}",
        run.snapshot.api_p95_ms, run.snapshot.api_error_rate
    );

    print_alerts(outcome);
    print_outputs(&outcome.outputs);
}

fn print_alerts(outcome: &MonitorOutcome) {
    let alerts = &outcome.run.alerts;
    if alerts.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Alert"),
        header_cell("Type"),
        header_cell("Severity"),
        header_cell("Entity"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table, 160);
    align_column(&mut table, 2, CellAlignment::Center);
    for alert in alerts {
        let severity = match alert.severity {
            AlertSeverity::High => Cell::new("high")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            AlertSeverity::Medium => Cell::new("medium").fg(Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(&alert.alert_id),
            Cell::new(alert.alert_type.as_str()),
            severity,
            Cell::new(&alert.entity),
            Cell::new(&alert.message),
        ]);
    }
    println!();
    println!("Alerts:");
    println!("{table}");
}

pub fn print_run_summary(outcome: &RunOutcome) {
    print_dq_summary(&outcome.dq);
    println!();
    match &outcome.monitor {
        Some(monitor) => print_monitor_summary(monitor),
        None => eprintln!("Monitoring skipped: data-quality gate failed (use --no-gate to override)."),
    }
}

fn print_outputs(outputs: &[PathBuf]) {
    println!();
    for path in outputs {
        println!("Wrote {}", path.display());
    }
}

fn apply_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn drift_status_cell(status: DriftStatus) -> Cell {
    match status {
        DriftStatus::Alert => Cell::new("ALERT")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        DriftStatus::Warn => Cell::new("WARN").fg(Color::Yellow),
        DriftStatus::Na => dim_cell("NA"),
        DriftStatus::Ok => Cell::new("OK").fg(Color::Green),
    }
}

fn severity_cell(severity: &str) -> Cell {
    match severity {
        "high" => Cell::new(severity).fg(Color::Red),
        "medium" => Cell::new(severity).fg(Color::Yellow),
        _ => Cell::new(severity),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn table_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn freshness_label(status: FreshnessStatus) -> &'static str {
    match status {
        FreshnessStatus::Ok => "within SLA",
        FreshnessStatus::Alert => "SLA breached",
    }
}
