//! Standalone HTML data-quality report.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};

use noshow_model::CheckResult;

use crate::error::{ReportError, Result};
use crate::tables::create_file;

const COLUMNS: [&str; 6] = [
    "table",
    "expectation_id",
    "type",
    "severity",
    "passed",
    "details",
];

/// Render the report page.
///
/// Rows are ordered by table, severity and outcome (`FAIL` before `PASS`).
/// Every cell is HTML-escaped.
pub fn render_dq_html(results: &[CheckResult], generated_at: DateTime<Utc>) -> String {
    let mut rows: Vec<[String; 6]> = results
        .iter()
        .map(|result| {
            [
                result.table.clone(),
                result.expectation_id.clone(),
                result.expectation_type.clone(),
                result.severity.clone(),
                if result.passed { "PASS" } else { "FAIL" }.to_string(),
                result.details.to_string(),
            ]
        })
        .collect();
    rows.sort_by(|a, b| (&a[0], &a[3], &a[4]).cmp(&(&b[0], &b[3], &b[4])));

    let mut html = String::new();
    html.push_str("<html><head><meta charset='utf-8'><title>DQ Report</title></head>\n");
    html.push_str(
        "<body style='font-family: Arial, sans-serif; background:#0b1220; color:#e6edf7;'>\n",
    );
    html.push_str("<h1>Data Quality Report</h1>\n");
    let _ = writeln!(
        html,
        "<p>Generated: {}</p>",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    html.push_str(
        "<div style='background:#111a2e;padding:12px;border-radius:10px;border:1px solid #22304a;'>\n",
    );
    html.push_str("<table border=\"1\" class=\"dataframe\">\n<thead>\n<tr>");
    for column in COLUMNS {
        let _ = write!(html, "<th>{column}</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape_html(cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n</div></body></html>\n");
    html
}

/// Write [`render_dq_html`] output to `path`.
pub fn write_dq_html(
    path: &Path,
    results: &[CheckResult],
    generated_at: DateTime<Utc>,
) -> Result<()> {
    let mut file = create_file(path)?;
    file.write_all(render_dq_html(results, generated_at).as_bytes())
        .map_err(|e| ReportError::io(path, e))?;
    tracing::debug!(path = %path.display(), rows = results.len(), "wrote HTML report");
    Ok(())
}

/// Escape text for use inside an HTML element or quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
