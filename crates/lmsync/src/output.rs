//! Run-summary formatting: table, JSON, plain.
//!
//! Each reconciled resource contributes one report row; the summary is
//! rendered in the format selected by `--output`. Table uses `tabled`,
//! JSON uses serde, plain emits one resource per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use lmsync_core::{CoreError, Outcome};

use crate::cli::{ColorMode, OutputFormat};

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Report rows ──────────────────────────────────────────────────────

/// One resource's terminal state in the run.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub kind: &'static str,
    pub name: String,
    pub account: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Accumulates rows as the run progresses and renders the summary.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct RunReport {
    rows: Vec<ReportRow>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one resource's result.
    pub fn push(
        &mut self,
        kind: &'static str,
        name: impl Into<String>,
        account: impl Into<String>,
        result: Result<Outcome, CoreError>,
    ) {
        let (status, error) = match result {
            Ok(outcome) => (outcome.to_string(), None),
            Err(err) => ("failed".to_string(), Some(err.to_string())),
        };
        self.rows.push(ReportRow {
            kind,
            name: name.into(),
            account: account.into(),
            status,
            error,
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows that ended in failure.
    pub fn failed(&self) -> usize {
        self.rows.iter().filter(|row| row.error.is_some()).count()
    }

    /// Render the summary in the chosen format.
    pub fn render(&self, format: &OutputFormat, color: bool) -> String {
        match format {
            OutputFormat::Table => self.render_table(color),
            OutputFormat::Json => {
                serde_json::to_string_pretty(&self.rows).unwrap_or_else(|_| "[]".into())
            }
            OutputFormat::Plain => self
                .rows
                .iter()
                .map(|row| match &row.error {
                    Some(message) => {
                        format!("{} {}: {} ({message})", row.kind, row.name, row.status)
                    }
                    None => format!("{} {}: {}", row.kind, row.name, row.status),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn render_table(&self, color: bool) -> String {
        let rows: Vec<SummaryRow> = self
            .rows
            .iter()
            .map(|row| SummaryRow {
                kind: row.kind,
                name: row.name.clone(),
                account: row.account.clone(),
                status: styled_status(&row.status, color),
                detail: row.error.clone().unwrap_or_default(),
            })
            .collect();
        Table::new(rows).with(Style::rounded()).to_string()
    }
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "KIND")]
    kind: &'static str,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ACCOUNT")]
    account: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "DETAIL")]
    detail: String,
}

fn styled_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }
    match status {
        "created" | "deleted" => status.green().to_string(),
        "updated" => status.yellow().to_string(),
        "failed" => status.red().bold().to_string(),
        _ => status.dimmed().to_string(),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use lmsync_core::Outcome;

    fn report() -> RunReport {
        let mut report = RunReport::new();
        report.push("device", "sw1", "acme", Ok(Outcome::Created));
        report.push(
            "collector",
            "c9",
            "acme",
            Err(CoreError::CollectorNotFound {
                description: "c9".into(),
            }),
        );
        report
    }

    #[test]
    fn failures_are_counted() {
        let report = report();
        assert_eq!(report.len(), 2);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn plain_output_lists_one_line_per_resource() {
        let rendered = report().render(&OutputFormat::Plain, false);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "device sw1: created");
        assert!(lines[1].starts_with("collector c9: failed"));
    }

    #[test]
    fn json_output_is_an_array() {
        let rendered = report().render(&OutputFormat::Json, false);
        let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("json");
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
        assert_eq!(parsed[0]["status"], "created");
        assert!(parsed[0].get("error").is_none());
        assert_eq!(parsed[1]["status"], "failed");
    }

    #[test]
    fn uncolored_table_contains_headers() {
        let rendered = report().render(&OutputFormat::Table, false);
        assert!(rendered.contains("KIND"));
        assert!(rendered.contains("STATUS"));
        assert!(rendered.contains("created"));
    }
}
