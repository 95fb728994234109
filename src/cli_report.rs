//! CLI-friendly table output for check results.
//!
//! One row per finding: severity (color coded), rule, file and message.

use crate::ci_report::{Finding, Severity};
use prettytable::{Attr, Cell, Row, Table, format};

/// Maximum width for the message column before truncation.
const MAX_MESSAGE_WIDTH: usize = 90;

#[must_use]
fn truncate_message(message: &str) -> String {
    if message.chars().count() > MAX_MESSAGE_WIDTH {
        let head: String = message
            .chars()
            .take(MAX_MESSAGE_WIDTH.saturating_sub(3))
            .collect();
        format!("{}...", head)
    } else {
        message.to_string()
    }
}

#[must_use]
const fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "FAIL",
        Severity::Note => "PASS",
    }
}

#[must_use]
const fn severity_color(severity: Severity) -> Attr {
    match severity {
        Severity::Error => Attr::ForegroundColor(prettytable::color::RED),
        Severity::Note => Attr::ForegroundColor(prettytable::color::GREEN),
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Renders a single-line summary of findings.
///
/// ```rust
/// use coverage_threshold::ci_report::{Finding, Severity};
/// use coverage_threshold::cli_report::render_summary_line;
///
/// let findings = vec![Finding {
///     rule_id: "total-coverage".to_string(),
///     rule_name: "Line coverage of the report totals".to_string(),
///     severity: Severity::Error,
///     message: "Total line coverage metric failed, expected: 80, was 75.00".to_string(),
///     location: None,
///     fingerprint: None,
/// }];
///
/// assert_eq!(render_summary_line(&findings), "1 failure, 0 rules passed");
/// ```
#[must_use]
pub fn render_summary_line(findings: &[Finding]) -> String {
    let failures = findings.iter().filter(|f| f.severity.is_error()).count();
    let passed = findings.len() - failures;

    format!(
        "{} failure{}, {} rule{} passed",
        failures,
        plural(failures),
        passed,
        plural(passed),
    )
}

/// Renders findings as a CLI table.
///
/// Failures are listed before passes; within each group the input order is
/// kept, so file failures stay in report order.
#[must_use]
pub fn render_cli_table(findings: &[Finding]) -> String {
    let mut table = Table::new();
    table.set_format(
        format::FormatBuilder::new()
            .separator(
                format::LinePosition::Top,
                format::LineSeparator::new('─', '┬', '┌', '┐'),
            )
            .separator(
                format::LinePosition::Title,
                format::LineSeparator::new('═', '╪', '╞', '╡'),
            )
            .separator(
                format::LinePosition::Bottom,
                format::LineSeparator::new('─', '┴', '└', '┘'),
            )
            .column_separator('│')
            .borders('│')
            .padding(1, 1)
            .build(),
    );

    table.set_titles(Row::new(vec![
        Cell::new("Status").with_style(Attr::Bold),
        Cell::new("Rule").with_style(Attr::Bold),
        Cell::new("File").with_style(Attr::Bold),
        Cell::new("Issue").with_style(Attr::Bold),
    ]));

    let mut sorted_findings: Vec<&Finding> = findings.iter().collect();
    sorted_findings.sort_by_key(|f| !f.severity.is_error());

    for finding in sorted_findings {
        let location = finding.location.as_deref().unwrap_or("-");
        table.add_row(Row::new(vec![
            Cell::new(severity_label(finding.severity))
                .with_style(severity_color(finding.severity)),
            Cell::new(&finding.rule_id),
            Cell::new(location),
            Cell::new(&truncate_message(&finding.message)),
        ]));
    }

    format!("{}{}\n", table, render_summary_line(findings))
}
