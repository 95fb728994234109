//! Typed model of a coverage.py JSON report.
//!
//! Only the summary blocks are modelled. coverage.py also writes per-line
//! data (`executed_lines`, `missing_lines`, contexts, ...) which the checks
//! never look at, so unknown keys are ignored rather than rejected.
//!
//! Percentages are [`Decimal`]s: a report saying `75.0` must compare equal to
//! a threshold of `75.0` without any binary rounding in between.

use crate::error::{CoverageThresholdError, Result};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Line and branch counters for one file, or for the whole report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoverageSummary {
    /// Number of executed statements.
    pub covered_lines: u64,
    /// Number of executable statements.
    pub num_statements: u64,
    /// Line coverage percentage as computed by the report producer.
    pub percent_covered: Decimal,
    /// Number of statements that never ran.
    pub missing_lines: u64,
    /// Number of statements excluded from measurement.
    pub excluded_lines: u64,
    /// Total branch count, present only when branch coverage was collected.
    #[serde(default)]
    pub num_branches: Option<u64>,
    /// Number of partially taken branches.
    #[serde(default)]
    pub num_partial_branches: Option<u64>,
    /// Number of branches taken.
    #[serde(default)]
    pub covered_branches: Option<u64>,
    /// Number of branches never taken.
    #[serde(default)]
    pub missing_branches: Option<u64>,
}

impl CoverageSummary {
    /// Branch coverage as a percentage.
    ///
    /// Returns `None` when the branch counters are missing, or when the
    /// summary has no branches at all.
    pub fn percent_branches_covered(&self) -> Option<Decimal> {
        let covered = self.covered_branches?;
        let missing = self.missing_branches?;
        let total = covered.checked_add(missing)?;
        if total == 0 {
            return None;
        }
        Some(Decimal::from(covered) * Decimal::ONE_HUNDRED / Decimal::from(total))
    }
}

/// Coverage of a single source file. The filename is the key it is stored
/// under in [`Report::files`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileCoverage {
    /// Summary counters for this file.
    pub summary: CoverageSummary,
}

/// Report-level metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReportMetadata {
    /// Whether branch coverage was collected.
    pub branch_coverage: bool,
}

/// A full coverage report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Report {
    /// Per-file coverage, in the order the report lists the files.
    pub files: IndexMap<String, FileCoverage>,
    /// Aggregate counters, as supplied by the producer.
    pub totals: CoverageSummary,
    /// Report metadata.
    pub meta: ReportMetadata,
}

impl Report {
    /// Parses a report from its JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Loads a coverage report from a JSON file.
///
/// Unlike configuration, a missing report is an error: there is nothing to
/// check without one.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_report(path: &Path) -> Result<Report> {
    let content = fs::read_to_string(path).map_err(|e| {
        CoverageThresholdError::io_error_with_source(
            "read coverage report",
            path.to_path_buf(),
            e,
        )
    })?;

    let report: Report = serde_json::from_str(&content).map_err(|e| {
        CoverageThresholdError::parse_error_with_file(
            path.to_path_buf(),
            format!("Failed to parse coverage JSON: {}", e),
            Some(Box::new(e)),
        )
    })?;

    tracing::debug!(
        files = report.files.len(),
        branch_coverage = report.meta.branch_coverage,
        "Loaded coverage report"
    );
    Ok(report)
}
