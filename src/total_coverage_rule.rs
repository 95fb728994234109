//! Line coverage of the whole report.
//!
//! The totals block is taken as the report producer wrote it; it is never
//! recomputed from the per-file summaries.

use rust_decimal::Decimal;

use crate::check_result::CheckResult;
use crate::common_checks::check_line_coverage_min;
use crate::config::Config;
use crate::report::Report;
use crate::rule::Rule;

/// Checks `totals.percent_covered` against `total_line_coverage_threshold`.
#[derive(Debug, Default)]
pub struct TotalCoverageRule;

impl TotalCoverageRule {
    /// Creates the rule.
    pub fn new() -> Self {
        TotalCoverageRule
    }
}

impl Rule for TotalCoverageRule {
    fn name(&self) -> &'static str {
        "total-coverage"
    }

    fn description(&self) -> &'static str {
        "Line coverage of the report totals"
    }

    fn check(&self, report: &Report, config: &Config) -> CheckResult {
        check_line_coverage_min(
            &report.totals,
            config.total_line_coverage_threshold,
            "Total line coverage metric failed",
        )
    }
}

/// Returns `true` if the report totals meet `threshold`.
pub fn total_line_coverage_metric(report: &Report, threshold: Decimal) -> bool {
    report.totals.percent_covered >= threshold
}
