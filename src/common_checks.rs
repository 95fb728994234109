//! Threshold primitives shared by the file and total rules.
//!
//! A missing threshold means "not configured" and always passes. Comparisons
//! are exact decimal comparisons and the boundary is inclusive.

use crate::check_result::CheckResult;
use crate::report::CoverageSummary;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a measured percentage for display, half to even.
fn display_percentage(actual: Decimal) -> Decimal {
    actual.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

fn check_min(
    actual: Option<Decimal>,
    threshold: Option<Decimal>,
    failure_message_prefix: &str,
) -> CheckResult {
    match (actual, threshold) {
        (Some(actual), Some(threshold)) if actual < threshold => CheckResult::fail(format!(
            "{}, expected: {}, was {:.2}",
            failure_message_prefix,
            threshold,
            display_percentage(actual)
        )),
        _ => CheckResult::Pass,
    }
}

/// Checks `summary.percent_covered >= threshold`.
pub fn check_line_coverage_min(
    summary: &CoverageSummary,
    threshold: Option<Decimal>,
    failure_message_prefix: &str,
) -> CheckResult {
    check_min(
        Some(summary.percent_covered),
        threshold,
        failure_message_prefix,
    )
}

/// Checks the branch percentage of `summary` against `threshold`.
///
/// Passes when the summary carries no branch data.
pub fn check_branch_coverage_min(
    summary: &CoverageSummary,
    threshold: Option<Decimal>,
    failure_message_prefix: &str,
) -> CheckResult {
    check_min(
        summary.percent_branches_covered(),
        threshold,
        failure_message_prefix,
    )
}
