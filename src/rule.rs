//! Rule Trait
//!
//! Every coverage check is a [`Rule`]: a named, pure function from a report
//! and a configuration to a [`CheckResult`]. The orchestrator in
//! [`all_rules`](crate::all_rules) folds the rules' results together.
//!
//! # Implementing a Custom Rule
//!
//! ```rust
//! use coverage_threshold::{CheckResult, Config, Report, Rule};
//!
//! struct NonEmptyReportRule;
//!
//! impl Rule for NonEmptyReportRule {
//!     fn name(&self) -> &'static str {
//!         "non-empty-report"
//!     }
//!
//!     fn description(&self) -> &'static str {
//!         "Fails when the report lists no files"
//!     }
//!
//!     fn check(&self, report: &Report, _config: &Config) -> CheckResult {
//!         if report.files.is_empty() {
//!             CheckResult::fail("Coverage report contains no files")
//!         } else {
//!             CheckResult::Pass
//!         }
//!     }
//! }
//! ```

use crate::check_result::CheckResult;
use crate::config::Config;
use crate::report::Report;

/// Common trait for all coverage rules.
pub trait Rule {
    /// Returns the name of this rule.
    ///
    /// Used in logs and as the rule id of CI findings. Should be a unique,
    /// kebab-case string.
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of this rule.
    fn description(&self) -> &'static str;

    /// Runs every check of this rule and folds them into one result.
    ///
    /// Checks never short-circuit: all failures are reported.
    fn check(&self, report: &Report, config: &Config) -> CheckResult;
}
