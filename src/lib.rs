//! # coverage-threshold
//!
//! Checks a coverage.py JSON report against line and branch coverage
//! thresholds and reports every file, and the totals, that fall short.
//!
//! - **Per-file line coverage**: a global minimum, overridable per module
//! - **Per-file branch coverage**: same, computed from the branch counters
//! - **Total line coverage**: the report totals against a global minimum
//!
//! Per-module overrides are keyed by filename prefix; the longest matching
//! prefix wins.
//!
//! ## Architecture
//!
//! - [`report`] - Typed model of the coverage report
//! - [`config`] - Threshold configuration loading and CLI merging
//! - [`check_result`] - Pass/fail results and the fold that combines them
//! - [`common_checks`] - Line and branch threshold primitives
//! - [`file_coverage_rule`] - Per-file checks with module overrides
//! - [`total_coverage_rule`] - Report totals check
//! - [`all_rules`] - Orchestration: [`check_all`] and the CLI [`run`]
//! - [`ci_report`] - SARIF and JUnit output
//! - [`cli_report`] - Terminal table output
//! - [`error`] - Centralized error types for the crate
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use coverage_threshold::{check_all, load_config, load_report};
//! use std::path::Path;
//!
//! # fn main() -> coverage_threshold::Result<()> {
//! let report = load_report(Path::new("coverage.json"))?;
//! let config = load_config(None)?.map(|(_, c)| c).unwrap_or_default();
//!
//! let result = check_all(&report, &config);
//! for problem in result.problems() {
//!     println!("{problem}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Threshold failures are values ([`CheckResult::Fail`]), never errors.
//! Loading can fail with [`Error`]; see the [`error`] module.

pub mod all_rules;
pub mod check_result;
pub mod ci_report;
pub mod cli;
pub mod cli_report;
pub mod common_checks;
pub mod config;
pub mod error;
pub mod file_coverage_rule;
pub mod report;
pub mod reporting;
pub mod rule;
pub mod total_coverage_rule;

// Public API exports
pub use crate::all_rules::{RuleOutcome, check_all, run, run_rules};
pub use crate::check_result::{CheckResult, fold_check_results};
pub use crate::cli::{Cli, OutputFormat};
pub use crate::common_checks::{check_branch_coverage_min, check_line_coverage_min};
pub use crate::file_coverage_rule::{
    FileCoverageRule, best_matching_module_config_for_file, each_file_line_coverage_metric,
};
pub use crate::total_coverage_rule::{TotalCoverageRule, total_line_coverage_metric};

// Model exports
pub use crate::config::{Config, ModuleConfig, load_config, load_config_from_path, merge_check_args};
pub use crate::report::{CoverageSummary, FileCoverage, Report, ReportMetadata, load_report};

// Error exports
pub use crate::error::{CoverageThresholdError as Error, Result};

// Rule trait exports
pub use crate::rule::Rule;
