//! Orchestration for running all coverage rules.
//!
//! [`check_all`] is the core entry point: it runs the per-file rule and the
//! totals rule and folds their results. [`run`] wraps it with everything the
//! CLI needs around the check, such as loading the report and config,
//! merging CLI thresholds and rendering the output.
//!
//! # Example
//!
//! ```rust
//! use coverage_threshold::{check_all, Config, Report};
//!
//! let report = Report::from_json_str(r#"{
//!     "files": {
//!         "src/main.py": {"summary": {"covered_lines": 1, "num_statements": 2,
//!             "percent_covered": 50.0, "missing_lines": 1, "excluded_lines": 0}}
//!     },
//!     "totals": {"covered_lines": 1, "num_statements": 2,
//!         "percent_covered": 50.0, "missing_lines": 1, "excluded_lines": 0},
//!     "meta": {"branch_coverage": false}
//! }"#)?;
//!
//! assert!(check_all(&report, &Config::default()).is_pass());
//! # Ok::<(), coverage_threshold::error::CoverageThresholdError>(())
//! ```

use std::fs;

use crate::check_result::{CheckResult, fold_check_results};
use crate::cli::Cli;
use crate::config::{Config, load_config, merge_check_args};
use crate::error::{CoverageThresholdError, Result};
use crate::file_coverage_rule::FileCoverageRule;
use crate::report::{Report, load_report};
use crate::reporting::render_outcomes;
use crate::rule::Rule;
use crate::total_coverage_rule::TotalCoverageRule;

/// The result of one rule, tagged with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// [`Rule::name`] of the rule.
    pub rule_id: &'static str,
    /// [`Rule::description`] of the rule.
    pub description: &'static str,
    /// What the rule found.
    pub result: CheckResult,
}

/// The rules `check_all` runs, in order.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FileCoverageRule::new()),
        Box::new(TotalCoverageRule::new()),
    ]
}

/// Runs every default rule and keeps each rule's result separate.
pub fn run_rules(report: &Report, config: &Config) -> Vec<RuleOutcome> {
    default_rules()
        .iter()
        .map(|rule| {
            let result = rule.check(report, config);
            tracing::debug!(
                rule = rule.name(),
                passed = result.is_pass(),
                problems = result.problems().len(),
                "Rule finished"
            );
            RuleOutcome {
                rule_id: rule.name(),
                description: rule.description(),
                result,
            }
        })
        .collect()
}

/// Checks a report against a configuration.
///
/// File-level failures come first, in report order, followed by the totals
/// failure.
pub fn check_all(report: &Report, config: &Config) -> CheckResult {
    fold_check_results(run_rules(report, config).into_iter().map(|o| o.result))
}

/// Runs a full check as described by the CLI arguments and writes the
/// rendered result to stdout or `--output-file`.
///
/// Returns the combined result; mapping it to an exit status is left to the
/// caller.
pub fn run(args: &Cli) -> Result<CheckResult> {
    let report = load_report(&args.coverage_json)?;

    let file_config = match load_config(args.config.as_deref())? {
        Some((path, config)) => {
            tracing::info!(path = %path.display(), "Loaded configuration");
            config
        }
        None => {
            tracing::info!("No configuration file found; using command-line thresholds only");
            Config::default()
        }
    };
    let config = merge_check_args(args, &file_config);
    tracing::debug!(?config, "Effective configuration");

    let outcomes = run_rules(&report, &config);
    let rendered = render_outcomes(&outcomes, args.output)?;

    match &args.output_file {
        Some(path) => fs::write(path, rendered).map_err(|e| {
            CoverageThresholdError::io_error_with_source("write output file", path.clone(), e)
        })?,
        None => print!("{}", rendered),
    }

    let combined = fold_check_results(outcomes.into_iter().map(|o| o.result));
    tracing::info!(
        passed = combined.is_pass(),
        problems = combined.problems().len(),
        "Coverage check finished"
    );
    Ok(combined)
}
