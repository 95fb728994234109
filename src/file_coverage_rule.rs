//! Per-file line and branch coverage.
//!
//! Each file is checked against the thresholds of the module whose prefix is
//! the longest match for its filename, falling back to the global per-file
//! thresholds.

use rust_decimal::Decimal;

use crate::check_result::{CheckResult, fold_check_results};
use crate::common_checks::{check_branch_coverage_min, check_line_coverage_min};
use crate::config::{Config, ModuleConfig};
use crate::report::{FileCoverage, Report};
use crate::rule::Rule;

/// Checks every file of the report against its effective thresholds.
#[derive(Debug, Default)]
pub struct FileCoverageRule;

impl FileCoverageRule {
    /// Creates the rule.
    pub fn new() -> Self {
        FileCoverageRule
    }
}

impl Rule for FileCoverageRule {
    fn name(&self) -> &'static str {
        "file-coverage"
    }

    fn description(&self) -> &'static str {
        "Line and branch coverage of every file, with per-module overrides"
    }

    fn check(&self, report: &Report, config: &Config) -> CheckResult {
        if config.has_branch_thresholds() && !report.meta.branch_coverage {
            tracing::warn!(
                "Branch coverage thresholds are configured but the report was collected without branch coverage; branch checks will pass"
            );
        }
        check_all_files(report, config)
    }
}

/// Returns the module config whose prefix is the longest match for `filename`.
///
/// Matching is a plain, case-sensitive string prefix test: `src/a` matches
/// `src/ab.py`. On equal lengths the entry written first wins, although two
/// distinct prefixes of the same length can never both match one filename.
pub fn best_matching_module_config_for_file<'a>(
    filename: &str,
    config: &'a Config,
) -> Option<&'a ModuleConfig> {
    let modules = config.modules.as_ref()?;
    modules
        .iter()
        .filter(|(prefix, _)| filename.starts_with(prefix.as_str()))
        .fold(None, |best: Option<(&String, &ModuleConfig)>, candidate| {
            match best {
                Some((best_prefix, _)) if best_prefix.len() >= candidate.0.len() => best,
                _ => Some(candidate),
            }
        })
        .map(|(prefix, module)| {
            tracing::trace!(%filename, %prefix, "Resolved module config");
            module
        })
}

fn effective_line_threshold(config: &Config, module: Option<&ModuleConfig>) -> Option<Decimal> {
    module
        .and_then(|m| m.file_line_coverage_min)
        .or(config.line_coverage_threshold_for_every_file)
}

fn effective_branch_threshold(config: &Config, module: Option<&ModuleConfig>) -> Option<Decimal> {
    module
        .and_then(|m| m.file_branch_coverage_min)
        .or(config.file_branch_coverage_min)
}

/// Line coverage check for one file.
pub fn check_file_line_coverage_min(
    filename: &str,
    file_coverage: &FileCoverage,
    config: &Config,
    module_config: Option<&ModuleConfig>,
) -> CheckResult {
    check_line_coverage_min(
        &file_coverage.summary,
        effective_line_threshold(config, module_config),
        &format!("File: \"{}\" failed LINE coverage metric", filename),
    )
}

/// Branch coverage check for one file.
pub fn check_file_branch_coverage_min(
    filename: &str,
    file_coverage: &FileCoverage,
    config: &Config,
    module_config: Option<&ModuleConfig>,
) -> CheckResult {
    check_branch_coverage_min(
        &file_coverage.summary,
        effective_branch_threshold(config, module_config),
        &format!("File: \"{}\" failed BRANCH coverage metric", filename),
    )
}

/// Runs the line and branch checks of every file, in report order.
pub fn check_all_files(report: &Report, config: &Config) -> CheckResult {
    fold_check_results(report.files.iter().flat_map(|(filename, file_coverage)| {
        let module_config = best_matching_module_config_for_file(filename, config);
        [
            check_file_line_coverage_min(filename, file_coverage, config, module_config),
            check_file_branch_coverage_min(filename, file_coverage, config, module_config),
        ]
    }))
}

/// Checks every file's line coverage against a single threshold, ignoring
/// module overrides.
pub fn each_file_line_coverage_metric(report: &Report, threshold: Decimal) -> CheckResult {
    report
        .files
        .iter()
        .map(|(filename, file_coverage)| {
            check_line_coverage_min(
                &file_coverage.summary,
                Some(threshold),
                &format!("File: \"{}\" failed line coverage metric", filename),
            )
        })
        .collect()
}
