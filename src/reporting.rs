//! Rendering of check results for the terminal and for CI.

use colored::Colorize;

use crate::all_rules::RuleOutcome;
use crate::check_result::{CheckResult, CheckResultJson, fold_check_results};
use crate::ci_report::{ToFindings, to_junit, to_sarif};
use crate::cli::OutputFormat;
use crate::cli_report::render_cli_table;
use crate::error::{CoverageThresholdError, Result};

/// JUnit suite name used for every run.
const JUNIT_SUITE_NAME: &str = "coverage-threshold";

/// Plain text: a green `Success!`, or `Fail!` followed by each problem in red.
pub fn render_text(result: &CheckResult) -> String {
    match result {
        CheckResult::Pass => format!("{}\n", "Success!".green()),
        CheckResult::Fail(problems) => {
            let mut out = String::from("Fail!\n");
            for problem in problems {
                out.push_str(&format!("{}\n", problem.red()));
            }
            out
        }
    }
}

/// Renders the outcomes of a run in the requested format.
pub fn render_outcomes(outcomes: &[RuleOutcome], format: OutputFormat) -> Result<String> {
    let combined = fold_check_results(outcomes.iter().map(|o| o.result.clone()));
    match format {
        OutputFormat::Text => Ok(render_text(&combined)),
        OutputFormat::Table => Ok(render_cli_table(&outcomes.to_findings())),
        OutputFormat::Json => serde_json::to_string_pretty(&CheckResultJson::from(&combined))
            .map(|json| json + "\n")
            .map_err(|e| CoverageThresholdError::output_error("JSON", e)),
        OutputFormat::Sarif => to_sarif(&outcomes.to_findings()),
        OutputFormat::Junit => to_junit(&outcomes.to_findings(), JUNIT_SUITE_NAME),
    }
}
