//! CI/CD Platform-Friendly Report Generation
//!
//! Provides SARIF and JUnit XML output formats for CI/CD integration.
//!
//! Each rule outcome is converted to [`Finding`]s through [`ToFindings`]: one
//! error finding per failure message, or a single note finding when the rule
//! passed. Findings are then serialized with [`to_sarif`] or [`to_junit`].
//!
//! # Example
//!
//! ```rust
//! use coverage_threshold::ci_report::{Finding, Severity, to_junit, to_sarif};
//!
//! let findings = vec![Finding {
//!     rule_id: "total-coverage".to_string(),
//!     rule_name: "Line coverage of the report totals".to_string(),
//!     severity: Severity::Error,
//!     message: "Total line coverage metric failed, expected: 80, was 75.00".to_string(),
//!     location: None,
//!     fingerprint: Some("total-coverage:Total line coverage metric failed".to_string()),
//! }];
//!
//! let sarif = to_sarif(&findings)?;
//! let junit = to_junit(&findings, "coverage-threshold")?;
//! # Ok::<(), coverage_threshold::error::CoverageThresholdError>(())
//! ```

use crate::all_rules::RuleOutcome;
use crate::check_result::CheckResult;
use crate::error::{CoverageThresholdError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Severity level for CI report findings.
///
/// - **Error**: a failed threshold (SARIF `error`, JUnit `<failure>`)
/// - **Note**: a rule that passed (SARIF `note`, JUnit passed test)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error severity - causes CI failure
    Error,
    /// Note severity - informational, does not fail CI
    Note,
}

impl Severity {
    /// Returns the SARIF level string for this severity.
    #[must_use]
    pub const fn to_sarif_level(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Note => "note",
        }
    }

    /// Returns whether this severity should cause a CI failure.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

/// A single observation produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Identifier of the rule that produced this finding.
    /// Used as `ruleId` in SARIF output.
    pub rule_id: String,

    /// Human-readable name of the rule.
    pub rule_name: String,

    /// Severity level of this finding.
    pub severity: Severity,

    /// Human-readable message describing the finding.
    pub message: String,

    /// Repo-relative path of the file the finding is about, if any.
    pub location: Option<String>,

    /// Stable fingerprint for deduplication.
    /// Maps to SARIF `partialFingerprints`.
    pub fingerprint: Option<String>,
}

/// Trait for converting rule data to CI findings.
pub trait ToFindings {
    /// Converts the rule's output data into a list of findings.
    fn to_findings(&self) -> Vec<Finding>;
}

impl ToFindings for RuleOutcome {
    fn to_findings(&self) -> Vec<Finding> {
        match &self.result {
            CheckResult::Pass => vec![Finding {
                rule_id: self.rule_id.to_string(),
                rule_name: self.description.to_string(),
                severity: Severity::Note,
                message: format!("{}: passed", self.description),
                location: None,
                fingerprint: None,
            }],
            CheckResult::Fail(problems) => problems
                .iter()
                .map(|problem| Finding {
                    rule_id: self.rule_id.to_string(),
                    rule_name: self.description.to_string(),
                    severity: Severity::Error,
                    message: problem.clone(),
                    location: failed_file(problem).map(str::to_string),
                    fingerprint: Some(fingerprint(self.rule_id, problem)),
                })
                .collect(),
        }
    }
}

impl<T: ToFindings> ToFindings for [T] {
    fn to_findings(&self) -> Vec<Finding> {
        self.iter().flat_map(ToFindings::to_findings).collect()
    }
}

/// Extracts the filename from a `File: "<name>" failed ...` message.
#[must_use]
pub fn failed_file(message: &str) -> Option<&str> {
    message
        .strip_prefix("File: \"")?
        .split_once("\" failed ")
        .map(|(name, _)| name)
}

/// Fingerprint that survives changes in the measured numbers: the rule id
/// plus the message up to `, expected:`.
fn fingerprint(rule_id: &str, message: &str) -> String {
    let stable = message
        .split_once(", expected:")
        .map_or(message, |(head, _)| head);
    format!("{}:{}", rule_id, stable)
}

/// Converts findings to SARIF v2.1.0 format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # SARIF Format
///
/// - `tool.driver.name` = "coverage-threshold"
/// - `tool.driver.rules[]` = de-duplicated rule ids, sorted
/// - `results[]` = one entry per finding, in input order
/// - `results[].locations[]` = the failing file, if known
/// - `results[].partialFingerprints["primaryLocation"]` = finding's fingerprint
pub fn to_sarif(findings: &[Finding]) -> Result<String> {
    let mut unique_rules: BTreeMap<String, SarifRule> = BTreeMap::new();
    for finding in findings {
        unique_rules
            .entry(finding.rule_id.clone())
            .or_insert_with(|| SarifRule {
                id: finding.rule_id.clone(),
                name: finding.rule_name.clone(),
            });
    }

    let sarif_log = SarifLog {
        version: "2.1.0",
        schema: "https://json.schemastore.org/sarif-2.1.0.json",
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "coverage-threshold".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules: unique_rules.into_values().collect(),
                },
            },
            results: findings.iter().map(SarifResult::from_finding).collect(),
        }],
    };

    serde_json::to_string_pretty(&sarif_log)
        .map_err(|e| CoverageThresholdError::output_error("SARIF", e))
}

/// Converts findings to JUnit XML format.
///
/// - Each finding becomes a `<testcase>`
/// - Error findings add a `<failure>` element
/// - Note findings produce passing tests
/// - Always writes a valid document, even with zero findings
pub fn to_junit(findings: &[Finding], suite_name: &str) -> Result<String> {
    let testcase_count = findings.len().max(1);
    let failure_count = findings.iter().filter(|f| f.severity.is_error()).count();

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    xml.push_str(&format!(
        "<testsuites name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"0\">",
        escape_xml(suite_name),
        testcase_count,
        failure_count
    ));
    xml.push_str(&format!(
        "<testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"0\">",
        escape_xml(suite_name),
        testcase_count,
        failure_count
    ));

    if findings.is_empty() {
        xml.push_str(&format!(
            "<testcase name=\"{}\" classname=\"{}\"/>",
            escape_xml(suite_name),
            escape_xml(suite_name)
        ));
    }

    for finding in findings {
        let classname = format!("coverage-threshold.{}", finding.rule_id);
        xml.push_str(&format!(
            "<testcase name=\"{}\" classname=\"{}\"",
            escape_xml(&truncate_testcase_name(&finding.message)),
            escape_xml(&classname)
        ));

        match finding.severity {
            Severity::Error => {
                let message = match &finding.location {
                    Some(uri) => format!("{}: {}", uri, finding.message),
                    None => finding.message.clone(),
                };
                xml.push_str(&format!(
                    "><failure message=\"{}\"/></testcase>",
                    escape_xml(&message)
                ));
            }
            Severity::Note => xml.push_str("/>"),
        }
    }

    xml.push_str("</testsuite>");
    xml.push_str("</testsuites>");

    Ok(xml)
}

/// Escapes special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// JUnit parsers may have issues with very long names.
fn truncate_testcase_name(name: &str) -> String {
    if name.chars().count() > 200 {
        let head: String = name.chars().take(197).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

// SARIF types for serialization

#[derive(Debug, Serialize)]
struct SarifLog {
    version: &'static str,
    #[serde(rename = "$schema")]
    schema: &'static str,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rules: Vec<SarifRule>,
}

#[derive(Debug, Serialize)]
struct SarifRule {
    id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    locations: Option<Vec<SarifLocation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "partialFingerprints")]
    partial_fingerprints: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

impl SarifResult {
    fn from_finding(finding: &Finding) -> Self {
        let locations = finding.location.as_ref().map(|uri| {
            vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifactLocation { uri: uri.clone() },
                },
            }]
        });

        let partial_fingerprints = finding.fingerprint.as_ref().map(|fp| {
            let mut map = BTreeMap::new();
            map.insert("primaryLocation".to_string(), fp.clone());
            map
        });

        Self {
            rule_id: finding.rule_id.clone(),
            level: finding.severity.to_sarif_level().to_string(),
            message: SarifMessage {
                text: finding.message.clone(),
            },
            locations,
            partial_fingerprints,
        }
    }
}
