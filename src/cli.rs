use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// CLI arguments for `coverage-threshold`.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "coverage-threshold",
    version,
    about = "Fail the build if line or branch coverage is below the configured thresholds"
)]
pub struct Cli {
    /// Minimum global average line coverage threshold.
    #[arg(long)]
    pub total_line_coverage_threshold: Option<Decimal>,

    /// Minimum line coverage threshold for every file.
    #[arg(long)]
    pub line_coverage_threshold_for_every_file: Option<Decimal>,

    /// Minimum branch coverage threshold for every file.
    #[arg(long)]
    pub file_branch_coverage_min: Option<Decimal>,

    /// Path to the coverage.py JSON report.
    #[arg(long, default_value = "./coverage.json")]
    pub coverage_json: PathBuf,

    /// TOML file holding a `coverage-threshold` table. Defaults to the
    /// nearest `pyproject.toml`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Write the report to this file instead of stdout.
    #[arg(long)]
    pub output_file: Option<PathBuf>,
}

/// Output formats for the check result.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// "Success!" or "Fail!" followed by each problem.
    Text,
    /// A table of findings.
    Table,
    /// `{"result": bool, "problems": [...]}`.
    Json,
    /// SARIF v2.1.0.
    Sarif,
    /// JUnit XML.
    Junit,
}
