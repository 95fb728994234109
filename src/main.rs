//! coverage-threshold: fail the build when coverage is below its thresholds.
//!
//! 1. Loads the coverage.py JSON report (`--coverage-json`, default `./coverage.json`).
//! 2. Loads thresholds from `--config`, or the nearest `pyproject.toml`.
//! 3. Lets thresholds given on the command line override the file.
//! 4. Checks every file and the totals, printing each failure.
//! 5. Exits with code 1 if any check failed.
//!
//! USAGE EXAMPLE (after `coverage json`):
//!   coverage-threshold --line-coverage-threshold-for-every-file 80
//!
//! Set `RUST_LOG=coverage_threshold=debug` to see how thresholds were resolved.

use clap::Parser;
use color_eyre::Section;
use color_eyre::eyre::Report;
use coverage_threshold::Cli;
use std::process::ExitCode;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let result = coverage_threshold::run(&cli).map_err(|err| {
        let suggestions = err.suggestions();
        suggestions
            .into_iter()
            .fold(Report::new(err), |report, suggestion| {
                report.suggestion(suggestion)
            })
    })?;

    if result.is_pass() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
