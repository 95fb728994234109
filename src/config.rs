//! Threshold configuration.
//!
//! Thresholds live in a `coverage-threshold` table of a TOML file, by default
//! `pyproject.toml`:
//!
//! ```toml
//! [coverage-threshold]
//! total_line_coverage_threshold = 80
//! line_coverage_threshold_for_every_file = "60.0"
//! file_branch_coverage_min = 50
//!
//! [coverage-threshold.modules."src/legacy/"]
//! file_line_coverage_min = 20
//! ```
//!
//! `[tool.coverage-threshold]` is accepted as well. Values may be TOML numbers
//! or strings; a float keeps the scale it was written with.
//!
//! Priority order when running the CLI:
//! 1. CLI arguments (highest priority)
//! 2. Config file values
//! 3. No threshold (lowest priority)

use crate::cli::Cli;
use crate::error::{CoverageThresholdError, Result};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name searched for when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "pyproject.toml";

/// Name of the TOML table holding the thresholds.
pub const CONFIG_TABLE: &str = "coverage-threshold";

/// Threshold overrides for files under one path prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    /// Minimum line coverage for each file in the module.
    #[serde(default, alias = "file-line-coverage-min")]
    pub file_line_coverage_min: Option<Decimal>,

    /// Minimum branch coverage for each file in the module.
    #[serde(default, alias = "file-branch-coverage-min")]
    pub file_branch_coverage_min: Option<Decimal>,
}

/// Global thresholds plus per-module overrides.
///
/// Every threshold is optional; a missing one means the corresponding check
/// is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Minimum line coverage of the report totals.
    #[serde(default, alias = "total-line-coverage-threshold")]
    pub total_line_coverage_threshold: Option<Decimal>,

    /// Minimum line coverage for every file.
    #[serde(default, alias = "line-coverage-threshold-for-every-file")]
    pub line_coverage_threshold_for_every_file: Option<Decimal>,

    /// Minimum branch coverage for every file.
    #[serde(default, alias = "file-branch-coverage-min")]
    pub file_branch_coverage_min: Option<Decimal>,

    /// Overrides keyed by filename prefix, in the order they were written.
    #[serde(default)]
    pub modules: Option<IndexMap<String, ModuleConfig>>,
}

impl Config {
    /// Returns `true` if at least one branch threshold is configured.
    pub fn has_branch_thresholds(&self) -> bool {
        self.file_branch_coverage_min.is_some()
            || self
                .modules
                .iter()
                .flat_map(|modules| modules.values())
                .any(|module| module.file_branch_coverage_min.is_some())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default, rename = "coverage-threshold")]
    coverage_threshold: Option<Config>,
    #[serde(default)]
    tool: Option<ToolTable>,
}

#[derive(Debug, Default, Deserialize)]
struct ToolTable {
    #[serde(default, rename = "coverage-threshold")]
    coverage_threshold: Option<Config>,
}

/// Parses thresholds out of the text of a TOML file.
///
/// Other tables (a whole `pyproject.toml`, say) are ignored. A file without a
/// `coverage-threshold` table yields the default, empty configuration.
pub fn parse_config(content: &str) -> Result<Config> {
    let file: ConfigFile = toml::from_str(content)?;
    match (file.coverage_threshold, file.tool.and_then(|t| t.coverage_threshold)) {
        (Some(_), Some(_)) => Err(CoverageThresholdError::config_error(format!(
            "both `[{table}]` and `[tool.{table}]` are present; keep only one",
            table = CONFIG_TABLE
        ))),
        (Some(config), None) | (None, Some(config)) => Ok(config),
        (None, None) => Ok(Config::default()),
    }
}

/// Load configuration from a specific file path.
///
/// Returns `Ok(None)` if the file doesn't exist, and an error if the file
/// exists but cannot be parsed.
pub fn load_config_from_path(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        CoverageThresholdError::io_error_with_source("read config file", path.to_path_buf(), e)
    })?;
    let config = parse_config(&content).map_err(|e| e.with_path(path.to_path_buf()))?;

    Ok(Some(config))
}

/// Searches the current directory and its parents for [`DEFAULT_CONFIG_FILE`].
pub fn discover_and_load_config() -> Result<Option<(PathBuf, Config)>> {
    let mut current_dir = std::env::current_dir()?;

    loop {
        let config_path = current_dir.join(DEFAULT_CONFIG_FILE);
        if let Some(config) = load_config_from_path(&config_path)? {
            return Ok(Some((config_path, config)));
        }

        if !current_dir.pop() {
            break;
        }
    }

    Ok(None)
}

/// Load configuration from a specified path or discover it.
///
/// An explicitly given path must exist.
pub fn load_config(config_path: Option<&Path>) -> Result<Option<(PathBuf, Config)>> {
    let Some(path) = config_path else {
        return discover_and_load_config();
    };

    match load_config_from_path(path)? {
        Some(config) => Ok(Some((path.to_path_buf(), config))),
        None => Err(CoverageThresholdError::config_error_with_path(
            "config file not found",
            path.to_path_buf(),
        )),
    }
}

/// Merges CLI thresholds over config file values.
///
/// Thresholds given on the command line win; module overrides can only come
/// from the file.
pub fn merge_check_args(cli_args: &Cli, config: &Config) -> Config {
    Config {
        total_line_coverage_threshold: cli_args
            .total_line_coverage_threshold
            .or(config.total_line_coverage_threshold),
        line_coverage_threshold_for_every_file: cli_args
            .line_coverage_threshold_for_every_file
            .or(config.line_coverage_threshold_for_every_file),
        file_branch_coverage_min: cli_args
            .file_branch_coverage_min
            .or(config.file_branch_coverage_min),
        modules: config.modules.clone(),
    }
}
