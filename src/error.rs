//! Error types for coverage-threshold.
//!
//! Threshold failures are not errors: they are reported through
//! [`CheckResult`](crate::check_result::CheckResult). The variants here cover
//! the fatal cases around the check: an unreadable or malformed coverage
//! report, a broken configuration file, or output that cannot be rendered.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// The main error type for coverage-threshold operations.
#[derive(Debug)]
pub enum CoverageThresholdError {
    /// The coverage report could not be parsed.
    ParseError {
        /// The report file that failed to parse.
        file: Option<PathBuf>,
        /// Context about what was being parsed.
        context: String,
        /// The underlying error.
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error occurred during file system operations.
    IoError {
        /// The operation being performed.
        operation: String,
        /// The path involved in the error.
        path: Option<PathBuf>,
        /// The underlying IO error.
        source: Option<io::Error>,
    },

    /// An error occurred while loading or parsing configuration.
    ConfigError {
        /// Description of the configuration issue.
        message: String,
        /// The config file path, if applicable.
        path: Option<PathBuf>,
        /// The underlying error.
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The results could not be rendered in the requested output format.
    OutputError {
        /// The output format being rendered.
        format: String,
        /// The underlying serialization error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CoverageThresholdError {
    /// Creates a new `ParseError` for a specific report file, keeping the
    /// underlying deserialization error as the source.
    pub fn parse_error_with_file(
        file: PathBuf,
        context: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ParseError {
            file: Some(file),
            context: context.into(),
            source,
        }
    }

    /// Creates a new `IoError` with a path and underlying error.
    pub fn io_error_with_source(
        operation: impl Into<String>,
        path: PathBuf,
        source: io::Error,
    ) -> Self {
        Self::IoError {
            operation: operation.into(),
            path: Some(path),
            source: Some(source),
        }
    }

    /// Creates a new `ConfigError` with the given message.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Creates a new `ConfigError` attached to a config file.
    pub fn config_error_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::ConfigError {
            message: message.into(),
            path: Some(path),
            source: None,
        }
    }

    /// Creates a new `OutputError` for the given format.
    ///
    /// # Examples
    /// ```
    /// use coverage_threshold::error::CoverageThresholdError;
    ///
    /// let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    /// let err = CoverageThresholdError::output_error("SARIF", source);
    /// assert_eq!(err.name(), "OutputError");
    /// ```
    pub fn output_error(
        format: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::OutputError {
            format: format.into(),
            source: Box::new(source),
        }
    }

    /// Attaches a path to errors that carry one and do not have it yet.
    #[must_use]
    pub fn with_path(mut self, new_path: PathBuf) -> Self {
        match &mut self {
            Self::ParseError { file: p, .. }
            | Self::IoError { path: p, .. }
            | Self::ConfigError { path: p, .. } => {
                if p.is_none() {
                    *p = Some(new_path);
                }
            }
            Self::OutputError { .. } => {}
        }
        self
    }

    /// Returns the name of the error variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ParseError { .. } => "ParseError",
            Self::IoError { .. } => "IoError",
            Self::ConfigError { .. } => "ConfigError",
            Self::OutputError { .. } => "OutputError",
        }
    }

    /// Returns suggested recovery actions for the error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ParseError { .. } => vec![
                "Regenerate the report with `coverage json`".to_string(),
                "Check that the report contains `files`, `totals` and `meta`".to_string(),
            ],
            Self::IoError { operation, .. } => {
                let mut s = vec![
                    "Check that the path exists and is accessible".to_string(),
                    "Verify you have the necessary permissions".to_string(),
                ];
                if operation.contains("read") || operation.contains("open") {
                    s.push("Pass the report location with `--coverage-json`".to_string());
                }
                s
            }
            Self::ConfigError { .. } => vec![
                "Check the configuration file syntax".to_string(),
                "Ensure the file is valid TOML format".to_string(),
                "Thresholds must be decimal percentages, e.g. `87.5` or \"87.5\"".to_string(),
            ],
            Self::OutputError { .. } => vec![
                "Try another `--output` format".to_string(),
            ],
        }
    }
}

impl fmt::Display for CoverageThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError { file, context, .. } => {
                if let Some(file) = file {
                    write!(f, "Parse error in '{}': {}", file.display(), context)
                } else {
                    write!(f, "Parse error: {}", context)
                }
            }
            Self::IoError {
                operation, path, ..
            } => {
                if let Some(p) = path {
                    write!(
                        f,
                        "IO error during '{}' at '{}': operation failed",
                        operation,
                        p.display()
                    )
                } else {
                    write!(f, "IO error during '{}': operation failed", operation)
                }
            }
            Self::ConfigError { message, path, .. } => {
                if let Some(p) = path {
                    write!(f, "Configuration error in '{}': {}", p.display(), message)
                } else {
                    write!(f, "Configuration error: {}", message)
                }
            }
            Self::OutputError { format, source } => {
                write!(f, "Failed to render {} output: {}", format, source)
            }
        }
    }
}

impl std::error::Error for CoverageThresholdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ParseError { source, .. } => source.as_ref().map(|s| s.as_ref() as _),
            Self::IoError { source, .. } => source.as_ref().map(|e| e as _),
            Self::ConfigError { source, .. } => source.as_ref().map(|s| s.as_ref() as _),
            Self::OutputError { source, .. } => Some(source.as_ref() as _),
        }
    }
}

impl From<io::Error> for CoverageThresholdError {
    fn from(err: io::Error) -> Self {
        Self::IoError {
            operation: "file operation".to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<toml::de::Error> for CoverageThresholdError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("Failed to parse TOML: {}", err),
            path: None,
            source: Some(Box::new(err)),
        }
    }
}

// JSON is only ever read for coverage reports.
impl From<serde_json::Error> for CoverageThresholdError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            file: None,
            context: format!("Failed to parse coverage JSON: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

/// A type alias for `Result<T, CoverageThresholdError>`.
pub type Result<T> = std::result::Result<T, CoverageThresholdError>;
