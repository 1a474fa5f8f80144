//! CLI error types.

use std::path::PathBuf;

use meridian_portfolio::PortfolioError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Malformed `--set` argument.
    #[error("Invalid override '{0}'. Use TICKER=WEIGHT, e.g. MSFT=4.5.")]
    InvalidOverride(String),

    /// Severity outside the configured range.
    #[error("Severity {value}% is out of range. Must be between {min}% and {max}%.")]
    SeverityOutOfRange {
        /// Requested severity.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Dataset file could not be read.
    #[error("Cannot read dataset {}: {source}", .path.display())]
    DataFile {
        /// Path that was tried.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Dataset rejected by the analytics engine.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
