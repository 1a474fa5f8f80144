//! CLI command implementations.

pub mod config;
pub mod correlation;
pub mod risk;
pub mod scenario;
pub mod summary;
pub mod whatif;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use correlation::CorrelationArgs;
pub use risk::RiskArgs;
pub use scenario::ScenarioArgs;
pub use summary::SummaryArgs;
pub use whatif::WhatIfArgs;

use std::path::PathBuf;

use meridian_portfolio::{AnalyticsConfig, Dataset};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::config::{CliConfig, DEFAULT_DATA_FILE};
use crate::error::{CliError, CliResult};

/// Settings shared by every command.
#[derive(Debug)]
pub struct Context {
    /// Resolved dataset path.
    pub data_path: PathBuf,
    /// Resolved output format.
    pub format: OutputFormat,
    /// Loaded configuration.
    pub config: CliConfig,
}

impl Context {
    /// Resolves flags against the config file. Command-line values win.
    pub fn new(data: Option<PathBuf>, format: Option<OutputFormat>, config: CliConfig) -> Self {
        let data_path = data
            .or_else(|| config.dataset.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        let format = format.unwrap_or(config.output.format);
        Self {
            data_path,
            format,
            config,
        }
    }

    /// Analytics thresholds.
    pub fn analytics(&self) -> &AnalyticsConfig {
        &self.config.analytics
    }

    /// Decimal places for percentages.
    pub fn decimals(&self) -> usize {
        self.config.output.decimals
    }

    /// Reads and validates the dataset.
    pub fn load_dataset(&self) -> CliResult<Dataset> {
        let json = std::fs::read_to_string(&self.data_path).map_err(|source| CliError::DataFile {
            path: self.data_path.clone(),
            source,
        })?;
        let dataset = Dataset::from_json(&json, self.analytics())?;
        debug!(path = %self.data_path.display(), holdings = dataset.len(), "dataset loaded");
        Ok(dataset)
    }
}

/// Parses a `TICKER=WEIGHT` override.
pub fn parse_override(s: &str) -> CliResult<(String, f64)> {
    let (ticker, weight) = s
        .split_once('=')
        .ok_or_else(|| CliError::InvalidOverride(s.to_string()))?;
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Err(CliError::InvalidOverride(s.to_string()));
    }
    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidOverride(s.to_string()))?;
    Ok((ticker.to_string(), weight))
}

/// Validates a severity against the configured range.
pub fn validate_severity(severity: f64, config: &AnalyticsConfig) -> CliResult<f64> {
    if !config.severity_in_range(severity) {
        return Err(CliError::SeverityOutOfRange {
            value: severity,
            min: config.min_severity_pct,
            max: config.max_severity_pct,
        });
    }
    Ok(severity)
}
