//! CLI configuration file.

use std::path::{Path, PathBuf};

use meridian_portfolio::AnalyticsConfig;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Dataset path used when neither `--data` nor the config file names one.
pub const DEFAULT_DATA_FILE: &str = "portfolio_data.json";

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when `--format` is not given.
    pub format: OutputFormat,

    /// Decimal places for percentages.
    pub decimals: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            decimals: 2,
        }
    }
}

/// Top-level CLI configuration, read from TOML.
///
/// ```toml
/// dataset = "data/portfolio_data.json"
///
/// [analytics]
/// correlation_threshold = 0.6
/// fx_reference_country = "United Kingdom"
///
/// [output]
/// format = "table"
/// decimals = 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Dataset path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,

    /// Analytics thresholds and limits.
    pub analytics: AnalyticsConfig,

    /// Output settings.
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&content).map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
    }

    /// Loads `path` if given, else the defaults.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml() {
        let config: CliConfig = toml::from_str(
            r#"
            [analytics]
            correlation_threshold = 0.7

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.analytics.correlation_threshold, 0.7);
        assert_eq!(config.analytics.top_losers, 5);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.decimals, 2);
        assert!(config.dataset.is_none());
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = CliConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: CliConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/meridian.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
