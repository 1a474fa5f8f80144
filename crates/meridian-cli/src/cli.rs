//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::commands::{
    ConfigArgs, CorrelationArgs, RiskArgs, ScenarioArgs, SummaryArgs, WhatIfArgs,
};

/// Meridian - Equity portfolio risk analytics CLI
#[derive(Parser)]
#[command(name = "meridian")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the config file setting, then table)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Portfolio dataset produced by the data pipeline
    #[arg(short, long, env = "MERIDIAN_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "MERIDIAN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Portfolio metrics, concentration, downside risk and allocation
    Summary(SummaryArgs),

    /// Per-holding contribution to portfolio volatility
    Risk(RiskArgs),

    /// Reweight holdings and compare against the baseline
    WhatIf(WhatIfArgs),

    /// Run stress scenarios
    Scenario(ScenarioArgs),

    /// Highly correlated holding pairs
    Correlation(CorrelationArgs),

    /// Inspect and create configuration files
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
