//! Meridian CLI - Command-line interface for portfolio risk analytics.
//!
//! # Usage
//!
//! ```bash
//! # Portfolio overview
//! meridian summary --data portfolio_data.json
//!
//! # Who drives the risk
//! meridian risk --top 10
//!
//! # Reweight and compare against the baseline
//! meridian what-if --set MSFT=4 --set ULVR=12
//!
//! # Stress test
//! meridian scenario "Rates Shock" --severity 150
//!
//! # Highly correlated pairs
//! meridian correlation --threshold 0.6
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use config::CliConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = CliConfig::load(cli.config.as_deref())?;
    let ctx = Context::new(cli.data, cli.format, config);

    match cli.command {
        Commands::Summary(args) => commands::summary::execute(args, &ctx)?,
        Commands::Risk(args) => commands::risk::execute(args, &ctx)?,
        Commands::WhatIf(args) => commands::whatif::execute(args, &ctx)?,
        Commands::Scenario(args) => commands::scenario::execute(args, &ctx)?,
        Commands::Correlation(args) => commands::correlation::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Installs the log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
