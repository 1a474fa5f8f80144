//! Config command implementation.
//!
//! Shows the effective configuration and writes starter files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{print_header, print_json, print_success, print_warning};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with the default settings
    Init(InitArgs),
}

/// Arguments for the init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination file
    #[arg(default_value = "meridian.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Init(init) => write_defaults(&init),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let mut effective = ctx.config.clone();
    effective.dataset = Some(ctx.data_path.clone());

    if ctx.format == OutputFormat::Json {
        return print_json(&effective);
    }

    print_header("Configuration");
    print!("{}", effective.to_toml()?);
    Ok(())
}

fn write_defaults(args: &InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        print_warning(&format!(
            "{} already exists. Use --force to overwrite.",
            args.path.display()
        ));
        return Ok(());
    }

    std::fs::write(&args.path, CliConfig::default().to_toml()?).map_err(CliError::Io)?;
    print_success(&format!("Wrote {}", args.path.display()));
    Ok(())
}
