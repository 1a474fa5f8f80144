//! Risk command implementation.
//!
//! Lists each holding's marginal and total contribution to volatility.

use anyhow::Result;
use clap::{Args, ValueEnum};
use meridian_portfolio::PortfolioSnapshot;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_pct, format_signed_pct, print_header, print_info, print_output};

/// Arguments for the risk command.
#[derive(Args, Debug)]
pub struct RiskArgs {
    /// Show only the first N rows
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Sort order
    #[arg(short, long, value_enum, default_value = "risk")]
    pub sort: RiskSort,
}

/// Row ordering for the risk table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RiskSort {
    /// Largest share of risk first
    Risk,
    /// Largest weight first
    Weight,
    /// Largest risk share in excess of weight first
    Excess,
}

#[derive(Debug, Serialize, Tabled)]
struct RiskRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Sector")]
    sector: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "MCTR")]
    mctr: String,
    #[tabled(rename = "CTR")]
    ctr: String,
    #[tabled(rename = "Risk Share")]
    risk_share: String,
    #[tabled(rename = "Excess")]
    excess: String,
}

/// Execute the risk command.
pub fn execute(args: RiskArgs, ctx: &Context) -> Result<()> {
    let dataset = ctx.load_dataset()?;
    let snapshot = PortfolioSnapshot::calculate(&dataset, ctx.analytics())?;
    let d = ctx.decimals();

    let mut ranked = snapshot.ranked_contributors(&dataset);
    match args.sort {
        RiskSort::Risk => {}
        RiskSort::Weight => ranked.sort_by(|a, b| b.1.weight.total_cmp(&a.1.weight)),
        RiskSort::Excess => {
            ranked.sort_by(|a, b| b.1.excess_risk_pct().total_cmp(&a.1.excess_risk_pct()));
        }
    }
    if let Some(top) = args.top {
        ranked.truncate(top);
    }

    let rows: Vec<RiskRow> = ranked
        .into_iter()
        .map(|(h, c)| RiskRow {
            ticker: h.ticker.clone(),
            name: h.name.clone(),
            sector: h.sector.clone(),
            weight: format_pct(c.weight * 100.0, d),
            mctr: format!("{:.4}", c.mctr),
            ctr: format!("{:.4}", c.ctr),
            risk_share: format_pct(c.contribution_pct, d),
            excess: format_signed_pct(c.excess_risk_pct(), d),
        })
        .collect();

    if ctx.format == OutputFormat::Table {
        print_header("Risk Contributions");
        print_output(&rows, ctx.format)?;
        let metrics = &snapshot.analysis.metrics;
        if metrics.is_degenerate() {
            print_info("Portfolio volatility is zero; contributions are reported as 0.");
        } else {
            print_info(&format!(
                "Portfolio volatility {}",
                format_pct(metrics.volatility_pct(), d)
            ));
        }
        return Ok(());
    }

    print_output(&rows, ctx.format)
}
