//! Correlation command implementation.

use anyhow::Result;
use clap::Args;
use meridian_portfolio::correlated_pairs;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_pct, print_header, print_info, print_output};

/// Arguments for the correlation command.
#[derive(Args, Debug)]
pub struct CorrelationArgs {
    /// Report pairs with correlation strictly above this value
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Maximum number of pairs
    #[arg(short = 'n', long)]
    pub top: Option<usize>,
}

#[derive(Debug, Serialize, Tabled)]
struct PairRow {
    #[tabled(rename = "Pair")]
    label: String,
    #[tabled(rename = "Tickers")]
    tickers: String,
    #[tabled(rename = "Correlation")]
    correlation: String,
    #[tabled(rename = "Combined Weight")]
    combined_weight: String,
    #[tabled(rename = "Same Sector")]
    same_sector: String,
}

/// Execute the correlation command.
pub fn execute(args: CorrelationArgs, ctx: &Context) -> Result<()> {
    let dataset = ctx.load_dataset()?;
    let config = ctx.analytics();
    let threshold = args.threshold.unwrap_or(config.correlation_threshold);
    let top = args.top.unwrap_or(config.correlation_top_k);

    let holdings = dataset.holdings();
    let rows: Vec<PairRow> = correlated_pairs(&dataset, threshold, top)
        .into_iter()
        .map(|p| PairRow {
            tickers: format!("{}/{}", holdings[p.first].ticker, holdings[p.second].ticker),
            label: p.label,
            correlation: format!("{:.2}", p.correlation),
            combined_weight: format_pct(p.combined_weight, ctx.decimals()),
            same_sector: if p.same_sector { "Yes" } else { "No" }.to_string(),
        })
        .collect();

    if ctx.format == OutputFormat::Table {
        print_header("Highly Correlated Pairs");
        if rows.is_empty() {
            print_info(&format!("No pairs with correlation above {threshold}."));
            return Ok(());
        }
    }

    print_output(&rows, ctx.format)
}
