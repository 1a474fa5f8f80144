//! Summary command implementation.
//!
//! Headline metrics, concentration, downside horizons and allocation.

use anyhow::Result;
use clap::Args;
use meridian_portfolio::{Allocation, DownsideRisk, HorizonRisk, PortfolioSnapshot};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_pct, print_header, print_json, print_output, print_table, KeyValue};

/// Arguments for the summary command.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Number of top risk contributors to list
    #[arg(short, long, default_value = "5")]
    pub top: usize,

    /// Skip the sector and country tables
    #[arg(long)]
    pub no_allocation: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct DownsideRow {
    #[tabled(rename = "Measure")]
    measure: String,
    #[tabled(rename = "Daily")]
    daily: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Annual")]
    annual: String,
}

#[derive(Debug, Serialize, Tabled)]
struct AllocationRow {
    #[tabled(rename = "Bucket")]
    label: String,
    #[tabled(rename = "Holdings")]
    count: usize,
    #[tabled(rename = "Weight")]
    weight: String,
}

#[derive(Debug, Serialize, Tabled)]
struct ContributorRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Risk Share")]
    risk_share: String,
}

/// Execute the summary command.
pub fn execute(args: SummaryArgs, ctx: &Context) -> Result<()> {
    let dataset = ctx.load_dataset()?;
    let snapshot = PortfolioSnapshot::calculate(&dataset, ctx.analytics())?;

    if ctx.format == OutputFormat::Json {
        return print_json(&snapshot);
    }

    let d = ctx.decimals();
    let metrics = &snapshot.analysis.metrics;
    let meta = dataset.metadata();

    let mut results = vec![
        KeyValue::new("Fund", meta.fund_name.as_deref().unwrap_or("-")),
        KeyValue::new(
            "As Of",
            meta.as_of_date.map_or_else(|| "-".to_string(), |date| date.to_string()),
        ),
        KeyValue::new("Holdings", snapshot.holding_count.to_string()),
        KeyValue::from_amount("AUM", meta.total_aum),
        KeyValue::from_pct("Expected Return", metrics.return_pct(), d),
        KeyValue::from_pct("Volatility", metrics.volatility_pct(), d),
        KeyValue::new("Sharpe Ratio", format!("{:.2}", metrics.sharpe_ratio)),
        KeyValue::from_pct("Risk-Free Rate", metrics.risk_free_rate * 100.0, d),
        KeyValue::new("HHI", format!("{:.4}", snapshot.concentration.hhi)),
        KeyValue::new("Effective N", format!("{:.1}", snapshot.concentration.effective_n)),
        KeyValue::from_pct("Top 5 Weight", snapshot.concentration.top5_weight, d),
        KeyValue::from_pct("Top 10 Weight", snapshot.concentration.top10_weight, d),
    ];
    if let Some(cash) = meta.cash_weight {
        results.push(KeyValue::from_pct("Cash", cash, d));
    }

    if ctx.format == OutputFormat::Csv {
        return print_output(&results, ctx.format);
    }

    print_header("Portfolio Summary");
    print_table(&results)?;

    if let Some(downside) = &snapshot.downside {
        print_header("Downside Risk");
        print_table(&downside_rows(downside, d))?;
    }

    print_header("Top Risk Contributors");
    let contributors: Vec<ContributorRow> = snapshot
        .ranked_contributors(&dataset)
        .into_iter()
        .take(args.top)
        .map(|(h, c)| ContributorRow {
            ticker: h.ticker.clone(),
            name: h.name.clone(),
            weight: format_pct(h.weight, d),
            risk_share: format_pct(c.contribution_pct, d),
        })
        .collect();
    print_table(&contributors)?;

    if !args.no_allocation {
        print_header("Sector Allocation");
        print_table(&allocation_rows(&snapshot.sectors, d))?;
        print_header("Country Allocation");
        print_table(&allocation_rows(&snapshot.countries, d))?;
    }

    Ok(())
}

fn downside_rows(downside: &DownsideRisk, decimals: usize) -> Vec<DownsideRow> {
    let horizon = |measure: &str, h: &HorizonRisk| DownsideRow {
        measure: measure.to_string(),
        daily: format_pct(h.daily, decimals),
        monthly: format_pct(h.monthly, decimals),
        annual: format_pct(h.annual, decimals),
    };

    let mut rows = Vec::new();
    if let Some(var) = &downside.var_95 {
        rows.push(horizon("VaR (95%)", var));
    }
    if let Some(cvar) = &downside.cvar_95 {
        rows.push(horizon("CVaR (95%)", cvar));
    }
    if let Some(mdd) = downside.max_drawdown_pct {
        rows.push(DownsideRow {
            measure: "Max Drawdown".to_string(),
            daily: "-".to_string(),
            monthly: "-".to_string(),
            annual: format_pct(mdd, decimals),
        });
    }
    rows
}

fn allocation_rows(allocation: &Allocation, decimals: usize) -> Vec<AllocationRow> {
    allocation
        .with_cash_bucket()
        .into_iter()
        .map(|b| AllocationRow {
            label: b.label,
            count: b.count,
            weight: format_pct(b.weight_pct, decimals),
        })
        .collect()
}
