//! What-if command implementation.
//!
//! Applies weight overrides and compares the result with the baseline.

use anyhow::Result;
use clap::Args;
use meridian_portfolio::{OverrideOutcome, PortfolioMetrics, WhatIfResult, WhatIfSimulator};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{parse_override, Context};
use crate::output::{
    format_pct, format_signed_pct, print_header, print_info, print_json, print_output,
    print_warning,
};

/// Arguments for the what-if command.
#[derive(Args, Debug)]
pub struct WhatIfArgs {
    /// Weight override as TICKER=WEIGHT (repeatable)
    #[arg(short = 's', long = "set", value_name = "TICKER=WEIGHT", value_parser = parse_override)]
    pub overrides: Vec<(String, f64)>,

    /// List the adjustable holdings with their weight bounds
    #[arg(short, long)]
    pub list: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Baseline")]
    baseline: String,
    #[tabled(rename = "What-If")]
    current: String,
    #[tabled(rename = "Change")]
    change: String,
}

#[derive(Debug, Serialize, Tabled)]
struct AdjustableRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Base")]
    base: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Changed")]
    changed: String,
}

/// Execute the what-if command.
pub fn execute(args: WhatIfArgs, ctx: &Context) -> Result<()> {
    let dataset = ctx.load_dataset()?;
    let mut sim = WhatIfSimulator::new(&dataset, ctx.analytics())?;

    for (ticker, weight) in &args.overrides {
        let outcome = sim.set_override_by_ticker(ticker, *weight)?;
        if outcome == OverrideOutcome::Snapped {
            print_warning(&format!(
                "{ticker}: {weight} is within {} of the base weight; override removed",
                ctx.analytics().snap_epsilon
            ));
        }
    }

    let result = sim.evaluate()?;

    if ctx.format == OutputFormat::Json {
        return print_json(&result);
    }

    let rows = comparison_rows(&result, ctx.decimals());
    if ctx.format == OutputFormat::Csv {
        return print_output(&rows, ctx.format);
    }

    print_header("What-If Analysis");
    print_output(&rows, ctx.format)?;
    if !result.has_changes() {
        print_info("No active overrides; showing the baseline.");
    }

    if args.list {
        let d = ctx.decimals();
        let adjustable: Vec<AdjustableRow> = sim
            .adjustable_holdings()
            .into_iter()
            .map(|a| AdjustableRow {
                ticker: a.ticker,
                name: a.name,
                base: format_pct(a.base_weight, d),
                current: format_pct(a.current_weight, d),
                range: format!(
                    "{} - {} (step {})",
                    format_pct(a.min_weight, 1),
                    format_pct(a.max_weight, 1),
                    a.step
                ),
                changed: if a.changed { "*".to_string() } else { String::new() },
            })
            .collect();
        print_header("Adjustable Holdings");
        print_output(&adjustable, ctx.format)?;
    }

    Ok(())
}

fn comparison_rows(result: &WhatIfResult, decimals: usize) -> Vec<ComparisonRow> {
    let base = &result.baseline.metrics;
    let now = &result.current.metrics;
    let pct_row = |metric: &str, f: fn(&PortfolioMetrics) -> f64, delta: f64| ComparisonRow {
        metric: metric.to_string(),
        baseline: format_pct(f(base), decimals),
        current: format_pct(f(now), decimals),
        change: format_signed_pct(delta, decimals),
    };

    vec![
        pct_row("Expected Return", PortfolioMetrics::return_pct, result.deltas.return_pct),
        pct_row(
            "Volatility",
            PortfolioMetrics::volatility_pct,
            result.deltas.volatility_pct,
        ),
        ComparisonRow {
            metric: "Sharpe Ratio".to_string(),
            baseline: format!("{:.2}", base.sharpe_ratio),
            current: format!("{:.2}", now.sharpe_ratio),
            change: format!("{:+.2}", result.deltas.sharpe),
        },
        ComparisonRow {
            metric: "Overrides".to_string(),
            baseline: "0".to_string(),
            current: result.override_count.to_string(),
            change: String::new(),
        },
    ]
}
