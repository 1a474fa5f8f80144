//! Scenario command implementation.
//!
//! Runs a stress scenario at a chosen severity and compares it with the rest
//! of the library.

use anyhow::Result;
use clap::Args;
use meridian_portfolio::{
    compare_at_severity, compare_scenarios, evaluate_scenario, find_template, stress_scenarios,
    HoldingImpact, ScenarioComparison, ScenarioResult, ScenarioTemplate,
};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{validate_severity, Context};
use crate::output::{
    format_pct, format_signed_pct, print_header, print_info, print_json, print_output, KeyValue,
};

/// Arguments for the scenario command.
#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// Scenario name (case-insensitive). Omit to compare all scenarios.
    pub name: Option<String>,

    /// Severity as a percentage of the base shock
    #[arg(short, long)]
    pub severity: Option<f64>,

    /// List the available scenarios and their assumptions
    #[arg(short, long)]
    pub list: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct TemplateRow {
    #[tabled(rename = "Scenario")]
    name: String,
    #[tabled(rename = "Shocks")]
    unit: String,
    #[tabled(rename = "Assumptions (100%)")]
    assumptions: String,
}

#[derive(Debug, Serialize, Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Scenario")]
    name: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Impact")]
    impact: String,
    #[tabled(rename = "Selected")]
    active: String,
}

#[derive(Debug, Serialize, Tabled)]
struct ImpactRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Shock")]
    shock: String,
    #[tabled(rename = "Contribution")]
    contribution: String,
}

#[derive(Debug, Serialize)]
struct ScenarioReport<'a> {
    magnitude: String,
    assumptions: String,
    description: Option<&'a str>,
    result: &'a ScenarioResult,
    comparison: &'a [ScenarioComparison],
}

/// Execute the scenario command.
pub fn execute(args: ScenarioArgs, ctx: &Context) -> Result<()> {
    let config = ctx.analytics();
    let templates = stress_scenarios::all(&config.fx_reference_country);

    if args.list {
        let rows: Vec<TemplateRow> = templates
            .iter()
            .map(|t| TemplateRow {
                name: t.name.clone(),
                unit: t.unit.clone(),
                assumptions: t.assumptions(),
            })
            .collect();
        if ctx.format == OutputFormat::Table {
            print_header("Stress Scenarios");
        }
        return print_output(&rows, ctx.format);
    }

    let severity = validate_severity(args.severity.unwrap_or(config.default_severity_pct), config)?;
    let dataset = ctx.load_dataset()?;

    let Some(name) = args.name else {
        let comparison = compare_at_severity(&dataset, &templates, severity, config)?;
        if ctx.format == OutputFormat::Json {
            return print_json(&comparison);
        }
        if ctx.format == OutputFormat::Table {
            print_header("Scenario Comparison");
        }
        return print_output(&comparison_rows(&comparison, ctx.decimals()), ctx.format);
    };

    let template = find_template(&templates, &name)?;
    let result = evaluate_scenario(&dataset, template, severity, config)?;
    let comparison = compare_scenarios(&dataset, &templates, &template.name, severity, config)?;

    match ctx.format {
        OutputFormat::Json => print_json(&ScenarioReport {
            magnitude: template.magnitude_label(severity),
            assumptions: template.assumptions(),
            description: template.description.as_deref(),
            result: &result,
            comparison: &comparison,
        }),
        OutputFormat::Csv => print_output(&impact_rows(&result.impacts, ctx.decimals()), ctx.format),
        OutputFormat::Table => print_detail(template, &result, &comparison, ctx),
    }
}

fn print_detail(
    template: &ScenarioTemplate,
    result: &ScenarioResult,
    comparison: &[ScenarioComparison],
    ctx: &Context,
) -> Result<()> {
    let d = ctx.decimals();
    let direction = if result.is_gain() { "Gain" } else { "Loss" };

    print_header(&format!(
        "{} ({})",
        template.name,
        template.magnitude_label(result.severity_pct)
    ));
    if let Some(description) = &template.description {
        println!("{description}");
    }

    let summary = vec![
        KeyValue::new("Assumptions", template.assumptions()),
        KeyValue::new("Portfolio Impact", format_signed_pct(result.total_impact_pct, d)),
        KeyValue::from_amount(format!("Estimated {direction}"), result.dollar_impact),
        KeyValue::new("Sensitivity", format!("{:.3}", result.sensitivity)),
    ];
    print_output(&summary, ctx.format)?;

    print_header("Largest Losses");
    if result.losers.is_empty() {
        print_info("No holdings lose value in this scenario.");
    } else {
        print_output(&impact_rows(&result.losers, d), ctx.format)?;
    }

    if !result.gainers.is_empty() {
        print_header("Largest Gains");
        print_output(&impact_rows(&result.gainers, d), ctx.format)?;
    }

    print_header("All Scenarios");
    print_output(&comparison_rows(comparison, d), ctx.format)
}

fn impact_rows(impacts: &[HoldingImpact], decimals: usize) -> Vec<ImpactRow> {
    impacts
        .iter()
        .map(|i| ImpactRow {
            ticker: i.ticker.clone(),
            name: i.name.clone(),
            weight: format_pct(i.weight, decimals),
            shock: format_signed_pct(i.shock_pct, decimals),
            contribution: format_signed_pct(i.weighted_impact_pct, decimals),
        })
        .collect()
}

fn comparison_rows(comparison: &[ScenarioComparison], decimals: usize) -> Vec<ComparisonRow> {
    comparison
        .iter()
        .map(|c| ComparisonRow {
            name: c.scenario_name.clone(),
            severity: format_pct(c.severity_pct, 0),
            impact: format_signed_pct(c.total_impact_pct, decimals),
            active: if c.active { "*".to_string() } else { String::new() },
        })
        .collect()
}
