//! Stress impact calculations.
//!
//! ## Formula
//!
//! ```text
//! scale      = severity / 100
//! shock_h    = rule(h) × scale / 100                 (decimal)
//! weighted_h = shock_h × weight_h                    (% of portfolio)
//! total      = Σ weighted_h
//! dollar     = AUM × |total| / 100
//! sensitivity = total / (headline × severity / 100)  (0 when denominator = 0)
//! ```

use super::scenarios::ScenarioTemplate;
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{AnalyticsConfig, Dataset};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scenario impact on one holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingImpact {
    /// Holding index in dataset order.
    pub index: usize,
    /// Ticker.
    pub ticker: String,
    /// Issuer name.
    pub name: String,
    /// Sector.
    pub sector: String,
    /// Country.
    pub country: String,
    /// Base weight (%).
    pub weight: f64,
    /// Scaled shock to the holding's price (%).
    pub shock_pct: f64,
    /// Contribution to portfolio impact (%).
    pub weighted_impact_pct: f64,
}

/// Result of a stress test on a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario name.
    pub scenario_name: String,

    /// Severity the scenario was evaluated at (%).
    pub severity_pct: f64,

    /// Portfolio impact (%).
    pub total_impact_pct: f64,

    /// Absolute impact in fund currency.
    pub dollar_impact: Decimal,

    /// Portfolio impact per 1% move in the headline shock variable.
    pub sensitivity: f64,

    /// Per-holding impacts in dataset order.
    pub impacts: Vec<HoldingImpact>,

    /// Worst contributors, most negative first.
    pub losers: Vec<HoldingImpact>,

    /// Best contributors, most positive first.
    pub gainers: Vec<HoldingImpact>,
}

impl ScenarioResult {
    /// Returns true if this is a gain.
    #[must_use]
    pub fn is_gain(&self) -> bool {
        self.total_impact_pct > 0.0
    }

    /// Returns true if this is a loss.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.total_impact_pct < 0.0
    }

    /// Fund currency equivalent of the per-1% sensitivity.
    #[must_use]
    pub fn sensitivity_amount(&self, total_aum: Decimal) -> Decimal {
        scaled_amount(total_aum, self.sensitivity)
    }
}

/// `total_aum × |pct| / 100`, saturating at `Decimal::MAX` when the product
/// leaves the decimal range.
fn scaled_amount(total_aum: Decimal, pct: f64) -> Decimal {
    Decimal::from_f64(pct.abs())
        .and_then(|p| total_aum.checked_mul(p))
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .map_or_else(
            || {
                debug!(pct, "currency amount out of decimal range, saturated");
                Decimal::MAX
            },
            |v| v.round_dp(2),
        )
}

/// Evaluates a scenario at the given severity.
///
/// # Errors
///
/// Returns `InvalidSeverity` if `severity_pct` is not finite.
pub fn evaluate_scenario(
    dataset: &Dataset,
    template: &ScenarioTemplate,
    severity_pct: f64,
    config: &AnalyticsConfig,
) -> PortfolioResult<ScenarioResult> {
    if !severity_pct.is_finite() {
        return Err(PortfolioError::InvalidSeverity {
            value: severity_pct,
        });
    }
    let scale = severity_pct / 100.0;

    let impacts: Vec<HoldingImpact> = dataset
        .holdings()
        .iter()
        .enumerate()
        .map(|(index, h)| {
            let shock = template.rule.shock_for(h) * scale / 100.0;
            HoldingImpact {
                index,
                ticker: h.ticker.clone(),
                name: h.name.clone(),
                sector: h.sector.clone(),
                country: h.country.clone(),
                weight: h.weight,
                shock_pct: shock * 100.0,
                weighted_impact_pct: shock * h.weight,
            }
        })
        .collect();

    let total_impact_pct: f64 = impacts.iter().map(|i| i.weighted_impact_pct).sum();

    let effective_shock = template.headline_shock * severity_pct / 100.0;
    let sensitivity = if effective_shock == 0.0 {
        0.0
    } else {
        total_impact_pct / effective_shock
    };

    let mut losers: Vec<HoldingImpact> = impacts
        .iter()
        .filter(|i| i.weighted_impact_pct < 0.0)
        .cloned()
        .collect();
    losers.sort_by(|a, b| a.weighted_impact_pct.total_cmp(&b.weighted_impact_pct));
    losers.truncate(config.top_losers);

    let mut gainers: Vec<HoldingImpact> = impacts
        .iter()
        .filter(|i| i.weighted_impact_pct > 0.0)
        .cloned()
        .collect();
    gainers.sort_by(|a, b| b.weighted_impact_pct.total_cmp(&a.weighted_impact_pct));
    gainers.truncate(config.top_gainers);

    debug!(
        scenario = %template.name,
        severity_pct,
        total_impact_pct,
        "evaluated stress scenario"
    );

    Ok(ScenarioResult {
        scenario_name: template.name.clone(),
        severity_pct,
        total_impact_pct,
        dollar_impact: scaled_amount(dataset.metadata().total_aum, total_impact_pct),
        sensitivity,
        impacts,
        losers,
        gainers,
    })
}

/// One row of a multi-scenario comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    /// Scenario name.
    pub scenario_name: String,
    /// Severity used (%).
    pub severity_pct: f64,
    /// Portfolio impact (%).
    pub total_impact_pct: f64,
    /// True for the selected scenario.
    pub active: bool,
}

/// Evaluates every template; the active one at `severity_pct`, the rest at
/// 100%.
///
/// # Errors
///
/// Returns `InvalidSeverity` if `severity_pct` is not finite.
pub fn compare_scenarios(
    dataset: &Dataset,
    templates: &[ScenarioTemplate],
    active: &str,
    severity_pct: f64,
    config: &AnalyticsConfig,
) -> PortfolioResult<Vec<ScenarioComparison>> {
    templates
        .iter()
        .map(|t| {
            let is_active = t.name == active;
            let severity = if is_active { severity_pct } else { 100.0 };
            let result = evaluate_scenario(dataset, t, severity, config)?;
            Ok(ScenarioComparison {
                scenario_name: result.scenario_name,
                severity_pct: severity,
                total_impact_pct: result.total_impact_pct,
                active: is_active,
            })
        })
        .collect()
}

/// Evaluates every template at the same severity, none marked active.
///
/// # Errors
///
/// Returns `InvalidSeverity` if `severity_pct` is not finite.
pub fn compare_at_severity(
    dataset: &Dataset,
    templates: &[ScenarioTemplate],
    severity_pct: f64,
    config: &AnalyticsConfig,
) -> PortfolioResult<Vec<ScenarioComparison>> {
    templates
        .iter()
        .map(|t| {
            let result = evaluate_scenario(dataset, t, severity_pct, config)?;
            Ok(ScenarioComparison {
                scenario_name: result.scenario_name,
                severity_pct,
                total_impact_pct: result.total_impact_pct,
                active: false,
            })
        })
        .collect()
}

/// Finds a template by name, ignoring case.
///
/// # Errors
///
/// Returns `UnknownScenario` if no template matches.
pub fn find_template<'a>(
    templates: &'a [ScenarioTemplate],
    name: &str,
) -> PortfolioResult<&'a ScenarioTemplate> {
    templates
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| PortfolioError::UnknownScenario {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stress::{standard, ShockRule};
    use crate::types::{FundMetadata, Holding};
    use approx::assert_relative_eq;
    use meridian_math::CorrelationMatrix;
    use rust_decimal_macros::dec;

    fn dataset(holdings: Vec<Holding>, aum: Decimal) -> Dataset {
        let n = holdings.len();
        let metadata = FundMetadata {
            total_aum: aum,
            ..FundMetadata::default()
        };
        Dataset::new(holdings, CorrelationMatrix::identity(n), metadata).unwrap()
    }

    fn mixed() -> Dataset {
        dataset(
            vec![
                Holding::new("MSFT", "Microsoft", 40.0)
                    .with_sector("Technology")
                    .with_country("United States"),
                Holding::new("V", "Visa", 35.0)
                    .with_sector("Financials")
                    .with_country("United States"),
                Holding::new("ULVR", "Unilever", 25.0)
                    .with_sector("Consumer Staples")
                    .with_country("United Kingdom"),
            ],
            dec!(1000000),
        )
    }

    #[test]
    fn test_uniform_single_holding() {
        let ds = dataset(vec![Holding::new("A", "A", 100.0)], dec!(0));
        let r = evaluate_scenario(
            &ds,
            &standard::global_recession(),
            100.0,
            &AnalyticsConfig::default(),
        )
        .unwrap();
        assert_relative_eq!(r.total_impact_pct, -15.0, epsilon = 1e-12);
        assert_relative_eq!(r.sensitivity, -1.0, epsilon = 1e-12);
        assert!(r.is_loss());
    }

    #[test]
    fn test_fx_home_and_foreign() {
        let ds = dataset(
            vec![
                Holding::new("H", "Home", 30.0).with_country("United Kingdom"),
                Holding::new("F", "Foreign", 70.0).with_country("United States"),
            ],
            dec!(0),
        );
        let r = evaluate_scenario(
            &ds,
            &standard::gbp_strengthens("United Kingdom"),
            100.0,
            &AnalyticsConfig::default(),
        )
        .unwrap();
        assert_relative_eq!(r.total_impact_pct, -6.37, epsilon = 1e-9);
        assert_eq!(r.impacts[0].shock_pct, 0.0);
    }

    #[test]
    fn test_severity_scaling_and_dollars() {
        let ds = mixed();
        let config = AnalyticsConfig::default();
        let base = evaluate_scenario(&ds, &standard::tech_selloff(), 100.0, &config).unwrap();
        let double = evaluate_scenario(&ds, &standard::tech_selloff(), 200.0, &config).unwrap();

        assert_relative_eq!(base.total_impact_pct, -8.0, epsilon = 1e-12);
        assert_relative_eq!(double.total_impact_pct, -16.0, epsilon = 1e-12);
        // Sensitivity is independent of severity for linear rules.
        assert_relative_eq!(base.sensitivity, -0.4, epsilon = 1e-12);
        assert_relative_eq!(double.sensitivity, -0.4, epsilon = 1e-12);
        assert_eq!(base.dollar_impact, dec!(80000));
        assert_eq!(base.sensitivity_amount(dec!(1000000)), dec!(4000));
    }

    #[test]
    fn test_rankings() {
        let ds = mixed();
        let r = evaluate_scenario(
            &ds,
            &standard::rates_shock(),
            100.0,
            &AnalyticsConfig::default(),
        )
        .unwrap();

        let losers: Vec<_> = r.losers.iter().map(|i| i.ticker.as_str()).collect();
        assert_eq!(losers, ["MSFT", "ULVR"]);
        assert_eq!(r.gainers.len(), 1);
        assert_eq!(r.gainers[0].ticker, "V");
        assert_relative_eq!(r.total_impact_pct, -3.2 + 1.75 - 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_extreme_severity_saturates_amounts() {
        let ds = mixed();
        let config = AnalyticsConfig::default();

        let r = evaluate_scenario(&ds, &standard::tech_selloff(), 1e25, &config).unwrap();
        assert!(r.total_impact_pct < 0.0);
        assert_eq!(r.dollar_impact, Decimal::MAX);

        // Beyond the range Decimal can represent at all.
        let r = evaluate_scenario(&ds, &standard::tech_selloff(), 1e300, &config).unwrap();
        assert_eq!(r.dollar_impact, Decimal::MAX);

        let base = evaluate_scenario(&ds, &standard::tech_selloff(), 100.0, &config).unwrap();
        let amount = base.sensitivity_amount(Decimal::MAX);
        assert!(amount > Decimal::ZERO && amount < Decimal::MAX);
    }

    #[test]
    fn test_ranking_limits() {
        let holdings = (0..8_u32)
            .map(|i| Holding::new(format!("T{i}"), "n", 1.0 + f64::from(i)))
            .collect();
        let ds = dataset(holdings, dec!(0));
        let config = AnalyticsConfig::default().with_rankings(5, 3);
        let r = evaluate_scenario(&ds, &standard::global_recession(), 100.0, &config).unwrap();

        assert_eq!(r.losers.len(), 5);
        assert_eq!(r.losers[0].ticker, "T7");
        assert!(r.gainers.is_empty());
    }

    #[test]
    fn test_zero_headline() {
        let ds = mixed();
        let t = ScenarioTemplate::new("Flat", ShockRule::uniform(-5.0), 0.0);
        let r = evaluate_scenario(&ds, &t, 100.0, &AnalyticsConfig::default()).unwrap();
        assert_eq!(r.sensitivity, 0.0);
    }

    #[test]
    fn test_invalid_severity() {
        let ds = mixed();
        let err = evaluate_scenario(
            &ds,
            &standard::tech_selloff(),
            f64::NAN,
            &AnalyticsConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidSeverity { .. }));
    }

    #[test]
    fn test_idempotent() {
        let ds = mixed();
        let config = AnalyticsConfig::default();
        let t = standard::em_crisis();
        let a = evaluate_scenario(&ds, &t, 137.0, &config).unwrap();
        let b = evaluate_scenario(&ds, &t, 137.0, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_compare_scenarios() {
        let ds = mixed();
        let config = AnalyticsConfig::default();
        let templates = standard::all("United Kingdom");
        let rows = compare_scenarios(&ds, &templates, "Tech Selloff", 50.0, &config).unwrap();

        assert_eq!(rows.len(), 5);
        assert!(rows[0].active);
        assert_eq!(rows[0].severity_pct, 50.0);
        assert_relative_eq!(rows[0].total_impact_pct, -4.0, epsilon = 1e-12);
        assert!(rows[1..].iter().all(|r| !r.active && r.severity_pct == 100.0));
        assert_relative_eq!(rows[1].total_impact_pct, -15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_compare_at_severity() {
        let ds = mixed();
        let config = AnalyticsConfig::default();
        let templates = standard::all("United Kingdom");
        let rows = compare_at_severity(&ds, &templates, 200.0, &config).unwrap();

        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| !r.active && r.severity_pct == 200.0));
        assert_eq!(rows[1].scenario_name, "Global Recession");
        assert_relative_eq!(rows[1].total_impact_pct, -30.0, epsilon = 1e-12);
        assert!(compare_at_severity(&ds, &templates, f64::NAN, &config).is_err());
    }

    #[test]
    fn test_find_template() {
        let templates = standard::all("United Kingdom");
        assert_eq!(find_template(&templates, "em crisis").unwrap().name, "EM Crisis");
        assert!(matches!(
            find_template(&templates, "Meteor"),
            Err(PortfolioError::UnknownScenario { .. })
        ));
    }
}
