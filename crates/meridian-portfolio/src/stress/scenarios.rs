//! Stress scenario definitions.
//!
//! A [`ScenarioTemplate`] pairs a [`ShockRule`] with presentation data: a
//! headline shock used for sensitivity, a unit label and a display mode.

use crate::types::Holding;
use serde::{Deserialize, Serialize};

/// Shocks keyed by sector or country name, in display order (%).
pub type ShockTargets = Vec<(String, f64)>;

/// How a scenario assigns a shock to each holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShockRule {
    /// Shock by sector; unlisted sectors are unaffected.
    Sector {
        /// Shock per sector (%).
        targets: ShockTargets,
    },

    /// Shock by country of domicile; unlisted countries are unaffected.
    Country {
        /// Shock per country (%).
        targets: ShockTargets,
    },

    /// The same shock for every holding (%).
    Uniform {
        /// Shock (%).
        base: f64,
    },

    /// Currency translation shock for holdings outside the reference country.
    Fx {
        /// Shock applied to foreign holdings (%).
        base: f64,
        /// Home country; its holdings are unaffected.
        reference_country: String,
        /// Home currency code, used in descriptions.
        currency: String,
    },
}

impl ShockRule {
    /// Creates a sector rule.
    #[must_use]
    pub fn by_sector(targets: &[(&str, f64)]) -> Self {
        Self::Sector {
            targets: to_targets(targets),
        }
    }

    /// Creates a country rule.
    #[must_use]
    pub fn by_country(targets: &[(&str, f64)]) -> Self {
        Self::Country {
            targets: to_targets(targets),
        }
    }

    /// Creates a uniform rule.
    #[must_use]
    pub fn uniform(base: f64) -> Self {
        Self::Uniform { base }
    }

    /// Creates an FX rule.
    #[must_use]
    pub fn fx(base: f64, reference_country: impl Into<String>, currency: impl Into<String>) -> Self {
        Self::Fx {
            base,
            reference_country: reference_country.into(),
            currency: currency.into(),
        }
    }

    /// Unscaled shock for a holding (%).
    #[must_use]
    pub fn shock_for(&self, holding: &Holding) -> f64 {
        match self {
            Self::Sector { targets } => lookup(targets, &holding.sector),
            Self::Country { targets } => lookup(targets, &holding.country),
            Self::Uniform { base } => *base,
            Self::Fx {
                base,
                reference_country,
                ..
            } => {
                if holding.country == *reference_country {
                    0.0
                } else {
                    *base
                }
            }
        }
    }

    /// Short name of the rule type.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sector { .. } => "sector",
            Self::Country { .. } => "country",
            Self::Uniform { .. } => "all",
            Self::Fx { .. } => "fx",
        }
    }
}

fn to_targets(targets: &[(&str, f64)]) -> ShockTargets {
    targets.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
}

fn lookup(targets: &ShockTargets, key: &str) -> f64 {
    targets
        .iter()
        .find(|(k, _)| k == key)
        .map_or(0.0, |(_, v)| *v)
}

/// How a scenario's severity is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayUnit {
    /// Severity as a percentage of the base scenario.
    #[default]
    Percent,
    /// Severity read as a rate move in basis points.
    BasisPoints,
}

/// A named stress scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTemplate {
    /// Scenario name.
    pub name: String,

    /// Narrative description.
    #[serde(default)]
    pub description: Option<String>,

    /// Label for what is shocked ("Tech sector", "All equities").
    #[serde(default)]
    pub unit: String,

    /// Shock assignment.
    pub rule: ShockRule,

    /// Size of the primary shock variable at 100% severity.
    pub headline_shock: f64,

    /// Severity presentation.
    #[serde(default)]
    pub display: DisplayUnit,
}

impl ScenarioTemplate {
    /// Creates a template.
    #[must_use]
    pub fn new(name: impl Into<String>, rule: ShockRule, headline_shock: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            unit: String::new(),
            rule,
            headline_shock,
            display: DisplayUnit::Percent,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Sets the unit label.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Presents severity in basis points.
    #[must_use]
    pub fn in_basis_points(mut self) -> Self {
        self.display = DisplayUnit::BasisPoints;
        self
    }

    /// Severity label, "100bps" or "100% severity".
    #[must_use]
    pub fn magnitude_label(&self, severity_pct: f64) -> String {
        let rounded = severity_pct.round();
        match self.display {
            DisplayUnit::BasisPoints => format!("{rounded}bps"),
            DisplayUnit::Percent => format!("{rounded}% severity"),
        }
    }

    /// Baseline shocks at 100% severity, as one line of text.
    #[must_use]
    pub fn assumptions(&self) -> String {
        match &self.rule {
            ShockRule::Uniform { base } => format!("{}: {base}%", self.unit),
            ShockRule::Fx { base, currency, .. } => format!(
                "{}: {base}% (assumes {}% {currency} appreciation, and no hedging)",
                self.unit, self.headline_shock
            ),
            ShockRule::Sector { targets } => targets
                .iter()
                .map(|(k, v)| {
                    let sign = if *v > 0.0 { "+" } else { "" };
                    format!("{k}: {sign}{v}%")
                })
                .collect::<Vec<_>>()
                .join(", "),
            ShockRule::Country { targets } => targets
                .iter()
                .map(|(k, v)| format!("{k}: {v}%"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Standard equity stress scenarios.
pub mod standard {
    use super::*;

    /// Technology sector falls 20%.
    #[must_use]
    pub fn tech_selloff() -> ScenarioTemplate {
        ScenarioTemplate::new(
            "Tech Selloff",
            ShockRule::by_sector(&[("Technology", -20.0)]),
            20.0,
        )
        .with_unit("Tech sector")
        .with_description(
            "A sharp correction in technology stocks driven by valuation compression, \
             regulatory action, or a rotation out of growth. Only Technology-classified \
             holdings are shocked.",
        )
    }

    /// All equities fall 15%.
    #[must_use]
    pub fn global_recession() -> ScenarioTemplate {
        ScenarioTemplate::new("Global Recession", ShockRule::uniform(-15.0), 15.0)
            .with_unit("All equities")
            .with_description(
                "A broad-based economic downturn causing a synchronised global equity \
                 sell-off. All holdings receive a uniform drawdown regardless of sector or \
                 geography, a conservative worst-case baseline.",
            )
    }

    /// Rates rise 100bp, shocks differentiated by sector.
    #[must_use]
    pub fn rates_shock() -> ScenarioTemplate {
        ScenarioTemplate::new(
            "Rates Shock",
            ShockRule::by_sector(&[
                ("Technology", -8.0),
                ("Financials", 5.0),
                ("Health Care", -3.0),
                ("Industrials", -4.0),
                ("Consumer Discretionary", -6.0),
                ("Consumer Staples", -2.0),
                ("Communication Services", -5.0),
            ]),
            100.0,
        )
        .with_unit("Rate change (bps)")
        .in_basis_points()
        .with_description(
            "A sudden 100 basis point rise in interest rates. Long-duration growth stocks \
             suffer as higher discount rates compress valuations, while Financials benefit \
             from wider net interest margins.",
        )
    }

    /// Sterling appreciates 10%; foreign holdings lose 9.1% (1 - 1/1.10).
    #[must_use]
    pub fn gbp_strengthens(reference_country: &str) -> ScenarioTemplate {
        ScenarioTemplate::new(
            "GBP Strengthens",
            ShockRule::fx(-9.1, reference_country, "GBP"),
            10.0,
        )
        .with_unit("Non-UK holdings")
        .with_description(
            "Sterling appreciates 10% against all major currencies. Overseas holdings lose \
             value when translated back to sterling: each loses 9.1%, the exact translation \
             effect of a 10% appreciation. Assumes no currency hedging.",
        )
    }

    /// Emerging-market sell-off by country.
    #[must_use]
    pub fn em_crisis() -> ScenarioTemplate {
        ScenarioTemplate::new(
            "EM Crisis",
            ShockRule::by_country(&[
                ("Brazil", -25.0),
                ("Indonesia", -25.0),
                ("India", -20.0),
                ("Taiwan", -10.0),
                ("Hong Kong", -10.0),
            ]),
            25.0,
        )
        .with_unit("EM exposure")
        .with_description(
            "A crisis in emerging markets triggered by capital flight, currency collapse, or \
             geopolitical escalation. Developed market holdings are unaffected.",
        )
    }

    /// Returns all standard scenarios in display order.
    #[must_use]
    pub fn all(reference_country: &str) -> Vec<ScenarioTemplate> {
        vec![
            tech_selloff(),
            global_recession(),
            rates_shock(),
            gbp_strengthens(reference_country),
            em_crisis(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(sector: &str, country: &str) -> Holding {
        Holding::new("X", "X", 1.0)
            .with_sector(sector)
            .with_country(country)
    }

    #[test]
    fn test_shock_dispatch() {
        let h = holding("Technology", "United Kingdom");
        assert_eq!(standard::tech_selloff().rule.shock_for(&h), -20.0);
        assert_eq!(standard::global_recession().rule.shock_for(&h), -15.0);
        assert_eq!(standard::rates_shock().rule.shock_for(&h), -8.0);
        assert_eq!(
            standard::gbp_strengthens("United Kingdom").rule.shock_for(&h),
            0.0
        );
        assert_eq!(standard::em_crisis().rule.shock_for(&h), 0.0);

        let h = holding("Energy", "Brazil");
        assert_eq!(standard::tech_selloff().rule.shock_for(&h), 0.0);
        assert_eq!(
            standard::gbp_strengthens("United Kingdom").rule.shock_for(&h),
            -9.1
        );
        assert_eq!(standard::em_crisis().rule.shock_for(&h), -25.0);
    }

    #[test]
    fn test_assumptions() {
        assert_eq!(standard::global_recession().assumptions(), "All equities: -15%");
        assert_eq!(standard::tech_selloff().assumptions(), "Technology: -20%");
        assert_eq!(
            standard::gbp_strengthens("United Kingdom").assumptions(),
            "Non-UK holdings: -9.1% (assumes 10% GBP appreciation, and no hedging)"
        );
        assert!(standard::rates_shock()
            .assumptions()
            .starts_with("Technology: -8%, Financials: +5%, Health Care: -3%"));
        assert!(standard::em_crisis()
            .assumptions()
            .starts_with("Brazil: -25%, Indonesia: -25%"));
    }

    #[test]
    fn test_magnitude_label() {
        assert_eq!(standard::rates_shock().magnitude_label(100.0), "100bps");
        assert_eq!(standard::tech_selloff().magnitude_label(149.6), "150% severity");
    }

    #[test]
    fn test_library() {
        let all = standard::all("United Kingdom");
        let names: Vec<_> = all.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            ["Tech Selloff", "Global Recession", "Rates Shock", "GBP Strengthens", "EM Crisis"]
        );
        assert!(all.iter().all(|t| t.description.is_some()));
        assert_eq!(all[3].rule.kind(), "fx");
    }

    #[test]
    fn test_template_serde() {
        let t = standard::rates_shock();
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains(r#""type":"sector""#));
        let parsed: ScenarioTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, t);
    }
}
