//! Configuration for portfolio analytics computation.

use serde::{Deserialize, Serialize};

/// Configuration for portfolio analytics computation.
///
/// Holds the thresholds and display limits the analytics use. Every field has
/// a default, so a partial TOML or JSON document deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Annualised risk-free rate (decimal) used when the dataset has none.
    pub default_risk_free_rate: f64,

    /// An override within this distance of the base weight (in % points)
    /// snaps back to the base weight.
    pub snap_epsilon: f64,

    /// Correlations strictly above this value are flagged.
    pub correlation_threshold: f64,

    /// Maximum number of correlated pairs to report.
    pub correlation_top_k: usize,

    /// Number of worst holdings reported per scenario.
    pub top_losers: usize,

    /// Number of best holdings reported per scenario.
    pub top_gainers: usize,

    /// Severity applied when the caller does not choose one (%).
    pub default_severity_pct: f64,

    /// Lower bound for interactive severity selection (%).
    pub min_severity_pct: f64,

    /// Upper bound for interactive severity selection (%).
    pub max_severity_pct: f64,

    /// Home country for FX templates; holdings domiciled here are unshocked.
    pub fx_reference_country: String,

    /// Number of holdings (largest first) offered for what-if adjustment.
    pub adjustable_holdings: usize,

    /// Absolute cap on an adjustable weight (%).
    pub adjustable_max_weight: f64,

    /// Per-holding cap as a multiple of its base weight.
    pub adjustable_weight_multiple: f64,

    /// Slider increment for adjustable weights (%).
    pub adjustable_step: f64,

    /// Tolerance for correlation symmetry and unit-diagonal checks.
    pub matrix_tolerance: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_risk_free_rate: 0.045,
            snap_epsilon: 0.05,
            correlation_threshold: 0.55,
            correlation_top_k: 10,
            top_losers: 5,
            top_gainers: 3,
            default_severity_pct: 100.0,
            min_severity_pct: 10.0,
            max_severity_pct: 200.0,
            fx_reference_country: "United Kingdom".to_string(),
            adjustable_holdings: 15,
            adjustable_max_weight: 20.0,
            adjustable_weight_multiple: 3.0,
            adjustable_step: 0.1,
            matrix_tolerance: 1e-6,
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.default_risk_free_rate = rate;
        self
    }

    /// Sets the override snap distance.
    #[must_use]
    pub fn with_snap_epsilon(mut self, epsilon: f64) -> Self {
        self.snap_epsilon = epsilon;
        self
    }

    /// Sets the correlation threshold and number of pairs reported.
    #[must_use]
    pub fn with_correlation_filter(mut self, threshold: f64, top_k: usize) -> Self {
        self.correlation_threshold = threshold;
        self.correlation_top_k = top_k;
        self
    }

    /// Sets how many losers and gainers each scenario reports.
    #[must_use]
    pub fn with_rankings(mut self, losers: usize, gainers: usize) -> Self {
        self.top_losers = losers;
        self.top_gainers = gainers;
        self
    }

    /// Sets the FX reference country.
    #[must_use]
    pub fn with_fx_reference_country(mut self, country: impl Into<String>) -> Self {
        self.fx_reference_country = country.into();
        self
    }

    /// Sets the matrix validation tolerance.
    #[must_use]
    pub fn with_matrix_tolerance(mut self, tolerance: f64) -> Self {
        self.matrix_tolerance = tolerance;
        self
    }

    /// Returns true if `severity_pct` lies in the interactive range.
    #[must_use]
    pub fn severity_in_range(&self, severity_pct: f64) -> bool {
        (self.min_severity_pct..=self.max_severity_pct).contains(&severity_pct)
    }

    /// Upper slider bound for a holding with the given base weight.
    #[must_use]
    pub fn adjustable_cap(&self, base_weight: f64) -> f64 {
        (base_weight * self.adjustable_weight_multiple).min(self.adjustable_max_weight)
    }
}
