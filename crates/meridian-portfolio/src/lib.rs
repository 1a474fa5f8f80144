//! # Meridian Portfolio
//!
//! Risk analytics for equity portfolios.
//!
//! This crate reconstructs a covariance matrix from the dataset's
//! correlations and volatilities, then answers the questions a portfolio
//! manager asks of it: how risky is the fund, which holdings drive that
//! risk, what happens if weights change, and what a market shock would cost.
//!
//! ## Design Philosophy
//!
//! - **Immutable snapshot**: A [`Dataset`] is validated once at load; no
//!   later call fails on dimensions
//! - **Pure functions**: Analytics take weights and the snapshot and return
//!   plain serde records
//! - **Explicit session state**: What-if overrides live in a
//!   [`WeightOverrides`] value, never inside the holdings
//! - **Zero over NaN**: Every zero-division guard resolves to 0
//!
//! ## Features
//!
//! - **Aggregation**: Return, volatility, Sharpe ratio
//! - **Risk Decomposition**: MCTR, CTR and percentage contribution per holding
//! - **What-If**: Sparse overrides with snapping, deltas against a baseline
//! - **Stress Testing**: Sector, country, uniform and FX shocks scaled by severity
//! - **Correlation**: Highly correlated pairs
//! - **Concentration & Allocation**: HHI, effective N, sector and country buckets
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use meridian_portfolio::prelude::*;
//!
//! let config = AnalyticsConfig::default();
//! let dataset = Dataset::from_json(&json, &config)?;
//!
//! let snapshot = PortfolioSnapshot::calculate(&dataset, &config)?;
//! let stress = evaluate_scenario(&dataset, &stress_scenarios::tech_selloff(), 100.0, &config)?;
//!
//! let mut sim = WhatIfSimulator::new(&dataset, &config)?;
//! sim.set_override_by_ticker("MSFT", 4.0)?;
//! let whatif = sim.evaluate()?;
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Aggregation, risk decomposition, concentration, downside, summary
//! - [`bucketing`] - Allocation by sector and country
//! - [`correlation`] - Highly correlated pairs
//! - [`stress`] - Scenario templates and impact
//! - [`types`] - Holding, Dataset, AnalyticsConfig
//! - [`whatif`] - Override state and the simulator

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod bucketing;
pub mod correlation;
pub mod error;
pub mod stress;
pub mod types;
pub mod whatif;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

// Re-export main types
pub use types::{
    AnalyticsConfig, CorrelationRecord, Dataset, DatasetRecord, DownsideRecord, FundMetadata,
    Holding,
};

// Re-export analytics types and functions
pub use analytics::{
    aggregate, analyze_weights, concentration, decompose, downside_risk, normalize_weights,
    ConcentrationMetrics, DownsideRisk, HorizonRisk, PortfolioMetrics, PortfolioSnapshot,
    RiskContribution, RiskDecomposition, WeightedAnalysis,
};

// Re-export bucketing types and functions
pub use bucketing::{bucket_by_country, bucket_by_sector, Allocation, AllocationBucket};

// Re-export correlation analysis
pub use correlation::{correlated_pairs, high_correlation_pairs, CorrelatedPair};

// Re-export stress testing types and functions
pub use stress::{
    compare_at_severity, compare_scenarios, evaluate_scenario, find_template,
    standard as stress_scenarios,
    DisplayUnit, HoldingImpact, ScenarioComparison, ScenarioResult, ScenarioTemplate, ShockRule,
};

// Re-export what-if types
pub use whatif::{
    AdjustableHolding, OverrideOutcome, WeightOverrides, WhatIfDeltas, WhatIfResult,
    WhatIfSimulator,
};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use meridian_portfolio::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{PortfolioError, PortfolioResult};

    // Data types
    pub use crate::types::{AnalyticsConfig, Dataset, FundMetadata, Holding};

    // Analytics
    pub use crate::analytics::{
        aggregate, analyze_weights, decompose, PortfolioMetrics, PortfolioSnapshot,
        RiskDecomposition, WeightedAnalysis,
    };

    // Bucketing
    pub use crate::bucketing::{bucket_by_country, bucket_by_sector, Allocation};

    // Correlation
    pub use crate::correlation::{high_correlation_pairs, CorrelatedPair};

    // Stress testing
    pub use crate::stress::{
        compare_scenarios, evaluate_scenario, standard as stress_scenarios, ScenarioResult,
        ScenarioTemplate, ShockRule,
    };

    // What-if
    pub use crate::whatif::{WeightOverrides, WhatIfResult, WhatIfSimulator};

    // Re-export commonly used types from dependencies
    pub use meridian_math::{CorrelationMatrix, CovarianceMatrix};
    pub use rust_decimal::Decimal;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_compiles() {
        let err = PortfolioError::EmptyPortfolio;
        assert!(err.to_string().contains("no holdings"));
    }
}
