//! Portfolio analytics summary.
//!
//! Combines the base-weight metrics, risk decomposition, concentration,
//! allocation and downside horizons in one struct.

use super::{
    aggregate, concentration, decompose, downside_risk, ConcentrationMetrics, DownsideRisk,
    PortfolioMetrics, RiskContribution, RiskDecomposition,
};
use crate::bucketing::{bucket_by_country, bucket_by_sector, Allocation};
use crate::error::PortfolioResult;
use crate::types::{AnalyticsConfig, Dataset, Holding};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Metrics and risk decomposition for one weight vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedAnalysis {
    /// Return, volatility and Sharpe ratio.
    pub metrics: PortfolioMetrics,

    /// Per-holding contributions to volatility.
    pub risk: RiskDecomposition,
}

/// Runs the aggregator and the decomposer over `raw_weights`.
///
/// # Errors
///
/// Returns `DimensionMismatch` if `raw_weights` does not match the dataset
/// and `InvalidWeight` for a negative or non-finite weight.
pub fn analyze_weights(
    dataset: &Dataset,
    raw_weights: &[f64],
    risk_free_rate: f64,
) -> PortfolioResult<WeightedAnalysis> {
    let metrics = aggregate(
        raw_weights,
        &dataset.returns(),
        dataset.covariance(),
        risk_free_rate,
    )?;
    let risk = decompose(&metrics.weights, dataset.covariance(), metrics.volatility)?;
    Ok(WeightedAnalysis { metrics, risk })
}

/// Full analytics for the dataset at its base weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Fund name, if supplied.
    pub fund_name: Option<String>,

    /// Valuation date, if supplied.
    pub as_of_date: Option<NaiveDate>,

    /// Number of holdings.
    pub holding_count: usize,

    /// Base-weight metrics and risk decomposition.
    pub analysis: WeightedAnalysis,

    /// Concentration of the base weights.
    pub concentration: ConcentrationMetrics,

    /// Allocation by sector.
    pub sectors: Allocation,

    /// Allocation by country.
    pub countries: Allocation,

    /// Downside horizons, when the dataset carries daily statistics.
    pub downside: Option<DownsideRisk>,
}

impl PortfolioSnapshot {
    /// Calculates the snapshot.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use meridian_portfolio::prelude::*;
    ///
    /// let config = AnalyticsConfig::default();
    /// let snapshot = PortfolioSnapshot::calculate(&dataset, &config)?;
    /// println!("Volatility: {:.2}%", snapshot.analysis.metrics.volatility_pct());
    /// ```
    ///
    /// # Errors
    ///
    /// Propagates aggregation errors; a validated dataset does not produce
    /// any in practice.
    pub fn calculate(dataset: &Dataset, config: &AnalyticsConfig) -> PortfolioResult<Self> {
        let base_weights = dataset.base_weights();
        let analysis = analyze_weights(dataset, &base_weights, dataset.risk_free_rate(config))?;

        debug!(
            volatility = analysis.metrics.volatility,
            sharpe = analysis.metrics.sharpe_ratio,
            "calculated portfolio snapshot"
        );

        Ok(Self {
            fund_name: dataset.metadata().fund_name.clone(),
            as_of_date: dataset.metadata().as_of_date,
            holding_count: dataset.len(),
            analysis,
            concentration: concentration(&base_weights),
            sectors: bucket_by_sector(dataset),
            countries: bucket_by_country(dataset),
            downside: dataset.downside().map(downside_risk),
        })
    }

    /// Holdings paired with their risk contribution, largest share first.
    #[must_use]
    pub fn ranked_contributors<'a>(
        &'a self,
        dataset: &'a Dataset,
    ) -> Vec<(&'a Holding, &'a RiskContribution)> {
        let holdings = dataset.holdings();
        self.analysis
            .risk
            .top_contributors(holdings.len())
            .into_iter()
            .filter_map(|c| holdings.get(c.index).map(|h| (h, c)))
            .collect()
    }
}
