//! Weight concentration measures.

use serde::{Deserialize, Serialize};

/// Concentration of a weight vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationMetrics {
    /// Herfindahl-Hirschman index, Σ(wᵢ/100)².
    pub hhi: f64,

    /// Effective number of holdings, 1/HHI (0 when HHI = 0).
    pub effective_n: f64,

    /// Combined weight of the five largest holdings (%).
    pub top5_weight: f64,

    /// Combined weight of the ten largest holdings (%).
    pub top10_weight: f64,

    /// Largest single weight (%).
    pub largest_weight: f64,
}

/// Computes concentration metrics for weights given in percent.
///
/// Weights are used as supplied (cash excluded, not renormalised).
#[must_use]
pub fn concentration(weights_pct: &[f64]) -> ConcentrationMetrics {
    let mut sorted = weights_pct.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let hhi: f64 = sorted.iter().map(|w| (w / 100.0).powi(2)).sum();
    let effective_n = if hhi > 0.0 { 1.0 / hhi } else { 0.0 };

    ConcentrationMetrics {
        hhi,
        effective_n,
        top5_weight: sorted.iter().take(5).sum(),
        top10_weight: sorted.iter().take(10).sum(),
        largest_weight: sorted.first().copied().unwrap_or(0.0),
    }
}
