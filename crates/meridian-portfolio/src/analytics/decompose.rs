//! Volatility decomposition into per-holding contributions.
//!
//! ```text
//! MCTRᵢ = (Σw)ᵢ / σ            (0 when σ = 0)
//! CTRᵢ  = wᵢ × MCTRᵢ
//! RC%ᵢ  = CTRᵢ / ΣCTR × 100    (0 when ΣCTR = 0)
//! ```
//!
//! The CTRs sum to σ, so the percentages sum to 100 whenever σ > 0.

use crate::error::{PortfolioError, PortfolioResult};
use meridian_math::CovarianceMatrix;
use serde::{Deserialize, Serialize};

/// Contribution of one holding to portfolio volatility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskContribution {
    /// Holding index in dataset order.
    pub index: usize,

    /// Normalised weight (decimal).
    pub weight: f64,

    /// Marginal contribution to risk, ∂σ/∂wᵢ.
    pub mctr: f64,

    /// Contribution to risk, wᵢ × MCTRᵢ.
    pub ctr: f64,

    /// Share of total risk (0-100).
    pub contribution_pct: f64,
}

impl RiskContribution {
    /// Risk share minus weight share, in percentage points.
    ///
    /// Positive values mark holdings that drive more risk than their capital
    /// allocation suggests.
    #[must_use]
    pub fn excess_risk_pct(&self) -> f64 {
        self.contribution_pct - self.weight * 100.0
    }
}

/// Per-holding volatility decomposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDecomposition {
    /// Contributions in dataset order.
    pub contributions: Vec<RiskContribution>,

    /// Sum of CTRs (equals portfolio volatility when σ > 0).
    pub total_ctr: f64,
}

impl RiskDecomposition {
    /// Contribution percentages in dataset order.
    #[must_use]
    pub fn contribution_pcts(&self) -> Vec<f64> {
        self.contributions.iter().map(|c| c.contribution_pct).collect()
    }

    /// Sum of contribution percentages (100 when σ > 0, else 0).
    #[must_use]
    pub fn total_pct(&self) -> f64 {
        self.contributions.iter().map(|c| c.contribution_pct).sum()
    }

    /// The `n` largest contributors, by risk share descending.
    #[must_use]
    pub fn top_contributors(&self, n: usize) -> Vec<&RiskContribution> {
        let mut sorted: Vec<_> = self.contributions.iter().collect();
        sorted.sort_by(|a, b| b.contribution_pct.total_cmp(&a.contribution_pct));
        sorted.truncate(n);
        sorted
    }
}

/// Decomposes portfolio volatility.
///
/// `weights` are normalised decimals and `volatility` is the portfolio σ they
/// produce (see [`aggregate`](super::aggregate)).
///
/// # Errors
///
/// Returns `DimensionMismatch` if `weights.len()` differs from the
/// covariance size.
pub fn decompose(
    weights: &[f64],
    covariance: &CovarianceMatrix,
    volatility: f64,
) -> PortfolioResult<RiskDecomposition> {
    if covariance.size() != weights.len() {
        return Err(PortfolioError::dimension_mismatch(
            "covariance matrix",
            weights.len(),
            covariance.size(),
        ));
    }

    let sigma_w = covariance.times(weights)?;
    let mctr: Vec<f64> = sigma_w
        .iter()
        .map(|s| if volatility > 0.0 { s / volatility } else { 0.0 })
        .collect();
    let ctr: Vec<f64> = weights.iter().zip(&mctr).map(|(w, m)| w * m).collect();
    let total_ctr: f64 = ctr.iter().sum();

    let contributions = weights
        .iter()
        .zip(mctr.iter().zip(&ctr))
        .enumerate()
        .map(|(index, (weight, (mctr, ctr)))| RiskContribution {
            index,
            weight: *weight,
            mctr: *mctr,
            ctr: *ctr,
            contribution_pct: if total_ctr > 0.0 {
                ctr / total_ctr * 100.0
            } else {
                0.0
            },
        })
        .collect();

    Ok(RiskDecomposition {
        contributions,
        total_ctr,
    })
}
