//! Portfolio return, volatility and Sharpe ratio.
//!
//! ## Formulas
//!
//! ```text
//! w'         = w / Σw
//! variance   = w'ᵀ Σ w'
//! volatility = √max(0, variance)
//! return     = Σ w'ᵢ rᵢ
//! sharpe     = (return - rf) / volatility      (0 when volatility = 0)
//! ```

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::is_valid_weight;
use meridian_math::CovarianceMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Aggregate statistics for one weight vector.
///
/// Return and volatility are annualised decimals (0.12 for 12%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// Weighted annualised return.
    pub expected_return: f64,

    /// Portfolio variance `w'ᵀΣw'` before clamping.
    pub variance: f64,

    /// Annualised volatility.
    pub volatility: f64,

    /// Sharpe ratio against the supplied risk-free rate.
    pub sharpe_ratio: f64,

    /// Risk-free rate the Sharpe ratio was computed with.
    pub risk_free_rate: f64,

    /// Weights normalised to sum to 1.
    pub weights: Vec<f64>,

    /// Weights normalised to sum to 100.
    pub normalized_weights: Vec<f64>,
}

impl PortfolioMetrics {
    /// Weighted return as a percentage.
    #[must_use]
    pub fn return_pct(&self) -> f64 {
        self.expected_return * 100.0
    }

    /// Volatility as a percentage.
    #[must_use]
    pub fn volatility_pct(&self) -> f64 {
        self.volatility * 100.0
    }

    /// True when volatility is zero; Sharpe and risk contributions are then 0.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.volatility == 0.0
    }
}

/// Normalises weights to sum to 1.
///
/// A vector summing to zero (every position removed) normalises to all
/// zeros rather than dividing by zero.
#[must_use]
pub fn normalize_weights(raw_weights: &[f64]) -> Vec<f64> {
    let total: f64 = raw_weights.iter().sum();
    if total > 0.0 {
        raw_weights.iter().map(|w| w / total).collect()
    } else {
        vec![0.0; raw_weights.len()]
    }
}

/// Computes return, volatility and Sharpe ratio for raw weights.
///
/// `raw_weights` may be on any non-negative scale; `returns` are annualised
/// decimals; `risk_free_rate` is a decimal.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the vectors and the covariance matrix
/// disagree in size, and `InvalidWeight` for a negative or non-finite weight.
pub fn aggregate(
    raw_weights: &[f64],
    returns: &[f64],
    covariance: &CovarianceMatrix,
    risk_free_rate: f64,
) -> PortfolioResult<PortfolioMetrics> {
    let n = raw_weights.len();
    if returns.len() != n {
        return Err(PortfolioError::dimension_mismatch("returns", n, returns.len()));
    }
    if covariance.size() != n {
        return Err(PortfolioError::dimension_mismatch(
            "covariance matrix",
            n,
            covariance.size(),
        ));
    }
    if let Some((i, w)) = raw_weights
        .iter()
        .enumerate()
        .find(|(_, w)| !is_valid_weight(**w))
    {
        return Err(PortfolioError::invalid_weight(i.to_string(), *w));
    }

    let weights = normalize_weights(raw_weights);
    let variance = covariance.variance(&weights)?;
    let volatility = variance.max(0.0).sqrt();
    let expected_return: f64 = weights.iter().zip(returns).map(|(w, r)| w * r).sum();

    let sharpe_ratio = if volatility > 0.0 {
        (expected_return - risk_free_rate) / volatility
    } else {
        debug!("zero portfolio volatility, sharpe ratio set to 0");
        0.0
    };

    let normalized_weights = weights.iter().map(|w| w * 100.0).collect();

    Ok(PortfolioMetrics {
        expected_return,
        variance,
        volatility,
        sharpe_ratio,
        risk_free_rate,
        weights,
        normalized_weights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use meridian_math::CorrelationMatrix;
    use nalgebra::DMatrix;

    fn two_asset_cov() -> CovarianceMatrix {
        let corr = CorrelationMatrix::from_rows(&[vec![1.0, 0.5], vec![0.5, 1.0]], 1e-9).unwrap();
        CovarianceMatrix::from_correlation(&corr, &[0.2, 0.1]).unwrap()
    }

    #[test]
    fn test_normalize_weights() {
        let w = normalize_weights(&[30.0, 10.0]);
        assert_eq!(w, vec![0.75, 0.25]);
        assert_eq!(normalize_weights(&[0.0, 0.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_two_asset_portfolio() {
        let m = aggregate(&[50.0, 50.0], &[0.10, 0.04], &two_asset_cov(), 0.02).unwrap();

        // 0.25*0.04 + 2*0.25*0.5*0.2*0.1 + 0.25*0.01 = 0.0175
        assert_relative_eq!(m.variance, 0.0175, epsilon = 1e-15);
        assert_relative_eq!(m.volatility, 0.0175_f64.sqrt(), epsilon = 1e-15);
        assert_relative_eq!(m.expected_return, 0.07, epsilon = 1e-15);
        assert_relative_eq!(m.sharpe_ratio, 0.05 / 0.0175_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(m.return_pct(), 7.0, epsilon = 1e-12);
        assert_relative_eq!(m.normalized_weights.iter().sum::<f64>(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_scale_invariance() {
        let a = aggregate(&[3.0, 1.0], &[0.1, 0.2], &two_asset_cov(), 0.0).unwrap();
        let b = aggregate(&[30.0, 10.0], &[0.1, 0.2], &two_asset_cov(), 0.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_volatility_sharpe() {
        let corr = CorrelationMatrix::identity(2);
        let cov = CovarianceMatrix::from_correlation(&corr, &[0.0, 0.0]).unwrap();
        let m = aggregate(&[60.0, 40.0], &[0.05, 0.05], &cov, 0.045).unwrap();

        assert_eq!(m.volatility, 0.0);
        assert_eq!(m.sharpe_ratio, 0.0);
        assert!(m.is_degenerate());
    }

    #[test]
    fn test_all_weights_zero() {
        let m = aggregate(&[0.0, 0.0], &[0.1, 0.2], &two_asset_cov(), 0.045).unwrap();
        assert_eq!(m.expected_return, 0.0);
        assert_eq!(m.volatility, 0.0);
        assert_eq!(m.sharpe_ratio, 0.0);
        assert_eq!(m.normalized_weights, vec![0.0, 0.0]);
    }

    #[test]
    fn test_negative_variance_clamped() {
        // Not positive semi-definite: a correlation of -1.5 is impossible in
        // practice but exercises the clamp.
        let cov =
            CovarianceMatrix::from_matrix(DMatrix::from_row_slice(2, 2, &[0.01, -0.015, -0.015, 0.01]))
                .unwrap();
        let m = aggregate(&[1.0, 1.0], &[0.1, 0.1], &cov, 0.0).unwrap();
        assert!(m.variance < 0.0);
        assert_eq!(m.volatility, 0.0);
        assert_eq!(m.sharpe_ratio, 0.0);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let cov = two_asset_cov();
        assert!(matches!(
            aggregate(&[1.0], &[0.1], &cov, 0.0),
            Err(PortfolioError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            aggregate(&[1.0, 1.0], &[0.1], &cov, 0.0),
            Err(PortfolioError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            aggregate(&[1.0, f64::NAN], &[0.1, 0.1], &cov, 0.0),
            Err(PortfolioError::InvalidWeight { .. })
        ));
        assert!(matches!(
            aggregate(&[-1.0, 2.0], &[0.1, 0.1], &cov, 0.0),
            Err(PortfolioError::InvalidWeight { .. })
        ));
    }
}
