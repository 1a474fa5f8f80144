//! Error types for portfolio analytics.
//!
//! This module defines the error types used throughout the portfolio crate.
//! Structural problems with the input dataset are fatal and surface at load
//! time; numerically degenerate portfolios are not errors.

use meridian_math::MathError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Vector or matrix sizes disagree.
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// What was being compared.
        context: String,
        /// The expected length.
        expected: usize,
        /// The actual length.
        actual: usize,
    },

    /// Matrix failed validation.
    #[error("Invalid matrix: {0}")]
    Matrix(#[from] MathError),

    /// Invalid holding data.
    #[error("Invalid holding '{id}': {reason}")]
    InvalidHolding {
        /// The holding ticker.
        id: String,
        /// The reason the holding is invalid.
        reason: String,
    },

    /// Invalid weight (negative or NaN).
    #[error("Invalid weight for holding '{id}': {value}")]
    InvalidWeight {
        /// The holding ticker.
        id: String,
        /// The invalid weight value.
        value: f64,
    },

    /// Holding index or ticker does not exist.
    #[error("Holding not found: {id}")]
    HoldingNotFound {
        /// The requested index or ticker.
        id: String,
    },

    /// Scenario severity is not a finite number.
    #[error("Invalid scenario severity: {value}")]
    InvalidSeverity {
        /// The rejected severity.
        value: f64,
    },

    /// Scenario name is not in the template library.
    #[error("Unknown scenario: {name}")]
    UnknownScenario {
        /// The requested scenario name.
        name: String,
    },

    /// Dataset could not be parsed.
    #[error("Failed to parse dataset: {reason}")]
    Parse {
        /// Parser message.
        reason: String,
    },

    /// Empty portfolio.
    #[error("Portfolio has no holdings")]
    EmptyPortfolio,
}

impl PortfolioError {
    /// Create a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Create an invalid holding error.
    #[must_use]
    pub fn invalid_holding(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid weight error.
    #[must_use]
    pub fn invalid_weight(id: impl Into<String>, value: f64) -> Self {
        Self::InvalidWeight {
            id: id.into(),
            value,
        }
    }

    /// Create a holding not found error.
    #[must_use]
    pub fn holding_not_found(id: impl Into<String>) -> Self {
        Self::HoldingNotFound { id: id.into() }
    }

    /// Returns true for errors caused by malformed input data.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. }
                | Self::Matrix(_)
                | Self::InvalidHolding { .. }
                | Self::Parse { .. }
                | Self::EmptyPortfolio
        )
    }
}

impl From<serde_json::Error> for PortfolioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}
