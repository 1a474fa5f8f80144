//! Portfolio-level analytics.
//!
//! This module provides:
//! - Return, volatility and Sharpe ratio for any weight vector
//! - Marginal and total contribution to risk per holding
//! - Concentration (HHI, effective number of holdings)
//! - Downside risk scaled across horizons
//! - A combined snapshot at base weights
//!
//! All functions are pure - they take weights, the covariance matrix and
//! configuration as input and return computed results. No caching, no I/O.

mod aggregate;
mod concentration;
mod decompose;
mod downside;
mod summary;

pub use aggregate::*;
pub use concentration::*;
pub use decompose::*;
pub use downside::*;
pub use summary::*;
