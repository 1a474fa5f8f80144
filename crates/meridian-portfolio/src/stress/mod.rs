//! Stress testing for equity portfolios.
//!
//! This module provides:
//! - Scenario templates (sector, country, uniform and FX shocks)
//! - Impact calculations scaled by a severity percentage
//! - Multi-scenario comparison
//!
//! Shocks are applied linearly to each holding's weight. No repricing,
//! contagion or second-order effects are modelled.

mod impact;
mod scenarios;

pub use impact::*;
pub use scenarios::*;
