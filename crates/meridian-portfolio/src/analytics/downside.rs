//! Downside risk across horizons.
//!
//! Daily VaR and CVaR are estimated upstream from the return history. Longer
//! horizons use the square-root-of-time rule, which assumes i.i.d. returns.
//! Maximum drawdown is a whole-period measure and is never rescaled.

use crate::types::DownsideRecord;
use serde::{Deserialize, Serialize};

/// Trading days in a month.
pub const TRADING_DAYS_PER_MONTH: f64 = 21.0;

/// Trading days in a year.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// A daily risk figure with its monthly and annual scalings (%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonRisk {
    /// One-day figure.
    pub daily: f64,
    /// Scaled by √21.
    pub monthly: f64,
    /// Scaled by √252.
    pub annual: f64,
}

impl HorizonRisk {
    /// Scales a one-day figure by the square root of time.
    #[must_use]
    pub fn from_daily(daily: f64) -> Self {
        Self {
            daily,
            monthly: daily * TRADING_DAYS_PER_MONTH.sqrt(),
            annual: daily * TRADING_DAYS_PER_YEAR.sqrt(),
        }
    }
}

/// Downside risk table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DownsideRisk {
    /// 95% Value at Risk.
    pub var_95: Option<HorizonRisk>,
    /// 95% Conditional VaR (expected shortfall).
    pub cvar_95: Option<HorizonRisk>,
    /// Maximum drawdown over the full period (%).
    pub max_drawdown_pct: Option<f64>,
}

/// Builds the horizon table from upstream daily statistics.
#[must_use]
pub fn downside_risk(record: &DownsideRecord) -> DownsideRisk {
    DownsideRisk {
        var_95: record.var_95_daily_pct.map(HorizonRisk::from_daily),
        cvar_95: record.cvar_95_daily_pct.map(HorizonRisk::from_daily),
        max_drawdown_pct: record.max_drawdown_pct,
    }
}
