//! What-if reweighting.
//!
//! A [`WhatIfSimulator`] holds a sparse set of weight overrides over the
//! dataset's base weights and reports metrics and deltas against a baseline
//! computed once at construction. Overrides never touch the dataset.
//!
//! # Example
//!
//! ```rust,ignore
//! use meridian_portfolio::whatif::WhatIfSimulator;
//!
//! let mut sim = WhatIfSimulator::new(&dataset, &config)?;
//! sim.set_override(0, 12.0)?;
//! let result = sim.evaluate()?;
//! println!("Vol change: {:+.2}%", result.deltas.volatility_pct);
//! ```

mod overrides;
mod simulator;

pub use overrides::*;
pub use simulator::*;
