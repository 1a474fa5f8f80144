//! What-if simulator over an immutable dataset.

use super::overrides::{OverrideOutcome, WeightOverrides};
use crate::analytics::{analyze_weights, WeightedAnalysis};
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{is_valid_weight, AnalyticsConfig, Dataset};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Changes from the baseline, in display units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WhatIfDeltas {
    /// Volatility change (% points).
    pub volatility_pct: f64,
    /// Return change (% points).
    pub return_pct: f64,
    /// Sharpe ratio change.
    pub sharpe: f64,
}

/// Metrics for the current overrides alongside the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResult {
    /// Metrics with overrides applied.
    pub current: WeightedAnalysis,

    /// Metrics at base weights.
    pub baseline: WeightedAnalysis,

    /// Current minus baseline.
    pub deltas: WhatIfDeltas,

    /// Number of active overrides.
    pub override_count: usize,
}

impl WhatIfResult {
    /// True when any weight differs from its base.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.override_count > 0
    }
}

/// A holding offered for interactive adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustableHolding {
    /// Holding index in dataset order.
    pub index: usize,
    /// Ticker.
    pub ticker: String,
    /// Issuer name.
    pub name: String,
    /// Base weight (%).
    pub base_weight: f64,
    /// Override if set, else the base weight (%).
    pub current_weight: f64,
    /// Lower slider bound (%).
    pub min_weight: f64,
    /// Upper slider bound (%).
    pub max_weight: f64,
    /// Slider increment (%).
    pub step: f64,
    /// True when an override is active.
    pub changed: bool,
}

/// Interactive reweighting session.
///
/// The baseline is computed once in [`WhatIfSimulator::new`] and never
/// changes; the override set is the only mutable state.
#[derive(Debug, Clone)]
pub struct WhatIfSimulator<'a> {
    dataset: &'a Dataset,
    config: AnalyticsConfig,
    risk_free_rate: f64,
    baseline: WeightedAnalysis,
    overrides: WeightOverrides,
}

impl<'a> WhatIfSimulator<'a> {
    /// Creates a simulator and computes the baseline.
    ///
    /// # Errors
    ///
    /// Propagates aggregation errors from the baseline computation.
    pub fn new(dataset: &'a Dataset, config: &AnalyticsConfig) -> PortfolioResult<Self> {
        let risk_free_rate = dataset.risk_free_rate(config);
        let baseline = analyze_weights(dataset, &dataset.base_weights(), risk_free_rate)?;
        debug!(
            volatility = baseline.metrics.volatility,
            "what-if baseline computed"
        );

        Ok(Self {
            dataset,
            config: config.clone(),
            risk_free_rate,
            baseline,
            overrides: WeightOverrides::new(),
        })
    }

    /// The cached baseline.
    #[must_use]
    pub fn baseline(&self) -> &WeightedAnalysis {
        &self.baseline
    }

    /// The current override set.
    #[must_use]
    pub fn overrides(&self) -> &WeightOverrides {
        &self.overrides
    }

    /// True when any override is active.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// Sets the raw weight of the holding at `index`.
    ///
    /// A value within the snap distance of the base weight removes the
    /// override instead.
    ///
    /// # Errors
    ///
    /// Returns `HoldingNotFound` for an out-of-range index and
    /// `InvalidWeight` for a negative or non-finite value. The override set
    /// is unchanged on error.
    pub fn set_override(&mut self, index: usize, value: f64) -> PortfolioResult<OverrideOutcome> {
        let base = self.check_override(index, value)?;
        Ok(self
            .overrides
            .record(index, value, base, self.config.snap_epsilon))
    }

    /// Sets an override in caller-held state, validated against this
    /// simulator's dataset.
    ///
    /// # Errors
    ///
    /// As [`WhatIfSimulator::set_override`].
    pub fn set_override_in(
        &self,
        overrides: &mut WeightOverrides,
        index: usize,
        value: f64,
    ) -> PortfolioResult<OverrideOutcome> {
        let base = self.check_override(index, value)?;
        Ok(overrides.record(index, value, base, self.config.snap_epsilon))
    }

    /// Sets an override by ticker (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `HoldingNotFound` for an unknown ticker, otherwise as
    /// [`WhatIfSimulator::set_override`].
    pub fn set_override_by_ticker(
        &mut self,
        ticker: &str,
        value: f64,
    ) -> PortfolioResult<OverrideOutcome> {
        let index = self.dataset.position_of(ticker).ok_or_else(|| {
            warn!(ticker, "override rejected: unknown ticker");
            PortfolioError::holding_not_found(ticker)
        })?;
        self.set_override(index, value)
    }

    /// Clears every override.
    pub fn reset(&mut self) {
        self.overrides.clear();
    }

    /// Evaluates the simulator's own override set.
    ///
    /// # Errors
    ///
    /// Propagates aggregation errors; none occur for overrides accepted by
    /// [`WhatIfSimulator::set_override`].
    pub fn evaluate(&self) -> PortfolioResult<WhatIfResult> {
        self.evaluate_with(&self.overrides)
    }

    /// Evaluates an override set held outside the simulator.
    ///
    /// # Errors
    ///
    /// Returns `HoldingNotFound` if an override index is out of range and
    /// `InvalidWeight` for an invalid overridden value.
    pub fn evaluate_with(&self, overrides: &WeightOverrides) -> PortfolioResult<WhatIfResult> {
        if let Some(max) = overrides.max_index() {
            if max >= self.dataset.len() {
                return Err(PortfolioError::holding_not_found(max.to_string()));
            }
        }

        let weights = overrides.apply(&self.dataset.base_weights());
        let current = analyze_weights(self.dataset, &weights, self.risk_free_rate)?;

        let base = &self.baseline.metrics;
        let now = &current.metrics;
        let deltas = WhatIfDeltas {
            volatility_pct: now.volatility_pct() - base.volatility_pct(),
            return_pct: now.return_pct() - base.return_pct(),
            sharpe: now.sharpe_ratio - base.sharpe_ratio,
        };

        Ok(WhatIfResult {
            current,
            baseline: self.baseline.clone(),
            deltas,
            override_count: overrides.len(),
        })
    }

    /// The largest holdings by base weight with their slider bounds.
    #[must_use]
    pub fn adjustable_holdings(&self) -> Vec<AdjustableHolding> {
        self.adjustable_holdings_with(&self.overrides)
    }

    /// As [`WhatIfSimulator::adjustable_holdings`], for caller-held state.
    #[must_use]
    pub fn adjustable_holdings_with(&self, overrides: &WeightOverrides) -> Vec<AdjustableHolding> {
        let mut ranked: Vec<_> = self.dataset.holdings().iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.weight.total_cmp(&a.1.weight));

        ranked
            .into_iter()
            .take(self.config.adjustable_holdings)
            .map(|(index, h)| {
                let current = overrides.get(index);
                AdjustableHolding {
                    index,
                    ticker: h.ticker.clone(),
                    name: h.name.clone(),
                    base_weight: h.weight,
                    current_weight: current.unwrap_or(h.weight),
                    min_weight: 0.0,
                    max_weight: self.config.adjustable_cap(h.weight),
                    step: self.config.adjustable_step,
                    changed: current.is_some(),
                }
            })
            .collect()
    }

    fn check_override(&self, index: usize, value: f64) -> PortfolioResult<f64> {
        let Some(holding) = self.dataset.holdings().get(index) else {
            warn!(index, "override rejected: index out of range");
            return Err(PortfolioError::holding_not_found(index.to_string()));
        };
        if !is_valid_weight(value) {
            warn!(ticker = %holding.ticker, value, "override rejected: invalid weight");
            return Err(PortfolioError::invalid_weight(&holding.ticker, value));
        }
        Ok(holding.weight)
    }
}
