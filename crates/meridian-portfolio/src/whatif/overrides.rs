//! Sparse weight override state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What [`WeightOverrides::record`] did with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverrideOutcome {
    /// The override was stored.
    Recorded,
    /// The value was within the snap distance of the base weight; any
    /// existing override was removed.
    Snapped,
}

/// Overridden raw weights keyed by holding index.
///
/// Unlisted holdings keep their base weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightOverrides {
    weights: BTreeMap<usize, f64>,
}

impl WeightOverrides {
    /// Creates an empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` for `index`, or removes the override when `value` is
    /// within `snap_epsilon` of `base_weight`.
    ///
    /// The value is assumed valid; callers check it first.
    pub fn record(
        &mut self,
        index: usize,
        value: f64,
        base_weight: f64,
        snap_epsilon: f64,
    ) -> OverrideOutcome {
        if (value - base_weight).abs() < snap_epsilon {
            self.weights.remove(&index);
            OverrideOutcome::Snapped
        } else {
            self.weights.insert(index, value);
            OverrideOutcome::Recorded
        }
    }

    /// Removes the override for `index`, returning it.
    pub fn remove(&mut self, index: usize) -> Option<f64> {
        self.weights.remove(&index)
    }

    /// Removes every override.
    pub fn clear(&mut self) {
        self.weights.clear();
    }

    /// The override for `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.weights.get(&index).copied()
    }

    /// Number of overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True when no weight is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Overrides in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.weights.iter().map(|(i, w)| (*i, *w))
    }

    /// Highest overridden index.
    #[must_use]
    pub fn max_index(&self) -> Option<usize> {
        self.weights.keys().next_back().copied()
    }

    /// Base weights with overrides applied.
    #[must_use]
    pub fn apply(&self, base_weights: &[f64]) -> Vec<f64> {
        base_weights
            .iter()
            .enumerate()
            .map(|(i, w)| self.get(i).unwrap_or(*w))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_snap() {
        let mut o = WeightOverrides::new();
        assert_eq!(o.record(2, 6.0, 4.0, 0.05), OverrideOutcome::Recorded);
        assert_eq!(o.get(2), Some(6.0));

        assert_eq!(o.record(2, 4.04, 4.0, 0.05), OverrideOutcome::Snapped);
        assert!(o.is_empty());
    }

    #[test]
    fn test_snap_boundary() {
        let mut o = WeightOverrides::new();
        // Exactly at the snap distance is kept.
        assert_eq!(o.record(0, 1.5, 1.0, 0.5), OverrideOutcome::Recorded);
    }

    #[test]
    fn test_apply() {
        let mut o = WeightOverrides::new();
        o.record(1, 0.0, 30.0, 0.05);
        assert_eq!(o.apply(&[50.0, 30.0, 20.0]), vec![50.0, 0.0, 20.0]);
        assert_eq!(o.max_index(), Some(1));
    }

    #[test]
    fn test_clear() {
        let mut o = WeightOverrides::new();
        o.record(0, 9.0, 1.0, 0.05);
        o.record(3, 9.0, 1.0, 0.05);
        assert_eq!(o.iter().map(|(i, _)| i).collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(o.remove(3), Some(9.0));
        o.clear();
        assert_eq!(o.len(), 0);
    }
}
