//! Property-based tests for portfolio invariants.
//!
//! These tests verify key properties that should always hold:
//! - Normalised weights sum to 100%
//! - Risk contributions sum to 100% whenever volatility is positive
//! - Sharpe ratio is exactly zero at zero volatility
//! - Scenario evaluation is idempotent and linear in severity
//! - Snapped overrides leave the baseline untouched

use meridian_portfolio::prelude::*;
use meridian_portfolio::{correlated_pairs, OverrideOutcome};
use proptest::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

const SECTORS: [&str; 4] = ["Technology", "Financials", "Health Care", "Industrials"];
const COUNTRIES: [&str; 4] = ["United States", "United Kingdom", "Brazil", "Taiwan"];

/// Builds a dataset from generated weights, vols and a one-factor correlation.
///
/// `corr = b_i * b_j` off the diagonal with |b| < 1 is positive semi-definite.
fn build(weights: &[f64], vols: &[f64], loadings: &[f64]) -> Dataset {
    let n = weights.len();
    let holdings = (0..n)
        .map(|i| {
            Holding::new(format!("H{i}"), format!("Holding {i}"), weights[i])
                .with_return_and_vol(2.0 + i as f64, vols[i])
                .with_sector(SECTORS[i % SECTORS.len()])
                .with_country(COUNTRIES[i % COUNTRIES.len()])
        })
        .collect();
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| if i == j { 1.0 } else { loadings[i] * loadings[j] })
                .collect()
        })
        .collect();
    let corr = CorrelationMatrix::from_rows(&rows, 1e-9).unwrap();
    Dataset::new(holdings, corr, FundMetadata::default()).unwrap()
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    (1usize..12).prop_flat_map(|n| {
        (
            prop::collection::vec(0.0..25.0_f64, n),
            prop::collection::vec(0.0..60.0_f64, n),
            prop::collection::vec(-0.95..0.95_f64, n),
        )
            .prop_map(|(w, v, b)| build(&w, &v, &b))
    })
}

proptest! {
    #[test]
    fn normalized_weights_sum_to_100(ds in dataset_strategy()) {
        let weights = ds.base_weights();
        let m = aggregate(&weights, &ds.returns(), ds.covariance(), 0.045).unwrap();
        let total: f64 = m.normalized_weights.iter().sum();
        if weights.iter().sum::<f64>() > 0.0 {
            prop_assert!((total - 100.0).abs() < 1e-6);
        } else {
            prop_assert_eq!(total, 0.0);
        }
    }

    #[test]
    fn risk_contributions_sum_to_100(ds in dataset_strategy()) {
        let a = analyze_weights(&ds, &ds.base_weights(), 0.045).unwrap();
        if a.metrics.volatility > 1e-9 {
            prop_assert!((a.risk.total_pct() - 100.0).abs() < 1e-4);
        }
    }

    #[test]
    fn sharpe_zero_when_volatility_zero(ds in dataset_strategy()) {
        let a = analyze_weights(&ds, &ds.base_weights(), 0.045).unwrap();
        if a.metrics.volatility == 0.0 {
            prop_assert_eq!(a.metrics.sharpe_ratio, 0.0);
            prop_assert!(a.risk.contributions.iter().all(|c| c.contribution_pct == 0.0));
        }
    }

    #[test]
    fn scenarios_idempotent(ds in dataset_strategy(), severity in 10.0..200.0_f64) {
        let config = AnalyticsConfig::default();
        for t in stress_scenarios::all("United Kingdom") {
            let a = evaluate_scenario(&ds, &t, severity, &config).unwrap();
            let b = evaluate_scenario(&ds, &t, severity, &config).unwrap();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn scenario_linear_in_severity(ds in dataset_strategy(), severity in 10.0..200.0_f64) {
        let config = AnalyticsConfig::default();
        let t = stress_scenarios::global_recession();
        let base = evaluate_scenario(&ds, &t, 100.0, &config).unwrap();
        let scaled = evaluate_scenario(&ds, &t, severity, &config).unwrap();
        let expected = base.total_impact_pct * severity / 100.0;
        prop_assert!((scaled.total_impact_pct - expected).abs() < 1e-9);
        prop_assert!(scaled.losers.len() <= config.top_losers);
        prop_assert!(scaled.gainers.is_empty());
    }

    #[test]
    fn snapped_override_matches_baseline(ds in dataset_strategy(), offset in -0.049..0.049_f64) {
        let mut sim = WhatIfSimulator::new(&ds, &AnalyticsConfig::default()).unwrap();
        let base = ds.holdings()[0].weight;
        prop_assume!(base + offset >= 0.0);
        sim.set_override(0, base + 7.0).unwrap();
        let outcome = sim.set_override(0, base + offset).unwrap();
        prop_assert_eq!(outcome, OverrideOutcome::Snapped);

        let r = sim.evaluate().unwrap();
        prop_assert_eq!(r.current, r.baseline);
    }

    #[test]
    fn correlated_pairs_strictly_ordered(ds in dataset_strategy(), threshold in 0.0..0.9_f64) {
        let pairs = correlated_pairs(&ds, threshold, 10);
        prop_assert!(pairs.len() <= 10);
        prop_assert!(pairs.iter().all(|p| p.first < p.second && p.correlation > threshold));
        prop_assert!(pairs.windows(2).all(|w| w[0].correlation >= w[1].correlation));
    }
}
