//! Property-based tests for covariance reconstruction.

use meridian_math::prelude::*;
use nalgebra::DMatrix;
use proptest::prelude::*;

/// Generates a symmetric matrix with unit diagonal and entries in [-1, 1].
fn correlation_strategy(max_n: usize) -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<f64>)> {
    (1..=max_n).prop_flat_map(|n| {
        let pairs = n * (n - 1) / 2;
        (
            prop::collection::vec(-1.0..=1.0_f64, pairs),
            prop::collection::vec(0.0..0.8_f64, n),
        )
            .prop_map(move |(upper, vols)| {
                let mut rows = vec![vec![0.0; n]; n];
                let mut k = 0;
                for i in 0..n {
                    rows[i][i] = 1.0;
                    for j in (i + 1)..n {
                        rows[i][j] = upper[k];
                        rows[j][i] = upper[k];
                        k += 1;
                    }
                }
                (rows, vols)
            })
    })
}

proptest! {
    #[test]
    fn covariance_is_symmetric((rows, vols) in correlation_strategy(12)) {
        let corr = CorrelationMatrix::from_rows(&rows, 1e-9).unwrap();
        let cov = CovarianceMatrix::from_correlation(&corr, &vols).unwrap();
        for i in 0..cov.size() {
            for j in 0..cov.size() {
                prop_assert_eq!(cov.get(i, j), cov.get(j, i));
            }
        }
    }

    #[test]
    fn covariance_diagonal_is_variance((rows, vols) in correlation_strategy(12)) {
        let corr = CorrelationMatrix::from_rows(&rows, 1e-9).unwrap();
        let cov = CovarianceMatrix::from_correlation(&corr, &vols).unwrap();
        for (i, vol) in vols.iter().enumerate() {
            prop_assert!((cov.get(i, i) - vol * vol).abs() < 1e-15);
        }
    }

    #[test]
    fn quadratic_form_is_deterministic((rows, vols) in correlation_strategy(12)) {
        let corr = CorrelationMatrix::from_rows(&rows, 1e-9).unwrap();
        let cov = CovarianceMatrix::from_correlation(&corr, &vols).unwrap();
        let weights = vec![1.0 / vols.len() as f64; vols.len()];
        let first = cov.variance(&weights).unwrap();
        let second = cov.variance(&weights).unwrap();
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn size_mismatch_always_rejected(n in 1usize..10, extra in 1usize..4) {
        let corr = DMatrix::<f64>::identity(n, n);
        let vols = vec![0.1; n + extra];
        let is_mismatch = matches!(
            covariance_from_correlation(&corr, &vols),
            Err(MathError::DimensionMismatch { .. })
        );
        prop_assert!(is_mismatch);
    }
}
