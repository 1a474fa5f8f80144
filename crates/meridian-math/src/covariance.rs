//! Correlation and covariance matrices.
//!
//! A [`CorrelationMatrix`] is validated once when it is built; a
//! [`CovarianceMatrix`] is derived from it and a volatility vector:
//!
//! ```text
//! Cov[i][j] = Corr[i][j] × vol[i] × vol[j]
//! ```
//!
//! Volatilities are fractions (0.25 for 25%), not percentages.

use crate::error::{MathError, MathResult};
use crate::matrix::{check_square_against, matrix_vector, quadratic_form};
use nalgebra::DMatrix;
use tracing::debug;

/// A validated correlation matrix.
///
/// Square, finite, entries in [-1, 1] and unit diagonal (both within the
/// tolerance given at construction), symmetric within that tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    matrix: DMatrix<f64>,
}

impl CorrelationMatrix {
    /// Builds a correlation matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns `RaggedMatrix` when a row length differs from the row count,
    /// and any error from [`CorrelationMatrix::new`].
    pub fn from_rows(rows: &[Vec<f64>], tolerance: f64) -> MathResult<Self> {
        let n = rows.len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(MathError::RaggedMatrix {
                row,
                expected: n,
                actual: r.len(),
            });
        }
        let matrix = DMatrix::from_fn(n, n, |i, j| rows[i][j]);
        Self::new(matrix, tolerance)
    }

    /// Validates a dense matrix as a correlation matrix.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the matrix is not square, `NonFinite`,
    /// `OutOfRange`, `InvalidDiagonal` or `NotSymmetric` for bad entries.
    pub fn new(matrix: DMatrix<f64>, tolerance: f64) -> MathResult<Self> {
        validate_correlation(&matrix, tolerance)?;
        Ok(Self { matrix })
    }

    /// The N×N identity correlation (uncorrelated holdings).
    #[must_use]
    pub fn identity(n: usize) -> Self {
        Self {
            matrix: DMatrix::identity(n, n),
        }
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    /// Correlation between holdings `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)]
    }

    /// The underlying dense matrix.
    #[must_use]
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Iterates over the upper triangle `(i, j, corr)` with `i < j`.
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j, self.matrix[(i, j)])))
    }
}

/// Checks that `matrix` is a valid correlation matrix.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the matrix is not square, `InvalidInput`
/// for a bad tolerance, `NonFinite`, `OutOfRange`, `InvalidDiagonal` or
/// `NotSymmetric` for bad entries.
pub fn validate_correlation(matrix: &DMatrix<f64>, tolerance: f64) -> MathResult<()> {
    if matrix.nrows() != matrix.ncols() {
        return Err(MathError::DimensionMismatch {
            rows1: matrix.nrows(),
            cols1: matrix.ncols(),
            rows2: matrix.ncols(),
            cols2: matrix.nrows(),
        });
    }
    if !(tolerance >= 0.0 && tolerance.is_finite()) {
        return Err(MathError::invalid_input(format!(
            "tolerance must be a non-negative finite number, got {tolerance}"
        )));
    }

    let n = matrix.nrows();
    for i in 0..n {
        for j in 0..n {
            let value = matrix[(i, j)];
            if !value.is_finite() {
                return Err(MathError::NonFinite { row: i, col: j });
            }
            if value.abs() > 1.0 + tolerance {
                return Err(MathError::OutOfRange {
                    row: i,
                    col: j,
                    value,
                    min: -1.0,
                    max: 1.0,
                });
            }
        }
        let diagonal = matrix[(i, i)];
        if (diagonal - 1.0).abs() > tolerance {
            return Err(MathError::InvalidDiagonal {
                index: i,
                value: diagonal,
            });
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let (upper, lower) = (matrix[(i, j)], matrix[(j, i)]);
            if (upper - lower).abs() > tolerance {
                return Err(MathError::NotSymmetric {
                    row: i,
                    col: j,
                    upper,
                    lower,
                });
            }
        }
    }

    Ok(())
}

/// A covariance matrix reconstructed from correlations and volatilities.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    matrix: DMatrix<f64>,
}

impl CovarianceMatrix {
    /// Reconstructs the covariance of a validated correlation matrix.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `volatilities.len()` differs from the
    /// matrix size, `InvalidInput` for negative or non-finite volatilities.
    pub fn from_correlation(
        correlation: &CorrelationMatrix,
        volatilities: &[f64],
    ) -> MathResult<Self> {
        covariance_from_correlation(correlation.as_matrix(), volatilities)
            .map(|matrix| Self { matrix })
    }

    /// Wraps an existing covariance matrix.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the matrix is not square.
    pub fn from_matrix(matrix: DMatrix<f64>) -> MathResult<Self> {
        check_square_against(&matrix, matrix.nrows())?;
        Ok(Self { matrix })
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    /// Covariance between holdings `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)]
    }

    /// The underlying dense matrix.
    #[must_use]
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Portfolio variance `wᵀΣw`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `weights.len()` differs from the size.
    pub fn variance(&self, weights: &[f64]) -> MathResult<f64> {
        quadratic_form(&self.matrix, weights)
    }

    /// The product `Σw`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `weights.len()` differs from the size.
    pub fn times(&self, weights: &[f64]) -> MathResult<Vec<f64>> {
        matrix_vector(&self.matrix, weights)
    }
}

/// Builds `Cov[i][j] = Corr[i][j] × vol[i] × vol[j]`.
///
/// The result is symmetric whenever the correlation matrix is.
///
/// # Errors
///
/// Returns `DimensionMismatch` if `correlation` is not square or its size
/// disagrees with `volatilities.len()`, and `InvalidInput` for negative or
/// non-finite volatilities.
pub fn covariance_from_correlation(
    correlation: &DMatrix<f64>,
    volatilities: &[f64],
) -> MathResult<DMatrix<f64>> {
    check_square_against(correlation, volatilities.len())?;

    if let Some((i, vol)) = volatilities
        .iter()
        .enumerate()
        .find(|(_, v)| !(v.is_finite() && **v >= 0.0))
    {
        return Err(MathError::invalid_input(format!(
            "volatility {i} must be a non-negative finite number, got {vol}"
        )));
    }

    let n = volatilities.len();
    // vol_i * vol_j first keeps the result exactly symmetric.
    let covariance = DMatrix::from_fn(n, n, |i, j| {
        correlation[(i, j)] * (volatilities[i] * volatilities[j])
    });
    debug!(size = n, "reconstructed covariance matrix");
    Ok(covariance)
}
