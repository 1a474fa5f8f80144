//! Dense matrix helpers.
//!
//! The sums are written out as explicit loops so the summation order is fixed
//! and repeated evaluations produce bit-identical results.

use crate::error::{MathError, MathResult};
use nalgebra::DMatrix;

/// Computes the quadratic form `wᵀ M w` as a full double sum.
///
/// # Errors
///
/// Returns `DimensionMismatch` if `matrix` is not square or its size differs
/// from `weights.len()`.
pub fn quadratic_form(matrix: &DMatrix<f64>, weights: &[f64]) -> MathResult<f64> {
    check_square_against(matrix, weights.len())?;

    let n = weights.len();
    let mut total = 0.0;
    for i in 0..n {
        for j in 0..n {
            total += weights[i] * weights[j] * matrix[(i, j)];
        }
    }
    Ok(total)
}

/// Computes the matrix-vector product `M w`.
///
/// # Errors
///
/// Returns `DimensionMismatch` if `matrix` is not square or its size differs
/// from `weights.len()`.
pub fn matrix_vector(matrix: &DMatrix<f64>, weights: &[f64]) -> MathResult<Vec<f64>> {
    check_square_against(matrix, weights.len())?;

    let n = weights.len();
    let product = (0..n)
        .map(|i| {
            let mut sum = 0.0;
            for (j, w) in weights.iter().enumerate() {
                sum += matrix[(i, j)] * w;
            }
            sum
        })
        .collect();
    Ok(product)
}

/// Returns true if `matrix` is square and `|M[i][j] - M[j][i]| <= tolerance` everywhere.
#[must_use]
pub fn is_symmetric(matrix: &DMatrix<f64>, tolerance: f64) -> bool {
    if matrix.nrows() != matrix.ncols() {
        return false;
    }
    let n = matrix.nrows();
    (0..n).all(|i| ((i + 1)..n).all(|j| (matrix[(i, j)] - matrix[(j, i)]).abs() <= tolerance))
}

pub(crate) fn check_square_against(matrix: &DMatrix<f64>, len: usize) -> MathResult<()> {
    if matrix.nrows() != matrix.ncols() {
        return Err(MathError::DimensionMismatch {
            rows1: matrix.nrows(),
            cols1: matrix.ncols(),
            rows2: matrix.ncols(),
            cols2: matrix.nrows(),
        });
    }
    if matrix.nrows() != len {
        return Err(MathError::vector_mismatch(matrix.nrows(), len));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadratic_form() {
        let m = DMatrix::from_row_slice(2, 2, &[0.04, 0.01, 0.01, 0.09]);
        let w = [0.5, 0.5];
        // 0.25*0.04 + 2*0.25*0.01 + 0.25*0.09
        assert_relative_eq!(quadratic_form(&m, &w).unwrap(), 0.0375, epsilon = 1e-15);
    }

    #[test]
    fn test_matrix_vector() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let v = matrix_vector(&m, &[1.0, 1.0]).unwrap();
        assert_eq!(v, vec![3.0, 7.0]);
    }

    #[test]
    fn test_length_mismatch() {
        let m = DMatrix::<f64>::identity(3, 3);
        let err = quadratic_form(&m, &[1.0, 0.0]).unwrap_err();
        assert_eq!(err, MathError::vector_mismatch(3, 2));
    }

    #[test]
    fn test_non_square() {
        let m = DMatrix::<f64>::zeros(2, 3);
        assert!(matrix_vector(&m, &[1.0, 1.0]).is_err());
        assert!(!is_symmetric(&m, 1e-9));
    }

    #[test]
    fn test_is_symmetric() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 0.3, 0.3000001, 1.0]);
        assert!(is_symmetric(&m, 1e-6));
        assert!(!is_symmetric(&m, 1e-9));
    }

    #[test]
    fn test_empty() {
        let m = DMatrix::<f64>::zeros(0, 0);
        assert_eq!(quadratic_form(&m, &[]).unwrap(), 0.0);
        assert!(matrix_vector(&m, &[]).unwrap().is_empty());
    }
}
