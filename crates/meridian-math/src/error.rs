//! Error types for matrix operations.

use thiserror::Error;

/// A specialized Result type for matrix operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur while building or combining matrices.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Matrix dimensions are incompatible.
    #[error("Incompatible matrix dimensions: ({rows1}x{cols1}) and ({rows2}x{cols2})")]
    DimensionMismatch {
        /// Rows in first operand.
        rows1: usize,
        /// Columns in first operand.
        cols1: usize,
        /// Rows in second operand.
        rows2: usize,
        /// Columns in second operand.
        cols2: usize,
    },

    /// A row of a nested matrix has the wrong length.
    #[error("Row {row} has {actual} entries, expected {expected}")]
    RaggedMatrix {
        /// Offending row index.
        row: usize,
        /// Expected row length.
        expected: usize,
        /// Actual row length.
        actual: usize,
    },

    /// Matrix is not symmetric within tolerance.
    #[error("Matrix is not symmetric at ({row}, {col}): {upper} vs {lower}")]
    NotSymmetric {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Value at (row, col).
        upper: f64,
        /// Value at (col, row).
        lower: f64,
    },

    /// Correlation diagonal entry is not one.
    #[error("Diagonal entry {index} is {value}, expected 1")]
    InvalidDiagonal {
        /// Diagonal index.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Entry lies outside its admissible range.
    #[error("Entry ({row}, {col}) = {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The offending value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Entry is NaN or infinite.
    #[error("Entry ({row}, {col}) is not finite")]
    NonFinite {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a dimension mismatch between a square matrix and a vector.
    #[must_use]
    pub fn vector_mismatch(matrix_size: usize, vector_len: usize) -> Self {
        Self::DimensionMismatch {
            rows1: matrix_size,
            cols1: matrix_size,
            rows2: vector_len,
            cols2: 1,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::vector_mismatch(3, 2);
        assert_eq!(
            err.to_string(),
            "Incompatible matrix dimensions: (3x3) and (2x1)"
        );

        let err = MathError::InvalidDiagonal {
            index: 4,
            value: 0.9,
        };
        assert!(err.to_string().contains("Diagonal entry 4"));
    }

    #[test]
    fn test_invalid_input() {
        let err = MathError::invalid_input("negative volatility");
        assert!(err.to_string().contains("negative volatility"));
    }
}
