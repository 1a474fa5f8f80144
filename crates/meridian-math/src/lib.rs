//! # Meridian Math
//!
//! Matrix utilities for the Meridian portfolio risk analytics library.
//!
//! This crate provides:
//!
//! - **Correlation**: Validated correlation matrices (square, symmetric, unit diagonal)
//! - **Covariance**: Reconstruction of a covariance matrix from correlations and volatilities
//! - **Matrix helpers**: Quadratic forms and matrix-vector products over `f64` weights
//!
//! ## Design Philosophy
//!
//! - **Fail at load time**: Structural problems surface when a matrix is built,
//!   never when it is used
//! - **Dense storage**: `nalgebra::DMatrix` at the scale of a few dozen holdings

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]

pub mod covariance;
pub mod error;
pub mod matrix;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::covariance::{
        covariance_from_correlation, validate_correlation, CorrelationMatrix, CovarianceMatrix,
    };
    pub use crate::error::{MathError, MathResult};
    pub use crate::matrix::{is_symmetric, matrix_vector, quadratic_form};
}

pub use covariance::{
    covariance_from_correlation, validate_correlation, CorrelationMatrix, CovarianceMatrix,
};
pub use error::{MathError, MathResult};
