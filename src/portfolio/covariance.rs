//! Validated covariance matrices

use crate::error::{FinError, FinResult};
use nalgebra::{DMatrix, DVector};
use ndarray::ArrayView2;

const FIELD: &str = "cov_matrix";

/// Relative tolerance of the symmetry check
pub const SYMMETRY_RTOL: f64 = 1e-5;
/// Absolute tolerance of the symmetry check
pub const SYMMETRY_ATOL: f64 = 1e-8;

/// Square, symmetric asset covariance matrix with positive variances.
///
/// Positive semi-definiteness is not checked; the solver copes with
/// singular matrices but the minimizer is then not unique.
#[derive(Clone, Debug, PartialEq)]
pub struct CovarianceMatrix {
    inner: DMatrix<f64>,
}

impl CovarianceMatrix {
    /// Build from row vectors, as an agent would pass a nested JSON list
    pub fn from_rows(rows: &[Vec<f64>]) -> FinResult<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if nrows == 0 || ncols == 0 || rows.iter().any(|row| row.len() != ncols) {
            return Err(FinError::validation(FIELD, "must be 2-dimensional"));
        }
        let inner = DMatrix::from_fn(nrows, ncols, |i, j| rows[i][j]);
        Self::from_dmatrix(inner)
    }

    /// Build from a two-dimensional ndarray view
    pub fn from_array(array: ArrayView2<'_, f64>) -> FinResult<Self> {
        if array.is_empty() {
            return Err(FinError::validation(FIELD, "must be 2-dimensional"));
        }
        let inner = DMatrix::from_fn(array.nrows(), array.ncols(), |i, j| array[[i, j]]);
        Self::from_dmatrix(inner)
    }

    pub fn from_dmatrix(inner: DMatrix<f64>) -> FinResult<Self> {
        if inner.nrows() == 0 {
            return Err(FinError::validation(FIELD, "must be 2-dimensional"));
        }
        if inner.nrows() != inner.ncols() {
            return Err(FinError::validation(FIELD, "must be square"));
        }
        if inner.iter().any(|x| !x.is_finite()) {
            return Err(FinError::validation(FIELD, "must contain only finite values"));
        }
        let n = inner.nrows();
        for i in 0..n {
            for j in 0..n {
                let a = inner[(i, j)];
                let b = inner[(j, i)];
                if (a - b).abs() > SYMMETRY_ATOL + SYMMETRY_RTOL * b.abs() {
                    return Err(FinError::validation(FIELD, "must be symmetric"));
                }
            }
        }
        if (0..n).any(|i| inner[(i, i)] <= 0.0) {
            return Err(FinError::validation(
                FIELD,
                "variances (diagonal elements) must be positive",
            ));
        }
        Ok(CovarianceMatrix { inner })
    }

    /// Number of assets
    pub fn dim(&self) -> usize {
        self.inner.nrows()
    }

    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.inner
    }

    /// Portfolio variance `wᵀΣw`
    pub fn portfolio_variance(&self, weights: &DVector<f64>) -> f64 {
        weights.dot(&(&self.inner * weights))
    }

    /// Largest diagonal entry, used to scale solver tolerances
    pub fn max_variance(&self) -> f64 {
        self.inner.diagonal().iter().cloned().fold(0.0, f64::max)
    }
}
