//! Symmetric eigensolvers for the snapshot correlation matrix.
//!
//! The correlation matrix is small (one row per snapshot), dense and
//! symmetric, so a direct eigendecomposition is used. The solver sits behind
//! [`SymmetricEigensolver`] so a generalized or LAPACK-backed solver can be
//! substituted; eigenvalues are carried as complex numbers because such
//! solvers may report a nonzero imaginary part for an invalid operator.
//!
//! No ordering of the returned eigenpairs is assumed by callers.

use crate::error::{PodError, Result};
use faer::{Mat, MatRef, Side};

/// A possibly complex eigenvalue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eigenvalue {
    pub re: f64,
    pub im: f64,
}

impl Eigenvalue {
    pub fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }
}

/// Eigenpairs of an `n × n` matrix: column `k` of `vectors` belongs to `values[k]`.
#[derive(Debug, Clone)]
pub struct Spectrum {
    pub values: Vec<Eigenvalue>,
    pub vectors: Mat<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Eigendecomposition of a dense symmetric matrix.
pub trait SymmetricEigensolver: Send + Sync {
    fn decompose(&self, a: MatRef<'_, f64>) -> Result<Spectrum>;
}

/// Faer's self-adjoint eigendecomposition, reading the lower triangle.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaerEigensolver;

impl SymmetricEigensolver for FaerEigensolver {
    fn decompose(&self, a: MatRef<'_, f64>) -> Result<Spectrum> {
        let n = a.nrows();
        if n == 0 {
            return Ok(Spectrum { values: Vec::new(), vectors: Mat::zeros(0, 0) });
        }
        let evd = a
            .self_adjoint_eigen(Side::Lower)
            .map_err(|e| PodError::Eigensolver(format!("{e:?}")))?;
        let s = evd.S();
        let u = evd.U();
        let values = (0..n).map(|i| Eigenvalue::real(s[i])).collect();
        let vectors = Mat::from_fn(n, n, |i, j| u[(i, j)]);
        Ok(Spectrum { values, vectors })
    }
}
