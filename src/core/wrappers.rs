//! Trait implementations for faer dense matrices and plain slices.
//!
//! Dense `faer::Mat` operators implement [`MatVec`] so that small full-order
//! problems (and tests) can use dense operators wherever a sparse one is
//! accepted. Inner products are implemented on the unit type `()` for slices,
//! with rayon parallelism when the `rayon` feature is enabled.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)
//! - [num-traits crate documentation](https://docs.rs/num-traits)

use crate::core::traits::{InnerProduct, MatVec};
use faer::{Mat, MatRef};
use num_traits::Float;

/// Computes `y = A * x` for a dense matrix.
impl<T: Float> MatVec<T> for Mat<T> {
    fn nrows(&self) -> usize {
        Mat::nrows(self)
    }
    fn ncols(&self) -> usize {
        Mat::ncols(self)
    }
    fn matvec(&self, x: &[T], y: &mut [T]) {
        self.as_ref().matvec(x, y)
    }
}

impl<'a, T: Float> MatVec<T> for MatRef<'a, T> {
    fn nrows(&self) -> usize {
        MatRef::nrows(self)
    }
    fn ncols(&self) -> usize {
        MatRef::ncols(self)
    }
    fn matvec(&self, x: &[T], y: &mut [T]) {
        assert_eq!(MatRef::nrows(self), y.len(), "Output vector y has incorrect length");
        assert_eq!(MatRef::ncols(self), x.len(), "Input vector x has incorrect length");
        for (i, yi) in y.iter_mut().enumerate() {
            let mut sum = T::zero();
            for (j, &xj) in x.iter().enumerate() {
                sum = sum + self[(i, j)] * xj;
            }
            *yi = sum;
        }
    }
}

/// Inner product and norm for slices, with optional Rayon parallelism.
impl<T: Float + Send + Sync> InnerProduct<[T]> for () {
    type Scalar = T;
    /// Computes the dot product of two slices: `x^T y`.
    fn dot(&self, x: &[T], y: &[T]) -> T {
        assert_eq!(x.len(), y.len(), "Vectors must have the same length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.par_iter()
                .zip(y.par_iter())
                .with_min_len(4096)
                .map(|(xi, yi)| *xi * *yi)
                .reduce(|| T::zero(), |acc, v| acc + v)
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.iter()
                .zip(y.iter())
                .map(|(xi, yi)| *xi * *yi)
                .fold(T::zero(), |acc, v| acc + v)
        }
    }
    /// Computes the Euclidean norm of a slice: `||x||_2`.
    fn norm(&self, x: &[T]) -> T {
        self.dot(x, x).sqrt()
    }
}
