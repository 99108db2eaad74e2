//! Tolerance checks between numeric containers.
//!
//! Two containers are equal when they have the same shape and every pair of
//! corresponding entries differs by at most `tol` in absolute value. These
//! are used to compare freshly computed reduced models against saved
//! reference output.

use crate::vector::BlockVector;
use faer::MatRef;
use num_traits::Float;

pub fn vectors_equal<T: Float>(left: &[T], right: &[T], tol: T) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(&a, &b)| (a - b).abs() <= tol)
}

pub fn matrices_equal<T: Float>(left: MatRef<'_, T>, right: MatRef<'_, T>, tol: T) -> bool {
    if left.nrows() != right.nrows() || left.ncols() != right.ncols() {
        return false;
    }
    (0..left.ncols())
        .all(|j| (0..left.nrows()).all(|i| (left[(i, j)] - right[(i, j)]).abs() <= tol))
}

pub fn block_vectors_equal(left: &BlockVector, right: &BlockVector, tol: f64) -> bool {
    left.same_shape(right) && vectors_equal(left.as_slice(), right.as_slice(), tol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::Mat;

    #[test]
    fn vectors_compare_within_tolerance() {
        assert!(vectors_equal(&[1.0, 2.0], &[1.0, 2.0], 0.0));
        assert!(vectors_equal(&[1.0, 2.0], &[1.0 + 1e-9, 2.0], 1e-8));
        assert!(!vectors_equal(&[1.0, 2.0], &[1.0, 2.1], 1e-8));
        assert!(!vectors_equal(&[1.0], &[1.0, 0.0], 1.0));
        assert!(!vectors_equal(&[f64::NAN], &[f64::NAN], 1.0));
    }

    #[test]
    fn matrices_need_matching_shapes() {
        let a = Mat::from_fn(2, 2, |i, j| (i + 2 * j) as f64);
        let mut b = a.clone();
        assert!(matrices_equal(a.as_ref(), b.as_ref(), 0.0));
        b[(1, 1)] += 1e-6;
        assert!(!matrices_equal(a.as_ref(), b.as_ref(), 1e-7));
        assert!(matrices_equal(a.as_ref(), b.as_ref(), 1e-5));
        assert!(!matrices_equal(a.as_ref(), Mat::<f64>::zeros(2, 3).as_ref(), 1e3));
    }

    #[test]
    fn block_layout_matters() {
        let a = BlockVector::from_flat(2, 2, vec![1.0; 4]).unwrap();
        let b = BlockVector::from_flat(1, 4, vec![1.0; 4]).unwrap();
        assert!(!block_vectors_equal(&a, &b, 1.0));
        assert!(block_vectors_equal(&a, &a.clone(), 0.0));
    }
}
