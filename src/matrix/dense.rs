//! Dense reduced matrices on top of Faer.
//!
//! Galerkin projection produces small `r × r` matrices; these are plain
//! `faer::Mat<f64>` values so that callers can factor or multiply them with
//! faer directly.

use faer::MatRef;

/// Dense `r × r` result of projecting a full-order operator onto a basis.
pub type ReducedMatrix = faer::Mat<f64>;

/// Whether `m` is square and `|m[i,j] - m[j,i]| <= tol` for every pair.
pub fn is_symmetric(m: MatRef<'_, f64>, tol: f64) -> bool {
    if m.nrows() != m.ncols() {
        return false;
    }
    (0..m.nrows()).all(|i| (0..i).all(|j| (m[(i, j)] - m[(j, i)]).abs() <= tol))
}
