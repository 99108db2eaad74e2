//! Core linear-algebra traits for podrom.

/// Matrix–vector product: y ← A x.
pub trait MatVec<T> {
    /// Number of rows.
    fn nrows(&self) -> usize;
    /// Number of columns.
    fn ncols(&self) -> usize;
    /// Compute y = A · x.  `x.len() == ncols()`, `y.len() == nrows()`.
    fn matvec(&self, x: &[T], y: &mut [T]);
}

/// Inner products & norms.
pub trait InnerProduct<V: ?Sized> {
    /// Associated scalar type.
    type Scalar: Copy + PartialOrd;
    /// Compute dot(x, y).
    fn dot(&self, x: &V, y: &V) -> Self::Scalar;
    /// Compute ‖x‖₂.
    fn norm(&self, x: &V) -> Self::Scalar;
}
