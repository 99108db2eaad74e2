// Compressed sparse row operators for full-order matrices.

use crate::core::traits::MatVec;
use crate::error::{PodError, Result};
use faer::sparse::{SparseRowMat, SymbolicSparseRowMat, Triplet};
use faer::traits::ComplexField;
use faer::{Mat, MatRef};
use num_traits::Float;

/// An owning CSR matrix, the usual storage for assembled finite-element
/// operators (mass, Laplace, boundary, advection).
#[derive(Debug, Clone)]
pub struct CsrMatrix<T> {
    inner: SparseRowMat<usize, T>,
}

impl<T: ComplexField + Float> CsrMatrix<T> {
    /// Build a CSR from raw row‐ptr, col‐idx, and values.
    ///
    /// Column indices must be strictly increasing within each row.
    pub fn from_csr(
        nrows: usize,
        ncols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        if row_ptr.len() != nrows + 1 {
            return Err(PodError::InvalidSparsity(format!(
                "row pointer has {} entries, expected {}",
                row_ptr.len(),
                nrows + 1
            )));
        }
        if row_ptr[0] != 0 || row_ptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(PodError::InvalidSparsity(
                "row pointer must start at 0 and be non-decreasing".into(),
            ));
        }
        let nnz = row_ptr[nrows];
        if col_idx.len() != nnz || values.len() != nnz {
            return Err(PodError::InvalidSparsity(format!(
                "row pointer declares {nnz} entries but got {} column indices and {} values",
                col_idx.len(),
                values.len()
            )));
        }
        if let Some(&j) = col_idx.iter().find(|&&j| j >= ncols) {
            return Err(PodError::InvalidSparsity(format!(
                "column index {j} out of range for {ncols} columns"
            )));
        }
        for (i, w) in row_ptr.windows(2).enumerate() {
            if col_idx[w[0]..w[1]].windows(2).any(|c| c[0] >= c[1]) {
                return Err(PodError::InvalidSparsity(format!(
                    "column indices of row {i} are not strictly increasing"
                )));
            }
        }
        // validated above, so the checked constructor cannot panic
        let symbolic = SymbolicSparseRowMat::new_checked(nrows, ncols, row_ptr, None, col_idx);
        Ok(Self { inner: SparseRowMat::new(symbolic, values) })
    }

    /// Build from `(row, column, value)` triplets; duplicate entries are summed.
    pub fn from_triplets(
        nrows: usize,
        ncols: usize,
        triplets: &[(usize, usize, T)],
    ) -> Result<Self> {
        let entries: Vec<Triplet<usize, usize, T>> =
            triplets.iter().map(|&(row, col, val)| Triplet::new(row, col, val)).collect();
        let inner = SparseRowMat::try_new_from_triplets(nrows, ncols, &entries).map_err(|e| {
            PodError::InvalidSparsity(format!("{nrows}x{ncols} triplet assembly failed: {e:?}"))
        })?;
        Ok(Self { inner })
    }

    /// The n×n identity.
    pub fn identity(n: usize) -> Self {
        let symbolic =
            SymbolicSparseRowMat::new_checked(n, n, (0..=n).collect(), None, (0..n).collect());
        Self { inner: SparseRowMat::new(symbolic, vec![T::one(); n]) }
    }

    /// Convert a dense matrix, keeping only nonzero entries.
    pub fn from_dense(dense: MatRef<'_, T>) -> Self {
        let (nrows, ncols) = (dense.nrows(), dense.ncols());
        let mut row_ptr = Vec::with_capacity(nrows + 1);
        let mut col_idx = Vec::new();
        let mut values = Vec::new();
        row_ptr.push(0);
        for i in 0..nrows {
            for j in 0..ncols {
                let v = dense[(i, j)];
                if v != T::zero() {
                    col_idx.push(j);
                    values.push(v);
                }
            }
            row_ptr.push(col_idx.len());
        }
        let symbolic = SymbolicSparseRowMat::new_checked(nrows, ncols, row_ptr, None, col_idx);
        Self { inner: SparseRowMat::new(symbolic, values) }
    }

    pub fn to_dense(&self) -> Mat<T> {
        self.inner.to_dense()
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.inner.val().len()
    }

    /// Returns `self + alpha * other`. Both operands must have the same shape.
    pub fn add_scaled(&self, other: &Self, alpha: T) -> Result<Self> {
        if self.inner.nrows() != other.inner.nrows() || self.inner.ncols() != other.inner.ncols() {
            return Err(PodError::InvalidSparsity(format!(
                "cannot add a {}x{} matrix to a {}x{} matrix",
                other.inner.nrows(),
                other.inner.ncols(),
                self.inner.nrows(),
                self.inner.ncols()
            )));
        }
        let mut triplets = Vec::with_capacity(self.nnz() + other.nnz());
        for (m, scale) in [(self, T::one()), (other, alpha)] {
            for i in 0..m.inner.nrows() {
                let columns = m.inner.symbolic().col_idx_of_row_raw(i);
                for (&j, &v) in columns.iter().zip(m.inner.val_of_row(i)) {
                    triplets.push((i, j, scale * v));
                }
            }
        }
        Self::from_triplets(self.inner.nrows(), self.inner.ncols(), &triplets)
    }
}

impl<T: ComplexField + Float> MatVec<T> for CsrMatrix<T> {
    fn nrows(&self) -> usize {
        self.inner.nrows()
    }
    fn ncols(&self) -> usize {
        self.inner.ncols()
    }
    fn matvec(&self, x: &[T], y: &mut [T]) {
        assert_eq!(x.len(), self.ncols());
        assert_eq!(y.len(), self.nrows());
        let symbolic = self.inner.symbolic();
        for (i, yi) in y.iter_mut().enumerate() {
            *yi = symbolic
                .col_idx_of_row_raw(i)
                .iter()
                .zip(self.inner.val_of_row(i))
                .fold(T::zero(), |acc, (&j, &v)| acc + v * x[j]);
        }
    }
}
