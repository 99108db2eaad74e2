//! The reduced basis produced by the method of snapshots.
//!
//! A `Basis` owns its POD vectors, the matching singular values (descending)
//! and the mean of the snapshot trajectory. Vectors are addressed densely by
//! `0..rank()`. After construction the only mutation is [`Basis::truncate`],
//! which drops trailing low-energy modes.

use crate::error::{PodError, Result};
use crate::vector::BlockVector;

/// Classification of a retained eigenpair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Positive eigenvalue; the vector is normalized by its singular value.
    Valid,
    /// Eigenvalue within tolerance of zero; the vector is left unnormalized.
    Null,
    /// NaN or negative eigenvalue; the vector is zero and the singular value is zero.
    Degenerate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Basis {
    vectors: Vec<BlockVector>,
    singular_values: Vec<f64>,
    modes: Vec<Mode>,
    mean: BlockVector,
    centered: bool,
}

impl Basis {
    pub(crate) fn new(
        vectors: Vec<BlockVector>,
        singular_values: Vec<f64>,
        modes: Vec<Mode>,
        mean: BlockVector,
        centered: bool,
    ) -> Self {
        debug_assert_eq!(vectors.len(), singular_values.len());
        debug_assert_eq!(vectors.len(), modes.len());
        Self { vectors, singular_values, modes, mean, centered }
    }

    /// Assemble a basis from externally stored parts (e.g. vectors read back
    /// from disk). Shapes must agree and singular values must be finite,
    /// non-negative and non-increasing.
    pub fn from_parts(
        vectors: Vec<BlockVector>,
        singular_values: Vec<f64>,
        mean: BlockVector,
        centered: bool,
    ) -> Result<Self> {
        if vectors.len() != singular_values.len() {
            return Err(PodError::InvalidBasis(format!(
                "{} vectors but {} singular values",
                vectors.len(),
                singular_values.len()
            )));
        }
        for (index, v) in vectors.iter().enumerate() {
            check_shape(&mean, v, index)?;
        }
        if let Some(s) = singular_values.iter().find(|s| !s.is_finite() || **s < 0.0) {
            return Err(PodError::InvalidBasis(format!(
                "singular value {s} is not a finite non-negative number"
            )));
        }
        if singular_values.windows(2).any(|w| w[0] < w[1]) {
            return Err(PodError::InvalidBasis(
                "singular values must be sorted in descending order".into(),
            ));
        }
        let modes = singular_values
            .iter()
            .map(|&s| if s > 0.0 { Mode::Valid } else { Mode::Null })
            .collect();
        Ok(Self::new(vectors, singular_values, modes, mean, centered))
    }

    /// Number of retained vectors.
    pub fn rank(&self) -> usize {
        self.vectors.len()
    }

    pub fn n_blocks(&self) -> usize {
        self.mean.n_blocks()
    }

    pub fn block_size(&self) -> usize {
        self.mean.block_size()
    }

    /// Basis vector `k`. Panics if `k >= rank()`.
    pub fn vector(&self, k: usize) -> &BlockVector {
        &self.vectors[k]
    }

    pub fn vectors(&self) -> &[BlockVector] {
        &self.vectors
    }

    /// Singular value `k`. Panics if `k >= rank()`.
    pub fn singular_value(&self, k: usize) -> f64 {
        self.singular_values[k]
    }

    pub fn singular_values(&self) -> &[f64] {
        &self.singular_values
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    /// Arithmetic mean of the input snapshots.
    pub fn mean(&self) -> &BlockVector {
        &self.mean
    }

    pub fn is_centered(&self) -> bool {
        self.centered
    }

    /// The offset the basis vectors are relative to: the mean for a centered
    /// trajectory, `None` when the snapshots were decomposed as given.
    pub fn centering(&self) -> Option<&BlockVector> {
        self.centered.then_some(&self.mean)
    }

    /// Keep the leading `k` vectors and singular values.
    pub fn truncate(&mut self, k: usize) -> Result<()> {
        if k > self.rank() {
            return Err(PodError::InvalidTruncation { requested: k, rank: self.rank() });
        }
        self.vectors.truncate(k);
        self.singular_values.truncate(k);
        self.modes.truncate(k);
        Ok(())
    }

    /// A copy holding only the leading `k` vectors.
    pub fn truncated(&self, k: usize) -> Result<Self> {
        if k > self.rank() {
            return Err(PodError::InvalidTruncation { requested: k, rank: self.rank() });
        }
        Ok(Self::new(
            self.vectors[..k].to_vec(),
            self.singular_values[..k].to_vec(),
            self.modes[..k].to_vec(),
            self.mean.clone(),
            self.centered,
        ))
    }

    /// `coefficients[k] = vector(k) · v`, unweighted over all blocks.
    pub fn project_to_coefficients(&self, v: &BlockVector) -> Result<Vec<f64>> {
        check_shape(&self.mean, v, 0)?;
        Ok(self.vectors.iter().map(|pod| pod.dot(v)).collect())
    }

    /// `Σ_k coefficients[k] · vector(k)`.
    pub fn reconstruct(&self, coefficients: &[f64]) -> Result<BlockVector> {
        if coefficients.len() != self.rank() {
            return Err(PodError::CoefficientLength {
                expected: self.rank(),
                found: coefficients.len(),
            });
        }
        let mut out = BlockVector::zeros(self.n_blocks(), self.block_size());
        for (c, pod) in coefficients.iter().zip(&self.vectors) {
            out.add_scaled(*c, pod);
        }
        Ok(out)
    }
}

/// Fails unless `v` has the block layout of `reference`; `index` names `v` in the error.
pub(crate) fn check_shape(reference: &BlockVector, v: &BlockVector, index: usize) -> Result<()> {
    if v.n_blocks() != reference.n_blocks() {
        return Err(PodError::BlockCountMismatch {
            index,
            expected: reference.n_blocks(),
            found: v.n_blocks(),
        });
    }
    if v.block_size() != reference.block_size() {
        return Err(PodError::BlockSizeMismatch {
            index,
            expected: reference.block_size(),
            found: v.block_size(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit(n: usize, i: usize) -> BlockVector {
        let mut v = BlockVector::zeros(1, n);
        v.block_mut(0)[i] = 1.0;
        v
    }

    fn axis_basis() -> Basis {
        Basis::from_parts(
            vec![unit(3, 0), unit(3, 1)],
            vec![2.0, 1.0],
            BlockVector::zeros(1, 3),
            true,
        )
        .unwrap()
    }

    #[test]
    fn project_then_reconstruct_is_orthogonal_projection() {
        let basis = axis_basis();
        let v = BlockVector::from_flat(1, 3, vec![3.0, -4.0, 5.0]).unwrap();
        let c = basis.project_to_coefficients(&v).unwrap();
        assert_eq!(c, vec![3.0, -4.0]);
        let back = basis.reconstruct(&c).unwrap();
        assert_abs_diff_eq!(back.as_slice(), &[3.0, -4.0, 0.0][..], epsilon = 1e-14);
    }

    #[test]
    fn truncate_drops_trailing_modes() {
        let mut basis = axis_basis();
        assert!(basis.truncate(3).is_err());
        let one = basis.truncated(1).unwrap();
        assert_eq!(one.rank(), 1);
        basis.truncate(1).unwrap();
        assert_eq!(basis, one);
        assert_eq!(basis.singular_values(), &[2.0]);
        assert_eq!(basis.modes(), &[Mode::Valid]);
        basis.truncate(0).unwrap();
        assert_eq!(basis.rank(), 0);
        assert_eq!(basis.block_size(), 3);
    }

    #[test]
    fn shape_mismatches_fail_fast() {
        let basis = axis_basis();
        let wrong = BlockVector::zeros(2, 3);
        assert_eq!(
            basis.project_to_coefficients(&wrong).unwrap_err(),
            PodError::BlockCountMismatch { index: 0, expected: 1, found: 2 }
        );
        assert_eq!(
            basis.reconstruct(&[1.0]).unwrap_err(),
            PodError::CoefficientLength { expected: 2, found: 1 }
        );
    }

    #[test]
    fn from_parts_validates_invariants() {
        let mean = BlockVector::zeros(1, 3);
        assert!(Basis::from_parts(vec![unit(3, 0)], vec![], mean.clone(), false).is_err());
        let ascending = vec![1.0, 2.0];
        let vectors = vec![unit(3, 0), unit(3, 1)];
        assert!(Basis::from_parts(vectors, ascending, mean.clone(), false).is_err());
        assert!(Basis::from_parts(vec![unit(4, 0)], vec![1.0], mean.clone(), false).is_err());
        assert!(Basis::from_parts(vec![unit(3, 0)], vec![f64::NAN], mean.clone(), false).is_err());
        let basis = Basis::from_parts(vec![unit(3, 0)], vec![0.0], mean, false).unwrap();
        assert_eq!(basis.modes(), &[Mode::Null]);
        assert!(basis.centering().is_none());
    }
}
