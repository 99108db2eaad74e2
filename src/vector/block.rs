//! A full-order state vector split into equally sized blocks.
//!
//! Each block holds one field component (e.g. one velocity direction) over the
//! same set of degrees of freedom, so a single `block_size × block_size`
//! operator can act on every block independently. Blocks are stored
//! contiguously in one allocation.

use crate::core::traits::InnerProduct;
use crate::error::{PodError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockVector {
    n_blocks: usize,
    block_size: usize,
    data: Vec<f64>,
}

impl BlockVector {
    pub fn zeros(n_blocks: usize, block_size: usize) -> Self {
        Self { n_blocks, block_size, data: vec![0.0; n_blocks * block_size] }
    }

    /// Build from one `Vec` per block. All blocks must have the same length.
    pub fn from_blocks(blocks: Vec<Vec<f64>>) -> Result<Self> {
        let block_size = blocks.first().map_or(0, Vec::len);
        let ragged = blocks.iter().enumerate().find(|(_, b)| b.len() != block_size);
        if let Some((index, block)) = ragged {
            return Err(PodError::BlockSizeMismatch {
                index,
                expected: block_size,
                found: block.len(),
            });
        }
        let n_blocks = blocks.len();
        let data = blocks.into_iter().flatten().collect();
        Ok(Self { n_blocks, block_size, data })
    }

    /// Wrap a flat slice of `n_blocks * block_size` values, block after block.
    pub fn from_flat(n_blocks: usize, block_size: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != n_blocks * block_size {
            return Err(PodError::CoefficientLength {
                expected: n_blocks * block_size,
                found: data.len(),
            });
        }
        Ok(Self { n_blocks, block_size, data })
    }

    pub fn n_blocks(&self) -> usize {
        self.n_blocks
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Total number of entries across all blocks.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn same_shape(&self, other: &Self) -> bool {
        self.n_blocks == other.n_blocks && self.block_size == other.block_size
    }

    pub fn block(&self, b: usize) -> &[f64] {
        &self.data[b * self.block_size..(b + 1) * self.block_size]
    }

    pub fn block_mut(&mut self, b: usize) -> &mut [f64] {
        &mut self.data[b * self.block_size..(b + 1) * self.block_size]
    }

    pub fn blocks(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.n_blocks).map(|b| self.block(b))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Euclidean inner product over all blocks.
    pub fn dot(&self, other: &Self) -> f64 {
        assert!(self.same_shape(other), "block vectors must have the same shape");
        let ip = ();
        ip.dot(self.as_slice(), other.as_slice())
    }

    pub fn norm(&self) -> f64 {
        let ip = ();
        ip.norm(self.as_slice())
    }

    /// self ← self + alpha · x
    pub fn add_scaled(&mut self, alpha: f64, x: &Self) {
        assert!(self.same_shape(x), "block vectors must have the same shape");
        for (yi, xi) in self.data.iter_mut().zip(&x.data) {
            *yi += alpha * xi;
        }
    }

    pub fn scale(&mut self, alpha: f64) {
        self.data.iter_mut().for_each(|v| *v *= alpha);
    }

    pub fn fill(&mut self, value: f64) {
        self.data.iter_mut().for_each(|v| *v = value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_are_contiguous_views() {
        let blocks = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let mut v = BlockVector::from_blocks(blocks).unwrap();
        assert_eq!(v.n_blocks(), 3);
        assert_eq!(v.block_size(), 2);
        assert_eq!(v.block(1), &[3.0, 4.0]);
        v.block_mut(2)[0] = -5.0;
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0, 4.0, -5.0, 6.0]);
        assert_eq!(v.blocks().count(), 3);
    }

    #[test]
    fn empty_blocks_are_still_counted() {
        let v = BlockVector::from_blocks(vec![Vec::new(), Vec::new()]).unwrap();
        assert_eq!(v.n_blocks(), 2);
        assert!(v.is_empty());
        assert_eq!(v.blocks().count(), 2);
        assert!(v.blocks().all(|b| b.is_empty()));
        assert_eq!(BlockVector::zeros(3, 0).blocks().count(), 3);
    }

    #[test]
    fn ragged_blocks_are_rejected() {
        let err = BlockVector::from_blocks(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, PodError::BlockSizeMismatch { index: 1, expected: 2, found: 1 });
        assert!(BlockVector::from_flat(2, 3, vec![0.0; 5]).is_err());
    }

    #[test]
    fn axpy_scale_and_dot() {
        let mut y = BlockVector::from_flat(2, 2, vec![1.0, 1.0, 1.0, 1.0]).unwrap();
        let x = BlockVector::from_flat(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        y.add_scaled(2.0, &x);
        assert_eq!(y.as_slice(), &[3.0, 5.0, 7.0, 9.0]);
        y.scale(0.5);
        assert_eq!(y.dot(&x), 0.5 * (3.0 + 10.0 + 21.0 + 36.0));
        y.fill(0.0);
        assert_eq!(y.norm(), 0.0);
    }
}
