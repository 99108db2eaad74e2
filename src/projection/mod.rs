//! Galerkin projection of full-order operators onto a reduced basis.
//!
//! For a basis `φ_0 … φ_{r-1}` and a full-order operator `A` acting on each
//! block, the reduced matrix is
//!
//! `R[row, column] = Σ_{b ∈ active} φ_row.b · (A φ_column.b)`.
//!
//! `A` is applied once per (column, block) and the result reused for every
//! row, so a projection costs `r · |active|` operator applications plus
//! `r² · |active|` inner products. Columns are independent and computed in
//! parallel.

use crate::core::traits::{InnerProduct, MatVec};
use crate::error::{PodError, Result};
use crate::matrix::ReducedMatrix;
use crate::parallel::WorkerPool;
use crate::pod::Basis;
use crate::pod::basis::check_shape;
use crate::vector::BlockVector;
use log::debug;

pub struct ReducedOperatorProjector {
    pool: WorkerPool,
}

impl Default for ReducedOperatorProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl ReducedOperatorProjector {
    pub fn new() -> Self {
        Self { pool: WorkerPool::global() }
    }

    pub fn with_num_threads(num_threads: usize) -> Result<Self> {
        Ok(Self { pool: WorkerPool::new(Some(num_threads))? })
    }

    /// Project `operator` onto `basis`, summing over the blocks in `active_blocks`.
    pub fn project<M>(
        &self,
        basis: &Basis,
        operator: &M,
        active_blocks: &[usize],
    ) -> Result<ReducedMatrix>
    where
        M: MatVec<f64> + Sync + ?Sized,
    {
        let blocks = validate(basis, operator, active_blocks)?;
        let rank = basis.rank();
        debug!(
            "projecting {}x{} operator onto {rank} POD vectors over blocks {blocks:?}",
            operator.nrows(),
            operator.ncols()
        );

        let mut columns = vec![vec![0.0; rank]; rank];
        let vectors = basis.vectors();
        let block_size = basis.block_size();
        self.pool.for_each_mut(&mut columns, |column, out| {
            let ip = ();
            let mut temp = vec![0.0; block_size];
            for &b in &blocks {
                operator.matvec(vectors[column].block(b), &mut temp);
                for (row, entry) in out.iter_mut().enumerate() {
                    *entry += ip.dot(vectors[row].block(b), &temp[..]);
                }
            }
        });
        Ok(ReducedMatrix::from_fn(rank, rank, |row, column| columns[column][row]))
    }

    /// [`project`](Self::project) over every block.
    pub fn project_all<M>(&self, basis: &Basis, operator: &M) -> Result<ReducedMatrix>
    where
        M: MatVec<f64> + Sync + ?Sized,
    {
        let all: Vec<usize> = (0..basis.n_blocks()).collect();
        self.project(basis, operator, &all)
    }

    /// `c[k] = Σ_{b ∈ active} (A w.b) · φ_k.b`, the reduced image of a fixed
    /// full-order vector such as the mean flow.
    pub fn project_vector<M>(
        &self,
        basis: &Basis,
        operator: &M,
        w: &BlockVector,
        active_blocks: &[usize],
    ) -> Result<Vec<f64>>
    where
        M: MatVec<f64> + Sync + ?Sized,
    {
        let blocks = validate(basis, operator, active_blocks)?;
        check_shape(basis.mean(), w, 0)?;
        let ip = ();
        let mut contribution = vec![0.0; basis.rank()];
        let mut temp = vec![0.0; basis.block_size()];
        for &b in &blocks {
            operator.matvec(w.block(b), &mut temp);
            for (c, pod) in contribution.iter_mut().zip(basis.vectors()) {
                *c += ip.dot(&temp[..], pod.block(b));
            }
        }
        Ok(contribution)
    }

    /// [`project_vector`](Self::project_vector) over every block.
    pub fn project_vector_all<M>(
        &self,
        basis: &Basis,
        operator: &M,
        w: &BlockVector,
    ) -> Result<Vec<f64>>
    where
        M: MatVec<f64> + Sync + ?Sized,
    {
        let all: Vec<usize> = (0..basis.n_blocks()).collect();
        self.project_vector(basis, operator, w, &all)
    }
}

/// Checks the operator shape and returns the active blocks sorted and deduplicated.
fn validate<M>(basis: &Basis, operator: &M, active_blocks: &[usize]) -> Result<Vec<usize>>
where
    M: MatVec<f64> + ?Sized,
{
    let block_size = basis.block_size();
    if operator.nrows() != block_size || operator.ncols() != block_size {
        return Err(PodError::OperatorShape {
            nrows: operator.nrows(),
            ncols: operator.ncols(),
            block_size,
        });
    }
    if let Some(&block) = active_blocks.iter().find(|&&b| b >= basis.n_blocks()) {
        return Err(PodError::BlockIndexOutOfRange { block, n_blocks: basis.n_blocks() });
    }
    let mut blocks = active_blocks.to_vec();
    blocks.sort_unstable();
    blocks.dedup();
    Ok(blocks)
}

/// Project over every block with the global worker pool.
pub fn create_reduced_matrix<M>(basis: &Basis, operator: &M) -> Result<ReducedMatrix>
where
    M: MatVec<f64> + Sync + ?Sized,
{
    ReducedOperatorProjector::new().project_all(basis, operator)
}
