//! Method of snapshots.
//!
//! Given `N` snapshots of dimension `n_blocks * block_size` and a mass operator
//! `M` acting on each block, the POD basis is obtained from the `N × N`
//! correlation matrix `C[i, j] = Σ_b (M s_i.b) · s_j.b` instead of the full
//! covariance operator:
//!
//! 1. `C = V Λ Vᵀ` (symmetric eigendecomposition),
//! 2. `σ_k = sqrt(λ_k)` with the eigenpairs sorted by decreasing `λ`,
//! 3. `φ_k = (1 / σ_k) Σ_i V[i, k] s_i`.
//!
//! The snapshot-by-dof matrix is never formed. Applying `M` is the dominant
//! cost, so it is applied once per row of `C` and reused for every column.
//!
//! # References
//! - Sirovich, L. (1987). Turbulence and the dynamics of coherent structures.
//! - Holmes, Lumley & Berkooz. Turbulence, Coherent Structures, Dynamical Systems and Symmetry.

use std::borrow::Cow;

use crate::config::{DegenerateModePolicy, PodOptions};
use crate::core::traits::MatVec;
use crate::error::{PodError, Result};
use crate::parallel::WorkerPool;
use crate::pod::basis::{Basis, Mode, check_shape};
use crate::pod::eigen::{FaerEigensolver, Spectrum, SymmetricEigensolver};
use crate::vector::BlockVector;
use faer::Mat;
use log::{debug, info, warn};

/// Builds a [`Basis`] from a snapshot trajectory.
pub struct SnapshotBasisBuilder<E = FaerEigensolver> {
    options: PodOptions,
    solver: E,
}

impl SnapshotBasisBuilder<FaerEigensolver> {
    pub fn new(options: PodOptions) -> Self {
        Self { options, solver: FaerEigensolver }
    }
}

impl Default for SnapshotBasisBuilder<FaerEigensolver> {
    fn default() -> Self {
        Self::new(PodOptions::default())
    }
}

/// One retained eigenpair, resolved before reconstruction.
#[derive(Debug, Clone, Copy)]
struct ModePlan {
    column: usize,
    mode: Mode,
    singular_value: f64,
}

impl<E: SymmetricEigensolver> SnapshotBasisBuilder<E> {
    /// Replace the eigensolver.
    pub fn with_solver<F: SymmetricEigensolver>(self, solver: F) -> SnapshotBasisBuilder<F> {
        SnapshotBasisBuilder { options: self.options, solver }
    }

    pub fn options(&self) -> &PodOptions {
        &self.options
    }

    /// Compute the POD basis of `snapshots` with respect to `mass`.
    pub fn build<M>(&self, mass: &M, snapshots: &[BlockVector]) -> Result<Basis>
    where
        M: MatVec<f64> + ?Sized,
    {
        let first = snapshots.first().ok_or(PodError::NoSnapshots)?;
        let (n_blocks, block_size) = (first.n_blocks(), first.block_size());
        for (index, s) in snapshots.iter().enumerate() {
            check_shape(first, s, index)?;
        }
        if mass.nrows() != block_size || mass.ncols() != block_size {
            return Err(PodError::OperatorShape {
                nrows: mass.nrows(),
                ncols: mass.ncols(),
                block_size,
            });
        }
        let n_snapshots = snapshots.len();

        let mut mean = BlockVector::zeros(n_blocks, block_size);
        let mean_weight = 1.0 / n_snapshots as f64;
        for s in snapshots {
            mean.add_scaled(mean_weight, s);
        }

        let working: Cow<'_, [BlockVector]> = if self.options.center_trajectory {
            Cow::Owned(
                snapshots
                    .iter()
                    .map(|s| {
                        let mut centered = s.clone();
                        centered.add_scaled(-1.0, &mean);
                        centered
                    })
                    .collect(),
            )
        } else {
            Cow::Borrowed(snapshots)
        };

        debug!(
            "assembling {n_snapshots}x{n_snapshots} correlation matrix \
             ({n_blocks} blocks of {block_size} dofs)"
        );
        let correlation = correlation_matrix(mass, &working);

        let spectrum = self.solver.decompose(correlation.as_ref())?;
        if spectrum.len() != n_snapshots
            || spectrum.vectors.nrows() != n_snapshots
            || spectrum.vectors.ncols() != n_snapshots
        {
            return Err(PodError::Eigensolver(format!(
                "expected {n_snapshots} eigenpairs, got {} values and a {}x{} eigenvector matrix",
                spectrum.len(),
                spectrum.vectors.nrows(),
                spectrum.vectors.ncols()
            )));
        }

        let n_pod_vectors = n_snapshots.min(self.options.n_pod_vectors);
        if self.options.n_pod_vectors > n_snapshots && self.options.n_pod_vectors != usize::MAX {
            warn!(
                "requested {} POD vectors but only {n_snapshots} snapshots are available",
                self.options.n_pod_vectors
            );
        }
        let plan = self.plan_modes(&spectrum, n_pod_vectors)?;

        let pool = WorkerPool::new(self.options.num_threads)?;
        debug!("reconstructing {n_pod_vectors} POD vectors on {} workers", pool.size());
        let mut vectors = vec![BlockVector::zeros(n_blocks, block_size); n_pod_vectors];
        let eigenvectors = &spectrum.vectors;
        let snapshots = &*working;
        pool.for_each_mut(&mut vectors, |k, pod_vector| {
            let ModePlan { column, mode, singular_value } = plan[k];
            if mode == Mode::Degenerate {
                return;
            }
            for (i, snapshot) in snapshots.iter().enumerate() {
                let c = eigenvectors[(i, column)];
                if !c.is_nan() {
                    pod_vector.add_scaled(c, snapshot);
                }
            }
            if mode == Mode::Valid {
                pod_vector.scale(1.0 / singular_value);
            }
        });

        let singular_values: Vec<f64> = plan.iter().map(|p| p.singular_value).collect();
        let modes = plan.iter().map(|p| p.mode).collect();
        info!(
            "POD basis: {n_snapshots} snapshots, {n_pod_vectors} vectors, \
             leading singular value {:.6e}",
            singular_values.first().copied().unwrap_or(0.0)
        );
        Ok(Basis::new(vectors, singular_values, modes, mean, self.options.center_trajectory))
    }

    /// Sort eigenpairs by decreasing eigenvalue, keep the leading
    /// `n_pod_vectors`, and classify each one.
    fn plan_modes(&self, spectrum: &Spectrum, n_pod_vectors: usize) -> Result<Vec<ModePlan>> {
        let scale = spectrum
            .values
            .iter()
            .filter(|v| !v.is_nan())
            .map(|v| v.re.abs().max(v.im.abs()))
            .fold(f64::MIN_POSITIVE, f64::max);
        let tol = self.options.eigenvalue_tolerance * scale;

        for (index, value) in spectrum.values.iter().enumerate() {
            if value.im.abs() > tol {
                return Err(PodError::ComplexEigenvalue { index, re: value.re, im: value.im });
            }
        }

        let sort_key = |i: usize| {
            let v = spectrum.values[i];
            if v.is_nan() { f64::NEG_INFINITY } else { v.re }
        };
        let mut order: Vec<usize> = (0..spectrum.len()).collect();
        order.sort_by(|&a, &b| sort_key(b).total_cmp(&sort_key(a)));

        let reject = self.options.degenerate_policy == DegenerateModePolicy::Reject;
        let mut plan = Vec::with_capacity(n_pod_vectors);
        for (index, &column) in order.iter().take(n_pod_vectors).enumerate() {
            let lambda = spectrum.values[column].re;
            let nan_coefficients = (0..spectrum.vectors.nrows())
                .filter(|&i| spectrum.vectors[(i, column)].is_nan())
                .count();
            if nan_coefficients > 0 && !spectrum.values[column].is_nan() {
                if reject {
                    return Err(PodError::DegenerateMode { index });
                }
                warn!(
                    "POD mode {index}: dropping {nan_coefficients} NaN eigenvector coefficient(s)"
                );
            }
            let (mode, singular_value) = if spectrum.values[column].is_nan() {
                if reject {
                    return Err(PodError::DegenerateMode { index });
                }
                warn!("POD mode {index} has a NaN eigenvalue; keeping a zero vector");
                (Mode::Degenerate, 0.0)
            } else if lambda < -tol {
                if reject {
                    return Err(PodError::NegativeEigenvalue { index, value: lambda });
                }
                warn!(
                    "POD mode {index} has negative eigenvalue {lambda:.3e}; keeping a zero vector"
                );
                (Mode::Degenerate, 0.0)
            } else if lambda <= tol {
                warn!("POD mode {index} has a zero eigenvalue; leaving it unnormalized");
                (Mode::Null, 0.0)
            } else {
                (Mode::Valid, lambda.sqrt())
            };
            plan.push(ModePlan { column, mode, singular_value });
        }
        Ok(plan)
    }
}

/// The symmetric snapshot correlation matrix `C[i, j] = Σ_b (M s_i.b) · s_j.b`.
///
/// Only the lower triangle is computed; it is mirrored into the upper one.
pub fn correlation_matrix<M>(mass: &M, snapshots: &[BlockVector]) -> Mat<f64>
where
    M: MatVec<f64> + ?Sized,
{
    let n = snapshots.len();
    let mut correlation = Mat::<f64>::zeros(n, n);
    let Some(first) = snapshots.first() else {
        return correlation;
    };
    let mut temp = BlockVector::zeros(first.n_blocks(), first.block_size());
    for row in 0..n {
        for b in 0..first.n_blocks() {
            mass.matvec(snapshots[row].block(b), temp.block_mut(b));
        }
        for column in 0..=row {
            let value = temp.dot(&snapshots[column]);
            correlation[(row, column)] = value;
            correlation[(column, row)] = value;
        }
    }
    correlation
}

/// Method of snapshots with default options: keep `min(N, n_pod_vectors)`
/// vectors, optionally centering the trajectory first.
pub fn method_of_snapshots<M>(
    mass: &M,
    snapshots: &[BlockVector],
    n_pod_vectors: usize,
    center_trajectory: bool,
) -> Result<Basis>
where
    M: MatVec<f64> + ?Sized,
{
    let options = PodOptions::new(n_pod_vectors).with_centering(center_trajectory);
    SnapshotBasisBuilder::new(options).build(mass, snapshots)
}
