//! Assembly of the linear part of a POD–Galerkin reduced-order model.
//!
//! Given a basis and the full-order mass, Laplace and boundary operators
//! (plus optional pre-assembled advective and gradient linearizations of the
//! convection term about the mean flow), this module produces
//! the dense reduced matrices together with the two constant vectors a ROM
//! time integrator needs:
//!
//! - the projected initial condition `a_0[k] = φ_k · M (u_0 - ū)`,
//! - the mean-flow contribution
//!   `f[k] = -(1/Re) φ_k · L ū + (1/Re) φ_k · B ū` (boundary blocks only).
//!
//! Mean terms vanish when the basis was built from an uncentered trajectory.
//! Nonlinear (quadratic) terms are not assembled here.

use std::borrow::Cow;

use bitflags::bitflags;
use log::{debug, info};

use crate::config::RomOptions;
use crate::core::traits::MatVec;
use crate::error::{PodError, Result};
use crate::matrix::ReducedMatrix;
use crate::pod::Basis;
use crate::pod::basis::check_shape;
use crate::projection::ReducedOperatorProjector;
use crate::utils::compare::{matrices_equal, vectors_equal};
use crate::vector::BlockVector;

bitflags! {
    /// Components of a [`ReducedModel`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RomComponents: u8 {
        const MASS = 1 << 0;
        const LAPLACE = 1 << 1;
        const BOUNDARY = 1 << 2;
        const ADVECTION = 1 << 3;
        const MEAN_CONTRIBUTION = 1 << 4;
        const INITIAL_CONDITION = 1 << 5;
        const GRADIENT = 1 << 6;
    }
}

/// Full-order operators, each acting on a single block.
pub struct FullOperators<'a> {
    pub mass: &'a (dyn MatVec<f64> + Sync),
    pub laplace: &'a (dyn MatVec<f64> + Sync),
    pub boundary: &'a (dyn MatVec<f64> + Sync),
    /// Linearization `(ū · ∇) u`.
    pub advection: Option<&'a (dyn MatVec<f64> + Sync)>,
    /// Linearization `(u · ∇) ū`.
    pub gradient: Option<&'a (dyn MatVec<f64> + Sync)>,
}

#[derive(Debug, Clone)]
pub struct ReducedModel {
    pub mass: ReducedMatrix,
    pub laplace: ReducedMatrix,
    pub boundary: ReducedMatrix,
    pub advection: Option<ReducedMatrix>,
    pub gradient: Option<ReducedMatrix>,
    pub mean_contribution: Vec<f64>,
    pub initial_condition: Option<Vec<f64>>,
}

impl ReducedModel {
    /// Number of POD vectors the model was assembled with.
    pub fn rank(&self) -> usize {
        self.mass.nrows()
    }

    /// Components that differ from `reference` by more than `tol` in any entry.
    pub fn mismatches(&self, reference: &ReducedModel, tol: f64) -> RomComponents {
        let mut differing = RomComponents::empty();
        let matrices = [
            (RomComponents::MASS, &self.mass, &reference.mass),
            (RomComponents::LAPLACE, &self.laplace, &reference.laplace),
            (RomComponents::BOUNDARY, &self.boundary, &reference.boundary),
        ];
        for (flag, ours, theirs) in matrices {
            if !matrices_equal(ours.as_ref(), theirs.as_ref(), tol) {
                differing |= flag;
            }
        }
        let optional = [
            (RomComponents::ADVECTION, &self.advection, &reference.advection),
            (RomComponents::GRADIENT, &self.gradient, &reference.gradient),
        ];
        for (flag, ours, theirs) in optional {
            let equal = match (ours, theirs) {
                (Some(ours), Some(theirs)) => matrices_equal(ours.as_ref(), theirs.as_ref(), tol),
                (None, None) => true,
                _ => false,
            };
            if !equal {
                differing |= flag;
            }
        }
        if !vectors_equal(&self.mean_contribution, &reference.mean_contribution, tol) {
            differing |= RomComponents::MEAN_CONTRIBUTION;
        }
        let initial_equal = match (&self.initial_condition, &reference.initial_condition) {
            (Some(ours), Some(theirs)) => vectors_equal(ours, theirs, tol),
            (None, None) => true,
            _ => false,
        };
        if !initial_equal {
            differing |= RomComponents::INITIAL_CONDITION;
        }
        differing
    }

    /// Fails with [`PodError::ReferenceMismatch`] unless every component matches `reference`.
    pub fn verify(&self, reference: &ReducedModel, tol: f64) -> Result<()> {
        let differing = self.mismatches(reference, tol);
        if differing.is_empty() {
            Ok(())
        } else {
            Err(PodError::ReferenceMismatch(differing))
        }
    }
}

pub struct RomAssembler {
    options: RomOptions,
    projector: ReducedOperatorProjector,
}

impl RomAssembler {
    pub fn new(options: RomOptions) -> Self {
        Self { options, projector: ReducedOperatorProjector::new() }
    }

    pub fn with_projector(mut self, projector: ReducedOperatorProjector) -> Self {
        self.projector = projector;
        self
    }

    pub fn options(&self) -> &RomOptions {
        &self.options
    }

    pub fn assemble(
        &self,
        basis: &Basis,
        operators: &FullOperators<'_>,
        initial: Option<&BlockVector>,
    ) -> Result<ReducedModel> {
        let re = self.options.reynolds_number;
        if !(re.is_finite() && re > 0.0) {
            return Err(PodError::InvalidParameter(format!(
                "Reynolds number must be positive, got {re}"
            )));
        }
        let basis = match self.options.n_pod_vectors {
            Some(n) => Cow::Owned(basis.truncated(n)?),
            None => Cow::Borrowed(basis),
        };
        let projector = &self.projector;
        let mean = basis.centering();
        debug!("assembling reduced model with {} POD vectors", basis.rank());

        let mass = projector.project_all(&*basis, operators.mass)?;
        let initial_condition = match initial {
            Some(u0) => {
                check_shape(basis.mean(), u0, 0)?;
                let mut centered = u0.clone();
                if let Some(mean) = mean {
                    centered.add_scaled(-1.0, mean);
                }
                Some(projector.project_vector_all(&*basis, operators.mass, &centered)?)
            }
            None => None,
        };

        let mut mean_contribution = vec![0.0; basis.rank()];
        let laplace = projector.project_all(&*basis, operators.laplace)?;
        if let Some(mean) = mean {
            let viscous = projector.project_vector_all(&*basis, operators.laplace, mean)?;
            for (f, v) in mean_contribution.iter_mut().zip(viscous) {
                *f -= v / re;
            }
        }

        let boundary_blocks = &self.options.boundary_blocks;
        let boundary = projector.project(&*basis, operators.boundary, boundary_blocks)?;
        if let Some(mean) = mean {
            let outflow =
                projector.project_vector(&*basis, operators.boundary, mean, boundary_blocks)?;
            for (f, v) in mean_contribution.iter_mut().zip(outflow) {
                *f += v / re;
            }
        }

        let advection = operators
            .advection
            .map(|a| projector.project_all(&*basis, a))
            .transpose()?;
        let gradient = operators
            .gradient
            .map(|g| projector.project_all(&*basis, g))
            .transpose()?;

        info!("reduced model assembled: rank {}, Re = {re}", basis.rank());
        Ok(ReducedModel {
            mass,
            laplace,
            boundary,
            advection,
            gradient,
            mean_contribution,
            initial_condition,
        })
    }
}
