//! Proper orthogonal decomposition by the method of snapshots.
//!
//! - [`snapshots`]: the basis builder and the correlation matrix.
//! - [`basis`]: the resulting [`Basis`] with truncation and coefficient maps.
//! - [`eigen`]: the eigensolver seam used for the correlation matrix.

pub mod basis;
pub mod eigen;
pub mod snapshots;

pub use basis::{Basis, Mode};
pub use eigen::{Eigenvalue, FaerEigensolver, Spectrum, SymmetricEigensolver};
pub use snapshots::{SnapshotBasisBuilder, correlation_matrix, method_of_snapshots};
