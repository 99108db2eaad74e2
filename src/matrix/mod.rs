//! Matrix module: sparse full-order operators and dense reduced matrices.

pub mod dense;
pub use dense::{ReducedMatrix, is_symmetric};
pub mod sparse;
pub use sparse::CsrMatrix;
