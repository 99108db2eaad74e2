//! podrom: proper orthogonal decomposition and Galerkin projection over Faer
//!
//! This crate builds reduced bases from simulation snapshots by the method of
//! snapshots and projects full-order finite-element operators onto them,
//! producing the small dense matrices of a reduced-order model.

pub mod parallel;

pub mod config;
pub mod core;
pub mod error;
pub mod matrix;
pub mod pod;
pub mod projection;
pub mod rom;
pub mod utils;
pub mod vector;

// Re-exports for convenience
pub use config::*;
pub use self::core::*;
pub use error::*;
pub use matrix::*;
pub use pod::*;
pub use projection::*;
pub use rom::*;
pub use utils::*;
pub use vector::*;
