//! Block-partitioned state vectors.

pub mod block;
pub use block::BlockVector;
