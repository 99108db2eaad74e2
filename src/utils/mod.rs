pub mod compare;

pub use compare::{block_vectors_equal, matrices_equal, vectors_equal};
