use thiserror::Error;

use crate::rom::RomComponents;

// Unified error type for podrom

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PodError {
    #[error("at least one snapshot is required")]
    NoSnapshots,
    #[error("snapshot {index} has {found} blocks, expected {expected}")]
    BlockCountMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("vector {index} has blocks of size {found}, expected {expected}")]
    BlockSizeMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("operator is {nrows}x{ncols} but blocks have {block_size} entries")]
    OperatorShape {
        nrows: usize,
        ncols: usize,
        block_size: usize,
    },
    #[error("block index {block} out of range for {n_blocks} blocks")]
    BlockIndexOutOfRange { block: usize, n_blocks: usize },
    #[error("expected {expected} reduced coefficients, got {found}")]
    CoefficientLength { expected: usize, found: usize },
    #[error(
        "eigenvalue {index} is complex ({re} + {im}i); \
         the mass operator is not symmetric positive semi-definite"
    )]
    ComplexEigenvalue { index: usize, re: f64, im: f64 },
    #[error("eigenvalue {index} is negative ({value})")]
    NegativeEigenvalue { index: usize, value: f64 },
    #[error("mode {index} is degenerate (NaN eigenvalue or eigenvector)")]
    DegenerateMode { index: usize },
    #[error("eigendecomposition failed: {0}")]
    Eigensolver(String),
    #[error("cannot truncate a basis of rank {rank} to {requested} vectors")]
    InvalidTruncation { requested: usize, rank: usize },
    #[error("invalid sparse matrix: {0}")]
    InvalidSparsity(String),
    #[error("invalid basis: {0}")]
    InvalidBasis(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
    #[error("reduced model differs from the reference in {0:?}")]
    ReferenceMismatch(RomComponents),
}

pub type Result<T> = std::result::Result<T, PodError>;
