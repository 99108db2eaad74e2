//! Options for basis construction and reduced-model assembly.
//!
//! `PodOptions` drives the method of snapshots (how many vectors to keep,
//! whether to center the trajectory, how to treat degenerate modes, and the
//! worker count), and `RomOptions` carries the physical parameters used when
//! assembling the reduced operators.

/// What to do with a retained mode whose eigenpair is unusable (a NaN
/// eigenvalue or eigenvector coefficient, or an eigenvalue that is negative
/// beyond the tolerance).
///
/// Under `Skip`, NaN coefficients only drop their own snapshot term and the
/// vector is still normalized by a valid singular value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegenerateModePolicy {
    /// Keep an unusable eigenvalue as a zero vector with a zero singular value.
    #[default]
    Skip,
    /// Fail the whole build.
    Reject,
}

/// Method-of-snapshots parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PodOptions {
    /// Requested number of POD vectors; clamped to the number of snapshots.
    pub n_pod_vectors: usize,

    /// Subtract the mean from every snapshot before decomposition.
    pub center_trajectory: bool,

    pub degenerate_policy: DegenerateModePolicy,

    /// Relative tolerance, scaled by the largest eigenvalue magnitude, below
    /// which an eigenvalue counts as zero and an imaginary part as noise.
    pub eigenvalue_tolerance: f64,

    /// Worker threads for the parallel stages; `None` uses the global rayon pool.
    pub num_threads: Option<usize>,
}

impl Default for PodOptions {
    fn default() -> Self {
        Self {
            n_pod_vectors: usize::MAX,
            center_trajectory: true,
            degenerate_policy: DegenerateModePolicy::Skip,
            eigenvalue_tolerance: 1e-10,
            num_threads: None,
        }
    }
}

impl PodOptions {
    pub fn new(n_pod_vectors: usize) -> Self {
        Self { n_pod_vectors, ..Self::default() }
    }

    pub fn with_centering(mut self, center: bool) -> Self {
        self.center_trajectory = center;
        self
    }

    pub fn with_degenerate_policy(mut self, policy: DegenerateModePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    pub fn with_eigenvalue_tolerance(mut self, tol: f64) -> Self {
        self.eigenvalue_tolerance = tol;
        self
    }

    pub fn with_num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n);
        self
    }
}

/// Reduced-model assembly parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RomOptions {
    /// Reynolds number; the viscous terms are scaled by `1 / reynolds_number`.
    pub reynolds_number: f64,

    /// Blocks on which the boundary (outflow) operator acts.
    pub boundary_blocks: Vec<usize>,

    /// Use only the leading POD vectors; `None` keeps the whole basis.
    pub n_pod_vectors: Option<usize>,
}

impl Default for RomOptions {
    fn default() -> Self {
        Self {
            reynolds_number: 1.0,
            boundary_blocks: vec![0],
            n_pod_vectors: None,
        }
    }
}

impl RomOptions {
    pub fn new(reynolds_number: f64) -> Self {
        Self { reynolds_number, ..Self::default() }
    }

    pub fn with_boundary_blocks(mut self, blocks: Vec<usize>) -> Self {
        self.boundary_blocks = blocks;
        self
    }

    pub fn with_n_pod_vectors(mut self, n: usize) -> Self {
        self.n_pod_vectors = Some(n);
        self
    }
}
