//! Galerkin projection tests: linearity in the operator, symmetry
//! preservation, agreement with a dense reference computation, and
//! restriction to a subset of blocks.

use approx::assert_abs_diff_eq;
use faer::Mat;
use podrom::{
    Basis, BlockVector, CsrMatrix, ReducedOperatorProjector, is_symmetric, method_of_snapshots,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_basis(n_blocks: usize, block_size: usize, rank: usize, seed: u64) -> Basis {
    let mut rng = StdRng::seed_from_u64(seed);
    let snapshots: Vec<BlockVector> = (0..rank + 2)
        .map(|_| {
            let data = (0..n_blocks * block_size).map(|_| rng.r#gen::<f64>() - 0.5).collect();
            BlockVector::from_flat(n_blocks, block_size, data).unwrap()
        })
        .collect();
    method_of_snapshots(&CsrMatrix::identity(block_size), &snapshots, rank, true).unwrap()
}

/// Random tridiagonal operator; symmetric when `symmetric` is set.
fn random_tridiagonal(n: usize, symmetric: bool, seed: u64) -> CsrMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut triplets = Vec::new();
    for i in 0..n {
        triplets.push((i, i, 2.0 + rng.r#gen::<f64>()));
        if i + 1 < n {
            let upper = rng.r#gen::<f64>();
            let lower = if symmetric { upper } else { rng.r#gen::<f64>() };
            triplets.push((i, i + 1, upper));
            triplets.push((i + 1, i, lower));
        }
    }
    CsrMatrix::from_triplets(n, n, &triplets).unwrap()
}

/// Test that projecting A + B equals the sum of the projections of A and B.
#[test]
fn projection_is_linear_in_the_operator() {
    let basis = random_basis(2, 30, 5, 11);
    let a = random_tridiagonal(30, false, 12);
    let b = random_tridiagonal(30, false, 13);
    let sum = a.add_scaled(&b, 1.0).unwrap();
    let projector = ReducedOperatorProjector::new();
    let ra = projector.project_all(&basis, &a).unwrap();
    let rb = projector.project_all(&basis, &b).unwrap();
    let rs = projector.project_all(&basis, &sum).unwrap();
    for i in 0..5 {
        for j in 0..5 {
            assert_abs_diff_eq!(ra[(i, j)] + rb[(i, j)], rs[(i, j)], epsilon = 1e-12);
        }
    }
}

/// Test that a symmetric operator projected over all blocks gives a symmetric reduced matrix.
#[test]
fn symmetric_operator_gives_symmetric_reduced_matrix() {
    let basis = random_basis(3, 20, 6, 21);
    let a = random_tridiagonal(20, true, 22);
    let r = ReducedOperatorProjector::new().project_all(&basis, &a).unwrap();
    assert!(is_symmetric(r.as_ref(), 1e-12));
    let nonsymmetric = random_tridiagonal(20, false, 23);
    let r = ReducedOperatorProjector::new().project_all(&basis, &nonsymmetric).unwrap();
    assert!(!is_symmetric(r.as_ref(), 1e-12));
}

/// Test the sparse, parallel projection against a dense Φᵀ (I ⊗ A) Φ computation.
#[test]
fn matches_dense_reference() {
    let (n_blocks, block_size, rank) = (2, 16, 4);
    let basis = random_basis(n_blocks, block_size, rank, 31);
    let a = random_tridiagonal(block_size, false, 32);
    let dense_a = a.to_dense();

    let n = n_blocks * block_size;
    let phi = Mat::from_fn(n, rank, |i, k| basis.vector(k).as_slice()[i]);
    let full = Mat::from_fn(n, n, |i, j| {
        if i / block_size == j / block_size {
            dense_a[(i % block_size, j % block_size)]
        } else {
            0.0
        }
    });
    let phi_t = phi.transpose();
    let expected = &phi_t * &full * &phi;

    let projector = ReducedOperatorProjector::with_num_threads(3).unwrap();
    let r = projector.project_all(&basis, &a).unwrap();
    for i in 0..rank {
        for j in 0..rank {
            assert_abs_diff_eq!(r[(i, j)], expected[(i, j)], epsilon = 1e-12);
        }
    }

    // dense operators are accepted as well
    let r_dense = projector.project_all(&basis, &dense_a).unwrap();
    assert!(podrom::matrices_equal(r.as_ref(), r_dense.as_ref(), 1e-12));
}

/// Test that block subsets add up to the full projection.
#[test]
fn block_subsets_partition_the_projection() {
    let basis = random_basis(3, 10, 4, 41);
    let a = random_tridiagonal(10, false, 42);
    let projector = ReducedOperatorProjector::new();
    let full = projector.project_all(&basis, &a).unwrap();
    let first = projector.project(&basis, &a, &[0]).unwrap();
    let rest = projector.project(&basis, &a, &[2, 1]).unwrap();
    for i in 0..4 {
        for j in 0..4 {
            assert_abs_diff_eq!(first[(i, j)] + rest[(i, j)], full[(i, j)], epsilon = 1e-12);
        }
    }

    let w = basis.mean().clone();
    let c_full = projector.project_vector_all(&basis, &a, &w).unwrap();
    let c_first = projector.project_vector(&basis, &a, &w, &[0]).unwrap();
    let c_rest = projector.project_vector(&basis, &a, &w, &[1, 2]).unwrap();
    for k in 0..4 {
        assert_abs_diff_eq!(c_first[k] + c_rest[k], c_full[k], epsilon = 1e-12);
    }
}
