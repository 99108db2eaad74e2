use criterion::{Criterion, black_box, criterion_group, criterion_main};
use podrom::{
    BlockVector, CsrMatrix, PodOptions, ReducedOperatorProjector, SnapshotBasisBuilder,
};

fn tridiagonal(n: usize, diag: f64, off: f64) -> CsrMatrix<f64> {
    let mut triplets = Vec::with_capacity(3 * n);
    for i in 0..n {
        triplets.push((i, i, diag));
        if i + 1 < n {
            triplets.push((i, i + 1, off));
            triplets.push((i + 1, i, off));
        }
    }
    CsrMatrix::from_triplets(n, n, &triplets).unwrap()
}

fn bench_pod(c: &mut Criterion) {
    let (n_snapshots, n_blocks, n) = (64, 2, 5000);
    let snapshots: Vec<BlockVector> = (0..n_snapshots)
        .map(|k| {
            let data = (0..n_blocks * n).map(|i| ((i * (k + 1)) as f64 * 1e-3).sin()).collect();
            BlockVector::from_flat(n_blocks, n, data).unwrap()
        })
        .collect();
    let mass = tridiagonal(n, 4.0, 1.0);
    let laplace = tridiagonal(n, 2.0, -1.0);
    let builder = SnapshotBasisBuilder::new(PodOptions::new(16));

    c.bench_function("method of snapshots", |ben| {
        ben.iter(|| {
            let _basis = builder.build(black_box(&mass), black_box(&snapshots)).unwrap();
        })
    });

    let basis = builder.build(&mass, &snapshots).unwrap();
    let projector = ReducedOperatorProjector::new();
    c.bench_function("galerkin projection", |ben| {
        ben.iter(|| {
            let _r = projector.project_all(black_box(&basis), black_box(&laplace)).unwrap();
        })
    });
}

criterion_group!(benches, bench_pod);
criterion_main!(benches);
