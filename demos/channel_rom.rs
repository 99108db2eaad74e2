use podrom::{
    BlockVector, CsrMatrix, FullOperators, PodOptions, RomAssembler, RomOptions,
    SnapshotBasisBuilder,
};
use rand::Rng;

fn main() -> Result<(), podrom::PodError> {
    let n = 50;
    let h = 1.0 / (n - 1) as f64;
    // P1 mass and stiffness on a uniform mesh
    let mut mass = Vec::new();
    let mut stiffness = Vec::new();
    for e in 0..n - 1 {
        let local = [
            (e, e, h / 3.0, 1.0 / h),
            (e + 1, e + 1, h / 3.0, 1.0 / h),
            (e, e + 1, h / 6.0, -1.0 / h),
            (e + 1, e, h / 6.0, -1.0 / h),
        ];
        for (i, j, m, k) in local {
            mass.push((i, j, m));
            stiffness.push((i, j, k));
        }
    }
    let mass = CsrMatrix::from_triplets(n, n, &mass)?;
    let laplace = CsrMatrix::from_triplets(n, n, &stiffness)?;
    let outflow = CsrMatrix::from_triplets(n, n, &[(n - 1, n - 1, 1.0)])?;

    // noisy parabolic profiles (u, v) with a slowly decaying amplitude
    let mut rng = rand::thread_rng();
    let snapshots = (0..20)
        .map(|k| {
            let amp = (-0.1 * k as f64).exp();
            let u = (0..n)
                .map(|i| {
                    let y = i as f64 * h;
                    amp * 4.0 * y * (1.0 - y) + 1e-3 * rng.r#gen::<f64>()
                })
                .collect();
            let v = (0..n).map(|_| 1e-3 * rng.r#gen::<f64>()).collect();
            BlockVector::from_blocks(vec![u, v])
        })
        .collect::<Result<Vec<_>, _>>()?;

    let basis = SnapshotBasisBuilder::new(PodOptions::new(6)).build(&mass, &snapshots)?;
    println!("singular values = {:?}", basis.singular_values());
    println!("modes = {:?}", basis.modes());

    let operators = FullOperators {
        mass: &mass,
        laplace: &laplace,
        boundary: &outflow,
        advection: None,
        gradient: None,
    };
    let assembler = RomAssembler::new(RomOptions::new(100.0).with_n_pod_vectors(4));
    let model = assembler.assemble(&basis, &operators, Some(&snapshots[0]))?;
    println!("reduced laplace = {:?}", model.laplace);
    println!("mean contribution = {:?}", model.mean_contribution);
    println!("initial condition = {:?}", model.initial_condition);
    Ok(())
}
