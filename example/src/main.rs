use linview::prelude::*;
use linview::{
    default_rng, dot, matmul, matrix, norm, print_matrix, print_vector, randomize_matrix,
    randomize_vector, transpose, vector, LvResult,
};
use std::io;

fn main() -> LvResult<()> {
    env_logger::init();
    let out = &mut io::stdout().lock();

    let v = vector![0.0, 1.0, 2.0, 3.0, 4.0];
    let w = vector![5.0, 4.0, 3.0, 2.0, 1.0];
    print_vector(out, &(&v + &w))?;
    log::info!("dot = {}, |v| = {}", dot(&v, &w), norm(&v));

    // elements 0 and 2, scaled in place through the view
    let mut evens = v.subvector_strided(0, 5, 2);
    evens *= 10.0;
    print_vector(out, &v)?;

    let mut rng = default_rng();
    let a = Matrix::<f64>::new(4, 3);
    let b = Matrix::<f64>::new(3, 2);
    randomize_matrix(&a, &mut rng);
    randomize_matrix(&b, &mut rng);

    let mut c = Matrix::<f64>::zeros(4, 2);
    matmul(&a, &b, &mut c);
    print_matrix(out, &c)?;
    print_matrix(out, &transpose(&a.submatrix(1, 3, 0, 3)))?;

    let x = Vector::<f64>::new(3);
    randomize_vector(&x, &mut rng);
    print_vector(out, &(&a * &x))?;

    let m = matrix![[1, 2, 3], [4, 5, 6]];
    m.row(1).fill(0);
    print_matrix(out, &m)?;
    print_vector(out, &m.column(2))?;
    Ok(())
}
