use fracmat::domains::integer::{Integer, Z};
use fracmat::tensors::matrix::Matrix;
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("FRACMAT_LOG"))
        .init();

    let a = Matrix::from_linear(
        [1, 2, 3, 4, 5, 16, 7, 8, 9]
            .into_iter()
            .map(Integer::from)
            .collect(),
        3,
        3,
        Z,
    )
    .unwrap();

    println!("> A =\n{}", a);
    println!("> det(A) = {}", a.det().unwrap());

    let inv = a.inv().unwrap();
    println!("> A^-1 =\n{}", inv);
    println!("> A * A^-1 =\n{}", &a.to_rational() * &inv);
    println!("> A^-2 =\n{}", a.to_rational().powi(-2).unwrap());

    let singular = Matrix::from_linear(
        [1, 2, 2, 4].into_iter().map(Integer::from).collect(),
        2,
        2,
        Z,
    )
    .unwrap();

    match singular.inv() {
        Ok(m) => println!("> Unexpected inverse:\n{}", m),
        Err(e) => println!("> {} ({:?})", e, e.kind()),
    }
}
