use fracmat::tensors::elimination::{gaussian_eliminate, Entry};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn solve_integer_system() {
    // x + 2y = 5, 3x + 4y = 6
    let system = vec![
        vec![Entry::from(1), Entry::from(2), Entry::from(5)],
        vec![Entry::from(3), Entry::from(4), Entry::from(6)],
    ];

    let reduced = gaussian_eliminate(&system).unwrap();
    println!("> Reduced system:\n{}", reduced);
}

fn solve_mixed_system() {
    let system = vec![
        vec![Entry::from("1/2"), Entry::from(0.25), Entry::from(-1), Entry::from(3)],
        vec![Entry::from(2), Entry::from("-3/4"), Entry::from(1), Entry::from("7 / 2")],
        vec![Entry::from(-1), Entry::from(1), Entry::from("5/3"), Entry::from(0)],
    ];

    let reduced = gaussian_eliminate(&system).unwrap();
    println!("> Reduced system:\n{}", reduced);
    for (i, x) in reduced.solution().iter().enumerate() {
        println!("\tx{} = {} ~ {}", i + 1, x, x.to_f64());
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("FRACMAT_LOG"))
        .init();

    solve_integer_system();
    solve_mixed_system();
}
