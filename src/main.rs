use std::time::{Duration, Instant};

use log::{error, info};
use ndarray::Array2;

use gridwork::{
    grid_sum, grid_sum_parallel, multiply, multiply_tagged, reference_matmul, run_config,
    harmonic_kernel, CancelToken, Grid, NeverCancel, Operand, Permutation, ProgressStyleKind,
    WorkConfig,
};

/// The permutation used by the multiplication demo
fn demo_permutation() -> gridwork::Result<Permutation> {
    Permutation::from_one_based(vec![3, 1, 4, 2])
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("gridwork {}", gridwork::VERSION);

    // Sequential and parallel runs of the same grid
    let n = 2000;
    let start = Instant::now();
    let seq = grid_sum(n, true, &NeverCancel);
    println!("\nsequential sum over {n}x{n}: {seq:.6} ({:?})", start.elapsed());

    let start = Instant::now();
    match grid_sum_parallel(n, 0, true, &NeverCancel) {
        Ok(par) => println!("parallel sum over {n}x{n}:   {par:.6} ({:?})", start.elapsed()),
        Err(e) => error!("parallel run failed: {}", e),
    }

    // Interrupt a long run from another thread
    let token = CancelToken::new();
    let host = token.clone();
    let interrupter = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        host.cancel();
    });

    let config = WorkConfig::sequential().displayed(ProgressStyleKind::Eta);
    let slow_kernel = |i: usize, j: usize| {
        let x = harmonic_kernel(i, j);
        (0..64).fold(x, |acc, _| acc.sin().abs() + x)
    };
    match run_config(Grid::square(20_000), slow_kernel, &token, &config) {
        Ok(outcome) => println!(
            "\ninterrupted run: value {} (cancelled: {}, rows done: {:?})",
            outcome.value(),
            outcome.is_cancelled(),
            outcome.completed_rows()
        ),
        Err(e) => error!("interrupted run failed: {}", e),
    }
    if interrupter.join().is_err() {
        error!("interrupter thread panicked");
    }

    // The three multiplication strategies on the same logical matrix
    let perm = match demo_permutation() {
        Ok(p) => p,
        Err(e) => {
            error!("demo permutation rejected: {}", e);
            return;
        }
    };
    let a = perm.to_dense();
    let b = Array2::from_shape_fn((4, 3), |(i, j)| (i * 3 + j) as f64);
    let expected = reference_matmul(&a, &b);

    println!("\nright operand:\n{}", b);
    for tag in ["matrix", "dgCMatrix", "pMatrix"] {
        match multiply_tagged(tag, &a, &b) {
            Ok(c) => println!("{tag} product matches reference: {}", c == expected),
            Err(e) => error!("{tag} product failed: {}", e),
        }
    }
    info!("permutation product:\n{:?}", multiply(&Operand::from(perm), &b).ok());

    match multiply_tagged("dsCMatrix", &a, &b) {
        Ok(_) => println!("unexpected success for dsCMatrix"),
        Err(e) => println!("dsCMatrix rejected: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_permutation_is_valid() {
        let perm = demo_permutation().unwrap();
        assert_eq!(perm.one_based(), &[3, 1, 4, 2]);
    }
}
