//! Worker-count resolution from the environment
//!
//! Kept in its own test binary because it sets a process-wide variable.

use gridwork::config::THREADS_ENV_VAR;
use gridwork::{accumulate_parallel, resolve_threads, Grid, NeverCancel, Progress, WorkConfig};

#[test]
fn test_zero_threads_follows_environment() {
    std::env::set_var(THREADS_ENV_VAR, "2");

    assert_eq!(resolve_threads(0), 2);
    assert_eq!(WorkConfig::with_threads(0).resolved_threads(), 2);
    assert_eq!(resolve_threads(5), 5);

    // Every kernel call reports the size of the pool it runs on
    let grid = Grid::new(8, 2);
    let progress = Progress::hidden(grid.total_units());
    let outcome = accumulate_parallel(
        grid,
        |_, _| rayon::current_num_threads() as f64,
        &NeverCancel,
        &progress,
        0,
    )
    .unwrap();
    assert_eq!(outcome.value(), 2.0 * grid.total_units() as f64);

    // An explicit count still wins over the environment
    let progress = Progress::hidden(grid.total_units());
    let outcome = accumulate_parallel(
        grid,
        |_, _| rayon::current_num_threads() as f64,
        &NeverCancel,
        &progress,
        3,
    )
    .unwrap();
    assert_eq!(outcome.value(), 3.0 * grid.total_units() as f64);

    std::env::set_var(THREADS_ENV_VAR, "not a number");
    assert!(resolve_threads(0) >= 1);
    std::env::remove_var(THREADS_ENV_VAR);
}
