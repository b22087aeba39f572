//! # Parallel Work Loop
//!
//! This module distributes the outer index of a work loop over a dedicated
//! Rayon pool. Outer indices are handed out one at a time, so a slow row
//! never holds up a block of fast ones.

use log::{debug, info, warn};
use rayon::prelude::*;

use super::{harmonic_kernel, CancellationSource, Grid, Outcome, Progress};
use crate::error::Result;

/// Per-worker running totals, merged once per split by `reduce`
#[derive(Debug, Clone, Copy, Default)]
struct Partial {
    sum: f64,
    rows: usize,
    skipped: usize,
}

impl Partial {
    fn merge(self, other: Partial) -> Partial {
        Partial {
            sum: self.sum + other.sum,
            rows: self.rows + other.rows,
            skipped: self.skipped + other.skipped,
        }
    }
}

/// Builds the worker pool for one parallel run
///
/// A count of `0` is handed to rayon unchanged so the pool follows
/// `RAYON_NUM_THREADS`, falling back to the core count.
pub(crate) fn build_pool(n_threads: usize) -> Result<rayon::ThreadPool> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .thread_name(|i| format!("gridwork-worker-{}", i))
        .build()?;
    Ok(pool)
}

/// Accumulates `kernel(i, j)` over `grid` using a pool of worker threads.
///
/// Each outer index is an independent task. A worker polls `cancel` before
/// starting a row and skips that row's inner loop if cancellation has been
/// requested; it does not coordinate with other workers, so rows already in
/// flight elsewhere still complete. Rows that ran are kept: a cancelled run
/// reports their sum as the `partial` of [`Outcome::Cancelled`].
///
/// # Arguments
///
/// * `grid` - Index space to cover
/// * `kernel` - Value contributed by cell `(i, j)`
/// * `cancel` - Polled once per outer index per worker
/// * `progress` - Incremented once per inner index
/// * `n_threads` - Worker count; `0` follows `RAYON_NUM_THREADS`, else every core
///
/// # Returns
///
/// The outcome of the run, or an error if the pool could not be started
///
/// # Examples
///
/// ```
/// use gridwork::{accumulate_parallel, Grid, NeverCancel, Progress};
///
/// let grid = Grid::new(4, 5);
/// let progress = Progress::hidden(grid.total_units());
/// let outcome = accumulate_parallel(grid, |_, _| 1.0, &NeverCancel, &progress, 2).unwrap();
///
/// assert_eq!(outcome.value(), 20.0);
/// assert_eq!(progress.current(), 20);
/// ```
pub fn accumulate_parallel<F, C>(
    grid: Grid,
    kernel: F,
    cancel: &C,
    progress: &Progress,
    n_threads: usize,
) -> Result<Outcome>
where
    F: Fn(usize, usize) -> f64 + Sync,
    C: CancellationSource + ?Sized,
{
    let pool = build_pool(n_threads)?;
    debug!(
        "parallel accumulation over {}x{} grid on {} threads",
        grid.n_outer,
        grid.n_inner,
        pool.current_num_threads()
    );

    let total = pool.install(|| {
        (0..grid.n_outer)
            .into_par_iter()
            .with_max_len(1)
            .fold(Partial::default, |mut acc, i| {
                if cancel.is_cancelled() {
                    acc.skipped += 1;
                    return acc;
                }

                let mut row_sum = 0.0;
                for j in 0..grid.n_inner {
                    progress.increment();
                    row_sum += kernel(i, j);
                }
                acc.sum += row_sum;
                acc.rows += 1;
                acc
            })
            .reduce(Partial::default, Partial::merge)
    });

    if total.skipped > 0 {
        warn!(
            "parallel accumulation cancelled: {} rows done, {} skipped",
            total.rows, total.skipped
        );
        return Ok(Outcome::Cancelled {
            partial: total.sum,
            completed_rows: total.rows,
        });
    }

    info!("parallel accumulation finished: {} rows", total.rows);
    Ok(Outcome::Completed(total.sum))
}

/// Sums [`harmonic_kernel`] over an `n` by `n` grid on `n_threads` workers.
///
/// Returns [`CANCELLED_SENTINEL`](super::CANCELLED_SENTINEL) if any row was
/// skipped because of cancellation.
pub fn grid_sum_parallel<C>(n: usize, n_threads: usize, display: bool, cancel: &C) -> Result<f64>
where
    C: CancellationSource + ?Sized,
{
    let grid = Grid::square(n);
    let progress = Progress::new(grid.total_units(), display);
    let outcome = accumulate_parallel(grid, harmonic_kernel, cancel, &progress, n_threads)?;
    progress.finish();
    Ok(outcome.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::work::{accumulate, CancelToken, NeverCancel, ProgressStyleKind};

    #[test]
    fn test_partial_merge() {
        let a = Partial { sum: 1.5, rows: 2, skipped: 0 };
        let b = Partial { sum: 2.0, rows: 1, skipped: 3 };
        let merged = a.merge(b);

        assert_eq!(merged.sum, 3.5);
        assert_eq!(merged.rows, 3);
        assert_eq!(merged.skipped, 3);
    }

    #[test]
    fn test_single_thread_matches_sequential() {
        let grid = Grid::new(17, 9);

        let seq_progress = Progress::hidden(grid.total_units());
        let seq = accumulate(grid, harmonic_kernel, &NeverCancel, &seq_progress);

        let par_progress = Progress::hidden(grid.total_units());
        let par = accumulate_parallel(grid, harmonic_kernel, &NeverCancel, &par_progress, 1).unwrap();

        assert!((seq.value() - par.value()).abs() < 1e-12);
        assert_eq!(par_progress.current(), grid.total_units());
    }

    #[test]
    fn test_precancelled_skips_every_row() {
        let token = CancelToken::new();
        token.cancel();

        let grid = Grid::square(8);
        let progress = Progress::hidden(grid.total_units());
        let outcome = accumulate_parallel(grid, |_, _| 1.0, &token, &progress, 4).unwrap();

        assert_eq!(outcome, Outcome::Cancelled { partial: 0.0, completed_rows: 0 });
        assert_eq!(progress.current(), 0);
    }

    #[test]
    fn test_empty_grid_completes() {
        let grid = Grid::square(0);
        let progress = Progress::hidden(0);
        let outcome = accumulate_parallel(grid, harmonic_kernel, &NeverCancel, &progress, 2).unwrap();
        assert_eq!(outcome, Outcome::Completed(0.0));
    }

    #[test]
    fn test_displayed_progress_from_workers() {
        let grid = Grid::new(16, 10);
        let progress = Progress::with_style(grid.total_units(), true, ProgressStyleKind::Eta);
        let outcome = accumulate_parallel(grid, |_, _| 0.5, &NeverCancel, &progress, 4).unwrap();

        assert_eq!(outcome, Outcome::Completed(80.0));
        assert!(progress.is_displayed());
        assert_eq!(progress.current(), grid.total_units());
        assert!(progress.is_complete());
    }

    #[test]
    fn test_default_thread_count() {
        let pool = build_pool(0).unwrap();
        assert!(pool.current_num_threads() >= 1);
    }
}
