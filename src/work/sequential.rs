//! Single-threaded work loop

use log::{debug, info, warn};

use super::{harmonic_kernel, CancellationSource, Grid, Outcome, Progress};

/// Accumulates `kernel(i, j)` over `grid` on the calling thread.
///
/// Cancellation is polled once at the top of every outer iteration; as soon
/// as it is observed the loop stops and returns [`Outcome::Cancelled`]
/// carrying the rows finished so far. `progress` is incremented once per
/// inner iteration.
///
/// # Examples
///
/// ```
/// use gridwork::{accumulate, harmonic_kernel, Grid, NeverCancel, Progress};
///
/// let grid = Grid::square(3);
/// let progress = Progress::hidden(grid.total_units());
/// let outcome = accumulate(grid, harmonic_kernel, &NeverCancel, &progress);
///
/// assert!(!outcome.is_cancelled());
/// assert_eq!(progress.current(), 9);
/// ```
pub fn accumulate<F, C>(grid: Grid, kernel: F, cancel: &C, progress: &Progress) -> Outcome
where
    F: Fn(usize, usize) -> f64,
    C: CancellationSource + ?Sized,
{
    debug!("sequential accumulation over {}x{} grid", grid.n_outer, grid.n_inner);

    let mut sum = 0.0;
    for i in 0..grid.n_outer {
        if cancel.is_cancelled() {
            warn!("accumulation cancelled after {} of {} rows", i, grid.n_outer);
            return Outcome::Cancelled { partial: sum, completed_rows: i };
        }

        for j in 0..grid.n_inner {
            progress.increment();
            sum += kernel(i, j);
        }
    }

    info!("sequential accumulation finished: {} rows", grid.n_outer);
    Outcome::Completed(sum)
}

/// Sums [`harmonic_kernel`] over an `n` by `n` grid.
///
/// Returns [`CANCELLED_SENTINEL`](super::CANCELLED_SENTINEL) if `cancel` is
/// observed before the grid is exhausted. With `display` set a progress bar
/// is drawn on stderr while the loop runs.
pub fn grid_sum<C>(n: usize, display: bool, cancel: &C) -> f64
where
    C: CancellationSource + ?Sized,
{
    let grid = Grid::square(n);
    let progress = Progress::new(grid.total_units(), display);
    let outcome = accumulate(grid, harmonic_kernel, cancel, &progress);
    progress.finish();
    outcome.value()
}
