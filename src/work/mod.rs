//! Interruptible accumulation over a 2D index space
//!
//! A work loop walks an outer index `i` and an inner index `j`, adding
//! `kernel(i, j)` into an accumulator. Two collaborators ride along:
//!
//! - a [`CancellationSource`], polled once per outer index
//! - a [`Progress`] reporter, incremented once per inner index
//!
//! [`accumulate`] is the sequential driver; [`accumulate_parallel`]
//! distributes outer indices over a rayon pool.

pub mod cancel;
pub mod parallel;
pub mod progress;
pub mod sequential;

pub use cancel::{CancelToken, CancellationSource, NeverCancel};
pub use parallel::{accumulate_parallel, grid_sum_parallel};
pub use progress::{Progress, ProgressStyleKind};
pub use sequential::{accumulate, grid_sum};

use crate::config::WorkConfig;
use crate::error::Result;

/// Value reported by [`Outcome::value`] for a cancelled run
pub const CANCELLED_SENTINEL: f64 = -1.0;

/// The index space of a work loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    /// Length of the outer loop (cancellation checkpoints)
    pub n_outer: usize,
    /// Length of the inner loop (progress units per outer index)
    pub n_inner: usize,
}

impl Grid {
    pub fn new(n_outer: usize, n_inner: usize) -> Self {
        Self { n_outer, n_inner }
    }

    /// An `n` by `n` grid
    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    /// Number of progress units in a full run
    pub fn total_units(&self) -> u64 {
        (self.n_outer as u64).saturating_mul(self.n_inner as u64)
    }
}

/// How a work loop ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Every outer index was processed
    Completed(f64),
    /// The cancellation source was observed before the grid was exhausted
    Cancelled {
        /// Sum over the rows that ran to completion
        partial: f64,
        /// Number of outer indices whose inner loop ran fully
        completed_rows: usize,
    },
}

impl Outcome {
    /// The accumulated value, or [`CANCELLED_SENTINEL`] for a cancelled run
    pub fn value(&self) -> f64 {
        match self {
            Outcome::Completed(sum) => *sum,
            Outcome::Cancelled { .. } => CANCELLED_SENTINEL,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled { .. })
    }

    /// The accumulation over whatever rows completed, cancelled or not
    pub fn partial(&self) -> f64 {
        match self {
            Outcome::Completed(sum) => *sum,
            Outcome::Cancelled { partial, .. } => *partial,
        }
    }

    /// Number of fully processed rows, if the run was cancelled
    pub fn completed_rows(&self) -> Option<usize> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Cancelled { completed_rows, .. } => Some(*completed_rows),
        }
    }
}

/// Stock kernel: `1 / (1 + i + j)`
///
/// Strictly positive, so a completed sum is never negative and cannot be
/// confused with [`CANCELLED_SENTINEL`].
#[inline]
pub fn harmonic_kernel(i: usize, j: usize) -> f64 {
    1.0 / (1.0 + i as f64 + j as f64)
}

/// Runs a work loop as described by `config`
///
/// `n_threads == 1` takes the sequential path, which stops at the first
/// checkpoint after cancellation; any other count takes the parallel path.
pub fn run_config<F, C>(grid: Grid, kernel: F, cancel: &C, config: &WorkConfig) -> Result<Outcome>
where
    F: Fn(usize, usize) -> f64 + Sync,
    C: CancellationSource + ?Sized,
{
    let progress = config.new_progress(grid.total_units());
    let outcome = if config.n_threads == 1 {
        accumulate(grid, kernel, cancel, &progress)
    } else {
        accumulate_parallel(grid, kernel, cancel, &progress, config.n_threads)?
    };
    progress.finish();
    Ok(outcome)
}
