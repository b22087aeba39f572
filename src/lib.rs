//! # gridwork: interruptible grid accumulation and dispatched matrix products
//!
//! ## Overview
//!
//! This library packages two small numeric patterns:
//!
//! - A work loop that accumulates a kernel over a 2D index space, polls a
//!   cancellation source once per outer index, and reports progress once per
//!   inner index. A sequential driver stops at the first checkpoint after
//!   cancellation; a parallel driver spreads outer indices over a Rayon pool
//!   and treats cancellation as best-effort per worker.
//!
//! - A matrix product whose left operand is one of a closed set of
//!   representations (dense, compressed sparse column, permutation), each
//!   multiplied by a dense right operand with the strategy that suits it.
//!
//! ## Usage
//!
//! Running a cancellable loop:
//!
//! ```
//! use gridwork::{grid_sum, CancelToken};
//!
//! let token = CancelToken::new();
//! let sum = grid_sum(100, false, &token);
//! assert!(sum > 0.0);
//!
//! token.cancel();
//! assert_eq!(grid_sum(100, false, &token), gridwork::CANCELLED_SENTINEL);
//! ```
//!
//! Multiplying by a tagged operand:
//!
//! ```
//! use gridwork::multiply_tagged;
//! use ndarray::array;
//!
//! let a = array![[0.0, 1.0], [1.0, 0.0]];
//! let b = array![[1.0, 2.0], [3.0, 4.0]];
//!
//! let c = multiply_tagged("dgCMatrix", &a, &b).unwrap();
//! assert_eq!(c, array![[3.0, 4.0], [1.0, 2.0]]);
//! assert!(multiply_tagged("dgTMatrix", &a, &b).is_err());
//! ```

pub mod config;
pub mod error;
pub mod matrix;
pub mod work;

// Re-export primary components
pub use config::{resolve_threads, WorkConfig};
pub use error::{Error, Result};
pub use matrix::{approx_eq, multiply, multiply_tagged, reference_matmul};
pub use matrix::{Operand, Permutation, Representation};
pub use work::{accumulate, accumulate_parallel, grid_sum, grid_sum_parallel, run_config};
pub use work::{harmonic_kernel, Grid, Outcome, CANCELLED_SENTINEL};
pub use work::{CancelToken, CancellationSource, NeverCancel, Progress, ProgressStyleKind};

/// Version information for the gridwork library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
