//! Error type shared by the work loop and the matrix dispatch

use thiserror::Error;

/// Errors surfaced to callers of this crate
///
/// Cancellation of a work loop is not an error; it is reported through
/// [`crate::Outcome::Cancelled`].
#[derive(Debug, Error)]
pub enum Error {
    /// A runtime representation tag that names no supported matrix kind
    #[error("unrecognized matrix representation '{0}'")]
    UnrecognizedRepresentation(String),

    /// Inner dimensions of a product do not agree
    #[error("dimension mismatch: {}x{} cannot multiply {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Index data does not describe a permutation
    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),

    /// The worker pool for a parallel run could not be started
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
