//! Cancellation sources polled by the work loops
//!
//! The loops only ever *read* a cancellation source. Whoever owns the source
//! (a signal handler, a UI thread, a test) is the only party that sets it.
//! Propagation is best-effort: a flag set while a worker is inside a row is
//! observed at that worker's next checkpoint, not immediately.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Something a work loop can ask "has the host requested interruption?"
///
/// Polling has a fixed cost, so loops call this at coarse checkpoints
/// (once per outer index), never inside the inner loop.
pub trait CancellationSource: Sync {
    fn is_cancelled(&self) -> bool;
}

/// A shareable cancellation flag
///
/// Clones refer to the same flag, so one clone can be handed to the
/// host side (e.g. an interrupt handler) and another to the work loop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every loop polling this token
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Clears a previous request so the token can be reused
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl CancellationSource for CancelToken {
    fn is_cancelled(&self) -> bool {
        CancelToken::is_cancelled(self)
    }
}

impl CancellationSource for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

impl<T: CancellationSource + ?Sized> CancellationSource for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// A source that never requests cancellation
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancellationSource for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let token = CancelToken::new();
        let host_side = token.clone();

        assert!(!token.is_cancelled());
        host_side.cancel();
        assert!(token.is_cancelled());

        token.reset();
        assert!(!host_side.is_cancelled());
    }

    #[test]
    fn test_atomic_bool_source() {
        let flag = AtomicBool::new(false);
        assert!(!CancellationSource::is_cancelled(&flag));

        flag.store(true, Ordering::Release);
        assert!(CancellationSource::is_cancelled(&flag));
    }

    #[test]
    fn test_never_cancel() {
        assert!(!NeverCancel.is_cancelled());
    }
}
