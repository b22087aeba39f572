//! Progress counting and the optional terminal progress bar
//!
//! The counter is the source of truth; rendering is delegated to
//! `indicatif`, which rate-limits redraws and serialises writes to the
//! terminal so concurrent workers never interleave output.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::warn;

/// The look of the rendered progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressStyleKind {
    /// Bar with completed/total counts
    #[default]
    Simple,
    /// Bar with counts, elapsed time and estimated time remaining
    Eta,
}

impl ProgressStyleKind {
    fn template(&self) -> &'static str {
        match self {
            ProgressStyleKind::Simple => "[{bar:50}] {pos}/{len}",
            ProgressStyleKind::Eta => "[{bar:50}] {pos}/{len} ({percent}%) {elapsed_precise} eta {eta}",
        }
    }
}

/// Counts completed work units out of a known total
///
/// `increment` is a single relaxed atomic add (plus a bar update when
/// display is enabled) and may be called from any number of threads.
pub struct Progress {
    total: u64,
    current: AtomicU64,
    bar: Option<ProgressBar>,
    finished: AtomicBool,
}

impl Progress {
    /// Creates a reporter for `total` units with the default bar style
    pub fn new(total: u64, display: bool) -> Self {
        Self::with_style(total, display, ProgressStyleKind::default())
    }

    /// Creates a reporter for `total` units, rendering with `style` if `display` is set
    pub fn with_style(total: u64, display: bool, style: ProgressStyleKind) -> Self {
        let bar = display.then(|| make_bar(total, style));
        Self {
            total,
            current: AtomicU64::new(0),
            bar,
            finished: AtomicBool::new(false),
        }
    }

    /// Creates a reporter that only counts
    pub fn hidden(total: u64) -> Self {
        Self::new(total, false)
    }

    /// Records one completed unit
    #[inline]
    pub fn increment(&self) {
        self.increment_by(1);
    }

    /// Records `n` completed units
    #[inline]
    pub fn increment_by(&self, n: u64) {
        self.current.fetch_add(n, Ordering::Relaxed);
        if let Some(bar) = &self.bar {
            bar.inc(n);
        }
    }

    /// Sets the absolute number of completed units
    pub fn update(&self, current: u64) {
        self.current.store(current, Ordering::Relaxed);
        if let Some(bar) = &self.bar {
            bar.set_position(current);
        }
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.current() >= self.total
    }

    pub fn is_displayed(&self) -> bool {
        self.bar.is_some()
    }

    /// Stops rendering, leaving the final bar on screen
    ///
    /// Safe to call more than once; also runs on drop.
    pub fn finish(&self) {
        if self.finished.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(bar) = &self.bar {
            bar.finish();
        }
    }
}

impl fmt::Debug for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Progress")
            .field("current", &self.current())
            .field("total", &self.total)
            .field("displayed", &self.is_displayed())
            .finish()
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.finish();
    }
}

fn make_bar(total: u64, style: ProgressStyleKind) -> ProgressBar {
    let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
    match ProgressStyle::with_template(style.template()) {
        Ok(s) => bar.set_style(s.progress_chars("*>-")),
        Err(e) => warn!("falling back to default progress bar style: {}", e),
    }
    bar
}
