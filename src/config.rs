//! Run configuration for the work loops

use crate::work::{Progress, ProgressStyleKind};

/// Environment variable rayon consults for its default pool size
pub const THREADS_ENV_VAR: &str = "RAYON_NUM_THREADS";

/// Resolves a requested worker count
///
/// `0` means "use the environment default": a positive `RAYON_NUM_THREADS`
/// if set, otherwise every available core. This mirrors the choice rayon
/// makes when a pool is built with zero threads.
pub fn resolve_threads(requested: usize) -> usize {
    if requested != 0 {
        return requested;
    }
    std::env::var(THREADS_ENV_VAR)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or_else(num_cpus::get)
}

/// Configuration for a work-loop run
#[derive(Debug, Clone)]
pub struct WorkConfig {
    /// Number of worker threads; `1` runs the sequential loop, `0` uses the environment default
    pub n_threads: usize,

    /// Whether to draw a progress bar on stderr
    pub display_progress: bool,

    /// Look of the progress bar when it is drawn
    pub progress_style: ProgressStyleKind,
}

impl Default for WorkConfig {
    fn default() -> Self {
        Self {
            n_threads: 0,
            display_progress: false,
            progress_style: ProgressStyleKind::Simple,
        }
    }
}

impl WorkConfig {
    /// A single-threaded configuration
    pub fn sequential() -> Self {
        Self {
            n_threads: 1,
            ..Self::default()
        }
    }

    /// A configuration with `n_threads` workers (`0` for the environment default)
    pub fn with_threads(n_threads: usize) -> Self {
        Self {
            n_threads,
            ..Self::default()
        }
    }

    /// Enables the progress bar
    pub fn displayed(mut self, style: ProgressStyleKind) -> Self {
        self.display_progress = true;
        self.progress_style = style;
        self
    }

    /// Worker count this configuration will actually use
    pub fn resolved_threads(&self) -> usize {
        resolve_threads(self.n_threads)
    }

    /// Builds the progress reporter matching this configuration
    pub fn new_progress(&self, total: u64) -> Progress {
        Progress::with_style(total, self.display_progress, self.progress_style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_threads() {
        assert_eq!(resolve_threads(3), 3);
        assert!(resolve_threads(0) >= 1);
    }

    #[test]
    fn test_builders() {
        let config = WorkConfig::sequential();
        assert_eq!(config.resolved_threads(), 1);
        assert!(!config.display_progress);

        let config = WorkConfig::with_threads(4).displayed(ProgressStyleKind::Eta);
        assert_eq!(config.n_threads, 4);
        assert!(config.display_progress);
        assert_eq!(config.progress_style, ProgressStyleKind::Eta);
    }

    #[test]
    fn test_new_progress_respects_display() {
        let progress = WorkConfig::default().new_progress(10);
        assert!(!progress.is_displayed());
        assert_eq!(progress.total(), 10);
    }
}
