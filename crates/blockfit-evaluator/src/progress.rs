//! Progress reporting for long-running searches.
//!
//! The search never depends on what a reporter does with the numbers; the library only
//! provides [`NoProgress`] and leaves presentation to the caller.

use std::time::Duration;

/// Receives progress notifications from the move search.
pub trait SearchProgress {
    /// Called once before the search starts.
    fn start(&mut self) {}

    /// Called as the search advances, with the running count of successful placements.
    fn update(&mut self, placements_found: u64) {
        let _ = placements_found;
    }

    /// Called once after a path has been selected.
    fn finish(&mut self, summary: &SearchSummary) {
        let _ = summary;
    }
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl SearchProgress for NoProgress {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSummary {
    pub paths: usize,
    pub placements_found: u64,
    pub elapsed: Duration,
}

impl SearchSummary {
    /// Successful placements per second, or `None` when no time was measured.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn throughput(&self) -> Option<f64> {
        let secs = self.elapsed.as_secs_f64();
        (secs > 0.0).then(|| self.placements_found as f64 / secs)
    }
}
