//! Progress reporting for pipeline runs.

use tracing::info;

/// Receives a report after every completed entity.
pub trait ProgressSink: Send + Sync {
    fn report(&self, completed: usize, total: usize);
}

/// Closures receive the completed fraction in `(0, 1]`.
impl<F> ProgressSink for F
where
    F: Fn(f64) + Send + Sync,
{
    fn report(&self, completed: usize, total: usize) {
        if total > 0 {
            self(completed as f64 / total as f64);
        }
    }
}

/// Logs progress through `tracing`.
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&self, completed: usize, total: usize) {
        info!(completed, total, "Enrichment progress");
    }
}

/// Discards progress reports.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _completed: usize, _total: usize) {}
}
