//! Progress reporting.

/// Receives `(processed, total)` row counts while an import runs.
///
/// Called every `progress_interval` rows and once when all rows are done.
pub trait ProgressSink {
    fn on_progress(&mut self, processed: usize, total: usize);
}

impl<F> ProgressSink for F
where
    F: FnMut(usize, usize),
{
    fn on_progress(&mut self, processed: usize, total: usize) {
        self(processed, total);
    }
}

/// Discards progress updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&mut self, _processed: usize, _total: usize) {}
}
