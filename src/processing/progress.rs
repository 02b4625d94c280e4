//! Per-file progress notifications

/// Emitted once per attempted file, before its transform starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// 1-based position in the input list.
    pub index: usize,
    pub total: usize,
    pub file_name: String,
}

/// Receives progress synchronously on the thread running the batch.
pub trait ProgressObserver {
    fn on_progress(&mut self, event: &ProgressEvent);
}

impl<F: FnMut(&ProgressEvent)> ProgressObserver for F {
    fn on_progress(&mut self, event: &ProgressEvent) {
        self(event)
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _event: &ProgressEvent) {}
}
