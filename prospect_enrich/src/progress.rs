//! Progress reporting seam between the driver and its observer.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc::UnboundedSender;

/// Observer for a running batch. Injected into the driver so the core has
/// no dependency on any particular presentation layer.
pub trait ProgressSink: Send + Sync {
    /// Called after each row with the overall completion percentage.
    fn on_progress(&self, percent: u8);

    /// Called once, after the output file has been written.
    fn on_complete(&self, output_path: &Path);
}

/// Progress notifications as channel messages, for observers running on a
/// different task than the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Progress(u8),
    Complete(PathBuf),
}

impl ProgressSink for UnboundedSender<ProgressEvent> {
    fn on_progress(&self, percent: u8) {
        // A dropped receiver only means nobody is watching anymore.
        let _ = self.send(ProgressEvent::Progress(percent));
    }

    fn on_complete(&self, output_path: &Path) {
        let _ = self.send(ProgressEvent::Complete(output_path.to_path_buf()));
    }
}

/// Completion percentage after `processed` of `total` rows, rounded to the
/// nearest integer.
#[must_use]
pub fn percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    u8::try_from((processed * 100 + total / 2) / total).unwrap_or(100)
}
