//! Progress reporting while a model response is arriving.

use std::sync::Mutex;
use tokio::sync::mpsc;

/// Receives the response as it grows.
///
/// Called once per fragment, in arrival order, with both the new fragment and
/// everything received so far. Non-streaming providers produce exactly one
/// call carrying the whole response.
pub trait ProgressSink: Send + Sync {
    fn on_fragment(&self, fragment: &str, accumulated: &str);
}

/// Discards progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_fragment(&self, _fragment: &str, _accumulated: &str) {}
}

/// Forwards each fragment to a channel.
///
/// A closed receiver (client went away) is ignored: the action still runs
/// to completion and commits its result.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelProgress {
    pub fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgress {
    fn on_fragment(&self, fragment: &str, _accumulated: &str) {
        let _ = self.tx.send(fragment.to_string());
    }
}

/// Keeps every snapshot of the accumulated text.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    snapshots: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated text after each fragment, oldest first.
    pub fn snapshots(&self) -> Vec<String> {
        self.snapshots
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

impl ProgressSink for RecordingProgress {
    fn on_fragment(&self, _fragment: &str, accumulated: &str) {
        if let Ok(mut snapshots) = self.snapshots.lock() {
            snapshots.push(accumulated.to_string());
        }
    }
}
