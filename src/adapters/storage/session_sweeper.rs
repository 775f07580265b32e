//! Background sweep that ends drafting sessions left idle.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time;

use crate::ports::DraftSessionStore;

/// Periodically evicts sessions idle for longer than `max_idle`.
pub struct SessionSweeper {
    sessions: Arc<dyn DraftSessionStore>,
    max_idle: Duration,
    interval: Duration,
}

impl SessionSweeper {
    /// Sweeps every `max_idle / 4`, but at least once a second.
    pub fn new(sessions: Arc<dyn DraftSessionStore>, max_idle: Duration) -> Self {
        Self {
            sessions,
            max_idle,
            interval: (max_idle / 4).max(Duration::from_secs(1)),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Runs until `shutdown` flips to true.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.interval);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        return;
                    }
                }
                _ = interval.tick() => {
                    self.sweep_once().await;
                }
            }
        }
    }

    /// Evicts idle sessions once. Returns how many were removed.
    pub async fn sweep_once(&self) -> usize {
        self.sessions.evict_idle(self.max_idle).await
    }
}
