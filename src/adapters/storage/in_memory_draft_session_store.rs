//! In-Memory Draft Session Store
//!
//! Holds every session's draft in process memory. Nothing survives a restart.
//! Sessions are bounded two ways: idle ones are evicted by `evict_idle`, and
//! an optional cap evicts the least recently used session when full.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::SessionId;
use crate::domain::proposal::ProposalDraft;
use crate::ports::{DraftSessionStore, SharedDraft};

#[derive(Debug)]
struct Entry {
    draft: SharedDraft,
    touched: Instant,
}

impl Entry {
    /// An action currently holds the draft.
    fn is_busy(&self) -> bool {
        self.draft.try_lock().is_err()
    }
}

/// In-memory map of session id to draft.
///
/// The map lock is only held for lookups; work on a draft happens under the
/// draft's own mutex.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDraftSessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Entry>>>,
    max_sessions: Option<usize>,
}

impl InMemoryDraftSessionStore {
    /// Create an empty, unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of live sessions. Creating one more evicts the least
    /// recently used session that is not busy.
    pub fn with_max_sessions(mut self, max: usize) -> Self {
        self.max_sessions = Some(max.max(1));
        self
    }
}

/// Least recently touched session that is not busy.
fn least_recent_idle(sessions: &HashMap<SessionId, Entry>) -> Option<SessionId> {
    sessions
        .iter()
        .filter(|(_, entry)| !entry.is_busy())
        .min_by_key(|(_, entry)| entry.touched)
        .map(|(id, _)| *id)
}

#[async_trait]
impl DraftSessionStore for InMemoryDraftSessionStore {
    async fn create(&self) -> SessionId {
        let id = SessionId::new();
        let mut sessions = self.sessions.write().await;

        if let Some(max) = self.max_sessions {
            if sessions.len() >= max {
                match least_recent_idle(&sessions) {
                    Some(oldest) => {
                        sessions.remove(&oldest);
                        tracing::info!(session_id = %oldest, "Session limit reached, evicted least recently used session");
                    }
                    None => tracing::warn!(limit = max, "Session limit reached but every session is busy"),
                }
            }
        }

        sessions.insert(
            id,
            Entry {
                draft: Arc::new(Mutex::new(ProposalDraft::new())),
                touched: Instant::now(),
            },
        );
        tracing::debug!(session_id = %id, "Created drafting session");
        id
    }

    async fn get(&self, id: &SessionId) -> Option<SharedDraft> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(id)?;
        entry.touched = Instant::now();
        Some(entry.draft.clone())
    }

    async fn remove(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::debug!(session_id = %id, "Removed drafting session");
        }
        removed
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.touched.elapsed() < max_idle || entry.is_busy());
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "Evicted idle drafting sessions");
        }
        evicted
    }
}
