//! Draft Session Store Port - Where each session's proposal draft lives.
//!
//! Sessions are in-memory only and vanish when the process exits. Each
//! session's draft sits behind its own async mutex so that exactly one
//! action (generate, revise, export) touches it at a time.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::proposal::ProposalDraft;

/// A session's draft, shared between the store and the action holding it.
pub type SharedDraft = Arc<Mutex<ProposalDraft>>;

/// Port for creating and looking up drafting sessions.
#[async_trait]
pub trait DraftSessionStore: Send + Sync {
    /// Starts a new session with an empty draft.
    async fn create(&self) -> SessionId;

    /// Returns the session's draft, if the session exists.
    async fn get(&self, id: &SessionId) -> Option<SharedDraft>;

    /// Ends a session. Returns false if it did not exist.
    async fn remove(&self, id: &SessionId) -> bool;

    /// Number of live sessions.
    async fn len(&self) -> usize;

    /// Ends every session untouched for longer than `max_idle` whose
    /// draft is not in use. Returns how many were removed.
    async fn evict_idle(&self, max_idle: Duration) -> usize;
}
