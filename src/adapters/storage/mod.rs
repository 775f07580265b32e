//! Storage Adapters
//!
//! Implementations of the DraftSessionStore port.
//!
//! ## Available Adapters
//!
//! - **InMemoryDraftSessionStore** - Keeps drafts in memory for the life of the process
//! - **SessionSweeper** - Evicts idle sessions in the background

mod in_memory_draft_session_store;
mod session_sweeper;

pub use in_memory_draft_session_store::InMemoryDraftSessionStore;
pub use session_sweeper::SessionSweeper;
