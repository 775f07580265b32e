//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the drafting workflow and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` / `ProviderFactory` - hosted language models
//! - `DocumentExtractor` - announcement PDF text extraction
//! - `DraftSessionStore` - in-memory session drafts

mod ai_provider;
mod document_extractor;
mod draft_session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, CompletionStream, FinishReason,
    Message, MessageRole, ProviderFactory, ProviderInfo, ProviderSelection, RequestMetadata,
    StreamChunk, TokenUsage,
};
pub use document_extractor::{DocumentExtractor, ExtractionError};
pub use draft_session_store::{DraftSessionStore, SharedDraft};
