//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - OpenAI and Anthropic providers, plus a mock
//! - `document` - PDF text extraction
//! - `storage` - In-memory session store
//! - `http` - axum REST and SSE endpoints

pub mod ai;
pub mod document;
pub mod http;
pub mod storage;

pub use ai::{HttpProviderFactory, MockAIProvider};
pub use document::PdfTextExtractor;
pub use storage::InMemoryDraftSessionStore;
