//! Proposal domain - the in-progress proposal draft and the rules that shape it.
//!
//! - [`DocumentSplitter`] turns a generated markdown document into sections.
//! - [`ProposalDraft`] holds the ordered sections of one session.
//! - [`GenerationRequest`] describes one call to a language model.
//! - [`ExportedProposal`] is the downloadable artifact.

mod draft;
mod export;
mod request;
mod splitter;

pub use draft::{DraftError, ProposalDraft, Section, SECTION_SEPARATOR};
pub use export::{ExportedProposal, DEFAULT_EXPORT_FILE_NAME, MARKDOWN_CONTENT_TYPE};
pub use request::{GenerationRequest, ProviderKind, DEFAULT_INSTRUCTION};
pub use splitter::{split_by_headers, split_into_chunks, DocumentSplitter, DEFAULT_CHUNK_SIZE};
