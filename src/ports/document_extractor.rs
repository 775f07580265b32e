//! Document Extractor Port - Text extraction from uploaded documents.
//!
//! The drafting workflow only needs plain text out of the announcement PDF.
//! Layout, images, and OCR are out of scope.

use async_trait::async_trait;

/// Errors raised while extracting text from a document.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Document is empty")]
    EmptyDocument,

    #[error("Failed to parse document: {0}")]
    Malformed(String),

    #[error("Extraction task failed: {0}")]
    TaskFailed(String),
}

/// Port for turning an uploaded document into plain text.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Extracts the text of every page, concatenated in page order.
    async fn extract_text(&self, bytes: Vec<u8>) -> Result<String, ExtractionError>;
}
