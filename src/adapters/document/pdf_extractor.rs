//! PDF text extraction using `pdf-extract`.
//!
//! Parsing is CPU-bound and the parser may panic on malformed input, so it
//! runs on tokio's blocking pool; a panic surfaces as a failed join.

use async_trait::async_trait;

use crate::ports::{DocumentExtractor, ExtractionError};

/// Extracts the text layer of a PDF. Scanned images yield no text (no OCR).
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentExtractor for PdfTextExtractor {
    async fn extract_text(&self, bytes: Vec<u8>) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let size = bytes.len();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| ExtractionError::TaskFailed(e.to_string()))?
            .map_err(|e| ExtractionError::Malformed(e.to_string()))?;

        tracing::debug!(bytes = size, chars = text.chars().count(), "Extracted PDF text");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PAGES: &[u8] = include_bytes!("../../../tests/fixtures/two_page_announcement.pdf");

    fn compact(text: &str) -> String {
        text.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[tokio::test]
    async fn extracts_every_page_in_order() {
        let text = PdfTextExtractor::new()
            .extract_text(TWO_PAGES.to_vec())
            .await
            .unwrap();
        let text = compact(&text);

        let first = text.find("SmartFarmingGrantCall").expect("page one text");
        let second = text.find("Eligibility:smallroboticsfirms").expect("page two text");
        assert!(first < second);
    }

    #[tokio::test]
    async fn empty_upload_is_rejected() {
        let result = PdfTextExtractor::new().extract_text(Vec::new()).await;
        assert!(matches!(result, Err(ExtractionError::EmptyDocument)));
    }

    #[tokio::test]
    async fn garbage_bytes_are_an_error_not_a_crash() {
        let result = PdfTextExtractor::new()
            .extract_text(b"definitely not a pdf".to_vec())
            .await;
        assert!(matches!(
            result,
            Err(ExtractionError::Malformed(_)) | Err(ExtractionError::TaskFailed(_))
        ));
    }
}
