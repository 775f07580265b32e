//! Document adapters - Implementations of the DocumentExtractor port.
//!
//! - `PdfTextExtractor` - Pulls the text layer out of uploaded announcement PDFs

mod pdf_extractor;

pub use pdf_extractor::PdfTextExtractor;
