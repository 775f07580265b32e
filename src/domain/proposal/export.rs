//! The downloadable proposal artifact.

use serde::Serialize;

use super::draft::{DraftError, ProposalDraft};

/// File name used when none is configured.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "proposal.md";

/// Content type of the exported document.
pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";

/// A markdown file produced from the current draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedProposal {
    pub file_name: String,
    pub content_type: &'static str,
    pub content: String,
}

impl ExportedProposal {
    /// Builds the artifact from a non-empty draft.
    pub fn from_draft(draft: &ProposalDraft, file_name: impl Into<String>) -> Result<Self, DraftError> {
        Ok(Self {
            file_name: file_name.into(),
            content_type: MARKDOWN_CONTENT_TYPE,
            content: draft.to_markdown()?,
        })
    }

    /// Value for a `Content-Disposition` header that triggers a download.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name.replace('"', ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_carries_markdown_and_name() {
        let draft = ProposalDraft::from_sections(vec!["# A\na".into(), "# B\nb".into()]);
        let export = ExportedProposal::from_draft(&draft, DEFAULT_EXPORT_FILE_NAME).unwrap();

        assert_eq!(export.file_name, "proposal.md");
        assert_eq!(export.content_type, "text/markdown");
        assert_eq!(export.content, "# A\na\n\n# B\nb");
        assert_eq!(
            export.content_disposition(),
            "attachment; filename=\"proposal.md\""
        );
    }

    #[test]
    fn export_of_empty_draft_fails() {
        let result = ExportedProposal::from_draft(&ProposalDraft::new(), "proposal.md");
        assert_eq!(result.unwrap_err(), DraftError::Empty);
    }
}
