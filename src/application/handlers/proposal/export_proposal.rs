//! ExportProposal query handler.

use super::{DraftingSettings, ProposalError};
use crate::domain::proposal::{ExportedProposal, ProposalDraft};

/// Handler for ExportProposal queries.
///
/// Export is read-only and never calls a model.
pub struct ExportProposalHandler {
    file_name: String,
}

impl ExportProposalHandler {
    pub fn new(settings: &DraftingSettings) -> Self {
        Self {
            file_name: settings.export_file_name.clone(),
        }
    }

    pub fn handle(&self, draft: &ProposalDraft) -> Result<ExportedProposal, ProposalError> {
        let exported = ExportedProposal::from_draft(draft, self.file_name.clone())?;
        tracing::debug!(
            sections = draft.len(),
            bytes = exported.content.len(),
            "Exported proposal"
        );
        Ok(exported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::proposal::DraftError;

    #[test]
    fn joins_sections_with_blank_lines() {
        let draft = ProposalDraft::from_sections(vec!["# A\nhello".into(), "# B\nworld".into()]);
        let exported = ExportProposalHandler::new(&DraftingSettings::default())
            .handle(&draft)
            .unwrap();

        assert_eq!(exported.content, "# A\nhello\n\n# B\nworld");
        assert_eq!(exported.file_name, "proposal.md");
        assert_eq!(exported.content_type, "text/markdown");
    }

    #[test]
    fn empty_draft_cannot_be_exported() {
        let err = ExportProposalHandler::new(&DraftingSettings::default())
            .handle(&ProposalDraft::new())
            .unwrap_err();
        assert!(matches!(err, ProposalError::Draft(DraftError::Empty)));
    }
}
