//! ReviseSection command handler.
//!
//! Rewrites a single section of the draft according to user feedback. The
//! other sections, and the section's position, are left alone.

use std::sync::Arc;

use super::completion::{collect_response, completion_request};
use super::generate_proposal::required_model;
use super::{DraftingSettings, ProgressSink, ProposalError};
use crate::domain::foundation::SessionId;
use crate::domain::proposal::{GenerationRequest, ProposalDraft, Section};
use crate::ports::{ProviderFactory, ProviderSelection};

/// Command to revise one section.
#[derive(Debug, Clone)]
pub struct ReviseSectionCommand {
    pub session_id: SessionId,
    pub selection: ProviderSelection,
    pub instruction: Option<String>,
    pub section_index: usize,
    /// What the user wants changed. May be empty.
    pub feedback: String,
}

/// Handler for ReviseSection commands.
pub struct ReviseSectionHandler {
    factory: Arc<dyn ProviderFactory>,
    settings: DraftingSettings,
}

impl ReviseSectionHandler {
    pub fn new(factory: Arc<dyn ProviderFactory>, settings: DraftingSettings) -> Self {
        Self { factory, settings }
    }

    /// Revises the section and returns its new state.
    pub async fn handle(
        &self,
        cmd: ReviseSectionCommand,
        draft: &mut ProposalDraft,
        progress: &dyn ProgressSink,
    ) -> Result<Section, ProposalError> {
        let model = required_model(&cmd.selection)?;
        let current = draft.section(cmd.section_index)?.text().to_string();
        let provider = self.factory.create(&cmd.selection)?;

        let request = GenerationRequest::for_revision(
            cmd.selection.provider,
            model,
            Some(self.settings.instruction_or_default(cmd.instruction.as_deref())),
            &current,
            &cmd.feedback,
        );

        tracing::info!(
            session_id = %cmd.session_id,
            section = cmd.section_index,
            provider = %request.provider,
            model = %request.model,
            "Revising section"
        );

        let completion = completion_request(cmd.session_id, &request, self.settings.max_tokens);
        let revised = collect_response(provider.as_ref(), completion, progress).await?;

        let section = draft.revise(cmd.section_index, revised)?.clone();
        tracing::info!(
            session_id = %cmd.session_id,
            section = section.index(),
            revisions = section.revisions(),
            "Section revised"
        );
        Ok(section)
    }
}
