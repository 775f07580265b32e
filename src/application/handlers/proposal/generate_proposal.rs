//! GenerateProposal command handler.
//!
//! Drafts a whole proposal from the announcement and company information and
//! replaces the session's draft with the split result.

use std::sync::Arc;
use std::time::Instant;

use super::completion::{collect_response, completion_request};
use super::{DraftingSettings, ProgressSink, ProposalError};
use crate::domain::foundation::{SessionId, ValidationError};
use crate::domain::proposal::{GenerationRequest, ProposalDraft};
use crate::ports::{DocumentExtractor, ProviderFactory, ProviderSelection};

/// Where the announcement text comes from.
#[derive(Debug, Clone)]
pub enum AnnouncementSource {
    /// An uploaded PDF, extracted before prompting.
    Pdf(Vec<u8>),
    /// Text the user pasted directly.
    Text(String),
}

impl AnnouncementSource {
    fn is_empty(&self) -> bool {
        match self {
            AnnouncementSource::Pdf(bytes) => bytes.is_empty(),
            AnnouncementSource::Text(text) => text.trim().is_empty(),
        }
    }
}

/// Command to draft a new proposal.
#[derive(Debug, Clone)]
pub struct GenerateProposalCommand {
    pub session_id: SessionId,
    /// Provider, model, and optional user key.
    pub selection: ProviderSelection,
    pub instruction: Option<String>,
    pub announcement: AnnouncementSource,
    pub company_info: String,
}

/// Outcome of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateProposalResult {
    pub section_count: usize,
    /// Characters in the raw model response.
    pub response_chars: usize,
}

/// Handler for GenerateProposal commands.
pub struct GenerateProposalHandler {
    factory: Arc<dyn ProviderFactory>,
    extractor: Arc<dyn DocumentExtractor>,
    settings: DraftingSettings,
}

impl GenerateProposalHandler {
    pub fn new(
        factory: Arc<dyn ProviderFactory>,
        extractor: Arc<dyn DocumentExtractor>,
        settings: DraftingSettings,
    ) -> Self {
        Self {
            factory,
            extractor,
            settings,
        }
    }

    /// Generates a proposal into `draft`.
    ///
    /// `draft` is only touched after the model has answered with usable
    /// text; every failure leaves it exactly as it was.
    pub async fn handle(
        &self,
        cmd: GenerateProposalCommand,
        draft: &mut ProposalDraft,
        progress: &dyn ProgressSink,
    ) -> Result<GenerateProposalResult, ProposalError> {
        let model = required_model(&cmd.selection)?;
        if cmd.announcement.is_empty() {
            return Err(ValidationError::empty_field("announcement").into());
        }
        if cmd.company_info.trim().is_empty() {
            return Err(ValidationError::empty_field("company_info").into());
        }

        let provider = self.factory.create(&cmd.selection)?;
        let announcement = self.announcement_text(cmd.announcement).await;

        let request = GenerationRequest::for_proposal(
            cmd.selection.provider,
            model,
            Some(self.settings.instruction_or_default(cmd.instruction.as_deref())),
            &announcement,
            &cmd.company_info,
        );

        tracing::info!(
            session_id = %cmd.session_id,
            provider = %request.provider,
            model = %request.model,
            prompt_tokens_estimate = provider.estimate_tokens(&request.user_content()),
            "Generating proposal"
        );

        let started = Instant::now();
        let completion = completion_request(cmd.session_id, &request, self.settings.max_tokens);
        let response = collect_response(provider.as_ref(), completion, progress).await?;

        let sections = self.settings.splitter.split(&response);
        let result = GenerateProposalResult {
            section_count: sections.len(),
            response_chars: response.chars().count(),
        };
        draft.replace_all(sections);

        tracing::info!(
            session_id = %cmd.session_id,
            sections = result.section_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Proposal generated"
        );
        Ok(result)
    }

    /// Extraction problems are not fatal: the model still gets the company
    /// information, just with an empty announcement.
    async fn announcement_text(&self, source: AnnouncementSource) -> String {
        match source {
            AnnouncementSource::Text(text) => text,
            AnnouncementSource::Pdf(bytes) => match self.extractor.extract_text(bytes).await {
                Ok(text) => {
                    if text.trim().is_empty() {
                        tracing::warn!("Announcement PDF contains no extractable text");
                    }
                    text
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to extract announcement PDF, continuing with empty text");
                    String::new()
                }
            },
        }
    }
}

/// The model named in the selection; drafting actions need one.
pub(crate) fn required_model(selection: &ProviderSelection) -> Result<String, ValidationError> {
    selection
        .model
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ValidationError::empty_field("model"))
}
