//! Request and response bodies for the proposal endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;
use crate::domain::proposal::{ProposalDraft, ProviderKind, Section};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Query string shared by the drafting endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct StreamQuery {
    /// Answer with Server-Sent Events instead of a single JSON body.
    #[serde(default)]
    pub stream: bool,
}

/// Body of `POST /api/providers/:provider/models`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListModelsRequest {
    pub api_key: Option<String>,
}

/// Body of `POST /api/sessions/:id/sections/:index/revise`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviseSectionRequest {
    pub provider: String,
    pub model: String,
    pub api_key: Option<String>,
    pub instruction: Option<String>,
    #[serde(default)]
    pub feedback: String,
}

/// Fields of the multipart form posted to `/api/sessions/:id/generate`.
#[derive(Debug, Clone, Default)]
pub struct GenerateForm {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub instruction: Option<String>,
    pub company_info: String,
    /// Bytes of the uploaded `announcement` file.
    pub announcement_pdf: Option<Vec<u8>>,
    pub announcement_text: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: SessionId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub provider: ProviderKind,
    pub models: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionView {
    pub index: usize,
    pub text: String,
    pub revisions: u32,
}

impl From<&Section> for SectionView {
    fn from(section: &Section) -> Self {
        Self {
            index: section.index(),
            text: section.text().to_string(),
            revisions: section.revisions(),
        }
    }
}

/// The session's current draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftView {
    pub session_id: SessionId,
    pub generated_at: Option<DateTime<Utc>>,
    pub sections: Vec<SectionView>,
}

impl DraftView {
    pub fn new(session_id: SessionId, draft: &ProposalDraft) -> Self {
        Self {
            session_id,
            generated_at: draft.generated_at(),
            sections: draft.sections().iter().map(SectionView::from).collect(),
        }
    }
}

/// Payload of an SSE `fragment` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentEvent {
    pub delta: String,
}

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
