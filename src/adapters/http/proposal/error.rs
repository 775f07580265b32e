//! Mapping of drafting failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::dto::ErrorResponse;
use crate::application::ProposalError;
use crate::domain::foundation::SessionId;
use crate::domain::proposal::DraftError;
use crate::ports::AIError;

/// Anything a proposal endpoint can answer with instead of success.
#[derive(Debug, Error)]
pub enum ProposalApiError {
    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Another action is already running for this session")]
    SessionBusy,

    #[error(transparent)]
    Proposal(#[from] ProposalError),
}

impl ProposalApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProposalApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProposalApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ProposalApiError::SessionBusy => StatusCode::CONFLICT,
            ProposalApiError::Proposal(err) => match err {
                ProposalError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ProposalError::Draft(DraftError::Empty) => StatusCode::UNPROCESSABLE_ENTITY,
                ProposalError::Draft(DraftError::SectionOutOfRange { .. }) => StatusCode::NOT_FOUND,
                ProposalError::Provider(e) if e.is_credential_error() => StatusCode::UNAUTHORIZED,
                ProposalError::Provider(_) | ProposalError::EmptyResponse => StatusCode::BAD_GATEWAY,
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ProposalApiError::BadRequest(_) => "BAD_REQUEST",
            ProposalApiError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            ProposalApiError::SessionBusy => "SESSION_BUSY",
            ProposalApiError::Proposal(err) => match err {
                ProposalError::Validation(_) => "VALIDATION_FAILED",
                ProposalError::Draft(DraftError::Empty) => "EMPTY_DRAFT",
                ProposalError::Draft(DraftError::SectionOutOfRange { .. }) => "SECTION_NOT_FOUND",
                ProposalError::Provider(AIError::MissingCredential { .. }) => "MISSING_API_KEY",
                ProposalError::Provider(AIError::AuthenticationFailed) => "INVALID_API_KEY",
                ProposalError::Provider(AIError::RateLimited { .. }) => "PROVIDER_RATE_LIMITED",
                ProposalError::Provider(_) => "PROVIDER_ERROR",
                ProposalError::EmptyResponse => "EMPTY_RESPONSE",
            },
        }
    }

    pub fn body(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.to_string())
    }
}

impl IntoResponse for ProposalApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Drafting action failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}
