//! Errors raised by proposal drafting handlers.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::proposal::DraftError;
use crate::ports::AIError;

/// Failure of one drafting action. The draft is left as it was.
#[derive(Debug, Error)]
pub enum ProposalError {
    /// Missing or malformed user input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The draft cannot satisfy the request (empty, bad section index).
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// The language model call failed.
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),

    /// The model answered with nothing but whitespace.
    #[error("The AI provider returned an empty response")]
    EmptyResponse,
}

impl ProposalError {
    /// True when the failure is about the API key rather than the request.
    pub fn is_credential_error(&self) -> bool {
        matches!(self, ProposalError::Provider(err) if err.is_credential_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::proposal::ProviderKind;

    #[test]
    fn credential_errors_are_recognised() {
        let err: ProposalError = AIError::MissingCredential {
            provider: ProviderKind::OpenAI,
        }
        .into();
        assert!(err.is_credential_error());

        let err: ProposalError = AIError::unavailable("down").into();
        assert!(!err.is_credential_error());
        assert!(!ProposalError::EmptyResponse.is_credential_error());
    }

    #[test]
    fn messages_pass_through_domain_errors() {
        let err: ProposalError = DraftError::Empty.into();
        assert_eq!(err.to_string(), "The proposal draft is empty");
    }
}
