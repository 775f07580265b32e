//! Runs one model request and gathers the full response text.

use futures::StreamExt;
use uuid::Uuid;

use super::{ProgressSink, ProposalError};
use crate::domain::foundation::SessionId;
use crate::domain::proposal::GenerationRequest;
use crate::ports::{AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Builds the wire request: instruction as system prompt, context as the user turn.
pub(crate) fn completion_request(
    session_id: SessionId,
    request: &GenerationRequest,
    max_tokens: u32,
) -> CompletionRequest {
    CompletionRequest::new(RequestMetadata::new(session_id, Uuid::new_v4().to_string()))
        .with_system_prompt(request.instruction.clone())
        .with_message(MessageRole::User, request.user_content())
        .with_max_tokens(max_tokens)
}

/// Sends the request and returns the complete response.
///
/// Streams when the provider supports it, reporting every fragment to
/// `progress`; otherwise delivers the whole response as one fragment. Any
/// error, including one midway through a stream, discards what arrived.
pub(crate) async fn collect_response(
    provider: &dyn AIProvider,
    request: CompletionRequest,
    progress: &dyn ProgressSink,
) -> Result<String, ProposalError> {
    let text = if provider.provider_info().supports_streaming {
        let mut stream = provider.stream_complete(request).await?;
        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if !chunk.delta.is_empty() {
                text.push_str(&chunk.delta);
                progress.on_fragment(&chunk.delta, &text);
            }
            if let Some(usage) = chunk.usage {
                tracing::debug!(
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    "Stream finished"
                );
            }
        }
        text
    } else {
        let response = provider.complete(request).await?;
        tracing::debug!(
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            "Completion finished"
        );
        progress.on_fragment(&response.content, &response.content);
        response.content
    };

    if text.trim().is_empty() {
        return Err(ProposalError::EmptyResponse);
    }
    Ok(text)
}
