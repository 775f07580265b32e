//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AIProvider port,
//! allowing tests to run without calling real AI APIs.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Streaming in fixed-size fragments that concatenate to the exact response
//! - Error injection for failure-path testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("# Overview\nWe build robots.")
//!     .with_models(["gpt-4o"]);
//! ```

use async_trait::async_trait;
use futures::stream;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::proposal::split_into_chunks;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, CompletionStream, FinishReason,
    ProviderInfo, StreamChunk, TokenUsage,
};

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Result of `list_models`.
    models: Arc<Mutex<Result<Vec<String>, MockError>>>,
    /// Provider info to return.
    info: ProviderInfo,
    /// Characters per streamed fragment.
    fragment_size: usize,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion.
    Success(String),
    /// Fail before any content is produced.
    Error(MockError),
    /// Stream some content, then fail mid-stream.
    FailMidStream { partial: String, error: MockError },
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            models: Arc::new(Mutex::new(Ok(vec!["mock-model-1".to_string()]))),
            info: ProviderInfo::new("mock", "mock-model-1", 128_000).with_streaming(true),
            fragment_size: 7,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success(content.into()))
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Adds a response that streams `partial` and then fails.
    pub fn with_mid_stream_failure(self, partial: impl Into<String>, error: MockError) -> Self {
        self.push(MockResponse::FailMidStream {
            partial: partial.into(),
            error,
        })
    }

    /// Sets the models returned by `list_models`.
    pub fn with_models<I, S>(self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.models.lock().unwrap() = Ok(models.into_iter().map(Into::into).collect());
        self
    }

    /// Makes `list_models` fail.
    pub fn with_models_error(self, error: MockError) -> Self {
        *self.models.lock().unwrap() = Err(error);
        self
    }

    /// Sets the provider info (e.g. to disable streaming).
    pub fn with_provider_info(mut self, info: ProviderInfo) -> Self {
        self.info = info;
        self
    }

    /// Sets how many characters each streamed fragment carries.
    pub fn with_fragment_size(mut self, size: usize) -> Self {
        self.fragment_size = size.max(1);
        self
    }

    /// Returns the number of completion calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded completion requests.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn push(self, response: MockResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Records the call and gets the next response or a default.
    fn next_response(&self, request: CompletionRequest) -> MockResponse {
        self.calls.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success("Mock response".to_string()))
    }

    fn fragments(&self, content: &str) -> Vec<Result<StreamChunk, AIError>> {
        split_into_chunks(content, self.fragment_size)
            .into_iter()
            .map(|fragment| Ok(StreamChunk::content(fragment)))
            .collect()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        match self.next_response(request) {
            MockResponse::Success(content) => Ok(CompletionResponse {
                usage: TokenUsage::new(10, self.estimate_tokens(&content)),
                content,
                model: self.info.model.clone(),
                finish_reason: FinishReason::Stop,
            }),
            MockResponse::Error(err) | MockResponse::FailMidStream { error: err, .. } => {
                Err(err.into())
            }
        }
    }

    async fn stream_complete(&self, request: CompletionRequest) -> Result<CompletionStream, AIError> {
        match self.next_response(request) {
            MockResponse::Success(content) => {
                let mut chunks = self.fragments(&content);
                chunks.push(Ok(StreamChunk::final_chunk(
                    FinishReason::Stop,
                    TokenUsage::new(10, self.estimate_tokens(&content)),
                )));
                Ok(Box::pin(stream::iter(chunks)))
            }
            MockResponse::Error(err) => Err(err.into()),
            MockResponse::FailMidStream { partial, error } => {
                let mut chunks = self.fragments(&partial);
                chunks.push(Err(error.into()));
                Ok(Box::pin(stream::iter(chunks)))
            }
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, AIError> {
        self.models.lock().unwrap().clone().map_err(AIError::from)
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        (text.len() / 4).max(1) as u32
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::ports::{MessageRole, RequestMetadata};
    use futures::StreamExt;

    fn test_request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(SessionId::new(), "trace-123"))
            .with_message(MessageRole::User, "Hello")
    }

    #[tokio::test]
    async fn returns_responses_in_order_then_default() {
        let provider = MockAIProvider::new().with_response("First").with_response("Second");

        assert_eq!(provider.complete(test_request()).await.unwrap().content, "First");
        assert_eq!(provider.complete(test_request()).await.unwrap().content, "Second");
        assert_eq!(provider.complete(test_request()).await.unwrap().content, "Mock response");
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn stream_concatenates_to_exact_response() {
        let text = "# Title\n\n  indented   spacing\nend";
        let provider = MockAIProvider::new().with_response(text).with_fragment_size(3);

        let mut stream = provider.stream_complete(test_request()).await.unwrap();
        let mut content = String::new();
        let mut saw_final = false;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.unwrap();
            saw_final |= chunk.is_final();
            content.push_str(&chunk.delta);
        }

        assert_eq!(content, text);
        assert!(saw_final);
    }

    #[tokio::test]
    async fn configured_error_is_returned() {
        let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let result = provider.stream_complete(test_request()).await;
        assert!(matches!(result, Err(AIError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn mid_stream_failure_yields_partial_then_error() {
        let provider = MockAIProvider::new().with_mid_stream_failure(
            "partial",
            MockError::Network {
                message: "reset".into(),
            },
        );

        let items: Vec<_> = provider
            .stream_complete(test_request())
            .await
            .unwrap()
            .collect()
            .await;
        assert!(items.first().unwrap().is_ok());
        assert!(matches!(items.last().unwrap(), Err(AIError::Network(_))));
    }

    #[tokio::test]
    async fn list_models_is_configurable() {
        let provider = MockAIProvider::new().with_models(["a", "b"]);
        assert_eq!(provider.list_models().await.unwrap(), vec!["a", "b"]);

        let provider = MockAIProvider::new().with_models_error(MockError::AuthenticationFailed);
        assert!(matches!(
            provider.list_models().await,
            Err(AIError::AuthenticationFailed)
        ));
    }

    #[test]
    fn mock_error_converts_to_ai_error() {
        let err: AIError = MockError::RateLimited { retry_after_secs: 10 }.into();
        assert!(matches!(err, AIError::RateLimited { retry_after_secs: 10 }));

        let err: AIError = MockError::Timeout { timeout_secs: 30 }.into();
        assert!(matches!(err, AIError::Timeout { timeout_secs: 30 }));
    }
}
