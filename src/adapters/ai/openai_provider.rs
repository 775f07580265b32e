//! OpenAI Provider - Implementation of AIProvider for OpenAI's API.
//!
//! Uses the chat completions endpoint with streaming via SSE, and the
//! models endpoint for listing the GPT models a key can use.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```

use async_trait::async_trait;
use futures::future;
use futures::stream::{self, StreamExt};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::http::{check_status, map_send_error, with_retries};
use super::sse::{SseDecoder, SseEvent};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, CompletionStream, FinishReason,
    MessageRole, ProviderInfo, StreamChunk, TokenUsage,
};

const CONTEXT_MARKERS: &[&str] = &["maximum context length", "context_length_exceeded"];
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-4o").
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(Secret::new(api_key.into()))
    }

    /// Creates a new configuration from an already-wrapped key.
    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(120),
            max_retries: 0,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a provider with its own HTTP client.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(config, client))
    }

    /// Creates a provider sharing an existing HTTP client.
    pub fn with_client(config: OpenAIConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.config.base_url)
    }

    /// Converts our request to OpenAI's format.
    fn to_openai_request(&self, request: &CompletionRequest, stream: bool) -> OpenAIRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref prompt) = request.system_prompt {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(OpenAIMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            });
        }

        OpenAIRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream,
            stream_options: stream.then_some(StreamOptions {
                include_usage: true,
            }),
        }
    }

    async fn send(&self, request: &CompletionRequest, stream: bool) -> Result<Response, AIError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&self.to_openai_request(request, stream))
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout))?;

        check_status(response, CONTEXT_MARKERS, DEFAULT_RETRY_AFTER_SECS).await
    }

    async fn complete_once(&self, request: &CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send(request, false).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("No choices in response"))?;

        let usage = openai_response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            usage,
            model: openai_response.model,
            finish_reason: FinishReason::from_provider(choice.finish_reason.as_deref()),
        })
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        with_retries("openai", self.config.max_retries, || self.complete_once(&request)).await
    }

    async fn stream_complete(&self, request: CompletionRequest) -> Result<CompletionStream, AIError> {
        // Only the connection is retried; a stream that fails midway is not replayed.
        let response =
            with_retries("openai", self.config.max_retries, || self.send(&request, true)).await?;

        let stream = response
            .bytes_stream()
            .scan(SseDecoder::default(), |decoder, chunk| {
                let items: Vec<Result<StreamChunk, AIError>> = match chunk {
                    Ok(bytes) => decoder
                        .push(&bytes)
                        .into_iter()
                        .flat_map(parse_stream_event)
                        .collect(),
                    Err(e) => vec![Err(AIError::network(format!("Stream error: {}", e)))],
                };
                future::ready(Some(items))
            })
            .flat_map(stream::iter);

        Ok(Box::pin(stream))
    }

    async fn list_models(&self) -> Result<Vec<String>, AIError> {
        let response = self
            .client
            .get(self.models_url())
            .bearer_auth(self.config.api_key())
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout))?;
        let response = check_status(response, CONTEXT_MARKERS, DEFAULT_RETRY_AFTER_SECS).await?;

        let listing: ModelList = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse model list: {}", e)))?;

        // Only chat-capable GPT models are useful for drafting.
        let mut models: Vec<String> = listing
            .data
            .into_iter()
            .map(|m| m.id)
            .filter(|id| id.contains("gpt"))
            .collect();
        models.sort();
        Ok(models)
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        // ~4 characters per token; use tiktoken for accuracy
        (text.len() / 4).max(1) as u32
    }

    fn provider_info(&self) -> ProviderInfo {
        let max_context = match self.config.model.as_str() {
            m if m.starts_with("gpt-4o") || m.starts_with("gpt-4-turbo") => 128_000,
            m if m.starts_with("gpt-4.1") => 1_000_000,
            m if m.starts_with("gpt-4") => 8_192,
            m if m.starts_with("gpt-3.5") => 16_385,
            _ => 128_000,
        };

        ProviderInfo::new("openai", &self.config.model, max_context).with_streaming(true)
    }
}

/// Parses one SSE event from the chat completions stream.
///
/// The `[DONE]` marker produces nothing; a chunk with a finish reason produces
/// the final chunk; the trailing usage-only chunk (sent because
/// `include_usage` is set) produces a usage-bearing empty chunk.
fn parse_stream_event(event: SseEvent) -> Vec<Result<StreamChunk, AIError>> {
    let data = event.data.trim();
    if data.is_empty() || data == "[DONE]" {
        return Vec::new();
    }

    let chunk = match serde_json::from_str::<StreamResponseChunk>(data) {
        Ok(chunk) => chunk,
        Err(e) => {
            return vec![Err(AIError::parse(format!(
                "Failed to parse SSE chunk: {}",
                e
            )))]
        }
    };

    let usage = chunk
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens));
    let mut results = Vec::new();

    match chunk.choices.first() {
        Some(choice) => {
            if let Some(content) = choice.delta.content.as_deref().filter(|c| !c.is_empty()) {
                results.push(Ok(StreamChunk::content(content)));
            }
            if choice.finish_reason.is_some() {
                results.push(Ok(StreamChunk::final_chunk(
                    FinishReason::from_provider(choice.finish_reason.as_deref()),
                    usage.unwrap_or_default(),
                )));
            }
        }
        None => {
            if let Some(usage) = usage {
                results.push(Ok(StreamChunk {
                    delta: String::new(),
                    finish_reason: None,
                    usage: Some(usage),
                }));
            }
        }
    }

    results
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream_options: Option<StreamOptions>,
}

#[derive(Debug, Serialize)]
struct StreamOptions {
    include_usage: bool,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: String,
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct StreamResponseChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::ports::RequestMetadata;

    fn provider(model: &str) -> OpenAIProvider {
        OpenAIProvider::with_client(OpenAIConfig::new("test").with_model(model), Client::new())
    }

    fn event(data: &str) -> SseEvent {
        SseEvent {
            event: None,
            data: data.to_string(),
        }
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_model("gpt-4o-mini")
            .with_base_url("https://custom.api.com/v1/")
            .with_timeout(Duration::from_secs(30))
            .with_max_retries(2);

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "https://custom.api.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn request_puts_system_prompt_first() {
        let request = CompletionRequest::new(RequestMetadata::new(SessionId::new(), "t"))
            .with_system_prompt("Write proposals")
            .with_message(MessageRole::User, "Announcement: ...")
            .with_max_tokens(4000);

        let body = provider("gpt-4o").to_openai_request(&request, true);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "Write proposals");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["stream"], true);
        assert_eq!(json["stream_options"]["include_usage"], true);
        assert_eq!(json["max_tokens"], 4000);
    }

    #[test]
    fn non_streaming_request_omits_stream_options() {
        let request = CompletionRequest::new(RequestMetadata::new(SessionId::new(), "t"));
        let json = serde_json::to_value(provider("gpt-4o").to_openai_request(&request, false)).unwrap();
        assert_eq!(json["stream"], false);
        assert!(json.get("stream_options").is_none());
    }

    #[test]
    fn provider_info_reports_context_window() {
        let info = provider("gpt-4o-2024-08-06").provider_info();
        assert_eq!(info.name, "openai");
        assert_eq!(info.max_context_tokens, 128_000);
        assert!(info.supports_streaming);

        assert_eq!(provider("gpt-4").provider_info().max_context_tokens, 8_192);
    }

    #[test]
    fn parse_content_event() {
        let chunks = parse_stream_event(event(
            r#"{"id":"c1","choices":[{"delta":{"content":"Hello"},"finish_reason":null}]}"#,
        ));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].as_ref().unwrap().delta, "Hello");
    }

    #[test]
    fn parse_finish_event() {
        let chunks = parse_stream_event(event(
            r#"{"id":"c1","choices":[{"delta":{},"finish_reason":"length"}]}"#,
        ));
        let chunk = chunks[0].as_ref().unwrap();
        assert!(chunk.is_final());
        assert_eq!(chunk.finish_reason, Some(FinishReason::Length));
    }

    #[test]
    fn parse_usage_only_event() {
        let chunks = parse_stream_event(event(
            r#"{"id":"c1","choices":[],"usage":{"prompt_tokens":10,"completion_tokens":5}}"#,
        ));
        let chunk = chunks[0].as_ref().unwrap();
        assert!(!chunk.is_final());
        assert_eq!(chunk.usage, Some(TokenUsage::new(10, 5)));
    }

    #[test]
    fn parse_done_marker_yields_nothing() {
        assert!(parse_stream_event(event("[DONE]")).is_empty());
    }

    #[test]
    fn parse_garbage_yields_error() {
        let chunks = parse_stream_event(event("{not json"));
        assert!(matches!(chunks[0], Err(AIError::Parse(_))));
    }
}
