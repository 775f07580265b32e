//! Anthropic Provider - Implementation of AIProvider for Anthropic's Claude API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-sonnet-4-20250514")
//!     .with_base_url("https://api.anthropic.com");
//!
//! let provider = AnthropicProvider::new(config)?;
//! ```
//!
//! # Streaming
//!
//! Uses Server-Sent Events (SSE) with Anthropic's event format. Events include
//! `message_start`, `content_block_delta`, and `message_delta` for streaming.

use async_trait::async_trait;
use futures::future;
use futures::stream::{self, StreamExt};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::http::{check_status, map_send_error, with_retries};
use super::sse::{SseDecoder, SseEvent};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, CompletionStream, FinishReason,
    MessageRole, ProviderInfo, StreamChunk, TokenUsage,
};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// `max_tokens` is mandatory for Anthropic; used when the request has none.
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

const CONTEXT_MARKERS: &[&str] = &["prompt is too long"];
// Anthropic tends to have longer rate limit windows
const DEFAULT_RETRY_AFTER_SECS: u32 = 60;

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "claude-sonnet-4-20250514").
    pub model: String,
    /// Base URL for the API (default: https://api.anthropic.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(Secret::new(api_key.into()))
    }

    /// Creates a new configuration from an already-wrapped key.
    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
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

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Creates a provider with its own HTTP client.
    pub fn new(config: AnthropicConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(config, client))
    }

    /// Creates a provider sharing an existing HTTP client.
    pub fn with_client(config: AnthropicConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
    }

    /// Converts our request to Anthropic's format.
    ///
    /// Anthropic takes the system prompt as a top-level field rather than
    /// as a message.
    fn to_anthropic_request(&self, request: &CompletionRequest, stream: bool) -> AnthropicRequest {
        let mut system = request.system_prompt.clone();
        let mut messages = Vec::with_capacity(request.messages.len());

        for msg in &request.messages {
            let role = match msg.role {
                MessageRole::System => {
                    system = Some(match system.take() {
                        Some(existing) => format!("{}\n\n{}", existing, msg.content),
                        None => msg.content.clone(),
                    });
                    continue;
                }
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            };
            messages.push(AnthropicMessage {
                role: role.to_string(),
                content: msg.content.clone(),
            });
        }

        AnthropicRequest {
            model: self.config.model.clone(),
            messages,
            system,
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.temperature,
            stream,
        }
    }

    async fn send(&self, request: &CompletionRequest, stream: bool) -> Result<Response, AIError> {
        let response = self
            .authorized(self.client.post(format!("{}/v1/messages", self.config.base_url)))
            .json(&self.to_anthropic_request(request, stream))
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout))?;

        check_status(response, CONTEXT_MARKERS, DEFAULT_RETRY_AFTER_SECS).await
    }

    async fn complete_once(&self, request: &CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send(request, false).await?;

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        let content = anthropic_response
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        Ok(CompletionResponse {
            content,
            usage: TokenUsage::new(
                anthropic_response.usage.input_tokens,
                anthropic_response.usage.output_tokens,
            ),
            model: anthropic_response.model,
            finish_reason: FinishReason::from_provider(anthropic_response.stop_reason.as_deref()),
        })
    }
}

#[async_trait]
impl AIProvider for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        with_retries("anthropic", self.config.max_retries, || self.complete_once(&request)).await
    }

    async fn stream_complete(&self, request: CompletionRequest) -> Result<CompletionStream, AIError> {
        // Only the connection is retried; a stream that fails midway is not replayed.
        let response =
            with_retries("anthropic", self.config.max_retries, || self.send(&request, true)).await?;

        let stream = response
            .bytes_stream()
            .scan(SseDecoder::default(), |decoder, chunk| {
                let items: Vec<Result<StreamChunk, AIError>> = match chunk {
                    Ok(bytes) => decoder
                        .push(&bytes)
                        .into_iter()
                        .filter_map(parse_stream_event)
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
            .authorized(self.client.get(format!("{}/v1/models", self.config.base_url)))
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout))?;
        let response = check_status(response, CONTEXT_MARKERS, DEFAULT_RETRY_AFTER_SECS).await?;

        let listing: ModelList = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse model list: {}", e)))?;

        // The API lists newest models first; keep that order.
        Ok(listing.data.into_iter().map(|m| m.id).collect())
    }

    fn estimate_tokens(&self, text: &str) -> u32 {
        // Claude models use ~4 characters per token on average
        (text.len() / 4).max(1) as u32
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("anthropic", &self.config.model, 200_000).with_streaming(true)
    }
}

/// Parses one Anthropic SSE event.
///
/// ```text
/// event: content_block_delta
/// data: {"type":"content_block_delta","delta":{"type":"text_delta","text":"Hello"}}
/// ```
fn parse_stream_event(event: SseEvent) -> Option<Result<StreamChunk, AIError>> {
    match event.event.as_deref() {
        Some("content_block_delta") => {
            let delta = serde_json::from_str::<ContentBlockDelta>(&event.data).ok()?;
            delta
                .delta
                .text
                .filter(|t| !t.is_empty())
                .map(|t| Ok(StreamChunk::content(t)))
        }
        Some("message_delta") => {
            let delta = serde_json::from_str::<MessageDelta>(&event.data).ok()?;
            let usage = delta
                .usage
                .map(|u| TokenUsage::new(u.input_tokens.unwrap_or(0), u.output_tokens))
                .unwrap_or_default();
            Some(Ok(StreamChunk::final_chunk(
                FinishReason::from_provider(delta.delta.stop_reason.as_deref()),
                usage,
            )))
        }
        Some("error") => {
            let message = serde_json::from_str::<StreamError>(&event.data)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| "Stream error".to_string());
            Some(Err(AIError::unavailable(message)))
        }
        // message_start, content_block_start/stop, message_stop, ping
        _ => None,
    }
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: String,
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ContentBlockDelta {
    delta: TextDelta,
}

#[derive(Debug, Deserialize)]
struct TextDelta {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageDelta {
    delta: MessageDeltaContent,
    usage: Option<StreamUsage>,
}

#[derive(Debug, Deserialize)]
struct MessageDeltaContent {
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamUsage {
    input_tokens: Option<u32>,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    error: StreamErrorContent,
}

#[derive(Debug, Deserialize)]
struct StreamErrorContent {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}
