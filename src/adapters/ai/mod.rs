//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port for various LLM providers.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenAIProvider` - OpenAI chat completion models
//! - `AnthropicProvider` - Anthropic Claude models
//! - `HttpProviderFactory` - Builds either of the above per request

mod anthropic_provider;
mod http;
mod mock_provider;
mod openai_provider;
mod provider_factory;
mod sse;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
pub use provider_factory::HttpProviderFactory;
