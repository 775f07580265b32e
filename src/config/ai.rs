//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::proposal::ProviderKind;

/// AI provider configuration
///
/// Keys configured here are pre-provisioned fallbacks; a key entered by the
/// user for a single action always takes precedence.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<Secret<String>>,

    /// Anthropic API key
    pub anthropic_api_key: Option<Secret<String>>,

    /// OpenAI API base URL
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Anthropic API base URL
    #[serde(default = "default_anthropic_base_url")]
    pub anthropic_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure (non-streaming calls only)
    #[serde(default)]
    pub max_retries: u32,

    /// Completion token limit sent with every request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Fills missing keys from the conventional `OPENAI_API_KEY` and
    /// `ANTHROPIC_API_KEY` environment variables.
    pub fn with_env_fallback(mut self) -> Self {
        if self.api_key(ProviderKind::OpenAI).is_none() {
            self.openai_api_key = std::env::var("OPENAI_API_KEY").ok().map(Secret::new);
        }
        if self.api_key(ProviderKind::Anthropic).is_none() {
            self.anthropic_api_key = std::env::var("ANTHROPIC_API_KEY").ok().map(Secret::new);
        }
        self
    }

    /// Configured key for a provider, ignoring blank values.
    pub fn api_key(&self, provider: ProviderKind) -> Option<&Secret<String>> {
        let key = match provider {
            ProviderKind::OpenAI => self.openai_api_key.as_ref(),
            ProviderKind::Anthropic => self.anthropic_api_key.as_ref(),
        };
        key.filter(|k| !k.expose_secret().trim().is_empty())
    }

    /// Check if a provider has a pre-provisioned key
    pub fn has_key(&self, provider: ProviderKind) -> bool {
        self.api_key(provider).is_some()
    }

    /// Base URL for a provider
    pub fn base_url(&self, provider: ProviderKind) -> &str {
        match provider {
            ProviderKind::OpenAI => &self.openai_base_url,
            ProviderKind::Anthropic => &self.anthropic_base_url,
        }
    }

    /// Validate AI configuration
    ///
    /// Keys are optional: users may enter their own at request time.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if !is_http_url(&self.openai_base_url) {
            return Err(ValidationError::InvalidBaseUrl("openai"));
        }
        if !is_http_url(&self.anthropic_base_url) {
            return Err(ValidationError::InvalidBaseUrl("anthropic"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            openai_base_url: default_openai_base_url(),
            anthropic_base_url: default_anthropic_base_url(),
            timeout_secs: default_timeout(),
            max_retries: 0,
            max_tokens: default_max_tokens(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_max_tokens() -> u32 {
    4000
}
