//! Provider factory - builds an `AIProvider` for one user action.
//!
//! Credentials are resolved in order: the key the user entered, then the key
//! pre-provisioned in configuration. One `reqwest::Client` is shared by every
//! provider built here.

use reqwest::Client;
use std::sync::Arc;

use super::{AnthropicConfig, AnthropicProvider, OpenAIConfig, OpenAIProvider};
use crate::config::AiConfig;
use crate::domain::proposal::ProviderKind;
use crate::ports::{AIError, AIProvider, ProviderFactory, ProviderSelection};

/// Factory for the hosted OpenAI and Anthropic backends.
pub struct HttpProviderFactory {
    config: AiConfig,
    client: Client,
}

impl HttpProviderFactory {
    /// Creates a factory with a client honouring the configured timeout.
    pub fn new(config: AiConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AIError::network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    /// Configuration this factory builds providers from.
    pub fn config(&self) -> &AiConfig {
        &self.config
    }
}

impl ProviderFactory for HttpProviderFactory {
    fn create(&self, selection: &ProviderSelection) -> Result<Arc<dyn AIProvider>, AIError> {
        let provider = selection.provider;
        let api_key = selection
            .api_key
            .clone()
            .or_else(|| self.config.api_key(provider).cloned())
            .ok_or(AIError::MissingCredential { provider })?;

        let base_url = self.config.base_url(provider);
        let timeout = self.config.timeout();
        let max_retries = self.config.max_retries;

        tracing::debug!(
            provider = %provider,
            model = selection.model.as_deref().unwrap_or("<default>"),
            user_key = selection.api_key.is_some(),
            "Building AI provider"
        );

        let built: Arc<dyn AIProvider> = match provider {
            ProviderKind::OpenAI => {
                let mut config = OpenAIConfig::from_secret(api_key)
                    .with_base_url(base_url)
                    .with_timeout(timeout)
                    .with_max_retries(max_retries);
                if let Some(model) = &selection.model {
                    config = config.with_model(model.clone());
                }
                Arc::new(OpenAIProvider::with_client(config, self.client.clone()))
            }
            ProviderKind::Anthropic => {
                let mut config = AnthropicConfig::from_secret(api_key)
                    .with_base_url(base_url)
                    .with_timeout(timeout)
                    .with_max_retries(max_retries);
                if let Some(model) = &selection.model {
                    config = config.with_model(model.clone());
                }
                Arc::new(AnthropicProvider::with_client(config, self.client.clone()))
            }
        };

        Ok(built)
    }
}
