//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PROPOSAL_MASTER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use proposal_master::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod drafting;
mod error;
mod server;

pub use ai::AiConfig;
pub use drafting::DraftingConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so the service starts with no environment at
/// all; API keys can then be supplied per request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, upload limit)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration (OpenAI/Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Drafting configuration (splitting, default instruction, export)
    #[serde(default)]
    pub drafting: DraftingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PROPOSAL_MASTER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to `OPENAI_API_KEY` / `ANTHROPIC_API_KEY` for provider keys
    ///
    /// # Environment Variable Format
    ///
    /// - `PROPOSAL_MASTER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PROPOSAL_MASTER__AI__OPENAI_API_KEY=...` -> `ai.openai_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PROPOSAL_MASTER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.ai = config.ai.with_env_fallback();
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.drafting.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "PROPOSAL_MASTER__SERVER__PORT",
        "PROPOSAL_MASTER__SERVER__ENVIRONMENT",
        "PROPOSAL_MASTER__AI__ANTHROPIC_API_KEY",
        "PROPOSAL_MASTER__AI__MAX_RETRIES",
        "PROPOSAL_MASTER__DRAFTING__CHUNK_SIZE",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_no_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.ai.max_retries, 0);
        assert_eq!(config.drafting.chunk_size, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PROPOSAL_MASTER__SERVER__PORT", "3000");
        env::set_var("PROPOSAL_MASTER__SERVER__ENVIRONMENT", "production");
        env::set_var("PROPOSAL_MASTER__AI__ANTHROPIC_API_KEY", "sk-ant-xxx");
        env::set_var("PROPOSAL_MASTER__AI__MAX_RETRIES", "2");
        env::set_var("PROPOSAL_MASTER__DRAFTING__CHUNK_SIZE", "500");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert!(config.ai.has_key(crate::domain::proposal::ProviderKind::Anthropic));
        assert_eq!(config.ai.max_retries, 2);
        assert_eq!(config.drafting.chunk_size, 500);
    }

    #[test]
    fn test_validate_reports_first_bad_section() {
        let mut config = AppConfig::default();
        config.drafting.chunk_size = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidChunkSize));
    }
}
