//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid AI request timeout")]
    InvalidTimeout,

    #[error("Maximum upload size must be greater than zero")]
    InvalidUploadLimit,

    #[error("Session idle time and session limit must be greater than zero")]
    InvalidSessionLimit,

    #[error("Chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("max_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("Invalid base URL for {0}: must start with http:// or https://")]
    InvalidBaseUrl(&'static str),

    #[error("Export file name must end with .md")]
    InvalidExportFileName,
}
