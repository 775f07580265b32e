//! Drafting configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::proposal::{DEFAULT_CHUNK_SIZE, DEFAULT_EXPORT_FILE_NAME, DEFAULT_INSTRUCTION};

/// How drafts are produced, split and exported
#[derive(Debug, Clone, Deserialize)]
pub struct DraftingConfig {
    /// Fallback chunk length (characters) for text without headers
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Instruction used when the user leaves it blank
    #[serde(default = "default_instruction")]
    pub default_instruction: String,

    /// File name offered when downloading the proposal
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

impl DraftingConfig {
    /// Validate drafting configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.chunk_size == 0 {
            return Err(ValidationError::InvalidChunkSize);
        }
        if !self.export_file_name.ends_with(".md") {
            return Err(ValidationError::InvalidExportFileName);
        }
        Ok(())
    }
}

impl Default for DraftingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            default_instruction: default_instruction(),
            export_file_name: default_export_file_name(),
        }
    }
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_instruction() -> String {
    DEFAULT_INSTRUCTION.to_string()
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drafting_defaults() {
        let config = DraftingConfig::default();
        assert_eq!(config.chunk_size, 2000);
        assert_eq!(config.export_file_name, "proposal.md");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_chunk_size_is_rejected() {
        let config = DraftingConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidChunkSize));
    }

    #[test]
    fn test_export_name_must_be_markdown() {
        let config = DraftingConfig {
            export_file_name: "proposal.pdf".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidExportFileName));
    }
}
