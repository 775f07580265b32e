//! Tunables shared by the drafting handlers.

use crate::config::AppConfig;
use crate::domain::proposal::{
    DocumentSplitter, DEFAULT_CHUNK_SIZE, DEFAULT_EXPORT_FILE_NAME, DEFAULT_INSTRUCTION,
};

/// Values the handlers read from configuration.
#[derive(Debug, Clone)]
pub struct DraftingSettings {
    /// Instruction sent when the user leaves theirs blank.
    pub default_instruction: String,
    /// Completion token limit per request.
    pub max_tokens: u32,
    /// Splits responses into sections.
    pub splitter: DocumentSplitter,
    /// Name of the exported markdown file.
    pub export_file_name: String,
}

impl DraftingSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            default_instruction: config.drafting.default_instruction.clone(),
            max_tokens: config.ai.max_tokens,
            splitter: DocumentSplitter::new(config.drafting.chunk_size),
            export_file_name: config.drafting.export_file_name.clone(),
        }
    }

    /// The user's instruction, or the default when it is absent or blank.
    pub fn instruction_or_default<'a>(&'a self, instruction: Option<&'a str>) -> &'a str {
        instruction
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.default_instruction)
    }
}

impl Default for DraftingSettings {
    fn default() -> Self {
        Self {
            default_instruction: DEFAULT_INSTRUCTION.to_string(),
            max_tokens: 4000,
            splitter: DocumentSplitter::new(DEFAULT_CHUNK_SIZE),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_instruction_falls_back() {
        let settings = DraftingSettings {
            default_instruction: "Default".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.instruction_or_default(None), "Default");
        assert_eq!(settings.instruction_or_default(Some(" \n")), "Default");
        assert_eq!(settings.instruction_or_default(Some(" Mine ")), "Mine");
    }

    #[test]
    fn built_from_config() {
        let mut config = AppConfig::default();
        config.ai.max_tokens = 1234;
        config.drafting.chunk_size = 10;

        let settings = DraftingSettings::from_config(&config);
        assert_eq!(settings.max_tokens, 1234);
        assert_eq!(settings.splitter.chunk_size(), 10);
        assert_eq!(settings.export_file_name, "proposal.md");
    }
}
