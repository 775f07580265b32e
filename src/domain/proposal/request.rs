//! Generation requests - what is sent to a language model for one action.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Instruction used when the user does not supply one.
pub const DEFAULT_INSTRUCTION: &str = "You are an experienced consultant who writes business plans \
for government support programs. Using the program announcement and the company introduction, \
write a thorough and fitting business plan. Structure the document in Markdown using '#', '##' \
and '###' headers.";

const REVISION_DIRECTIVE: &str = "Revise the content to reflect this feedback.";

/// Hosted language-model backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAI,
    Anthropic,
}

impl ProviderKind {
    /// All supported providers.
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Anthropic, ProviderKind::OpenAI];

    /// Lowercase identifier used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAI),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            other => Err(ValidationError::invalid_format(
                "provider",
                format!("unknown provider '{}'", other),
            )),
        }
    }
}

/// One request to a language model.
///
/// Built fresh for every generate or revise action and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub provider: ProviderKind,
    pub model: String,
    pub instruction: String,
    pub context: Vec<String>,
}

impl GenerationRequest {
    /// Creates a request with no context yet.
    ///
    /// A blank instruction falls back to [`DEFAULT_INSTRUCTION`].
    pub fn new(provider: ProviderKind, model: impl Into<String>, instruction: Option<&str>) -> Self {
        let instruction = instruction
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_INSTRUCTION)
            .to_string();

        Self {
            provider,
            model: model.into(),
            instruction,
            context: Vec::new(),
        }
    }

    /// Request for drafting a full proposal.
    pub fn for_proposal(
        provider: ProviderKind,
        model: impl Into<String>,
        instruction: Option<&str>,
        announcement: &str,
        company_info: &str,
    ) -> Self {
        Self::new(provider, model, instruction)
            .with_context(format!("Announcement:\n{}", announcement))
            .with_context(format!("Company information:\n{}", company_info))
    }

    /// Request for rewriting one section according to feedback.
    pub fn for_revision(
        provider: ProviderKind,
        model: impl Into<String>,
        instruction: Option<&str>,
        section_text: &str,
        feedback: &str,
    ) -> Self {
        Self::new(provider, model, instruction)
            .with_context(format!("Original content:\n{}", section_text))
            .with_context(format!("Feedback:\n{}", feedback))
            .with_context(REVISION_DIRECTIVE)
    }

    /// Appends a context block.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// The user-turn text: all context blocks separated by blank lines.
    pub fn user_content(&self) -> String {
        self.context.join("\n\n")
    }
}
