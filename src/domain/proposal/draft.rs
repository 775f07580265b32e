//! Proposal draft - the ordered sections of one drafting session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Separator placed between sections when the draft is reassembled.
pub const SECTION_SEPARATOR: &str = "\n\n";

/// Errors raised by draft operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("The proposal draft is empty")]
    Empty,

    #[error("Section {index} does not exist (draft has {len} sections)")]
    SectionOutOfRange { index: usize, len: usize },
}

/// One heading-delimited (or fixed-size) unit of the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    index: usize,
    text: String,
    revisions: u32,
}

impl Section {
    fn new(index: usize, text: String) -> Self {
        Self {
            index,
            text,
            revisions: 0,
        }
    }

    /// Position of the section in reading order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current markdown text of the section.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of revisions applied since the draft was generated.
    pub fn revisions(&self) -> u32 {
        self.revisions
    }
}

/// The in-progress proposal.
///
/// Starts empty, is replaced wholesale on generation, and is changed one
/// section at a time on revision. Section indices stay stable until the
/// next generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProposalDraft {
    sections: Vec<Section>,
    generated_at: Option<DateTime<Utc>>,
}

impl ProposalDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a draft from already-split section texts.
    pub fn from_sections(sections: Vec<String>) -> Self {
        let mut draft = Self::new();
        draft.replace_all(sections);
        draft
    }

    /// Replaces every section, renumbering from zero.
    pub fn replace_all(&mut self, sections: Vec<String>) {
        self.sections = sections
            .into_iter()
            .enumerate()
            .map(|(index, text)| Section::new(index, text))
            .collect();
        self.generated_at = Some(Utc::now());
    }

    /// Replaces the text of one section, leaving all others untouched.
    pub fn revise(&mut self, index: usize, text: impl Into<String>) -> Result<&Section, DraftError> {
        let len = self.sections.len();
        if len == 0 {
            return Err(DraftError::Empty);
        }
        let section = self
            .sections
            .get_mut(index)
            .ok_or(DraftError::SectionOutOfRange { index, len })?;
        section.text = text.into();
        section.revisions += 1;
        Ok(section)
    }

    /// Looks up a section by index.
    pub fn section(&self, index: usize) -> Result<&Section, DraftError> {
        if self.sections.is_empty() {
            return Err(DraftError::Empty);
        }
        self.sections.get(index).ok_or(DraftError::SectionOutOfRange {
            index,
            len: self.sections.len(),
        })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// When the current sections were generated, if ever.
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    /// Joins all sections with a blank line, in order.
    pub fn to_markdown(&self) -> Result<String, DraftError> {
        if self.sections.is_empty() {
            return Err(DraftError::Empty);
        }
        Ok(self
            .sections
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(SECTION_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProposalDraft {
        ProposalDraft::from_sections(vec![
            "# Overview\nWe help farmers.".to_string(),
            "# Budget\n10k".to_string(),
            "# Team\nThree people".to_string(),
        ])
    }

    #[test]
    fn new_draft_is_empty() {
        let draft = ProposalDraft::new();
        assert!(draft.is_empty());
        assert!(draft.generated_at().is_none());
    }

    #[test]
    fn from_sections_numbers_in_order() {
        let draft = sample();
        let indices: Vec<usize> = draft.sections().iter().map(Section::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(draft.generated_at().is_some());
    }

    #[test]
    fn revise_changes_only_target_section() {
        let mut draft = sample();
        let before = draft.clone();

        let revised = draft.revise(1, "# Budget\n20k").unwrap();
        assert_eq!(revised.index(), 1);
        assert_eq!(revised.revisions(), 1);

        assert_eq!(draft.section(1).unwrap().text(), "# Budget\n20k");
        assert_eq!(draft.section(0).unwrap(), before.section(0).unwrap());
        assert_eq!(draft.section(2).unwrap(), before.section(2).unwrap());
        assert_eq!(draft.len(), before.len());
    }

    #[test]
    fn revise_out_of_range_leaves_draft_untouched() {
        let mut draft = sample();
        let before = draft.clone();

        let err = draft.revise(3, "nope").unwrap_err();
        assert_eq!(err, DraftError::SectionOutOfRange { index: 3, len: 3 });
        assert_eq!(draft, before);
    }

    #[test]
    fn revise_on_empty_draft_fails() {
        let mut draft = ProposalDraft::new();
        assert_eq!(draft.revise(0, "x").unwrap_err(), DraftError::Empty);
    }

    #[test]
    fn replace_all_resets_revision_counts() {
        let mut draft = sample();
        draft.revise(0, "changed").unwrap();
        draft.replace_all(vec!["# New".to_string()]);
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.section(0).unwrap().revisions(), 0);
    }

    #[test]
    fn markdown_joins_with_blank_line() {
        let markdown = sample().to_markdown().unwrap();
        assert_eq!(
            markdown,
            "# Overview\nWe help farmers.\n\n# Budget\n10k\n\n# Team\nThree people"
        );
    }

    #[test]
    fn markdown_of_empty_draft_fails() {
        assert_eq!(ProposalDraft::new().to_markdown().unwrap_err(), DraftError::Empty);
    }
}
