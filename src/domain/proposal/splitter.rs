//! Document splitter - breaks a generated proposal into revisable sections.
//!
//! Sections follow markdown headings. Headings with no body of their own (a
//! run of headings with nothing but blank lines between them) are carried
//! forward into the next section instead of being emitted alone, so no section
//! is title-only unless it is the last one in the document. A single preamble
//! line before the first heading is carried forward the same way.
//!
//! Text without any heading falls back to fixed-size character windows.

/// Default window size, in characters, for heading-less text.
pub const DEFAULT_CHUNK_SIZE: usize = 2000;

const HEADER_MARKER: char = '#';

/// Splits markdown text into an ordered sequence of sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSplitter {
    chunk_size: usize,
}

impl Default for DocumentSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl DocumentSplitter {
    /// Creates a splitter using `chunk_size` characters for the fallback windows.
    ///
    /// A zero chunk size is treated as one.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Window size used when the text has no headings.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Splits `text` into sections in reading order.
    ///
    /// Empty input yields no sections; any other input yields at least one.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        if !text.split('\n').any(is_header_line) {
            return split_into_chunks(text, self.chunk_size);
        }

        split_by_headers(text)
    }
}

/// Splits text on heading lines, merging body-less headings forward.
///
/// Each emitted section is trimmed of surrounding whitespace.
pub fn split_by_headers(text: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();

    for line in text.split('\n') {
        if is_header_line(line) {
            let pending = std::mem::take(&mut current);
            if has_body(&pending) {
                sections.push(pending.trim().to_string());
            } else {
                // Headings only (or a single preamble line): prefix the next section.
                current = pending;
            }
        }
        current.push_str(line);
        current.push('\n');
    }

    let last = current.trim();
    if !last.is_empty() {
        sections.push(last.to_string());
    }

    sections
}

/// Slices text into consecutive windows of `chunk_size` characters.
///
/// Windows never split a character; the last one may be shorter.
pub fn split_into_chunks(text: &str, chunk_size: usize) -> Vec<String> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == chunk_size {
            chunks.push(text[start..idx].to_string());
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(text[start..].to_string());
    }

    chunks
}

fn is_header_line(line: &str) -> bool {
    line.starts_with(HEADER_MARKER)
}

/// True when the pending text spans several lines and at least one of them
/// is body text rather than a heading.
fn has_body(pending: &str) -> bool {
    let trimmed = pending.trim();
    trimmed.contains('\n')
        && trimmed
            .split('\n')
            .any(|line| !line.trim().is_empty() && !is_header_line(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn without_whitespace(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn splits_on_each_heading_with_body() {
        let sections = DocumentSplitter::default().split("# A\nhello\n# B\nworld\n");
        assert_eq!(sections, vec!["# A\nhello", "# B\nworld"]);
    }

    #[test]
    fn bare_heading_merges_into_next_section() {
        let sections = DocumentSplitter::default().split("# A\n# B\nbody\n");
        assert_eq!(sections, vec!["# A\n# B\nbody"]);
    }

    #[test]
    fn chain_of_bare_headings_merges_forward() {
        let sections = DocumentSplitter::default().split("# Title\n## Part\n### Item\ntext\n");
        assert_eq!(sections, vec!["# Title\n## Part\n### Item\ntext"]);
    }

    #[test]
    fn blank_separated_headings_merge_forward() {
        let sections = DocumentSplitter::default().split("# Title\n\n## Part\n\nbody\n# Next\nmore");
        assert_eq!(sections, vec!["# Title\n\n## Part\n\nbody", "# Next\nmore"]);
    }

    #[test]
    fn trailing_bare_heading_is_emitted_last() {
        let sections = DocumentSplitter::default().split("# A\nbody\n# B");
        assert_eq!(sections, vec!["# A\nbody", "# B"]);
    }

    #[test]
    fn single_preamble_line_prefixes_first_section() {
        let sections = DocumentSplitter::default().split("Intro\n# A\nbody\n");
        assert_eq!(sections, vec!["Intro\n# A\nbody"]);
    }

    #[test]
    fn multi_line_preamble_becomes_own_section() {
        let sections = DocumentSplitter::default().split("Intro one\nIntro two\n# A\nbody\n");
        assert_eq!(sections, vec!["Intro one\nIntro two", "# A\nbody"]);
    }

    #[test]
    fn blank_lines_between_sections_are_trimmed() {
        let text = "# Overview\n\nWe build things.\n\n## Budget\n\n- 10k\n\n";
        let sections = DocumentSplitter::default().split(text);
        assert_eq!(
            sections,
            vec!["# Overview\n\nWe build things.", "## Budget\n\n- 10k"]
        );
    }

    #[test]
    fn indented_hash_is_not_a_heading() {
        let sections = DocumentSplitter::default().split("# A\nbody\n  # not a heading\nmore\n");
        assert_eq!(sections, vec!["# A\nbody\n  # not a heading\nmore"]);
    }

    #[test]
    fn heading_less_text_falls_back_to_chunks() {
        let text = "x".repeat(4500);
        let sections = DocumentSplitter::new(2000).split(&text);
        let lengths: Vec<usize> = sections.iter().map(|s| s.chars().count()).collect();
        assert_eq!(lengths, vec![2000, 2000, 500]);
    }

    #[test]
    fn chunks_respect_multibyte_characters() {
        let text = "가나다라마";
        let chunks = split_into_chunks(text, 2);
        assert_eq!(chunks, vec!["가나", "다라", "마"]);
    }

    #[test]
    fn short_heading_less_text_is_single_chunk() {
        let sections = DocumentSplitter::default().split("just a paragraph\nand another");
        assert_eq!(sections, vec!["just a paragraph\nand another"]);
    }

    #[test]
    fn empty_input_yields_no_sections() {
        assert!(DocumentSplitter::default().split("").is_empty());
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let splitter = DocumentSplitter::new(0);
        assert_eq!(splitter.chunk_size(), 1);
        assert_eq!(splitter.split("abc"), vec!["a", "b", "c"]);
    }

    proptest! {
        #[test]
        fn chunks_cover_input_without_gaps(text in "[a-z \n]{1,3000}", size in 1usize..700) {
            let chunks = DocumentSplitter::new(size).split(&text);
            prop_assert_eq!(chunks.concat(), text.clone());
            let (last, rest) = chunks.split_last().unwrap();
            for chunk in rest {
                prop_assert_eq!(chunk.chars().count(), size);
            }
            prop_assert!(last.chars().count() <= size);
        }

        #[test]
        fn heading_split_preserves_content(
            parts in proptest::collection::vec(("[A-Za-z ]{1,20}", "[a-z \n]{0,80}"), 1..12)
        ) {
            let text: String = parts
                .iter()
                .map(|(title, body)| format!("# {}\n{}\n", title, body))
                .collect();
            let sections = DocumentSplitter::default().split(&text);

            prop_assert!(!sections.is_empty());
            prop_assert_eq!(
                without_whitespace(&sections.join("\n")),
                without_whitespace(&text)
            );
        }

        #[test]
        fn only_the_last_section_may_be_a_lone_heading(
            parts in proptest::collection::vec(("[A-Za-z]{1,10}", "[a-z\n]{0,30}"), 1..12)
        ) {
            let text: String = parts
                .iter()
                .map(|(title, body)| format!("## {}\n{}\n", title, body))
                .collect();
            let sections = DocumentSplitter::default().split(&text);
            let (_, rest) = sections.split_last().unwrap();
            for section in rest {
                prop_assert!(section
                    .split('\n')
                    .any(|line| !line.trim().is_empty() && !line.starts_with('#')));
            }
        }
    }
}
