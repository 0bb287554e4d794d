//! Sections and retrieval chunks derived from normalized markdown.

use serde::{Deserialize, Serialize};

/// A document section bounded by headings.
///
/// Sections partition the normalized document: every line belongs to
/// exactly one section, and a section's text includes its own heading
/// line. Preamble content before the first heading lands in an implicit
/// "Document Start" section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text without the `#` prefix.
    pub title: String,

    /// Unique anchor id for this section's heading.
    pub anchor: String,

    /// Heading level, 1..=6.
    pub level: u8,

    /// Section text, trimmed, including the heading line.
    pub text: String,
}

impl Section {
    /// Create a section.
    pub fn new(
        title: impl Into<String>,
        anchor: impl Into<String>,
        level: u8,
        text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            anchor: anchor.into(),
            level,
            text: text.into(),
        }
    }
}

/// A bounded slice of a section's text, sized for retrieval indexing.
///
/// `chunk_id` is deterministic: `<doc_id>_s<section:03>_c<chunk:03>`,
/// both indices 1-based. Regenerating from the same section text and
/// parameters reproduces identical chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Deterministic chunk identifier.
    pub chunk_id: String,

    /// Document identifier.
    pub doc_id: String,

    /// Source file the document was extracted from.
    pub source_file: String,

    /// Title of the section this chunk belongs to.
    pub section_title: String,

    /// Anchor of the section this chunk belongs to.
    pub section_anchor: String,

    /// Level of the section's heading.
    pub section_level: u8,

    /// Chunk text, trimmed.
    pub text: String,

    /// Character count of the chunk text.
    pub char_count: usize,
}

impl Chunk {
    /// Build a chunk for the given section and 1-based indices.
    pub fn new(
        doc_id: &str,
        source_file: &str,
        section: &Section,
        section_index: usize,
        chunk_index: usize,
        text: String,
    ) -> Self {
        let char_count = text.chars().count();
        Self {
            chunk_id: format!("{}_s{:03}_c{:03}", doc_id, section_index, chunk_index),
            doc_id: doc_id.to_string(),
            source_file: source_file.to_string(),
            section_title: section.title.clone(),
            section_anchor: section.anchor.clone(),
            section_level: section.level,
            text,
            char_count,
        }
    }
}
