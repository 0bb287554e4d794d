//! Section extraction from annotated markdown.

use crate::model::Section;
use crate::normalize::anchors::slugify;
use crate::normalize::line::{LineClassifier, LineKind};

/// Splits annotated markdown into heading-bounded sections.
pub struct SectionExtractor {
    classifier: LineClassifier,
}

impl SectionExtractor {
    /// Create a section extractor.
    pub fn new() -> Self {
        Self {
            classifier: LineClassifier::new(),
        }
    }

    /// Extract the ordered section list.
    ///
    /// Content before the first heading lands in an implicit "Document
    /// Start" section; a section's text includes its own heading line.
    /// An anchor marker line binds to the next heading and is dropped
    /// from section text. A document with content but no headings yields
    /// a single "Document" section; an empty document yields none.
    pub fn extract(&self, markdown: &str) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();
        let mut pending_anchor: Option<String> = None;
        let mut saw_heading = false;

        let mut current_title = "Document Start".to_string();
        let mut current_anchor = "document-start".to_string();
        let mut current_level: u8 = 1;
        let mut current_lines: Vec<&str> = Vec::new();

        let flush = |sections: &mut Vec<Section>,
                     title: &str,
                     anchor: &str,
                     level: u8,
                     lines: &[&str]| {
            if lines.iter().any(|line| !line.trim().is_empty()) {
                sections.push(Section::new(
                    title,
                    anchor,
                    level,
                    lines.join("\n").trim().to_string(),
                ));
            }
        };

        for line in markdown.lines() {
            match self.classifier.classify(line) {
                LineKind::AnchorMarker { id } => {
                    pending_anchor = Some(id);
                }
                LineKind::Heading { level, text } => {
                    saw_heading = true;
                    flush(
                        &mut sections,
                        &current_title,
                        &current_anchor,
                        current_level,
                        &current_lines,
                    );
                    current_anchor = pending_anchor.take().unwrap_or_else(|| slugify(&text));
                    current_title = text;
                    current_level = level;
                    current_lines = vec![line];
                }
                _ => {
                    current_lines.push(line);
                    pending_anchor = None;
                }
            }
        }
        if !saw_heading {
            let text = current_lines.join("\n").trim().to_string();
            if text.is_empty() {
                return Vec::new();
            }
            return vec![Section::new("Document", "document", 1, text)];
        }
        flush(
            &mut sections,
            &current_title,
            &current_anchor,
            current_level,
            &current_lines,
        );
        sections
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}
