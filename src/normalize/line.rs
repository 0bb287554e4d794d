//! Tagged-line classification for normalized markdown.
//!
//! Several pipeline stages walk the document line by line and care about
//! the same few line shapes: ATX headings, anchor marker lines, and code
//! fence delimiters. Classification happens in one place so the stages
//! never re-run ad-hoc pattern matches against each other's output.

use regex::Regex;

/// What a single markdown line is, as far as the pipeline cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// A line starting a triple-backtick fence (opens or closes a block).
    FenceToggle,
    /// An ATX heading, `#` through `######`.
    Heading {
        /// Number of `#` characters, 1..=6.
        level: u8,
        /// Heading text, trimmed.
        text: String,
    },
    /// An anchor marker line, `<a id="..."></a>`.
    AnchorMarker {
        /// The anchor id.
        id: String,
    },
    /// Anything else.
    Plain,
}

/// Single-pass line classifier with its compiled patterns.
#[derive(Debug)]
pub struct LineClassifier {
    heading_re: Regex,
    anchor_re: Regex,
}

impl LineClassifier {
    /// Compile the classifier patterns.
    pub fn new() -> Self {
        Self {
            heading_re: Regex::new(r"^(#{1,6})\s+(.*\S)\s*$").unwrap(),
            anchor_re: Regex::new(r#"^<a id="([a-z0-9][a-z0-9-]*)"></a>$"#).unwrap(),
        }
    }

    /// Classify one line.
    pub fn classify(&self, line: &str) -> LineKind {
        if line.trim_start().starts_with("```") {
            return LineKind::FenceToggle;
        }
        if let Some(caps) = self.heading_re.captures(line) {
            return LineKind::Heading {
                level: caps[1].len() as u8,
                text: caps[2].trim().to_string(),
            };
        }
        if let Some(caps) = self.anchor_re.captures(line.trim()) {
            return LineKind::AnchorMarker {
                id: caps[1].to_string(),
            };
        }
        LineKind::Plain
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Render an anchor marker line for the given anchor id.
pub fn anchor_marker(anchor: &str) -> String {
    format!("<a id=\"{}\"></a>", anchor)
}
