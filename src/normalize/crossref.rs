//! Cross-reference resolution against the anchor registry.

use regex::{Captures, Regex};

use crate::model::{make_ref_key, AnchorRegistry};
use crate::normalize::line::{LineClassifier, LineKind};

/// In-text reference pattern: an optional "See " prefix, a label, and a
/// dotted number ("Table 3", "see section 2.1", ...). Case-insensitive
/// and non-overlapping by construction.
pub(crate) const REF_PATTERN: &str =
    r"(?i)\b(?:See\s+)?(Table|Figure|Section|Chapter)\s+(\d+(?:\.\d+)*)\b";

/// Rewrites in-text mentions of registered targets into markdown links.
pub struct CrossRefResolver {
    classifier: LineClassifier,
    ref_re: Regex,
}

impl CrossRefResolver {
    /// Compile the resolver patterns.
    pub fn new() -> Self {
        Self {
            classifier: LineClassifier::new(),
            ref_re: Regex::new(REF_PATTERN).unwrap(),
        }
    }

    /// Link every resolvable reference outside fenced code blocks.
    ///
    /// Lines inside triple-backtick fences pass through verbatim so code
    /// samples are never corrupted. References without a registry entry
    /// stay unchanged.
    pub fn resolve(&self, markdown: &str, registry: &AnchorRegistry) -> String {
        let mut in_code_block = false;
        let mut lines_out: Vec<String> = Vec::new();

        for line in markdown.lines() {
            if let LineKind::FenceToggle = self.classifier.classify(line) {
                in_code_block = !in_code_block;
                lines_out.push(line.to_string());
                continue;
            }
            if in_code_block {
                lines_out.push(line.to_string());
                continue;
            }

            let rewritten = self.ref_re.replace_all(line, |caps: &Captures<'_>| {
                let key = make_ref_key(&caps[1], &caps[2]);
                match registry.resolve(&key) {
                    Some(anchor) => format!("[{}](#{})", &caps[0], anchor),
                    None => caps[0].to_string(),
                }
            });
            lines_out.push(rewritten.into_owned());
        }

        lines_out.join("\n")
    }
}

impl Default for CrossRefResolver {
    fn default() -> Self {
        Self::new()
    }
}
