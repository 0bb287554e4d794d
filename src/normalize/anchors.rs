//! Heading anchor annotation and reference-key registration.
//!
//! Every heading gets a unique, deterministic anchor id emitted as an
//! `<a id="..."></a>` marker line immediately before it. While walking
//! the headings (in document order) the annotator also populates the
//! [`AnchorRegistry`] so in-text mentions like "Table 3" or "Section 2.1"
//! can later be linked to the heading that defines them.

use std::collections::HashSet;

use regex::Regex;

use crate::model::{make_ref_key, AnchorRegistry};
use crate::normalize::crossref::REF_PATTERN;
use crate::normalize::line::{anchor_marker, LineClassifier, LineKind};

/// Derive an anchor slug from heading text.
///
/// Lower-cased; runs of non-alphanumeric characters collapse to a single
/// hyphen; leading/trailing hyphens are trimmed. An empty result falls
/// back to `"section"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

/// The set of anchor slugs already used in one document.
///
/// Owned by the annotation pass and discarded with it; never shared
/// across documents.
#[derive(Debug, Default)]
pub struct SlugSet {
    used: HashSet<String>,
}

impl SlugSet {
    /// Create an empty slug set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a slug, appending `-2`, `-3`, ... on collision.
    ///
    /// The first occurrence keeps the bare slug.
    pub fn claim(&mut self, slug: &str) -> String {
        if self.used.insert(slug.to_string()) {
            return slug.to_string();
        }
        let mut index = 2;
        loop {
            let candidate = format!("{}-{}", slug, index);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            index += 1;
        }
    }

    /// Reserve an anchor produced upstream without renaming it.
    pub fn reserve(&mut self, anchor: &str) {
        self.used.insert(anchor.to_string());
    }
}

/// Annotates headings with anchor markers and builds the registry.
pub struct HeadingAnnotator {
    classifier: LineClassifier,
    number_re: Regex,
    ref_re: Regex,
}

impl HeadingAnnotator {
    /// Compile the annotator patterns.
    pub fn new() -> Self {
        Self {
            classifier: LineClassifier::new(),
            number_re: Regex::new(r"^(\d+(?:\.\d+)*)\b").unwrap(),
            ref_re: Regex::new(REF_PATTERN).unwrap(),
        }
    }

    /// Annotate every heading with an anchor marker line and register its
    /// reference keys.
    ///
    /// Anchor markers already present in the source ("pending anchors"
    /// produced upstream) are honored instead of the derived slug and
    /// consumed exactly once. A document with zero headings yields an
    /// empty registry.
    pub fn annotate(&self, markdown: &str) -> (String, AnchorRegistry) {
        let mut slugs = SlugSet::new();
        let mut registry = AnchorRegistry::new();
        let mut lines_out: Vec<String> = Vec::new();
        let mut pending_anchor: Option<String> = None;

        for line in markdown.lines() {
            match self.classifier.classify(line) {
                LineKind::AnchorMarker { id } => {
                    slugs.reserve(&id);
                    pending_anchor = Some(id);
                    lines_out.push(line.to_string());
                }
                LineKind::Heading { text, .. } => {
                    let anchor = match pending_anchor.take() {
                        Some(id) => id,
                        None => {
                            let anchor = slugs.claim(&slugify(&text));
                            lines_out.push(anchor_marker(&anchor));
                            anchor
                        }
                    };
                    lines_out.push(line.to_string());
                    self.register_heading(&mut registry, &anchor, &text);
                }
                _ => {
                    pending_anchor = None;
                    lines_out.push(line.to_string());
                }
            }
        }

        (lines_out.join("\n"), registry)
    }

    fn register_heading(&self, registry: &mut AnchorRegistry, anchor: &str, text: &str) {
        registry.register_anchor(anchor);

        if let Some(caps) = self.number_re.captures(text) {
            registry.register_if_absent(make_ref_key("section", &caps[1]), anchor);
        }

        for caps in self.ref_re.captures_iter(text) {
            registry.register_if_absent(make_ref_key(&caps[1], &caps[2]), anchor);
        }
    }
}

impl Default for HeadingAnnotator {
    fn default() -> Self {
        Self::new()
    }
}
