//! Registry mapping logical reference keys to heading anchors.

use std::collections::HashMap;

/// Mapping from reference key (e.g. `table-3`, `section-2-1`, or a bare
/// heading anchor) to the anchor id that should be linked.
///
/// Keys use first-writer-wins semantics: once bound, a key is never
/// rebound. Headings are registered in document order, so a heading's own
/// anchor always wins over a later coincidental number match.
#[derive(Debug, Clone, Default)]
pub struct AnchorRegistry {
    targets: HashMap<String, String>,
}

impl AnchorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a heading's own anchor under itself.
    ///
    /// Anchors are unique per document, so this never conflicts.
    pub fn register_anchor(&mut self, anchor: &str) {
        self.targets
            .insert(anchor.to_string(), anchor.to_string());
    }

    /// Bind `key` to `anchor` unless the key is already bound.
    pub fn register_if_absent(&mut self, key: impl Into<String>, anchor: &str) {
        self.targets
            .entry(key.into())
            .or_insert_with(|| anchor.to_string());
    }

    /// Look up the anchor for a reference key.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.targets.get(key).map(String::as_str)
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the registry has no bound keys.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Build a reference key from a label and a dotted number.
///
/// `("Table", "3")` becomes `table-3`; `("Section", "2.1")` becomes
/// `section-2-1`.
pub(crate) fn make_ref_key(label: &str, number: &str) -> String {
    format!("{}-{}", label.to_lowercase(), number.replace('.', "-"))
}
