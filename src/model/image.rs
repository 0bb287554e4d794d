//! Picture records and resolved image references.

use serde::{Deserialize, Serialize};

/// A picture as exported by the extraction backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PictureRecord {
    /// Caption text, if the backend found one.
    #[serde(default)]
    pub caption: Option<String>,

    /// Page the picture appears on (1-based), if known.
    #[serde(default)]
    pub page_no: Option<u32>,

    /// Path of the rendered image file, relative to the document's
    /// artifact directory. `None` when the backend could not render it.
    #[serde(default)]
    pub relative_path: Option<String>,
}

impl PictureRecord {
    /// Create a rendered picture record.
    pub fn rendered(relative_path: impl Into<String>) -> Self {
        Self {
            caption: None,
            page_no: None,
            relative_path: Some(relative_path.into()),
        }
    }

    /// Set the caption and return self.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the page number and return self.
    pub fn on_page(mut self, page_no: u32) -> Self {
        self.page_no = Some(page_no);
        self
    }
}

/// A resolved image reference, paired positionally with the k-th inline
/// image placeholder in the exported markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// 1-based index in document order; stable across runs.
    pub index: usize,

    /// Alt text for the markdown image reference.
    pub alt: String,

    /// Image file path relative to the document's artifact directory.
    pub relative_path: String,

    /// Page the image appears on (1-based), if known.
    pub page_no: Option<u32>,
}

impl ImageRef {
    /// Build image references from rendered pictures, in document order.
    ///
    /// Pictures without a rendered file are skipped but still advance the
    /// index, keeping the pairing with placeholder occurrences positional.
    /// An empty caption falls back to `"<doc_id> image <index>"`.
    pub fn from_pictures(pictures: &[PictureRecord], doc_id: &str) -> Vec<ImageRef> {
        let mut refs = Vec::new();
        for (idx, picture) in pictures.iter().enumerate() {
            let index = idx + 1;
            let Some(relative_path) = picture.relative_path.clone() else {
                continue;
            };
            let alt = match picture.caption.as_deref() {
                Some(caption) if !caption.trim().is_empty() => {
                    crate::normalize::clean_text(caption)
                }
                _ => format!("{} image {}", doc_id, index),
            };
            refs.push(ImageRef {
                index,
                alt,
                relative_path,
                page_no: picture.page_no,
            });
        }
        refs
    }
}
