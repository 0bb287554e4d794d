//! Extracted document model produced by the extraction backend.

use super::{PictureRecord, TableRecord};
use serde::{Deserialize, Serialize};

/// Conversion status reported by the extraction backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversionStatus {
    /// Extraction completed fully.
    Success,
    /// Extraction completed with some content lost.
    PartialSuccess,
    /// Extraction failed; the model carries no usable content.
    Failure,
    /// The document was skipped before extraction.
    Skipped,
}

impl ConversionStatus {
    /// Whether the status carries usable document content.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            ConversionStatus::Success | ConversionStatus::PartialSuccess
        )
    }

    /// Status string as recorded verbatim in metadata output.
    pub fn as_str(self) -> &'static str {
        match self {
            ConversionStatus::Success => "SUCCESS",
            ConversionStatus::PartialSuccess => "PARTIAL_SUCCESS",
            ConversionStatus::Failure => "FAILURE",
            ConversionStatus::Skipped => "SKIPPED",
        }
    }
}

/// A structured document as exported by the extraction backend.
///
/// The markdown text carries one `<!-- image -->` placeholder per picture,
/// in document order. Tables are sparse lists of spanning cells with
/// declared row/column counts. The normalization pipeline never mutates
/// this model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Backend conversion status.
    pub status: ConversionStatus,

    /// Exported markdown with inline image placeholders.
    #[serde(default)]
    pub markdown: String,

    /// Tables detected by the backend, in document order.
    #[serde(default)]
    pub tables: Vec<TableRecord>,

    /// Pictures detected by the backend, in document order.
    #[serde(default)]
    pub pictures: Vec<PictureRecord>,

    /// Backend error messages, verbatim.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ExtractedDocument {
    /// Create a successfully extracted document from markdown text.
    pub fn from_markdown(markdown: impl Into<String>) -> Self {
        Self {
            status: ConversionStatus::Success,
            markdown: markdown.into(),
            tables: Vec::new(),
            pictures: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Create a failed extraction result.
    pub fn failed(status: ConversionStatus, errors: Vec<String>) -> Self {
        Self {
            status,
            markdown: String::new(),
            tables: Vec::new(),
            pictures: Vec::new(),
            errors,
        }
    }

    /// Add a table record and return self.
    pub fn with_table(mut self, table: TableRecord) -> Self {
        self.tables.push(table);
        self
    }

    /// Add a picture record and return self.
    pub fn with_picture(mut self, picture: PictureRecord) -> Self {
        self.pictures.push(picture);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_success_set() {
        assert!(ConversionStatus::Success.is_success());
        assert!(ConversionStatus::PartialSuccess.is_success());
        assert!(!ConversionStatus::Failure.is_success());
        assert!(!ConversionStatus::Skipped.is_success());
    }

    #[test]
    fn test_status_serde_roundtrip() {
        let json = serde_json::to_string(&ConversionStatus::PartialSuccess).unwrap();
        assert_eq!(json, "\"PARTIAL_SUCCESS\"");
        let back: ConversionStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ConversionStatus::PartialSuccess);
    }

    #[test]
    fn test_document_defaults() {
        let doc: ExtractedDocument =
            serde_json::from_str(r##"{"status":"SUCCESS","markdown":"# Hi"}"##).unwrap();
        assert!(doc.tables.is_empty());
        assert!(doc.pictures.is_empty());
        assert!(doc.errors.is_empty());
    }
}
