//! Error types for the docnorm library.

use thiserror::Error;

/// Result type alias for docnorm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document normalization.
///
/// Recoverable conditions (malformed table spans, empty heading text,
/// missing images) never surface here; they are clamped or defaulted in
/// place. Only upstream extraction failure and caller-side parameter
/// violations are reported as errors.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when writing artifacts through a caller-supplied writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The extraction backend produced no usable document model.
    ///
    /// The status string is preserved verbatim so callers can record it
    /// unchanged in per-document metadata.
    #[error("Extraction failed with status {status}: {}", .errors.join("; "))]
    Extraction {
        /// Backend conversion status, verbatim.
        status: String,
        /// Backend error messages, verbatim.
        errors: Vec<String>,
    },

    /// Invalid chunking parameters (caller-side precondition).
    #[error("Invalid chunk options: {0}")]
    ChunkOptions(String),

    /// Error serializing chunk or metadata records.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Extraction {
            status: "FAILURE".to_string(),
            errors: vec!["pdfium crashed".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Extraction failed with status FAILURE: pdfium crashed"
        );

        let err = Error::ChunkOptions("overlap must be smaller than max_chars".to_string());
        assert!(err.to_string().contains("overlap"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
