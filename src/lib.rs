//! # docnorm
//!
//! Normalize extracted document models into stable, addressable,
//! retrieval-ready Markdown artifacts.
//!
//! Extraction backends turn PDF/DOCX/XLSX bytes into a structured model;
//! docnorm takes it from there: deterministic heading anchors, resolved
//! cross-references ("Table 3", "Section 2.1"), reconstructed tables, and
//! overlap-aware text chunks suitable for retrieval indexing.
//!
//! ## Quick Start
//!
//! ```
//! use docnorm::{normalize_document, ExtractedDocument, NormalizeOptions};
//!
//! fn main() -> docnorm::Result<()> {
//!     let extracted = ExtractedDocument::from_markdown(
//!         "# Overview\n\nLimits are given in Table 1.\n\n## Table 1 Limits\n\ndata\n",
//!     );
//!
//!     let doc = normalize_document("ds", "ds.pdf", &extracted, &NormalizeOptions::new())?;
//!     assert!(doc.markdown.contains("[Table 1](#table-1-limits)"));
//!     assert_eq!(doc.chunks[0].chunk_id, "ds_s001_c001");
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! Six stages, applied once per document, each a pure transform:
//!
//! 1. Image placeholder resolution
//! 2. Heading anchor annotation (and reference-key registration)
//! 3. Cross-reference resolution (fence-aware)
//! 4. Section extraction
//! 5. Overlap-aware chunking
//! 6. Table matrix reconstruction
//!
//! Batches can be normalized in parallel with [`normalize_batch`]; each
//! document owns its own anchor set and registry.

pub mod error;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    AnchorRegistry, Chunk, ConversionStatus, ExtractedDocument, ImageRef, PictureRecord, Section,
    SpanningCell, TableRecord,
};
pub use normalize::{chunk_text, ChunkOptions};
pub use pipeline::{
    normalize_batch, BatchDocument, DocumentMeta, NormalizeOptions, NormalizeOutcome,
    NormalizedDocument, Pipeline,
};
pub use render::{chunks_to_jsonl, write_chunks_jsonl};

/// Normalize one extracted document with the given options.
///
/// Convenience wrapper over [`Pipeline`]; construct the pipeline directly
/// when normalizing many documents with the same options.
pub fn normalize_document(
    doc_id: &str,
    source_file: &str,
    doc: &ExtractedDocument,
    options: &NormalizeOptions,
) -> Result<NormalizedDocument> {
    let pipeline = Pipeline::new(options.clone())?;
    pipeline.run(doc_id, source_file, doc)
}
