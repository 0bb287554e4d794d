//! Per-document normalization pipeline and batch driver.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Chunk, ExtractedDocument, ImageRef, Section};
use crate::normalize::{
    chunk_sections, resolve_image_placeholders, ChunkOptions, CrossRefResolver, HeadingAnnotator,
    SectionExtractor,
};
use crate::render::{count_markdown_tables, render_tables_document};

/// Options for the normalization pipeline.
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    /// Chunking parameters.
    pub chunk: ChunkOptions,

    /// Skip image placeholder resolution and keep fallback references.
    pub skip_images: bool,
}

impl NormalizeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set chunking parameters.
    pub fn with_chunk_options(mut self, chunk: ChunkOptions) -> Self {
        self.chunk = chunk;
        self
    }

    /// Set chunk size and overlap.
    pub fn with_chunk_limits(mut self, max_chars: usize, overlap: usize) -> Self {
        self.chunk = ChunkOptions::new(max_chars, overlap);
        self
    }

    /// Skip image resolution; placeholders degrade to numbered fallbacks.
    pub fn without_images(mut self) -> Self {
        self.skip_images = true;
        self
    }
}

/// The normalization pipeline: six stages applied once per document.
///
/// Stateless between documents; one pipeline can process many documents,
/// each with its own anchor set and registry.
pub struct Pipeline {
    options: NormalizeOptions,
    annotator: HeadingAnnotator,
    resolver: CrossRefResolver,
    extractor: SectionExtractor,
}

impl Pipeline {
    /// Build a pipeline, validating the chunking precondition.
    pub fn new(options: NormalizeOptions) -> Result<Self> {
        options.chunk.validate()?;
        Ok(Self {
            options,
            annotator: HeadingAnnotator::new(),
            resolver: CrossRefResolver::new(),
            extractor: SectionExtractor::new(),
        })
    }

    /// Normalize one extracted document.
    ///
    /// Returns [`Error::Extraction`] when the backend status carries no
    /// usable content; every other condition degrades in place.
    pub fn run(
        &self,
        doc_id: &str,
        source_file: &str,
        doc: &ExtractedDocument,
    ) -> Result<NormalizedDocument> {
        if !doc.status.is_success() {
            return Err(Error::Extraction {
                status: doc.status.as_str().to_string(),
                errors: doc.errors.clone(),
            });
        }

        let images = if self.options.skip_images {
            Vec::new()
        } else {
            ImageRef::from_pictures(&doc.pictures, doc_id)
        };
        log::debug!("{}: resolved {} image references", doc_id, images.len());

        let with_images = resolve_image_placeholders(&doc.markdown, &images);
        let (annotated, registry) = self.annotator.annotate(&with_images);
        log::debug!("{}: registered {} reference targets", doc_id, registry.len());
        let markdown = self.resolver.resolve(&annotated, &registry);

        let sections = self.extractor.extract(&markdown);
        let chunks = chunk_sections(doc_id, source_file, &sections, &self.options.chunk);
        log::debug!(
            "{}: {} sections, {} chunks",
            doc_id,
            sections.len(),
            chunks.len()
        );

        let tables = render_tables_document(&doc.tables);
        let table_blocks_in_markdown = count_markdown_tables(&markdown);

        let mut warnings = Vec::new();
        if !doc.tables.is_empty() && table_blocks_in_markdown < doc.tables.len() {
            warnings.push(
                "Markdown table blocks are fewer than detected tables; \
                 use the tables artifact when table fidelity is critical."
                    .to_string(),
            );
        }

        let meta = DocumentMeta {
            doc_id: doc_id.to_string(),
            source_file: source_file.to_string(),
            status: doc.status.as_str().to_string(),
            errors: doc.errors.clone(),
            generated_at_utc: Utc::now(),
            sections: sections.len(),
            chunks: chunks.len(),
            images: images.len(),
            tables_detected: doc.tables.len(),
            tables_rendered: tables.rendered,
            table_blocks_in_markdown,
            warnings,
        };

        Ok(NormalizedDocument {
            doc_id: doc_id.to_string(),
            source_file: source_file.to_string(),
            markdown,
            sections,
            chunks,
            images,
            tables_markdown: tables.markdown,
            meta,
        })
    }
}

/// A fully normalized document and its artifacts.
#[derive(Debug, Clone)]
pub struct NormalizedDocument {
    /// Document identifier used in chunk ids.
    pub doc_id: String,

    /// Source file the document was extracted from.
    pub source_file: String,

    /// Normalized markdown with anchor markers and resolved references.
    pub markdown: String,

    /// Heading-bounded sections, in document order.
    pub sections: Vec<Section>,

    /// Retrieval chunks, in section/chunk order.
    pub chunks: Vec<Chunk>,

    /// Resolved image references.
    pub images: Vec<ImageRef>,

    /// Tables artifact markdown.
    pub tables_markdown: String,

    /// Metadata record summarizing this run.
    pub meta: DocumentMeta,
}

/// Metadata record summarizing one normalization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Document identifier.
    pub doc_id: String,

    /// Source file the document was extracted from.
    pub source_file: String,

    /// Backend conversion status, verbatim.
    pub status: String,

    /// Backend error messages, verbatim.
    pub errors: Vec<String>,

    /// When this record was generated.
    pub generated_at_utc: DateTime<Utc>,

    /// Number of extracted sections.
    pub sections: usize,

    /// Number of emitted chunks.
    pub chunks: usize,

    /// Number of resolved image references.
    pub images: usize,

    /// Number of tables the backend detected.
    pub tables_detected: usize,

    /// Number of tables that rendered to a non-empty matrix.
    pub tables_rendered: usize,

    /// Markdown table blocks found in the normalized markdown.
    pub table_blocks_in_markdown: usize,

    /// Diagnostic warnings.
    pub warnings: Vec<String>,
}

impl DocumentMeta {
    /// Build a failure record for a document that never normalized.
    pub fn failure(doc_id: &str, source_file: &str, status: &str, errors: Vec<String>) -> Self {
        let mut warnings =
            vec!["Extraction failed or returned no document content.".to_string()];
        warnings.extend(derive_failure_warnings(&errors));
        Self {
            doc_id: doc_id.to_string(),
            source_file: source_file.to_string(),
            status: status.to_string(),
            errors,
            generated_at_utc: Utc::now(),
            sections: 0,
            chunks: 0,
            images: 0,
            tables_detected: 0,
            tables_rendered: 0,
            table_blocks_in_markdown: 0,
            warnings,
        }
    }
}

/// Derive diagnostic hints from backend error messages.
///
/// Matches well-known failure signatures (PDF backend crashes, OCR engine
/// problems, timeouts) and suggests what to change upstream.
pub fn derive_failure_warnings(errors: &[String]) -> Vec<String> {
    let combined = errors.join(" ").to_lowercase();
    let mut hints = Vec::new();
    if combined.contains("pdfium") {
        hints.push(
            "PDF backend hint: retry with OCR disabled, then with the alternate \
             PDF backend, and inspect this document's metadata record."
                .to_string(),
        );
    }
    if combined.contains("ocr") || combined.contains("tesseract") {
        hints.push(
            "OCR hint: retry with text-first extraction or install/configure \
             OCR engine dependencies."
                .to_string(),
        );
    }
    if combined.contains("timeout") {
        hints.push(
            "Timeout hint: retry this file alone, reduce concurrent load, or \
             increase the conversion timeout upstream."
                .to_string(),
        );
    }
    hints
}

/// Sanitize a file stem into a document id.
///
/// Runs of characters outside `[A-Za-z0-9._-]` become `_`; leading and
/// trailing `.`, `_`, `-` are trimmed. An empty result falls back to
/// `"document"`.
pub fn sanitize_doc_id(stem: &str) -> String {
    let mut cleaned = String::with_capacity(stem.len());
    let mut in_run = false;
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            cleaned.push(c);
            in_run = false;
        } else if !in_run {
            cleaned.push('_');
            in_run = true;
        }
    }
    let cleaned = cleaned.trim_matches(|c| matches!(c, '.' | '_' | '-'));
    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Make a document id unique within a batch, appending `_2`, `_3`, ...
pub fn unique_doc_id(base: &str, used: &mut HashSet<String>) -> String {
    if used.insert(base.to_string()) {
        return base.to_string();
    }
    let mut index = 2;
    loop {
        let candidate = format!("{}_{}", base, index);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        index += 1;
    }
}

/// One document handed to the batch driver.
#[derive(Debug, Clone)]
pub struct BatchDocument {
    /// Source file stem; sanitized and uniqued into the doc id.
    pub name: String,

    /// Source file path recorded in chunk and meta records.
    pub source_file: String,

    /// The extracted document model.
    pub document: ExtractedDocument,
}

impl BatchDocument {
    /// Create a batch entry.
    pub fn new(
        name: impl Into<String>,
        source_file: impl Into<String>,
        document: ExtractedDocument,
    ) -> Self {
        Self {
            name: name.into(),
            source_file: source_file.into(),
            document,
        }
    }
}

/// The outcome for one document in a batch.
#[derive(Debug, Clone)]
pub enum NormalizeOutcome {
    /// Normalization completed.
    Normalized(Box<NormalizedDocument>),
    /// The document never normalized; only a failure record exists.
    Failed(DocumentMeta),
}

impl NormalizeOutcome {
    /// The metadata record, regardless of outcome.
    pub fn meta(&self) -> &DocumentMeta {
        match self {
            NormalizeOutcome::Normalized(doc) => &doc.meta,
            NormalizeOutcome::Failed(meta) => meta,
        }
    }

    /// Whether the document normalized.
    pub fn is_normalized(&self) -> bool {
        matches!(self, NormalizeOutcome::Normalized(_))
    }
}

/// Normalize a batch of documents in parallel.
///
/// Document ids are assigned sequentially (deterministic across runs),
/// then documents are processed one per rayon task with no shared state.
/// Per-document extraction failures become [`NormalizeOutcome::Failed`]
/// records; only invalid options fail the whole batch.
pub fn normalize_batch(
    docs: &[BatchDocument],
    options: &NormalizeOptions,
) -> Result<Vec<NormalizeOutcome>> {
    let pipeline = Pipeline::new(options.clone())?;

    let mut used_ids = HashSet::new();
    let doc_ids: Vec<String> = docs
        .iter()
        .map(|doc| unique_doc_id(&sanitize_doc_id(&doc.name), &mut used_ids))
        .collect();

    let outcomes = docs
        .par_iter()
        .zip(doc_ids.par_iter())
        .map(|(doc, doc_id)| match pipeline.run(doc_id, &doc.source_file, &doc.document) {
            Ok(normalized) => NormalizeOutcome::Normalized(Box::new(normalized)),
            Err(Error::Extraction { status, errors }) => {
                log::warn!("{}: extraction failed with status {}", doc_id, status);
                NormalizeOutcome::Failed(DocumentMeta::failure(
                    doc_id,
                    &doc.source_file,
                    &status,
                    errors,
                ))
            }
            Err(err) => {
                log::warn!("{}: normalization failed: {}", doc_id, err);
                NormalizeOutcome::Failed(DocumentMeta::failure(
                    doc_id,
                    &doc.source_file,
                    "UNEXPECTED_ERROR",
                    vec![err.to_string()],
                ))
            }
        })
        .collect();

    Ok(outcomes)
}
