//! Normalization pipeline stages.
//!
//! Each stage is a pure transform over the previous stage's output:
//! image placeholder resolution, heading anchor annotation,
//! cross-reference resolution, section extraction, chunking, and table
//! matrix reconstruction. None of them perform I/O or keep state beyond
//! a single pass.

mod anchors;
mod chunker;
mod crossref;
mod images;
mod line;
mod sections;
mod tables;
mod text;

pub use anchors::{slugify, HeadingAnnotator, SlugSet};
pub use chunker::{chunk_sections, chunk_text, ChunkOptions};
pub use crossref::CrossRefResolver;
pub use images::{resolve_image_placeholders, IMAGE_PLACEHOLDER};
pub use line::{LineClassifier, LineKind};
pub use sections::SectionExtractor;
pub use tables::{reconstruct_matrix, TableMatrix};
pub use text::{clean_text, escape_markdown_alt, escape_markdown_cell};
