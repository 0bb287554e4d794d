//! Artifact serialization for normalized documents.

mod jsonl;
mod tables;

pub use jsonl::{chunks_to_jsonl, write_chunks_jsonl};
pub use tables::{count_markdown_tables, render_matrix, render_tables_document, TablesDocument};
