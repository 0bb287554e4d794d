//! Model types for document normalization.
//!
//! The input side (`ExtractedDocument` and its parts) mirrors what the
//! extraction backend exports and is read-only to the pipeline. The
//! derived side (`Section`, `Chunk`, `ImageRef`, `AnchorRegistry`) is
//! created fresh per normalization run.

mod anchor;
mod document;
mod image;
mod section;
mod table;

pub use anchor::AnchorRegistry;
pub(crate) use anchor::make_ref_key;
pub use document::{ConversionStatus, ExtractedDocument};
pub use image::{ImageRef, PictureRecord};
pub use section::{Chunk, Section};
pub use table::{SpanningCell, TableRecord};
