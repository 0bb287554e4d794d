//! Overlap-aware chunking of section text for retrieval indexing.

use crate::error::{Error, Result};
use crate::model::{Chunk, Section};

/// Chunking parameters.
///
/// `max_chars` bounds the chunk length and `overlap` is carried back from
/// the end of one chunk into the next. Lengths are measured in bytes of
/// UTF-8; cuts never split a code point. Validation is a caller-side
/// precondition: the chunker itself assumes valid options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkOptions {
    /// Maximum chunk size (> 0).
    pub max_chars: usize,

    /// Overlap carried between consecutive chunks (< `max_chars`).
    pub overlap: usize,
}

impl ChunkOptions {
    /// Create chunk options.
    pub fn new(max_chars: usize, overlap: usize) -> Self {
        Self { max_chars, overlap }
    }

    /// Validate the precondition `0 < max_chars` and `overlap < max_chars`.
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(Error::ChunkOptions("max_chars must be > 0".to_string()));
        }
        if self.overlap >= self.max_chars {
            return Err(Error::ChunkOptions(format!(
                "overlap ({}) must be smaller than max_chars ({})",
                self.overlap, self.max_chars
            )));
        }
        Ok(())
    }
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            max_chars: 2200,
            overlap: 220,
        }
    }
}

/// Split text into bounded, overlapping chunks.
///
/// Each window prefers to cut at the rightmost paragraph break, line
/// break, or space found in its second half; a boundary in the first
/// third of the window is rejected to avoid pathologically short chunks,
/// keeping the hard cut at `max_chars` instead. Pure function of its
/// inputs: the same text and options always produce the same chunks.
pub fn chunk_text(text: &str, options: &ChunkOptions) -> Vec<String> {
    let normalized = text.trim();
    if normalized.is_empty() {
        return Vec::new();
    }

    let size = normalized.len();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < size {
        let mut end = (start + options.max_chars).min(size);
        while end < size && !normalized.is_char_boundary(end) {
            end -= 1;
        }
        if end <= start {
            // max_chars smaller than one code point; take the whole char.
            end = ((start + 1)..=size)
                .find(|&i| normalized.is_char_boundary(i))
                .unwrap_or(size);
        }

        if end < size {
            if let Some(cut) = boundary_cut(normalized, start, end, options.max_chars) {
                if cut > start + options.max_chars / 3 {
                    end = cut;
                }
            }
        }

        let piece = normalized[start..end].trim();
        if !piece.is_empty() {
            chunks.push(piece.to_string());
        }

        if end >= size {
            break;
        }
        let mut next = end.saturating_sub(options.overlap);
        while !normalized.is_char_boundary(next) {
            next -= 1;
        }
        if next <= start {
            // Guards against stalling when overlap reaches back past the
            // boundary cut (only possible with overlap > max_chars / 2).
            next = end;
        }
        start = next;
    }

    chunks
}

/// Rightmost soft boundary in the second half of the window, if any.
fn boundary_cut(text: &str, start: usize, end: usize, max_chars: usize) -> Option<usize> {
    let mut window_start = start + max_chars / 2;
    while window_start < end && !text.is_char_boundary(window_start) {
        window_start += 1;
    }
    if window_start >= end {
        return None;
    }

    let window = &text[window_start..end];
    ["\n\n", "\n", " "]
        .iter()
        .filter_map(|pat| window.rfind(pat).map(|i| window_start + i))
        .max()
}

/// Chunk every section and attach deterministic chunk ids.
///
/// Section and chunk indices are 1-based; sections whose text chunks to
/// nothing contribute no records.
pub fn chunk_sections(
    doc_id: &str,
    source_file: &str,
    sections: &[Section],
    options: &ChunkOptions,
) -> Vec<Chunk> {
    let mut records = Vec::new();
    for (sec_idx, section) in sections.iter().enumerate() {
        for (chunk_idx, text) in chunk_text(&section.text, options).into_iter().enumerate() {
            records.push(Chunk::new(
                doc_id,
                source_file,
                section,
                sec_idx + 1,
                chunk_idx + 1,
                text,
            ));
        }
    }
    records
}
