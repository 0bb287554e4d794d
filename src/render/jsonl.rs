//! Newline-delimited JSON serialization of chunk records.

use std::io::Write;

use crate::error::Result;
use crate::model::Chunk;

/// Serialize chunks as newline-delimited JSON, one object per line.
///
/// The field set and ordering follow the [`Chunk`] struct; each line is
/// `\n`-terminated, including the last.
pub fn chunks_to_jsonl(chunks: &[Chunk]) -> Result<String> {
    let mut out = String::new();
    for chunk in chunks {
        out.push_str(&serde_json::to_string(chunk)?);
        out.push('\n');
    }
    Ok(out)
}

/// Write chunks as newline-delimited JSON to a writer.
pub fn write_chunks_jsonl<W: Write>(writer: &mut W, chunks: &[Chunk]) -> Result<()> {
    for chunk in chunks {
        serde_json::to_writer(&mut *writer, chunk)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    fn sample_chunks() -> Vec<Chunk> {
        let section = Section::new("Overview", "overview", 1, "# Overview\nbody");
        vec![
            Chunk::new("ds", "ds.pdf", &section, 1, 1, "# Overview\nbody".to_string()),
            Chunk::new("ds", "ds.pdf", &section, 1, 2, "tail".to_string()),
        ]
    }

    #[test]
    fn test_jsonl_one_object_per_line() {
        let jsonl = chunks_to_jsonl(&sample_chunks()).unwrap();
        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(jsonl.ends_with('\n'));

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["chunk_id"], "ds_s001_c001");
        assert_eq!(first["section_anchor"], "overview");
        assert_eq!(first["char_count"], 15);
    }

    #[test]
    fn test_writer_matches_string_form() {
        let chunks = sample_chunks();
        let mut buf = Vec::new();
        write_chunks_jsonl(&mut buf, &chunks).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), chunks_to_jsonl(&chunks).unwrap());
    }

    #[test]
    fn test_empty_chunk_list() {
        assert_eq!(chunks_to_jsonl(&[]).unwrap(), "");
    }
}
