//! Markdown rendering of reconstructed tables.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::TableRecord;
use crate::normalize::{escape_markdown_cell, reconstruct_matrix, TableMatrix};

/// Render a dense matrix as a markdown table.
///
/// The first retained row becomes the header; blank header cells get a
/// synthesized `col_N` label. Returns one line per output row, without a
/// trailing newline. An empty matrix renders to nothing.
pub fn render_matrix(matrix: &TableMatrix) -> Vec<String> {
    if matrix.is_empty() {
        return Vec::new();
    }

    let cols = matrix.iter().map(Vec::len).max().unwrap_or(0);
    let pad = |row: &[String]| -> Vec<String> {
        let mut padded: Vec<String> = row.to_vec();
        padded.resize(cols, String::new());
        padded
    };

    let header: Vec<String> = pad(&matrix[0])
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            if cell.trim().is_empty() {
                format!("col_{}", idx + 1)
            } else {
                cell.clone()
            }
        })
        .collect();

    let mut lines = vec![
        format!(
            "| {} |",
            header
                .iter()
                .map(|cell| escape_markdown_cell(cell))
                .collect::<Vec<_>>()
                .join(" | ")
        ),
        format!("| {} |", vec!["---"; cols].join(" | ")),
    ];
    for row in &matrix[1..] {
        lines.push(format!(
            "| {} |",
            pad(row)
                .iter()
                .map(|cell| escape_markdown_cell(cell))
                .collect::<Vec<_>>()
                .join(" | ")
        ));
    }
    lines
}

/// The tables artifact: one markdown block per reconstructed table.
#[derive(Debug, Clone)]
pub struct TablesDocument {
    /// The rendered markdown document.
    pub markdown: String,

    /// Number of tables that produced a non-empty matrix.
    pub rendered: usize,
}

/// Render every table record into a single tables document.
///
/// Tables that reconstruct to an empty matrix are counted as detected
/// but not rendered. Each rendered table gets a `## Table N (page P)`
/// block; an unknown page renders as `?`.
pub fn render_tables_document(tables: &[TableRecord]) -> TablesDocument {
    if tables.is_empty() {
        return TablesDocument {
            markdown: "# Tables\n\n(No tables detected.)\n".to_string(),
            rendered: 0,
        };
    }

    let mut lines = vec!["# Tables".to_string(), String::new()];
    let mut rendered = 0;
    for (index, table) in tables.iter().enumerate() {
        let matrix = reconstruct_matrix(table);
        if matrix.is_empty() {
            continue;
        }

        let page = table
            .page_no
            .map(|p| p.to_string())
            .unwrap_or_else(|| "?".to_string());
        lines.push(format!("## Table {} (page {})", index + 1, page));
        lines.push(String::new());
        lines.extend(render_matrix(&matrix));
        lines.push(String::new());
        rendered += 1;
    }

    TablesDocument {
        markdown: lines.join("\n"),
        rendered,
    }
}

/// Count markdown table blocks (a pipe row followed by a separator row).
pub fn count_markdown_tables(markdown: &str) -> usize {
    static BLOCK_RE: OnceLock<Regex> = OnceLock::new();
    let block_re =
        BLOCK_RE.get_or_init(|| Regex::new(r"(?m)^\|.*\|\n\|\s*[-:| ]+\|").unwrap());
    block_re.find_iter(markdown).count()
}
