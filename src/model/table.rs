//! Table records with sparse spanning cells.

use serde::{Deserialize, Serialize};

/// A table as exported by the extraction backend.
///
/// The backend declares the logical grid size and provides a sparse list
/// of cells; a cell may span multiple rows and/or columns. Offsets are
/// untrusted: they may be negative or exceed the declared grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRecord {
    /// Declared number of rows in the grid.
    pub num_rows: i32,

    /// Declared number of columns in the grid.
    pub num_cols: i32,

    /// Sparse cell list.
    #[serde(default)]
    pub cells: Vec<SpanningCell>,

    /// Page the table was detected on (1-based), if known.
    #[serde(default)]
    pub page_no: Option<u32>,
}

impl TableRecord {
    /// Create a table record with a declared grid size.
    pub fn new(num_rows: i32, num_cols: i32) -> Self {
        Self {
            num_rows,
            num_cols,
            cells: Vec::new(),
            page_no: None,
        }
    }

    /// Add a cell and return self.
    pub fn with_cell(mut self, cell: SpanningCell) -> Self {
        self.cells.push(cell);
        self
    }

    /// Set the page number and return self.
    pub fn on_page(mut self, page_no: u32) -> Self {
        self.page_no = Some(page_no);
        self
    }
}

/// A single table cell with zero-based inclusive row/column spans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanningCell {
    /// Cell text, as extracted.
    pub text: String,

    /// First row covered (zero-based).
    pub start_row: i32,

    /// Last row covered (zero-based, inclusive).
    pub end_row: i32,

    /// First column covered (zero-based).
    pub start_col: i32,

    /// Last column covered (zero-based, inclusive).
    pub end_col: i32,
}

impl SpanningCell {
    /// Create a cell covering a single grid position.
    pub fn at(text: impl Into<String>, row: i32, col: i32) -> Self {
        Self {
            text: text.into(),
            start_row: row,
            end_row: row,
            start_col: col,
            end_col: col,
        }
    }

    /// Create a cell covering an inclusive row/column range.
    pub fn spanning(
        text: impl Into<String>,
        rows: (i32, i32),
        cols: (i32, i32),
    ) -> Self {
        Self {
            text: text.into(),
            start_row: rows.0,
            end_row: rows.1,
            start_col: cols.0,
            end_col: cols.1,
        }
    }

    /// Whether this cell covers more than one grid position.
    pub fn is_merged(&self) -> bool {
        self.end_row > self.start_row || self.end_col > self.start_col
    }
}
