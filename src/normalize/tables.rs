//! Dense table matrix reconstruction from sparse spanning cells.

use crate::model::TableRecord;
use crate::normalize::text::clean_text;

/// A dense rows x cols grid of cleaned cell text.
///
/// Fully blank rows are dropped; the column count is preserved across all
/// retained rows.
pub type TableMatrix = Vec<Vec<String>>;

/// Rebuild a dense matrix from a table record's sparse cell list.
///
/// Cells with a negative start row or column are skipped; end offsets are
/// clamped to the declared grid. A spanning cell writes its text into
/// every covered position. When two distinct texts land on the same
/// position they are concatenated with a `" / "` separator; writing the
/// same text twice does not duplicate it. The merge behavior for
/// genuinely conflicting spans is a documented heuristic, not a
/// guaranteed-correct merge.
pub fn reconstruct_matrix(table: &TableRecord) -> TableMatrix {
    if table.num_rows <= 0 || table.num_cols <= 0 {
        return Vec::new();
    }
    let rows = table.num_rows as usize;
    let cols = table.num_cols as usize;

    let mut matrix = vec![vec![String::new(); cols]; rows];
    for cell in &table.cells {
        let text = clean_text(&cell.text);
        if text.is_empty() {
            continue;
        }
        if cell.start_row < 0 || cell.start_col < 0 {
            log::warn!(
                "Skipping table cell with negative offsets ({}, {})",
                cell.start_row,
                cell.start_col
            );
            continue;
        }

        let row_start = cell.start_row as usize;
        let col_start = cell.start_col as usize;
        if row_start >= rows || col_start >= cols {
            log::warn!(
                "Skipping table cell outside the {}x{} grid at ({}, {})",
                rows,
                cols,
                row_start,
                col_start
            );
            continue;
        }
        let row_end = (cell.end_row.max(cell.start_row) as usize).min(rows - 1);
        let col_end = (cell.end_col.max(cell.start_col) as usize).min(cols - 1);

        for target_row in matrix.iter_mut().take(row_end + 1).skip(row_start) {
            for target in target_row.iter_mut().take(col_end + 1).skip(col_start) {
                if target.is_empty() {
                    *target = text.clone();
                } else if !target.contains(&text) {
                    *target = format!("{} / {}", target, text);
                }
            }
        }
    }

    matrix
        .into_iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpanningCell;

    #[test]
    fn test_spanning_round_trip() {
        let table = TableRecord::new(2, 2)
            .with_cell(SpanningCell::at("A", 0, 0))
            .with_cell(SpanningCell::at("B", 0, 1))
            .with_cell(SpanningCell::spanning("C", (1, 1), (0, 1)));
        let matrix = reconstruct_matrix(&table);
        assert_eq!(
            matrix,
            vec![
                vec!["A".to_string(), "B".to_string()],
                vec!["C".to_string(), "C".to_string()],
            ]
        );
    }

    #[test]
    fn test_empty_declared_grid() {
        assert!(reconstruct_matrix(&TableRecord::new(0, 3)).is_empty());
        assert!(reconstruct_matrix(&TableRecord::new(3, -1)).is_empty());
    }

    #[test]
    fn test_blank_rows_dropped_columns_preserved() {
        let table = TableRecord::new(3, 2)
            .with_cell(SpanningCell::at("top", 0, 0))
            .with_cell(SpanningCell::at("bottom", 2, 1));
        let matrix = reconstruct_matrix(&table);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0], vec!["top".to_string(), String::new()]);
        assert_eq!(matrix[1], vec![String::new(), "bottom".to_string()]);
    }

    #[test]
    fn test_negative_offsets_skipped() {
        let table = TableRecord::new(2, 2)
            .with_cell(SpanningCell::at("bad", -1, 0))
            .with_cell(SpanningCell::at("good", 0, 0));
        let matrix = reconstruct_matrix(&table);
        assert_eq!(matrix, vec![vec!["good".to_string(), String::new()]]);
    }

    #[test]
    fn test_out_of_range_span_clamped() {
        let table =
            TableRecord::new(2, 2).with_cell(SpanningCell::spanning("wide", (0, 5), (0, 9)));
        let matrix = reconstruct_matrix(&table);
        assert_eq!(matrix.len(), 2);
        assert!(matrix.iter().flatten().all(|cell| cell == "wide"));
    }

    #[test]
    fn test_conflicting_overlap_concatenates() {
        let table = TableRecord::new(1, 1)
            .with_cell(SpanningCell::at("left", 0, 0))
            .with_cell(SpanningCell::at("right", 0, 0));
        let matrix = reconstruct_matrix(&table);
        assert_eq!(matrix[0][0], "left / right");
    }

    #[test]
    fn test_same_text_written_twice_is_idempotent() {
        let table = TableRecord::new(1, 1)
            .with_cell(SpanningCell::at("dup", 0, 0))
            .with_cell(SpanningCell::at("dup", 0, 0));
        let matrix = reconstruct_matrix(&table);
        assert_eq!(matrix[0][0], "dup");
    }

    #[test]
    fn test_cell_order_independent_when_no_conflicts() {
        let cells = vec![
            SpanningCell::at("A", 0, 0),
            SpanningCell::at("B", 0, 1),
            SpanningCell::spanning("C", (1, 1), (0, 1)),
        ];
        let mut forward = TableRecord::new(2, 2);
        forward.cells = cells.clone();
        let mut reversed = TableRecord::new(2, 2);
        reversed.cells = cells.into_iter().rev().collect();

        assert_eq!(reconstruct_matrix(&forward), reconstruct_matrix(&reversed));
    }

    #[test]
    fn test_whitespace_only_cell_ignored() {
        let table = TableRecord::new(1, 1).with_cell(SpanningCell::at("  \u{00a0} ", 0, 0));
        assert!(reconstruct_matrix(&table).is_empty());
    }
}
