//! Clipboard interchange with external spreadsheet applications.
//!
//! Copy writes tab-separated text, one line per row. Values are written as
//! displayed, without quoting, so a copy pasted back reproduces the same
//! cells. Paste accepts tab-separated text, falls back to comma-separated
//! lines, and treats anything else as one value per line.

use crate::grid::GridModel;
use crate::types::{CellCoord, CellRange, CellValue, Dataset};

/// Result of a paste, for the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasteOutcome {
    /// Rows written (after clamping)
    pub rows: u32,
    /// Columns written (after clamping)
    pub cols: u32,
    /// The whole dataset was replaced rather than written at an anchor
    pub replaced: bool,
}

/// Serialize a rectangle of the grid: cells joined by `delimiter`, rows by
/// `\n`. Cells outside the grid serialize as empty strings.
pub fn serialize(grid: &GridModel, range: CellRange, delimiter: char) -> String {
    let mut out = String::new();
    for row in range.top..=range.bottom {
        if row > range.top {
            out.push('\n');
        }
        for col in range.left..=range.right {
            if col > range.left {
                out.push(delimiter);
            }
            out.push_str(&grid.cell_text(row, col));
        }
    }
    out
}

/// Split one line into values.
///
/// A line containing `primary` is split on it. Otherwise a line containing
/// at least two `secondary` delimiters is split on those. Anything else is
/// a single value, so a lone comma in free text survives.
pub fn split_line(line: &str, primary: char, secondary: char) -> Vec<String> {
    if line.contains(primary) {
        return line.split(primary).map(str::to_string).collect();
    }
    if line.matches(secondary).count() >= 2 {
        return line.split(secondary).map(str::to_string).collect();
    }
    vec![line.to_string()]
}

/// Split clipboard text into rows of values. Accepts `\n` and `\r\n` line
/// endings; a trailing line terminator does not add an empty row.
pub fn tokenize(text: &str, primary: char, secondary: char) -> Vec<Vec<String>> {
    text.lines()
        .map(|line| split_line(line, primary, secondary))
        .collect()
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Paste tokenized rows.
///
/// With an anchor, the grid grows to cover the pasted block (clamped to its
/// bounds) and every value is written through [`GridModel::set_cell`];
/// values past the clamped edge are dropped. Without one, the dataset is
/// replaced by the pasted block with positional labels. Empty input leaves
/// the grid untouched either way. The first line is
/// data in that case even when the host shows a header row.
pub fn paste(grid: &mut GridModel, anchor: Option<CellCoord>, rows: &[Vec<String>]) -> PasteOutcome {
    let height = to_u32(rows.len());
    let width = to_u32(rows.iter().map(Vec::len).max().unwrap_or(0));
    if height == 0 || width == 0 {
        return PasteOutcome {
            rows: 0,
            cols: 0,
            replaced: false,
        };
    }

    let Some(anchor) = anchor else {
        let values = rows
            .iter()
            .map(|row| row.iter().map(|raw| CellValue::coerce(raw)).collect())
            .collect();
        grid.set_dataset(Dataset::from_positional(values));
        log::debug!(
            "paste replaced dataset with {}x{}",
            grid.row_count(),
            grid.col_count()
        );
        return PasteOutcome {
            rows: grid.row_count(),
            cols: grid.col_count(),
            replaced: true,
        };
    };

    grid.ensure_capacity(
        anchor.row.saturating_add(height),
        anchor.col.saturating_add(width),
    );
    for (r, values) in rows.iter().enumerate() {
        let row = anchor.row.saturating_add(to_u32(r));
        for (c, raw) in values.iter().enumerate() {
            grid.set_cell(row, anchor.col.saturating_add(to_u32(c)), raw);
        }
    }
    let rows_written = grid.row_count().saturating_sub(anchor.row).min(height);
    let cols_written = grid.col_count().saturating_sub(anchor.col).min(width);
    log::debug!(
        "pasted {rows_written}x{cols_written} at ({}, {})",
        anchor.row,
        anchor.col
    );
    PasteOutcome {
        rows: rows_written,
        cols: cols_written,
        replaced: false,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use crate::grid::GridBounds;
    use test_case::test_case;

    fn grid(rows: u32, cols: u32) -> GridModel {
        let mut grid = GridModel::default();
        grid.init_blank(rows, cols);
        grid
    }

    #[test_case("a\tb\tc", &["a", "b", "c"] ; "tabs")]
    #[test_case("a,b,c", &["a", "b", "c"] ; "two commas")]
    #[test_case("Smith, John", &["Smith, John"] ; "single comma stays whole")]
    #[test_case("x,y\tz", &["x,y", "z"] ; "tab wins over commas")]
    #[test_case("plain", &["plain"] ; "no delimiter")]
    #[test_case("a\t\tb", &["a", "", "b"] ; "empty middle value")]
    fn test_split_line(line: &str, expected: &[&str]) {
        assert_eq!(split_line(line, '\t', ','), expected);
    }

    #[test]
    fn test_tokenize_line_endings() {
        assert_eq!(tokenize("1\t2\r\n3\t4\r\n", '\t', ',').len(), 2);
        assert_eq!(tokenize("1\n2\n", '\t', ',').len(), 2);
        assert_eq!(tokenize("1\n\n2", '\t', ','), vec![vec!["1"], vec![""], vec!["2"]]);
        assert!(tokenize("", '\t', ',').is_empty());
    }

    #[test]
    fn test_serialize_rectangle() {
        let mut g = grid(20, 3);
        g.set_cell(0, 0, "1");
        g.set_cell(0, 1, "x");
        g.set_cell(1, 1, "2.5");
        let range = CellRange::spanning(CellCoord::new(0, 0), CellCoord::new(1, 1));
        assert_eq!(serialize(&g, range, '\t'), "1\tx\n\t2.5");
    }

    #[test]
    fn test_serialize_out_of_range_is_empty() {
        let g = grid(20, 2);
        let range = CellRange::spanning(CellCoord::new(19, 1), CellCoord::new(20, 2));
        assert_eq!(serialize(&g, range, '\t'), "\t\n\t");
    }

    #[test]
    fn test_copy_paste_round_trip() {
        let mut g = grid(20, 4);
        g.set_cell(1, 1, "3.25");
        g.set_cell(1, 2, "label");
        g.set_cell(2, 1, "-7");
        let range = CellRange::spanning(CellCoord::new(1, 1), CellCoord::new(2, 2));
        let text = serialize(&g, range, '\t');

        let rows = tokenize(&text, '\t', ',');
        paste(&mut g, Some(CellCoord::new(5, 0)), &rows);
        assert_eq!(g.cell(5, 0), Some(&CellValue::Number(3.25)));
        assert_eq!(g.cell_text(5, 1), "label");
        assert_eq!(g.cell(6, 0), Some(&CellValue::Number(-7.0)));
        assert_eq!(g.cell_text(6, 1), "");
    }

    #[test]
    fn test_anchored_paste_grows_grid() {
        let mut g = grid(10, 10);
        g.set_cell(0, 0, "keep");
        let rows = tokenize("1\t2\n3\t4\n5\t6", '\t', ',');
        let outcome = paste(&mut g, Some(CellCoord::new(10, 10)), &rows);
        assert_eq!(
            outcome,
            PasteOutcome {
                rows: 3,
                cols: 2,
                replaced: false
            }
        );
        assert_eq!((g.row_count(), g.col_count()), (20, 12));
        assert_eq!(g.cell(12, 11), Some(&CellValue::Number(6.0)));
        assert_eq!(g.cell_text(0, 0), "keep");
    }

    #[test]
    fn test_anchored_paste_clamps_at_bounds() {
        let bounds = GridBounds {
            max_rows: 4,
            max_cols: 3,
            default_rows: 2,
            default_cols: 2,
            init_row_cap: 50,
        };
        let mut g = GridModel::new(bounds);
        g.init_blank(2, 2);
        let rows = tokenize("a\tb\tc\td\ne\tf\tg\th\ni\tj\tk\tl", '\t', ',');
        let outcome = paste(&mut g, Some(CellCoord::new(2, 1)), &rows);
        assert_eq!((g.row_count(), g.col_count()), (4, 3));
        assert_eq!((outcome.rows, outcome.cols), (2, 2));
        assert_eq!(g.cell_text(3, 2), "f");
    }

    #[test]
    fn test_paste_without_anchor_replaces() {
        let mut g = grid(20, 5);
        g.rename_column(0, "time");
        let rows = tokenize("time,dose,response\n0,1,2", '\t', ',');
        let outcome = paste(&mut g, None, &rows);
        assert!(outcome.replaced);
        assert_eq!(g.columns(), ["1", "2", "3"]);
        assert_eq!(g.row_count(), 2);
        // The first line stays data
        assert_eq!(g.cell_text(0, 0), "time");
        assert_eq!(g.cell(1, 2), Some(&CellValue::Number(2.0)));
    }

    #[test]
    fn test_empty_paste_leaves_grid_untouched() {
        let mut g = grid(20, 5);
        g.set_cell(1, 1, "x");
        let outcome = paste(&mut g, None, &tokenize("", '\t', ','));
        assert_eq!((outcome.rows, outcome.cols, outcome.replaced), (0, 0, false));
        assert_eq!((g.row_count(), g.col_count()), (20, 5));
        assert_eq!(g.cell_text(1, 1), "x");
    }
}
