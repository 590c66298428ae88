use serde::{Deserialize, Serialize};

/// A grid coordinate, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// A normalized, inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRange {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl CellRange {
    /// Rectangle spanned by two corners, in any order.
    pub fn spanning(a: CellCoord, b: CellCoord) -> Self {
        Self {
            top: a.row.min(b.row),
            left: a.col.min(b.col),
            bottom: a.row.max(b.row),
            right: a.col.max(b.col),
        }
    }

    pub fn single(cell: CellCoord) -> Self {
        Self::spanning(cell, cell)
    }

    pub fn top_left(&self) -> CellCoord {
        CellCoord::new(self.top, self.left)
    }

    pub fn bottom_right(&self) -> CellCoord {
        CellCoord::new(self.bottom, self.right)
    }

    pub fn row_count(&self) -> u32 {
        self.bottom - self.top + 1
    }

    pub fn col_count(&self) -> u32 {
        self.right - self.left + 1
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        (self.top..=self.bottom).contains(&cell.row) && (self.left..=self.right).contains(&cell.col)
    }

    /// Iterate cells row by row.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (self.top..=self.bottom)
            .flat_map(move |row| (self.left..=self.right).map(move |col| CellCoord::new(row, col)))
    }
}

/// Selection state for a cell drag: the corner where it started and the
/// corner under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub anchor: CellCoord,
    pub active: CellCoord,
}

impl SelectionRange {
    /// Create a single-cell selection
    pub fn at(cell: CellCoord) -> Self {
        Self {
            anchor: cell,
            active: cell,
        }
    }

    /// Get normalized bounds (min/max), independent of drag direction
    pub fn bounds(&self) -> CellRange {
        CellRange::spanning(self.anchor, self.active)
    }
}

/// Axis of a header-only selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderAxis {
    /// Entire row(s) selected
    Rows,
    /// Entire column(s) selected
    Columns,
}

/// A contiguous run of whole rows or whole columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSpan {
    pub axis: HeaderAxis,
    pub start: u32,
    pub end: u32,
}

impl HeaderSpan {
    pub fn new(axis: HeaderAxis, index: u32) -> Self {
        Self {
            axis,
            start: index,
            end: index,
        }
    }

    /// Normalized (first, last) indices
    pub fn bounds(&self) -> (u32, u32) {
        (self.start.min(self.end), self.start.max(self.end))
    }

    /// Rectangle covered by this span in a grid of the given size.
    pub fn to_range(&self, rows: u32, cols: u32) -> CellRange {
        let (first, last) = self.bounds();
        match self.axis {
            HeaderAxis::Rows => CellRange {
                top: first,
                left: 0,
                bottom: last,
                right: cols.saturating_sub(1),
            },
            HeaderAxis::Columns => CellRange {
                top: 0,
                left: first,
                bottom: rows.saturating_sub(1),
                right: last,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_ignore_drag_direction() {
        let a = CellCoord::new(2, 5);
        let b = CellCoord::new(7, 1);
        let down_right = SelectionRange {
            anchor: a,
            active: b,
        };
        let up_left = SelectionRange {
            anchor: b,
            active: a,
        };
        assert_eq!(down_right.bounds(), up_left.bounds());
        assert_eq!(
            down_right.bounds(),
            CellRange {
                top: 2,
                left: 1,
                bottom: 7,
                right: 5
            }
        );
    }

    #[test]
    fn test_cells_iterates_row_major() {
        let range = CellRange::spanning(CellCoord::new(0, 0), CellCoord::new(1, 1));
        let cells: Vec<_> = range.cells().collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 0),
                CellCoord::new(1, 1)
            ]
        );
        assert_eq!(range.row_count(), 2);
    }

    #[test]
    fn test_header_span_to_range() {
        let span = HeaderSpan {
            axis: HeaderAxis::Columns,
            start: 4,
            end: 2,
        };
        let range = span.to_range(10, 8);
        assert_eq!((range.top, range.left, range.bottom, range.right), (0, 2, 9, 4));
    }
}
