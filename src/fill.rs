//! Drag-to-fill from the selection's fill handle.
//!
//! Replication is verbatim: rows below the selection copy its bottom row,
//! columns right of it copy its right column, and the corner block (both
//! directions at once) copies the bottom-right cell.

use crate::grid::GridModel;
use crate::types::{CellCoord, CellRange};

/// Which way a fill extends the source rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillDirection {
    Down,
    Right,
    DownRight,
}

impl FillDirection {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Right => "right",
            Self::DownRight => "down and right",
        }
    }
}

/// Result of a committed fill, for the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOutcome {
    pub cells: u32,
    pub direction: FillDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FillDrag {
    source: CellRange,
    target: Option<CellCoord>,
}

#[derive(Debug, Clone, Default)]
pub struct FillController {
    drag: Option<FillDrag>,
}

impl FillController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    /// Source rectangle of the fill in progress
    pub fn source(&self) -> Option<CellRange> {
        self.drag.map(|d| d.source)
    }

    /// Pointer-down on the fill handle of `source`.
    pub fn begin(&mut self, source: CellRange) {
        log::debug!(
            "fill drag from ({}, {})..({}, {})",
            source.top,
            source.left,
            source.bottom,
            source.right
        );
        self.drag = Some(FillDrag {
            source,
            target: None,
        });
    }

    /// Pointer-move: clamp the target to the grid and return true if the
    /// preview changed.
    pub fn update(&mut self, target: CellCoord, grid: &GridModel) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let target = CellCoord::new(
            target.row.min(grid.row_count().saturating_sub(1)),
            target.col.min(grid.col_count().saturating_sub(1)),
        );
        if drag.target == Some(target) {
            return false;
        }
        drag.target = Some(target);
        true
    }

    /// Direction implied by the current target, if it extends the source.
    pub fn direction(&self) -> Option<FillDirection> {
        let drag = self.drag?;
        let target = drag.target?;
        let down = target.row > drag.source.bottom;
        let right = target.col > drag.source.right;
        match (down, right) {
            (true, true) => Some(FillDirection::DownRight),
            (true, false) => Some(FillDirection::Down),
            (false, true) => Some(FillDirection::Right),
            (false, false) => None,
        }
    }

    /// Rectangles that would be filled on release (disjoint).
    pub fn preview(&self) -> Vec<CellRange> {
        let (Some(drag), Some(direction)) = (self.drag, self.direction()) else {
            return Vec::new();
        };
        let Some(target) = drag.target else {
            return Vec::new();
        };
        let src = drag.source;
        let mut regions = Vec::with_capacity(3);
        if matches!(direction, FillDirection::Down | FillDirection::DownRight) {
            regions.push(CellRange {
                top: src.bottom + 1,
                left: src.left,
                bottom: target.row,
                right: src.right,
            });
        }
        if matches!(direction, FillDirection::Right | FillDirection::DownRight) {
            regions.push(CellRange {
                top: src.top,
                left: src.right + 1,
                bottom: src.bottom,
                right: target.col,
            });
        }
        if direction == FillDirection::DownRight {
            regions.push(CellRange {
                top: src.bottom + 1,
                left: src.right + 1,
                bottom: target.row,
                right: target.col,
            });
        }
        regions
    }

    /// Pointer-up: write every previewed cell and end the drag.
    ///
    /// Returns `None` when the target never left the source rectangle.
    pub fn finish(&mut self, grid: &mut GridModel) -> Option<FillOutcome> {
        let direction = self.direction();
        let regions = self.preview();
        let drag = self.drag.take()?;
        let direction = direction?;
        let src = drag.source;

        // Sources sit inside the selection and targets outside, so reads
        // and writes never overlap.
        let mut cells = 0_u32;
        for cell in regions.iter().flat_map(CellRange::cells) {
            let from = CellCoord::new(cell.row.min(src.bottom), cell.col.min(src.right));
            let text = grid.cell_text(from.row, from.col);
            if grid.set_cell(cell.row, cell.col, &text) {
                cells += 1;
            }
        }
        log::debug!("filled {cells} cells {}", direction.describe());
        Some(FillOutcome { cells, direction })
    }

    /// Abandon the drag without writing anything.
    pub fn cancel(&mut self) {
        self.drag = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn grid() -> GridModel {
        let mut grid = GridModel::default();
        grid.init_blank(20, 6);
        grid
    }

    fn range(top: u32, left: u32, bottom: u32, right: u32) -> CellRange {
        CellRange {
            top,
            left,
            bottom,
            right,
        }
    }

    #[test]
    fn test_fill_down_copies_bottom_row() {
        let mut g = grid();
        g.set_cell(0, 0, "1");
        g.set_cell(0, 1, "a");
        let mut fill = FillController::new();
        fill.begin(range(0, 0, 0, 1));
        assert!(fill.update(CellCoord::new(3, 1), &g));
        assert_eq!(fill.preview(), vec![range(1, 0, 3, 1)]);

        let outcome = fill.finish(&mut g).unwrap();
        assert_eq!(
            outcome,
            FillOutcome {
                cells: 6,
                direction: FillDirection::Down
            }
        );
        for row in 1..=3 {
            assert_eq!(g.cell(row, 0), Some(&CellValue::Number(1.0)));
            assert_eq!(g.cell_text(row, 1), "a");
        }
        assert_eq!(g.cell_text(4, 0), "");
        assert!(!fill.is_active());
    }

    #[test]
    fn test_fill_right_copies_right_column() {
        let mut g = grid();
        g.set_cell(2, 1, "x");
        g.set_cell(3, 1, "y");
        let mut fill = FillController::new();
        fill.begin(range(2, 0, 3, 1));
        fill.update(CellCoord::new(2, 3), &g);
        fill.finish(&mut g).unwrap();
        assert_eq!(g.cell_text(2, 3), "x");
        assert_eq!(g.cell_text(3, 2), "y");
    }

    #[test]
    fn test_corner_block_copies_bottom_right() {
        let mut g = grid();
        g.set_cell(0, 0, "tl");
        g.set_cell(1, 1, "br");
        let mut fill = FillController::new();
        fill.begin(range(0, 0, 1, 1));
        fill.update(CellCoord::new(3, 3), &g);
        assert_eq!(fill.direction(), Some(FillDirection::DownRight));
        assert_eq!(fill.preview().len(), 3);
        let outcome = fill.finish(&mut g).unwrap();
        assert_eq!(outcome.cells, 12);
        assert_eq!(g.cell_text(3, 3), "br");
        assert_eq!(g.cell_text(2, 2), "br");
        assert_eq!(g.cell_text(0, 2), "");
    }

    #[test]
    fn test_target_clamped_to_grid() {
        let mut g = grid();
        g.set_cell(0, 0, "v");
        let mut fill = FillController::new();
        fill.begin(range(0, 0, 0, 0));
        fill.update(CellCoord::new(500, 0), &g);
        let outcome = fill.finish(&mut g).unwrap();
        assert_eq!(outcome.cells, 19);
        assert_eq!(g.row_count(), 20);
    }

    #[test]
    fn test_target_inside_source_fills_nothing() {
        let mut g = grid();
        let mut fill = FillController::new();
        fill.begin(range(0, 0, 2, 2));
        fill.update(CellCoord::new(1, 1), &g);
        assert!(fill.preview().is_empty());
        assert_eq!(fill.finish(&mut g), None);
        assert!(!fill.is_active());
    }

    #[test]
    fn test_cancel_drops_drag() {
        let g = grid();
        let mut fill = FillController::new();
        fill.begin(range(0, 0, 0, 0));
        fill.update(CellCoord::new(4, 0), &g);
        fill.cancel();
        assert!(fill.preview().is_empty());
        assert!(!fill.update(CellCoord::new(5, 0), &g));
    }
}
