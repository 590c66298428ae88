//! Selection overlay geometry.
//!
//! Keeps the selection's visual contract testable without a drawing surface:
//! an outline around the effective rectangle with a fill-handle marker at its
//! bottom-right corner, and highlighted headers for every row and column the
//! selection touches. Header-only selections highlight but get neither
//! outline nor handle.

use std::ops::RangeInclusive;

use crate::fill::FillController;
use crate::grid::GridModel;
use crate::layout::{CellRect, GridLayout};
use crate::selection::SelectionController;
use crate::types::CellRange;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionOverlay {
    /// Effective selected rectangle, in cell coordinates
    pub range: Option<CellRange>,
    /// Outline rectangle (cell selections only)
    pub outline: Option<CellRect>,
    /// Fill-handle square centered on the outline's bottom-right corner
    pub fill_handle: Option<CellRect>,
    pub highlighted_rows: Option<RangeInclusive<u32>>,
    pub highlighted_cols: Option<RangeInclusive<u32>>,
    /// Cell covered by the edit overlay input
    pub editing: Option<CellRect>,
    /// Cells a fill drag would write on release
    pub fill_preview: Vec<CellRect>,
}

impl SelectionOverlay {
    pub fn compute(
        layout: &GridLayout,
        grid: &GridModel,
        selection: &SelectionController,
        fill: &FillController,
        handle_size: f32,
    ) -> Self {
        let Some(range) = selection.effective_range(grid) else {
            return Self::default();
        };

        let (outline, fill_handle) = match selection.cell_range() {
            Some(cells) => {
                let rect = layout.range_rect(cells);
                let handle = CellRect {
                    x: rect.x + rect.width - handle_size / 2.0,
                    y: rect.y + rect.height - handle_size / 2.0,
                    width: handle_size,
                    height: handle_size,
                };
                (Some(rect), Some(handle))
            }
            None => (None, None),
        };

        Self {
            range: Some(range),
            outline,
            fill_handle,
            highlighted_rows: Some(range.top..=range.bottom),
            highlighted_cols: Some(range.left..=range.right),
            editing: selection.edit().map(|e| layout.cell_rect(e.cell)),
            fill_preview: fill
                .preview()
                .into_iter()
                .map(|r| layout.range_rect(r))
                .collect(),
        }
    }

    pub fn is_row_highlighted(&self, row: u32) -> bool {
        self.highlighted_rows
            .as_ref()
            .is_some_and(|rows| rows.contains(&row))
    }

    pub fn is_col_highlighted(&self, col: u32) -> bool {
        self.highlighted_cols
            .as_ref()
            .is_some_and(|cols| cols.contains(&col))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::layout::ColumnResizer;
    use crate::types::{CellCoord, HeaderAxis};

    fn fixture() -> (GridModel, GridLayout, EditorConfig) {
        let config = EditorConfig::default();
        let mut grid = GridModel::default();
        grid.init_blank(20, 5);
        let resizer = ColumnResizer::new(config.default_col_width, config.min_col_width);
        let layout = GridLayout::compute(&grid, &resizer, &config);
        (grid, layout, config)
    }

    #[test]
    fn test_cell_selection_has_outline_and_handle() {
        let (grid, layout, config) = fixture();
        let mut sel = SelectionController::new();
        sel.pointer_down_cell(CellCoord::new(1, 1), &grid);
        sel.pointer_move(CellCoord::new(2, 3), false, &grid);
        let overlay =
            SelectionOverlay::compute(&layout, &grid, &sel, &FillController::new(), 8.0);

        let outline = overlay.outline.unwrap();
        assert_eq!(outline.x, config.row_header_width + 100.0);
        assert_eq!(outline.width, 300.0);
        assert_eq!(outline.height, 48.0);
        let handle = overlay.fill_handle.unwrap();
        assert_eq!(handle.x + 4.0, outline.x + outline.width);
        assert!(overlay.is_row_highlighted(2));
        assert!(!overlay.is_row_highlighted(3));
        assert!(overlay.is_col_highlighted(3));
        assert!(overlay.editing.is_none());
    }

    #[test]
    fn test_header_selection_has_no_outline() {
        let (grid, layout, _) = fixture();
        let mut sel = SelectionController::new();
        sel.pointer_down_header(HeaderAxis::Rows, 4, &grid);
        let overlay =
            SelectionOverlay::compute(&layout, &grid, &sel, &FillController::new(), 8.0);
        assert!(overlay.outline.is_none());
        assert!(overlay.fill_handle.is_none());
        assert!(overlay.is_row_highlighted(4));
        assert!(overlay.is_col_highlighted(0));
        assert!(overlay.is_col_highlighted(4));
    }

    #[test]
    fn test_fill_preview_and_edit_rects() {
        let (grid, layout, _) = fixture();
        let mut sel = SelectionController::new();
        sel.double_click(CellCoord::new(0, 0), &grid);
        let mut fill = FillController::new();
        fill.begin(CellRange::single(CellCoord::new(0, 0)));
        fill.update(CellCoord::new(2, 0), &grid);
        let overlay = SelectionOverlay::compute(&layout, &grid, &sel, &fill, 8.0);
        assert_eq!(overlay.editing, Some(layout.cell_rect(CellCoord::new(0, 0))));
        assert_eq!(overlay.fill_preview.len(), 1);
        assert_eq!(overlay.fill_preview[0].height, 48.0);
    }

    #[test]
    fn test_no_selection_is_empty() {
        let (grid, layout, _) = fixture();
        let overlay = SelectionOverlay::compute(
            &layout,
            &grid,
            &SelectionController::new(),
            &FillController::new(),
            8.0,
        );
        assert_eq!(overlay, SelectionOverlay::default());
    }
}
