//! Pixel geometry of the table and hit testing.
//!
//! Coordinates are in table-content pixels: the row header strip occupies
//! `x < row_header_width` and the column header strip `y < col_header_height`,
//! with cell (0, 0) starting right after both.

use crate::config::EditorConfig;
use crate::grid::GridModel;
use crate::types::{CellCoord, CellRange};

use super::ColumnResizer;

/// Distance from a column's right edge (in the header strip) that grabs the
/// resize border.
pub const BORDER_GRAB: f32 = 4.0;

/// Rectangle in table-content pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// What lies under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A data cell
    Cell(CellCoord),
    /// A row header at the given row index
    RowHeader(u32),
    /// A column header at the given column index
    ColumnHeader(u32),
    /// The resize border on the right edge of a column header
    ColumnBorder(u32),
    /// The fill handle of the current selection
    FillHandle,
    /// The corner header (select all)
    CornerHeader,
    /// Outside any interactive region
    None,
}

/// Pre-computed column positions for one grid size and set of widths.
#[derive(Debug, Clone)]
pub struct GridLayout {
    /// `col_positions[i]` = x of column i's left edge, relative to the first column;
    /// one extra trailing entry for the right edge.
    col_positions: Vec<f32>,
    rows: u32,
    row_height: f32,
    default_col_width: f32,
    row_header_width: f32,
    col_header_height: f32,
    fill_handle_size: f32,
}

impl GridLayout {
    pub fn compute(grid: &GridModel, resizer: &ColumnResizer, config: &EditorConfig) -> Self {
        let cols = grid.col_count();
        let mut col_positions = Vec::with_capacity(cols as usize + 1);
        let mut x = 0.0_f32;
        for col in 0..cols {
            col_positions.push(x);
            x += resizer.width(col);
        }
        col_positions.push(x);
        Self {
            col_positions,
            rows: grid.row_count(),
            row_height: config.row_height,
            default_col_width: resizer.default_width(),
            row_header_width: config.row_header_width,
            col_header_height: config.col_header_height,
            fill_handle_size: config.fill_handle_size,
        }
    }

    pub fn col_count(&self) -> u32 {
        u32::try_from(self.col_positions.len().saturating_sub(1)).unwrap_or(u32::MAX)
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn header_width(&self) -> f32 {
        self.row_header_width
    }

    pub fn header_height(&self) -> f32 {
        self.col_header_height
    }

    /// Width of all columns (headers excluded)
    pub fn total_width(&self) -> f32 {
        self.col_positions.last().copied().unwrap_or(0.0)
    }

    /// Height of all rows (headers excluded)
    #[allow(clippy::cast_precision_loss)]
    pub fn total_height(&self) -> f32 {
        self.rows as f32 * self.row_height
    }

    /// Column containing grid-relative x (binary search)
    pub fn col_at_x(&self, x: f32) -> Option<u32> {
        if x < 0.0 || x >= self.total_width() {
            return None;
        }
        let i = match self
            .col_positions
            .binary_search_by(|pos| pos.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        u32::try_from(i).ok()
    }

    /// Row containing grid-relative y
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn row_at_y(&self, y: f32) -> Option<u32> {
        if y < 0.0 || y >= self.total_height() {
            return None;
        }
        // Bounded by total_height check above
        Some((y / self.row_height).floor() as u32)
    }

    /// Cell under a drag pointer, extrapolated past the grid's right and
    /// bottom edges with the default column width and row height. Used by
    /// drags that can grow the grid.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn drag_cell_at(&self, x: f32, y: f32) -> CellCoord {
        let gx = (x - self.row_header_width).max(0.0);
        let gy = (y - self.col_header_height).max(0.0);
        let col = self.col_at_x(gx).unwrap_or_else(|| {
            let beyond = ((gx - self.total_width()) / self.default_col_width).floor();
            self.col_count().saturating_add(beyond.max(0.0) as u32)
        });
        let row = (gy / self.row_height).floor().max(0.0) as u32;
        CellCoord::new(row, col)
    }

    /// Cell bounds in table-content pixels
    pub fn cell_rect(&self, cell: CellCoord) -> CellRect {
        self.range_rect(CellRange::single(cell))
    }

    /// Bounds of a whole range in table-content pixels
    #[allow(clippy::cast_precision_loss)]
    pub fn range_rect(&self, range: CellRange) -> CellRect {
        let left = self.edge_x(range.left);
        let right = self.edge_x(range.right.saturating_add(1));
        let top = range.top as f32 * self.row_height;
        let bottom = (range.bottom as f32 + 1.0) * self.row_height;
        CellRect {
            x: self.row_header_width + left,
            y: self.col_header_height + top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Grid-relative x of a column's left edge; columns past the end use the
    /// default width.
    #[allow(clippy::cast_precision_loss)]
    fn edge_x(&self, col: u32) -> f32 {
        match self.col_positions.get(col as usize) {
            Some(x) => *x,
            None => {
                let extra = col.saturating_sub(self.col_count()) as f32;
                self.total_width() + extra * self.default_col_width
            }
        }
    }

    /// Determine what is under the pointer.
    ///
    /// `selection` is the current cell selection rectangle, used to find its
    /// fill handle.
    pub fn hit_test(&self, x: f32, y: f32, selection: Option<CellRange>) -> PointerTarget {
        if x < 0.0 || y < 0.0 {
            return PointerTarget::None;
        }

        if let Some(range) = selection {
            let rect = self.range_rect(range);
            let (hx, hy) = (rect.x + rect.width, rect.y + rect.height);
            let reach = self.fill_handle_size / 2.0 + 2.0;
            if (x - hx).abs() <= reach && (y - hy).abs() <= reach {
                return PointerTarget::FillHandle;
            }
        }

        let in_row_header = x < self.row_header_width;
        let in_col_header = y < self.col_header_height;
        if in_row_header && in_col_header {
            return PointerTarget::CornerHeader;
        }

        let gx = x - self.row_header_width;
        let gy = y - self.col_header_height;

        if in_col_header {
            // Resize border takes priority over the header itself
            for (col, edge) in self.col_positions.iter().skip(1).enumerate() {
                if (gx - edge).abs() <= BORDER_GRAB {
                    if let Ok(col) = u32::try_from(col) {
                        return PointerTarget::ColumnBorder(col);
                    }
                }
            }
            return match self.col_at_x(gx) {
                Some(col) => PointerTarget::ColumnHeader(col),
                None => PointerTarget::None,
            };
        }

        if in_row_header {
            return match self.row_at_y(gy) {
                Some(row) => PointerTarget::RowHeader(row),
                None => PointerTarget::None,
            };
        }

        match (self.row_at_y(gy), self.col_at_x(gx)) {
            (Some(row), Some(col)) => PointerTarget::Cell(CellCoord::new(row, col)),
            _ => PointerTarget::None,
        }
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

    fn layout_with(resize: Option<(u32, f32)>) -> GridLayout {
        let config = EditorConfig::default();
        let mut grid = GridModel::default();
        grid.init_blank(20, 5);
        let mut resizer = ColumnResizer::new(config.default_col_width, config.min_col_width);
        if let Some((col, width)) = resize {
            resizer.begin(col, 0.0);
            resizer.drag(width - config.default_col_width);
            resizer.end();
        }
        GridLayout::compute(&grid, &resizer, &config)
    }

    #[test]
    fn test_basic_layout() {
        let layout = layout_with(None);
        assert_eq!(layout.col_count(), 5);
        assert_eq!(layout.total_width(), 500.0);
        assert_eq!(layout.total_height(), 480.0);
    }

    #[test]
    fn test_col_at_x_respects_overrides() {
        let layout = layout_with(Some((1, 40.0)));
        assert_eq!(layout.col_at_x(0.0), Some(0));
        assert_eq!(layout.col_at_x(100.0), Some(1));
        assert_eq!(layout.col_at_x(139.0), Some(1));
        assert_eq!(layout.col_at_x(140.0), Some(2));
        assert_eq!(layout.col_at_x(440.0), None);
    }

    #[test]
    fn test_hit_test_regions() {
        let layout = layout_with(None);
        assert_eq!(layout.hit_test(10.0, 10.0, None), PointerTarget::CornerHeader);
        assert_eq!(
            layout.hit_test(40.0 + 150.0, 10.0, None),
            PointerTarget::ColumnHeader(1)
        );
        assert_eq!(
            layout.hit_test(40.0 + 199.0, 10.0, None),
            PointerTarget::ColumnBorder(1)
        );
        assert_eq!(layout.hit_test(10.0, 24.0 + 50.0, None), PointerTarget::RowHeader(2));
        assert_eq!(
            layout.hit_test(40.0 + 250.0, 24.0 + 30.0, None),
            PointerTarget::Cell(CellCoord::new(1, 2))
        );
        assert_eq!(layout.hit_test(40.0 + 900.0, 30.0, None), PointerTarget::None);
    }

    #[test]
    fn test_fill_handle_hit() {
        let layout = layout_with(None);
        let range = CellRange::spanning(CellCoord::new(0, 0), CellCoord::new(1, 1));
        let rect = layout.range_rect(range);
        let corner = (rect.x + rect.width, rect.y + rect.height);
        assert_eq!(corner, (240.0, 72.0));
        assert_eq!(
            layout.hit_test(corner.0 - 2.0, corner.1 + 1.0, Some(range)),
            PointerTarget::FillHandle
        );
    }

    #[test]
    fn test_drag_cell_extrapolates_past_edges() {
        let layout = layout_with(None);
        assert_eq!(layout.drag_cell_at(0.0, 0.0), CellCoord::new(0, 0));
        // Two default columns past the last one, five rows past the last one
        let cell = layout.drag_cell_at(40.0 + 500.0 + 250.0, 24.0 + 480.0 + 5.0 * 24.0 + 1.0);
        assert_eq!(cell, CellCoord::new(25, 7));
    }
}
