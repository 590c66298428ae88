//! Column width overrides and the border-drag gesture that sets them.

use std::collections::HashMap;

/// An in-progress border drag.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ResizeDrag {
    col: u32,
    start_width: f32,
    start_x: f32,
    current_width: f32,
}

/// Owns per-column widths; independent of selection.
///
/// Every event of a resize gesture is consumed: the binding must stop its
/// propagation so ancestor drag handlers (a page splitter, say) never see it.
#[derive(Debug, Clone)]
pub struct ColumnResizer {
    widths: HashMap<u32, f32>,
    default_width: f32,
    min_width: f32,
    drag: Option<ResizeDrag>,
}

impl ColumnResizer {
    pub fn new(default_width: f32, min_width: f32) -> Self {
        Self {
            widths: HashMap::new(),
            default_width,
            min_width,
            drag: None,
        }
    }

    /// Current width of a column
    pub fn width(&self, col: u32) -> f32 {
        self.widths.get(&col).copied().unwrap_or(self.default_width)
    }

    /// Sparse overrides, for the renderer
    pub fn widths(&self) -> &HashMap<u32, f32> {
        &self.widths
    }

    pub fn default_width(&self) -> f32 {
        self.default_width
    }

    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    /// Column being resized, if any
    pub fn active_column(&self) -> Option<u32> {
        self.drag.map(|d| d.col)
    }

    /// Pointer-down on the right border of `col` at pointer x `x`.
    pub fn begin(&mut self, col: u32, x: f32) {
        let start_width = self.width(col);
        self.drag = Some(ResizeDrag {
            col,
            start_width,
            start_x: x,
            current_width: start_width,
        });
    }

    /// Pointer-move during a resize. Returns the column and its new width
    /// when the width changed.
    pub fn drag(&mut self, x: f32) -> Option<(u32, f32)> {
        let drag = self.drag.as_mut()?;
        let width = (drag.start_width + (x - drag.start_x)).max(self.min_width);
        if (width - drag.current_width).abs() < f32::EPSILON {
            return None;
        }
        drag.current_width = width;
        let col = drag.col;
        self.widths.insert(col, width);
        Some((col, width))
    }

    /// Pointer-up. Returns the final width if a resize was in progress.
    pub fn end(&mut self) -> Option<(u32, f32)> {
        let drag = self.drag.take()?;
        log::debug!("column {} resized to {}px", drag.col, drag.current_width);
        Some((drag.col, drag.current_width))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_applies_delta() {
        let mut resizer = ColumnResizer::new(100.0, 30.0);
        resizer.begin(2, 500.0);
        assert_eq!(resizer.drag(540.0), Some((2, 140.0)));
        assert_eq!(resizer.width(2), 140.0);
        assert_eq!(resizer.end(), Some((2, 140.0)));
        assert!(!resizer.is_active());
        assert_eq!(resizer.width(2), 140.0);
        assert_eq!(resizer.width(3), 100.0);
    }

    #[test]
    fn test_width_never_below_minimum() {
        let mut resizer = ColumnResizer::new(100.0, 30.0);
        resizer.begin(0, 200.0);
        assert_eq!(resizer.drag(0.0), Some((0, 30.0)));
        // Already at the minimum: no change reported
        assert_eq!(resizer.drag(-50.0), None);
    }

    #[test]
    fn test_second_gesture_starts_from_override() {
        let mut resizer = ColumnResizer::new(100.0, 30.0);
        resizer.begin(1, 0.0);
        resizer.drag(50.0);
        resizer.end();
        resizer.begin(1, 10.0);
        assert_eq!(resizer.drag(20.0), Some((1, 160.0)));
    }

    #[test]
    fn test_drag_without_begin_is_ignored() {
        let mut resizer = ColumnResizer::new(100.0, 30.0);
        assert_eq!(resizer.drag(10.0), None);
        assert_eq!(resizer.end(), None);
    }
}
