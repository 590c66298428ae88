//! Canvas 2D painter for the table.
//!
//! The canvas covers the visible part of the scroll container only; the
//! header strips stay pinned while cells scroll underneath them.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::editor::GridEditor;
use crate::error::{FiggridError, Result};
use crate::layout::CellRect;
use crate::types::CellCoord;

mod colors {
    pub const BACKGROUND: &str = "#FFFFFF";
    pub const GRID_LINE: &str = "#E2E3E3";
    pub const HEADER_BG: &str = "#F8F9FA";
    pub const HEADER_SELECTED_BG: &str = "#D3E3FD";
    pub const HEADER_TEXT: &str = "#444746";
    pub const CELL_TEXT: &str = "#202124";
    pub const SELECTION_FILL: &str = "rgba(26, 115, 232, 0.08)";
    pub const SELECTION_BORDER: &str = "#1A73E8";
    pub const FILL_PREVIEW: &str = "#5F6368";
}

const CELL_PADDING: f64 = 4.0;
const FONT: &str = "13px -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";
const HEADER_FONT: &str = "500 11px -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";

/// The visible window of the scroll container, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

pub struct TablePainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    dpr: f64,
}

impl TablePainter {
    /// # Errors
    /// Returns an error if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, dpr: f64) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| FiggridError::Host("getContext('2d') failed".into()))?
            .ok_or_else(|| FiggridError::Host("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FiggridError::Host("2d context has an unexpected type".into()))?;
        Ok(Self { canvas, ctx, dpr })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn resize(&self, width: f64, height: f64) {
        let physical_w = (width * self.dpr).round().max(1.0) as u32;
        let physical_h = (height * self.dpr).round().max(1.0) as u32;
        if self.canvas.width() != physical_w {
            self.canvas.set_width(physical_w);
        }
        if self.canvas.height() != physical_h {
            self.canvas.set_height(physical_h);
        }
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
    }

    /// Paint cells, headers and the selection overlay for `viewport`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn paint(&self, editor: &GridEditor, viewport: Viewport) {
        self.resize(viewport.width, viewport.height);
        let ctx = &self.ctx;
        let _ = ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
        ctx.set_fill_style_str(colors::BACKGROUND);
        ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);

        let layout = editor.layout();
        let grid = editor.grid();
        let header_w = f64::from(layout.header_width());
        let header_h = f64::from(layout.header_height());
        let overlay = editor.overlay();

        let first_row = layout
            .row_at_y(viewport.scroll_y as f32)
            .unwrap_or(grid.row_count());
        let first_col = layout
            .col_at_x(viewport.scroll_x as f32)
            .unwrap_or(grid.col_count());
        let to_screen = |rect: CellRect| {
            (
                f64::from(rect.x) - viewport.scroll_x,
                f64::from(rect.y) - viewport.scroll_y,
                f64::from(rect.width),
                f64::from(rect.height),
            )
        };

        // Cells, clipped below and right of the header strips
        ctx.save();
        ctx.begin_path();
        ctx.rect(header_w, header_h, viewport.width, viewport.height);
        ctx.clip();
        ctx.set_font(FONT);
        ctx.set_text_align("left");
        ctx.set_text_baseline("middle");
        ctx.set_line_width(1.0);
        for row in first_row..grid.row_count() {
            let mut row_visible = false;
            for col in first_col..grid.col_count() {
                let (x, y, w, h) = to_screen(layout.cell_rect(CellCoord::new(row, col)));
                if y > viewport.height {
                    break;
                }
                row_visible = true;
                if x > viewport.width {
                    break;
                }
                ctx.set_stroke_style_str(colors::GRID_LINE);
                ctx.stroke_rect(x + 0.5, y + 0.5, w, h);
                let text = grid.cell_text(row, col);
                if !text.is_empty() && !editor.selection().is_editing_cell(CellCoord::new(row, col)) {
                    ctx.save();
                    ctx.begin_path();
                    ctx.rect(x, y, w, h);
                    ctx.clip();
                    ctx.set_fill_style_str(colors::CELL_TEXT);
                    let _ = ctx.fill_text(&text, x + CELL_PADDING, y + h / 2.0);
                    ctx.restore();
                }
            }
            if !row_visible {
                break;
            }
        }

        if let Some(range) = overlay.range {
            let (x, y, w, h) = to_screen(layout.range_rect(range));
            ctx.set_fill_style_str(colors::SELECTION_FILL);
            ctx.fill_rect(x, y, w, h);
        }
        for rect in &overlay.fill_preview {
            let (x, y, w, h) = to_screen(*rect);
            ctx.set_stroke_style_str(colors::FILL_PREVIEW);
            let _ = ctx.set_line_dash(&js_sys::Array::of2(&3.0.into(), &3.0.into()));
            ctx.stroke_rect(x + 0.5, y + 0.5, w - 1.0, h - 1.0);
            let _ = ctx.set_line_dash(&js_sys::Array::new());
        }
        if let Some(outline) = overlay.outline {
            let (x, y, w, h) = to_screen(outline);
            ctx.set_stroke_style_str(colors::SELECTION_BORDER);
            ctx.set_line_width(2.0);
            ctx.stroke_rect(x, y, w, h);
        }
        if let Some(handle) = overlay.fill_handle {
            let (x, y, w, h) = to_screen(handle);
            ctx.set_fill_style_str(colors::BACKGROUND);
            ctx.fill_rect(x - 1.0, y - 1.0, w + 2.0, h + 2.0);
            ctx.set_fill_style_str(colors::SELECTION_BORDER);
            ctx.fill_rect(x, y, w, h);
        }
        ctx.restore();

        // Column headers: pinned vertically, scroll horizontally
        ctx.set_font(HEADER_FONT);
        ctx.set_text_align("center");
        ctx.set_line_width(1.0);
        ctx.set_fill_style_str(colors::HEADER_BG);
        ctx.fill_rect(0.0, 0.0, viewport.width, header_h);
        ctx.save();
        ctx.begin_path();
        ctx.rect(header_w, 0.0, viewport.width, header_h);
        ctx.clip();
        for (offset, label) in grid.columns().iter().enumerate().skip(first_col as usize) {
            let Ok(col) = u32::try_from(offset) else {
                break;
            };
            let (x, _, w, _) = to_screen(layout.cell_rect(CellCoord::new(0, col)));
            if x > viewport.width {
                break;
            }
            if overlay.is_col_highlighted(col) {
                ctx.set_fill_style_str(colors::HEADER_SELECTED_BG);
                ctx.fill_rect(x, 0.0, w, header_h);
            }
            ctx.set_stroke_style_str(colors::GRID_LINE);
            ctx.stroke_rect(x + 0.5, 0.5, w, header_h);
            ctx.set_fill_style_str(colors::HEADER_TEXT);
            let _ = ctx.fill_text(label, x + w / 2.0, header_h / 2.0);
        }
        ctx.restore();

        // Row headers: pinned horizontally, scroll vertically
        ctx.set_fill_style_str(colors::HEADER_BG);
        ctx.fill_rect(0.0, header_h, header_w, viewport.height);
        ctx.save();
        ctx.begin_path();
        ctx.rect(0.0, header_h, header_w, viewport.height);
        ctx.clip();
        for row in first_row..grid.row_count() {
            let (_, y, _, h) = to_screen(layout.cell_rect(CellCoord::new(row, 0)));
            if y > viewport.height {
                break;
            }
            if overlay.is_row_highlighted(row) {
                ctx.set_fill_style_str(colors::HEADER_SELECTED_BG);
                ctx.fill_rect(0.0, y, header_w, h);
            }
            ctx.set_stroke_style_str(colors::GRID_LINE);
            ctx.stroke_rect(0.5, y + 0.5, header_w, h);
            ctx.set_fill_style_str(colors::HEADER_TEXT);
            let _ = ctx.fill_text(&(row + 1).to_string(), header_w / 2.0, y + h / 2.0);
        }
        ctx.restore();

        // Corner
        ctx.set_fill_style_str(colors::HEADER_BG);
        ctx.fill_rect(0.0, 0.0, header_w, header_h);
        ctx.set_stroke_style_str(colors::GRID_LINE);
        ctx.stroke_rect(0.5, 0.5, header_w, header_h);
    }
}
