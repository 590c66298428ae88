//! The grid editor: one controller instance owning the grid, the selection
//! and fill state machines, column widths, the view transform and the host
//! hooks.
//!
//! Input arrives in table-content pixels (see [`crate::layout::GridLayout`]).
//! Every operation that changes something visible ends with a status report
//! and a render request; none of them return an error.

#[cfg(target_arch = "wasm32")]
pub(crate) mod input;

use crate::clipboard::{self, PasteOutcome};
use crate::config::EditorConfig;
use crate::fill::{FillController, FillOutcome};
use crate::grid::{GridBounds, GridModel};
use crate::host::{Hooks, RenderRequest};
use crate::layout::{CellRect, ColumnResizer, GridLayout, Point, PointerTarget, ViewTransform};
use crate::render::SelectionOverlay;
use crate::selection::{InteractionState, Key, Modifiers, SelectionController, Transition};
use crate::types::{CellCoord, Dataset, HeaderAxis};

/// How the binding should treat the DOM event after the editor handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// Suppress the browser's default action
    pub prevent_default: bool,
    /// Keep the event from reaching ancestor handlers
    pub stop_propagation: bool,
}

impl EventResponse {
    const IGNORED: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    const HANDLED: Self = Self {
        prevent_default: true,
        stop_propagation: false,
    };

    const CAPTURED: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };

    fn handled_if(consumed: bool) -> Self {
        if consumed {
            Self::HANDLED
        } else {
            Self::IGNORED
        }
    }
}

pub struct GridEditor {
    config: EditorConfig,
    grid: GridModel,
    selection: SelectionController,
    fill: FillController,
    resizer: ColumnResizer,
    view: ViewTransform,
    layout: GridLayout,
    hooks: Hooks,
}

impl GridEditor {
    /// Create an editor with an empty grid. Call [`GridEditor::init_blank`]
    /// or [`GridEditor::set_dataset`] before use.
    pub fn new(config: EditorConfig, hooks: Hooks) -> Self {
        let grid = GridModel::new(GridBounds::from_config(&config));
        let resizer = ColumnResizer::new(config.default_col_width, config.min_col_width);
        let view = ViewTransform::new(&config);
        let layout = GridLayout::compute(&grid, &resizer, &config);
        Self {
            config,
            grid,
            selection: SelectionController::new(),
            fill: FillController::new(),
            resizer,
            view,
            layout,
            hooks,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn fill(&self) -> &FillController {
        &self.fill
    }

    pub fn resizer(&self) -> &ColumnResizer {
        &self.resizer
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Selection overlay geometry for the current state.
    pub fn overlay(&self) -> SelectionOverlay {
        SelectionOverlay::compute(
            &self.layout,
            &self.grid,
            &self.selection,
            &self.fill,
            self.config.fill_handle_size,
        )
    }

    /// Full table size including header strips.
    pub fn content_size(&self) -> (f32, f32) {
        (
            self.layout.header_width() + self.layout.total_width(),
            self.layout.header_height() + self.layout.total_height(),
        )
    }

    /// Position and buffered text of the open edit, for the overlay input.
    pub fn edit_overlay(&self) -> Option<(CellRect, &str)> {
        let edit = self.selection.edit()?;
        Some((self.layout.cell_rect(edit.cell), edit.buffer.as_str()))
    }

    // ---- Dataset ----

    /// Replace the grid with a blank one of `rows` x `cols` (rows clamped
    /// as described on [`GridModel::init_blank`]).
    pub fn init_blank(&mut self, rows: u32, cols: u32) {
        self.reset_interaction();
        self.grid.init_blank(rows, cols);
        self.relayout();
        self.render(true, false);
        self.report(&format!(
            "New table: {} rows × {} columns",
            self.grid.row_count(),
            self.grid.col_count()
        ));
    }

    /// Blank grid sized to fill a viewport of `height` pixels.
    pub fn init_for_viewport(&mut self, height: f32) {
        let rows = GridModel::rows_for_viewport(height, self.config.row_height);
        self.init_blank(rows, self.config.default_cols);
    }

    pub fn dataset(&self) -> &Dataset {
        self.grid.dataset()
    }

    /// Install a dataset from the host. Selection and any open edit are
    /// dropped without committing.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.reset_interaction();
        self.grid.set_dataset(dataset);
        self.relayout();
        self.render(true, false);
        self.report(&format!(
            "Loaded {} rows × {} columns",
            self.grid.row_count(),
            self.grid.col_count()
        ));
    }

    pub fn rename_column(&mut self, col: u32, label: &str) {
        if col >= self.grid.col_count() {
            return;
        }
        self.grid.rename_column(col, label);
        self.render(true, false);
        if let Some(label) = self.grid.columns().get(col as usize) {
            self.report(&format!("Column {} renamed to \"{label}\"", col + 1));
        }
    }

    pub fn add_rows(&mut self, n: u32) -> u32 {
        let added = self.grid.add_rows(n);
        self.after_growth(added > 0);
        added
    }

    pub fn add_columns(&mut self, n: u32) -> u32 {
        let added = self.grid.add_columns(n);
        self.after_growth(added > 0);
        added
    }

    // ---- Pointer input ----

    /// Primary-button pointer-down inside the table.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> EventResponse {
        let target = self.layout.hit_test(x, y, self.selection.cell_range());
        match target {
            PointerTarget::FillHandle => {
                let committed = self.selection.force_commit();
                self.apply(committed);
                if let Some(range) = self.selection.cell_range() {
                    self.fill.begin(range);
                }
                EventResponse::HANDLED
            }
            PointerTarget::ColumnBorder(col) => {
                let committed = self.selection.force_commit();
                self.apply(committed);
                self.resizer.begin(col, x);
                EventResponse::CAPTURED
            }
            PointerTarget::ColumnHeader(col) => {
                let t = self
                    .selection
                    .pointer_down_header(HeaderAxis::Columns, col, &self.grid);
                EventResponse::handled_if(self.apply(t))
            }
            PointerTarget::RowHeader(row) => {
                let t = self
                    .selection
                    .pointer_down_header(HeaderAxis::Rows, row, &self.grid);
                EventResponse::handled_if(self.apply(t))
            }
            PointerTarget::CornerHeader => {
                let t = self.selection.select_all(&self.grid);
                EventResponse::handled_if(self.apply(t))
            }
            PointerTarget::Cell(cell) => {
                let t = self.selection.pointer_down_cell(cell, &self.grid);
                EventResponse::handled_if(self.apply(t))
            }
            PointerTarget::None => EventResponse::IGNORED,
        }
    }

    /// Pointer-move with the primary button held. Routed to whichever drag
    /// is live: column resize, fill, or selection.
    pub fn pointer_move(&mut self, x: f32, y: f32, mods: Modifiers) -> EventResponse {
        if self.resizer.is_active() {
            if self.resizer.drag(x).is_some() {
                self.relayout();
                self.render(true, false);
            }
            return EventResponse::CAPTURED;
        }

        let cell = self.layout.drag_cell_at(x, y);
        if self.fill.is_active() {
            if self.fill.update(cell, &self.grid) {
                self.render(true, false);
            }
            return EventResponse::HANDLED;
        }

        match self.selection.state() {
            InteractionState::SelectingCells
            | InteractionState::SelectingColumns
            | InteractionState::SelectingRows => {
                let t = self.selection.pointer_move(cell, mods.command(), &self.grid);
                EventResponse::handled_if(self.apply(t))
            }
            InteractionState::Idle | InteractionState::Editing => EventResponse::IGNORED,
        }
    }

    /// Pointer-up anywhere in the document; ends every live drag.
    pub fn pointer_up(&mut self) -> EventResponse {
        let mut response = EventResponse::IGNORED;

        if let Some((col, width)) = self.resizer.end() {
            let label = self
                .grid
                .columns()
                .get(col as usize)
                .cloned()
                .unwrap_or_default();
            self.report(&format!("Column \"{label}\" width: {width:.0}px"));
            response = EventResponse::CAPTURED;
        }

        if self.fill.is_active() {
            match self.fill.finish(&mut self.grid) {
                Some(outcome) => self.report_fill(outcome),
                None => self.fill.cancel(),
            }
            self.render(true, false);
            response = EventResponse::HANDLED;
        }

        if self.view.end_ruler_drag() {
            self.report_view();
        }

        let t = self.selection.pointer_up();
        if self.apply(t) && response == EventResponse::IGNORED {
            response = EventResponse::HANDLED;
        }
        response
    }

    pub fn double_click(&mut self, x: f32, y: f32) -> EventResponse {
        match self.layout.hit_test(x, y, self.selection.cell_range()) {
            PointerTarget::Cell(cell) => {
                let t = self.selection.double_click(cell, &self.grid);
                EventResponse::handled_if(self.apply(t))
            }
            _ => EventResponse::IGNORED,
        }
    }

    // ---- Keyboard ----

    /// Key press while the grid or its edit overlay has focus.
    ///
    /// Clipboard and history shortcuts apply only outside editing; inside
    /// an edit they belong to the overlay input.
    pub fn key_down(&mut self, key: Key, mods: Modifiers) -> EventResponse {
        if mods.command() && !self.selection.is_editing() {
            match key {
                Key::Char('c' | 'C') => {
                    self.copy();
                    return EventResponse::HANDLED;
                }
                Key::Char('v' | 'V') => {
                    self.paste();
                    return EventResponse::HANDLED;
                }
                Key::Char('z' | 'Z') if mods.shift => {
                    self.redo();
                    return EventResponse::HANDLED;
                }
                Key::Char('z' | 'Z') => {
                    self.undo();
                    return EventResponse::HANDLED;
                }
                Key::Char('y' | 'Y') => {
                    self.redo();
                    return EventResponse::HANDLED;
                }
                _ => {}
            }
        }
        let t = self.selection.key_down(key, mods, &self.grid);
        EventResponse::handled_if(self.apply(t))
    }

    // ---- Edit overlay ----

    /// The overlay input's text changed.
    pub fn set_edit_buffer(&mut self, text: &str) {
        self.selection.set_buffer(text);
    }

    /// The overlay input lost focus.
    pub fn blur_edit(&mut self) {
        let t = self.selection.blur();
        self.apply(t);
    }

    pub fn commit_edit(&mut self) {
        let t = self.selection.force_commit();
        self.apply(t);
    }

    pub fn cancel_edit(&mut self) {
        let t = self.selection.cancel_edit();
        self.apply(t);
    }

    pub fn select_cell(&mut self, row: u32, col: u32) {
        let t = self.selection.select_cell(CellCoord::new(row, col), &self.grid);
        self.apply(t);
    }

    // ---- Clipboard ----

    /// Text that a copy of the current selection would place on the
    /// clipboard.
    pub fn selection_text(&self) -> Option<String> {
        let range = self.selection.effective_range(&self.grid)?;
        Some(clipboard::serialize(
            &self.grid,
            range,
            self.config.horizontal_delimiter,
        ))
    }

    /// Copy the selection through the clipboard service. Failures are
    /// reported through status.
    pub fn copy(&mut self) {
        let Some(range) = self.selection.effective_range(&self.grid) else {
            self.report("Nothing selected to copy");
            return;
        };
        let text = clipboard::serialize(&self.grid, range, self.config.horizontal_delimiter);
        match self.hooks.clipboard.write_text(&text) {
            Ok(()) => self.report(&format!(
                "Copied {} × {} cells",
                range.row_count(),
                range.col_count()
            )),
            Err(e) => {
                log::warn!("copy failed: {e}");
                self.report(&format!("Copy failed: {e}"));
            }
        }
    }

    /// Paste from the clipboard service.
    pub fn paste(&mut self) {
        match self.hooks.clipboard.read_text() {
            Ok(text) => {
                self.paste_text(&text);
            }
            Err(e) => {
                log::warn!("paste failed: {e}");
                self.report(&format!("Paste failed: {e}"));
            }
        }
    }

    /// Paste text delivered by the host (e.g. a DOM paste event).
    ///
    /// With a selection, values land at its top-left cell; without one the
    /// dataset is replaced. Returns `None` while an edit is open, since the
    /// overlay input takes the paste itself.
    pub fn paste_text(&mut self, text: &str) -> Option<PasteOutcome> {
        if self.selection.is_editing() {
            return None;
        }
        let rows = clipboard::tokenize(
            text,
            self.config.horizontal_delimiter,
            self.config.secondary_delimiter,
        );
        if rows.is_empty() {
            self.report(&paste_message(PasteOutcome::default(), None));
            return Some(PasteOutcome::default());
        }
        let anchor = self
            .selection
            .effective_range(&self.grid)
            .map(|range| range.top_left());
        let outcome = clipboard::paste(&mut self.grid, anchor, &rows);
        if outcome.replaced {
            self.reset_interaction();
        }
        self.relayout();
        self.render(true, false);
        self.report(&paste_message(outcome, anchor));
        Some(outcome)
    }

    // ---- History ----

    /// Undo hook. No edit history is kept; reports that and returns false.
    pub fn undo(&mut self) -> bool {
        self.report("Undo is not available");
        false
    }

    /// Redo hook. No edit history is kept; reports that and returns false.
    pub fn redo(&mut self) -> bool {
        self.report("Redo is not available");
        false
    }

    // ---- View transform ----

    /// Wheel over the canvas+ruler surface, `pointer` relative to its
    /// container. Returns true if the caller must schedule an animation
    /// frame that ends in [`GridEditor::apply_frame`].
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64, pointer: Point, mods: Modifiers) -> bool {
        self.view.wheel(delta_x, delta_y, pointer, mods.command())
    }

    /// Animation-frame callback: fold pending wheel input into the view.
    pub fn apply_frame(&mut self) {
        if self.view.apply_frame() {
            self.render(false, true);
            self.report_view();
        }
    }

    pub fn ruler_pointer_down(&mut self, pointer: Point) {
        self.view.begin_ruler_drag(pointer);
    }

    /// Pointer-move during a ruler drag; `fine` scales the pan down.
    pub fn ruler_pointer_move(&mut self, pointer: Point, fine: bool) -> EventResponse {
        if !self.view.is_dragging_ruler() {
            return EventResponse::IGNORED;
        }
        if self.view.drag_ruler(pointer, fine) {
            self.render(false, true);
        }
        EventResponse::CAPTURED
    }

    /// Reset zoom and pan.
    pub fn fit(&mut self) {
        self.view.fit();
        self.render(false, true);
        self.report_view();
    }

    // ---- Internals ----

    /// Apply a selection transition. Returns whether the event was consumed.
    fn apply(&mut self, t: Transition) -> bool {
        let mut grid_changed = false;
        let mut grew = false;
        if let Some(commit) = t.commit {
            grid_changed = self
                .grid
                .set_cell(commit.cell.row, commit.cell.col, &commit.text);
        }
        if let Some((rows, cols)) = t.grow_to {
            if self.grid.ensure_capacity(rows, cols) {
                self.relayout();
                self.report_size("Grid expanded to");
                grew = true;
            }
        }
        // Growth changes the table size, so the surface transform is re-applied too
        if t.redraw || grid_changed || grew {
            self.render(true, grew);
        }
        t.consumed
    }

    fn after_growth(&mut self, grew: bool) {
        if grew {
            self.relayout();
            self.render(true, true);
            self.report_size("Grid is now");
        } else {
            self.report_size("Grid limit reached at");
        }
    }

    fn reset_interaction(&mut self) {
        self.selection.clear();
        self.fill.cancel();
    }

    fn relayout(&mut self) {
        self.layout = GridLayout::compute(&self.grid, &self.resizer, &self.config);
    }

    fn render(&self, grid: bool, surface: bool) {
        self.hooks.render.request_render(&RenderRequest {
            grid,
            surface,
            view: self.view.snapshot(),
        });
    }

    fn report(&self, message: &str) {
        log::debug!("status: {message}");
        self.hooks.status.report(message);
    }

    fn report_size(&self, prefix: &str) {
        self.report(&format!(
            "{prefix} {} rows × {} columns",
            self.grid.row_count(),
            self.grid.col_count()
        ));
    }

    fn report_fill(&self, outcome: FillOutcome) {
        self.report(&format!(
            "Filled {} cells {}",
            outcome.cells,
            outcome.direction.describe()
        ));
    }

    fn report_view(&self) {
        let view = self.view.snapshot();
        self.report(&format!(
            "Zoom {:.0}%, pan ({:.0}, {:.0})",
            view.zoom * 100.0,
            view.pan.x,
            view.pan.y
        ));
    }
}

fn paste_message(outcome: PasteOutcome, anchor: Option<CellCoord>) -> String {
    match anchor {
        _ if outcome.replaced => format!(
            "Replaced table with {} rows × {} columns",
            outcome.rows, outcome.cols
        ),
        Some(anchor) => format!(
            "Pasted {} × {} cells at row {}, column {}",
            outcome.rows,
            outcome.cols,
            anchor.row + 1,
            anchor.col + 1
        ),
        None => "Nothing to paste".to_string(),
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
    use std::cell::RefCell;
    use std::rc::Rc;

    fn editor() -> (GridEditor, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let hooks = Hooks {
            status: Box::new(move |m: &str| sink.borrow_mut().push(m.to_string())),
            ..Hooks::silent()
        };
        let mut editor = GridEditor::new(EditorConfig::default(), hooks);
        editor.init_blank(20, 5);
        (editor, log)
    }

    /// Center of a cell in table-content pixels.
    fn at(editor: &GridEditor, row: u32, col: u32) -> (f32, f32) {
        let rect = editor.layout().cell_rect(CellCoord::new(row, col));
        (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }

    #[test]
    fn test_border_drag_is_captured() {
        let (mut editor, log) = editor();
        let y = 10.0;
        let border_x = 40.0 + 100.0;
        let down = editor.pointer_down(border_x, y);
        assert!(down.stop_propagation);
        assert!(editor.pointer_move(border_x + 50.0, y, Modifiers::NONE).stop_propagation);
        assert!(editor.pointer_up().stop_propagation);
        assert_eq!(editor.resizer().width(0), 150.0_f32);
        assert!(log.borrow().last().unwrap().contains("150px"));
    }

    #[test]
    fn test_undo_reports_unavailable() {
        let (mut editor, log) = editor();
        let response = editor.key_down(Key::Char('z'), Modifiers::CTRL);
        assert!(response.prevent_default);
        assert_eq!(log.borrow().last().unwrap(), "Undo is not available");
    }

    #[test]
    fn test_copy_without_clipboard_reports_failure() {
        let (mut editor, log) = editor();
        let (x, y) = at(&editor, 0, 0);
        editor.pointer_down(x, y);
        editor.pointer_up();
        editor.copy();
        assert!(log.borrow().last().unwrap().starts_with("Copy failed"));
    }

    #[test]
    fn test_paste_is_ignored_while_editing() {
        let (mut editor, _) = editor();
        let (x, y) = at(&editor, 1, 1);
        editor.double_click(x, y);
        assert!(editor.paste_text("1\t2").is_none());
        assert_eq!(editor.grid().cell_text(1, 2), "");
    }
}
