//! Selection and in-place editing state machine.
//!
//! States and transitions:
//!
//! | from                  | event                                   | to               |
//! |-----------------------|-----------------------------------------|------------------|
//! | any                   | pointer-down on cell                    | `SelectingCells` |
//! | any                   | pointer-down on column / row header     | `SelectingColumns` / `SelectingRows` |
//! | `Selecting*`          | pointer-move                            | same (extends)   |
//! | `Selecting*`          | pointer-up (global)                     | `Idle`           |
//! | not editing           | double-click, printable key, Backspace, Delete, F2 | `Editing` |
//! | `Editing`             | Escape (discard), Enter, Tab, F2, blur (commit) | `Idle`   |
//!
//! Leaving `Editing` other than by Escape yields a [`CommittedEdit`]; the
//! controller never writes to the grid itself. Every entry point returns a
//! [`Transition`] describing what the caller has to apply.

mod keys;

pub use keys::{Key, Modifiers};

use crate::grid::GridModel;
use crate::types::{CellCoord, CellRange, HeaderAxis, HeaderSpan, SelectionRange};

/// Interaction state of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Dragging out a cell rectangle
    SelectingCells,
    /// Dragging across column headers
    SelectingColumns,
    /// Dragging across row headers
    SelectingRows,
    /// A cell's overlay input is open
    Editing,
}

/// An open in-place edit: the cell flagged as editing and its buffered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub cell: CellCoord,
    pub buffer: String,
}

/// Text to write into a cell when an edit is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedEdit {
    pub cell: CellCoord,
    pub text: String,
}

/// Effects of one input event, applied by the caller in order:
/// commit, then growth, then redraw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transition {
    /// Edit to write through `GridModel::set_cell`
    pub commit: Option<CommittedEdit>,
    /// Rows and columns the grid must grow to (`ensure_capacity`)
    pub grow_to: Option<(u32, u32)>,
    /// Selection or edit visuals changed
    pub redraw: bool,
    /// The event was handled and its default action should be suppressed
    pub consumed: bool,
    /// An edit overlay must be opened over this cell
    pub edit_started: Option<CellCoord>,
    /// The edit overlay must be closed
    pub edit_ended: bool,
}

impl Transition {
    fn none() -> Self {
        Self::default()
    }

    fn redraw() -> Self {
        Self {
            redraw: true,
            consumed: true,
            ..Self::default()
        }
    }

    /// Fold a later transition into this one.
    fn then(mut self, other: Self) -> Self {
        self.commit = other.commit.or(self.commit);
        self.grow_to = other.grow_to.or(self.grow_to);
        self.redraw |= other.redraw;
        self.consumed |= other.consumed;
        self.edit_started = other.edit_started.or(self.edit_started);
        self.edit_ended |= other.edit_ended;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: InteractionState,
    range: Option<SelectionRange>,
    header: Option<HeaderSpan>,
    focus: Option<CellCoord>,
    edit: Option<EditSession>,
}

fn last_index(count: u32) -> u32 {
    count.saturating_sub(1)
}

fn clamp_to_grid(cell: CellCoord, grid: &GridModel) -> CellCoord {
    CellCoord::new(
        cell.row.min(last_index(grid.row_count())),
        cell.col.min(last_index(grid.col_count())),
    )
}

fn offset(value: u32, delta: i64, count: u32) -> Option<u32> {
    let next = i64::from(value) + delta;
    if next < 0 || next >= i64::from(count) {
        return None;
    }
    u32::try_from(next).ok()
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Live cell selection, if any
    pub fn range(&self) -> Option<SelectionRange> {
        self.range
    }

    /// Live column/row-only selection, if any
    pub fn header(&self) -> Option<HeaderSpan> {
        self.header
    }

    /// Cell with keyboard focus
    pub fn focus(&self) -> Option<CellCoord> {
        self.focus
    }

    pub fn edit(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn is_editing_cell(&self, cell: CellCoord) -> bool {
        self.edit.as_ref().is_some_and(|e| e.cell == cell)
    }

    /// Normalized cell rectangle (cell selections only)
    pub fn cell_range(&self) -> Option<CellRange> {
        self.range.map(|r| r.bounds())
    }

    /// Rectangle covered by the live selection of either kind.
    pub fn effective_range(&self, grid: &GridModel) -> Option<CellRange> {
        if grid.is_empty() {
            return None;
        }
        if let Some(range) = self.range {
            return Some(range.bounds());
        }
        self.header
            .map(|span| span.to_range(grid.row_count(), grid.col_count()))
    }

    pub fn is_selected(&self, cell: CellCoord, grid: &GridModel) -> bool {
        self.effective_range(grid)
            .is_some_and(|range| range.contains(cell))
    }

    /// Drop every selection and any open edit without committing.
    /// Used when the dataset is replaced wholesale.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Select a single cell, as if clicked (no drag).
    pub fn select_cell(&mut self, cell: CellCoord, grid: &GridModel) -> Transition {
        let t = self.pointer_down_cell(cell, grid);
        self.state = InteractionState::Idle;
        t
    }

    /// Select a rectangle directly.
    pub fn select_range(&mut self, range: SelectionRange, grid: &GridModel) -> Transition {
        if grid.is_empty() {
            return Transition::none();
        }
        let t = self.force_commit();
        let anchor = clamp_to_grid(range.anchor, grid);
        let active = clamp_to_grid(range.active, grid);
        self.range = Some(SelectionRange { anchor, active });
        self.header = None;
        self.focus = Some(anchor);
        self.state = InteractionState::Idle;
        t.then(Transition::redraw())
    }

    /// Select the whole grid (corner header, Ctrl/Cmd+A).
    pub fn select_all(&mut self, grid: &GridModel) -> Transition {
        let range = SelectionRange {
            anchor: CellCoord::new(0, 0),
            active: CellCoord::new(last_index(grid.row_count()), last_index(grid.col_count())),
        };
        self.select_range(range, grid)
    }

    /// Pointer-down over a data cell: commit any open edit, then start a new
    /// cell selection, discarding any previous one.
    pub fn pointer_down_cell(&mut self, cell: CellCoord, grid: &GridModel) -> Transition {
        if grid.is_empty() {
            return Transition::none();
        }
        let t = self.force_commit();
        let cell = clamp_to_grid(cell, grid);
        self.range = Some(SelectionRange::at(cell));
        self.header = None;
        self.focus = Some(cell);
        self.state = InteractionState::SelectingCells;
        t.then(Transition::redraw())
    }

    /// Pointer-down over a column or row header: start a header-only
    /// selection, discarding any cell selection and previous span.
    pub fn pointer_down_header(
        &mut self,
        axis: HeaderAxis,
        index: u32,
        grid: &GridModel,
    ) -> Transition {
        if grid.is_empty() {
            return Transition::none();
        }
        let t = self.force_commit();
        let (index, focus, state) = match axis {
            HeaderAxis::Columns => {
                let col = index.min(last_index(grid.col_count()));
                (col, CellCoord::new(0, col), InteractionState::SelectingColumns)
            }
            HeaderAxis::Rows => {
                let row = index.min(last_index(grid.row_count()));
                (row, CellCoord::new(row, 0), InteractionState::SelectingRows)
            }
        };
        self.range = None;
        self.header = Some(HeaderSpan::new(axis, index));
        self.focus = Some(focus);
        self.state = state;
        t.then(Transition::redraw())
    }

    /// Pointer-move with the primary button held.
    ///
    /// `cell` may lie past the grid's edges. Without `grow` it is clamped to
    /// the grid; with `grow` (Ctrl/Cmd held during a cell drag) the grid is
    /// asked to grow to cover it, up to its hard bounds.
    pub fn pointer_move(&mut self, cell: CellCoord, grow: bool, grid: &GridModel) -> Transition {
        match self.state {
            InteractionState::SelectingCells => {
                let Some(range) = self.range.as_mut() else {
                    return Transition::none();
                };
                let mut t = Transition::none();
                let target = if grow {
                    let bounds = grid.bounds();
                    let target = CellCoord::new(
                        cell.row.min(last_index(bounds.max_rows)),
                        cell.col.min(last_index(bounds.max_cols)),
                    );
                    let (rows, cols) = (target.row + 1, target.col + 1);
                    if rows > grid.row_count() || cols > grid.col_count() {
                        t.grow_to = Some((rows.max(grid.row_count()), cols.max(grid.col_count())));
                    }
                    target
                } else {
                    clamp_to_grid(cell, grid)
                };
                if range.active != target {
                    range.active = target;
                    t.redraw = true;
                }
                t.consumed = true;
                t
            }
            InteractionState::SelectingColumns | InteractionState::SelectingRows => {
                let Some(span) = self.header.as_mut() else {
                    return Transition::none();
                };
                let end = match span.axis {
                    HeaderAxis::Columns => cell.col.min(last_index(grid.col_count())),
                    HeaderAxis::Rows => cell.row.min(last_index(grid.row_count())),
                };
                if span.end == end {
                    return Transition::none();
                }
                span.end = end;
                Transition::redraw()
            }
            InteractionState::Idle | InteractionState::Editing => Transition::none(),
        }
    }

    /// Pointer released anywhere in the document.
    pub fn pointer_up(&mut self) -> Transition {
        match self.state {
            InteractionState::SelectingCells
            | InteractionState::SelectingColumns
            | InteractionState::SelectingRows => {
                self.state = InteractionState::Idle;
                Transition {
                    consumed: true,
                    ..Transition::default()
                }
            }
            InteractionState::Idle | InteractionState::Editing => Transition::none(),
        }
    }

    /// Double-click on a cell opens an edit seeded with its current text.
    pub fn double_click(&mut self, cell: CellCoord, grid: &GridModel) -> Transition {
        if grid.is_empty() {
            return Transition::none();
        }
        let cell = clamp_to_grid(cell, grid);
        let t = if self.focus == Some(cell) && !self.is_editing() {
            Transition::none()
        } else {
            self.select_cell(cell, grid)
        };
        self.state = InteractionState::Idle;
        t.then(self.begin_edit(cell, grid.cell_text(cell.row, cell.col)))
    }

    /// Replace the edit buffer with the overlay input's current text.
    pub fn set_buffer(&mut self, text: &str) {
        if let Some(edit) = self.edit.as_mut() {
            text.clone_into(&mut edit.buffer);
        }
    }

    /// The edit overlay lost focus: commit in place.
    pub fn blur(&mut self) -> Transition {
        self.force_commit()
    }

    /// Commit any open edit, keeping the selection where it is.
    pub fn force_commit(&mut self) -> Transition {
        let Some(edit) = self.edit.take() else {
            return Transition::none();
        };
        self.state = InteractionState::Idle;
        log::debug!("commit edit at ({}, {})", edit.cell.row, edit.cell.col);
        Transition {
            commit: Some(CommittedEdit {
                cell: edit.cell,
                text: edit.buffer,
            }),
            redraw: true,
            consumed: true,
            edit_ended: true,
            ..Transition::default()
        }
    }

    /// Discard any open edit and return focus to its cell.
    pub fn cancel_edit(&mut self) -> Transition {
        let Some(edit) = self.edit.take() else {
            return Transition::none();
        };
        self.state = InteractionState::Idle;
        self.focus = Some(edit.cell);
        Transition {
            redraw: true,
            consumed: true,
            edit_ended: true,
            ..Transition::default()
        }
    }

    /// Keyboard input while the grid (or its edit overlay) has focus.
    pub fn key_down(&mut self, key: Key, mods: Modifiers, grid: &GridModel) -> Transition {
        if self.is_editing() {
            return self.key_down_editing(key, mods, grid);
        }
        let Some(focus) = self.focus else {
            return Transition::none();
        };
        if grid.is_empty() {
            return Transition::none();
        }
        match key {
            Key::Char('a' | 'A') if mods.command() => self.select_all(grid),
            Key::Char(c) if !mods.command() && !mods.alt => {
                let mut text = grid.cell_text(focus.row, focus.col);
                text.push(c);
                self.begin_edit(focus, text)
            }
            Key::Backspace | Key::Delete => self.begin_edit(focus, String::new()),
            Key::F2 => self.begin_edit(focus, grid.cell_text(focus.row, focus.col)),
            Key::Enter => {
                let delta = if mods.shift { -1 } else { 1 };
                self.move_focus(delta, 0, false, grid)
            }
            Key::Tab => self.tab_move(mods.shift, grid),
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
                let Some((dr, dc)) = key.arrow_delta() else {
                    return Transition::none();
                };
                self.move_focus(dr, dc, mods.shift, grid)
            }
            Key::Char(_) | Key::Escape | Key::Other => Transition::none(),
        }
    }

    fn key_down_editing(&mut self, key: Key, mods: Modifiers, grid: &GridModel) -> Transition {
        match key {
            Key::Escape => self.cancel_edit(),
            Key::Enter => {
                let delta = if mods.shift { -1 } else { 1 };
                let t = self.force_commit();
                let moved = self.move_focus(delta, 0, false, grid);
                t.then(moved)
            }
            Key::Tab => {
                let t = self.force_commit();
                let moved = self.tab_move(mods.shift, grid);
                t.then(moved)
            }
            Key::F2 => self.force_commit(),
            // Everything else belongs to the overlay input; mirror simple
            // edits so the buffer stays current between input events.
            Key::Char(c) if !mods.command() => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.buffer.push(c);
                }
                Transition::none()
            }
            Key::Backspace => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.buffer.pop();
                }
                Transition::none()
            }
            _ => Transition::none(),
        }
    }

    fn begin_edit(&mut self, cell: CellCoord, text: String) -> Transition {
        self.edit = Some(EditSession { cell, buffer: text });
        self.focus = Some(cell);
        self.state = InteractionState::Editing;
        Transition {
            redraw: true,
            consumed: true,
            edit_started: Some(cell),
            ..Transition::default()
        }
    }

    /// Move keyboard focus by one step; with `extend`, move the selection's
    /// active corner instead. A step off the grid's edge is a no-op.
    fn move_focus(&mut self, dr: i64, dc: i64, extend: bool, grid: &GridModel) -> Transition {
        let Some(focus) = self.focus else {
            return Transition::none();
        };
        let base = match (extend, self.range) {
            (true, Some(range)) => range.active,
            _ => focus,
        };
        let (Some(row), Some(col)) = (
            offset(base.row, dr, grid.row_count()),
            offset(base.col, dc, grid.col_count()),
        ) else {
            return Transition {
                consumed: true,
                ..Transition::default()
            };
        };
        let next = CellCoord::new(row, col);
        if extend {
            let anchor = self.range.map_or(focus, |r| r.anchor);
            self.range = Some(SelectionRange {
                anchor,
                active: next,
            });
            self.header = None;
        } else {
            self.range = Some(SelectionRange::at(next));
            self.header = None;
            self.focus = Some(next);
        }
        Transition::redraw()
    }

    /// Tab / Shift+Tab: move one column, wrapping across row ends.
    fn tab_move(&mut self, backwards: bool, grid: &GridModel) -> Transition {
        let Some(focus) = self.focus else {
            return Transition::none();
        };
        let (rows, cols) = (grid.row_count(), grid.col_count());
        let next = if backwards {
            if focus.col > 0 {
                Some(CellCoord::new(focus.row, focus.col - 1))
            } else if focus.row > 0 {
                Some(CellCoord::new(focus.row - 1, last_index(cols)))
            } else {
                None
            }
        } else if focus.col + 1 < cols {
            Some(CellCoord::new(focus.row, focus.col + 1))
        } else if focus.row + 1 < rows {
            Some(CellCoord::new(focus.row + 1, 0))
        } else {
            None
        };
        let Some(next) = next else {
            return Transition {
                consumed: true,
                ..Transition::default()
            };
        };
        self.range = Some(SelectionRange::at(next));
        self.header = None;
        self.focus = Some(next);
        Transition::redraw()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn grid(rows: u32, cols: u32) -> GridModel {
        let mut grid = GridModel::default();
        grid.init_blank(rows, cols);
        grid
    }

    fn cell(row: u32, col: u32) -> CellCoord {
        CellCoord::new(row, col)
    }

    #[test]
    fn test_drag_extends_active_only() {
        let g = grid(20, 5);
        let mut sel = SelectionController::new();
        sel.pointer_down_cell(cell(3, 3), &g);
        assert_eq!(sel.state(), InteractionState::SelectingCells);
        let t = sel.pointer_move(cell(1, 0), false, &g);
        assert!(t.redraw);
        let range = sel.range().unwrap();
        assert_eq!(range.anchor, cell(3, 3));
        assert_eq!(range.active, cell(1, 0));
        assert_eq!(
            sel.cell_range().unwrap(),
            CellRange {
                top: 1,
                left: 0,
                bottom: 3,
                right: 3
            }
        );
        sel.pointer_up();
        assert_eq!(sel.state(), InteractionState::Idle);
        // Moves after release do nothing
        assert_eq!(sel.pointer_move(cell(5, 4), false, &g), Transition::none());
    }

    #[test]
    fn test_drag_clamps_without_modifier() {
        let g = grid(20, 5);
        let mut sel = SelectionController::new();
        sel.pointer_down_cell(cell(0, 0), &g);
        let t = sel.pointer_move(cell(40, 9), false, &g);
        assert_eq!(t.grow_to, None);
        assert_eq!(sel.range().unwrap().active, cell(19, 4));
    }

    #[test]
    fn test_command_drag_requests_growth() {
        let g = grid(20, 5);
        let mut sel = SelectionController::new();
        sel.pointer_down_cell(cell(0, 0), &g);
        let t = sel.pointer_move(cell(24, 2), true, &g);
        assert_eq!(t.grow_to, Some((25, 5)));
        assert_eq!(sel.range().unwrap().active, cell(24, 2));
    }

    #[test]
    fn test_new_selection_commits_open_edit() {
        let g = grid(20, 5);
        let mut sel = SelectionController::new();
        sel.double_click(cell(2, 2), &g);
        sel.set_buffer("hello");
        let t = sel.pointer_down_cell(cell(4, 4), &g);
        assert_eq!(
            t.commit,
            Some(CommittedEdit {
                cell: cell(2, 2),
                text: "hello".into()
            })
        );
        assert!(t.edit_ended);
        assert!(!sel.is_editing());
        assert_eq!(sel.focus(), Some(cell(4, 4)));
    }

    #[test]
    fn test_header_selection_clears_cells() {
        let g = grid(20, 5);
        let mut sel = SelectionController::new();
        sel.pointer_down_cell(cell(1, 1), &g);
        sel.pointer_up();
        sel.pointer_down_header(HeaderAxis::Columns, 1, &g);
        assert_eq!(sel.state(), InteractionState::SelectingColumns);
        assert!(sel.range().is_none());
        sel.pointer_move(cell(7, 3), false, &g);
        sel.pointer_up();
        let span = sel.header().unwrap();
        assert_eq!(span.bounds(), (1, 3));
        let range = sel.effective_range(&g).unwrap();
        assert_eq!((range.top, range.bottom), (0, 19));
        assert!(sel.is_selected(cell(19, 2), &g));
        assert!(!sel.is_selected(cell(0, 4), &g));

        // A cell pointer-down discards the span
        sel.pointer_down_cell(cell(0, 0), &g);
        assert!(sel.header().is_none());
    }

    #[test]
    fn test_typing_appends_and_backspace_clears() {
        let mut g = grid(20, 5);
        g.set_cell(0, 0, "12");
        let mut sel = SelectionController::new();
        sel.select_cell(cell(0, 0), &g);

        let t = sel.key_down(Key::Char('3'), Modifiers::NONE, &g);
        assert_eq!(t.edit_started, Some(cell(0, 0)));
        assert_eq!(sel.edit().unwrap().buffer, "123");
        sel.cancel_edit();

        sel.key_down(Key::Backspace, Modifiers::NONE, &g);
        assert_eq!(sel.state(), InteractionState::Editing);
        assert_eq!(sel.edit().unwrap().buffer, "");
    }

    #[test]
    fn test_escape_discards() {
        let g = grid(20, 5);
        let mut sel = SelectionController::new();
        sel.double_click(cell(1, 1), &g);
        sel.set_buffer("draft");
        let t = sel.key_down(Key::Escape, Modifiers::NONE, &g);
        assert_eq!(t.commit, None);
        assert!(t.edit_ended);
        assert_eq!(sel.focus(), Some(cell(1, 1)));
        assert_eq!(sel.state(), InteractionState::Idle);
    }

    #[test_case(Key::Enter, Modifiers::NONE, cell(3, 2) ; "enter moves down")]
    #[test_case(Key::Enter, Modifiers::SHIFT, cell(1, 2) ; "shift enter moves up")]
    #[test_case(Key::Tab, Modifiers::NONE, cell(2, 3) ; "tab moves right")]
    #[test_case(Key::Tab, Modifiers::SHIFT, cell(2, 1) ; "shift tab moves left")]
    #[test_case(Key::F2, Modifiers::NONE, cell(2, 2) ; "f2 stays")]
    fn test_commit_and_move(key: Key, mods: Modifiers, expected: CellCoord) {
        let g = grid(20, 5);
        let mut sel = SelectionController::new();
        sel.double_click(cell(2, 2), &g);
        sel.set_buffer("v");
        let t = sel.key_down(key, mods, &g);
        assert_eq!(t.commit.unwrap().cell, cell(2, 2));
        assert_eq!(sel.focus(), Some(expected));
        assert!(!sel.is_editing());
    }

    #[test_case(cell(0, 4), false, Some(cell(1, 0)) ; "tab wraps to next row")]
    #[test_case(cell(1, 0), true, Some(cell(0, 4)) ; "shift tab wraps to previous row")]
    #[test_case(cell(19, 4), false, None ; "tab at last cell stays")]
    #[test_case(cell(0, 0), true, None ; "shift tab at first cell stays")]
    fn test_tab_wrap(start: CellCoord, backwards: bool, expected: Option<CellCoord>) {
        let g = grid(20, 5);
        let mut sel = SelectionController::new();
        sel.select_cell(start, &g);
        let mods = if backwards {
            Modifiers::SHIFT
        } else {
            Modifiers::NONE
        };
        sel.key_down(Key::Tab, mods, &g);
        assert_eq!(sel.focus(), Some(expected.unwrap_or(start)));
    }

    #[test]
    fn test_blur_commits_in_place() {
        let g = grid(20, 5);
        let mut sel = SelectionController::new();
        sel.double_click(cell(5, 1), &g);
        sel.set_buffer("x");
        let t = sel.blur();
        assert_eq!(t.commit.unwrap().cell, cell(5, 1));
        assert_eq!(sel.focus(), Some(cell(5, 1)));
        assert_eq!(sel.blur(), Transition::none());
    }

    #[test]
    fn test_arrow_at_edge_is_noop() {
        let g = grid(20, 5);
        let mut sel = SelectionController::new();
        sel.select_cell(cell(0, 0), &g);
        let t = sel.key_down(Key::ArrowUp, Modifiers::NONE, &g);
        assert!(!t.redraw);
        assert_eq!(sel.focus(), Some(cell(0, 0)));
        sel.key_down(Key::ArrowRight, Modifiers::NONE, &g);
        assert_eq!(sel.focus(), Some(cell(0, 1)));
    }

    #[test]
    fn test_shift_arrow_extends() {
        let g = grid(20, 5);
        let mut sel = SelectionController::new();
        sel.select_cell(cell(2, 2), &g);
        sel.key_down(Key::ArrowDown, Modifiers::SHIFT, &g);
        sel.key_down(Key::ArrowRight, Modifiers::SHIFT, &g);
        let range = sel.range().unwrap();
        assert_eq!(range.anchor, cell(2, 2));
        assert_eq!(range.active, cell(3, 3));
        assert_eq!(sel.focus(), Some(cell(2, 2)));
    }

    #[test]
    fn test_select_all() {
        let g = grid(20, 5);
        let mut sel = SelectionController::new();
        sel.select_cell(cell(4, 4), &g);
        sel.key_down(Key::Char('a'), Modifiers::CTRL, &g);
        assert_eq!(
            sel.cell_range().unwrap(),
            CellRange {
                top: 0,
                left: 0,
                bottom: 19,
                right: 4
            }
        );
        assert!(!sel.is_editing());
    }

    #[test]
    fn test_empty_grid_ignores_input() {
        let g = GridModel::default();
        let mut sel = SelectionController::new();
        assert_eq!(sel.pointer_down_cell(cell(0, 0), &g), Transition::none());
        assert_eq!(
            sel.key_down(Key::Char('x'), Modifiers::NONE, &g),
            Transition::none()
        );
    }
}
