//! Recording host fakes for driving `GridEditor` through its public API.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use figgrid::{
    CellCoord, ClipboardService, EditorConfig, FiggridError, GridEditor, Hooks, RenderRequest,
    Result,
};

/// In-memory clipboard. `deny` makes every call fail like a browser that
/// refused clipboard permission.
#[derive(Clone, Default)]
pub struct FakeClipboard {
    pub text: Rc<RefCell<Option<String>>>,
    pub deny: bool,
}

impl ClipboardService for FakeClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        if self.deny {
            return Err(FiggridError::Clipboard("permission denied".into()));
        }
        *self.text.borrow_mut() = Some(text.to_string());
        Ok(())
    }

    fn read_text(&self) -> Result<String> {
        if self.deny {
            return Err(FiggridError::Clipboard("permission denied".into()));
        }
        self.text
            .borrow()
            .clone()
            .ok_or_else(|| FiggridError::Clipboard("clipboard is empty".into()))
    }
}

pub struct Harness {
    pub editor: GridEditor,
    pub status: Rc<RefCell<Vec<String>>>,
    pub renders: Rc<RefCell<Vec<RenderRequest>>>,
    pub clipboard: FakeClipboard,
}

impl Harness {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_clipboard(config, FakeClipboard::default())
    }

    pub fn with_clipboard(config: EditorConfig, clipboard: FakeClipboard) -> Self {
        let status = Rc::new(RefCell::new(Vec::new()));
        let renders = Rc::new(RefCell::new(Vec::new()));
        let status_log = Rc::clone(&status);
        let render_log = Rc::clone(&renders);
        let hooks = Hooks {
            status: Box::new(move |message: &str| {
                status_log.borrow_mut().push(message.to_string());
            }),
            render: Box::new(move |request: &RenderRequest| {
                render_log.borrow_mut().push(*request);
            }),
            clipboard: Box::new(clipboard.clone()),
        };
        Self {
            editor: GridEditor::new(config, hooks),
            status,
            renders,
            clipboard,
        }
    }

    /// Default-configured editor with a blank `rows` x `cols` grid.
    pub fn blank(rows: u32, cols: u32) -> Self {
        let mut harness = Self::new(EditorConfig::default());
        harness.editor.init_blank(rows, cols);
        harness.clear_logs();
        harness
    }

    pub fn clear_logs(&self) {
        self.status.borrow_mut().clear();
        self.renders.borrow_mut().clear();
    }

    pub fn last_status(&self) -> Option<String> {
        self.status.borrow().last().cloned()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.status.borrow().clone()
    }

    /// Center of a cell in table-content pixels.
    pub fn center(&self, row: u32, col: u32) -> (f32, f32) {
        let rect = self.editor.layout().cell_rect(CellCoord::new(row, col));
        (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }

    pub fn text(&self, row: u32, col: u32) -> String {
        self.editor.grid().cell_text(row, col)
    }

    /// Press, drag and release over cells.
    pub fn drag_cells(&mut self, from: (u32, u32), to: (u32, u32)) {
        let (x, y) = self.center(from.0, from.1);
        self.editor.pointer_down(x, y);
        let (x, y) = self.center(to.0, to.1);
        self.editor.pointer_move(x, y, figgrid::selection::Modifiers::NONE);
        self.editor.pointer_up();
    }

    /// Type characters into the focused cell as key presses.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.editor
                .key_down(figgrid::selection::Key::Char(c), figgrid::selection::Modifiers::NONE);
        }
    }
}
