//! Capabilities the host environment injects into the editor.
//!
//! The editor never reaches for globals: status text, render invalidation
//! and the clipboard all go through these traits, handed over once at
//! construction.

use crate::error::Result;
use crate::layout::ViewSnapshot;

/// Receives human-readable status text after visible state changes.
pub trait StatusSink {
    fn report(&self, message: &str);
}

impl<F: Fn(&str)> StatusSink for F {
    fn report(&self, message: &str) {
        self(message);
    }
}

/// What needs redrawing after an operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    /// The table (cells, headers, selection overlay) changed
    pub grid: bool,
    /// The canvas + ruler surface changed
    pub surface: bool,
    /// Current zoom/pan, to be applied to the shared container
    pub view: ViewSnapshot,
}

/// Receives invalidation requests; the editor itself never draws.
pub trait RenderSink {
    fn request_render(&self, request: &RenderRequest);
}

impl<F: Fn(&RenderRequest)> RenderSink for F {
    fn request_render(&self, request: &RenderRequest) {
        self(request);
    }
}

/// Read/write access to the system clipboard.
///
/// Failures are recoverable: the editor reports them and carries on.
pub trait ClipboardService {
    /// # Errors
    /// Returns [`crate::FiggridError::Clipboard`] if the host denies the write.
    fn write_text(&self, text: &str) -> Result<()>;

    /// # Errors
    /// Returns [`crate::FiggridError::Clipboard`] if the host cannot provide text.
    fn read_text(&self) -> Result<String>;
}

/// Host capabilities bundled for [`crate::GridEditor::new`].
pub struct Hooks {
    pub status: Box<dyn StatusSink>,
    pub render: Box<dyn RenderSink>,
    pub clipboard: Box<dyn ClipboardService>,
}

/// Clipboard that is never available. Used when the host offers none.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl ClipboardService for NoClipboard {
    fn write_text(&self, _text: &str) -> Result<()> {
        Err(crate::FiggridError::Clipboard("no clipboard in this environment".into()))
    }

    fn read_text(&self) -> Result<String> {
        Err(crate::FiggridError::Clipboard("no clipboard in this environment".into()))
    }
}

impl Hooks {
    /// Hooks that discard status and render requests.
    pub fn silent() -> Self {
        Self {
            status: Box::new(|_: &str| {}),
            render: Box::new(|_: &RenderRequest| {}),
            clipboard: Box::new(NoClipboard),
        }
    }
}
