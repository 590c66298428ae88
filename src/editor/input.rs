//! DOM input overlay for in-place cell editing.
//!
//! One `<input>` element inside the table's scroll content, positioned over
//! the editing cell. Its keydown events bubble to the table container, so
//! Enter/Tab/Escape reach the editor with the rest of the keyboard input.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::error::{FiggridError, Result};
use crate::layout::CellRect;

pub(crate) struct InputOverlay {
    input: HtmlInputElement,
    /// Cell rect the input is currently shown at
    shown_at: Option<CellRect>,
}

impl InputOverlay {
    /// Create the (hidden) input as a child of `parent`.
    pub(crate) fn new(document: &Document, parent: &HtmlElement) -> Result<Self> {
        let input = document
            .create_element("input")
            .map_err(|_| FiggridError::Host("cannot create input element".into()))?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| FiggridError::Host("input element has an unexpected type".into()))?;
        input.set_type("text");
        let style = input.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("z-index", "10");
        let _ = style.set_property("box-sizing", "border-box");
        let _ = style.set_property("border", "2px solid #1a73e8");
        let _ = style.set_property("outline", "none");
        let _ = style.set_property("padding", "0 2px");
        let _ = style.set_property(
            "font",
            "13px -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif",
        );
        let _ = style.set_property("background", "#fff");
        let _ = style.set_property("display", "none");
        parent
            .append_child(&input)
            .map_err(|_| FiggridError::Host("cannot attach input element".into()))?;
        Ok(Self {
            input,
            shown_at: None,
        })
    }

    pub(crate) fn element(&self) -> &HtmlInputElement {
        &self.input
    }

    pub(crate) fn is_shown(&self) -> bool {
        self.shown_at.is_some()
    }

    /// Show the input over `rect` (table-content pixels) with `text`,
    /// focused with the caret at the end. No-op if already shown there.
    pub(crate) fn show(&mut self, rect: CellRect, text: &str) {
        if self.shown_at == Some(rect) {
            return;
        }
        let style = self.input.style();
        let _ = style.set_property("display", "block");
        let _ = style.set_property("left", &format!("{}px", rect.x));
        let _ = style.set_property("top", &format!("{}px", rect.y));
        let _ = style.set_property("width", &format!("{}px", rect.width));
        let _ = style.set_property("height", &format!("{}px", rect.height));

        if self.shown_at.is_none() {
            self.input.set_value(text);
            let _ = self.input.focus();
            let end = u32::try_from(text.encode_utf16().count()).unwrap_or(u32::MAX);
            let _ = self.input.set_selection_range(end, end);
        }
        self.shown_at = Some(rect);
    }

    /// Hide the input. Its blur event fires synchronously, so callers must
    /// not hold a borrow of the editor here.
    pub(crate) fn hide(&mut self) {
        if self.shown_at.take().is_none() {
            return;
        }
        let _ = self.input.style().set_property("display", "none");
        let _ = self.input.blur();
    }
}

impl Drop for InputOverlay {
    fn drop(&mut self) {
        if let Some(parent) = self.input.parent_node() {
            let _ = parent.remove_child(&self.input);
        }
    }
}
