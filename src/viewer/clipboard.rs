//! Browser clipboard for `FigureGrid`.
//!
//! Writes go through the async `navigator.clipboard` API; the outcome of the
//! promise is reported through the status callback once it settles. Reads
//! cannot be synchronous in a browser, so pasted text arrives through the
//! DOM `paste` event instead (see [`paste_event_text`]).

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::ClipboardEvent;

use super::Callbacks;
use crate::error::{FiggridError, Result};
use crate::host::ClipboardService;

pub(crate) struct BrowserClipboard {
    callbacks: Rc<RefCell<Callbacks>>,
}

impl BrowserClipboard {
    pub(crate) fn new(callbacks: Rc<RefCell<Callbacks>>) -> Self {
        Self { callbacks }
    }
}

impl ClipboardService for BrowserClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let window = web_sys::window()
            .ok_or_else(|| FiggridError::Clipboard("no window".into()))?;
        let promise = window.navigator().clipboard().write_text(text);
        let callbacks = Rc::clone(&self.callbacks);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                let reason = e.as_string().unwrap_or_else(|| format!("{e:?}"));
                log::warn!("clipboard write rejected: {reason}");
                let status = callbacks.borrow().status.clone();
                if let Some(status) = status {
                    let message = JsValue::from_str(&format!("Copy failed: {reason}"));
                    let _ = status.call1(&JsValue::NULL, &message);
                }
            }
        });
        Ok(())
    }

    fn read_text(&self) -> Result<String> {
        Err(FiggridError::Clipboard(
            "clipboard text is only available through the paste event".into(),
        ))
    }
}

/// Plain-text payload of a paste event.
pub(crate) fn paste_event_text(event: &ClipboardEvent) -> Option<String> {
    event.clipboard_data()?.get_data("text/plain").ok()
}
