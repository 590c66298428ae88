//! `FigureGrid`: the WASM-exported binding around [`GridEditor`].
//!
//! This module handles:
//! - DOM setup (scroll container, sticky table canvas, edit input)
//! - Event wiring (pointer, keyboard, paste, wheel, ruler drag)
//! - Animation-frame coalescing of wheel input
//! - Delivering status text and render requests to JS callbacks
//!
//! The editor's host hooks never call into JS directly. They queue into an
//! [`Outbox`] that is drained by [`flush`] once the editor borrow has been
//! released, so a JS callback may safely call back into `FigureGrid`.

mod clipboard;
mod events;
mod logging;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlDivElement, HtmlElement};

use crate::config::EditorConfig;
use crate::editor::input::InputOverlay;
use crate::editor::GridEditor;
use crate::error::{FiggridError, Result};
use crate::host::{Hooks, RenderRequest};
use crate::layout::ViewSnapshot;
use crate::render::painter::{TablePainter, Viewport};
use crate::types::Dataset;

use clipboard::BrowserClipboard;
use events::Listener;

/// Work queued by the editor's hooks, drained by [`flush`].
#[derive(Debug, Default)]
pub(crate) struct Outbox {
    grid: bool,
    surface: bool,
    view: Option<ViewSnapshot>,
    status: Vec<String>,
}

/// JS callbacks registered by the host.
#[derive(Default)]
pub(crate) struct Callbacks {
    pub(crate) status: Option<Function>,
    pub(crate) render: Option<Function>,
}

/// Payload of the render callback.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderNotice {
    grid: bool,
    surface: bool,
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    transform: String,
}

/// The canvas + ruler surface sharing one view transform.
pub(crate) struct Surface {
    /// Element receiving wheel input; pointer positions are relative to it
    pub(crate) stage: HtmlElement,
    /// Container of the ruler overlay and the canvas; the transform target
    pub(crate) container: HtmlElement,
}

pub(crate) struct Inner {
    pub(crate) editor: RefCell<GridEditor>,
    pub(crate) outbox: Rc<RefCell<Outbox>>,
    pub(crate) callbacks: Rc<RefCell<Callbacks>>,
    pub(crate) painter: TablePainter,
    pub(crate) overlay: RefCell<InputOverlay>,
    /// Scroll container the host handed us
    pub(crate) container: HtmlElement,
    /// Scroll content, sized to the table
    pub(crate) spacer: HtmlDivElement,
    pub(crate) surface: RefCell<Option<Surface>>,
    /// Animation-frame callback while a frame is pending
    pub(crate) frame: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Inner {
    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_x: f64::from(self.container.scroll_left()),
            scroll_y: f64::from(self.container.scroll_top()),
            width: f64::from(self.container.client_width().max(1)),
            height: f64::from(self.container.client_height().max(1)),
        }
    }

    /// Queue a full table repaint.
    pub(crate) fn invalidate(&self) {
        self.outbox.borrow_mut().grid = true;
    }
}

/// Deliver everything the editor queued: repaint, overlay input sync,
/// surface transform, then the JS callbacks.
pub(crate) fn flush(inner: &Inner) {
    let pending = std::mem::take(&mut *inner.outbox.borrow_mut());

    let wanted_overlay = {
        let Ok(editor) = inner.editor.try_borrow() else {
            // Flushed again by the owning handler once the borrow ends
            *inner.outbox.borrow_mut() = pending;
            return;
        };
        if pending.grid {
            let viewport = inner.viewport();
            let (w, h) = editor.content_size();
            let style = inner.spacer.style();
            let _ = style.set_property("width", &format!("{}px", f64::from(w).max(viewport.width)));
            let _ = style.set_property("height", &format!("{}px", f64::from(h).max(viewport.height)));
            inner.painter.paint(&editor, viewport);
        }
        editor
            .edit_overlay()
            .map(|(rect, text)| (rect, text.to_string()))
    };

    if let Ok(mut overlay) = inner.overlay.try_borrow_mut() {
        match wanted_overlay {
            Some((rect, text)) => overlay.show(rect, &text),
            None if overlay.is_shown() => {
                overlay.hide();
                let _ = inner.container.focus();
            }
            None => {}
        }
    }

    if let Some(view) = pending.view.filter(|_| pending.surface) {
        if let Some(surface) = inner.surface.borrow().as_ref() {
            let style = surface.container.style();
            let _ = style.set_property("transform-origin", "0 0");
            let _ = style.set_property("transform", &view.css_transform());
        }
    }

    let (status, render) = {
        let callbacks = inner.callbacks.borrow();
        (callbacks.status.clone(), callbacks.render.clone())
    };
    if let Some(status) = status {
        for message in &pending.status {
            let _ = status.call1(&JsValue::NULL, &JsValue::from_str(message));
        }
    }
    if pending.grid || pending.surface {
        if let (Some(render), Some(view)) = (render, pending.view) {
            let notice = RenderNotice {
                grid: pending.grid,
                surface: pending.surface,
                zoom: view.zoom,
                pan_x: view.pan.x,
                pan_y: view.pan.y,
                transform: view.css_transform(),
            };
            if let Ok(value) = serde_wasm_bindgen::to_value(&notice) {
                let _ = render.call1(&JsValue::NULL, &value);
            }
        }
    }
}

fn host_error(context: &str) -> impl Fn(JsValue) -> FiggridError + '_ {
    move |_| FiggridError::Host(format!("{context} failed"))
}

/// The interactive data grid exported to JavaScript.
///
/// Event handlers are registered on construction; the host only supplies
/// the container element and, optionally, the canvas + ruler surface.
#[wasm_bindgen]
pub struct FigureGrid {
    inner: Rc<Inner>,
    #[allow(dead_code)] // Kept to keep the DOM listeners alive
    listeners: Vec<Listener>,
    #[allow(dead_code)]
    surface_listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl FigureGrid {
    /// Create a grid inside `container` (an empty block element).
    ///
    /// `config` is an optional `EditorConfig`-shaped object; omitted fields
    /// keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, config: JsValue) -> std::result::Result<FigureGrid, JsValue> {
        console_error_panic_hook::set_once();
        let config = Self::parse_config(config)?;
        Ok(Self::build(container, config)?)
    }

    fn parse_config(value: JsValue) -> Result<EditorConfig> {
        if value.is_undefined() || value.is_null() {
            return Ok(EditorConfig::default());
        }
        let config: EditorConfig = serde_wasm_bindgen::from_value(value)
            .map_err(|e| FiggridError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn build(container: HtmlElement, config: EditorConfig) -> Result<FigureGrid> {
        let window = web_sys::window().ok_or_else(|| FiggridError::Host("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| FiggridError::Host("no document".into()))?;

        let style = container.style();
        let _ = style.set_property("overflow", "auto");
        let _ = style.set_property("position", "relative");
        let _ = style.set_property("outline", "none");
        container.set_tab_index(0);

        let spacer = document
            .create_element("div")
            .map_err(host_error("createElement(div)"))?
            .dyn_into::<HtmlDivElement>()
            .map_err(|_| FiggridError::Host("div has an unexpected type".into()))?;
        let _ = spacer.style().set_property("position", "relative");
        let canvas = document
            .create_element("canvas")
            .map_err(host_error("createElement(canvas)"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FiggridError::Host("canvas has an unexpected type".into()))?;
        let canvas_style = canvas.style();
        let _ = canvas_style.set_property("position", "sticky");
        let _ = canvas_style.set_property("top", "0");
        let _ = canvas_style.set_property("left", "0");
        let _ = canvas_style.set_property("display", "block");
        spacer
            .append_child(&canvas)
            .map_err(host_error("appendChild(canvas)"))?;
        container
            .append_child(&spacer)
            .map_err(host_error("appendChild(spacer)"))?;

        let overlay = InputOverlay::new(&document, &spacer)?;
        let painter = TablePainter::new(canvas, window.device_pixel_ratio())?;

        let outbox = Rc::new(RefCell::new(Outbox::default()));
        let callbacks = Rc::new(RefCell::new(Callbacks::default()));
        let hooks = {
            let status_box = Rc::clone(&outbox);
            let render_box = Rc::clone(&outbox);
            Hooks {
                status: Box::new(move |message: &str| {
                    status_box.borrow_mut().status.push(message.to_string());
                }),
                render: Box::new(move |request: &RenderRequest| {
                    let mut outbox = render_box.borrow_mut();
                    outbox.grid |= request.grid;
                    outbox.surface |= request.surface;
                    outbox.view = Some(request.view);
                }),
                clipboard: Box::new(BrowserClipboard::new(Rc::clone(&callbacks))),
            }
        };

        let inner = Rc::new(Inner {
            editor: RefCell::new(GridEditor::new(config, hooks)),
            outbox,
            callbacks,
            painter,
            overlay: RefCell::new(overlay),
            container,
            spacer,
            surface: RefCell::new(None),
            frame: RefCell::new(None),
        });
        let listeners = events::attach_table(&inner);
        log::debug!("FigureGrid created");

        Ok(FigureGrid {
            inner,
            listeners,
            surface_listeners: Vec::new(),
        })
    }

    /// Attach the canvas + ruler surface.
    ///
    /// `stage` receives wheel input (pan, or zoom with Ctrl/Cmd held);
    /// `surface` is the shared container of the ruler overlay and the
    /// canvas that gets the transform; `ruler`, if given, pans on drag
    /// (Shift for fine adjustment).
    #[wasm_bindgen(js_name = "attachSurface")]
    pub fn attach_surface(&mut self, stage: HtmlElement, surface: HtmlElement, ruler: Option<HtmlElement>) {
        self.surface_listeners = events::attach_surface(&self.inner, &stage, ruler.as_ref());
        *self.inner.surface.borrow_mut() = Some(Surface {
            stage,
            container: surface,
        });
        self.inner.outbox.borrow_mut().surface = true;
        self.inner.outbox.borrow_mut().view = Some(self.inner.editor.borrow().view().snapshot());
        flush(&self.inner);
    }

    /// Forward `log` records at `level` and above ("error" .. "trace") to
    /// the browser console.
    #[wasm_bindgen(js_name = "initLogging")]
    pub fn init_logging(level: &str) {
        logging::init(level);
    }

    /// Receives a human-readable string after every visible change.
    #[wasm_bindgen(js_name = "setStatusCallback")]
    pub fn set_status_callback(&mut self, callback: Option<Function>) {
        self.inner.callbacks.borrow_mut().status = callback;
    }

    /// Receives `{grid, surface, zoom, panX, panY, transform}` whenever the
    /// table or the surface changed.
    #[wasm_bindgen(js_name = "setRenderCallback")]
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        self.inner.callbacks.borrow_mut().render = callback;
    }

    /// Start with a blank grid of `rows` x `cols`.
    #[wasm_bindgen(js_name = "initBlank")]
    pub fn init_blank(&mut self, rows: u32, cols: u32) {
        self.inner.editor.borrow_mut().init_blank(rows, cols);
        flush(&self.inner);
    }

    /// Start with a blank grid whose rows fill the container's height.
    #[wasm_bindgen(js_name = "initForViewport")]
    pub fn init_for_viewport(&mut self) {
        #[allow(clippy::cast_precision_loss)]
        let height = self.inner.container.client_height().max(0) as f32;
        self.inner.editor.borrow_mut().init_for_viewport(height);
        flush(&self.inner);
    }

    /// Current dataset as `{columns: string[], rows: object[]}`.
    #[wasm_bindgen(js_name = "getDataset")]
    pub fn get_dataset(&self) -> std::result::Result<JsValue, JsValue> {
        let editor = self.inner.editor.borrow();
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        editor
            .dataset()
            .serialize(&serializer)
            .map_err(|e| JsValue::from(FiggridError::Host(e.to_string())))
    }

    /// Replace the dataset with `{columns, rows}`.
    #[wasm_bindgen(js_name = "setDataset")]
    pub fn set_dataset(&mut self, value: JsValue) -> std::result::Result<(), JsValue> {
        let dataset: Dataset = serde_wasm_bindgen::from_value(value)
            .map_err(|e| FiggridError::Host(e.to_string()))?;
        self.inner.editor.borrow_mut().set_dataset(dataset);
        flush(&self.inner);
        Ok(())
    }

    /// Replace the dataset from a JSON string.
    #[wasm_bindgen(js_name = "setDatasetJson")]
    pub fn set_dataset_json(&mut self, json: &str) -> std::result::Result<(), JsValue> {
        let dataset: Dataset = serde_json::from_str(json).map_err(FiggridError::from)?;
        self.inner.editor.borrow_mut().set_dataset(dataset);
        flush(&self.inner);
        Ok(())
    }

    #[wasm_bindgen(js_name = "renameColumn")]
    pub fn rename_column(&mut self, col: u32, label: &str) {
        self.inner.editor.borrow_mut().rename_column(col, label);
        flush(&self.inner);
    }

    #[wasm_bindgen(js_name = "addRows")]
    pub fn add_rows(&mut self, n: u32) -> u32 {
        let added = self.inner.editor.borrow_mut().add_rows(n);
        flush(&self.inner);
        added
    }

    #[wasm_bindgen(js_name = "addColumns")]
    pub fn add_columns(&mut self, n: u32) -> u32 {
        let added = self.inner.editor.borrow_mut().add_columns(n);
        flush(&self.inner);
        added
    }

    /// Copy the selection to the system clipboard.
    #[wasm_bindgen]
    pub fn copy(&mut self) {
        self.inner.editor.borrow_mut().copy();
        flush(&self.inner);
    }

    /// Paste text supplied by the host (e.g. from a menu command).
    #[wasm_bindgen(js_name = "pasteText")]
    pub fn paste_text(&mut self, text: &str) {
        self.inner.editor.borrow_mut().paste_text(text);
        flush(&self.inner);
    }

    #[wasm_bindgen]
    pub fn undo(&mut self) -> bool {
        let done = self.inner.editor.borrow_mut().undo();
        flush(&self.inner);
        done
    }

    #[wasm_bindgen]
    pub fn redo(&mut self) -> bool {
        let done = self.inner.editor.borrow_mut().redo();
        flush(&self.inner);
        done
    }

    /// Reset zoom and pan of the surface.
    #[wasm_bindgen]
    pub fn fit(&mut self) {
        self.inner.editor.borrow_mut().fit();
        flush(&self.inner);
    }

    #[wasm_bindgen]
    pub fn zoom(&self) -> f64 {
        self.inner.editor.borrow().view().zoom()
    }

    /// Selected rectangle as `[top, left, bottom, right]`.
    #[wasm_bindgen(js_name = "getSelection")]
    pub fn get_selection(&self) -> Option<Vec<u32>> {
        let editor = self.inner.editor.borrow();
        let range = editor.selection().effective_range(editor.grid())?;
        Some(vec![range.top, range.left, range.bottom, range.right])
    }

    #[wasm_bindgen(js_name = "selectCell")]
    pub fn select_cell(&mut self, row: u32, col: u32) {
        self.inner.editor.borrow_mut().select_cell(row, col);
        flush(&self.inner);
    }

    #[wasm_bindgen(js_name = "isEditing")]
    pub fn is_editing(&self) -> bool {
        self.inner.editor.borrow().selection().is_editing()
    }

    /// Repaint the table (e.g. after the container was resized).
    #[wasm_bindgen]
    pub fn render(&mut self) {
        self.inner.invalidate();
        flush(&self.inner);
    }
}
