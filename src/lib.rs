//! figgrid - an interactive data grid for figure-authoring tools
//!
//! A spreadsheet-style table editor compiled to WebAssembly and drawn with
//! Canvas 2D, plus the zoom/pan controller for the canvas + ruler surface
//! next to it:
//! - Cell, column, row and select-all selection with drag extension
//! - In-place editing with numeric coercion
//! - Tab-separated copy/paste that grows the grid as needed
//! - Fill-handle drag down, right or both
//! - Column resize by border drag
//! - Wheel pan and pointer-anchored zoom, coalesced per animation frame
//!
//! The editor core is plain Rust and host-testable; everything touching the
//! DOM lives behind `target_arch = "wasm32"`.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { FigureGrid } from 'figgrid';
//! await init();
//! const grid = new FigureGrid(container, { maxRows: 5000 });
//! grid.setStatusCallback((msg) => (statusBar.textContent = msg));
//! grid.initForViewport();
//! grid.attachSurface(stage, surface, ruler);
//! ```

pub mod clipboard;
pub mod config;
pub mod editor;
pub mod error;
pub mod fill;
pub mod grid;
pub mod host;
pub mod layout;
pub mod render;
pub mod selection;
pub mod types;

#[cfg(target_arch = "wasm32")]
mod viewer;

use wasm_bindgen::prelude::*;

pub use config::EditorConfig;
pub use editor::{EventResponse, GridEditor};
pub use error::{FiggridError, Result};
pub use grid::{GridBounds, GridModel};
pub use host::{ClipboardService, Hooks, NoClipboard, RenderRequest, RenderSink, StatusSink};
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::FigureGrid;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
