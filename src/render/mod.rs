//! Rendering.
//!
//! - `selection`: overlay geometry, independent of any drawing surface
//! - `painter`: Canvas 2D painter for the table (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod painter;
pub mod selection;

#[cfg(target_arch = "wasm32")]
pub use painter::TablePainter;
pub use selection::SelectionOverlay;
