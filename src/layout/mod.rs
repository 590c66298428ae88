//! Geometry of the editor's two surfaces.
//!
//! This module handles:
//! - Column widths and the border-drag resize gesture
//! - Cell positions and hit testing for the table
//! - The zoom/pan transform shared by the ruler overlay and the canvas

mod column_resizer;
mod grid_layout;
mod view_transform;

pub use column_resizer::ColumnResizer;
pub use grid_layout::{CellRect, GridLayout, PointerTarget, BORDER_GRAB};
pub use view_transform::{Point, ViewSnapshot, ViewTransform};
