//! Data types shared by the grid, the controllers and the host binding.

mod cell;
mod dataset;
mod selection;

pub use cell::*;
pub use dataset::*;
pub use selection::*;
