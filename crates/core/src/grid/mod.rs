//! Grid storage modules

pub mod buffers;
pub mod staggered;

// Re-export main types
pub use buffers::{BufferedField, FieldData};
pub use staggered::{FieldKind, FluidGrid, GridView, Side, FLUID, SOLID};
