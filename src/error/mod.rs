//! Error types shared across the grid, surface and runtime modules.

mod types;

pub use types::{LayoutError, Result, SurfaceError};
