//! Boxes with collapsed borders.
//!
//! A [`Grid`] covers one window and places named boxes on it. Each box is a
//! one-cell border ring around a content window; where boxes touch, their
//! borders share cells and are drawn once with junction glyphs:
//!
//! ```text
//! ┌─────┬────────┐
//! │ a   │ b      │
//! ├─────┴──┬─────┤
//! │ c      │ d   │
//! └────────┴─────┘
//! ```
//!
//! Straight interior border cells can be dragged with the mouse to resize
//! the boxes on either side.

mod core;
mod matrix;
mod resize;

pub use self::core::{Builder, Grid, GridConfig, Side};
pub use matrix::Segment;
pub use resize::{ResizeMode, ResizePair, ResizeSession};
