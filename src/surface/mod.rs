//! Character-cell display surface.
//!
//! A [`Screen`] owns every window drawn on the terminal. Windows are plain
//! cell buffers addressed through [`WindowId`] handles; the screen composes
//! them into a frame and flushes the changed cells with `crossterm`.

mod screen;
mod style;
mod window;

pub use screen::{Screen, WindowId};
pub use style::{Attr, Cell, Style};
pub use window::Window;
