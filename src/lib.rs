//! Collapsed-border box layouts for character-cell terminals.
//!
//! A [`Grid`] covers a terminal window and places named boxes on it, either
//! at absolute positions or relative to the grid and to other boxes. Where
//! boxes touch, their borders are drawn once with junction glyphs, and the
//! shared borders can be dragged with the mouse (or moved with the arrow
//! keys) to resize the boxes on either side.
//!
//! All state lives in a [`Runtime`]: the [`Screen`] holding every window, the
//! event source, hot-key and mouse handler registries, and the terminal
//! writer shared with anything else that paints.

pub mod border;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod runtime;
pub mod surface;
pub mod width;

pub use border::{BorderSet, Glyph, Neighbors, glyph_for};
pub use error::{LayoutError, Result, SurfaceError};
pub use geometry::{Axis, Rect, Size};
pub use grid::{Grid, GridConfig, ResizeMode, ResizePair, ResizeSession, Side};
pub use input::{
    EventSource, HotKeys, InputHandler, Key, MouseDecoder, MouseEvent, MouseHandlers,
    ScriptedEvents, TerminalEvents,
};
pub use layout::{Anchor, AxisRefs, BoxSpec, Span, resolve_axis};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, LogWindow, Logger, LoggingError,
    LoggingResult, QueueSink,
};
pub use metrics::{MetricSnapshot, RenderMetrics};
pub use runtime::{Polled, Runtime, RuntimeConfig, SharedTerminal, TerminalGuard};
pub use surface::{Attr, Cell, Screen, Style, Window, WindowId};
pub use width::display_width;
