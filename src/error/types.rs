use thiserror::Error;

use crate::surface::WindowId;

/// Unified result type for the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced by box placement and the runtime around it.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("boxname={boxname:?}, dimension={dimension:?}, {first:?} and {second:?} are mutually exclusive")]
    MutuallyExclusive {
        boxname: String,
        dimension: &'static str,
        first: &'static str,
        second: &'static str,
    },
    #[error("boxname={boxname:?}, dimension={dimension:?}, use {same_side:?} to reference the grid, not {opposite:?}")]
    GridNotAdjacent {
        boxname: String,
        dimension: &'static str,
        same_side: &'static str,
        opposite: &'static str,
    },
    #[error("boxname={boxname:?}, dimension={dimension:?}, non-zero length={length} allows lo or hi, not both")]
    LengthWithBothEnds {
        boxname: String,
        dimension: &'static str,
        length: i32,
    },
    #[error("boxname={boxname:?}, dimension={dimension:?}, zero length requires both lo and hi")]
    MissingEnd {
        boxname: String,
        dimension: &'static str,
    },
    #[error("boxname={boxname:?}, box l={lines} c={cols} y={begin_y} x={begin_x} does not fit the grid")]
    OutOfBounds {
        boxname: String,
        lines: i32,
        cols: i32,
        begin_y: i32,
        begin_x: i32,
    },
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised by the character-cell surface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("window {0:?} does not exist")]
    NoSuchWindow(WindowId),
    #[error("l={lines} c={cols} y={begin_y} x={begin_x} lies outside the screen")]
    OutOfBounds {
        lines: u16,
        cols: u16,
        begin_y: u16,
        begin_x: u16,
    },
    #[error("y={y} x={x} lies outside the window")]
    OutsideWindow { y: u16, x: u16 },
    #[error("cursor cannot advance past the final cell")]
    CursorOverflow,
}
