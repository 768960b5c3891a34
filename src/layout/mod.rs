//! Relational box layout.
//!
//! Boxes are described by their relationship to the grid or to other boxes
//! rather than by coordinates:
//!
//! ```text
//!     +--------+                 +--------+
//!     |        |<------ left2r --|        |
//!     |<---------------- left ---|        |
//!     +--------+                 +--------+
//!        |  |                       |  ^
//! bottom2t  | bottom            top |  | top2b
//!        v  |                       |  |
//!     +-----|--+                 +--------+
//!     |     |  |-- right ---------------->|
//!     |     |  |-- right2l ----->|        |
//!     +--------+                 +--------+
//! ```
//!
//! Each axis is resolved independently by [`resolve_axis`]; giving both a
//! low-side and a high-side reference with a zero length fills the gap
//! between them.

mod resolve;
mod spec;

pub use resolve::{Anchor, AxisRefs, Span, resolve_axis};
pub use spec::BoxSpec;
