use crate::surface::Cell;

use super::resolve::{Anchor, AxisRefs};

/// Placement request for one box.
///
/// `lines`/`cols` include the border ring; the content window is two cells
/// smaller on each axis. A zero length is computed from references on both
/// sides of that axis.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpec {
    pub name: String,
    pub lines: i32,
    pub cols: i32,
    pub begin_y: i32,
    pub begin_x: i32,
    pub bkgd: Option<Cell>,
    pub vertical: AxisRefs,
    pub horizontal: AxisRefs,
}

impl BoxSpec {
    pub fn new(name: impl Into<String>, lines: i32, cols: i32) -> Self {
        Self {
            name: name.into(),
            lines,
            cols,
            begin_y: 0,
            begin_x: 0,
            bkgd: None,
            vertical: AxisRefs::default(),
            horizontal: AxisRefs::default(),
        }
    }

    /// Upper-left corner: absolute without references, otherwise an offset.
    pub fn at(mut self, begin_y: i32, begin_x: i32) -> Self {
        self.begin_y = begin_y;
        self.begin_x = begin_x;
        self
    }

    /// Background for the content window, overriding the grid default.
    pub fn bkgd(mut self, cell: Cell) -> Self {
        self.bkgd = Some(cell);
        self
    }

    /// Align the left edge with the left edge of `anchor`.
    pub fn left(mut self, anchor: impl Into<Anchor>) -> Self {
        self.horizontal.lo = Some(anchor.into());
        self
    }

    /// Align the right edge with the right edge of `anchor`.
    pub fn right(mut self, anchor: impl Into<Anchor>) -> Self {
        self.horizontal.hi = Some(anchor.into());
        self
    }

    /// Align the top edge with the top edge of `anchor`.
    pub fn top(mut self, anchor: impl Into<Anchor>) -> Self {
        self.vertical.lo = Some(anchor.into());
        self
    }

    /// Align the bottom edge with the bottom edge of `anchor`.
    pub fn bottom(mut self, anchor: impl Into<Anchor>) -> Self {
        self.vertical.hi = Some(anchor.into());
        self
    }

    /// Place the left edge on the right border of `anchor`.
    pub fn left2r(mut self, anchor: impl Into<Anchor>) -> Self {
        self.horizontal.lo2hi = Some(anchor.into());
        self
    }

    /// Place the right edge on the left border of `anchor`.
    pub fn right2l(mut self, anchor: impl Into<Anchor>) -> Self {
        self.horizontal.hi2lo = Some(anchor.into());
        self
    }

    /// Place the top edge on the bottom border of `anchor`.
    pub fn top2b(mut self, anchor: impl Into<Anchor>) -> Self {
        self.vertical.lo2hi = Some(anchor.into());
        self
    }

    /// Place the bottom edge on the top border of `anchor`.
    pub fn bottom2t(mut self, anchor: impl Into<Anchor>) -> Self {
        self.vertical.hi2lo = Some(anchor.into());
        self
    }
}
