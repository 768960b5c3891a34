use crate::error::{LayoutError, Result};
use crate::geometry::Axis;
use crate::surface::WindowId;

/// What a relational placement parameter points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// The grid's own rectangle.
    Grid,
    /// The content window of another box.
    Box(WindowId),
}

impl From<WindowId> for Anchor {
    fn from(id: WindowId) -> Self {
        Anchor::Box(id)
    }
}

/// Extent of a rectangle along one axis, in absolute cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub begin: i32,
    pub len: i32,
}

impl Span {
    pub const fn new(begin: i32, len: i32) -> Self {
        Self { begin, len }
    }
}

/// The four relational parameters of one axis.
///
/// `lo`/`hi` align an edge with the same edge of the anchor; `lo2hi`/`hi2lo`
/// place the edge against the opposite edge of an anchor box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisRefs {
    pub lo: Option<Anchor>,
    pub lo2hi: Option<Anchor>,
    pub hi: Option<Anchor>,
    pub hi2lo: Option<Anchor>,
}

impl AxisRefs {
    pub fn is_empty(&self) -> bool {
        self.lo.is_none() && self.lo2hi.is_none() && self.hi.is_none() && self.hi2lo.is_none()
    }

    /// Treat references to `root` as references to the grid itself.
    pub fn normalized(self, root: WindowId) -> Self {
        let fix = |anchor: Option<Anchor>| match anchor {
            Some(Anchor::Box(id)) if id == root => Some(Anchor::Grid),
            other => other,
        };
        Self {
            lo: fix(self.lo),
            lo2hi: fix(self.lo2hi),
            hi: fix(self.hi),
            hi2lo: fix(self.hi2lo),
        }
    }
}

struct AxisNames {
    lo: &'static str,
    lo2hi: &'static str,
    hi: &'static str,
    hi2lo: &'static str,
}

const VERTICAL: AxisNames = AxisNames {
    lo: "top",
    lo2hi: "top2b",
    hi: "bottom",
    hi2lo: "bottom2t",
};

const HORIZONTAL: AxisNames = AxisNames {
    lo: "left",
    lo2hi: "left2r",
    hi: "right",
    hi2lo: "right2l",
};

fn names(axis: Axis) -> &'static AxisNames {
    match axis {
        Axis::Vertical => &VERTICAL,
        Axis::Horizontal => &HORIZONTAL,
    }
}

/// Resolve `(length, begin)` of a box along `axis`.
///
/// With no references the request is absolute and returned unchanged.
/// Otherwise `begin` is an offset added to the position derived from the
/// references. `grid` is the grid's extent on this axis and `span_of`
/// reports the extent of an anchor box's content window.
pub fn resolve_axis<F>(
    boxname: &str,
    axis: Axis,
    length: i32,
    begin: i32,
    refs: &AxisRefs,
    grid: Span,
    span_of: F,
) -> Result<(i32, i32)>
where
    F: Fn(WindowId) -> Result<Span>,
{
    if refs.is_empty() {
        return Ok((length, begin));
    }

    let names = names(axis);
    let dimension = axis.dimension();

    if refs.lo.is_some() && refs.lo2hi.is_some() {
        return Err(LayoutError::MutuallyExclusive {
            boxname: boxname.to_string(),
            dimension,
            first: names.lo,
            second: names.lo2hi,
        });
    }
    if refs.hi.is_some() && refs.hi2lo.is_some() {
        return Err(LayoutError::MutuallyExclusive {
            boxname: boxname.to_string(),
            dimension,
            first: names.hi,
            second: names.hi2lo,
        });
    }

    if refs.lo2hi == Some(Anchor::Grid) {
        return Err(LayoutError::GridNotAdjacent {
            boxname: boxname.to_string(),
            dimension,
            same_side: names.lo,
            opposite: names.lo2hi,
        });
    }
    if refs.hi2lo == Some(Anchor::Grid) {
        return Err(LayoutError::GridNotAdjacent {
            boxname: boxname.to_string(),
            dimension,
            same_side: names.hi,
            opposite: names.hi2lo,
        });
    }

    let has_lo = refs.lo.is_some() || refs.lo2hi.is_some();
    let has_hi = refs.hi.is_some() || refs.hi2lo.is_some();
    if has_lo && has_hi {
        if length != 0 {
            return Err(LayoutError::LengthWithBothEnds {
                boxname: boxname.to_string(),
                dimension,
                length,
            });
        }
    } else if length == 0 {
        return Err(LayoutError::MissingEnd {
            boxname: boxname.to_string(),
            dimension,
        });
    }

    // first cell of the box, on its low-side border
    let start = match (refs.lo, refs.lo2hi) {
        (Some(Anchor::Grid), _) => Some(grid.begin),
        (Some(Anchor::Box(id)), _) => Some(span_of(id)?.begin - 1),
        (None, Some(Anchor::Box(id))) => {
            let span = span_of(id)?;
            Some(span.begin + span.len)
        }
        _ => None,
    };

    // last cell of the box, on its high-side border
    let last = match (refs.hi, refs.hi2lo) {
        (Some(Anchor::Grid), _) => Some(grid.begin + grid.len - 1),
        (Some(Anchor::Box(id)), _) => {
            let span = span_of(id)?;
            Some(span.begin + span.len)
        }
        (None, Some(Anchor::Box(id))) => Some(span_of(id)?.begin - 1),
        _ => None,
    };

    let (begin, start, last) = (begin as i64, start.map(i64::from), last.map(i64::from));
    let (length, begin) = match (start, last) {
        (Some(start), Some(last)) => (last - start + 1, begin + start),
        (Some(start), None) => (length as i64, begin + start),
        (None, Some(last)) => (length as i64, begin + last - length as i64 + 1),
        (None, None) => (length as i64, begin),
    };
    match (i32::try_from(length), i32::try_from(begin)) {
        (Ok(length), Ok(begin)) => Ok((length, begin)),
        _ => Err(out_of_range(boxname, axis, length, begin)),
    }
}

/// Geometry that cannot be represented as screen coordinates.
fn out_of_range(boxname: &str, axis: Axis, length: i64, begin: i64) -> LayoutError {
    let clamp = |value: i64| value.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    let (lines, cols, begin_y, begin_x) = match axis {
        Axis::Vertical => (clamp(length), 0, clamp(begin), 0),
        Axis::Horizontal => (0, clamp(length), 0, clamp(begin)),
    };
    LayoutError::OutOfBounds {
        boxname: boxname.to_string(),
        lines,
        cols,
        begin_y,
        begin_x,
    }
}
