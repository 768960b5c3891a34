/// Integer size measured in terminal character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Rectangle anchored on the screen, in absolute cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the last row.
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// One past the last column.
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn contains(&self, y: u16, x: u16) -> bool {
        y >= self.y && y < self.bottom() && x >= self.x && x < self.right()
    }

    /// Origin along `axis`.
    pub fn begin(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Vertical => self.y,
            Axis::Horizontal => self.x,
        }
    }

    /// Extent along `axis`.
    pub fn extent(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }
}

/// Layout axis. Vertical positions are lines (y), horizontal are columns (x).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    /// Name of the dimension resolved along this axis.
    pub fn dimension(&self) -> &'static str {
        match self {
            Axis::Vertical => "nlines",
            Axis::Horizontal => "ncols",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(2, 1, 3, 2);
        assert!(rect.contains(1, 2));
        assert!(rect.contains(2, 4));
        assert!(!rect.contains(3, 4));
        assert!(!rect.contains(1, 5));
        assert!(!rect.contains(0, 2));
    }

    #[test]
    fn axis_accessors() {
        let rect = Rect::new(7, 3, 10, 4);
        assert_eq!(rect.begin(Axis::Vertical), 3);
        assert_eq!(rect.begin(Axis::Horizontal), 7);
        assert_eq!(rect.extent(Axis::Vertical), 4);
        assert_eq!(rect.extent(Axis::Horizontal), 10);
    }
}
