use crate::border::Neighbors;

/// Which part of a box border a cell belongs to.
///
/// ```text
///     5------1------6
///     |             |
///     4             2
///     |             |
///     8------3------7
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Segment {
    Top = 1,
    Right = 2,
    Bottom = 3,
    Left = 4,
    TopLeft = 5,
    TopRight = 6,
    BottomRight = 7,
    BottomLeft = 8,
}

/// Dense row-major matrix of grid cells.
#[derive(Debug, Clone)]
pub(crate) struct Matrix<T> {
    lines: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone + Default> Matrix<T> {
    pub(crate) fn new(lines: u16, cols: u16) -> Self {
        let (lines, cols) = (lines as usize, cols as usize);
        Self {
            lines,
            cols,
            cells: vec![T::default(); lines * cols],
        }
    }

    pub(crate) fn get(&self, y: i32, x: i32) -> Option<&T> {
        self.index(y, x).map(|idx| &self.cells[idx])
    }

    pub(crate) fn set(&mut self, y: i32, x: i32, value: T) {
        if let Some(idx) = self.index(y, x) {
            self.cells[idx] = value;
        }
    }

    pub(crate) fn reset(&mut self) {
        self.cells.fill(T::default());
    }

    pub(crate) fn lines(&self) -> usize {
        self.lines
    }

    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, y: i32, x: i32) -> Option<usize> {
        let (y, x) = (usize::try_from(y).ok()?, usize::try_from(x).ok()?);
        (y < self.lines && x < self.cols).then_some(y * self.cols + x)
    }
}

impl Matrix<Option<Segment>> {
    pub(crate) fn occupied(&self, y: i32, x: i32) -> bool {
        matches!(self.get(y, x), Some(Some(_)))
    }

    /// Occupied orthogonal neighbours of `(y, x)`; off-grid counts as empty.
    pub(crate) fn neighbors(&self, y: i32, x: i32) -> Neighbors {
        let mut mask = Neighbors::NONE;
        if self.occupied(y - 1, x) {
            mask.insert(Neighbors::TOP);
        }
        if self.occupied(y, x + 1) {
            mask.insert(Neighbors::RIGHT);
        }
        if self.occupied(y + 1, x) {
            mask.insert(Neighbors::BOTTOM);
        }
        if self.occupied(y, x - 1) {
            mask.insert(Neighbors::LEFT);
        }
        mask
    }

    /// Mark the perimeter of a rectangle given in grid coordinates.
    pub(crate) fn mark_rect(&mut self, lines: i32, cols: i32, y: i32, x: i32) {
        let (bottom, right) = (y + lines - 1, x + cols - 1);
        for col in x + 1..right {
            self.set(y, col, Some(Segment::Top));
            self.set(bottom, col, Some(Segment::Bottom));
        }
        for row in y + 1..bottom {
            self.set(row, x, Some(Segment::Left));
            self.set(row, right, Some(Segment::Right));
        }
        self.set(y, x, Some(Segment::TopLeft));
        self.set(y, right, Some(Segment::TopRight));
        self.set(bottom, right, Some(Segment::BottomRight));
        self.set(bottom, x, Some(Segment::BottomLeft));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::{Glyph, glyph_for};

    #[test]
    fn marked_rect_has_corner_codes() {
        let mut matrix: Matrix<Option<Segment>> = Matrix::new(4, 6);
        matrix.mark_rect(3, 4, 0, 1);
        assert_eq!(matrix.get(0, 1), Some(&Some(Segment::TopLeft)));
        assert_eq!(matrix.get(2, 4), Some(&Some(Segment::BottomRight)));
        assert_eq!(matrix.get(1, 2), Some(&None));
        assert_eq!(matrix.get(1, 4), Some(&Some(Segment::Right)));
        assert!(matrix.get(-1, 0).is_none());
        assert!(matrix.get(4, 0).is_none());
    }

    #[test]
    fn shared_border_becomes_tees() {
        // two boxes side by side, sharing column 3
        let mut matrix: Matrix<Option<Segment>> = Matrix::new(3, 7);
        matrix.mark_rect(3, 4, 0, 0);
        matrix.mark_rect(3, 4, 0, 3);
        assert_eq!(glyph_for(matrix.neighbors(0, 3)), Glyph::TTee);
        assert_eq!(glyph_for(matrix.neighbors(1, 3)), Glyph::VLine);
        assert_eq!(glyph_for(matrix.neighbors(2, 3)), Glyph::BTee);
        assert_eq!(glyph_for(matrix.neighbors(0, 0)), Glyph::ULCorner);
        assert_eq!(glyph_for(matrix.neighbors(2, 6)), Glyph::LRCorner);
    }

    #[test]
    fn reset_clears_everything() {
        let mut matrix: Matrix<bool> = Matrix::new(2, 2);
        matrix.set(1, 1, true);
        matrix.reset();
        assert_eq!(matrix.get(1, 1), Some(&false));
        assert_eq!((matrix.lines(), matrix.cols()), (2, 2));
    }
}
