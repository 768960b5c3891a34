use crate::border::BorderSet;
use crate::error::SurfaceError;
use crate::geometry::Rect;
use crate::width::char_width;

use super::style::{Cell, Style};

type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

/// Rectangular character-cell buffer positioned on the screen.
///
/// Coordinates passed to the drawing methods are relative to the window;
/// [`Window::enclose`] takes absolute screen coordinates.
#[derive(Debug, Clone)]
pub struct Window {
    lines: u16,
    cols: u16,
    begin_y: u16,
    begin_x: u16,
    cells: Vec<Cell>,
    cursor: (u16, u16),
    background: Cell,
    touched: bool,
    cleared: bool,
    scroll: bool,
}

impl Window {
    pub(crate) fn new(lines: u16, cols: u16, begin_y: u16, begin_x: u16) -> Self {
        Self {
            lines,
            cols,
            begin_y,
            begin_x,
            cells: vec![Cell::blank(); lines as usize * cols as usize],
            cursor: (0, 0),
            background: Cell::blank(),
            touched: true,
            cleared: false,
            scroll: false,
        }
    }

    pub fn getmaxyx(&self) -> (u16, u16) {
        (self.lines, self.cols)
    }

    pub fn getbegyx(&self) -> (u16, u16) {
        (self.begin_y, self.begin_x)
    }

    pub fn getyx(&self) -> (u16, u16) {
        self.cursor
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.begin_x, self.begin_y, self.cols, self.lines)
    }

    /// True if absolute screen position `(y, x)` lies inside this window.
    pub fn enclose(&self, y: u16, x: u16) -> bool {
        self.rect().contains(y, x)
    }

    pub fn move_cursor(&mut self, y: u16, x: u16) -> SurfaceResult<()> {
        self.check(y, x)?;
        self.cursor = (y, x);
        Ok(())
    }

    /// Read back the cell at `(y, x)`.
    pub fn inch(&self, y: u16, x: u16) -> Option<Cell> {
        self.index(y, x).map(|idx| self.cells[idx])
    }

    /// Store `ch` at `(y, x)` and advance the cursor past it.
    ///
    /// The glyph is stored even when the write lands on the final cell, but the
    /// cursor cannot advance from there and the call reports
    /// [`SurfaceError::CursorOverflow`].
    pub fn addch(&mut self, y: u16, x: u16, ch: char, style: Style) -> SurfaceResult<()> {
        self.move_cursor(y, x)?;
        self.put(ch, style)
    }

    /// Write `text` at the cursor, wrapping at the right edge.
    pub fn addstr(&mut self, text: &str, style: Style) -> SurfaceResult<()> {
        for ch in text.chars() {
            match ch {
                '\n' => {
                    self.clrtoeol();
                    self.newline()?;
                }
                '\u{8}' => {
                    self.cursor.1 = self.cursor.1.saturating_sub(1);
                }
                _ => self.put(ch, style)?,
            }
        }
        Ok(())
    }

    pub fn mvaddstr(&mut self, y: u16, x: u16, text: &str, style: Style) -> SurfaceResult<()> {
        self.move_cursor(y, x)?;
        self.addstr(text, style)
    }

    /// Delete the character under the cursor, shifting the rest of the line left.
    pub fn delch(&mut self) {
        let (y, x) = self.cursor;
        let Some(start) = self.index(y, x) else {
            return;
        };
        let end = start - x as usize + self.cols as usize;
        self.cells.copy_within(start + 1..end, start);
        self.cells[end - 1] = self.background;
        self.touched = true;
    }

    /// Blank from the cursor to the end of its line.
    pub fn clrtoeol(&mut self) {
        let (y, x) = self.cursor;
        if let Some(start) = self.index(y, x) {
            let end = start - x as usize + self.cols as usize;
            self.cells[start..end].fill(self.background);
            self.touched = true;
        }
    }

    /// Blank the whole window and home the cursor.
    pub fn erase(&mut self) {
        self.cells.fill(self.background);
        self.cursor = (0, 0);
        self.touched = true;
    }

    /// Like [`Window::erase`], and repaint the whole screen on the next flush.
    pub fn clear(&mut self) {
        self.erase();
        self.cleared = true;
    }

    /// Set the background cell; blank cells pick up the new background.
    pub fn bkgd(&mut self, background: Cell) {
        let previous = self.background;
        for cell in self.cells.iter_mut() {
            if *cell == previous {
                *cell = background;
            } else {
                cell.style = cell.style.over(background.style);
            }
        }
        self.background = background;
        self.touched = true;
    }

    pub fn background(&self) -> Cell {
        self.background
    }

    /// Draw a border around the window's own perimeter.
    pub fn border(&mut self, set: BorderSet, style: Style) {
        let (last_y, last_x) = (self.lines.saturating_sub(1), self.cols.saturating_sub(1));
        for x in 1..last_x {
            self.set(0, x, set.top, style);
            self.set(last_y, x, set.bottom, style);
        }
        for y in 1..last_y {
            self.set(y, 0, set.left, style);
            self.set(y, last_x, set.right, style);
        }
        self.set(0, 0, set.top_left, style);
        self.set(0, last_x, set.top_right, style);
        self.set(last_y, 0, set.bottom_left, style);
        self.set(last_y, last_x, set.bottom_right, style);
    }

    /// Let writes past the last line scroll the window up instead of failing.
    pub fn scrollok(&mut self, enabled: bool) {
        self.scroll = enabled;
    }

    /// Shift every line up by one, blanking the last.
    pub fn scroll_up(&mut self) {
        let cols = self.cols as usize;
        if self.lines == 0 || cols == 0 {
            return;
        }
        self.cells.copy_within(cols.., 0);
        let len = self.cells.len();
        self.cells[len - cols..].fill(self.background);
        self.touched = true;
    }

    /// Mark the whole window as changed.
    pub fn touchwin(&mut self) {
        self.touched = true;
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Text of row `y`, for inspection and tests.
    pub fn row_text(&self, y: u16) -> String {
        match self.index(y, 0) {
            Some(start) => self.cells[start..start + self.cols as usize]
                .iter()
                .filter(|cell| !cell.is_continuation())
                .map(|cell| cell.ch)
                .collect(),
            None => String::new(),
        }
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn take_refresh(&mut self) -> (bool, bool) {
        let flags = (self.touched, self.cleared);
        self.touched = false;
        self.cleared = false;
        flags
    }

    pub(crate) fn resize(&mut self, lines: u16, cols: u16) {
        let mut cells = vec![self.background; lines as usize * cols as usize];
        for y in 0..lines.min(self.lines) {
            for x in 0..cols.min(self.cols) {
                cells[y as usize * cols as usize + x as usize] =
                    self.cells[y as usize * self.cols as usize + x as usize];
            }
        }
        self.cells = cells;
        self.lines = lines;
        self.cols = cols;
        self.cursor = (
            self.cursor.0.min(lines.saturating_sub(1)),
            self.cursor.1.min(cols.saturating_sub(1)),
        );
        self.touched = true;
    }

    pub(crate) fn relocate(&mut self, begin_y: u16, begin_x: u16) {
        self.begin_y = begin_y;
        self.begin_x = begin_x;
        self.touched = true;
    }

    fn put(&mut self, ch: char, style: Style) -> SurfaceResult<()> {
        let width = char_width(ch);
        if width == 0 {
            return Ok(());
        }
        let (y, x) = self.cursor;
        if width == 2 && x + 1 >= self.cols {
            // no room for both halves; wrap first
            self.advance(1)?;
            return self.put(ch, style);
        }
        let style = style.over(self.background.style);
        self.set(y, x, ch, style);
        if width == 2 {
            self.set(y, x + 1, Cell::CONTINUATION, style);
        }
        self.advance(width as u16)
    }

    fn advance(&mut self, by: u16) -> SurfaceResult<()> {
        let (y, x) = self.cursor;
        if x + by < self.cols {
            self.cursor = (y, x + by);
            Ok(())
        } else {
            self.newline()
        }
    }

    fn newline(&mut self) -> SurfaceResult<()> {
        let y = self.cursor.0;
        if y + 1 < self.lines {
            self.cursor = (y + 1, 0);
            Ok(())
        } else if self.scroll {
            self.scroll_up();
            self.cursor = (y, 0);
            Ok(())
        } else {
            Err(SurfaceError::CursorOverflow)
        }
    }

    fn set(&mut self, y: u16, x: u16, ch: char, style: Style) {
        if let Some(idx) = self.index(y, x) {
            self.cells[idx] = Cell::new(ch, style);
            self.touched = true;
        }
    }

    fn check(&self, y: u16, x: u16) -> SurfaceResult<()> {
        if y < self.lines && x < self.cols {
            Ok(())
        } else {
            Err(SurfaceError::OutsideWindow { y, x })
        }
    }

    fn index(&self, y: u16, x: u16) -> Option<usize> {
        (y < self.lines && x < self.cols).then(|| y as usize * self.cols as usize + x as usize)
    }
}
