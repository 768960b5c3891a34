use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::style::Color;

use crate::error::SurfaceError;
use crate::geometry::Size;
use crate::width::char_width;

use super::style::{Cell, Style};
use super::window::Window;

type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

/// Handle to a window owned by a [`Screen`]. Handles are never reused, so a
/// handle to a deleted window stays invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(usize);

impl WindowId {
    pub const ROOT: WindowId = WindowId(0);

    pub fn index(&self) -> usize {
        self.0
    }
}

/// The terminal surface: owns every window and composes them into frames.
///
/// Drawing goes to windows; [`Screen::noutrefresh`] copies a window into the
/// pending frame and [`Screen::doupdate`] writes only the cells that differ
/// from the last flushed frame.
#[derive(Debug)]
pub struct Screen {
    size: Size,
    windows: Vec<Option<Window>>,
    pending: Vec<Cell>,
    flushed: Vec<Cell>,
    repaint: bool,
}

impl Screen {
    pub fn new(size: Size) -> Self {
        let root = Window::new(size.height, size.width, 0, 0);
        Self {
            size,
            windows: vec![Some(root)],
            pending: vec![Cell::blank(); size.area()],
            flushed: vec![Cell::blank(); size.area()],
            repaint: true,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn root(&self) -> WindowId {
        WindowId::ROOT
    }

    /// Follow a terminal size change. Windows keep their geometry.
    pub fn set_size(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.pending = vec![Cell::blank(); size.area()];
        self.flushed = vec![Cell::blank(); size.area()];
        self.repaint = true;
    }

    pub fn newwin(
        &mut self,
        lines: u16,
        cols: u16,
        begin_y: u16,
        begin_x: u16,
    ) -> SurfaceResult<WindowId> {
        self.check_fits(lines, cols, begin_y, begin_x)?;
        let id = WindowId(self.windows.len());
        self.windows
            .push(Some(Window::new(lines, cols, begin_y, begin_x)));
        Ok(id)
    }

    /// Drop a window. The root window cannot be deleted.
    pub fn delwin(&mut self, id: WindowId) -> SurfaceResult<()> {
        if id == WindowId::ROOT {
            return Ok(());
        }
        match self.windows.get_mut(id.0) {
            Some(slot @ Some(_)) => {
                *slot = None;
                Ok(())
            }
            _ => Err(SurfaceError::NoSuchWindow(id)),
        }
    }

    pub fn exists(&self, id: WindowId) -> bool {
        matches!(self.windows.get(id.0), Some(Some(_)))
    }

    pub fn window(&self, id: WindowId) -> SurfaceResult<&Window> {
        self.windows
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(SurfaceError::NoSuchWindow(id))
    }

    pub fn window_mut(&mut self, id: WindowId) -> SurfaceResult<&mut Window> {
        self.windows
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(SurfaceError::NoSuchWindow(id))
    }

    /// Resize in place, keeping the window's origin.
    pub fn resize(&mut self, id: WindowId, lines: u16, cols: u16) -> SurfaceResult<()> {
        let (begin_y, begin_x) = self.window(id)?.getbegyx();
        self.check_fits(lines, cols, begin_y, begin_x)?;
        self.window_mut(id)?.resize(lines, cols);
        Ok(())
    }

    /// Move a window's origin; it must stay on the screen.
    pub fn mvwin(&mut self, id: WindowId, begin_y: u16, begin_x: u16) -> SurfaceResult<()> {
        let (lines, cols) = self.window(id)?.getmaxyx();
        self.check_fits(lines, cols, begin_y, begin_x)?;
        self.window_mut(id)?.relocate(begin_y, begin_x);
        Ok(())
    }

    /// Force the next [`Screen::doupdate`] to rewrite every cell.
    pub fn invalidate(&mut self) {
        self.repaint = true;
    }

    /// Copy a window into the pending frame if it changed since the last copy.
    pub fn noutrefresh(&mut self, id: WindowId) -> SurfaceResult<()> {
        let size = self.size;
        let window = self
            .windows
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(SurfaceError::NoSuchWindow(id))?;
        let (touched, cleared) = window.take_refresh();
        if cleared {
            self.repaint = true;
        }
        if !touched {
            return Ok(());
        }

        let (lines, cols) = window.getmaxyx();
        let (begin_y, begin_x) = window.getbegyx();
        let cells = window.cells();
        for y in 0..lines {
            let sy = begin_y as usize + y as usize;
            if sy >= size.height as usize {
                break;
            }
            for x in 0..cols {
                let sx = begin_x as usize + x as usize;
                if sx >= size.width as usize {
                    break;
                }
                self.pending[sy * size.width as usize + sx] =
                    cells[y as usize * cols as usize + x as usize];
            }
        }
        Ok(())
    }

    /// Write the pending frame to `out`, returning the number of cells written.
    pub fn doupdate(&mut self, out: &mut impl Write) -> io::Result<usize> {
        let width = self.size.width as usize;
        let mut written = 0;
        let mut cursor: Option<(usize, usize)> = None;
        let mut current: Option<Style> = None;

        for (idx, cell) in self.pending.iter().enumerate() {
            if !self.repaint && self.flushed[idx] == *cell {
                continue;
            }
            if cell.is_continuation() {
                continue;
            }
            let (y, x) = (idx / width, idx % width);
            if cursor != Some((y, x)) {
                queue!(out, MoveTo(x as u16, y as u16))?;
            }
            if current != Some(cell.style) {
                emit_style(out, cell.style)?;
                current = Some(cell.style);
            }
            queue!(out, Print(cell.ch))?;
            cursor = Some((y, x + char_width(cell.ch).max(1)));
            written += 1;
        }

        if current.is_some() {
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
        out.flush()?;
        self.flushed.copy_from_slice(&self.pending);
        self.repaint = false;
        Ok(written)
    }

    /// Text of a screen row in the pending frame, for inspection and tests.
    pub fn row_text(&self, y: u16) -> String {
        let width = self.size.width as usize;
        let start = y as usize * width;
        self.pending
            .get(start..start + width)
            .map(|row| {
                row.iter()
                    .filter(|cell| !cell.is_continuation())
                    .map(|cell| cell.ch)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn check_fits(&self, lines: u16, cols: u16, begin_y: u16, begin_x: u16) -> SurfaceResult<()> {
        let fits = lines > 0
            && cols > 0
            && begin_y as u32 + lines as u32 <= self.size.height as u32
            && begin_x as u32 + cols as u32 <= self.size.width as u32;
        if fits {
            Ok(())
        } else {
            Err(SurfaceError::OutOfBounds {
                lines,
                cols,
                begin_y,
                begin_x,
            })
        }
    }
}

fn emit_style(out: &mut impl Write, style: Style) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    queue!(
        out,
        SetForegroundColor(style.fg.unwrap_or(Color::Reset)),
        SetBackgroundColor(style.bg.unwrap_or(Color::Reset))
    )?;
    for attribute in style.attr.attributes() {
        queue!(out, SetAttribute(attribute))?;
    }
    Ok(())
}
