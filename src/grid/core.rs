use std::collections::HashMap;

use serde_json::json;

use crate::border::glyph_for;
use crate::error::{LayoutError, Result};
use crate::geometry::{Axis, Size};
use crate::input::{InputHandler, Key, MouseEvent};
use crate::layout::{BoxSpec, Span, resolve_axis};
use crate::logging::{LogLevel, json_kv, json_str};
use crate::runtime::Runtime;
use crate::surface::{Cell, Screen, Style, WindowId};

use super::matrix::{Matrix, Segment};

pub(super) const TARGET: &str = "room::grid";

/// Application callback that (re)creates the box layout. Invoked once when
/// registered and again after every terminal resize.
pub type Builder = Box<dyn FnMut(&mut Grid, &mut Runtime) -> Result<()>>;

/// Default backgrounds for the grid window and for new content windows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridConfig {
    pub bkgd_grid: Option<Cell>,
    pub bkgd_box: Option<Cell>,
}

/// A side of a box border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Boxes with collapsed borders over one window.
///
/// The grid owns the occupancy map of border cells and the list of content
/// windows; the windows themselves live on the runtime's [`Screen`].
/// `boxes[0]` is always the grid's own window.
pub struct Grid {
    pub(super) win: WindowId,
    pub(super) lines: u16,
    pub(super) cols: u16,
    pub(super) begin_y: u16,
    pub(super) begin_x: u16,
    pub(super) occupancy: Matrix<Option<Segment>>,
    pub(super) highlight: Matrix<bool>,
    pub(super) boxes: Vec<WindowId>,
    names: HashMap<WindowId, String>,
    builder: Option<Builder>,
    config: GridConfig,
}

impl Grid {
    /// Wrap `win`, which the grid then covers completely. The first grid on
    /// a runtime also binds the repaint and resize hot-keys and enables the
    /// mouse.
    pub fn new(rt: &mut Runtime, win: WindowId, config: GridConfig) -> Result<Self> {
        let window = rt.screen_mut().window_mut(win)?;
        if let Some(bkgd) = config.bkgd_grid {
            window.bkgd(bkgd);
        }
        let (lines, cols) = window.getmaxyx();
        let (begin_y, begin_x) = window.getbegyx();
        if lines < 3 || cols < 3 {
            return Err(LayoutError::OutOfBounds {
                boxname: "grid".to_string(),
                lines: lines as i32,
                cols: cols as i32,
                begin_y: begin_y as i32,
                begin_x: begin_x as i32,
            });
        }

        let mut grid = Self {
            win,
            lines,
            cols,
            begin_y,
            begin_x,
            occupancy: Matrix::new(lines, cols),
            highlight: Matrix::new(lines, cols),
            boxes: vec![win],
            names: HashMap::from([(win, "grid".to_string())]),
            builder: None,
            config,
        };
        grid.mark_own_border();
        rt.install_grid_hooks()?;
        rt.log(
            LogLevel::Debug,
            TARGET,
            "grid_created",
            [json_str("grid", grid.winyx(rt, win))],
        );
        Ok(grid)
    }

    /// The grid's own window.
    pub fn window(&self) -> WindowId {
        self.win
    }

    /// Content windows in insertion order, starting with the grid window.
    pub fn boxes(&self) -> &[WindowId] {
        &self.boxes
    }

    pub fn boxname(&self, win: WindowId) -> Option<&str> {
        self.names.get(&win).map(String::as_str)
    }

    /// First box registered under `name`. The grid window is not a box.
    pub fn find(&self, name: &str) -> Option<WindowId> {
        self.boxes[1..]
            .iter()
            .copied()
            .find(|win| self.boxname(*win) == Some(name))
    }

    pub fn size(&self) -> Size {
        Size::new(self.cols, self.lines)
    }

    pub fn origin(&self) -> (u16, u16) {
        (self.begin_y, self.begin_x)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// `name l=.. c=.. y=.. x=..` description of a window, for log records.
    pub fn winyx(&self, rt: &Runtime, win: WindowId) -> String {
        let name = self.boxname(win).unwrap_or("?");
        match rt.screen().window(win) {
            Ok(window) => {
                let (lines, cols) = window.getmaxyx();
                let (y, x) = window.getbegyx();
                format!("{name} l={lines} c={cols} y={y} x={x}")
            }
            Err(_) => format!("{name} (deleted)"),
        }
    }

    /// Register the layout callback and run it once.
    pub fn register_builder<F>(&mut self, rt: &mut Runtime, builder: F) -> Result<()>
    where
        F: FnMut(&mut Grid, &mut Runtime) -> Result<()> + 'static,
    {
        self.builder = Some(Box::new(builder));
        self.run_builder(rt)
    }

    /// Create the box `spec.name`, or move and resize it if it exists, and
    /// return its content window.
    ///
    /// The box rectangle includes the border ring; the content window is
    /// inset by one cell on every side.
    pub fn place(&mut self, rt: &mut Runtime, spec: BoxSpec) -> Result<WindowId> {
        let vertical = spec.vertical.normalized(self.win);
        let horizontal = spec.horizontal.normalized(self.win);

        let screen = rt.screen();
        let (lines, begin_y) = resolve_axis(
            &spec.name,
            Axis::Vertical,
            spec.lines,
            spec.begin_y,
            &vertical,
            Span::new(self.begin_y as i32, self.lines as i32),
            |id| span_of(screen, Axis::Vertical, id),
        )?;
        let (cols, begin_x) = resolve_axis(
            &spec.name,
            Axis::Horizontal,
            spec.cols,
            spec.begin_x,
            &horizontal,
            Span::new(self.begin_x as i32, self.cols as i32),
            |id| span_of(screen, Axis::Horizontal, id),
        )?;

        if !self.fits(lines, cols, begin_y, begin_x) {
            return Err(LayoutError::OutOfBounds {
                boxname: spec.name,
                lines,
                cols,
                begin_y,
                begin_x,
            });
        }
        self.occupancy.mark_rect(
            lines,
            cols,
            begin_y - self.begin_y as i32,
            begin_x - self.begin_x as i32,
        );

        // fits() guarantees all four are positive and on screen
        let content = (
            (lines - 2) as u16,
            (cols - 2) as u16,
            (begin_y + 1) as u16,
            (begin_x + 1) as u16,
        );
        let win = match self.find(&spec.name) {
            Some(win) => {
                move_window(rt.screen_mut(), win, content)?;
                win
            }
            None => {
                let (lines, cols, y, x) = content;
                let win = rt.screen_mut().newwin(lines, cols, y, x)?;
                if let Some(bkgd) = spec.bkgd.or(self.config.bkgd_box) {
                    rt.screen_mut().window_mut(win)?.bkgd(bkgd);
                }
                self.boxes.push(win);
                self.names.insert(win, spec.name);
                win
            }
        };

        rt.record_metric(|metrics| metrics.record_box_placed());
        rt.log(
            LogLevel::Trace,
            TARGET,
            "box_placed",
            [json_str("box", self.winyx(rt, win))],
        );
        Ok(win)
    }

    /// Set or clear reverse video on one border side of the box around `win`.
    pub fn border_attr(&mut self, rt: &Runtime, win: WindowId, side: Side, flag: bool) -> Result<()> {
        let window = rt.screen().window(win)?;
        let (lines, cols) = window.getmaxyx();
        let (begin_y, begin_x) = window.getbegyx();
        let (lines, cols) = (lines as i32, cols as i32);
        let y = begin_y as i32 - self.begin_y as i32;
        let x = begin_x as i32 - self.begin_x as i32;

        match side {
            Side::Top | Side::Bottom => {
                let row = if side == Side::Top { y - 1 } else { y + lines };
                for col in x..x + cols {
                    self.highlight.set(row, col, flag);
                }
            }
            Side::Left | Side::Right => {
                let col = if side == Side::Left { x - 1 } else { x + cols };
                for row in y..y + lines {
                    self.highlight.set(row, col, flag);
                }
            }
        }
        Ok(())
    }

    /// Rebuild the occupancy map from the current window geometry, draw the
    /// borders and refresh every box.
    pub fn redraw(&mut self, rt: &mut Runtime) -> Result<()> {
        rt.screen_mut().window_mut(self.win)?.clear();
        self.occupancy.reset();
        self.mark_own_border();

        for idx in 1..self.boxes.len() {
            let win = self.boxes[idx];
            let rect = rt.screen().window(win)?.rect();
            let (lines, cols) = (rect.height as i32 + 2, rect.width as i32 + 2);
            let (y, x) = (rect.y as i32 - 1, rect.x as i32 - 1);
            if self.fits(lines, cols, y, x) {
                self.occupancy.mark_rect(
                    lines,
                    cols,
                    y - self.begin_y as i32,
                    x - self.begin_x as i32,
                );
            } else {
                rt.log(
                    LogLevel::Warn,
                    TARGET,
                    "box_outside_grid",
                    [json_str("box", self.winyx(rt, win))],
                );
            }
        }

        self.rasterize(rt)?;
        rt.record_metric(|metrics| metrics.record_redraw());
        self.refresh(rt)
    }

    /// Queue every box for output and flush once.
    pub fn refresh(&mut self, rt: &mut Runtime) -> Result<()> {
        let screen = rt.screen_mut();
        for &win in &self.boxes {
            screen.window_mut(win)?.touchwin();
            screen.noutrefresh(win)?;
        }
        rt.doupdate()?;
        Ok(())
    }

    /// Box whose content window contains absolute position `(y, x)`.
    pub fn getwin(&self, rt: &Runtime, y: u16, x: u16) -> Option<WindowId> {
        self.boxes[1..].iter().copied().find(|win| {
            rt.screen()
                .window(*win)
                .map(|window| window.enclose(y, x))
                .unwrap_or(false)
        })
    }

    /// Follow a terminal size change: cover the new screen, drop every box
    /// and run the builder. Content windows of dropped boxes are deleted.
    pub fn handle_term_resized_event(&mut self, rt: &mut Runtime) -> Result<()> {
        let size = rt.screen().size();
        let lines = size.height.saturating_sub(self.begin_y);
        let cols = size.width.saturating_sub(self.begin_x);
        rt.log(
            LogLevel::Info,
            TARGET,
            "term_resized",
            [
                json_kv("old", json!([self.lines, self.cols])),
                json_kv("new", json!([lines, cols])),
            ],
        );

        rt.screen_mut().resize(self.win, lines, cols)?;
        self.lines = lines;
        self.cols = cols;
        self.occupancy = Matrix::new(lines, cols);
        self.highlight = Matrix::new(lines, cols);
        self.mark_own_border();

        for win in self.boxes.drain(1..) {
            self.names.remove(&win);
            if let Err(err) = rt.screen_mut().delwin(win) {
                rt.log(
                    LogLevel::Debug,
                    TARGET,
                    "stale_box",
                    [json_str("error", err.to_string())],
                );
            }
        }
        rt.screen_mut().invalidate();
        rt.record_metric(|metrics| metrics.record_term_resize());
        self.run_builder(rt)
    }

    fn run_builder(&mut self, rt: &mut Runtime) -> Result<()> {
        let Some(mut builder) = self.builder.take() else {
            return Ok(());
        };
        let outcome = builder(self, rt);
        if self.builder.is_none() {
            self.builder = Some(builder);
        }
        outcome
    }

    fn mark_own_border(&mut self) {
        self.occupancy
            .mark_rect(self.lines as i32, self.cols as i32, 0, 0);
    }

    /// True if the absolute box rectangle lies on the grid and can hold a
    /// content window.
    pub(super) fn fits(&self, lines: i32, cols: i32, begin_y: i32, begin_x: i32) -> bool {
        let (lines, cols) = (lines as i64, cols as i64);
        let (begin_y, begin_x) = (begin_y as i64, begin_x as i64);
        let (top, left) = (self.begin_y as i64, self.begin_x as i64);
        lines >= 3
            && cols >= 3
            && begin_y >= top
            && begin_x >= left
            && begin_y + lines <= top + self.lines as i64
            && begin_x + cols <= left + self.cols as i64
    }

    fn rasterize(&mut self, rt: &mut Runtime) -> Result<()> {
        let last = (self.lines as i32 - 1, self.cols as i32 - 1);
        let window = rt.screen_mut().window_mut(self.win)?;
        let mut failures = Vec::new();

        for y in 0..self.occupancy.lines() as i32 {
            for x in 0..self.occupancy.cols() as i32 {
                if !self.occupancy.occupied(y, x) {
                    continue;
                }
                let glyph = glyph_for(self.occupancy.neighbors(y, x));
                if glyph.is_blank() {
                    continue;
                }
                let style = if self.highlight.get(y, x) == Some(&true) {
                    Style::reverse()
                } else {
                    Style::new()
                };
                // the terminal's final cell takes the glyph but rejects the write
                if let Err(err) = window.addch(y as u16, x as u16, glyph.symbol(), style) {
                    if (y, x) != last {
                        failures.push((y, x, err));
                    }
                }
            }
        }

        for (y, x, err) in failures {
            rt.log(
                LogLevel::Error,
                TARGET,
                "border_write_failed",
                [
                    json_kv("y", y),
                    json_kv("x", x),
                    json_str("error", err.to_string()),
                ],
            );
        }
        Ok(())
    }
}

impl InputHandler for Grid {
    fn on_hotkey(&mut self, rt: &mut Runtime, key: &Key) -> Result<()> {
        match key {
            Key::Resize => self.handle_term_resized_event(rt),
            key if key.is_refresh() => self.redraw(rt),
            _ => Ok(()),
        }
    }

    fn on_mouse(&mut self, rt: &mut Runtime, mouse: &MouseEvent) -> Result<bool> {
        self.handle_mouse_event(rt, mouse)
    }
}

fn span_of(screen: &Screen, axis: Axis, win: WindowId) -> Result<Span> {
    let rect = screen.window(win)?.rect();
    Ok(Span::new(rect.begin(axis) as i32, rect.extent(axis) as i32))
}

/// Move and resize without the window ever leaving the screen.
fn move_window(screen: &mut Screen, win: WindowId, to: (u16, u16, u16, u16)) -> Result<()> {
    let (lines, cols, y, x) = to;
    let (old_lines, old_cols) = screen.window(win)?.getmaxyx();
    screen.resize(win, old_lines.min(lines), old_cols.min(cols))?;
    screen.mvwin(win, y, x)?;
    screen.resize(win, lines, cols)?;
    screen.window_mut(win)?.move_cursor(0, 0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell as Counter;
    use std::rc::Rc;

    use super::*;
    use crate::error::SurfaceError;
    use crate::input::ScriptedEvents;
    use crate::layout::Anchor;
    use crate::logging::{Logger, QueueSink};
    use crate::surface::Attr;

    fn runtime(width: u16, height: u16) -> Runtime {
        Runtime::scripted(Size::new(width, height), ScriptedEvents::new())
    }

    fn grid(rt: &mut Runtime) -> Grid {
        let root = rt.screen().root();
        Grid::new(rt, root, GridConfig::default()).unwrap()
    }

    #[test]
    fn end_to_end_scenario() {
        let mut rt = runtime(80, 24);
        let mut grid = grid(&mut rt);

        let a = grid
            .place(&mut rt, BoxSpec::new("a", 5, 10).top(Anchor::Grid).left(Anchor::Grid))
            .unwrap();
        let window = rt.screen().window(a).unwrap();
        assert_eq!(window.getbegyx(), (1, 1));
        assert_eq!(window.getmaxyx(), (3, 8));

        let b = grid
            .place(&mut rt, BoxSpec::new("b", 5, 10).top(Anchor::Grid).left2r(a))
            .unwrap();
        let (a_y, a_x) = rt.screen().window(a).unwrap().getbegyx();
        let (_, a_cols) = rt.screen().window(a).unwrap().getmaxyx();
        let (b_y, b_x) = rt.screen().window(b).unwrap().getbegyx();
        assert_eq!(b_x, a_x + a_cols + 1);
        assert_eq!(b_y, a_y);
        assert_eq!(grid.boxes(), &[grid.window(), a, b]);

        rt.screen_mut().set_size(Size::new(100, 30));
        grid.handle_term_resized_event(&mut rt).unwrap();
        assert_eq!(grid.boxes(), &[grid.window()]);
        assert_eq!(grid.size(), Size::new(100, 30));
        assert!(!rt.screen().exists(a));
    }

    #[test]
    fn placing_the_same_box_twice_is_idempotent() {
        let mut rt = runtime(80, 24);
        let mut grid = grid(&mut rt);
        let spec = BoxSpec::new("x", 10, 20).at(1, 1);

        let first = grid.place(&mut rt, spec.clone()).unwrap();
        let geometry = rt.screen().window(first).unwrap().rect();
        let second = grid.place(&mut rt, spec).unwrap();

        assert_eq!(first, second);
        assert_eq!(rt.screen().window(second).unwrap().rect(), geometry);
        assert_eq!(grid.boxes().len(), 2);
        assert_eq!(grid.find("x"), Some(first));
        assert_eq!(grid.boxname(first), Some("x"));
    }

    #[test]
    fn upsert_moves_and_resizes_in_place() {
        let mut rt = runtime(40, 12);
        let mut grid = grid(&mut rt);
        let win = grid.place(&mut rt, BoxSpec::new("x", 4, 6).at(0, 0)).unwrap();
        let moved = grid.place(&mut rt, BoxSpec::new("x", 6, 10).at(5, 29)).unwrap();
        assert_eq!(win, moved);
        let window = rt.screen().window(win).unwrap();
        assert_eq!(window.getbegyx(), (6, 30));
        assert_eq!(window.getmaxyx(), (4, 8));
    }

    #[test]
    fn invalid_requests_leave_the_grid_unchanged() {
        let mut rt = runtime(20, 10);
        let mut grid = grid(&mut rt);

        let err = grid
            .place(
                &mut rt,
                BoxSpec::new("c", 4, 4).left(Anchor::Grid).left2r(Anchor::Grid),
            )
            .unwrap_err();
        assert!(matches!(err, LayoutError::MutuallyExclusive { .. }));

        let err = grid
            .place(&mut rt, BoxSpec::new("big", 11, 4).at(0, 0))
            .unwrap_err();
        assert!(matches!(err, LayoutError::OutOfBounds { lines: 11, .. }));

        let err = grid
            .place(&mut rt, BoxSpec::new("thin", 2, 4).at(0, 0))
            .unwrap_err();
        assert!(matches!(err, LayoutError::OutOfBounds { .. }));

        assert_eq!(grid.boxes().len(), 1);
        assert!(!grid.occupancy.occupied(1, 1));
    }

    #[test]
    fn oversized_requests_are_out_of_bounds() {
        let mut rt = runtime(20, 10);
        let mut grid = grid(&mut rt);

        let err = grid
            .place(&mut rt, BoxSpec::new("x", i32::MAX, 5).at(1, 0))
            .unwrap_err();
        assert!(matches!(err, LayoutError::OutOfBounds { lines: i32::MAX, .. }));

        let err = grid
            .place(&mut rt, BoxSpec::new("x", 5, i32::MIN).right(Anchor::Grid))
            .unwrap_err();
        assert!(matches!(err, LayoutError::OutOfBounds { .. }));

        let err = grid
            .place(&mut rt, BoxSpec::new("x", 4, 4).at(i32::MAX, i32::MAX))
            .unwrap_err();
        assert!(matches!(err, LayoutError::OutOfBounds { .. }));

        assert_eq!(grid.boxes().len(), 1);
        assert!(grid.find("x").is_none());
    }

    #[test]
    fn root_anchor_means_the_grid() {
        let mut rt = runtime(20, 10);
        let mut grid = grid(&mut rt);
        let root = grid.window();
        let win = grid
            .place(&mut rt, BoxSpec::new("r", 4, 6).right(root).bottom(root))
            .unwrap();
        let window = rt.screen().window(win).unwrap();
        assert_eq!(window.getbegyx(), (7, 15));
    }

    #[test]
    fn per_box_background_overrides_default() {
        let mut rt = runtime(20, 10);
        let root = rt.screen().root();
        let config = GridConfig {
            bkgd_grid: None,
            bkgd_box: Some(Cell::new('.', Style::new())),
        };
        let mut grid = Grid::new(&mut rt, root, config).unwrap();
        let plain = grid.place(&mut rt, BoxSpec::new("p", 3, 4).at(0, 0)).unwrap();
        let custom = grid
            .place(
                &mut rt,
                BoxSpec::new("c", 3, 4).at(0, 5).bkgd(Cell::new(':', Style::new())),
            )
            .unwrap();
        assert_eq!(rt.screen().window(plain).unwrap().row_text(0), "..");
        assert_eq!(rt.screen().window(custom).unwrap().row_text(0), "::");
    }

    #[test]
    fn redraw_collapses_shared_borders() {
        let mut rt = runtime(12, 5);
        let (sink, records) = QueueSink::new();
        rt.config_mut().logger = Some(Logger::new(sink));
        let mut grid = grid(&mut rt);
        let a = grid
            .place(
                &mut rt,
                BoxSpec::new("a", 0, 6)
                    .top(Anchor::Grid)
                    .bottom(Anchor::Grid)
                    .left(Anchor::Grid),
            )
            .unwrap();
        grid.place(
            &mut rt,
            BoxSpec::new("b", 0, 0)
                .top(Anchor::Grid)
                .bottom(Anchor::Grid)
                .left2r(a)
                .right(Anchor::Grid),
        )
        .unwrap();

        grid.redraw(&mut rt).unwrap();
        let screen = rt.screen();
        assert_eq!(screen.row_text(0), "┌────┬─────┐");
        assert_eq!(screen.row_text(2), "│    │     │");
        assert_eq!(screen.row_text(4), "└────┴─────┘");
        assert!(records.try_iter().all(|event| event.level != LogLevel::Error));
    }

    #[test]
    fn highlighted_border_renders_in_reverse() {
        let mut rt = runtime(12, 5);
        let mut grid = grid(&mut rt);
        let a = grid.place(&mut rt, BoxSpec::new("a", 5, 6).at(0, 0)).unwrap();

        grid.border_attr(&rt, a, Side::Right, true).unwrap();
        grid.redraw(&mut rt).unwrap();
        let root = rt.screen().window(grid.window()).unwrap();
        for y in 1..=3 {
            assert!(root.inch(y, 5).unwrap().style.attr.contains(Attr::REVERSE));
        }
        assert!(!root.inch(2, 0).unwrap().style.attr.contains(Attr::REVERSE));
        // the corners at either end of the side stay plain
        assert!(!root.inch(0, 5).unwrap().style.attr.contains(Attr::REVERSE));
        assert!(!root.inch(4, 5).unwrap().style.attr.contains(Attr::REVERSE));

        grid.border_attr(&rt, a, Side::Right, false).unwrap();
        grid.redraw(&mut rt).unwrap();
        let root = rt.screen().window(grid.window()).unwrap();
        assert!(!root.inch(2, 5).unwrap().style.attr.contains(Attr::REVERSE));
    }

    #[test]
    fn getwin_finds_the_enclosing_box() {
        let mut rt = runtime(20, 10);
        let mut grid = grid(&mut rt);
        let a = grid.place(&mut rt, BoxSpec::new("a", 4, 6).at(0, 0)).unwrap();
        assert_eq!(grid.getwin(&rt, 1, 1), Some(a));
        assert_eq!(grid.getwin(&rt, 0, 0), None);
        assert_eq!(grid.getwin(&rt, 8, 15), None);
        assert_eq!(grid.winyx(&rt, a), "a l=2 c=4 y=1 x=1");
    }

    #[test]
    fn builder_runs_on_registration_and_after_resize() {
        let mut rt = runtime(40, 12);
        let mut grid = grid(&mut rt);
        let runs = Rc::new(Counter::new(0));
        let counter = Rc::clone(&runs);
        grid.register_builder(&mut rt, move |grid, rt| {
            counter.set(counter.get() + 1);
            let half = grid.size().width as i32 / 2;
            let left = grid.place(
                rt,
                BoxSpec::new("left", 0, half)
                    .top(Anchor::Grid)
                    .bottom(Anchor::Grid)
                    .left(Anchor::Grid),
            )?;
            grid.place(
                rt,
                BoxSpec::new("right", 0, 0)
                    .top(Anchor::Grid)
                    .bottom(Anchor::Grid)
                    .left2r(left)
                    .right(Anchor::Grid),
            )?;
            grid.redraw(rt)
        })
        .unwrap();
        assert_eq!(runs.get(), 1);
        let before = grid.find("left").unwrap();

        rt.screen_mut().set_size(Size::new(60, 20));
        grid.on_hotkey(&mut rt, &Key::Resize).unwrap();
        assert_eq!(runs.get(), 2);
        assert_eq!(grid.boxes().len(), 3);
        let after = grid.find("left").unwrap();
        assert_ne!(before, after);
        assert_eq!(rt.screen().window(after).unwrap().getmaxyx(), (18, 28));
        assert_eq!(
            rt.screen().window(before).unwrap_err(),
            SurfaceError::NoSuchWindow(before)
        );
    }
}
