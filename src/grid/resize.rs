//! Interactive border resize.
//!
//! A button-1 press on an interior straight border cell starts a session
//! that moves the border between the two boxes it separates. In drag mode
//! the border follows the pointer until the button is released; in keyboard
//! mode (Ctrl-click or double-click) arrow keys and the wheel move it one
//! cell at a time until Enter, Esc or another click. A terminal resize ends
//! either kind of session and rebuilds the grid.

use crate::border::Glyph;
use crate::error::Result;
use crate::geometry::Axis;
use crate::input::{Key, MouseEvent};
use crate::logging::{LogLevel, json_kv, json_str};
use crate::runtime::Runtime;
use crate::surface::{Screen, WindowId};

use super::core::{Grid, Side};

const TARGET: &str = "room::grid.resize";

/// The boxes on either side of the grabbed border. At least one is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePair {
    Columns {
        left: Option<WindowId>,
        right: Option<WindowId>,
    },
    Rows {
        upper: Option<WindowId>,
        lower: Option<WindowId>,
    },
}

impl ResizePair {
    fn is_empty(&self) -> bool {
        match self {
            ResizePair::Columns { left, right } => left.is_none() && right.is_none(),
            ResizePair::Rows { upper, lower } => upper.is_none() && lower.is_none(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    Drag,
    Keyboard,
}

/// State of one resize gesture. `(y, x)` is the grabbed border cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSession {
    pub pair: ResizePair,
    pub mode: ResizeMode,
    pub y: u16,
    pub x: u16,
    awaiting_release: bool,
}

impl ResizeSession {
    pub fn new(pair: ResizePair, mode: ResizeMode, y: u16, x: u16) -> Self {
        Self {
            pair,
            mode,
            y,
            x,
            awaiting_release: false,
        }
    }

    /// Wheel steps act as arrows along the active axis.
    fn wheel_key(&self, mouse: &MouseEvent) -> Option<Key> {
        match (self.pair, mouse.button) {
            (ResizePair::Columns { .. }, 4) => Some(Key::Left),
            (ResizePair::Columns { .. }, 5) => Some(Key::Right),
            (ResizePair::Rows { .. }, 4) => Some(Key::Up),
            (ResizePair::Rows { .. }, 5) => Some(Key::Down),
            _ => None,
        }
    }
}

enum Step {
    To(u16, u16),
    Ignore,
    Exit,
}

impl Grid {
    /// Start a resize session if `mouse` grabs an interior border.
    /// Returns true if the event was consumed.
    pub fn handle_mouse_event(&mut self, rt: &mut Runtime, mouse: &MouseEvent) -> Result<bool> {
        if mouse.button != 1 || !(mouse.is_pressed || mouse.nclicks == 2) {
            return Ok(false);
        }
        if !self.in_drag_bounds(mouse.y, mouse.x) {
            return Ok(false);
        }
        let Some(cell) = rt
            .screen()
            .window(self.win)?
            .inch(mouse.y - self.begin_y, mouse.x - self.begin_x)
        else {
            return Ok(false);
        };

        let (y, x) = (mouse.y, mouse.x);
        let pair = if cell.ch == Glyph::VLine.symbol() {
            ResizePair::Columns {
                left: self.getwin(rt, y, x - 1),
                right: self.getwin(rt, y, x + 1),
            }
        } else if cell.ch == Glyph::HLine.symbol() {
            ResizePair::Rows {
                upper: self.getwin(rt, y - 1, x),
                lower: self.getwin(rt, y + 1, x),
            }
        } else {
            return Ok(false);
        };
        if pair.is_empty() {
            rt.log(
                LogLevel::Debug,
                TARGET,
                "no_boxes_at_border",
                [json_kv("y", y), json_kv("x", x)],
            );
            return Ok(false);
        }

        let mode = if mouse.is_ctrl || mouse.nclicks == 2 {
            ResizeMode::Keyboard
        } else {
            ResizeMode::Drag
        };
        let mut session = ResizeSession::new(pair, mode, y, x);
        session.awaiting_release = mode == ResizeMode::Keyboard && !mouse.is_released;
        self.run_session(rt, session)?;
        Ok(true)
    }

    /// Drive a session until it exits.
    pub fn run_session(&mut self, rt: &mut Runtime, mut session: ResizeSession) -> Result<()> {
        rt.log(
            LogLevel::Debug,
            TARGET,
            "session_started",
            [
                json_str("pair", self.describe(rt, &session.pair)),
                json_str("mode", format!("{:?}", session.mode)),
            ],
        );

        let mut resized = false;
        let mut term_resized = false;
        loop {
            if resized {
                self.redraw(rt)?;
            }
            self.highlight_pair(rt, &session.pair, true)?;
            self.redraw(rt)?;
            let key = rt.getkey_raw(None)?;
            self.highlight_pair(rt, &session.pair, false)?;
            self.redraw(rt)?;

            let Some(key) = key else {
                break;
            };
            match key {
                Key::Enter | Key::Esc => break,
                Key::Resize => {
                    term_resized = true;
                    break;
                }
                key if key.is_refresh() => {
                    self.redraw(rt)?;
                    resized = false;
                    continue;
                }
                _ => {}
            }

            let step = match session.mode {
                ResizeMode::Drag => drag_step(&key),
                ResizeMode::Keyboard => self.keyboard_step(&mut session, key),
            };
            match step {
                Step::To(y, x) => resized = self.move_border(rt, &mut session, y, x)?,
                Step::Ignore => resized = false,
                Step::Exit => break,
            }
        }

        rt.log(
            LogLevel::Debug,
            TARGET,
            "session_ended",
            [json_str("pair", self.describe(rt, &session.pair))],
        );
        // the boxes of the pair are rebuilt for the new size
        if term_resized {
            rt.hotkey(self, &Key::Resize)?;
        }
        Ok(())
    }

    fn keyboard_step(&self, session: &mut ResizeSession, key: Key) -> Step {
        let key = match key {
            Key::Mouse(mouse) => match session.wheel_key(&mouse) {
                Some(key) => key,
                None if mouse.is_released && session.awaiting_release => {
                    // end of the click that started the session
                    session.awaiting_release = false;
                    return Step::Ignore;
                }
                None if mouse.nclicks > 0 || mouse.is_released => return Step::Exit,
                None => return Step::Ignore,
            },
            key => key,
        };

        let (y, x) = (session.y, session.x);
        let (min_y, max_y, min_x, max_x) = self.drag_bounds();
        match (session.pair, key) {
            (ResizePair::Columns { .. }, Key::Left) if x > min_x => Step::To(y, x - 1),
            (ResizePair::Columns { .. }, Key::Right) if x < max_x => Step::To(y, x + 1),
            (ResizePair::Rows { .. }, Key::Up) if y > min_y => Step::To(y - 1, x),
            (ResizePair::Rows { .. }, Key::Down) if y < max_y => Step::To(y + 1, x),
            _ => Step::Ignore,
        }
    }

    /// Move the border one cell at a time toward `(y, x)`, stopping at the
    /// first refused step. Returns true if anything moved.
    fn move_border(
        &mut self,
        rt: &mut Runtime,
        session: &mut ResizeSession,
        y: u16,
        x: u16,
    ) -> Result<bool> {
        let (min_y, max_y, min_x, max_x) = self.drag_bounds();
        let (y, x) = (y.clamp(min_y, max_y), x.clamp(min_x, max_x));
        let mut moved = false;

        match session.pair {
            ResizePair::Columns { left, right } => {
                while session.x != x {
                    let step = if x < session.x { -1 } else { 1 };
                    if !shift(rt, Axis::Horizontal, left, right, step)? {
                        break;
                    }
                    session.x = (session.x as i32 + step) as u16;
                    moved = true;
                }
                session.y = y;
            }
            ResizePair::Rows { upper, lower } => {
                while session.y != y {
                    let step = if y < session.y { -1 } else { 1 };
                    if !shift(rt, Axis::Vertical, upper, lower, step)? {
                        break;
                    }
                    session.y = (session.y as i32 + step) as u16;
                    moved = true;
                }
                session.x = x;
            }
        }
        Ok(moved)
    }

    fn highlight_pair(&mut self, rt: &Runtime, pair: &ResizePair, flag: bool) -> Result<()> {
        match *pair {
            ResizePair::Columns { left: Some(win), .. } => {
                self.border_attr(rt, win, Side::Right, flag)
            }
            ResizePair::Columns { right: Some(win), .. } => {
                self.border_attr(rt, win, Side::Left, flag)
            }
            ResizePair::Rows { upper: Some(win), .. } => {
                self.border_attr(rt, win, Side::Bottom, flag)
            }
            ResizePair::Rows { lower: Some(win), .. } => self.border_attr(rt, win, Side::Top, flag),
            _ => Ok(()),
        }
    }

    /// Inclusive `(min_y, max_y, min_x, max_x)` a border may occupy: the
    /// grid interior.
    fn drag_bounds(&self) -> (u16, u16, u16, u16) {
        (
            self.begin_y + 1,
            self.begin_y + self.lines.saturating_sub(2),
            self.begin_x + 1,
            self.begin_x + self.cols.saturating_sub(2),
        )
    }

    fn in_drag_bounds(&self, y: u16, x: u16) -> bool {
        let (min_y, max_y, min_x, max_x) = self.drag_bounds();
        (min_y..=max_y).contains(&y) && (min_x..=max_x).contains(&x)
    }

    fn describe(&self, rt: &Runtime, pair: &ResizePair) -> String {
        let name = |win: Option<WindowId>| match win {
            Some(win) => self.winyx(rt, win),
            None => "-".to_string(),
        };
        match *pair {
            ResizePair::Columns { left, right } => format!("{} | {}", name(left), name(right)),
            ResizePair::Rows { upper, lower } => format!("{} / {}", name(upper), name(lower)),
        }
    }
}

fn drag_step(key: &Key) -> Step {
    match key {
        Key::Mouse(mouse) if mouse.is_released => Step::Exit,
        Key::Mouse(mouse) if mouse.is_moving => Step::To(mouse.y, mouse.x),
        _ => Step::Ignore,
    }
}

/// Move the border between `lo` (left/upper) and `hi` (right/lower) by one
/// cell along `axis`. The window that would shrink must keep at least one
/// cell; otherwise nothing changes and false is returned.
fn shift(
    rt: &mut Runtime,
    axis: Axis,
    lo: Option<WindowId>,
    hi: Option<WindowId>,
    step: i32,
) -> Result<bool> {
    let shrinking = if step < 0 { lo } else { hi };
    if let Some(win) = shrinking {
        if rt.screen().window(win)?.rect().extent(axis) <= 1 {
            rt.log(
                LogLevel::Trace,
                TARGET,
                "step_refused",
                [json_kv("step", step), json_str("axis", format!("{axis:?}"))],
            );
            return Ok(false);
        }
    }

    let screen = rt.screen_mut();
    if step < 0 {
        if let Some(win) = lo {
            grow(screen, win, axis, -1)?;
        }
        if let Some(win) = hi {
            slide(screen, win, axis, -1)?;
            grow(screen, win, axis, 1)?;
        }
    } else {
        if let Some(win) = hi {
            grow(screen, win, axis, -1)?;
            slide(screen, win, axis, 1)?;
        }
        if let Some(win) = lo {
            grow(screen, win, axis, 1)?;
        }
    }
    rt.record_metric(|metrics| metrics.record_resize_step());
    Ok(true)
}

fn grow(screen: &mut Screen, win: WindowId, axis: Axis, delta: i32) -> Result<()> {
    let (lines, cols) = screen.window(win)?.getmaxyx();
    let (lines, cols) = match axis {
        Axis::Vertical => ((lines as i32 + delta) as u16, cols),
        Axis::Horizontal => (lines, (cols as i32 + delta) as u16),
    };
    screen.resize(win, lines, cols)?;
    Ok(())
}

fn slide(screen: &mut Screen, win: WindowId, axis: Axis, delta: i32) -> Result<()> {
    let (y, x) = screen.window(win)?.getbegyx();
    let (y, x) = match axis {
        Axis::Vertical => ((y as i32 + delta) as u16, x),
        Axis::Horizontal => (y, (x as i32 + delta) as u16),
    };
    screen.mvwin(win, y, x)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};

    use super::*;
    use crate::geometry::Size;
    use crate::grid::GridConfig;
    use crate::input::ScriptedEvents;
    use crate::layout::{Anchor, BoxSpec};

    /// (lines, cols, begin_y, begin_x)
    fn geometry(rt: &Runtime, win: WindowId) -> (u16, u16, u16, u16) {
        let window = rt.screen().window(win).unwrap();
        let (lines, cols) = window.getmaxyx();
        let (y, x) = window.getbegyx();
        (lines, cols, y, x)
    }

    /// Two boxes side by side on a 30x10 screen sharing border column 11.
    fn columns(events: ScriptedEvents) -> (Runtime, Grid, WindowId, WindowId) {
        let mut rt = Runtime::scripted(Size::new(30, 10), events);
        let root = rt.screen().root();
        let mut grid = Grid::new(&mut rt, root, GridConfig::default()).unwrap();
        let a = grid
            .place(
                &mut rt,
                BoxSpec::new("a", 0, 12)
                    .top(Anchor::Grid)
                    .bottom(Anchor::Grid)
                    .left(Anchor::Grid),
            )
            .unwrap();
        let b = grid
            .place(
                &mut rt,
                BoxSpec::new("b", 0, 0)
                    .top(Anchor::Grid)
                    .bottom(Anchor::Grid)
                    .left2r(a)
                    .right(Anchor::Grid),
            )
            .unwrap();
        grid.redraw(&mut rt).unwrap();
        (rt, grid, a, b)
    }

    #[test]
    fn drag_moves_the_shared_border() {
        let events = ScriptedEvents::new()
            .click(4, 11)
            .mouse(MouseEventKind::Drag(MouseButton::Left), 4, 8)
            .mouse(MouseEventKind::Up(MouseButton::Left), 4, 8)
            .key(KeyCode::Char('q'))
            .build();
        let (mut rt, mut grid, a, b) = columns(events);
        assert_eq!(geometry(&rt, a), (8, 10, 1, 1));
        assert_eq!(geometry(&rt, b), (8, 17, 1, 12));

        let key = rt.getkey(&mut grid, None).unwrap();
        assert_eq!(key, Some(Key::Char('q')));
        assert_eq!(geometry(&rt, a), (8, 7, 1, 1));
        assert_eq!(geometry(&rt, b), (8, 20, 1, 9));
        assert_eq!(rt.screen().row_text(4).chars().nth(8), Some('│'));
    }

    #[test]
    fn drag_stops_at_the_minimum_size() {
        let events = ScriptedEvents::new()
            .click(4, 11)
            .mouse(MouseEventKind::Drag(MouseButton::Left), 4, 0)
            .mouse(MouseEventKind::Drag(MouseButton::Left), 4, 0)
            .build();
        let (mut rt, mut grid, a, b) = columns(events);
        let total = geometry(&rt, a).1 + geometry(&rt, b).1;

        assert_eq!(rt.getkey(&mut grid, None).unwrap(), None);
        assert_eq!(geometry(&rt, a), (8, 1, 1, 1));
        assert_eq!(geometry(&rt, b), (8, 26, 1, 3));
        assert_eq!(geometry(&rt, a).1 + geometry(&rt, b).1, total);
    }

    #[test]
    fn ctrl_click_enters_keyboard_mode() {
        let ctrl = KeyModifiers::CONTROL;
        let events = ScriptedEvents::new()
            .mouse_with(MouseEventKind::Down(MouseButton::Left), 4, 11, ctrl)
            .mouse_with(MouseEventKind::Up(MouseButton::Left), 4, 11, ctrl)
            .key(KeyCode::Right)
            .key(KeyCode::Right)
            .key(KeyCode::Up)
            .key_with(KeyCode::Char('l'), ctrl)
            .mouse(MouseEventKind::ScrollUp, 2, 2)
            .key(KeyCode::Enter)
            .key(KeyCode::Char('q'))
            .build();
        let (mut rt, mut grid, a, b) = columns(events);

        assert_eq!(rt.getkey(&mut grid, None).unwrap(), Some(Key::Char('q')));
        assert_eq!(geometry(&rt, a), (8, 11, 1, 1));
        assert_eq!(geometry(&rt, b), (8, 16, 1, 13));
    }

    #[test]
    fn double_click_enters_keyboard_mode() {
        let events = ScriptedEvents::new()
            .click(4, 11)
            .mouse(MouseEventKind::Up(MouseButton::Left), 4, 11)
            .click(4, 11)
            .mouse(MouseEventKind::Up(MouseButton::Left), 4, 11)
            .key(KeyCode::Left)
            .mouse(MouseEventKind::ScrollUp, 2, 2)
            .key(KeyCode::Esc)
            .build();
        let (mut rt, mut grid, a, b) = columns(events);

        assert_eq!(rt.getkey(&mut grid, None).unwrap(), None);
        assert_eq!(geometry(&rt, a), (8, 8, 1, 1));
        assert_eq!(geometry(&rt, b), (8, 19, 1, 10));
    }

    #[test]
    fn keyboard_mode_exits_on_release() {
        let ctrl = KeyModifiers::CONTROL;
        let events = ScriptedEvents::new()
            .mouse_with(MouseEventKind::Down(MouseButton::Left), 4, 11, ctrl)
            .mouse(MouseEventKind::Up(MouseButton::Left), 4, 11)
            .key(KeyCode::Left)
            .mouse(MouseEventKind::Up(MouseButton::Left), 6, 20)
            .key(KeyCode::Left)
            .build();
        let (mut rt, mut grid, a, _) = columns(events);

        // the second Left arrives after the session ended
        assert_eq!(rt.getkey(&mut grid, None).unwrap(), Some(Key::Left));
        assert_eq!(geometry(&rt, a).1, 9);
    }

    #[test]
    fn keyboard_mode_exits_on_press() {
        let ctrl = KeyModifiers::CONTROL;
        let events = ScriptedEvents::new()
            .mouse_with(MouseEventKind::Down(MouseButton::Left), 4, 11, ctrl)
            .mouse(MouseEventKind::Up(MouseButton::Left), 4, 11)
            .key(KeyCode::Left)
            .click(6, 20)
            .key(KeyCode::Left)
            .build();
        let (mut rt, mut grid, a, b) = columns(events);

        assert_eq!(rt.getkey(&mut grid, None).unwrap(), Some(Key::Left));
        assert_eq!(geometry(&rt, a), (8, 9, 1, 1));
        assert_eq!(geometry(&rt, b), (8, 18, 1, 11));
    }

    #[test]
    fn keyboard_stops_at_the_minimum_size_on_the_right() {
        let ctrl = KeyModifiers::CONTROL;
        let mut events = ScriptedEvents::new();
        events
            .mouse_with(MouseEventKind::Down(MouseButton::Left), 4, 11, ctrl)
            .mouse(MouseEventKind::Up(MouseButton::Left), 4, 11);
        for _ in 0..20 {
            events.key(KeyCode::Right);
        }
        let events = events.key(KeyCode::Enter).build();
        let (mut rt, mut grid, a, b) = columns(events);
        let total = geometry(&rt, a).1 + geometry(&rt, b).1;

        assert_eq!(rt.getkey(&mut grid, None).unwrap(), None);
        assert_eq!(geometry(&rt, a), (8, 26, 1, 1));
        assert_eq!(geometry(&rt, b), (8, 1, 1, 28));
        assert_eq!(geometry(&rt, a).1 + geometry(&rt, b).1, total);
    }

    #[test]
    fn terminal_resize_ends_the_session() {
        let ctrl = KeyModifiers::CONTROL;
        let events = ScriptedEvents::new()
            .mouse_with(MouseEventKind::Down(MouseButton::Left), 4, 11, ctrl)
            .mouse(MouseEventKind::Up(MouseButton::Left), 4, 11)
            .key(KeyCode::Right)
            .resize(40, 12)
            .key(KeyCode::Char('q'))
            .build();
        let (mut rt, mut grid, a, b) = columns(events);

        assert_eq!(rt.getkey(&mut grid, None).unwrap(), Some(Key::Char('q')));
        assert_eq!(grid.size(), Size::new(40, 12));
        assert_eq!(grid.boxes().len(), 1);
        assert!(!rt.screen().exists(a));
        assert!(!rt.screen().exists(b));
    }

    /// Two stacked boxes on a 20x12 screen sharing border row 5.
    fn rows(events: ScriptedEvents) -> (Runtime, Grid, WindowId, WindowId) {
        let mut rt = Runtime::scripted(Size::new(20, 12), events);
        let root = rt.screen().root();
        let mut grid = Grid::new(&mut rt, root, GridConfig::default()).unwrap();
        let upper = grid
            .place(
                &mut rt,
                BoxSpec::new("upper", 6, 0)
                    .top(Anchor::Grid)
                    .left(Anchor::Grid)
                    .right(Anchor::Grid),
            )
            .unwrap();
        let lower = grid
            .place(
                &mut rt,
                BoxSpec::new("lower", 0, 0)
                    .top2b(upper)
                    .bottom(Anchor::Grid)
                    .left(Anchor::Grid)
                    .right(Anchor::Grid),
            )
            .unwrap();
        grid.redraw(&mut rt).unwrap();
        (rt, grid, upper, lower)
    }

    #[test]
    fn rows_resize_with_arrow_keys() {
        let ctrl = KeyModifiers::CONTROL;
        let events = ScriptedEvents::new()
            .mouse_with(MouseEventKind::Down(MouseButton::Left), 5, 10, ctrl)
            .key(KeyCode::Down)
            .key(KeyCode::Left)
            .key(KeyCode::Enter)
            .build();
        let (mut rt, mut grid, upper, lower) = rows(events);
        assert_eq!(geometry(&rt, lower), (5, 18, 6, 1));

        assert_eq!(rt.getkey(&mut grid, None).unwrap(), None);
        assert_eq!(geometry(&rt, upper), (5, 18, 1, 1));
        assert_eq!(geometry(&rt, lower), (4, 18, 7, 1));
    }

    #[test]
    fn keyboard_stops_at_the_minimum_size_below() {
        let ctrl = KeyModifiers::CONTROL;
        let mut events = ScriptedEvents::new();
        events.mouse_with(MouseEventKind::Down(MouseButton::Left), 5, 10, ctrl);
        for _ in 0..8 {
            events.key(KeyCode::Down);
        }
        let events = events.key(KeyCode::Enter).build();
        let (mut rt, mut grid, upper, lower) = rows(events);
        let total = geometry(&rt, upper).0 + geometry(&rt, lower).0;

        assert_eq!(rt.getkey(&mut grid, None).unwrap(), None);
        assert_eq!(geometry(&rt, upper), (8, 18, 1, 1));
        assert_eq!(geometry(&rt, lower), (1, 18, 10, 1));
        assert_eq!(geometry(&rt, upper).0 + geometry(&rt, lower).0, total);
    }

    #[test]
    fn presses_off_the_border_are_not_consumed() {
        let (mut rt, mut grid, _, _) = columns(ScriptedEvents::new());
        assert!(!grid.handle_mouse_event(&mut rt, &MouseEvent::press(4, 5)).unwrap());
        // the outer perimeter is not draggable
        assert!(!grid.handle_mouse_event(&mut rt, &MouseEvent::press(0, 11)).unwrap());
        let mut right = MouseEvent::press(4, 11);
        right.button = 3;
        assert!(!grid.handle_mouse_event(&mut rt, &right).unwrap());
    }
}
