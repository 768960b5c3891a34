//! Terminal context: screen, event source, hot-keys, mouse handlers and the
//! shared terminal writer, plus the key readers built on them.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::cursor::MoveTo;
use crossterm::event::{EnableMouseCapture, Event};
use crossterm::{execute, queue};
use serde_json::json;

use crate::error::Result;
use crate::geometry::Size;
use crate::input::{
    Binding, EventSource, InputHandler, Key, MouseDecoder, MouseEvent, MouseHandlers, HotKeys,
    ScriptedEvents, TerminalEvents,
};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::RenderMetrics;
use crate::surface::{Screen, Style, WindowId};
use crate::width::char_width;

mod driver;

pub use driver::TerminalGuard;

/// Terminal writer shared by everything that flushes frames.
pub type SharedTerminal = Arc<Mutex<Box<dyn Write + Send>>>;

const TARGET: &str = "room::runtime";

#[derive(Clone)]
pub struct RuntimeConfig {
    /// Optional structured logger used by the runtime and the grid.
    pub logger: Option<Logger>,
    /// Longest gap between presses that still counts as a multi-click.
    pub double_click_interval: Duration,
    /// Metrics accumulator; `None` disables collection.
    pub metrics: Option<Arc<Mutex<RenderMetrics>>>,
    /// Target used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            logger: None,
            double_click_interval: Duration::from_millis(300),
            metrics: None,
            metrics_target: "room::grid.metrics".to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(RenderMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<RenderMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Outcome of a non-blocking read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polled {
    Key(Key),
    NoInput,
    Eof,
}

pub struct Runtime {
    screen: Screen,
    source: Box<dyn EventSource>,
    decoder: MouseDecoder,
    hotkeys: HotKeys,
    mouse: MouseHandlers,
    terminal: SharedTerminal,
    cursor_win: WindowId,
    config: RuntimeConfig,
    mouse_enabled: bool,
    grid_hooks: bool,
    started: Instant,
}

impl Runtime {
    pub fn new<S, W>(size: Size, source: S, out: W) -> Self
    where
        S: EventSource + 'static,
        W: Write + Send + 'static,
    {
        Self::with_config(size, source, out, RuntimeConfig::default())
    }

    pub fn with_config<S, W>(size: Size, source: S, out: W, config: RuntimeConfig) -> Self
    where
        S: EventSource + 'static,
        W: Write + Send + 'static,
    {
        Self {
            screen: Screen::new(size),
            source: Box::new(source),
            decoder: MouseDecoder::new(config.double_click_interval),
            hotkeys: HotKeys::new(),
            mouse: MouseHandlers::new(),
            terminal: Arc::new(Mutex::new(Box::new(out))),
            cursor_win: WindowId::ROOT,
            config,
            mouse_enabled: false,
            grid_hooks: false,
            started: Instant::now(),
        }
    }

    /// Runtime on the controlling terminal, sized to it.
    pub fn stdio(config: RuntimeConfig) -> Result<Self> {
        let (width, height) = crossterm::terminal::size()?;
        Ok(Self::with_config(
            Size::new(width, height),
            TerminalEvents,
            io::stdout(),
            config,
        ))
    }

    /// Headless runtime fed from a script; frames are discarded.
    pub fn scripted(size: Size, events: ScriptedEvents) -> Self {
        Self::new(size, events, io::sink())
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn hotkeys_mut(&mut self) -> &mut HotKeys {
        &mut self.hotkeys
    }

    pub fn mouse_handlers_mut(&mut self) -> &mut MouseHandlers {
        &mut self.mouse
    }

    /// Handle to the terminal writer; hold its lock while writing to the
    /// terminal from another thread.
    pub fn terminal(&self) -> SharedTerminal {
        Arc::clone(&self.terminal)
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RuntimeConfig {
        &mut self.config
    }

    /// Window whose cursor is shown while waiting for input.
    pub fn cursor_window(&self) -> WindowId {
        self.cursor_win
    }

    pub fn enable_mouse(&mut self) -> Result<()> {
        if self.mouse_enabled {
            return Ok(());
        }
        let mut out = lock(&self.terminal)?;
        execute!(out, EnableMouseCapture)?;
        drop(out);
        self.mouse_enabled = true;
        self.log(LogLevel::Debug, TARGET, "mouse_enabled", std::iter::empty());
        Ok(())
    }

    /// Bind the repaint and resize keys to the internal handler and route
    /// mouse events to it. Done once per runtime.
    pub(crate) fn install_grid_hooks(&mut self) -> Result<()> {
        if self.grid_hooks {
            return Ok(());
        }
        self.grid_hooks = true;
        for key in [Key::Refresh, Key::FormFeed, Key::Resize] {
            self.hotkeys.bind_internal(key);
        }
        self.mouse.enable_internal();
        self.enable_mouse()
    }

    /// Flush the pending frame to the terminal under the terminal lock.
    pub fn doupdate(&mut self) -> Result<usize> {
        let mut out = lock(&self.terminal)?;
        let written = self.screen.doupdate(&mut *out)?;
        if let Ok(window) = self.screen.window(self.cursor_win) {
            let (begin_y, begin_x) = window.getbegyx();
            let (y, x) = window.getyx();
            queue!(out, MoveTo(begin_x + x, begin_y + y))?;
            out.flush()?;
        }
        drop(out);
        self.record_metric(|metrics| metrics.record_flush(written));
        Ok(written)
    }

    /// Copy `win` into the pending frame and flush.
    pub fn refresh_window(&mut self, win: WindowId) -> Result<()> {
        self.screen.noutrefresh(win)?;
        self.doupdate()?;
        Ok(())
    }

    /// Wait for a key. Mouse events go to `handler` and the registered mouse
    /// handlers; Ctrl-D, Ctrl-C and closed input yield `None`.
    pub fn getkey<H>(&mut self, handler: &mut H, win: Option<WindowId>) -> Result<Option<Key>>
    where
        H: InputHandler + ?Sized,
    {
        let win = self.focus(win);
        loop {
            self.refresh_window(win)?;
            let Some(key) = self.read_key()? else {
                return Ok(None);
            };
            match key {
                Key::Mouse(mouse) => {
                    self.dispatch_mouse(handler, &mouse)?;
                }
                key if key.is_end_of_input() => return Ok(None),
                key => return Ok(Some(key)),
            }
        }
    }

    /// Wait for a key, returning mouse events to the caller undispatched.
    pub fn getkey_raw(&mut self, win: Option<WindowId>) -> Result<Option<Key>> {
        let win = self.focus(win);
        self.refresh_window(win)?;
        Ok(self.read_key()?.filter(|key| !key.is_end_of_input()))
    }

    /// Non-blocking [`Runtime::getkey`].
    pub fn poll_key<H>(&mut self, handler: &mut H, win: Option<WindowId>) -> Result<Polled>
    where
        H: InputHandler + ?Sized,
    {
        let win = self.focus(win);
        self.refresh_window(win)?;
        loop {
            if !self.source.poll()? {
                return Ok(Polled::NoInput);
            }
            let Some(event) = self.source.read()? else {
                return Ok(Polled::Eof);
            };
            let Some(key) = self.translate(event) else {
                continue;
            };
            match key {
                Key::Mouse(mouse) => {
                    self.dispatch_mouse(handler, &mouse)?;
                    self.refresh_window(win)?;
                }
                key if key.is_end_of_input() => return Ok(Polled::Eof),
                key => return Ok(Polled::Key(key)),
            }
        }
    }

    /// Read a line of printable text, echoing it into `win`.
    ///
    /// Backspace deletes one character and Ctrl-U the whole line. Hot-keys
    /// run as they arrive; afterwards the partial line is redrawn at its
    /// starting position. Enter erases the echo and returns the line.
    pub fn getline<H>(&mut self, handler: &mut H, win: WindowId) -> Result<Option<String>>
    where
        H: InputHandler + ?Sized,
    {
        let (y, x) = self.screen.window(win)?.getyx();
        let mut line = String::new();
        loop {
            let Some(key) = self.getkey_raw(Some(win))? else {
                return Ok(None);
            };
            match key {
                Key::Enter => {
                    self.erase_echo(win, &line)?;
                    return Ok(Some(line));
                }
                Key::Backspace => {
                    if let Some(ch) = line.pop() {
                        self.erase_echo(win, ch.encode_utf8(&mut [0; 4]))?;
                    }
                }
                Key::KillLine => {
                    self.erase_echo(win, &line)?;
                    line.clear();
                }
                Key::Mouse(mouse) => {
                    self.dispatch_mouse(handler, &mouse)?;
                }
                key if self.hotkey(handler, &key)? => {
                    if !line.is_empty() {
                        self.screen
                            .window_mut(win)?
                            .mvaddstr(y, x, &line, Style::new())?;
                    }
                }
                Key::Char(ch) if !ch.is_control() => {
                    let window = self.screen.window_mut(win)?;
                    let mut buf = [0; 4];
                    match window.addstr(ch.encode_utf8(&mut buf), Style::new()) {
                        Ok(()) => line.push(ch),
                        Err(err) => {
                            // the glyph landed on the final cell; take it back
                            window.delch();
                            self.log(
                                LogLevel::Warn,
                                TARGET,
                                "getline_full",
                                [json_str("error", err.to_string())],
                            );
                        }
                    }
                }
                other => {
                    self.log(
                        LogLevel::Trace,
                        TARGET,
                        "getline_ignored",
                        [json_str("key", other.to_string())],
                    );
                }
            }
        }
    }

    /// Run the hot-key bindings for `key`. Returns false if none apply.
    pub fn hotkey<H>(&mut self, handler: &mut H, key: &Key) -> Result<bool>
    where
        H: InputHandler + ?Sized,
    {
        let Some(mut taken) = self.hotkeys.take(key) else {
            return Ok(false);
        };
        let mut outcome = Ok(true);
        for binding in taken.bindings.iter_mut() {
            match binding {
                Binding::Internal => {
                    if let Err(err) = handler.on_hotkey(self, key) {
                        outcome = Err(err);
                        break;
                    }
                }
                Binding::Callback(callback) => callback(key),
            }
        }
        self.hotkeys.restore(taken);
        outcome
    }

    /// Offer a mouse event to the internal handler, then to the row handlers.
    pub fn dispatch_mouse<H>(&mut self, handler: &mut H, mouse: &MouseEvent) -> Result<bool>
    where
        H: InputHandler + ?Sized,
    {
        if self.mouse.has_internal() && handler.on_mouse(self, mouse)? {
            return Ok(true);
        }
        if self.mouse.dispatch(mouse) {
            return Ok(true);
        }
        self.log(
            LogLevel::Trace,
            TARGET,
            "mouse_unhandled",
            [json_str("mouse", mouse.to_string()), json_kv("y", mouse.y), json_kv("x", mouse.x)],
        );
        Ok(false)
    }

    /// Emit a structured record through the configured logger, if any.
    pub fn log<I>(&self, level: LogLevel, target: &str, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            if logger.enabled(level) {
                let _ = logger.log_event(event_with_fields(level, target, message, fields));
            }
        }
    }

    /// Log a metrics snapshot now.
    pub fn emit_metrics(&self) {
        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let event = guard
                    .snapshot(self.started.elapsed())
                    .to_log_event(&self.config.metrics_target);
                let _ = logger.log_event(event);
            }
        }
    }

    pub(crate) fn record_metric(&self, record: impl FnOnce(&mut RenderMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut guard);
            }
        }
    }

    fn focus(&mut self, win: Option<WindowId>) -> WindowId {
        if let Some(win) = win {
            self.cursor_win = win;
        }
        if !self.screen.exists(self.cursor_win) {
            self.cursor_win = WindowId::ROOT;
        }
        self.cursor_win
    }

    fn read_key(&mut self) -> Result<Option<Key>> {
        loop {
            let Some(event) = self.source.read()? else {
                return Ok(None);
            };
            if let Some(key) = self.translate(event) {
                return Ok(Some(key));
            }
        }
    }

    fn translate(&mut self, event: Event) -> Option<Key> {
        match event {
            Event::Key(key) => Key::from_event(&key),
            Event::Mouse(mouse) => self.decoder.decode(&mouse).map(Key::Mouse),
            Event::Resize(width, height) => {
                self.screen.set_size(Size::new(width, height));
                self.log(
                    LogLevel::Info,
                    TARGET,
                    "terminal_resized",
                    [json_kv("width", json!(width)), json_kv("height", json!(height))],
                );
                Some(Key::Resize)
            }
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => None,
        }
    }

    fn erase_echo(&mut self, win: WindowId, text: &str) -> Result<()> {
        let window = self.screen.window_mut(win)?;
        for ch in text.chars().rev() {
            for _ in 0..char_width(ch).max(1) {
                window.addstr("\u{8}", Style::new())?;
                window.delch();
            }
        }
        Ok(())
    }
}

fn lock(terminal: &SharedTerminal) -> io::Result<std::sync::MutexGuard<'_, Box<dyn Write + Send>>> {
    terminal
        .lock()
        .map_err(|_| io::Error::other("terminal mutex poisoned"))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::logging::QueueSink;

    fn line_window(rt: &mut Runtime) -> WindowId {
        rt.screen_mut().newwin(1, 20, 1, 0).unwrap()
    }

    #[test]
    fn getline_echoes_and_edits() {
        let mut events = ScriptedEvents::new();
        events
            .text("hi")
            .key(KeyCode::Backspace)
            .text("ey")
            .key(KeyCode::Enter);
        let mut rt = Runtime::scripted(Size::new(20, 3), events.build());
        let win = line_window(&mut rt);

        assert_eq!(rt.getline(&mut (), win).unwrap().as_deref(), Some("hey"));
        let window = rt.screen().window(win).unwrap();
        assert_eq!(window.row_text(0).trim(), "");
        assert_eq!(window.getyx(), (0, 0));
    }

    #[test]
    fn getline_kill_line_and_hotkeys() {
        let mut events = ScriptedEvents::new();
        events
            .text("abc")
            .key_with(KeyCode::Char('u'), KeyModifiers::CONTROL)
            .text("xy")
            .key(KeyCode::F(2))
            .key(KeyCode::Enter);
        let mut rt = Runtime::scripted(Size::new(20, 3), events.build());
        let win = line_window(&mut rt);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        rt.hotkeys_mut()
            .bind(Key::Function(2), move |key| log.borrow_mut().push(*key));

        assert_eq!(rt.getline(&mut (), win).unwrap().as_deref(), Some("xy"));
        assert_eq!(*seen.borrow(), vec![Key::Function(2)]);
    }

    #[test]
    fn getline_returns_none_on_end_of_input() {
        let mut events = ScriptedEvents::new();
        events
            .text("ab")
            .key_with(KeyCode::Char('d'), KeyModifiers::CONTROL);
        let mut rt = Runtime::scripted(Size::new(20, 3), events.build());
        let win = line_window(&mut rt);
        assert_eq!(rt.getline(&mut (), win).unwrap(), None);
    }

    #[test]
    fn poll_key_distinguishes_idle_from_closed() {
        let mut events = ScriptedEvents::new();
        events.idle().key(KeyCode::Char('x'));
        let mut rt = Runtime::scripted(Size::new(10, 2), events.build());

        assert_eq!(rt.poll_key(&mut (), None).unwrap(), Polled::NoInput);
        assert_eq!(
            rt.poll_key(&mut (), None).unwrap(),
            Polled::Key(Key::Char('x'))
        );
        assert_eq!(rt.poll_key(&mut (), None).unwrap(), Polled::Eof);
    }

    #[test]
    fn resize_events_update_the_screen() {
        let mut events = ScriptedEvents::new();
        events.resize(30, 8);
        let mut rt = Runtime::scripted(Size::new(10, 2), events.build());
        assert_eq!(rt.getkey(&mut (), None).unwrap(), Some(Key::Resize));
        assert_eq!(rt.screen().size(), Size::new(30, 8));
    }

    #[test]
    fn getkey_dispatches_mouse_to_row_handlers() {
        let mut events = ScriptedEvents::new();
        events
            .click(2, 3)
            .click(0, 0)
            .key(KeyCode::Char('q'))
            .key_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let mut rt = Runtime::scripted(Size::new(10, 4), events.build());
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        rt.mouse_handlers_mut().add(2, 0, 5, move |_| {
            *counter.borrow_mut() += 1;
            true
        });

        assert_eq!(rt.getkey(&mut (), None).unwrap(), Some(Key::Char('q')));
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(rt.getkey(&mut (), None).unwrap(), None);
    }

    #[test]
    fn flushes_are_counted_and_logged() {
        let (sink, records) = QueueSink::new();
        let mut config = RuntimeConfig::default();
        config.logger = Some(Logger::new(sink));
        config.enable_metrics();
        let mut rt = Runtime::with_config(
            Size::new(6, 2),
            ScriptedEvents::new(),
            io::sink(),
            config,
        );

        rt.enable_mouse().unwrap();
        let root = rt.screen().root();
        rt.refresh_window(root).unwrap();
        rt.emit_metrics();

        let events: Vec<_> = records.try_iter().collect();
        assert_eq!(events[0].message, "mouse_enabled");
        let metrics = events
            .iter()
            .find(|event| event.message == "render_metrics")
            .unwrap();
        assert_eq!(metrics.target, "room::grid.metrics");
        assert_eq!(metrics.fields["flushes"], 1);
        assert_eq!(metrics.fields["cells_written"], 12);
    }
}
