use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::mouse::MouseEvent;

/// A decoded keystroke, mouse report or terminal resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    /// Ctrl-U: discard the line being edited.
    KillLine,
    /// Ctrl-L: repaint request.
    FormFeed,
    /// F5: repaint request.
    Refresh,
    Left,
    Right,
    Up,
    Down,
    Function(u8),
    /// The terminal changed size; the new size is already on the screen.
    Resize,
    Mouse(MouseEvent),
    /// Ctrl-D.
    EndOfInput,
    /// Ctrl-C.
    Interrupt,
    Other(KeyCode),
}

impl Key {
    /// Translate a terminal key event. Releases and repeats of releases are
    /// dropped.
    pub fn from_event(event: &KeyEvent) -> Option<Key> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let key = match event.code {
            KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
                'd' => Key::EndOfInput,
                'c' => Key::Interrupt,
                'u' => Key::KillLine,
                'l' => Key::FormFeed,
                'h' => Key::Backspace,
                'j' | 'm' => Key::Enter,
                'i' => Key::Tab,
                '[' => Key::Esc,
                _ => Key::Other(event.code),
            },
            KeyCode::Char('\n') | KeyCode::Char('\r') | KeyCode::Enter => Key::Enter,
            KeyCode::Char('\u{8}') | KeyCode::Char('\u{7f}') | KeyCode::Backspace => {
                Key::Backspace
            }
            KeyCode::Char('\u{15}') => Key::KillLine,
            KeyCode::Char('\u{c}') => Key::FormFeed,
            KeyCode::Char('\t') | KeyCode::Tab => Key::Tab,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Esc => Key::Esc,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::F(5) => Key::Refresh,
            KeyCode::F(n) => Key::Function(n),
            code => Key::Other(code),
        };
        Some(key)
    }

    /// Keys that end input the way a closed stream does.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Key::EndOfInput | Key::Interrupt)
    }

    /// True for the keys that ask for a full repaint.
    pub fn is_refresh(&self) -> bool {
        matches!(self, Key::FormFeed | Key::Refresh)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c:?}"),
            Key::Enter => f.write_str("ENTER"),
            Key::Esc => f.write_str("ESC"),
            Key::Backspace => f.write_str("BACKSPACE"),
            Key::Tab => f.write_str("TAB"),
            Key::KillLine => f.write_str("^U"),
            Key::FormFeed => f.write_str("^L"),
            Key::Refresh => f.write_str("F5"),
            Key::Left => f.write_str("LEFT"),
            Key::Right => f.write_str("RIGHT"),
            Key::Up => f.write_str("UP"),
            Key::Down => f.write_str("DOWN"),
            Key::Function(n) => write!(f, "F{n}"),
            Key::Resize => f.write_str("RESIZE"),
            Key::Mouse(mouse) => write!(f, "MOUSE({mouse})"),
            Key::EndOfInput => f.write_str("^D"),
            Key::Interrupt => f.write_str("^C"),
            Key::Other(code) => write!(f, "{code:?}"),
        }
    }
}
