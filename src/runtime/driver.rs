use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::error::{LayoutError, Result};

use super::{SharedTerminal, lock};

/// Raw mode, alternate screen and mouse capture for as long as the guard
/// lives. The terminal is restored on drop.
pub struct TerminalGuard {
    terminal: SharedTerminal,
    active: bool,
}

impl TerminalGuard {
    pub fn enter(terminal: SharedTerminal) -> Result<Self> {
        terminal::enable_raw_mode().map_err(|err| LayoutError::Terminal(err.to_string()))?;
        let mut guard = Self {
            terminal,
            active: true,
        };
        let entered = lock(&guard.terminal).and_then(|mut out| {
            execute!(
                out,
                EnterAlternateScreen,
                EnableMouseCapture,
                Hide,
                Clear(ClearType::All)
            )
        });
        if let Err(err) = entered {
            guard.restore();
            return Err(err.into());
        }
        Ok(guard)
    }

    /// Restore the terminal now rather than on drop.
    pub fn leave(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Ok(mut out) = lock(&self.terminal) {
            execute!(out, DisableMouseCapture, Show, LeaveAlternateScreen).ok();
        }
        terminal::disable_raw_mode().ok();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}
