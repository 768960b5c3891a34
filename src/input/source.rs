use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};

/// Where terminal events come from.
pub trait EventSource {
    /// Block for the next event. `None` means the input is closed.
    fn read(&mut self) -> io::Result<Option<Event>>;

    /// True when [`EventSource::read`] would not block.
    fn poll(&mut self) -> io::Result<bool>;
}

/// Events from the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn read(&mut self) -> io::Result<Option<Event>> {
        event::read().map(Some)
    }

    fn poll(&mut self) -> io::Result<bool> {
        event::poll(Duration::ZERO)
    }
}

/// A fixed script of events, for tests and demos.
///
/// Idle markers make [`EventSource::poll`] report no input once; an
/// exhausted script reads as closed input.
#[derive(Debug, Default, Clone)]
pub struct ScriptedEvents {
    queue: VecDeque<Option<Event>>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) -> &mut Self {
        self.queue.push_back(Some(event));
        self
    }

    /// Queue a key press with no modifiers.
    pub fn key(&mut self, code: KeyCode) -> &mut Self {
        self.key_with(code, KeyModifiers::NONE)
    }

    pub fn key_with(&mut self, code: KeyCode, modifiers: KeyModifiers) -> &mut Self {
        self.push(Event::Key(KeyEvent::new(code, modifiers)))
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        for ch in text.chars() {
            self.key(KeyCode::Char(ch));
        }
        self
    }

    pub fn mouse(&mut self, kind: MouseEventKind, y: u16, x: u16) -> &mut Self {
        self.mouse_with(kind, y, x, KeyModifiers::NONE)
    }

    pub fn mouse_with(
        &mut self,
        kind: MouseEventKind,
        y: u16,
        x: u16,
        modifiers: KeyModifiers,
    ) -> &mut Self {
        self.push(Event::Mouse(event::MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers,
        }))
    }

    /// Button-1 press.
    pub fn click(&mut self, y: u16, x: u16) -> &mut Self {
        self.mouse(MouseEventKind::Down(MouseButton::Left), y, x)
    }

    pub fn resize(&mut self, width: u16, height: u16) -> &mut Self {
        self.push(Event::Resize(width, height))
    }

    pub fn idle(&mut self) -> &mut Self {
        self.queue.push_back(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl EventSource for ScriptedEvents {
    fn read(&mut self) -> io::Result<Option<Event>> {
        while let Some(next) = self.queue.pop_front() {
            if next.is_some() {
                return Ok(next);
            }
        }
        Ok(None)
    }

    fn poll(&mut self) -> io::Result<bool> {
        match self.queue.front() {
            Some(None) => {
                self.queue.pop_front();
                Ok(false)
            }
            _ => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_drains_then_closes() {
        let mut events = ScriptedEvents::new().text("ab").idle().build();
        assert!(events.poll().unwrap());
        assert!(matches!(events.read().unwrap(), Some(Event::Key(_))));
        assert!(matches!(events.read().unwrap(), Some(Event::Key(_))));
        assert!(!events.poll().unwrap());
        assert!(events.poll().unwrap());
        assert!(events.read().unwrap().is_none());
    }
}
