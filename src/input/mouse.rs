use std::fmt;
use std::time::{Duration, Instant};

use crossterm::event::{KeyModifiers, MouseButton, MouseEventKind};

/// Decoded pointer event.
///
/// Buttons are numbered 1 (left), 2 (middle), 3 (right), 4 (wheel up) and
/// 5 (wheel down). `nclicks` counts the clicks of a button press: 1 for a
/// single click, 2 or 3 for the press completing a double or triple click,
/// and 0 for releases, motion and wheel steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MouseEvent {
    pub y: u16,
    pub x: u16,
    pub button: u8,
    pub nclicks: u8,
    pub is_pressed: bool,
    pub is_released: bool,
    pub is_moving: bool,
    pub is_alt: bool,
    pub is_ctrl: bool,
    pub is_shift: bool,
}

impl MouseEvent {
    /// Button-1 press at `(y, x)`.
    pub fn press(y: u16, x: u16) -> Self {
        Self {
            y,
            x,
            button: 1,
            nclicks: 1,
            is_pressed: true,
            ..Self::default()
        }
    }
}

impl fmt::Display for MouseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.is_alt {
            parts.push("Alt".to_string());
        }
        if self.is_ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.is_shift {
            parts.push("Shift".to_string());
        }
        parts.push(format!("M{}", self.button));
        write!(f, "{}", parts.join("+"))?;
        if self.nclicks > 1 {
            write!(f, "*{}", self.nclicks)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    at: Instant,
    y: u16,
    x: u16,
    button: u8,
    count: u8,
}

/// Turns raw terminal mouse reports into [`MouseEvent`]s.
///
/// Terminals report presses, releases, drags and wheel steps but not click
/// counts; a press of the same button on the same cell within `interval` of
/// the previous press counts as the next click of a multi-click.
#[derive(Debug, Clone)]
pub struct MouseDecoder {
    interval: Duration,
    last: Option<MouseEvent>,
    last_press: Option<Press>,
}

impl MouseDecoder {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
            last_press: None,
        }
    }

    pub fn decode(&mut self, event: &crossterm::event::MouseEvent) -> Option<MouseEvent> {
        self.decode_at(event, Instant::now())
    }

    pub fn decode_at(
        &mut self,
        event: &crossterm::event::MouseEvent,
        now: Instant,
    ) -> Option<MouseEvent> {
        let mut mouse = MouseEvent {
            y: event.row,
            x: event.column,
            is_alt: event.modifiers.contains(KeyModifiers::ALT),
            is_ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            is_shift: event.modifiers.contains(KeyModifiers::SHIFT),
            ..MouseEvent::default()
        };

        match event.kind {
            MouseEventKind::Down(button) => {
                mouse.button = button_number(button);
                mouse.is_pressed = true;
                mouse.nclicks = self.click_count(&mouse, now);
            }
            MouseEventKind::Up(button) => {
                mouse.button = button_number(button);
                mouse.is_released = true;
            }
            MouseEventKind::Drag(button) => {
                mouse.button = button_number(button);
                mouse.is_pressed = true;
                mouse.is_moving = true;
            }
            MouseEventKind::Moved => {
                mouse.button = self.last.map(|last| last.button).unwrap_or(1);
                mouse.is_moving = true;
            }
            MouseEventKind::ScrollUp => {
                mouse.button = 4;
                mouse.is_pressed = true;
            }
            MouseEventKind::ScrollDown => {
                mouse.button = 5;
                mouse.is_pressed = true;
            }
            _ => return None,
        }

        self.last = Some(mouse);
        Some(mouse)
    }

    fn click_count(&mut self, mouse: &MouseEvent, now: Instant) -> u8 {
        let count = match self.last_press {
            Some(press)
                if press.button == mouse.button
                    && press.y == mouse.y
                    && press.x == mouse.x
                    && now.saturating_duration_since(press.at) <= self.interval =>
            {
                (press.count + 1).min(3)
            }
            _ => 1,
        };
        self.last_press = Some(Press {
            at: now,
            y: mouse.y,
            x: mouse.x,
            button: mouse.button,
            count,
        });
        count
    }
}

impl Default for MouseDecoder {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

fn button_number(button: MouseButton) -> u8 {
    match button {
        MouseButton::Left => 1,
        MouseButton::Middle => 2,
        MouseButton::Right => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::MouseEvent as RawMouse;

    fn raw(kind: MouseEventKind, row: u16, column: u16, modifiers: KeyModifiers) -> RawMouse {
        RawMouse {
            kind,
            column,
            row,
            modifiers,
        }
    }

    #[test]
    fn second_press_in_place_is_a_double_click() {
        let mut decoder = MouseDecoder::new(Duration::from_millis(300));
        let start = Instant::now();
        let down = raw(MouseEventKind::Down(MouseButton::Left), 3, 4, KeyModifiers::NONE);
        let up = raw(MouseEventKind::Up(MouseButton::Left), 3, 4, KeyModifiers::NONE);

        let first = decoder.decode_at(&down, start).unwrap();
        assert!(first.is_pressed);
        assert_eq!(first.nclicks, 1);
        assert_eq!(first.to_string(), "M1");
        let release = decoder.decode_at(&up, start).unwrap();
        assert!(release.is_released);
        assert_eq!(release.nclicks, 0);
        let second = decoder
            .decode_at(&down, start + Duration::from_millis(100))
            .unwrap();
        assert_eq!(second.nclicks, 2);
        assert_eq!(second.to_string(), "M1*2");
    }

    #[test]
    fn slow_or_moved_presses_start_over() {
        let mut decoder = MouseDecoder::new(Duration::from_millis(300));
        let start = Instant::now();
        let down = raw(MouseEventKind::Down(MouseButton::Left), 3, 4, KeyModifiers::NONE);
        decoder.decode_at(&down, start);
        let late = decoder
            .decode_at(&down, start + Duration::from_millis(400))
            .unwrap();
        assert_eq!(late.nclicks, 1);
        let elsewhere = raw(MouseEventKind::Down(MouseButton::Left), 3, 5, KeyModifiers::NONE);
        let moved = decoder
            .decode_at(&elsewhere, start + Duration::from_millis(450))
            .unwrap();
        assert_eq!(moved.nclicks, 1);
    }

    #[test]
    fn wheel_drag_and_modifiers() {
        let mut decoder = MouseDecoder::default();
        let wheel = decoder
            .decode(&raw(MouseEventKind::ScrollDown, 0, 0, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(wheel.button, 5);

        let drag = decoder
            .decode(&raw(
                MouseEventKind::Drag(MouseButton::Left),
                2,
                9,
                KeyModifiers::CONTROL,
            ))
            .unwrap();
        assert!(drag.is_moving && drag.is_pressed && drag.is_ctrl);
        assert_eq!((drag.y, drag.x), (2, 9));
        assert_eq!(drag.to_string(), "Ctrl+M1");
    }
}
