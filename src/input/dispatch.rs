use std::collections::HashMap;

use crate::error::Result;
use crate::runtime::Runtime;

use super::key::Key;
use super::mouse::MouseEvent;

pub type HotKeyFn = Box<dyn FnMut(&Key)>;
pub type MouseFn = Box<dyn FnMut(&MouseEvent) -> bool>;

/// One action bound to a hot-key.
pub enum Binding {
    /// Routed to the [`InputHandler`] passed to the key reader.
    Internal,
    Callback(HotKeyFn),
}

/// Receives internal hot-keys and unclaimed mouse events while a key reader
/// is running.
pub trait InputHandler {
    fn on_hotkey(&mut self, rt: &mut Runtime, key: &Key) -> Result<()>;

    /// Return true if the event was consumed.
    fn on_mouse(&mut self, rt: &mut Runtime, mouse: &MouseEvent) -> Result<bool>;
}

impl InputHandler for () {
    fn on_hotkey(&mut self, _rt: &mut Runtime, _key: &Key) -> Result<()> {
        Ok(())
    }

    fn on_mouse(&mut self, _rt: &mut Runtime, _mouse: &MouseEvent) -> Result<bool> {
        Ok(false)
    }
}

/// Hot-key registry. A key may carry several bindings; wildcard bindings
/// apply to any key without a binding of its own.
#[derive(Default)]
pub struct HotKeys {
    bindings: HashMap<Key, Vec<Binding>>,
    wildcard: Vec<Binding>,
}

/// Bindings lifted out of a [`HotKeys`] registry while they run.
pub struct Taken {
    key: Option<Key>,
    pub bindings: Vec<Binding>,
}

impl HotKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, key: Key, callback: impl FnMut(&Key) + 'static) {
        self.bindings
            .entry(key)
            .or_default()
            .push(Binding::Callback(Box::new(callback)));
    }

    pub fn bind_internal(&mut self, key: Key) {
        self.bindings.entry(key).or_default().push(Binding::Internal);
    }

    /// Bind a callback for every key that has no binding of its own.
    pub fn bind_any(&mut self, callback: impl FnMut(&Key) + 'static) {
        self.wildcard.push(Binding::Callback(Box::new(callback)));
    }

    pub fn unbind(&mut self, key: &Key) -> bool {
        self.bindings.remove(key).is_some()
    }

    pub fn is_bound(&self, key: &Key) -> bool {
        self.bindings.contains_key(key) || !self.wildcard.is_empty()
    }

    /// Lift out the bindings that apply to `key`.
    pub fn take(&mut self, key: &Key) -> Option<Taken> {
        if let Some(bindings) = self.bindings.remove(key) {
            return Some(Taken {
                key: Some(*key),
                bindings,
            });
        }
        if self.wildcard.is_empty() {
            return None;
        }
        Some(Taken {
            key: None,
            bindings: std::mem::take(&mut self.wildcard),
        })
    }

    /// Put taken bindings back ahead of any bound while they ran.
    pub fn restore(&mut self, taken: Taken) {
        let Taken { key, mut bindings } = taken;
        let slot = match key {
            Some(key) => self.bindings.entry(key).or_default(),
            None => &mut self.wildcard,
        };
        bindings.append(slot);
        *slot = bindings;
    }
}

struct RowHandler {
    begin_x: u16,
    last_x: u16,
    callback: MouseFn,
}

/// Mouse handler registry: the internal handler first, then handlers
/// registered for a span of columns on one screen row.
#[derive(Default)]
pub struct MouseHandlers {
    internal: bool,
    rows: HashMap<u16, Vec<RowHandler>>,
}

impl MouseHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn enable_internal(&mut self) {
        self.internal = true;
    }

    pub fn has_internal(&self) -> bool {
        self.internal
    }

    /// Handle events on row `y` from column `x` through `x + ncols - 1`.
    pub fn add(
        &mut self,
        y: u16,
        x: u16,
        ncols: u16,
        callback: impl FnMut(&MouseEvent) -> bool + 'static,
    ) {
        self.rows.entry(y).or_default().push(RowHandler {
            begin_x: x,
            last_x: x.saturating_add(ncols.saturating_sub(1)),
            callback: Box::new(callback),
        });
    }

    /// Drop every row handler; the internal handler stays.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Offer `mouse` to the row handlers covering its position.
    pub fn dispatch(&mut self, mouse: &MouseEvent) -> bool {
        let Some(handlers) = self.rows.get_mut(&mouse.y) else {
            return false;
        };
        handlers
            .iter_mut()
            .filter(|handler| handler.begin_x <= mouse.x && mouse.x <= handler.last_x)
            .any(|handler| (handler.callback)(mouse))
    }
}
