//! Keyboard and mouse input: key decoding, click counting, event sources and
//! the hot-key and mouse handler registries.

mod dispatch;
mod key;
mod mouse;
mod source;

pub use dispatch::{Binding, HotKeyFn, HotKeys, InputHandler, MouseFn, MouseHandlers, Taken};
pub use key::Key;
pub use mouse::{MouseDecoder, MouseEvent};
pub use source::{EventSource, ScriptedEvents, TerminalEvents};
