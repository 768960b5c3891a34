use std::ops::{BitOr, BitOrAssign};

use crossterm::style::{Attribute, Color};

/// Small attribute bitset applied on top of the color pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Attr(u8);

impl Attr {
    pub const NORMAL: Attr = Attr(0);
    pub const BOLD: Attr = Attr(1);
    pub const DIM: Attr = Attr(2);
    pub const UNDERLINE: Attr = Attr(4);
    pub const REVERSE: Attr = Attr(8);

    pub const fn contains(self, other: Attr) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_normal(self) -> bool {
        self.0 == 0
    }

    /// Terminal attributes to emit for this set.
    pub(crate) fn attributes(self) -> impl Iterator<Item = Attribute> {
        [
            (Attr::BOLD, Attribute::Bold),
            (Attr::DIM, Attribute::Dim),
            (Attr::UNDERLINE, Attribute::Underlined),
            (Attr::REVERSE, Attribute::Reverse),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, attribute)| attribute)
    }
}

impl BitOr for Attr {
    type Output = Attr;

    fn bitor(self, rhs: Self) -> Self::Output {
        Attr(self.0 | rhs.0)
    }
}

impl BitOrAssign for Attr {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Foreground/background pair plus attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attr: Attr,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attr: Attr::NORMAL,
        }
    }

    pub const fn reverse() -> Self {
        Self {
            fg: None,
            bg: None,
            attr: Attr::REVERSE,
        }
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn attr(mut self, attr: Attr) -> Self {
        self.attr |= attr;
        self
    }

    /// Fill unset colors from `base`, keeping this style's attributes.
    pub fn over(self, base: Style) -> Style {
        Style {
            fg: self.fg.or(base.fg),
            bg: self.bg.or(base.bg),
            attr: self.attr | base.attr,
        }
    }
}

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    /// Marker stored in the cell to the right of a double-width character.
    pub(crate) const CONTINUATION: char = '\0';

    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    pub const fn blank() -> Self {
        Self::new(' ', Style::new())
    }

    pub fn is_continuation(&self) -> bool {
        self.ch == Self::CONTINUATION
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}
