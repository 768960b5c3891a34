//! Border glyph lookup.
//!
//! A border cell is drawn with the glyph selected by which of its four
//! neighbours also carry a border. The lookup is a fixed 16-entry table
//! keyed by the neighbour mask:
//!
//! ```text
//!     5------1------6
//!     |      |      |
//!     4------+------2
//!     |      |      |
//!     8------3------7
//! ```
//!
//! Masks without a perpendicular neighbour on both ends of a run (a lone
//! cell, or a segment ending at its top or bottom) resolve to
//! [`Glyph::Blank`].

use std::ops::BitOr;

/// Four-bit neighbour mask: which adjacent cells also hold a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Neighbors(u8);

impl Neighbors {
    pub const NONE: Neighbors = Neighbors(0);
    pub const TOP: Neighbors = Neighbors(1);
    pub const RIGHT: Neighbors = Neighbors(2);
    pub const BOTTOM: Neighbors = Neighbors(4);
    pub const LEFT: Neighbors = Neighbors(8);

    /// Build from raw bits; bits above the low four are discarded.
    pub const fn from_bits(bits: u8) -> Self {
        Neighbors(bits & 0x0f)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Neighbors) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Neighbors) {
        self.0 |= other.0;
    }
}

impl BitOr for Neighbors {
    type Output = Neighbors;

    fn bitor(self, rhs: Self) -> Self::Output {
        Neighbors(self.0 | rhs.0)
    }
}

/// Line-drawing glyphs used for collapsed borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Blank,
    HLine,
    VLine,
    ULCorner,
    URCorner,
    LLCorner,
    LRCorner,
    LTee,
    RTee,
    TTee,
    BTee,
    Plus,
}

impl Glyph {
    /// Character rendered for this glyph.
    pub const fn symbol(self) -> char {
        match self {
            Glyph::Blank => ' ',
            Glyph::HLine => '─',
            Glyph::VLine => '│',
            Glyph::ULCorner => '┌',
            Glyph::URCorner => '┐',
            Glyph::LLCorner => '└',
            Glyph::LRCorner => '┘',
            Glyph::LTee => '├',
            Glyph::RTee => '┤',
            Glyph::TTee => '┬',
            Glyph::BTee => '┴',
            Glyph::Plus => '┼',
        }
    }

    pub fn is_blank(self) -> bool {
        self == Glyph::Blank
    }
}

const T: u8 = Neighbors::TOP.bits();
const R: u8 = Neighbors::RIGHT.bits();
const B: u8 = Neighbors::BOTTOM.bits();
const L: u8 = Neighbors::LEFT.bits();

static BORDER_GLYPHS: [Glyph; 16] = build_table();

const fn build_table() -> [Glyph; 16] {
    let mut table = [Glyph::Blank; 16];
    table[(R | T) as usize] = Glyph::LLCorner; // 8
    table[(B | T) as usize] = Glyph::VLine;
    table[(B | R) as usize] = Glyph::ULCorner; // 5
    table[(B | R | T) as usize] = Glyph::LTee; // 4
    table[(L | T) as usize] = Glyph::LRCorner; // 7
    table[(L | R) as usize] = Glyph::HLine;
    table[(L | R | T) as usize] = Glyph::BTee; // 3
    table[(L | B) as usize] = Glyph::URCorner; // 6
    table[(L | B | T) as usize] = Glyph::RTee; // 2
    table[(L | B | R) as usize] = Glyph::TTee; // 1
    table[(L | B | R | T) as usize] = Glyph::Plus;
    table
}

/// Glyph for a cell whose neighbours are `mask`.
pub fn glyph_for(mask: Neighbors) -> Glyph {
    BORDER_GLYPHS[mask.bits() as usize]
}

/// The eight glyph slots used when a window draws its own border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub left: char,
    pub right: char,
    pub top: char,
    pub bottom: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl Default for BorderSet {
    fn default() -> Self {
        Self {
            left: Glyph::VLine.symbol(),
            right: Glyph::VLine.symbol(),
            top: Glyph::HLine.symbol(),
            bottom: Glyph::HLine.symbol(),
            top_left: Glyph::ULCorner.symbol(),
            top_right: Glyph::URCorner.symbol(),
            bottom_left: Glyph::LLCorner.symbol(),
            bottom_right: Glyph::LRCorner.symbol(),
        }
    }
}

impl BorderSet {
    /// Plain ASCII border for terminals without line drawing.
    pub fn ascii() -> Self {
        Self {
            left: '|',
            right: '|',
            top: '-',
            bottom: '-',
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
        }
    }
}
