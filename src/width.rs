//! Terminal display width helpers.
//!
//! Provides ANSI-aware width calculation so text written into windows and
//! log lines drained into them stay aligned with the cell grid.

use unicode_width::UnicodeWidthChar;

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi(text);
    unicode_width::UnicodeWidthStr::width(clean.as_str())
}

/// Remove ANSI escape sequences, keeping the printable text.
pub fn strip_ansi(text: &str) -> String {
    let clean = strip_ansi_escapes::strip(text);
    String::from_utf8_lossy(&clean).into_owned()
}

/// Cells occupied by a single character; control characters count as zero.
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}
