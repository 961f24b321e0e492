//! Text utilities for offset slicing and display width.

use unicode_width::UnicodeWidthStr;

/// Number of chars in `s`. Offsets in the search are counted in chars.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Leading `count` chars of `s` (the whole string if it is shorter).
pub fn char_prefix(s: &str, count: usize) -> &str {
    match s.char_indices().nth(count) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Trailing `count` chars of `s` (the whole string if it is shorter).
pub fn char_suffix(s: &str, count: usize) -> &str {
    if count == 0 {
        return "";
    }
    match s.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// Display width in terminal cells.
/// Uses unicode-width for correct handling of CJK and other wide characters.
pub fn display_width(s: &str) -> usize {
    s.width()
}
