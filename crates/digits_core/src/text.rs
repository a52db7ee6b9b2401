//! UTF-8 offset utilities for field values.
//!
//! Carets and selections are byte offsets into the value and must sit on
//! character boundaries, even when full-width glyphs arrive through IME.

use crate::filter::{GROUP_SEPARATOR, strip_grouping};
use crate::selection::SelectionRange;

/// Clamp an arbitrary byte index to a valid UTF-8 character boundary.
///
/// Indices beyond the end clamp to `s.len()`; indices inside a multi-byte
/// character move back to its start.
///
/// # Examples
///
/// ```
/// use digits_core::clamp_to_char_boundary;
///
/// let s = "1２3"; // '２' is 3 bytes
/// assert_eq!(clamp_to_char_boundary(s, 1), 1);
/// assert_eq!(clamp_to_char_boundary(s, 2), 1);
/// assert_eq!(clamp_to_char_boundary(s, 4), 4);
/// assert_eq!(clamp_to_char_boundary(s, 100), 5);
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Previous caret position before `i`, or 0 at the start.
pub fn prev_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[..i].char_indices().next_back().map_or(0, |(idx, _)| idx)
}

/// Next caret position after `i`, or `s.len()` at the end.
pub fn next_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[i..].chars().next().map_or(s.len(), |c| i + c.len_utf8())
}

/// Number of grouping separators strictly before `offset`.
pub fn grouping_before(s: &str, offset: usize) -> usize {
    let offset = clamp_to_char_boundary(s, offset);
    s[..offset]
        .bytes()
        .filter(|b| *b == GROUP_SEPARATOR as u8)
        .count()
}

/// Strip grouping separators and move `selection` so it keeps pointing at
/// the same characters.
///
/// Each end shifts left by the separators that preceded it.
///
/// # Examples
///
/// ```
/// use digits_core::{SelectionRange, strip_grouping_at};
///
/// let (value, sel) = strip_grouping_at("1,234,567", SelectionRange::caret(6));
/// assert_eq!(value, "1234567");
/// assert_eq!(sel, SelectionRange::caret(4));
/// ```
pub fn strip_grouping_at(s: &str, selection: SelectionRange) -> (String, SelectionRange) {
    let start = clamp_to_char_boundary(s, selection.start);
    let end = clamp_to_char_boundary(s, selection.end);
    let stripped = strip_grouping(s).into_owned();
    let moved = SelectionRange::new(
        start - grouping_before(s, start),
        end - grouping_before(s, end),
    );
    (stripped, moved)
}
