//! Character filtering for raw keystroke, paste, and IME input.
//!
//! Filtering runs in two stages: full-width glyphs are remapped to ASCII,
//! then numeric runs are extracted and concatenated. Everything else drops.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Grouping separator recognised in field values.
pub const GROUP_SEPARATOR: char = ',';

static INTEGER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("integer run is a valid regex"));

static SIGNED_FLOAT_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[+-]?([0-9]*[.])?[0-9]+").expect("signed float run is a valid regex")
});

/// Full-width glyphs and their ASCII equivalents.
pub const FULL_WIDTH_GLYPHS: &[(char, char)] = &[
    ('０', '0'),
    ('１', '1'),
    ('２', '2'),
    ('３', '3'),
    ('４', '4'),
    ('５', '5'),
    ('６', '6'),
    ('７', '7'),
    ('８', '8'),
    ('９', '9'),
    ('。', '.'),
    ('｡', '.'),
    ('．', '.'),
    ('＋', '+'),
    ('ー', '-'),
];

/// Which numeric runs survive extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericShape {
    /// Runs of ASCII digits.
    Integer,
    /// Optional sign, optional integer digits and point, then digits.
    SignedFloat,
}

impl NumericShape {
    fn pattern(self) -> &'static Regex {
        match self {
            NumericShape::Integer => &INTEGER_RUN,
            NumericShape::SignedFloat => &SIGNED_FLOAT_RUN,
        }
    }
}

/// Map a full-width glyph to ASCII; other characters pass through.
#[inline]
pub fn remap_glyph(c: char) -> char {
    FULL_WIDTH_GLYPHS
        .iter()
        .find_map(|&(wide, ascii)| (wide == c).then_some(ascii))
        .unwrap_or(c)
}

/// Remap full-width glyphs in `s`.
///
/// Returns `Cow::Borrowed` when `s` is already ASCII.
pub fn remap_glyphs(s: &str) -> Cow<'_, str> {
    if s.is_ascii() {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().map(remap_glyph).collect())
}

/// Reduce raw text to the numeric runs of the given shape.
///
/// # Examples
///
/// ```
/// use digits_core::{NumericShape, filter_numeric};
///
/// assert_eq!(filter_numeric("１２３abc4", NumericShape::Integer), "1234");
/// assert_eq!(filter_numeric("1,234.56", NumericShape::SignedFloat), "1234.56");
/// assert_eq!(filter_numeric("ー５．５", NumericShape::SignedFloat), "-5.5");
/// assert_eq!(filter_numeric("abc", NumericShape::Integer), "");
/// ```
pub fn filter_numeric(raw: &str, shape: NumericShape) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let remapped = remap_glyphs(raw);
    shape
        .pattern()
        .find_iter(&remapped)
        .map(|m| m.as_str())
        .collect()
}

/// Remove grouping separators.
///
/// Returns `Cow::Borrowed` if there are none.
pub fn strip_grouping(s: &str) -> Cow<'_, str> {
    if !s.contains(GROUP_SEPARATOR) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| *c != GROUP_SEPARATOR).collect())
}
