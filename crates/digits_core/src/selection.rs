//! Caret and selection representation.

/// A caret or selected span as a byte range into the field value.
///
/// The range is always normalized such that `start <= end`. A collapsed
/// range (`start == end`) is a plain caret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionRange {
    /// Start byte offset of the selection (inclusive).
    pub start: usize,
    /// End byte offset of the selection (exclusive).
    pub end: usize,
}

impl SelectionRange {
    /// Create a new selection range, normalized so `start <= end`.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A collapsed caret at `at`.
    #[inline]
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Returns `true` for a plain caret with nothing selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length of the selection in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The selected text, or `None` if the range does not fit `value`.
    #[inline]
    pub fn slice<'a>(&self, value: &'a str) -> Option<&'a str> {
        value.get(self.start..self.end)
    }

    /// Returns `true` if exactly the single byte `b` is selected.
    #[inline]
    pub fn covers_only(&self, value: &str, b: u8) -> bool {
        self.slice(value).is_some_and(|s| s.as_bytes() == [b])
    }
}
