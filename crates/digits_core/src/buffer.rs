//! In-memory single-line text field.
//!
//! [`TextBuffer`] plays the host's part when there is no real widget: the
//! replay driver and the tests apply native edits to it, and the controller
//! reads and rewrites it through [`FieldHost`](crate::FieldHost).

use crate::selection::SelectionRange;
use crate::text::{clamp_to_char_boundary, next_cursor_boundary, prev_cursor_boundary};

/// Text, caret, and selection of one field.
///
/// # Example
///
/// ```
/// use digits_core::TextBuffer;
///
/// let mut field = TextBuffer::with_value("12");
/// field.insert_text("3");
/// field.move_caret_left(true);
/// field.backspace();
///
/// assert_eq!(field.value(), "12");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBuffer {
    value: String,
    /// Byte index into `value`, always on a char boundary.
    caret: usize,
    /// When `Some`, the selection is `min(anchor, caret)..max(anchor, caret)`.
    selection_anchor: Option<usize>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `value` with the caret at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let caret = value.len();
        Self {
            value,
            caret,
            selection_anchor: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Current selection; collapsed to the caret when nothing is selected.
    pub fn selection(&self) -> SelectionRange {
        selection_range(&self.value, self.selection_anchor, self.caret)
            .unwrap_or(SelectionRange::caret(self.caret))
    }

    /// Overwrite the value, moving the caret to the end and clearing any
    /// selection.
    pub fn set_value(&mut self, value: String) {
        self.caret = value.len();
        self.value = value;
        self.selection_anchor = None;
    }

    /// Select `range`, with the caret at its end.
    pub fn select(&mut self, range: SelectionRange) {
        let start = clamp_to_char_boundary(&self.value, range.start);
        let end = clamp_to_char_boundary(&self.value, range.end);
        self.caret = end;
        self.selection_anchor = (start != end).then_some(start);
    }

    /// Insert text at the caret, replacing any selection. Newlines are dropped.
    pub fn insert_text(&mut self, s: &str) {
        self.clamp();
        let s: String = s.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if s.is_empty() {
            return;
        }

        self.delete_selection_if_any();

        self.value.insert_str(self.caret, &s);
        self.caret += s.len();
    }

    /// Delete the character before the caret, or the selection.
    pub fn backspace(&mut self) {
        self.clamp();
        if self.delete_selection_if_any() || self.caret == 0 {
            return;
        }

        let prev = prev_cursor_boundary(&self.value, self.caret);
        self.value.drain(prev..self.caret);
        self.caret = prev;
    }

    /// Delete the character after the caret, or the selection.
    pub fn delete(&mut self) {
        self.clamp();
        if self.delete_selection_if_any() || self.caret >= self.value.len() {
            return;
        }

        let next = next_cursor_boundary(&self.value, self.caret);
        self.value.drain(self.caret..next);
    }

    /// Move the caret left by one character.
    ///
    /// If `selecting` is true, extends/modifies the selection.
    pub fn move_caret_left(&mut self, selecting: bool) {
        self.clamp();
        if !selecting && let Some(sel) = self.active_selection() {
            self.set_caret(sel.start, false);
            return;
        }
        let target = prev_cursor_boundary(&self.value, self.caret);
        self.set_caret(target, selecting);
    }

    /// Move the caret right by one character.
    ///
    /// If `selecting` is true, extends/modifies the selection.
    pub fn move_caret_right(&mut self, selecting: bool) {
        self.clamp();
        if !selecting && let Some(sel) = self.active_selection() {
            self.set_caret(sel.end, false);
            return;
        }
        let target = next_cursor_boundary(&self.value, self.caret);
        self.set_caret(target, selecting);
    }

    pub fn move_caret_to_start(&mut self, selecting: bool) {
        self.set_caret(0, selecting);
    }

    pub fn move_caret_to_end(&mut self, selecting: bool) {
        self.set_caret(self.value.len(), selecting);
    }

    pub fn select_all(&mut self) {
        self.select(SelectionRange::new(0, self.value.len()));
    }

    /// Set the caret to a byte position.
    ///
    /// If `selecting` is true, extends/modifies the selection.
    pub fn set_caret(&mut self, caret: usize, selecting: bool) {
        self.clamp();
        let caret = clamp_to_char_boundary(&self.value, caret);
        if selecting {
            if self.selection_anchor.is_none() {
                self.selection_anchor = Some(self.caret);
            }
            self.caret = caret;
            // A collapsed selection must not stay sticky.
            if self.selection_anchor == Some(caret) {
                self.selection_anchor = None;
            }
        } else {
            self.caret = caret;
            self.selection_anchor = None;
        }
    }

    fn active_selection(&self) -> Option<SelectionRange> {
        selection_range(&self.value, self.selection_anchor, self.caret)
    }

    fn delete_selection_if_any(&mut self) -> bool {
        let Some(sel) = self.active_selection() else {
            self.selection_anchor = None;
            return false;
        };

        self.value.drain(sel.start..sel.end);
        self.caret = sel.start;
        self.selection_anchor = None;
        true
    }

    fn clamp(&mut self) {
        self.caret = clamp_to_char_boundary(&self.value, self.caret);
        if let Some(a) = self.selection_anchor {
            self.selection_anchor = Some(clamp_to_char_boundary(&self.value, a));
        }
    }
}

fn selection_range(value: &str, anchor: Option<usize>, caret: usize) -> Option<SelectionRange> {
    let a = clamp_to_char_boundary(value, anchor?);
    let c = clamp_to_char_boundary(value, caret);
    (a != c).then(|| SelectionRange::new(a, c))
}
