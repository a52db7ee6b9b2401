//! Per-keystroke edit context.

use crate::key::KeyInput;
use crate::selection::SelectionRange;
use crate::text::clamp_to_char_boundary;
use crate::traits::FieldHost;

/// Pre-edit state of the field for one pending keystroke.
///
/// Built from the triggering event, consumed synchronously, then dropped.
#[derive(Clone, Copy, Debug)]
pub struct EditContext<'a> {
    /// Field text before the keystroke is applied.
    pub value: &'a str,
    /// Caret or selection, clamped to `value`.
    pub selection: SelectionRange,
    pub key: &'a KeyInput,
}

impl<'a> EditContext<'a> {
    pub fn new(value: &'a str, selection: SelectionRange, key: &'a KeyInput) -> Self {
        let selection = SelectionRange::new(
            clamp_to_char_boundary(value, selection.start),
            clamp_to_char_boundary(value, selection.end),
        );
        Self {
            value,
            selection,
            key,
        }
    }

    /// Snapshot the host field.
    pub fn capture<H: FieldHost + ?Sized>(host: &'a H, key: &'a KeyInput) -> Self {
        Self::new(host.value(), host.selection(), key)
    }

    /// Returns `true` when a span is selected, so the keystroke replaces it.
    #[inline]
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Byte offset of the decimal point, if the value has one.
    #[inline]
    pub fn decimal_point(&self) -> Option<usize> {
        self.value.find('.')
    }

    /// Length of the value in characters.
    #[inline]
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_selection_into_value() {
        let key = KeyInput::character('1');
        let ctx = EditContext::new("12", SelectionRange::new(1, 40), &key);
        assert_eq!(ctx.selection, SelectionRange::new(1, 2));
        assert!(ctx.has_selection());
    }

    #[test]
    fn reports_decimal_point_and_length() {
        let key = KeyInput::character('1');
        let ctx = EditContext::new("１2.5", SelectionRange::caret(0), &key);
        assert_eq!(ctx.decimal_point(), Some(4));
        assert_eq!(ctx.char_len(), 4);
    }
}
