//! Seams toward the hosting UI.
//!
//! The engine never touches a widget directly. A host exposes its text field
//! through [`FieldHost`] and receives commit notifications through
//! [`FieldObserver`]. Both are object-safe so hosts can pass `&mut dyn ...`.

use crate::controller::FieldEvent;
use crate::selection::SelectionRange;

/// Read/write access to one text field.
pub trait FieldHost {
    /// Current text content.
    fn value(&self) -> &str;

    /// Current caret or selection, as byte offsets into [`value`](Self::value).
    fn selection(&self) -> SelectionRange;

    /// Replace the text content.
    ///
    /// Implementations should leave the caret at the end of the new value.
    fn set_value(&mut self, value: String);

    /// Move the caret or selection.
    fn set_selection(&mut self, selection: SelectionRange);
}

/// Receiver of the two outbound channels fired after every commit.
pub trait FieldObserver {
    /// The field's new value.
    fn value_changed(&mut self, value: &str);

    /// The event that triggered the commit.
    fn change_event(&mut self, event: &FieldEvent);
}

/// One recorded outbound notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    ValueChanged(String),
    Change(FieldEvent),
}

impl FieldObserver for Vec<Notification> {
    fn value_changed(&mut self, value: &str) {
        self.push(Notification::ValueChanged(value.to_string()));
    }

    fn change_event(&mut self, event: &FieldEvent) {
        self.push(Notification::Change(event.clone()));
    }
}

/// Discards notifications.
impl FieldObserver for () {
    fn value_changed(&mut self, _value: &str) {}

    fn change_event(&mut self, _event: &FieldEvent) {}
}

impl FieldHost for crate::buffer::TextBuffer {
    #[inline]
    fn value(&self) -> &str {
        crate::buffer::TextBuffer::value(self)
    }

    #[inline]
    fn selection(&self) -> SelectionRange {
        crate::buffer::TextBuffer::selection(self)
    }

    #[inline]
    fn set_value(&mut self, value: String) {
        crate::buffer::TextBuffer::set_value(self, value)
    }

    #[inline]
    fn set_selection(&mut self, selection: SelectionRange) {
        crate::buffer::TextBuffer::select(self, selection)
    }
}
