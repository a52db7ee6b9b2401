//! Event dispatch for one numeric field.
//!
//! The host translates its focus, blur, click, and key events into
//! [`FieldEvent`]s and hands them to [`DigitsController::handle_event`]
//! together with access to the field. The returned [`Decision`] tells the
//! host whether to apply its native edit.

use crate::commit::commit_value;
use crate::config::{DigitsConfig, EnterPolicy};
use crate::context::EditContext;
use crate::error::ConfigurationError;
use crate::key::KeyInput;
use crate::scheduler::{CommitHandle, DeferredCommits};
use crate::text::strip_grouping_at;
use crate::traits::{FieldHost, FieldObserver};
use crate::validator::{KeyVerdict, Veto, validate_keystroke};
use std::time::{Duration, Instant};

/// Field events the controller reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldEvent {
    Focus,
    Blur,
    Click,
    KeyDown(KeyInput),
    KeyUp(KeyInput),
}

/// What the host should do with its native handling of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Veto),
    /// Suppress the native edit; a commit of the pre-Enter value runs once
    /// `delay` has passed (see [`DigitsController::run_due`]).
    DeferredCommit {
        handle: CommitHandle,
        delay: Duration,
    },
}

impl Decision {
    #[inline]
    pub fn allows_native_edit(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Numeric input behavior for a single field.
///
/// The only state kept across events is the value seen at focus time and
/// the queue of Enter commits.
///
/// # Example
///
/// ```
/// use digits_core::{DigitsConfig, DigitsController, FieldEvent, Notification, TextBuffer};
/// use std::time::Instant;
///
/// let config = DigitsConfig::new().with_digit_info("1.2").with_locale("en");
/// let mut controller = DigitsController::new(config);
/// let mut field = TextBuffer::new();
/// let mut notes: Vec<Notification> = Vec::new();
/// let now = Instant::now();
///
/// controller.handle_event(&FieldEvent::Focus, now, &mut field, &mut notes).unwrap();
/// field.insert_text("1234567");
/// controller.handle_event(&FieldEvent::Blur, now, &mut field, &mut notes).unwrap();
///
/// assert_eq!(field.value(), "1,234,567.00");
/// assert_eq!(notes.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DigitsController {
    config: DigitsConfig,
    start_value: Option<String>,
    pending: DeferredCommits,
}

impl DigitsController {
    pub fn new(config: DigitsConfig) -> Self {
        Self {
            config,
            start_value: None,
            pending: DeferredCommits::new(),
        }
    }

    pub fn config(&self) -> &DigitsConfig {
        &self.config
    }

    /// Replace the configuration; takes effect from the next event.
    pub fn set_config(&mut self, config: DigitsConfig) {
        self.config = config;
    }

    /// Value captured at the last focus, until the matching blur.
    pub fn start_value(&self) -> Option<&str> {
        self.start_value.as_deref()
    }

    pub fn pending(&self) -> &DeferredCommits {
        &self.pending
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.next_deadline()
    }

    /// Cancel a scheduled Enter commit. Returns `true` if it was pending.
    pub fn cancel(&mut self, handle: CommitHandle) -> bool {
        self.pending.cancel(handle)
    }

    /// Dispatch one event.
    pub fn handle_event<H, O>(
        &mut self,
        event: &FieldEvent,
        now: Instant,
        host: &mut H,
        observer: &mut O,
    ) -> Result<Decision, ConfigurationError>
    where
        H: FieldHost + ?Sized,
        O: FieldObserver + ?Sized,
    {
        match event {
            FieldEvent::Focus => {
                self.start_value = Some(host.value().to_string());
                Ok(Decision::Allow)
            }
            FieldEvent::Blur => {
                self.on_blur(event, host, observer)?;
                Ok(Decision::Allow)
            }
            FieldEvent::Click => {
                reposition_without_grouping(host);
                Ok(Decision::Allow)
            }
            FieldEvent::KeyDown(key) | FieldEvent::KeyUp(key) => {
                self.on_keystroke(event, key, now, host)
            }
        }
    }

    /// Run every Enter commit due at `now`, in due order.
    ///
    /// Returns the number of commits applied.
    pub fn run_due<H, O>(
        &mut self,
        now: Instant,
        host: &mut H,
        observer: &mut O,
    ) -> Result<usize, ConfigurationError>
    where
        H: FieldHost + ?Sized,
        O: FieldObserver + ?Sized,
    {
        let due = self.pending.take_due(now);
        for commit in &due {
            self.commit(&commit.value, &commit.event, host, observer)?;
        }
        Ok(due.len())
    }

    /// Commit `value` into the field and notify the observer.
    pub fn commit<H, O>(
        &self,
        value: &str,
        event: &FieldEvent,
        host: &mut H,
        observer: &mut O,
    ) -> Result<String, ConfigurationError>
    where
        H: FieldHost + ?Sized,
        O: FieldObserver + ?Sized,
    {
        let formatted = commit_value(value, &self.config)?;
        host.set_value(formatted.clone());
        observer.value_changed(&formatted);
        observer.change_event(event);
        Ok(formatted)
    }

    fn on_blur<H, O>(
        &mut self,
        event: &FieldEvent,
        host: &mut H,
        observer: &mut O,
    ) -> Result<(), ConfigurationError>
    where
        H: FieldHost + ?Sized,
        O: FieldObserver + ?Sized,
    {
        let start = self.start_value.take();
        let value = host.value().to_string();
        if start.as_deref() == Some(value.as_str()) {
            log::trace!(target: "digits.field", "blur without edit, keeping {value:?}");
            return Ok(());
        }
        self.commit(&value, event, host, observer)?;
        Ok(())
    }

    fn on_keystroke<H>(
        &mut self,
        event: &FieldEvent,
        key: &KeyInput,
        now: Instant,
        host: &mut H,
    ) -> Result<Decision, ConfigurationError>
    where
        H: FieldHost + ?Sized,
    {
        let ctx = EditContext::capture(&*host, key);
        match validate_keystroke(&ctx, &self.config)? {
            KeyVerdict::Allow => Ok(Decision::Allow),
            KeyVerdict::Deny(veto) => Ok(Decision::Deny(veto)),
            KeyVerdict::Commit => {
                if self.config.enter_policy == EnterPolicy::CancelPrevious {
                    self.pending.cancel_all();
                }
                let delay = self.config.enter_delay();
                let handle = self
                    .pending
                    .schedule(ctx.value.to_string(), event.clone(), now + delay);
                Ok(Decision::DeferredCommit { handle, delay })
            }
        }
    }
}

/// Strip grouping separators so the user edits raw digits, keeping the
/// caret on the same character.
fn reposition_without_grouping<H: FieldHost + ?Sized>(host: &mut H) {
    let (value, selection) = strip_grouping_at(host.value(), host.selection());
    host.set_value(value);
    host.set_selection(selection);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextBuffer;
    use crate::key::Key;
    use crate::selection::SelectionRange;
    use crate::traits::Notification;

    fn enter() -> FieldEvent {
        FieldEvent::KeyDown(KeyInput::new(Key::Enter))
    }

    #[test]
    fn blur_without_edit_does_not_commit() {
        let mut controller = DigitsController::new(DigitsConfig::new().with_digit_info("1.2"));
        let mut field = TextBuffer::with_value("1000");
        let mut notes: Vec<Notification> = Vec::new();
        let now = Instant::now();

        controller.handle_event(&FieldEvent::Focus, now, &mut field, &mut notes).unwrap();
        assert_eq!(controller.start_value(), Some("1000"));
        controller.handle_event(&FieldEvent::Blur, now, &mut field, &mut notes).unwrap();

        assert_eq!(field.value(), "1000");
        assert!(notes.is_empty());
        assert_eq!(controller.start_value(), None);
    }

    #[test]
    fn blur_after_edit_commits_and_notifies_both_channels() {
        let mut controller = DigitsController::new(DigitsConfig::new().with_max_digits(3));
        let mut field = TextBuffer::with_value("12");
        let mut notes: Vec<Notification> = Vec::new();
        let now = Instant::now();

        controller.handle_event(&FieldEvent::Focus, now, &mut field, &mut notes).unwrap();
        field.insert_text("345");
        controller.handle_event(&FieldEvent::Blur, now, &mut field, &mut notes).unwrap();

        assert_eq!(field.value(), "123");
        assert_eq!(
            notes,
            vec![
                Notification::ValueChanged("123".into()),
                Notification::Change(FieldEvent::Blur),
            ]
        );
    }

    #[test]
    fn blur_without_focus_commits() {
        let mut controller = DigitsController::new(DigitsConfig::new());
        let mut field = TextBuffer::with_value("0012");
        let mut notes: Vec<Notification> = Vec::new();
        controller
            .handle_event(&FieldEvent::Blur, Instant::now(), &mut field, &mut notes)
            .unwrap();
        assert_eq!(field.value(), "12");
    }

    #[test]
    fn click_strips_grouping_and_keeps_caret_on_character() {
        let mut controller = DigitsController::new(DigitsConfig::new());
        let mut field = TextBuffer::with_value("1,234,567");
        field.set_caret(6, false);

        let decision = controller
            .handle_event(&FieldEvent::Click, Instant::now(), &mut field, &mut ())
            .unwrap();

        assert_eq!(decision, Decision::Allow);
        assert_eq!(field.value(), "1234567");
        assert_eq!(field.selection(), SelectionRange::caret(4));
    }

    #[test]
    fn click_keeps_a_selected_range_on_the_same_digits() {
        let mut controller = DigitsController::new(DigitsConfig::new());
        let mut field = TextBuffer::with_value("1,234,567");
        field.select(SelectionRange::new(2, 8));

        controller
            .handle_event(&FieldEvent::Click, Instant::now(), &mut field, &mut ())
            .unwrap();

        assert_eq!(field.value(), "1234567");
        assert_eq!(field.selection(), SelectionRange::new(1, 6));
    }

    #[test]
    fn keystrokes_never_reformat() {
        let mut controller = DigitsController::new(DigitsConfig::new().with_digit_info("1.2"));
        let mut field = TextBuffer::with_value("1234");
        let mut notes: Vec<Notification> = Vec::new();
        let decision = controller
            .handle_event(
                &FieldEvent::KeyDown(KeyInput::character('5')),
                Instant::now(),
                &mut field,
                &mut notes,
            )
            .unwrap();
        assert!(decision.allows_native_edit());
        assert_eq!(field.value(), "1234");
        assert!(notes.is_empty());
    }

    #[test]
    fn enter_defers_commit_of_the_pre_enter_value() {
        let mut controller = DigitsController::new(DigitsConfig::new().with_digit_info("1.2"));
        let mut field = TextBuffer::with_value("1234");
        let mut notes: Vec<Notification> = Vec::new();
        let t0 = Instant::now();

        let decision = controller.handle_event(&enter(), t0, &mut field, &mut notes).unwrap();
        let Decision::DeferredCommit { delay, .. } = decision else {
            panic!("expected deferred commit, got {decision:?}");
        };
        assert_eq!(delay, Duration::from_millis(50));
        assert!(!decision.allows_native_edit());

        // The host keeps editing before the timer fires.
        field.insert_text("9");
        assert_eq!(controller.run_due(t0 + Duration::from_millis(49), &mut field, &mut notes).unwrap(), 0);
        assert_eq!(controller.run_due(t0 + delay, &mut field, &mut notes).unwrap(), 1);

        assert_eq!(field.value(), "1,234.00");
        assert_eq!(notes[1], Notification::Change(enter()));
    }

    #[test]
    fn repeated_enter_commits_independently_by_default() {
        let mut controller = DigitsController::new(DigitsConfig::new());
        let mut field = TextBuffer::with_value("1");
        let t0 = Instant::now();

        controller.handle_event(&enter(), t0, &mut field, &mut ()).unwrap();
        field.set_value("2".into());
        controller
            .handle_event(&enter(), t0 + Duration::from_millis(10), &mut field, &mut ())
            .unwrap();
        assert_eq!(controller.pending().len(), 2);

        let mut notes: Vec<Notification> = Vec::new();
        let ran = controller
            .run_due(t0 + Duration::from_millis(100), &mut field, &mut notes)
            .unwrap();
        assert_eq!(ran, 2);
        assert_eq!(field.value(), "2");
    }

    #[test]
    fn cancel_previous_policy_keeps_only_the_last_enter() {
        let config = DigitsConfig::new().with_enter_policy(EnterPolicy::CancelPrevious);
        let mut controller = DigitsController::new(config);
        let mut field = TextBuffer::with_value("1");
        let t0 = Instant::now();

        controller.handle_event(&enter(), t0, &mut field, &mut ()).unwrap();
        controller.handle_event(&enter(), t0, &mut field, &mut ()).unwrap();
        assert_eq!(controller.pending().len(), 1);
    }

    #[test]
    fn scheduled_commit_can_be_cancelled() {
        let mut controller = DigitsController::new(DigitsConfig::new());
        let mut field = TextBuffer::with_value("1");
        let t0 = Instant::now();
        let Decision::DeferredCommit { handle, .. } =
            controller.handle_event(&enter(), t0, &mut field, &mut ()).unwrap()
        else {
            panic!("expected deferred commit");
        };
        assert!(controller.cancel(handle));
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn configuration_errors_propagate_from_keystrokes_and_blur() {
        let mut controller = DigitsController::new(DigitsConfig::new().with_digit_info("bad"));
        let mut field = TextBuffer::with_value("1");
        let now = Instant::now();
        assert!(
            controller
                .handle_event(&FieldEvent::KeyDown(KeyInput::character('1')), now, &mut field, &mut ())
                .is_err()
        );
        assert!(controller.handle_event(&FieldEvent::Blur, now, &mut field, &mut ()).is_err());
    }
}
