//! End-to-end field behavior through the public API, with a host that is
//! not `TextBuffer`.

use digits_core::{
    ConfigurationError, Decision, DigitsConfig, DigitsController, FieldEvent, FieldHost,
    FieldObserver, Key, KeyInput, SelectionRange, Veto,
};
use std::time::{Duration, Instant};

/// A bare widget: text plus a selection, nothing else.
#[derive(Default)]
struct Widget {
    text: String,
    sel: SelectionRange,
}

impl FieldHost for Widget {
    fn value(&self) -> &str {
        &self.text
    }

    fn selection(&self) -> SelectionRange {
        self.sel
    }

    fn set_value(&mut self, value: String) {
        self.sel = SelectionRange::caret(value.len());
        self.text = value;
    }

    fn set_selection(&mut self, selection: SelectionRange) {
        self.sel = selection;
    }
}

/// Counts both outbound channels.
#[derive(Default)]
struct Bus {
    values: Vec<String>,
    events: usize,
}

impl FieldObserver for Bus {
    fn value_changed(&mut self, value: &str) {
        self.values.push(value.to_string());
    }

    fn change_event(&mut self, _event: &FieldEvent) {
        self.events += 1;
    }
}

fn widget(text: &str, sel: SelectionRange) -> Widget {
    Widget {
        text: text.to_string(),
        sel,
    }
}

fn key_down(controller: &mut DigitsController, w: &mut Widget, key: KeyInput) -> Decision {
    controller
        .handle_event(&FieldEvent::KeyDown(key), Instant::now(), w, &mut Bus::default())
        .unwrap()
}

#[test]
fn full_field_rejects_digit_at_collapsed_caret_only() {
    let mut controller = DigitsController::new(DigitsConfig::new().with_max_digits(3));

    let mut w = widget("999", SelectionRange::caret(3));
    assert_eq!(
        key_down(&mut controller, &mut w, KeyInput::character('1')),
        Decision::Deny(Veto::MaxDigits)
    );

    let mut w = widget("999", SelectionRange::new(0, 2));
    assert_eq!(
        key_down(&mut controller, &mut w, KeyInput::character('1')),
        Decision::Allow
    );
}

#[test]
fn second_decimal_point_is_rejected() {
    let mut controller = DigitsController::new(DigitsConfig::new().with_digit_info("1.2"));
    let mut w = widget("3.1", SelectionRange::caret(3));
    assert_eq!(
        key_down(&mut controller, &mut w, KeyInput::character('.')),
        Decision::Deny(Veto::SecondDecimalPoint)
    );
    assert_eq!(
        key_down(&mut controller, &mut w, KeyInput::new(Key::Decimal)),
        Decision::Deny(Veto::SecondDecimalPoint)
    );
}

#[test]
fn key_up_runs_the_same_validation() {
    let mut controller = DigitsController::new(DigitsConfig::new());
    let mut w = widget("1", SelectionRange::caret(1));
    let decision = controller
        .handle_event(
            &FieldEvent::KeyUp(KeyInput::character('q')),
            Instant::now(),
            &mut w,
            &mut Bus::default(),
        )
        .unwrap();
    assert_eq!(decision, Decision::Deny(Veto::KeyNotAllowed));
}

#[test]
fn focus_blur_cycle_reformats_only_changed_values() {
    let config = DigitsConfig::new().with_digit_info("1.2").with_locale("en");
    let mut controller = DigitsController::new(config);
    let mut w = widget("1000", SelectionRange::caret(4));
    let mut bus = Bus::default();
    let now = Instant::now();

    controller.handle_event(&FieldEvent::Focus, now, &mut w, &mut bus).unwrap();
    controller.handle_event(&FieldEvent::Blur, now, &mut w, &mut bus).unwrap();
    assert_eq!(w.text, "1000");
    assert!(bus.values.is_empty());

    controller.handle_event(&FieldEvent::Focus, now, &mut w, &mut bus).unwrap();
    w.text.push('5');
    controller.handle_event(&FieldEvent::Blur, now, &mut w, &mut bus).unwrap();
    assert_eq!(w.text, "10,005.00");
    assert_eq!(bus.values, vec!["10,005.00".to_string()]);
    assert_eq!(bus.events, 1);
}

#[test]
fn click_on_grouped_value_moves_caret_past_removed_commas() {
    let mut controller = DigitsController::new(DigitsConfig::new());
    let mut w = widget("1,234,567", SelectionRange::caret(6));
    controller
        .handle_event(&FieldEvent::Click, Instant::now(), &mut w, &mut Bus::default())
        .unwrap();
    assert_eq!(w.text, "1234567");
    assert_eq!(w.sel, SelectionRange::caret(4));
}

#[test]
fn enter_commit_runs_on_the_host_clock() {
    let mut controller = DigitsController::new(
        DigitsConfig::new()
            .with_digit_info("1.0-0")
            .with_enter_delay(Duration::from_millis(20)),
    );
    let mut w = widget("4321", SelectionRange::caret(4));
    let mut bus = Bus::default();
    let t0 = Instant::now();

    let decision = controller
        .handle_event(&FieldEvent::KeyDown(KeyInput::new(Key::NumpadEnter)), t0, &mut w, &mut bus)
        .unwrap();
    assert!(matches!(decision, Decision::DeferredCommit { delay, .. } if delay == Duration::from_millis(20)));
    assert_eq!(controller.next_deadline(), Some(t0 + Duration::from_millis(20)));

    assert_eq!(controller.run_due(t0 + Duration::from_millis(19), &mut w, &mut bus).unwrap(), 0);
    assert_eq!(w.text, "4321");
    assert_eq!(controller.run_due(t0 + Duration::from_millis(20), &mut w, &mut bus).unwrap(), 1);
    assert_eq!(w.text, "4,321");
    assert_eq!(bus.events, 1);
}

#[test]
fn broken_digit_info_fails_fast() {
    let mut controller = DigitsController::new(DigitsConfig::new().with_digit_info("1..2"));
    let mut w = widget("", SelectionRange::caret(0));
    let err = controller
        .handle_event(
            &FieldEvent::KeyDown(KeyInput::character('1')),
            Instant::now(),
            &mut w,
            &mut Bus::default(),
        )
        .unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::InvalidDigitInfo {
            digit_info: "1..2".to_string()
        }
    );
}
