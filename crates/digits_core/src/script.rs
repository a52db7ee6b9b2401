//! Replayable field sessions.
//!
//! A session script is a TOML document describing a field configuration,
//! the field's initial contents, and a list of user actions. Replaying it
//! drives a [`DigitsController`] against a [`TextBuffer`] on a virtual
//! clock, applying native edits the way a browser text input would.
//!
//! ```toml
//! [config]
//! digit_info = "1.2"
//!
//! [[steps]]
//! action = "focus"
//!
//! [[steps]]
//! action = "type"
//! text = "1234567"
//!
//! [[steps]]
//! action = "blur"
//!
//! [expect]
//! value = "1,234,567.00"
//! ```

use crate::buffer::TextBuffer;
use crate::config::DigitsConfig;
use crate::controller::{Decision, DigitsController, FieldEvent};
use crate::error::ScriptError;
use crate::key::{Key, KeyInput};
use crate::selection::SelectionRange;
use crate::traits::Notification;
use serde::Deserialize;
use std::time::{Duration, Instant};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Session {
    #[serde(default)]
    pub config: DigitsConfig,
    #[serde(default)]
    pub field: FieldSeed,
    #[serde(default)]
    pub steps: Vec<Step>,
    pub expect: Option<Expectation>,
}

/// Initial field contents.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSeed {
    #[serde(default)]
    pub value: String,
    /// Byte offset of the caret; the end of the value when unset.
    pub caret: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPhase {
    #[default]
    Down,
    Up,
}

/// One user action.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Focus,
    Blur,
    /// Click, placing the caret (or a selection when `end` is set) first.
    Click { at: usize, end: Option<usize> },
    /// Press each character's key in turn.
    Type { text: String },
    /// Press a key by DOM name (`"Enter"`, `"Backspace"`, `"a"`, ...).
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        phase: KeyPhase,
    },
    /// Ctrl+V followed by the host inserting `text` unfiltered.
    Paste { text: String },
    Select { start: usize, end: usize },
    /// Advance the virtual clock and run due Enter commits.
    Wait { ms: u64 },
}

/// Checks applied after a replay.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expectation {
    pub value: Option<String>,
    /// Number of commits (each commit fires two notifications).
    pub commits: Option<usize>,
    /// Vetoed keystrokes, in order, by veto name.
    pub vetoes: Option<Vec<String>>,
}

/// Result of a replay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub value: String,
    pub selection: SelectionRange,
    pub notifications: Vec<Notification>,
    /// Decision for every keystroke, in order.
    pub decisions: Vec<Decision>,
}

impl Outcome {
    pub fn commits(&self) -> usize {
        self.notifications
            .iter()
            .filter(|n| matches!(n, Notification::ValueChanged(_)))
            .count()
    }

    pub fn vetoes(&self) -> Vec<String> {
        self.decisions
            .iter()
            .filter_map(|d| match d {
                Decision::Deny(veto) => Some(format!("{veto:?}")),
                _ => None,
            })
            .collect()
    }

    /// Human-readable list of failed expectations; empty when all hold.
    pub fn mismatches(&self, expect: &Expectation) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(value) = &expect.value
            && *value != self.value
        {
            out.push(format!("value: expected {value:?}, got {:?}", self.value));
        }
        if let Some(commits) = expect.commits
            && commits != self.commits()
        {
            out.push(format!("commits: expected {commits}, got {}", self.commits()));
        }
        if let Some(vetoes) = &expect.vetoes
            && *vetoes != self.vetoes()
        {
            out.push(format!("vetoes: expected {vetoes:?}, got {:?}", self.vetoes()));
        }
        out
    }
}

impl Session {
    /// Parse a session and validate its configuration.
    pub fn from_toml_str(s: &str) -> Result<Self, ScriptError> {
        let session: Session = toml::from_str(s)?;
        session.config.validate()?;
        for step in &session.steps {
            if let Step::Key { key, .. } = step
                && Key::from_name(key).is_none()
            {
                return Err(ScriptError::UnknownKey { name: key.clone() });
            }
        }
        Ok(session)
    }

    pub fn run(&self) -> Result<Outcome, ScriptError> {
        let mut field = TextBuffer::with_value(self.field.value.clone());
        if let Some(caret) = self.field.caret {
            field.set_caret(caret, false);
        }
        let mut replay = Replay {
            controller: DigitsController::new(self.config.clone()),
            field,
            notifications: Vec::new(),
            decisions: Vec::new(),
            origin: Instant::now(),
            elapsed: Duration::ZERO,
        };
        for step in &self.steps {
            replay.step(step)?;
        }
        Ok(Outcome {
            value: replay.field.value().to_string(),
            selection: replay.field.selection(),
            notifications: replay.notifications,
            decisions: replay.decisions,
        })
    }
}

struct Replay {
    controller: DigitsController,
    field: TextBuffer,
    notifications: Vec<Notification>,
    decisions: Vec<Decision>,
    origin: Instant,
    elapsed: Duration,
}

impl Replay {
    fn now(&self) -> Instant {
        self.origin + self.elapsed
    }

    fn step(&mut self, step: &Step) -> Result<(), ScriptError> {
        log::trace!(target: "digits.script", "{step:?}");
        match step {
            Step::Focus => self.dispatch(&FieldEvent::Focus).map(drop),
            Step::Blur => self.dispatch(&FieldEvent::Blur).map(drop),
            Step::Click { at, end } => {
                self.field
                    .select(SelectionRange::new(*at, end.unwrap_or(*at)));
                self.dispatch(&FieldEvent::Click).map(drop)
            }
            Step::Type { text } => {
                for c in text.chars() {
                    self.press(KeyInput::character(c))?;
                }
                Ok(())
            }
            Step::Key { key, ctrl, phase } => {
                let key = Key::from_name(key).ok_or_else(|| ScriptError::UnknownKey {
                    name: key.clone(),
                })?;
                let input = KeyInput::new(key).with_ctrl(*ctrl);
                match phase {
                    KeyPhase::Down => self.press(input),
                    KeyPhase::Up => {
                        let decision = self.dispatch(&FieldEvent::KeyUp(input))?;
                        self.decisions.push(decision);
                        Ok(())
                    }
                }
            }
            Step::Paste { text } => {
                let paste = KeyInput::character('v').with_ctrl(true);
                let decision = self.dispatch(&FieldEvent::KeyDown(paste))?;
                self.decisions.push(decision);
                if decision.allows_native_edit() {
                    self.field.insert_text(text);
                }
                Ok(())
            }
            Step::Select { start, end } => {
                self.field.select(SelectionRange::new(*start, *end));
                Ok(())
            }
            Step::Wait { ms } => {
                self.elapsed += Duration::from_millis(*ms);
                let now = self.now();
                self.controller
                    .run_due(now, &mut self.field, &mut self.notifications)?;
                Ok(())
            }
        }
    }

    fn dispatch(&mut self, event: &FieldEvent) -> Result<Decision, ScriptError> {
        let now = self.now();
        Ok(self
            .controller
            .handle_event(event, now, &mut self.field, &mut self.notifications)?)
    }

    /// Key down, then the native edit when allowed.
    fn press(&mut self, input: KeyInput) -> Result<(), ScriptError> {
        let decision = self.dispatch(&FieldEvent::KeyDown(input.clone()))?;
        self.decisions.push(decision);
        if decision.allows_native_edit() {
            apply_native_edit(&mut self.field, &input);
        }
        Ok(())
    }
}

/// What a plain single-line text input does with an unvetoed key.
fn apply_native_edit(field: &mut TextBuffer, input: &KeyInput) {
    if input.ctrl_held() {
        match input.key {
            Key::Character('a' | 'A') => field.select_all(),
            Key::Character('x' | 'X') if !field.selection().is_empty() => field.backspace(),
            _ => {}
        }
        return;
    }

    match &input.key {
        Key::Character(c) => field.insert_text(c.encode_utf8(&mut [0; 4])),
        Key::Decimal => field.insert_text("."),
        Key::Backspace => field.backspace(),
        Key::Delete => field.delete(),
        Key::ArrowLeft => field.move_caret_left(false),
        Key::ArrowRight => field.move_caret_right(false),
        Key::Home | Key::ArrowUp => field.move_caret_to_start(false),
        Key::End | Key::ArrowDown => field.move_caret_to_end(false),
        _ => {}
    }
}
