//! Keystroke model.
//!
//! Hosts describe a keystroke with a logical [`Key`] plus the legacy
//! numeric key code. The code is derived from the key unless the host has
//! a better one, because the allow-list and hot-key rules are keyed on it.

/// Logical key of a keystroke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// A printable character, as the key would type it.
    Character(char),
    /// The numeric keypad decimal key reported without a character.
    Decimal,
    Enter,
    NumpadEnter,
    Backspace,
    Tab,
    Delete,
    Home,
    End,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    /// The Control key pressed on its own.
    Control,
    /// Any other named key (`"Shift"`, `"F5"`, ...).
    Named(String),
}

pub mod codes {
    pub const BACKSPACE: u32 = 8;
    pub const TAB: u32 = 9;
    pub const ENTER: u32 = 13;
    pub const CONTROL: u32 = 17;
    pub const END: u32 = 35;
    pub const HOME: u32 = 36;
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_RIGHT: u32 = 39;
    pub const ARROW_DOWN: u32 = 40;
    pub const DELETE: u32 = 46;
    pub const A: u32 = 65;
    pub const C: u32 = 67;
    pub const V: u32 = 86;
    pub const X: u32 = 88;
    pub const NUMPAD_DECIMAL: u32 = 110;
    pub const PERIOD: u32 = 190;
}

/// Navigation and control key codes that always pass the allow-list.
pub const ALLOWED_KEY_CODES: [u32; 10] = [
    codes::BACKSPACE,
    codes::TAB,
    codes::ENTER,
    codes::END,
    codes::HOME,
    codes::ARROW_LEFT,
    codes::ARROW_UP,
    codes::ARROW_RIGHT,
    codes::ARROW_DOWN,
    codes::DELETE,
];

const CLIPBOARD_HOTKEY_CODES: [u32; 4] = [codes::A, codes::C, codes::V, codes::X];

impl Key {
    /// Parse a DOM-style key name (`"1"`, `"Enter"`, `"ArrowLeft"`, ...).
    pub fn from_name(name: &str) -> Option<Key> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Key::Character(c));
        }
        let key = match name {
            "Decimal" => Key::Decimal,
            "Enter" => Key::Enter,
            "NumpadEnter" => Key::NumpadEnter,
            "Backspace" => Key::Backspace,
            "Tab" => Key::Tab,
            "Delete" => Key::Delete,
            "Home" => Key::Home,
            "End" => Key::End,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowUp" => Key::ArrowUp,
            "ArrowRight" => Key::ArrowRight,
            "ArrowDown" => Key::ArrowDown,
            "Control" => Key::Control,
            "" => return None,
            other => Key::Named(other.to_string()),
        };
        Some(key)
    }

    /// Legacy numeric key code a browser would report for this key.
    pub fn legacy_code(&self) -> u32 {
        match self {
            Key::Character(c) if c.is_ascii_digit() => *c as u32,
            Key::Character(c) if c.is_ascii_alphabetic() => c.to_ascii_uppercase() as u32,
            Key::Character('.') => codes::PERIOD,
            Key::Character(_) | Key::Named(_) => 0,
            Key::Decimal => codes::NUMPAD_DECIMAL,
            Key::Enter | Key::NumpadEnter => codes::ENTER,
            Key::Backspace => codes::BACKSPACE,
            Key::Tab => codes::TAB,
            Key::Delete => codes::DELETE,
            Key::Home => codes::HOME,
            Key::End => codes::END,
            Key::ArrowLeft => codes::ARROW_LEFT,
            Key::ArrowUp => codes::ARROW_UP,
            Key::ArrowRight => codes::ARROW_RIGHT,
            Key::ArrowDown => codes::ARROW_DOWN,
            Key::Control => codes::CONTROL,
        }
    }
}

/// A single keystroke as seen by the validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub key_code: u32,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        let key_code = key.legacy_code();
        Self {
            key,
            key_code,
            ctrl: false,
        }
    }

    pub fn character(c: char) -> Self {
        Self::new(Key::Character(c))
    }

    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }

    /// Override the derived key code with the one the host observed.
    pub fn with_key_code(mut self, key_code: u32) -> Self {
        self.key_code = key_code;
        self
    }

    /// `0`-`9`.
    #[inline]
    pub fn is_digit(&self) -> bool {
        matches!(self.key, Key::Character(c) if c.is_ascii_digit())
    }

    /// `.` from either the main keyboard or the keypad.
    #[inline]
    pub fn is_decimal_point(&self) -> bool {
        matches!(self.key, Key::Character('.') | Key::Decimal)
    }

    #[inline]
    pub fn is_enter(&self) -> bool {
        matches!(self.key, Key::Enter | Key::NumpadEnter)
    }

    /// Ctrl is taken from the modifier flag, or inferred when the Control
    /// key itself is the keystroke.
    #[inline]
    pub fn ctrl_held(&self) -> bool {
        self.ctrl || self.key_code == codes::CONTROL
    }

    /// Ctrl+A, Ctrl+C, Ctrl+V or Ctrl+X.
    pub fn is_clipboard_hotkey(&self) -> bool {
        self.ctrl_held() && CLIPBOARD_HOTKEY_CODES.contains(&self.key_code)
    }

    /// Navigation/control keys that never change digit counts.
    #[inline]
    pub fn is_allowed_control(&self) -> bool {
        ALLOWED_KEY_CODES.contains(&self.key_code)
    }
}
