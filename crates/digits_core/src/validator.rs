//! Per-keystroke validation.
//!
//! The validator only grants or denies the host's native edit. It reasons
//! about the pre-edit text and caret and never builds the post-edit string.

use crate::config::DigitsConfig;
use crate::context::EditContext;
use crate::error::ConfigurationError;
use crate::format_spec::FormatSpec;

/// Why a keystroke was vetoed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Veto {
    /// The selection is exactly the decimal point.
    LoneDecimalPoint,
    /// The value already has a decimal point.
    SecondDecimalPoint,
    /// The integer part is full.
    IntegerCapacity,
    /// The fraction part is full.
    FractionCapacity,
    /// The value already holds `max_digits` characters.
    MaxDigits,
    /// Not a digit, navigation key, or clipboard hot-key.
    KeyNotAllowed,
}

/// Outcome of validating one keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyVerdict {
    Allow,
    Deny(Veto),
    /// Enter: suppress the native edit and commit the pre-Enter value later.
    Commit,
}

/// Decide whether the keystroke in `ctx` may edit the field.
///
/// Rules run in order: the length rules for the configured shape, then
/// Enter interception, then the allow-list gate.
///
/// # Examples
///
/// ```
/// use digits_core::{DigitsConfig, EditContext, KeyInput, KeyVerdict, SelectionRange, Veto};
/// use digits_core::validate_keystroke;
///
/// let config = DigitsConfig::new().with_max_digits(3);
/// let key = KeyInput::character('1');
///
/// let ctx = EditContext::new("999", SelectionRange::caret(3), &key);
/// assert_eq!(validate_keystroke(&ctx, &config).unwrap(), KeyVerdict::Deny(Veto::MaxDigits));
///
/// let ctx = EditContext::new("999", SelectionRange::new(0, 3), &key);
/// assert_eq!(validate_keystroke(&ctx, &config).unwrap(), KeyVerdict::Allow);
/// ```
pub fn validate_keystroke(
    ctx: &EditContext<'_>,
    config: &DigitsConfig,
) -> Result<KeyVerdict, ConfigurationError> {
    let spec = config.format_spec()?;
    let max_digits = config.max_digits();

    let veto = match &spec {
        Some(spec) if spec.has_fraction() => check_decimal_edit(ctx, spec, max_digits),
        Some(_) => None,
        None => check_max_digits(ctx, max_digits),
    };
    if let Some(veto) = veto {
        log::trace!(target: "digits.keys", "veto {:?}: {veto:?}", ctx.key.key);
        return Ok(KeyVerdict::Deny(veto));
    }

    if ctx.key.is_enter() {
        return Ok(KeyVerdict::Commit);
    }

    let decimal_allowed = spec.is_some_and(|s| s.has_fraction());
    if !passes_key_gate(ctx, decimal_allowed) {
        log::trace!(target: "digits.keys", "veto {:?}: not allowed", ctx.key.key);
        return Ok(KeyVerdict::Deny(Veto::KeyNotAllowed));
    }

    Ok(KeyVerdict::Allow)
}

/// Plain length limit: with a collapsed caret, a full field takes no more
/// digits. A selection will be replaced, so it is let through.
fn check_max_digits(ctx: &EditContext<'_>, max_digits: Option<u32>) -> Option<Veto> {
    let max = max_digits? as usize;
    let full = !ctx.value.is_empty() && ctx.char_len() >= max;
    (full && ctx.key.is_digit() && !ctx.has_selection()).then_some(Veto::MaxDigits)
}

fn check_decimal_edit(
    ctx: &EditContext<'_>,
    spec: &FormatSpec,
    max_digits: Option<u32>,
) -> Option<Veto> {
    if ctx.selection.covers_only(ctx.value, b'.') {
        return Some(Veto::LoneDecimalPoint);
    }

    let dot = ctx.decimal_point();
    if ctx.key.is_decimal_point() && dot.is_some() {
        return Some(Veto::SecondDecimalPoint);
    }

    let fraction_capacity = spec.fraction_capacity();
    let integer_capacity = max_digits.map(|max| spec.integer_capacity(max));
    let numeric_key = ctx.key.is_digit() || ctx.key.is_decimal_point();
    let caret = ctx.selection.start;
    let collapsed = !ctx.has_selection();

    match (FormatSpec::split_value(ctx.value), dot) {
        (Some(parts), Some(dot)) => {
            if let (Some(integer), Some(capacity)) = (parts.integer, integer_capacity)
                && collapsed
                && numeric_key
                && integer.len() >= capacity
                && caret <= dot
            {
                return Some(Veto::IntegerCapacity);
            }
            if let Some(fraction) = parts.fraction
                && collapsed
                && numeric_key
                && fraction.len() >= fraction_capacity
                && caret > dot
            {
                return Some(Veto::FractionCapacity);
            }
            None
        }
        _ => {
            // No decimal point yet: the whole value is integer digits.
            let capacity = integer_capacity?;
            let full = !ctx.value.is_empty() && ctx.char_len() >= capacity;
            (full && ctx.key.is_digit() && collapsed).then_some(Veto::IntegerCapacity)
        }
    }
}

fn passes_key_gate(ctx: &EditContext<'_>, decimal_allowed: bool) -> bool {
    let key = ctx.key;
    key.is_allowed_control()
        || key.is_digit()
        || (decimal_allowed && key.is_decimal_point())
        || key.is_clipboard_hotkey()
}
