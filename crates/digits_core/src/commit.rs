//! Commit-time formatting.
//!
//! A commit turns whatever the field holds into its final rendering:
//! filter, truncate to the digit limits, parse, render. Keystrokes never
//! reach this path, so the caret does not jump mid-edit.

use crate::config::DigitsConfig;
use crate::decimal::{format_decimal, plain_number};
use crate::error::ConfigurationError;
use crate::filter::{NumericShape, filter_numeric, strip_grouping};
use crate::format_spec::FormatSpec;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("float prefix is a valid regex")
});

/// Produce the committed rendering of `raw`.
///
/// Unparseable input commits as the empty string; only a broken
/// configuration is an error.
///
/// # Examples
///
/// ```
/// use digits_core::{DigitsConfig, commit_value};
///
/// let config = DigitsConfig::new().with_digit_info("1.2").with_locale("en");
/// assert_eq!(commit_value("1234567", &config).unwrap(), "1,234,567.00");
/// assert_eq!(commit_value("  ", &config).unwrap(), "");
/// ```
pub fn commit_value(raw: &str, config: &DigitsConfig) -> Result<String, ConfigurationError> {
    let spec = config.format_spec()?;
    let shape = if spec.is_some_and(|s| s.has_fraction()) {
        NumericShape::SignedFloat
    } else {
        NumericShape::Integer
    };

    let filtered = filter_numeric(raw, shape);
    let limited = limit_digits(&filtered, spec.as_ref(), config.max_digits());
    let rendered = render(&limited, config)?;

    log::debug!(target: "digits.commit", "{raw:?} -> {filtered:?} -> {limited:?} -> {rendered:?}");
    Ok(rendered)
}

/// Truncate a filtered value to the digit limits. Never rounds.
///
/// With a format spec, the integer run keeps `max_digits - fraction`
/// characters and the fraction run keeps `fraction` characters. Without
/// one, the whole value keeps `max_digits` characters.
///
/// ```
/// use digits_core::{FormatSpec, limit_digits};
///
/// let spec = FormatSpec::parse("1.2-2").unwrap();
/// assert_eq!(limit_digits("12345.6789", Some(&spec), Some(5)), "123.67");
/// assert_eq!(limit_digits("123456", None, Some(4)), "1234");
/// ```
pub fn limit_digits<'a>(
    value: &'a str,
    spec: Option<&FormatSpec>,
    max_digits: Option<u32>,
) -> Cow<'a, str> {
    let Some(max) = max_digits else {
        return Cow::Borrowed(value);
    };
    if value.is_empty() {
        return Cow::Borrowed(value);
    }

    let Some(spec) = spec else {
        if value.chars().count() < max as usize {
            return Cow::Borrowed(value);
        }
        return match strip_grouping(value) {
            Cow::Borrowed(v) => Cow::Borrowed(take_chars(v, max as usize)),
            Cow::Owned(v) => Cow::Owned(take_chars(&v, max as usize).to_string()),
        };
    };

    let value = strip_grouping(value);
    let integer_capacity = spec.integer_capacity(max);
    let fraction_capacity = spec.fraction_capacity();

    let limited = match FormatSpec::split_value(&value) {
        Some(parts) => {
            let integer = parts.integer.map_or("", |i| take_chars(i, integer_capacity));
            match parts.fraction {
                Some(fraction) => format!("{integer}.{}", take_chars(fraction, fraction_capacity)),
                None => integer.to_string(),
            }
        }
        None => take_chars(&value, integer_capacity).to_string(),
    };
    Cow::Owned(limited)
}

/// Parse the longest numeric prefix of `s`, ignoring leading whitespace.
///
/// ```
/// use digits_core::parse_number;
///
/// assert_eq!(parse_number("12.34.56"), Some(12.34));
/// assert_eq!(parse_number(" -5abc"), Some(-5.0));
/// assert_eq!(parse_number("."), None);
/// ```
pub fn parse_number(s: &str) -> Option<f64> {
    let m = FLOAT_PREFIX.find(s.trim_start())?;
    m.as_str().parse::<f64>().ok()
}

fn render(value: &str, config: &DigitsConfig) -> Result<String, ConfigurationError> {
    let Some(number) = parse_number(&strip_grouping(value)) else {
        return Ok(String::new());
    };
    if !config.formats_decimal() {
        return Ok(plain_number(number));
    }
    Ok(format_decimal(
        number,
        &config.digit_limits()?,
        config.locale_data()?,
    ))
}

fn take_chars(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or(s, |(i, _)| &s[..i])
}
