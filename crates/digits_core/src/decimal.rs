//! Locale-aware decimal rendering.
//!
//! Rounding works on the decimal digits of the shortest round-trip
//! representation of the value, half away from zero at the last kept
//! fraction digit, so `1.005` with two fraction digits renders `1.01`.

use crate::format_spec::DigitLimits;
use crate::locale::LocaleData;

/// Decimal digits of a non-negative number, split at the point.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Digits {
    integer: Vec<u8>,
    fraction: Vec<u8>,
}

impl Digits {
    fn of(value: f64) -> Self {
        let repr = value.abs().to_string();
        let (integer, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
        let to_digits = |s: &str| s.bytes().map(|b| b - b'0').collect::<Vec<u8>>();
        let mut integer = to_digits(integer);
        // Leading zeros are re-added by the minimum integer padding.
        let leading = integer.iter().take_while(|d| **d == 0).count();
        integer.drain(..leading);
        Self {
            integer,
            fraction: to_digits(fraction),
        }
    }

    fn round_fraction(&mut self, max_fraction: usize) {
        if self.fraction.len() <= max_fraction {
            return;
        }
        let round_up = self.fraction[max_fraction] >= 5;
        self.fraction.truncate(max_fraction);
        if !round_up {
            return;
        }

        for d in self.fraction.iter_mut().rev().chain(self.integer.iter_mut().rev()) {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                return;
            }
        }
        self.integer.insert(0, 1);
    }

    fn pad(&mut self, limits: &DigitLimits) {
        let min_fraction = limits.min_fraction as usize;
        while self.fraction.len() > min_fraction && self.fraction.last() == Some(&0) {
            self.fraction.pop();
        }
        self.fraction.resize(self.fraction.len().max(min_fraction), 0);

        let min_integer = limits.min_integer as usize;
        if self.integer.len() < min_integer {
            let missing = min_integer - self.integer.len();
            self.integer.splice(0..0, std::iter::repeat_n(0, missing));
        }
        if self.integer.is_empty() && self.fraction.is_empty() {
            self.integer.push(0);
        }
    }

    fn is_zero(&self) -> bool {
        self.integer.iter().chain(&self.fraction).all(|d| *d == 0)
    }
}

fn digit_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Join integer digits into locale groups.
fn group_integer(digits: &str, locale: &LocaleData) -> String {
    if digits.len() < locale.last_group_size || locale.last_group_size == 0 {
        return digits.to_string();
    }

    let (mut rest, last) = digits.split_at(digits.len() - locale.last_group_size);
    let mut groups = vec![last];
    while locale.group_size > 0 && rest.len() > locale.group_size {
        let (head, tail) = rest.split_at(rest.len() - locale.group_size);
        groups.push(tail);
        rest = head;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    groups.join(locale.group)
}

/// Render `value` with the given digit limits and locale symbols.
///
/// # Examples
///
/// ```
/// use digits_core::{DigitLimits, LocaleData, format_decimal};
///
/// let en = LocaleData::lookup("en").unwrap();
/// let limits = DigitLimits { min_integer: 1, min_fraction: 2, max_fraction: 3 };
/// assert_eq!(format_decimal(1234567.0, &limits, en), "1,234,567.00");
///
/// let de = LocaleData::lookup("de").unwrap();
/// assert_eq!(format_decimal(-1234.5678, &limits, de), "-1.234,568");
/// ```
pub fn format_decimal(value: f64, limits: &DigitLimits, locale: &LocaleData) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { locale.minus } else { "" };
        return format!("{sign}{}", locale.infinity);
    }

    let mut digits = Digits::of(value);
    digits.round_fraction(limits.max_fraction as usize);
    digits.pad(limits);

    let mut out = String::new();
    if value.is_sign_negative() && !digits.is_zero() {
        out.push_str(locale.minus);
    }
    out.push_str(&group_integer(&digit_string(&digits.integer), locale));
    if !digits.fraction.is_empty() {
        out.push_str(locale.decimal);
        out.push_str(&digit_string(&digits.fraction));
    }
    out
}

const EXPONENT_THRESHOLD: f64 = 1e21;

/// Shortest plain rendering of a number, used when no decimal format is
/// configured. Negative zero renders as `0`. Magnitudes from `1e21` up use
/// exponent form with an explicit sign (`1e+21`).
pub fn plain_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-Infinity" } else { "Infinity" }.to_string();
    }
    if value.abs() >= EXPONENT_THRESHOLD {
        return format!("{value:e}").replacen('e', "e+", 1);
    }
    value.to_string()
}
