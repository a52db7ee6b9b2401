//! Digit-info parsing.
//!
//! A digit-info string has the shape `{minInt}.{minFrac}-{maxFrac}` where
//! every number is optional except that `-{maxFrac}` needs `{minFrac}`.
//! The same grammar is reused to split a field value into its integer and
//! fraction runs.

use crate::error::ConfigurationError;
use regex::Regex;
use std::sync::LazyLock;

static DIGIT_INFO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)?\.(([0-9]+)(-([0-9]+))?)?$")
        .expect("digit info grammar is a valid regex")
});

const DEFAULT_MIN_INTEGER_DIGITS: u32 = 1;
const DEFAULT_MIN_FRACTION_DIGITS: u32 = 0;
const DEFAULT_MAX_FRACTION_DIGITS: u32 = 3;

/// Integer/fraction constraints parsed from a digit-info string.
///
/// Purely derived: callers parse it from configuration whenever they need it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatSpec {
    pub min_integer_digits: Option<u32>,
    pub min_fraction_digits: Option<u32>,
    pub max_fraction_digits: Option<u32>,
}

/// Digit limits with defaults applied, ready for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitLimits {
    pub min_integer: u32,
    pub min_fraction: u32,
    pub max_fraction: u32,
}

impl Default for DigitLimits {
    fn default() -> Self {
        Self {
            min_integer: DEFAULT_MIN_INTEGER_DIGITS,
            min_fraction: DEFAULT_MIN_FRACTION_DIGITS,
            max_fraction: DEFAULT_MAX_FRACTION_DIGITS,
        }
    }
}

/// Integer and fraction digit runs of a value such as `"123.45"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueParts<'a> {
    pub integer: Option<&'a str>,
    pub fraction: Option<&'a str>,
}

impl FormatSpec {
    /// Parse a digit-info string.
    ///
    /// # Examples
    ///
    /// ```
    /// use digits_core::FormatSpec;
    ///
    /// let spec = FormatSpec::parse("1.2-2").unwrap();
    /// assert_eq!(spec.min_integer_digits, Some(1));
    /// assert_eq!(spec.min_fraction_digits, Some(2));
    /// assert_eq!(spec.max_fraction_digits, Some(2));
    ///
    /// assert!(FormatSpec::parse("1-2").is_err());
    /// ```
    pub fn parse(digit_info: &str) -> Result<Self, ConfigurationError> {
        let invalid = || ConfigurationError::InvalidDigitInfo {
            digit_info: digit_info.to_string(),
        };
        let caps = DIGIT_INFO.captures(digit_info).ok_or_else(invalid)?;
        let number = |group: usize| -> Result<Option<u32>, ConfigurationError> {
            caps.get(group)
                .map(|m| m.as_str().parse::<u32>().map_err(|_| invalid()))
                .transpose()
        };

        let spec = FormatSpec {
            min_integer_digits: number(1)?,
            min_fraction_digits: number(3)?,
            max_fraction_digits: number(5)?,
        };
        if let (Some(min), Some(max)) = (spec.min_fraction_digits, spec.max_fraction_digits)
            && min > max
        {
            return Err(ConfigurationError::FractionRange { min, max });
        }
        Ok(spec)
    }

    /// Returns `true` when a minimum fraction length is configured, which
    /// switches the field into decimal mode.
    #[inline]
    pub fn has_fraction(&self) -> bool {
        self.min_fraction_digits.is_some()
    }

    /// Number of fraction digits the field may hold.
    #[inline]
    pub fn fraction_capacity(&self) -> usize {
        self.min_fraction_digits.unwrap_or(0) as usize
    }

    /// Integer digits left over once the fraction is reserved out of
    /// `max_digits`.
    #[inline]
    pub fn integer_capacity(&self, max_digits: u32) -> usize {
        (max_digits as usize).saturating_sub(self.fraction_capacity())
    }

    /// Apply rendering defaults.
    ///
    /// A lone minimum fraction larger than the default maximum raises the
    /// maximum with it.
    pub fn limits(&self) -> DigitLimits {
        let defaults = DigitLimits::default();
        let min_fraction = self.min_fraction_digits.unwrap_or(defaults.min_fraction);
        let max_fraction = match self.max_fraction_digits {
            Some(max) => max,
            None => defaults.max_fraction.max(min_fraction),
        };
        DigitLimits {
            min_integer: self.min_integer_digits.unwrap_or(defaults.min_integer),
            min_fraction,
            max_fraction,
        }
    }

    /// Split a field value into integer and fraction runs.
    ///
    /// Only values containing a decimal point match; `"123"` and
    /// `"1,234.5"` both return `None`.
    pub fn split_value(value: &str) -> Option<ValueParts<'_>> {
        let caps = DIGIT_INFO.captures(value)?;
        Some(ValueParts {
            integer: caps.get(1).map(|m| m.as_str()),
            fraction: caps.get(3).map(|m| m.as_str()),
        })
    }
}
