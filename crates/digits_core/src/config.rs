//! Field configuration.
//!
//! Both the digit-info string and the max-digits limit are optional and
//! independent. Nothing derived from them is cached: every accessor parses
//! afresh, so a host may swap the configuration between keystrokes.

use crate::error::ConfigurationError;
use crate::format_spec::{DigitLimits, FormatSpec};
use crate::locale::{DEFAULT_LOCALE, LocaleData};
use serde::Deserialize;
use std::time::Duration;

/// Delay between an Enter keystroke and its commit.
pub const DEFAULT_ENTER_DELAY_MS: u64 = 50;

/// What a new Enter does to commits still waiting from earlier Enters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnterPolicy {
    /// Every Enter commits on its own; the last to run wins.
    #[default]
    Independent,
    /// Cancel pending commits before scheduling a new one.
    CancelPrevious,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DigitsConfig {
    /// `{minInt}.{minFrac}-{maxFrac}`.
    pub digit_info: Option<String>,
    /// Locale tag for rendering, `en` when unset.
    pub locale: Option<String>,
    /// Total significant digits; `0` means no limit.
    pub max_digits: Option<u32>,
    pub enter_delay_ms: u64,
    pub enter_policy: EnterPolicy,
}

impl Default for DigitsConfig {
    fn default() -> Self {
        Self {
            digit_info: None,
            locale: None,
            max_digits: None,
            enter_delay_ms: DEFAULT_ENTER_DELAY_MS,
            enter_policy: EnterPolicy::default(),
        }
    }
}

impl DigitsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML.
    ///
    /// ```
    /// use digits_core::DigitsConfig;
    ///
    /// let config = DigitsConfig::from_toml_str(r#"
    ///     digit_info = "1.2-2"
    ///     max_digits = 5
    /// "#).unwrap();
    /// assert_eq!(config.max_digits(), Some(5));
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn with_digit_info(mut self, digit_info: impl Into<String>) -> Self {
        self.digit_info = Some(digit_info.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_max_digits(mut self, max_digits: u32) -> Self {
        self.max_digits = Some(max_digits);
        self
    }

    pub fn with_enter_delay(mut self, delay: Duration) -> Self {
        self.enter_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_enter_policy(mut self, policy: EnterPolicy) -> Self {
        self.enter_policy = policy;
        self
    }

    /// The digit-info string, treating an empty one as absent.
    pub fn digit_info(&self) -> Option<&str> {
        self.digit_info.as_deref().filter(|s| !s.is_empty())
    }

    /// Parse the digit-info string, if any.
    pub fn format_spec(&self) -> Result<Option<FormatSpec>, ConfigurationError> {
        self.digit_info().map(FormatSpec::parse).transpose()
    }

    /// The digit limit, treating `0` as absent.
    pub fn max_digits(&self) -> Option<u32> {
        self.max_digits.filter(|m| *m > 0)
    }

    pub fn locale_tag(&self) -> &str {
        self.locale
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_LOCALE)
    }

    /// Committed values go through locale rendering when a digit-info
    /// string or a locale is configured.
    pub fn formats_decimal(&self) -> bool {
        self.digit_info.is_some() || self.locale.is_some()
    }

    /// Resolved digit limits for rendering.
    pub fn digit_limits(&self) -> Result<DigitLimits, ConfigurationError> {
        Ok(self.format_spec()?.map(|s| s.limits()).unwrap_or_default())
    }

    pub fn locale_data(&self) -> Result<&'static LocaleData, ConfigurationError> {
        LocaleData::lookup(self.locale_tag())
    }

    pub fn enter_delay(&self) -> Duration {
        Duration::from_millis(self.enter_delay_ms)
    }

    /// Check digit-info and locale up front instead of on first use.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.format_spec()?;
        self.locale_data()?;
        Ok(())
    }
}
