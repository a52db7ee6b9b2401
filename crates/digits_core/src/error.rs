//! Error types.
//!
//! Only configuration mistakes are errors. Malformed user input never is:
//! the commit path falls back to an empty value instead.

use std::fmt;

/// A digit-info string or locale tag the engine cannot work with.
///
/// Raised synchronously from whichever operation first needs the broken
/// value. Hosts are expected to surface it during development rather than
/// recover from it at input time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The digit-info string does not match `{int}.{minFrac}-{maxFrac}`.
    InvalidDigitInfo { digit_info: String },
    /// Minimum fraction digits exceed the explicit maximum.
    FractionRange { min: u32, max: u32 },
    /// No locale data for the tag or its base language.
    UnknownLocale { tag: String },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::InvalidDigitInfo { digit_info } => {
                write!(f, "{digit_info} is not a valid digit info for number pipes")
            }
            ConfigurationError::FractionRange { min, max } => write!(
                f,
                "the minimum number of digits after fraction ({min}) is higher than the maximum ({max})"
            ),
            ConfigurationError::UnknownLocale { tag } => {
                write!(f, "missing locale data for the locale \"{tag}\"")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Failure to load a session script.
#[derive(Debug)]
pub enum ScriptError {
    Parse(toml::de::Error),
    Config(ConfigurationError),
    /// A `key` step names a key the replay driver does not know.
    UnknownKey { name: String },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Parse(err) => write!(f, "invalid session script: {err}"),
            ScriptError::Config(err) => write!(f, "invalid field configuration: {err}"),
            ScriptError::UnknownKey { name } => write!(f, "unknown key name: {name:?}"),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Parse(err) => Some(err),
            ScriptError::Config(err) => Some(err),
            ScriptError::UnknownKey { .. } => None,
        }
    }
}

impl From<toml::de::Error> for ScriptError {
    fn from(err: toml::de::Error) -> Self {
        ScriptError::Parse(err)
    }
}

impl From<ConfigurationError> for ScriptError {
    fn from(err: ConfigurationError) -> Self {
        ScriptError::Config(err)
    }
}
