//! Locale data for decimal rendering.
//!
//! Only the symbols and grouping sizes of the decimal pattern are carried.
//! Every shipped locale uses the `#,##0.###` shape except `en-IN`, which
//! groups the leading digits in pairs.

use crate::error::ConfigurationError;

/// Tag used when the configuration names no locale.
pub const DEFAULT_LOCALE: &str = "en";

/// Decimal symbols and grouping for one locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocaleData {
    pub tag: &'static str,
    pub decimal: &'static str,
    pub group: &'static str,
    pub minus: &'static str,
    pub infinity: &'static str,
    /// Size of the rightmost integer group.
    pub last_group_size: usize,
    /// Size of every group left of the rightmost one.
    pub group_size: usize,
}

const fn western(tag: &'static str, decimal: &'static str, group: &'static str) -> LocaleData {
    LocaleData {
        tag,
        decimal,
        group,
        minus: "-",
        infinity: "∞",
        last_group_size: 3,
        group_size: 3,
    }
}

static LOCALES: &[LocaleData] = &[
    western("en", ".", ","),
    LocaleData {
        group_size: 2,
        ..western("en-in", ".", ",")
    },
    western("ja", ".", ","),
    western("zh", ".", ","),
    western("ko", ".", ","),
    western("de", ",", "."),
    western("de-ch", ".", "’"),
    western("fr", ",", "\u{202f}"),
    western("es", ",", "."),
    western("it", ",", "."),
    western("pt", ",", "."),
    western("nl", ",", "."),
    western("ru", ",", "\u{a0}"),
    LocaleData {
        minus: "\u{2212}",
        ..western("sv", ",", "\u{a0}")
    },
];

impl LocaleData {
    /// Resolve a locale tag.
    ///
    /// Matching ignores case and accepts `_` for `-`. A regional tag with no
    /// data of its own falls back to its base language.
    ///
    /// # Examples
    ///
    /// ```
    /// use digits_core::LocaleData;
    ///
    /// assert_eq!(LocaleData::lookup("en-US").unwrap().tag, "en");
    /// assert_eq!(LocaleData::lookup("en_IN").unwrap().group_size, 2);
    /// assert!(LocaleData::lookup("tlh").is_err());
    /// ```
    pub fn lookup(tag: &str) -> Result<&'static LocaleData, ConfigurationError> {
        let normalized = tag.trim().to_ascii_lowercase().replace('_', "-");
        let base = normalized.split('-').next().unwrap_or_default();

        find(&normalized)
            .or_else(|| find(base))
            .ok_or_else(|| ConfigurationError::UnknownLocale {
                tag: tag.to_string(),
            })
    }
}

fn find(tag: &str) -> Option<&'static LocaleData> {
    LOCALES.iter().find(|l| l.tag == tag)
}
