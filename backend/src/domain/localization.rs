//! Interface copy lookup by dotted key.
//!
//! Two tables ship with the binary, French and English, each a nested JSON
//! object (`nav.*`, `auth.*`, `package.status.*`, ...). A key such as
//! `package.status.in_transit` walks that object one segment at a time.
//! Lookups never fail: a missing or non-text entry falls back to the caller's
//! default and then to the key itself.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

const FR_TABLE_JSON: &str = include_str!("../../locales/fr.json");
const EN_TABLE_JSON: &str = include_str!("../../locales/en.json");

/// Interface language.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Self; 2] = [Self::Fr, Self::En];

    /// Two-letter language code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unsupported locale code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedLocale {
    pub code: String,
}

impl fmt::Display for UnsupportedLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported locale '{}'; expected 'fr' or 'en'", self.code)
    }
}

impl std::error::Error for UnsupportedLocale {}

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    /// Parse `fr` or `en`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|locale| s.eq_ignore_ascii_case(locale.as_str()))
            .ok_or_else(|| UnsupportedLocale { code: s.to_owned() })
    }
}

/// Both translation tables.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationCatalogue {
    fr: Value,
    en: Value,
}

impl TranslationCatalogue {
    /// Decode the tables embedded in the binary.
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Ok(Self {
            fr: serde_json::from_str(FR_TABLE_JSON)?,
            en: serde_json::from_str(EN_TABLE_JSON)?,
        })
    }

    /// Build a catalogue from arbitrary tables.
    pub fn from_tables(fr: Value, en: Value) -> Self {
        Self { fr, en }
    }

    /// Raw table for `locale`.
    pub fn table(&self, locale: Locale) -> &Value {
        match locale {
            Locale::Fr => &self.fr,
            Locale::En => &self.en,
        }
    }

    /// Text stored under `key`, if it is a non-empty string.
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        key.split('.')
            .try_fold(self.table(locale), |node, segment| node.get(segment))
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Resolve `key` with fallbacks.
    ///
    /// Returns the table text when present, else a non-empty `default`, else
    /// `key` itself.
    ///
    /// # Examples
    /// ```
    /// use colipass::domain::{Locale, TranslationCatalogue};
    ///
    /// let catalogue = TranslationCatalogue::embedded().unwrap();
    /// assert_eq!(catalogue.translate(Locale::En, "nav.login", None), "Login");
    /// assert_eq!(catalogue.translate(Locale::Fr, "nav.login", None), "Connexion");
    /// assert_eq!(catalogue.translate(Locale::En, "nav.nope", Some("Fallback")), "Fallback");
    /// assert_eq!(catalogue.translate(Locale::En, "nav.nope", None), "nav.nope");
    /// ```
    pub fn translate<'a>(&'a self, locale: Locale, key: &'a str, default: Option<&'a str>) -> &'a str {
        self.lookup(locale, key)
            .or_else(|| default.filter(|text| !text.is_empty()))
            .unwrap_or(key)
    }
}

/// Lookup bound to a current language.
#[derive(Debug, Clone)]
pub struct Translator {
    catalogue: Arc<TranslationCatalogue>,
    language: Locale,
}

impl Translator {
    /// Translator starting in the default language (French).
    pub fn new(catalogue: Arc<TranslationCatalogue>) -> Self {
        Self::with_language(catalogue, Locale::default())
    }

    pub fn with_language(catalogue: Arc<TranslationCatalogue>, language: Locale) -> Self {
        Self {
            catalogue,
            language,
        }
    }

    /// Current language.
    pub fn language(&self) -> Locale {
        self.language
    }

    /// Switch the current language.
    pub fn change_language(&mut self, language: Locale) {
        self.language = language;
    }

    /// Translate `key` in the current language.
    pub fn t<'a>(&'a self, key: &'a str, default: Option<&'a str>) -> &'a str {
        self.catalogue.translate(self.language, key, default)
    }
}
