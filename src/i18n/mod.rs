//! Locale dictionaries.
//!
//! DESIGN
//! ======
//! Each locale's translations are a nested JSON document compiled into the
//! binary. They are parsed once at startup and shared read-only. Lookups take
//! the key path as a slice of segments and always carry a fallback, so a
//! missing translation degrades to the caller's default text.

use serde_json::Value;

use crate::locale::Locale;

const EN: &str = include_str!("dictionaries/en.json");
const NE: &str = include_str!("dictionaries/ne.json");
const ZH: &str = include_str!("dictionaries/zh.json");

#[derive(Debug, thiserror::Error)]
#[error("dictionary {locale} is malformed: {source}")]
pub struct DictionaryError {
    locale: Locale,
    #[source]
    source: serde_json::Error,
}

/// One locale's translation tree. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    root: Value,
}

impl Dictionary {
    /// Parse a dictionary from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not valid JSON.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        Ok(Self { root: serde_json::from_str(raw)? })
    }

    /// Resolve `path` in the tree, or return `fallback` when any segment is
    /// missing or the leaf is not a string.
    #[must_use]
    pub fn text<'a>(&'a self, path: &[&str], fallback: &'a str) -> &'a str {
        path.iter()
            .try_fold(&self.root, |node, segment| node.get(segment))
            .and_then(Value::as_str)
            .unwrap_or(fallback)
    }
}

/// All supported dictionaries, loaded together.
#[derive(Debug, Clone, Default)]
pub struct Dictionaries {
    en: Dictionary,
    ne: Dictionary,
    zh: Dictionary,
}

impl Dictionaries {
    /// Parse the embedded dictionaries.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first locale whose JSON fails to parse.
    pub fn load() -> Result<Self, DictionaryError> {
        let parse = |locale: Locale, raw: &str| {
            Dictionary::from_json(raw).map_err(|source| DictionaryError { locale, source })
        };
        Ok(Self { en: parse(Locale::En, EN)?, ne: parse(Locale::Ne, NE)?, zh: parse(Locale::Zh, ZH)? })
    }

    #[must_use]
    pub fn get(&self, locale: Locale) -> &Dictionary {
        match locale {
            Locale::En => &self.en,
            Locale::Ne => &self.ne,
            Locale::Zh => &self.zh,
        }
    }

    /// Look up by raw code; unknown codes get the default locale's dictionary.
    #[must_use]
    pub fn get_code(&self, code: &str) -> &Dictionary {
        self.get(Locale::parse(code).unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
