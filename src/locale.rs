//! Supported UI locales.
//!
//! Every page path starts with one of these codes. The set is closed; an
//! unknown first segment is not a locale and triggers normalization.

use std::fmt;

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    Ne,
    Zh,
}

impl Locale {
    /// All locales in display (and cycle) order.
    pub const ALL: [Self; 3] = [Self::En, Self::Ne, Self::Zh];

    /// Parse an exact locale code (`en`, `ne`, `zh`).
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "ne" => Some(Self::Ne),
            "zh" => Some(Self::Zh),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ne => "ne",
            Self::Zh => "zh",
        }
    }

    /// Short label shown in the language switcher.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Ne => "NP",
            Self::Zh => "粵",
        }
    }

    /// Next locale in the navbar cycle (en → ne → zh → en).
    #[must_use]
    pub fn cycle_next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Prefix an internal path with this locale: `/about` → `/en/about`.
    #[must_use]
    pub fn href(self, path: &str) -> String {
        format!("/{}{path}", self.code())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Rewrite `path` for `target`, keeping everything after the locale segment.
///
/// `/en/products/1` → `/zh/products/1`; a path without a locale segment is
/// prefixed instead.
#[must_use]
pub fn switch_locale_path(path: &str, target: Locale) -> String {
    let mut segments: Vec<&str> = path.split('/').collect();
    if segments.len() > 1 && Locale::parse(segments[1]).is_some() {
        segments[1] = target.code();
        return segments.join("/");
    }
    if path.is_empty() || path == "/" {
        return format!("/{}", target.code());
    }
    format!("/{}{path}", target.code())
}

#[cfg(test)]
#[path = "locale_test.rs"]
mod tests;
