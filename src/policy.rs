//! Shared authorization policy.
//!
//! ARCHITECTURE
//! ============
//! The edge gate (`routes::gate`) and the page guard (`services::guard`)
//! both read the same `AccessPolicy` from `AppState`, so the protected-path
//! set has exactly one source.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::locale::Locale;

/// Bytes escaped when a `next` target is written into `Location`.
/// `%` stays as is so already-encoded targets pass through unchanged.
const REDIRECT_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^');

/// How a locale-stripped path is treated by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Requires a session token.
    Protected,
    /// Login/signup; hidden from sessions that already hold a token.
    AuthOnly,
    Public,
}

#[derive(Debug, Clone)]
pub struct AccessPolicy {
    protected: Vec<String>,
    auth_only: Vec<String>,
    bypass: Vec<String>,
    login: String,
    post_login: String,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            protected: vec!["/secure".into(), "/bookmark".into(), "/dashboard".into()],
            auth_only: vec!["/auth/login".into(), "/auth/signup".into()],
            bypass: vec!["/_next".into(), "/static".into(), "/api".into(), "/healthz".into()],
            login: "/auth/login".into(),
            post_login: "/secure".into(),
        }
    }
}

/// True when `path` equals `prefix` or is a sub-path of it.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|tail| tail.is_empty() || tail.starts_with('/'))
}

impl AccessPolicy {
    /// Framework-internal, API, and asset paths skip the gate entirely.
    #[must_use]
    pub fn is_bypassed(&self, path: &str) -> bool {
        path.contains('.') || self.bypass.iter().any(|p| path.starts_with(p.as_str()))
    }

    /// Classify a locale-stripped path. Protected wins over auth-only.
    #[must_use]
    pub fn classify(&self, rest: &str) -> RouteClass {
        if self.protected.iter().any(|p| matches_prefix(rest, p)) {
            RouteClass::Protected
        } else if self.auth_only.iter().any(|p| matches_prefix(rest, p)) {
            RouteClass::AuthOnly
        } else {
            RouteClass::Public
        }
    }

    #[must_use]
    pub fn login_path(&self, locale: Locale) -> String {
        locale.href(&self.login)
    }

    /// Where an authenticated visitor goes when no `next` is supplied.
    #[must_use]
    pub fn post_login_path(&self, locale: Locale) -> String {
        locale.href(&self.post_login)
    }
}

/// Split `/{locale}/rest` into the locale and the rest path (`/` when empty).
///
/// Returns `None` when the first segment is not a supported locale.
#[must_use]
pub fn split_locale(path: &str) -> Option<(Locale, &str)> {
    let trimmed = path.strip_prefix('/')?;
    let (first, rest) = match trimmed.find('/') {
        Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
        None => (trimmed, ""),
    };
    let locale = Locale::parse(first)?;
    Some((locale, if rest.is_empty() { "/" } else { rest }))
}

/// Accept a post-login redirect target only if it stays on this site, and
/// return it percent-encoded so it is a valid `Location` value.
///
/// Targets carrying control characters are refused outright.
#[must_use]
pub fn safe_next(raw: Option<&str>) -> Option<String> {
    let next = raw?;
    if !next.starts_with('/') || next.starts_with("//") || next.starts_with("/\\") {
        return None;
    }
    if next.chars().any(char::is_control) {
        return None;
    }
    Some(utf8_percent_encode(next, REDIRECT_PATH).to_string())
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod tests;
