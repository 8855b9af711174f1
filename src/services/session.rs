//! Session token persistence.
//!
//! ARCHITECTURE
//! ============
//! The backend issues an opaque bearer token on login. The storefront keeps
//! it in a single cookie; nothing is stored server-side. Reading the token is
//! cheap and happens on every request, but presence alone proves nothing:
//! only the identity call in `services::guard` validates it.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use percent_encoding::percent_decode_str;
use time::Duration;

use super::backend::User;

pub const SESSION_COOKIE: &str = "yalakhom";
/// "Remember me" lifetime.
pub const REMEMBER_DAYS: i64 = 15;

/// Cookie carrying a freshly issued token. Session-only unless `remember`.
#[must_use]
pub fn session_cookie(token: String, remember: bool, secure: bool) -> Cookie<'static> {
    let builder = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);
    if remember { builder.max_age(Duration::days(REMEMBER_DAYS)).build() } else { builder.build() }
}

/// Expired cookie that removes the token from the browser.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

/// Read the session token from request headers. Empty values count as absent.
///
/// The cookie jar is consulted first; if it yields nothing the raw `Cookie`
/// header is scanned directly and the value percent-decoded.
#[must_use]
pub fn resolve_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_owned());
        }
    }
    token_from_raw_header(headers)
}

fn token_from_raw_header(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{SESSION_COOKIE}=");
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(prefix.as_str()))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
        .filter(|v| !v.is_empty())
}

/// Per-request identity handed to views that render user-aware chrome.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl SessionContext {
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self { token: resolve_token(headers), user: None }
    }

    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// A token is present. Says nothing about its validity.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
