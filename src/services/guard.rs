//! Server-side auth boundary for protected pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! The edge gate only checks that a token cookie exists. Before a protected
//! page renders, this guard asks the backend who the token belongs to. A
//! missing or rejected token ends in a redirect to the locale's login page;
//! a rejected token is also cleared so the gate stops treating the visitor
//! as signed in.

use axum::extract::FromRef;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::backend::User;
use super::session::{self, SessionContext};
use crate::locale::Locale;
use crate::policy::{AccessPolicy, split_locale};
use crate::state::AppState;

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Login redirect produced when the guard refuses a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRedirect {
    pub location: String,
    /// Set when the backend rejected the token; the response expires the cookie.
    pub clear_cookie: bool,
    pub cookie_secure: bool,
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        let redirect = Redirect::temporary(&self.location);
        if self.clear_cookie {
            let jar = CookieJar::new().add(session::clear_session_cookie(self.cookie_secure));
            (jar, redirect).into_response()
        } else {
            redirect.into_response()
        }
    }
}

/// `/{locale}/auth/login`, with `?next=` only when a return path is given.
#[must_use]
pub fn login_url(policy: &AccessPolicy, locale: Locale, return_path: &str) -> String {
    let base = policy.login_path(locale);
    if return_path.is_empty() {
        base
    } else {
        format!("{base}?next={}", utf8_percent_encode(return_path, URI_COMPONENT))
    }
}

/// Resolve and verify the session, or produce the login redirect.
///
/// # Errors
///
/// Returns an [`AuthRedirect`] when no token is present, or when the
/// backend identity call fails for any reason.
pub async fn require_auth(
    state: &AppState,
    headers: &HeaderMap,
    locale: Locale,
    return_path: &str,
) -> Result<User, AuthRedirect> {
    let redirect = |clear_cookie| AuthRedirect {
        location: login_url(&state.policy, locale, return_path),
        clear_cookie,
        cookie_secure: state.config.cookie_secure,
    };

    let Some(token) = session::resolve_token(headers) else {
        return Err(redirect(false));
    };

    match state.api.details(&token).await {
        Ok(user) => Ok(user),
        Err(e) => {
            tracing::warn!(error = %e, status = ?e.status(), "session rejected by backend");
            Err(redirect(true))
        }
    }
}

// =============================================================================
// EXTRACTOR
// =============================================================================

/// Verified user for a protected page. Use as a handler parameter.
pub struct ProtectedUser {
    pub locale: Locale,
    pub session: SessionContext,
}

impl ProtectedUser {
    /// Present for every extracted `ProtectedUser`.
    #[must_use]
    pub fn user(&self) -> User {
        self.session.user.clone().unwrap_or_default()
    }
}

impl<S> axum::extract::FromRequestParts<S> for ProtectedUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let path = parts.uri.path().to_owned();
        let locale = split_locale(&path).map(|(l, _)| l).unwrap_or_default();

        let user = require_auth(&app_state, &parts.headers, locale, &path).await?;
        let session = SessionContext::from_headers(&parts.headers).with_user(user);
        Ok(Self { locale, session })
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
