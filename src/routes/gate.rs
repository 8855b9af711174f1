//! Locale & route gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs in front of every route. It normalizes paths without a locale
//! segment, keeps visitors without a session cookie out of protected pages,
//! and sends visitors holding one away from login/signup. The decision only
//! looks at the path, query, and cookie presence; it never calls the
//! backend, so a stale token passes here and is caught by the page guard.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::locale::Locale;
use crate::policy::{AccessPolicy, RouteClass, safe_next, split_locale};
use crate::services::session;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    Redirect(String),
}

fn query_value(query: Option<&str>, key: &str) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Decide what to do with a request for `path` (no query) and its raw `query`.
#[must_use]
pub fn decide(policy: &AccessPolicy, path: &str, query: Option<&str>, has_token: bool) -> GateDecision {
    if policy.is_bypassed(path) {
        return GateDecision::Pass;
    }

    let Some((locale, rest)) = split_locale(path) else {
        let mut target = Locale::default().href(path);
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            target.push('?');
            target.push_str(q);
        }
        return GateDecision::Redirect(target);
    };

    match policy.classify(rest) {
        RouteClass::Protected if !has_token => {
            let mut params = form_urlencoded::Serializer::new(String::new());
            for (k, v) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
                if k != "next" {
                    params.append_pair(&k, &v);
                }
            }
            params.append_pair("next", path);
            GateDecision::Redirect(format!("{}?{}", policy.login_path(locale), params.finish()))
        }
        RouteClass::AuthOnly if has_token => {
            let next = query_value(query, "next");
            let target = safe_next(next.as_deref()).unwrap_or_else(|| policy.post_login_path(locale));
            GateDecision::Redirect(target)
        }
        _ => GateDecision::Pass,
    }
}

/// Axum middleware wrapping [`decide`]. Redirects are `307 Temporary Redirect`.
pub async fn gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let has_token = session::resolve_token(req.headers()).is_some();
    let decision = decide(&state.policy, req.uri().path(), req.uri().query(), has_token);

    match decision {
        GateDecision::Pass => next.run(req).await,
        GateDecision::Redirect(location) => {
            tracing::debug!(path = %req.uri().path(), %location, has_token, "gate redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
