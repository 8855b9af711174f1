//! Auth routes: login, signup, OTP verification, logout and identity lookup.

use axum::Form;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::PageRequest;
use crate::services::backend::{BackendError, User};
use crate::services::forms::{
    self, FormFeedback, LoginForm, LoginOutcome, SignupForm, SignupOutcome, VerifyForm, VerifyOutcome,
};
use crate::services::session;
use crate::state::AppState;
use crate::views::{self, auth as auth_views, auth::SignupStep};

#[derive(Debug, Default, Deserialize)]
pub struct AuthQuery {
    next: Option<String>,
    email: Option<String>,
}

// =============================================================================
// LOGIN
// =============================================================================

/// `GET /{locale}/auth/login`
pub async fn login_page(
    State(state): State<AppState>,
    req: PageRequest,
    Query(query): Query<AuthQuery>,
) -> Response {
    let form = LoginForm { next: query.next, ..LoginForm::default() };
    let ctx = req.context(&state.dictionaries);
    views::render(auth_views::login_page(&ctx, &form, &FormFeedback::default())).into_response()
}

/// `POST /{locale}/auth/login`: set the session cookie and leave, or re-render.
pub async fn login(State(state): State<AppState>, req: PageRequest, Form(form): Form<LoginForm>) -> Response {
    let dict = state.dictionaries.get(req.locale);
    match forms::submit_login(state.api.as_ref(), &form, dict, &state.policy, req.locale).await {
        LoginOutcome::SignedIn { token, redirect } => {
            let cookie = session::session_cookie(token, form.remember(), state.config.cookie_secure);
            (CookieJar::new().add(cookie), Redirect::to(&redirect)).into_response()
        }
        LoginOutcome::Failed(feedback) => {
            let ctx = req.context(&state.dictionaries);
            let page = auth_views::login_page(&ctx, &form, &feedback);
            (StatusCode::UNPROCESSABLE_ENTITY, views::render(page)).into_response()
        }
    }
}

// =============================================================================
// SIGNUP & VERIFICATION
// =============================================================================

/// `GET /{locale}/auth/signup`
pub async fn signup_page(
    State(state): State<AppState>,
    req: PageRequest,
    Query(query): Query<AuthQuery>,
) -> Response {
    let form = SignupForm { next: query.next, ..SignupForm::default() };
    let ctx = req.context(&state.dictionaries);
    views::render(auth_views::signup_page(&ctx, &form, &FormFeedback::default(), SignupStep::Register))
        .into_response()
}

/// `POST /{locale}/auth/signup`: validate, register, then show the OTP step.
pub async fn signup(State(state): State<AppState>, req: PageRequest, Form(form): Form<SignupForm>) -> Response {
    let dict = state.dictionaries.get(req.locale);
    let (status, feedback, step) = match forms::submit_signup(state.api.as_ref(), &form, dict).await {
        SignupOutcome::Registered(feedback) => (StatusCode::OK, feedback, SignupStep::Otp),
        SignupOutcome::Failed(feedback) => (StatusCode::UNPROCESSABLE_ENTITY, feedback, SignupStep::Register),
    };
    let ctx = req.context(&state.dictionaries);
    (status, views::render(auth_views::signup_page(&ctx, &form, &feedback, step))).into_response()
}

/// `GET /{locale}/auth/verify-account`
pub async fn verify_page(
    State(state): State<AppState>,
    req: PageRequest,
    Query(query): Query<AuthQuery>,
) -> Response {
    let ctx = req.context(&state.dictionaries);
    let email = query.email.unwrap_or_default();
    let page = auth_views::verify_page(&ctx, &email, "", query.next.as_deref(), &FormFeedback::default());
    views::render(page).into_response()
}

/// `POST /{locale}/auth/verify-account`: verify or resend the OTP.
pub async fn verify(State(state): State<AppState>, req: PageRequest, Form(form): Form<VerifyForm>) -> Response {
    let dict = state.dictionaries.get(req.locale);
    match forms::submit_verify(state.api.as_ref(), &form, dict, &state.policy, req.locale).await {
        VerifyOutcome::Verified { redirect } => Redirect::to(&redirect).into_response(),
        VerifyOutcome::Feedback(feedback) => {
            let status = if feedback.error.is_some() { StatusCode::UNPROCESSABLE_ENTITY } else { StatusCode::OK };
            let ctx = req.context(&state.dictionaries);
            let otp = forms::sanitize_otp(&form.otp);
            let page = auth_views::verify_page(&ctx, form.email.trim(), &otp, form.next.as_deref(), &feedback);
            (status, views::render(page)).into_response()
        }
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// `POST /{locale}/auth/logout`: clear the cookie and go home.
pub async fn logout(State(state): State<AppState>, req: PageRequest) -> impl IntoResponse {
    let jar = CookieJar::new().add(session::clear_session_cookie(state.config.cookie_secure));
    (jar, Redirect::to(&req.locale.href("/")))
}

/// `GET /api/auth/me`: current user, for navbar hydration.
///
/// A token the backend refuses is cleared and answered with 401; transport
/// failures leave the cookie alone and answer 502.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(token) = session::resolve_token(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    match state.api.details(&token).await {
        Ok(user) => Json::<User>(user).into_response(),
        Err(e @ BackendError::Status { .. }) => {
            tracing::info!(status = ?e.status(), "clearing rejected session");
            let jar = CookieJar::new().add(session::clear_session_cookie(state.config.cookie_secure));
            (jar, StatusCode::UNAUTHORIZED).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "identity lookup failed");
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
