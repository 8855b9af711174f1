//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the localized pages, the auth form posts, the
//! catalog panel fragments, and static assets. The locale & route gate
//! wraps everything; protected pages additionally pass the auth guard via
//! the `ProtectedUser` extractor.

pub mod auth;
pub mod gate;
pub mod pages;
pub mod panels;

use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::middleware;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::i18n::Dictionaries;
use crate::locale::Locale;
use crate::policy::split_locale;
use crate::services::session::SessionContext;
use crate::state::AppState;
use crate::views::PageContext;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/auth/me", get(auth::me))
        .route("/api/panels/sliders", get(panels::sliders))
        .route("/api/panels/categories", get(panels::categories))
        .route("/api/panels/category-bar", get(panels::category_bar))
        .route("/api/panels/brands", get(panels::brands))
        .route("/api/panels/products/{kind}", get(panels::products))
        .route("/{locale}", get(pages::home))
        .route("/{locale}/", get(pages::home))
        .route("/{locale}/about", get(pages::about))
        .route("/{locale}/auth/login", get(auth::login_page).post(auth::login))
        .route("/{locale}/auth/signup", get(auth::signup_page).post(auth::signup))
        .route("/{locale}/auth/verify-account", get(auth::verify_page).post(auth::verify))
        .route("/{locale}/auth/logout", axum::routing::post(auth::logout))
        .route("/{locale}/secure", get(pages::secure))
        .route("/{locale}/dashboard", get(pages::dashboard))
        .route("/{locale}/bookmark", get(pages::bookmark))
        .nest_service("/static", static_files)
        .fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), gate::gate))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// PAGE REQUEST EXTRACTOR
// =============================================================================

/// Locale, path, and session of a localized page request.
///
/// Rejects with 404 when the first path segment is not a supported locale;
/// the gate normally redirects such paths before they get here.
pub struct PageRequest {
    pub locale: Locale,
    pub path: String,
    pub session: SessionContext,
}

impl PageRequest {
    #[must_use]
    pub fn context<'a>(&'a self, dictionaries: &'a Dictionaries) -> PageContext<'a> {
        PageContext {
            locale: self.locale,
            dict: dictionaries.get(self.locale),
            path: &self.path,
            has_session: self.session.has_token(),
            user_name: self.session.user.as_ref().map(|u| u.display_name()),
        }
    }
}

impl<S> FromRequestParts<S> for PageRequest
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_owned();
        let (locale, _) = split_locale(&path).ok_or(StatusCode::NOT_FOUND)?;
        Ok(Self { locale, session: SessionContext::from_headers(&parts.headers), path })
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
