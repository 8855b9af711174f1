//! Localized page handlers.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse};

use super::PageRequest;
use crate::policy::split_locale;
use crate::services::guard::ProtectedUser;
use crate::state::AppState;
use crate::views::{self, PageContext, pages};

/// `GET /{locale}`: home with catalog panels.
pub async fn home(State(state): State<AppState>, req: PageRequest) -> Html<String> {
    let ctx = req.context(&state.dictionaries);
    views::render(pages::home(&ctx, &state.config.api_url))
}

/// `GET /{locale}/about`
pub async fn about(State(state): State<AppState>, req: PageRequest) -> Html<String> {
    views::render(pages::about(&req.context(&state.dictionaries)))
}

fn protected_page(state: &AppState, guard: &ProtectedUser, path: &str, section: &str, title: &str) -> Html<String> {
    let user = guard.user();
    let ctx = PageContext {
        locale: guard.locale,
        dict: state.dictionaries.get(guard.locale),
        path,
        has_session: true,
        user_name: Some(user.display_name()),
    };
    views::render(pages::account(&ctx, section, title, user.display_name()))
}

/// `GET /{locale}/secure`
pub async fn secure(State(state): State<AppState>, guard: ProtectedUser, uri: Uri) -> Html<String> {
    protected_page(&state, &guard, uri.path(), "secure", "Secure Page")
}

/// `GET /{locale}/dashboard`
pub async fn dashboard(State(state): State<AppState>, guard: ProtectedUser, uri: Uri) -> Html<String> {
    protected_page(&state, &guard, uri.path(), "dashboard", "Dashboard")
}

/// `GET /{locale}/bookmark`
pub async fn bookmark(State(state): State<AppState>, guard: ProtectedUser, uri: Uri) -> Html<String> {
    protected_page(&state, &guard, uri.path(), "bookmark", "Bookmarks")
}

/// Fallback for unmatched paths: the not-found page in the path's locale.
pub async fn not_found(State(state): State<AppState>, uri: Uri) -> impl IntoResponse {
    let locale = split_locale(uri.path()).map(|(l, _)| l).unwrap_or_default();
    let ctx = PageContext {
        locale,
        dict: state.dictionaries.get(locale),
        path: uri.path(),
        has_session: false,
        user_name: None,
    };
    (StatusCode::NOT_FOUND, views::render(pages::not_found(&ctx)))
}
