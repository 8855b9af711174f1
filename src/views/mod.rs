//! Server-rendered HTML.
//!
//! ARCHITECTURE
//! ============
//! Views are plain functions returning `maud::Markup`. Full pages go through
//! `layout::page`, which adds the navbar, footer, and the small scripts that
//! load panel fragments and hydrate the signed-in user. Fragments served
//! under `/api/panels` render without the layout.

pub mod auth;
pub mod catalog;
pub mod layout;
pub mod pages;

use axum::response::Html;
use maud::Markup;

use crate::i18n::Dictionary;
use crate::locale::Locale;

/// Wrap rendered markup as an HTML response body.
#[must_use]
pub fn render(markup: Markup) -> Html<String> {
    Html(markup.into_string())
}

/// Backend-hosted image filenames resolve under `{api_url}/image/`.
/// Absolute URLs and site paths are used as given.
#[must_use]
pub fn image_url(api_url: &str, file: &str) -> String {
    if file.starts_with('/') || file.starts_with("http://") || file.starts_with("https://") {
        file.to_owned()
    } else {
        format!("{api_url}/image/{file}")
    }
}

/// Everything a full page needs besides its body.
pub struct PageContext<'a> {
    pub locale: Locale,
    pub dict: &'a Dictionary,
    /// Request path, used by the language switcher.
    pub path: &'a str,
    /// A session cookie is present. Identity is hydrated client-side.
    pub has_session: bool,
    /// Display name when the page already verified the session.
    pub user_name: Option<&'a str>,
}

impl<'a> PageContext<'a> {
    #[must_use]
    pub fn t(&self, path: &[&str], fallback: &'a str) -> &'a str {
        self.dict.text(path, fallback)
    }
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
