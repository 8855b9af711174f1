//! Catalog panel fragments.
//!
//! Each endpoint performs one backend listing call and returns the settled
//! panel as an HTML fragment. Backend failures render the empty state with
//! status 200, so a slow or broken panel never affects its neighbours.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::response::{IntoResponse, Response};
use maud::Markup;
use serde::Deserialize;

use crate::locale::Locale;
use crate::services::catalog::{self, DEFAULT_BRAND_LIMIT, DEFAULT_CATEGORY_LIMIT, DEFAULT_PRODUCT_LIMIT};
use crate::state::AppState;
use crate::views::{self, catalog as panel_views};

#[derive(Debug, Default, Deserialize)]
pub struct PanelQuery {
    locale: Option<String>,
    limit: Option<usize>,
    /// Current page path, used to highlight the active category.
    path: Option<String>,
}

impl PanelQuery {
    fn locale(&self) -> Locale {
        self.locale.as_deref().and_then(Locale::parse).unwrap_or_default()
    }
}

fn fragment(markup: Markup) -> Response {
    ([(CACHE_CONTROL, "no-store")], views::render(markup)).into_response()
}

/// `GET /api/panels/sliders`
pub async fn sliders(State(state): State<AppState>, Query(q): Query<PanelQuery>) -> Response {
    let locale = q.locale();
    let panel = catalog::load_slides(state.api.as_ref(), locale).await;
    let dict = state.dictionaries.get(locale);
    fragment(panel_views::slider(&panel, dict, &state.config.api_url, state.config.slider_interval_ms))
}

/// `GET /api/panels/categories`
pub async fn categories(State(state): State<AppState>, Query(q): Query<PanelQuery>) -> Response {
    let locale = q.locale();
    let limit = q.limit.unwrap_or(DEFAULT_CATEGORY_LIMIT);
    let panel = catalog::load_categories(state.api.as_ref(), locale, limit).await;
    let dict = state.dictionaries.get(locale);
    fragment(panel_views::categories_panel(&panel, locale, dict, &state.config.api_url))
}

/// `GET /api/panels/category-bar`
pub async fn category_bar(State(state): State<AppState>, Query(q): Query<PanelQuery>) -> Response {
    let locale = q.locale();
    let panel = catalog::load_category_links(state.api.as_ref(), locale, q.limit).await;
    let dict = state.dictionaries.get(locale);
    fragment(panel_views::category_bar(&panel, locale, dict, q.path.as_deref()))
}

/// `GET /api/panels/brands`
pub async fn brands(State(state): State<AppState>, Query(q): Query<PanelQuery>) -> Response {
    let locale = q.locale();
    let limit = q.limit.unwrap_or(DEFAULT_BRAND_LIMIT);
    let panel = catalog::load_brands(state.api.as_ref(), limit).await;
    let dict = state.dictionaries.get(locale);
    fragment(panel_views::brands_panel(&panel, locale, dict, &state.config.api_url))
}

/// `GET /api/panels/products/{kind}`. Unknown product types are 404.
pub async fn products(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(q): Query<PanelQuery>,
) -> Response {
    if !catalog::is_product_type(&kind) {
        return StatusCode::NOT_FOUND.into_response();
    }
    let locale = q.locale();
    let limit = q.limit.unwrap_or(DEFAULT_PRODUCT_LIMIT);
    let panel = catalog::load_products(state.api.as_ref(), &kind, locale, limit).await;
    let dict = state.dictionaries.get(locale);
    fragment(panel_views::products_panel(&panel, &kind, locale, dict, &state.config.api_url))
}

#[cfg(test)]
#[path = "panels_test.rs"]
mod tests;
