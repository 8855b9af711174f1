//! Content pages: home, about, the protected account pages, and 404.

use maud::{Markup, html};

use super::PageContext;
use super::catalog::{brands_panel, categories_panel, category_bar, panel_slot, products_panel, slider};
use super::layout::page;
use crate::services::catalog::{
    DEFAULT_BRAND_LIMIT, DEFAULT_CATEGORY_LIMIT, DEFAULT_PRODUCT_LIMIT, PRODUCT_TYPES, PanelState,
};

fn panel_src(ctx: &PageContext<'_>, panel: &str, params: &[(&str, &str)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("locale", ctx.locale.code());
    for (key, value) in params {
        query.append_pair(key, value);
    }
    format!("/api/panels/{panel}?{}", query.finish())
}

/// Home page. Every catalog panel is a skeleton that loads independently.
#[must_use]
pub fn home(ctx: &PageContext<'_>, api_url: &str) -> Markup {
    let no_results = ctx.t(&["sections", "noResults"], "No results");
    let no_products = ctx.t(&["sections", "noProducts"], "No products found.");
    let (category_limit, brand_limit, product_limit) =
        (DEFAULT_CATEGORY_LIMIT.to_string(), DEFAULT_BRAND_LIMIT.to_string(), DEFAULT_PRODUCT_LIMIT.to_string());
    let body = html! {
        (panel_slot(&panel_src(ctx, "sliders", &[]), ctx.t(&["home", "noSlides"], "No slides provided."),
            slider(&PanelState::loading(0), ctx.dict, api_url, 0)))
        (panel_slot(&panel_src(ctx, "category-bar", &[("path", ctx.path)]), no_results,
            category_bar(&PanelState::loading(6), ctx.locale, ctx.dict, None)))
        (panel_slot(&panel_src(ctx, "categories", &[("limit", category_limit.as_str())]), no_results,
            categories_panel(&PanelState::loading(DEFAULT_CATEGORY_LIMIT), ctx.locale, ctx.dict, api_url)))
        @for kind in PRODUCT_TYPES {
            (panel_slot(&panel_src(ctx, &format!("products/{kind}"), &[("limit", product_limit.as_str())]), no_products,
                products_panel(&PanelState::loading(DEFAULT_PRODUCT_LIMIT), kind, ctx.locale, ctx.dict, api_url)))
        }
        (panel_slot(&panel_src(ctx, "brands", &[("limit", brand_limit.as_str())]), no_results,
            brands_panel(&PanelState::loading(DEFAULT_BRAND_LIMIT), ctx.locale, ctx.dict, api_url)))
    };
    page(ctx, ctx.t(&["home", "title"], "Home"), body)
}

#[must_use]
pub fn about(ctx: &PageContext<'_>) -> Markup {
    let title = ctx.t(&["about", "title"], "About Us");
    let body = html! {
        section.about {
            h1 { (title) }
            p { (ctx.t(&["about", "body"], "")) }
        }
    };
    page(ctx, title, body)
}

/// Account pages behind the auth guard. `section` names the dictionary
/// block holding the page title.
#[must_use]
pub fn account(ctx: &PageContext<'_>, section: &str, fallback_title: &str, user_name: &str) -> Markup {
    let title = ctx.t(&[section, "title"], fallback_title);
    let body = html! {
        section.account {
            h1 { (title) }
            p { (ctx.t(&["secure", "welcome"], "Welcome")) ", " (user_name) }
        }
    };
    page(ctx, title, body)
}

#[must_use]
pub fn not_found(ctx: &PageContext<'_>) -> Markup {
    let title = ctx.t(&["notFound", "title"], "Oops! Page Not Found");
    let body = html! {
        section.not-found {
            p.code { "404" }
            h1 { (title) }
            a href=(ctx.locale.href("/")) { (ctx.t(&["notFound", "home"], "Go Home")) }
        }
    };
    page(ctx, title, body)
}
