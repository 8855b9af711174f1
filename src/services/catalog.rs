//! Catalog panels.
//!
//! ARCHITECTURE
//! ============
//! Each home-page panel (categories, category bar, brands, products by type,
//! sliders) is loaded on its own: one backend listing call, filtered to
//! active rows, mapped to a display card and truncated to the requested
//! limit. Panels share no state, and a failed call degrades to an empty
//! panel instead of an error.

use serde_json::Value;

use super::backend::{Listing, StorefrontApi};
use crate::locale::Locale;

pub const DEFAULT_CATEGORY_LIMIT: usize = 4;
pub const DEFAULT_BRAND_LIMIT: usize = 4;
pub const DEFAULT_PRODUCT_LIMIT: usize = 10;
/// Skeleton cards never exceed this many, whatever the limit.
pub const MAX_PLACEHOLDERS: usize = 10;

/// Product listings exposed by the backend's `product/type/{type}` route.
pub const PRODUCT_TYPES: [&str; 4] = ["featuredProduct", "trendingProduct", "hotProduct", "mostSearchedProduct"];

#[must_use]
pub fn is_product_type(kind: &str) -> bool {
    PRODUCT_TYPES.contains(&kind)
}

// =============================================================================
// DISPLAY CARDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCard {
    pub id: Option<String>,
    pub name: String,
    pub slug: Option<String>,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandCard {
    pub id: Option<String>,
    pub name: String,
    pub slug: Option<String>,
    pub image: String,
}

/// Name-only category entry for the horizontal category bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLink {
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub name: String,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub discounted_price: Option<f64>,
}

impl ProductCard {
    /// A discounted price below the list price.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        matches!((self.price, self.discounted_price), (Some(p), Some(d)) if d < p)
    }

    /// Rounded percentage off, shown only when positive.
    #[must_use]
    pub fn discount_percent(&self) -> Option<i64> {
        if !self.has_discount() {
            return None;
        }
        let (price, disc) = (self.price?, self.discounted_price?);
        if price == 0.0 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        let pct = ((price - disc) / price * 100.0).round() as i64;
        (pct > 0).then_some(pct)
    }

    /// Price the customer pays, as `Rs. {n}`.
    #[must_use]
    pub fn price_label(&self) -> String {
        let amount = if self.has_discount() { self.discounted_price } else { self.price };
        money(amount)
    }

    /// Struck-through list price, present only with a discount.
    #[must_use]
    pub fn original_price_label(&self) -> Option<String> {
        self.has_discount().then(|| money(self.price))
    }
}

fn money(amount: Option<f64>) -> String {
    amount.map(|n| format!("Rs. {n}")).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideCard {
    pub id: Option<String>,
    pub image: String,
    pub alt: String,
    pub href: Option<String>,
}

/// What a panel shows: skeletons while loading, a flat empty state, or items.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelState<T> {
    Loading { placeholders: usize },
    Empty,
    Ready(Vec<T>),
}

impl<T> PanelState<T> {
    #[must_use]
    pub fn loading(limit: usize) -> Self {
        Self::Loading { placeholders: limit.min(MAX_PLACEHOLDERS) }
    }

    #[must_use]
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() { Self::Empty } else { Self::Ready(items) }
    }
}

// =============================================================================
// FIELD MAPPING
// =============================================================================

/// Only rows whose `status` is exactly `true` are published.
#[must_use]
pub fn is_active(row: &Value) -> bool {
    row.get("status") == Some(&Value::Bool(true))
}

/// Pick a locale-keyed name: requested locale, then en, ne, zh.
/// Anything other than an object yields an empty string.
#[must_use]
pub fn pick_localized(value: Option<&Value>, locale: Locale) -> String {
    let Some(Value::Object(names)) = value else {
        return String::new();
    };
    std::iter::once(locale.code())
        .chain(Locale::ALL.iter().map(|l| l.code()))
        .filter_map(|code| names.get(code).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_owned()
}

/// First element of an image array, or the value itself when a string.
#[must_use]
pub fn first_image(value: Option<&Value>) -> Option<String> {
    let image = match value? {
        Value::Array(items) => items.first().and_then(Value::as_str),
        Value::String(s) => Some(s.as_str()),
        _ => None,
    };
    image.filter(|s| !s.is_empty()).map(str::to_owned)
}

fn string_field(row: &Value, key: &str) -> Option<String> {
    row.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Numbers, or numeric strings the way a form-driven backend often stores them.
fn number_field(row: &Value, key: &str) -> Option<f64> {
    match row.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse().ok(),
        _ => None,
    }
}

fn active(rows: &[Value]) -> impl Iterator<Item = &Value> {
    rows.iter().filter(|row| is_active(row))
}

#[must_use]
pub fn map_categories(rows: &[Value], locale: Locale, limit: usize) -> Vec<CategoryCard> {
    active(rows)
        .filter_map(|row| {
            let name = pick_localized(row.get("name"), locale);
            let image = first_image(row.get("image"))?;
            (!name.is_empty()).then(|| CategoryCard {
                id: string_field(row, "_id"),
                name,
                slug: string_field(row, "slug"),
                image,
            })
        })
        .take(limit)
        .collect()
}

/// Category bar entries. Without a limit every active category is shown.
#[must_use]
pub fn map_category_links(rows: &[Value], locale: Locale, limit: Option<usize>) -> Vec<CategoryLink> {
    active(rows)
        .filter_map(|row| {
            let name = pick_localized(row.get("name"), locale);
            let slug = string_field(row, "slug")?;
            (!name.is_empty()).then(|| CategoryLink { id: string_field(row, "_id"), name, slug })
        })
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Brand names are plain strings, never locale-keyed.
#[must_use]
pub fn map_brands(rows: &[Value], limit: usize) -> Vec<BrandCard> {
    active(rows)
        .filter_map(|row| {
            Some(BrandCard {
                id: string_field(row, "_id"),
                name: string_field(row, "name")?,
                slug: string_field(row, "slug"),
                image: first_image(row.get("image"))?,
            })
        })
        .take(limit)
        .collect()
}

#[must_use]
pub fn map_products(rows: &[Value], locale: Locale, limit: usize) -> Vec<ProductCard> {
    active(rows)
        .map(|row| ProductCard {
            id: string_field(row, "_id"),
            slug: string_field(row, "slug"),
            name: pick_localized(row.get("name"), locale),
            image: match row.get("images") {
                Some(images @ Value::Array(_)) => first_image(Some(images)),
                _ => None,
            },
            price: number_field(row, "price"),
            discounted_price: number_field(row, "discounted_price"),
        })
        .take(limit)
        .collect()
}

/// Slides need an image; the alt text is the localized title when present.
#[must_use]
pub fn map_slides(rows: &[Value], locale: Locale) -> Vec<SlideCard> {
    active(rows)
        .filter_map(|row| {
            let image = first_image(row.get("image"))?;
            let alt = match row.get("title") {
                Some(Value::String(s)) => s.clone(),
                other => pick_localized(other, locale),
            };
            Some(SlideCard {
                id: string_field(row, "_id"),
                image,
                alt,
                href: string_field(row, "link").filter(|l| l.starts_with('/')),
            })
        })
        .collect()
}

// =============================================================================
// LOADERS
// =============================================================================

/// One listing call mapped into a panel. Failures become `Empty`.
async fn load_panel<T>(
    api: &dyn StorefrontApi,
    listing: Listing,
    map: impl FnOnce(&[Value]) -> Vec<T> + Send,
) -> PanelState<T> {
    match api.list(&listing).await {
        Ok(rows) => PanelState::from_items(map(&rows)),
        Err(e) => {
            tracing::warn!(path = %listing.path(), error = %e, "panel fetch failed");
            PanelState::Empty
        }
    }
}

pub async fn load_categories(api: &dyn StorefrontApi, locale: Locale, limit: usize) -> PanelState<CategoryCard> {
    load_panel(api, Listing::Categories, |rows| map_categories(rows, locale, limit)).await
}

pub async fn load_category_links(
    api: &dyn StorefrontApi,
    locale: Locale,
    limit: Option<usize>,
) -> PanelState<CategoryLink> {
    load_panel(api, Listing::Categories, |rows| map_category_links(rows, locale, limit)).await
}

pub async fn load_brands(api: &dyn StorefrontApi, limit: usize) -> PanelState<BrandCard> {
    load_panel(api, Listing::Brands, |rows| map_brands(rows, limit)).await
}

pub async fn load_products(
    api: &dyn StorefrontApi,
    kind: &str,
    locale: Locale,
    limit: usize,
) -> PanelState<ProductCard> {
    let listing = Listing::ProductsByType { kind: kind.to_owned(), limit };
    load_panel(api, listing, |rows| map_products(rows, locale, limit)).await
}

pub async fn load_slides(api: &dyn StorefrontApi, locale: Locale) -> PanelState<SlideCard> {
    load_panel(api, Listing::Sliders, |rows| map_slides(rows, locale)).await
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
