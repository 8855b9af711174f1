use super::*;
use crate::state::test_helpers::MockApi;
use serde_json::json;

// =============================================================================
// Field helpers
// =============================================================================

#[test]
fn active_requires_literal_true() {
    assert!(is_active(&json!({ "status": true })));
    assert!(!is_active(&json!({ "status": "true" })));
    assert!(!is_active(&json!({ "status": 1 })));
    assert!(!is_active(&json!({})));
}

#[test]
fn localized_name_falls_back_through_locales() {
    let name = json!({ "en": "Fruit", "zh": "水果" });
    assert_eq!(pick_localized(Some(&name), Locale::Zh), "水果");
    assert_eq!(pick_localized(Some(&name), Locale::Ne), "Fruit");

    let only_ne = json!({ "en": "", "ne": "फलफूल" });
    assert_eq!(pick_localized(Some(&only_ne), Locale::Zh), "फलफूल");
}

#[test]
fn localized_name_requires_object() {
    assert_eq!(pick_localized(Some(&json!("Fruit")), Locale::En), "");
    assert_eq!(pick_localized(None, Locale::En), "");
}

#[test]
fn first_image_handles_array_and_string() {
    assert_eq!(first_image(Some(&json!(["a.png", "b.png"]))).as_deref(), Some("a.png"));
    assert_eq!(first_image(Some(&json!("c.png"))).as_deref(), Some("c.png"));
    assert_eq!(first_image(Some(&json!([]))), None);
    assert_eq!(first_image(Some(&json!(5))), None);
}

// =============================================================================
// Mapping
// =============================================================================

#[test]
fn categories_filter_map_and_truncate() {
    let rows = vec![
        json!({ "_id": "1", "status": true, "name": { "en": "Fruit" }, "slug": "fruit", "image": ["f.png"] }),
        json!({ "_id": "2", "status": false, "name": { "en": "Hidden" }, "image": "h.png" }),
        json!({ "_id": "3", "status": true, "name": { "en": "No image" } }),
        json!({ "_id": "4", "status": true, "name": { "en": "Veg" }, "image": "v.png" }),
        json!({ "_id": "5", "status": true, "name": { "en": "Dairy" }, "image": "d.png" }),
    ];
    let cards = map_categories(&rows, Locale::En, 2);
    let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Fruit", "Veg"]);
    assert_eq!(cards[0].image, "f.png");
    assert_eq!(cards[0].slug.as_deref(), Some("fruit"));
}

#[test]
fn category_links_need_slug_and_honour_optional_limit() {
    let rows = vec![
        json!({ "status": true, "name": { "en": "Fruit" }, "slug": "fruit" }),
        json!({ "status": true, "name": { "en": "No slug" } }),
        json!({ "status": true, "name": { "en": "Veg" }, "slug": "veg" }),
    ];
    assert_eq!(map_category_links(&rows, Locale::En, None).len(), 2);
    assert_eq!(map_category_links(&rows, Locale::En, Some(1))[0].slug, "fruit");
}

#[test]
fn brands_require_plain_string_name() {
    let rows = vec![
        json!({ "status": true, "name": "Acme", "image": ["acme.png"] }),
        json!({ "status": true, "name": { "en": "Localized" }, "image": "l.png" }),
    ];
    let brands = map_brands(&rows, 10);
    assert_eq!(brands.len(), 1);
    assert_eq!(brands[0].name, "Acme");
}

#[test]
fn products_map_prices_and_images() {
    let rows = vec![json!({
        "_id": "p1",
        "status": true,
        "slug": "apple",
        "name": { "en": "Apple" },
        "images": ["apple.png"],
        "price": 200,
        "discounted_price": "150"
    })];
    let products = map_products(&rows, Locale::En, 10);
    let p = &products[0];
    assert_eq!(p.image.as_deref(), Some("apple.png"));
    assert_eq!(p.price, Some(200.0));
    assert_eq!(p.discounted_price, Some(150.0));
}

#[test]
fn product_without_image_array_has_no_image() {
    let rows = vec![json!({ "status": true, "name": { "en": "X" }, "images": "x.png" })];
    assert_eq!(map_products(&rows, Locale::En, 10)[0].image, None);
}

#[test]
fn slides_keep_internal_links_only() {
    let rows = vec![
        json!({ "status": true, "image": "a.jpg", "title": "Sale", "link": "/en/products" }),
        json!({ "status": true, "image": ["b.jpg"], "title": { "en": "Travel" }, "link": "https://evil.test" }),
        json!({ "status": true, "title": "No image" }),
    ];
    let slides = map_slides(&rows, Locale::En);
    assert_eq!(slides.len(), 2);
    assert_eq!(slides[0].href.as_deref(), Some("/en/products"));
    assert_eq!(slides[1].alt, "Travel");
    assert_eq!(slides[1].href, None);
}

// =============================================================================
// Product pricing
// =============================================================================

fn product(price: Option<f64>, discounted: Option<f64>) -> ProductCard {
    ProductCard { id: None, slug: None, name: "P".into(), image: None, price, discounted_price: discounted }
}

#[test]
fn discount_applies_only_when_lower() {
    let p = product(Some(200.0), Some(150.0));
    assert!(p.has_discount());
    assert_eq!(p.discount_percent(), Some(25));
    assert_eq!(p.price_label(), "Rs. 150");
    assert_eq!(p.original_price_label().as_deref(), Some("Rs. 200"));

    let same = product(Some(200.0), Some(200.0));
    assert!(!same.has_discount());
    assert_eq!(same.price_label(), "Rs. 200");
    assert_eq!(same.original_price_label(), None);
}

#[test]
fn discount_percent_rounds_and_hides_zero() {
    assert_eq!(product(Some(3.0), Some(2.0)).discount_percent(), Some(33));
    assert_eq!(product(Some(1000.0), Some(999.0)).discount_percent(), None);
}

#[test]
fn missing_price_renders_empty_label() {
    assert_eq!(product(None, None).price_label(), "");
    assert_eq!(product(Some(99.5), None).price_label(), "Rs. 99.5");
}

// =============================================================================
// Panel state & loaders
// =============================================================================

#[test]
fn loading_placeholders_are_capped() {
    assert_eq!(PanelState::<ProductCard>::loading(25), PanelState::Loading { placeholders: 10 });
    assert_eq!(PanelState::<ProductCard>::loading(4), PanelState::Loading { placeholders: 4 });
}

#[test]
fn product_types_are_closed() {
    assert!(is_product_type("hotProduct"));
    assert!(!is_product_type("coldProduct"));
}

#[tokio::test]
async fn failed_fetch_degrades_to_empty() {
    let api = MockApi::new();
    let state = load_products(&api, "featuredProduct", Locale::En, 10).await;
    assert_eq!(state, PanelState::Empty);
}

#[tokio::test]
async fn no_active_rows_is_empty() {
    let api = MockApi::new().with_listing(&Listing::Brands, vec![json!({ "status": false, "name": "A", "image": "a" })]);
    assert_eq!(load_brands(&api, 4).await, PanelState::Empty);
}

#[tokio::test]
async fn loaded_rows_are_ready() {
    let api = MockApi::new().with_listing(
        &Listing::Categories,
        vec![json!({ "status": true, "name": { "en": "Fruit" }, "slug": "fruit", "image": "f.png" })],
    );
    let PanelState::Ready(items) = load_categories(&api, Locale::En, 4).await else {
        panic!("expected ready panel");
    };
    assert_eq!(items[0].name, "Fruit");

    let PanelState::Ready(links) = load_category_links(&api, Locale::En, None).await else {
        panic!("expected ready panel");
    };
    assert_eq!(links[0].slug, "fruit");
}

#[tokio::test]
async fn panels_issue_independent_calls() {
    let api = MockApi::new();
    let _ = load_slides(&api, Locale::En).await;
    let _ = load_brands(&api, 4).await;
    let calls = api.calls.lock().unwrap().clone();
    assert_eq!(calls, ["list:/frontend/slider", "list:/frontend/brand"]);
}
