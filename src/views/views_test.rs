use super::*;
use crate::i18n::Dictionaries;
use crate::services::catalog::{PanelState, ProductCard, SlideCard};
use crate::services::forms::{FormFeedback, LoginForm};

fn ctx<'a>(dict: &'a Dictionary, locale: Locale, path: &'a str, has_session: bool) -> PageContext<'a> {
    PageContext { locale, dict, path, has_session, user_name: None }
}

#[test]
fn image_url_resolves_backend_filenames() {
    assert_eq!(image_url("http://api.test", "a.png"), "http://api.test/image/a.png");
    assert_eq!(image_url("http://api.test", "/banners/x.jpg"), "/banners/x.jpg");
    assert_eq!(image_url("http://api.test", "https://cdn.test/y.png"), "https://cdn.test/y.png");
}

#[test]
fn layout_renders_locale_switcher_for_current_path() {
    let dicts = Dictionaries::load().unwrap();
    let c = ctx(dicts.get(Locale::En), Locale::En, "/en/about", false);
    let html = pages::about(&c).into_string();
    assert!(html.contains(r#"<html lang="en">"#));
    assert!(html.contains(r#"href="/ne/about""#));
    assert!(html.contains(r#"href="/zh/about""#));
    assert!(html.contains(r#"href="/en/auth/login""#));
    assert!(!html.contains("/api/auth/me"));
}

#[test]
fn session_cookie_enables_hydration_and_logout() {
    let dicts = Dictionaries::load().unwrap();
    let c = ctx(dicts.get(Locale::Zh), Locale::Zh, "/zh", true);
    let html = pages::about(&c).into_string();
    assert!(html.contains(r#"action="/zh/auth/logout""#));
    assert!(html.contains("/api/auth/me"));
}

#[test]
fn home_renders_independent_panel_slots() {
    let dicts = Dictionaries::load().unwrap();
    let c = ctx(dicts.get(Locale::Ne), Locale::Ne, "/ne", false);
    let html = pages::home(&c, "http://api.test").into_string();
    assert!(html.contains(r#"data-panel="/api/panels/categories?locale=ne&amp;limit=4""#));
    assert!(html.contains(r#"data-panel="/api/panels/products/hotProduct?locale=ne&amp;limit=10""#));
    assert!(html.contains(r#"data-panel="/api/panels/sliders?locale=ne""#));
    assert_eq!(html.matches("data-panel=").count(), 8);
}

#[test]
fn slider_starts_at_first_slide() {
    let dicts = Dictionaries::load().unwrap();
    let slides = vec![
        SlideCard { id: None, image: "a.jpg".into(), alt: "A".into(), href: Some("/en/products".into()) },
        SlideCard { id: None, image: "b.jpg".into(), alt: "B".into(), href: None },
    ];
    let html = catalog::slider(&PanelState::Ready(slides), dicts.get(Locale::En), "http://api.test", 4500)
        .into_string();
    assert!(html.contains("transform: translateX(0%); transition: transform 450ms ease"));
    assert!(html.contains(r#"data-count="2""#));
    assert!(html.contains(r#"data-threshold="50""#));
    assert!(html.contains(r#"data-resume="250""#));
    assert_eq!(html.matches("data-go=").count(), 2);
}

#[test]
fn slider_script_reads_carousel_settings_from_markup() {
    use crate::carousel::SNAP_TRANSITION;

    let dicts = Dictionaries::load().unwrap();
    let slides = vec![
        SlideCard { id: None, image: "a.jpg".into(), alt: "A".into(), href: None },
        SlideCard { id: None, image: "b.jpg".into(), alt: "B".into(), href: None },
    ];
    let html = catalog::slider(&PanelState::Ready(slides), dicts.get(Locale::En), "", 4500).into_string();
    assert!(html.contains(&format!(r#"data-transition="{SNAP_TRANSITION}""#)));
    for attr in ["count", "threshold", "resume", "interval", "transition"] {
        assert!(catalog::SLIDER_SCRIPT.contains(&format!("root.dataset.{attr}")), "{attr}");
    }
}

#[test]
fn single_slide_has_no_controls() {
    let dicts = Dictionaries::load().unwrap();
    let slides = vec![SlideCard { id: None, image: "a.jpg".into(), alt: "A".into(), href: None }];
    let html = catalog::slider(&PanelState::Ready(slides), dicts.get(Locale::En), "", 4500).into_string();
    assert!(!html.contains("data-go="));
    assert!(!html.contains(r#"class="prev""#));
}

#[test]
fn empty_product_panel_shows_message() {
    let dicts = Dictionaries::load().unwrap();
    let html = catalog::products_panel(&PanelState::Empty, "featuredProduct", Locale::En, dicts.get(Locale::En), "")
        .into_string();
    assert!(html.contains("Featured Products"));
    assert!(html.contains("No products found."));
}

#[test]
fn product_card_shows_discount() {
    let dicts = Dictionaries::load().unwrap();
    let product = ProductCard {
        id: None,
        slug: Some("apple".into()),
        name: "Apple".into(),
        image: None,
        price: Some(200.0),
        discounted_price: Some(150.0),
    };
    let html = catalog::products_panel(
        &PanelState::Ready(vec![product]),
        "hotProduct",
        Locale::En,
        dicts.get(Locale::En),
        "",
    )
    .into_string();
    assert!(html.contains("Rs. 150"));
    assert!(html.contains("Rs. 200"));
    assert!(html.contains("-25%"));
    assert!(html.contains(r#"href="/en/product/apple""#));
}

#[test]
fn login_page_keeps_next_and_remember() {
    let dicts = Dictionaries::load().unwrap();
    let c = ctx(dicts.get(Locale::En), Locale::En, "/en/auth/login", false);
    let form = LoginForm {
        email: "a@b.c".into(),
        password: "secret".into(),
        remember: Some("on".into()),
        next: Some("/en/dashboard".into()),
    };
    let feedback = FormFeedback { error: Some("Invalid credentials".into()), ..FormFeedback::default() };
    let html = auth::login_page(&c, &form, &feedback).into_string();
    assert!(html.contains(r#"name="next" value="/en/dashboard""#));
    assert!(html.contains("checked"));
    assert!(html.contains("Invalid credentials"));
    assert!(!html.contains("secret"));
}
