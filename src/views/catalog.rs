//! Catalog panel fragments and the hero slider.
//!
//! Every panel renders the same three shapes from its `PanelState`:
//! skeleton cards, a flat empty message, or the item grid. Pages embed the
//! loading shape inside a `data-panel` slot; the fragment route returns the
//! settled shape that replaces it.

use maud::{Markup, html};

use super::image_url;
use crate::carousel::{Carousel, DRAG_THRESHOLD_PX, RESUME_DELAY, SNAP_TRANSITION};
use crate::i18n::Dictionary;
use crate::locale::Locale;
use crate::services::catalog::{BrandCard, CategoryCard, CategoryLink, PanelState, ProductCard, SlideCard};

/// Client-side driver for `[data-slider]` roots. Mirrors `carousel::Carousel`;
/// thresholds and timings are read from data attributes rendered below.
pub const SLIDER_SCRIPT: &str = r#"
window.initSliders = function () {
  document.querySelectorAll('[data-slider]:not([data-ready])').forEach(function (root) {
    root.setAttribute('data-ready', '');
    var track = root.querySelector('.track');
    var dots = root.querySelectorAll('[data-go]');
    var count = Number(root.dataset.count) || 0;
    var threshold = Number(root.dataset.threshold) || 50;
    var resumeMs = Number(root.dataset.resume) || 250;
    var index = 0, paused = false, drag = null, resume = null;
    if (count < 2) return;
    function wrap(i) { return (i % count + count) % count; }
    function render(offset, animated) {
      track.style.transition = animated ? root.dataset.transition : 'none';
      var base = (index === 0 ? '0' : '-' + index * 100) + '%';
      track.style.transform = offset ? 'translateX(calc(' + base + ' + ' + offset + '%))' : 'translateX(' + base + ')';
      dots.forEach(function (d, i) { d.classList.toggle('active', i === index); });
    }
    function go(i) { index = wrap(i); render(0, true); }
    setInterval(function () { if (!paused && !drag) go(index + 1); }, Number(root.dataset.interval) || 4500);
    root.addEventListener('mouseenter', function () { paused = true; });
    root.addEventListener('mouseleave', function () { if (!drag) paused = false; });
    root.addEventListener('keydown', function (e) {
      if (e.key === 'ArrowLeft') go(index - 1);
      if (e.key === 'ArrowRight') go(index + 1);
    });
    root.querySelector('.prev').addEventListener('click', function () { go(index - 1); });
    root.querySelector('.next').addEventListener('click', function () { go(index + 1); });
    dots.forEach(function (d) { d.addEventListener('click', function () { go(Number(d.dataset.go)); }); });
    track.addEventListener('dragstart', function (e) { e.preventDefault(); });
    track.addEventListener('pointerdown', function (e) {
      paused = true; clearTimeout(resume); drag = { x: e.clientX, dx: 0 };
    });
    track.addEventListener('pointermove', function (e) {
      if (!drag || !track.clientWidth) return;
      drag.dx = e.clientX - drag.x;
      render(drag.dx / track.clientWidth * 100, false);
    });
    function release() {
      if (!drag) return;
      var dx = drag.dx; drag = null;
      if (dx > threshold) index = wrap(index - 1);
      else if (dx < -threshold) index = wrap(index + 1);
      render(0, true);
      resume = setTimeout(function () { paused = false; }, resumeMs);
    }
    track.addEventListener('pointerup', release);
    track.addEventListener('pointercancel', release);
    track.addEventListener('pointerleave', release);
  });
};
window.initSliders();
"#;

/// Placeholder a page renders for a panel; the panel script swaps in `src`.
#[must_use]
pub fn panel_slot(src: &str, empty_text: &str, loading: Markup) -> Markup {
    html! {
        div.panel-slot data-panel=(src) data-empty=(empty_text) aria-busy="true" { (loading) }
    }
}

fn skeletons(count: usize) -> Markup {
    html! {
        div.grid.skeleton {
            @for _ in 0..count {
                div.card.placeholder {}
            }
        }
    }
}

fn empty(text: &str) -> Markup {
    html! { p.empty { (text) } }
}

fn section(title: &str, body: Markup) -> Markup {
    html! {
        section.panel {
            h2 { (title) }
            (body)
        }
    }
}

#[must_use]
pub fn categories_panel(
    state: &PanelState<CategoryCard>,
    locale: Locale,
    dict: &Dictionary,
    api_url: &str,
) -> Markup {
    let title = dict.text(&["sections", "categories"], "Categories");
    let body = match state {
        PanelState::Loading { placeholders } => skeletons(*placeholders),
        PanelState::Empty => empty(dict.text(&["sections", "noResults"], "No results")),
        PanelState::Ready(items) => html! {
            div.grid.categories {
                @for c in items {
                    a.card href=(locale.href(&format!("/category/{}", c.slug.as_deref().unwrap_or_default()))) {
                        img src=(image_url(api_url, &c.image)) alt=(c.name) loading="lazy";
                        span { (c.name) }
                    }
                }
            }
        },
    };
    section(title, body)
}

/// Horizontal category names; the entry matching `current_path` is marked.
#[must_use]
pub fn category_bar(
    state: &PanelState<CategoryLink>,
    locale: Locale,
    dict: &Dictionary,
    current_path: Option<&str>,
) -> Markup {
    match state {
        PanelState::Loading { placeholders } => html! {
            nav.category-bar aria-busy="true" {
                @for _ in 0..*placeholders { span.placeholder {} }
            }
        },
        PanelState::Empty => html! {
            nav.category-bar { (empty(dict.text(&["sections", "noResults"], "No results"))) }
        },
        PanelState::Ready(items) => html! {
            nav.category-bar {
                @for c in items {
                    @let active = current_path.is_some_and(|p| p.contains(&format!("/{}", c.slug)));
                    a.active[active] href=(locale.href(&format!("/category/{}", c.slug))) { (c.name) }
                }
            }
        },
    }
}

#[must_use]
pub fn brands_panel(state: &PanelState<BrandCard>, locale: Locale, dict: &Dictionary, api_url: &str) -> Markup {
    let title = dict.text(&["sections", "brands"], "Brands");
    let body = match state {
        PanelState::Loading { placeholders } => skeletons(*placeholders),
        PanelState::Empty => empty(dict.text(&["sections", "noResults"], "No results")),
        PanelState::Ready(items) => html! {
            div.grid.brands {
                @for b in items {
                    a.card href=(locale.href(&format!("/brand/{}", b.slug.as_deref().unwrap_or_default()))) {
                        img src=(image_url(api_url, &b.image)) alt=(b.name) loading="lazy";
                        span { (b.name) }
                    }
                }
            }
        },
    };
    section(title, body)
}

fn product_card(p: &ProductCard, locale: Locale, api_url: &str) -> Markup {
    html! {
        article.card.product {
            a href=(locale.href(&format!("/product/{}", p.slug.as_deref().unwrap_or_default()))) {
                @if let Some(image) = &p.image {
                    img src=(image_url(api_url, image)) alt=(p.name) loading="lazy";
                } @else {
                    div.no-image {}
                }
                h3 { (p.name) }
            }
            div.pricing {
                @if let Some(original) = p.original_price_label() {
                    s.original { (original) }
                    @if let Some(pct) = p.discount_percent() {
                        span.discount { "-" (pct) "%" }
                    }
                }
                strong.price { (p.price_label()) }
            }
        }
    }
}

#[must_use]
pub fn products_panel(
    state: &PanelState<ProductCard>,
    kind: &str,
    locale: Locale,
    dict: &Dictionary,
    api_url: &str,
) -> Markup {
    let title = dict.text(&["sections", "products", kind], kind);
    let body = match state {
        PanelState::Loading { placeholders } => skeletons(*placeholders),
        PanelState::Empty => empty(dict.text(&["sections", "noProducts"], "No products found.")),
        PanelState::Ready(items) => html! {
            div.grid.products {
                @for p in items { (product_card(p, locale, api_url)) }
            }
        },
    };
    section(title, body)
}

/// Hero slider. Initial position comes from a fresh `Carousel`.
#[must_use]
pub fn slider(state: &PanelState<SlideCard>, dict: &Dictionary, api_url: &str, interval_ms: u64) -> Markup {
    let slides = match state {
        PanelState::Loading { .. } => return html! { div.slider.placeholder aria-busy="true" {} },
        PanelState::Empty => {
            return html! { div.slider.empty { (empty(dict.text(&["home", "noSlides"], "No slides provided."))) } };
        }
        PanelState::Ready(slides) => slides,
    };

    let carousel = Carousel::new(slides.len());
    let position = carousel.track_transform();
    html! {
        div.slider
            data-slider
            data-count=(carousel.count())
            data-interval=(interval_ms)
            data-threshold=(DRAG_THRESHOLD_PX.to_string())
            data-resume=(RESUME_DELAY.as_millis().to_string())
            data-transition=(SNAP_TRANSITION)
            tabindex="0"
        {
            div.track style=(format!("transform: {}; transition: {}", position.css(), position.transition())) {
                @for slide in slides {
                    div.slide {
                        @if let Some(href) = &slide.href {
                            a href=(href) { img src=(image_url(api_url, &slide.image)) alt=(slide.alt) draggable="false"; }
                        } @else {
                            img src=(image_url(api_url, &slide.image)) alt=(slide.alt) draggable="false";
                        }
                    }
                }
            }
            @if carousel.has_controls() {
                button.prev type="button" aria-label="Previous slide" { "‹" }
                button.next type="button" aria-label="Next slide" { "›" }
                div.dots {
                    @for i in 0..carousel.count() {
                        button.dot.active[i == carousel.index()] type="button" data-go=(i) aria-label=(format!("Go to slide {}", i + 1)) {}
                    }
                }
            }
        }
    }
}
