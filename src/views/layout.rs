//! Page shell: document head, navbar with language switcher, footer.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use super::PageContext;
use super::catalog::SLIDER_SCRIPT;
use crate::locale::{Locale, switch_locale_path};

/// Replace every `[data-panel]` placeholder with the fragment it points at.
/// A failed fetch falls back to the placeholder's `data-empty` text.
const PANEL_SCRIPT: &str = r#"
document.querySelectorAll('[data-panel]').forEach(function (el) {
  fetch(el.dataset.panel, { credentials: 'same-origin' })
    .then(function (r) { return r.ok ? r.text() : Promise.reject(r.status); })
    .then(function (html) {
      el.outerHTML = html;
      if (window.initSliders) window.initSliders();
    })
    .catch(function () {
      el.removeAttribute('aria-busy');
      el.innerHTML = '<p class="empty">' + (el.dataset.empty || '') + '</p>';
    });
});
"#;

/// Resolve the display name for the navbar. A rejected session is cleared
/// server-side by `/api/auth/me`, so the account link falls back to login.
const HYDRATE_SCRIPT: &str = r#"
(function () {
  var slot = document.querySelector('[data-user-slot]');
  if (!slot) return;
  fetch('/api/auth/me', { credentials: 'same-origin', cache: 'no-store' })
    .then(function (r) {
      if (r.status === 401) { window.location.reload(); return null; }
      return r.ok ? r.json() : null;
    })
    .then(function (u) { if (u && u.name) slot.textContent = u.name; })
    .catch(function () {});
})();
"#;

fn language_switcher(ctx: &PageContext<'_>) -> Markup {
    html! {
        nav.language aria-label=(ctx.t(&["nav", "language"], "Language")) {
            a.cycle href=(switch_locale_path(ctx.path, ctx.locale.cycle_next())) { (ctx.locale.label()) }
            @for locale in Locale::ALL {
                a.active[locale == ctx.locale] href=(switch_locale_path(ctx.path, locale)) hreflang=(locale.code()) {
                    (locale.label())
                }
            }
        }
    }
}

fn account(ctx: &PageContext<'_>) -> Markup {
    let account = ctx.t(&["nav", "account"], "My Account");
    html! {
        @if ctx.has_session {
            a href=(ctx.locale.href("/secure")) {
                @if let Some(name) = ctx.user_name {
                    (name)
                } @else {
                    span data-user-slot data-fallback=(account) { (account) }
                }
            }
            form.logout method="post" action=(ctx.locale.href("/auth/logout")) {
                button type="submit" { (ctx.t(&["nav", "logout"], "Logout")) }
            }
        } @else {
            a href=(ctx.locale.href("/auth/login")) { (ctx.t(&["nav", "login"], "Login")) }
        }
    }
}

fn navbar(ctx: &PageContext<'_>) -> Markup {
    html! {
        header.navbar {
            a.logo href=(ctx.locale.href("/")) { (ctx.t(&["nav", "logo"], "YALAKOM")) }
            nav.primary {
                a href=(ctx.locale.href("/")) { (ctx.t(&["nav", "home"], "Home")) }
                a href=(ctx.locale.href("/about")) { (ctx.t(&["nav", "about"], "About")) }
            }
            (language_switcher(ctx))
            div.account { (account(ctx)) }
        }
    }
}

fn footer(ctx: &PageContext<'_>) -> Markup {
    html! {
        footer.footer {
            p { (ctx.t(&["footer", "copyright"], "© Yalakhom. All rights reserved.")) }
        }
    }
}

/// Full HTML document around `body`.
#[must_use]
pub fn page(ctx: &PageContext<'_>, title: &str, body: Markup) -> Markup {
    let site = ctx.t(&["meta", "title"], "Yalakhom");
    let hydrate = ctx.has_session && ctx.user_name.is_none();
    html! {
        (DOCTYPE)
        html lang=(ctx.locale.code()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (site) }
                link rel="stylesheet" href="/static/site.css";
            }
            body {
                (navbar(ctx))
                main { (body) }
                (footer(ctx))
                script { (PreEscaped(SLIDER_SCRIPT)) }
                script { (PreEscaped(PANEL_SCRIPT)) }
                @if hydrate {
                    script { (PreEscaped(HYDRATE_SCRIPT)) }
                }
            }
        }
    }
}
