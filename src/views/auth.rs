//! Login, signup, and account verification pages.

use maud::{Markup, html};

use super::PageContext;
use super::layout::page;
use crate::services::forms::{FormFeedback, LoginForm, OTP_LENGTH, SignupForm};

/// Which half of the signup page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupStep {
    Register,
    Otp,
}

fn banner(feedback: &FormFeedback) -> Markup {
    html! {
        @if let Some(error) = &feedback.error {
            div.alert.error role="alert" { (error) }
        }
        @if let Some(success) = &feedback.success {
            div.alert.success role="status" { (success) }
        }
    }
}

fn field(label: &str, name: &str, kind: &str, value: &str, feedback: &FormFeedback) -> Markup {
    let error = feedback.fields.get(name);
    html! {
        label.field.invalid[error.is_some()] {
            span { (label) }
            input type=(kind) name=(name) value=(value) aria-invalid=[error.map(|_| "true")];
            @if let Some(msg) = error {
                small.field-error { (msg) }
            }
        }
    }
}

fn next_input(next: Option<&str>) -> Markup {
    html! {
        @if let Some(next) = next {
            input type="hidden" name="next" value=(next);
        }
    }
}

#[must_use]
pub fn login_page(ctx: &PageContext<'_>, form: &LoginForm, feedback: &FormFeedback) -> Markup {
    let title = ctx.t(&["login", "title"], "Login");
    let body = html! {
        section.auth {
            h1 { (title) }
            p.subtitle { (ctx.t(&["login", "subtitle"], "Enter your email and password to continue")) }
            (banner(feedback))
            form method="post" action=(ctx.locale.href("/auth/login")) {
                (field(ctx.t(&["login", "emailLabel"], "Email"), "email", "email", &form.email, feedback))
                (field(ctx.t(&["login", "passwordLabel"], "Password"), "password", "password", "", feedback))
                label.remember {
                    input type="checkbox" name="remember" value="on" checked[form.remember()];
                    span { (ctx.t(&["login", "remember"], "Remember me")) }
                }
                (next_input(form.next.as_deref()))
                button type="submit" { (ctx.t(&["login", "submit"], "Sign in")) }
            }
            p {
                (ctx.t(&["login", "noAccount"], "Don't have an account?")) " "
                a href=(ctx.locale.href("/auth/signup")) { (ctx.t(&["login", "register"], "Register")) }
            }
        }
    };
    page(ctx, title, body)
}

fn otp_form(ctx: &PageContext<'_>, email: &str, otp: &str, next: Option<&str>, feedback: &FormFeedback) -> Markup {
    html! {
        form method="post" action=(ctx.locale.href("/auth/verify-account")) {
            (field(ctx.t(&["verify", "emailLabel"], "Email"), "email", "email", email, feedback))
            label.field.invalid[feedback.fields.contains_key("otp")] {
                span { (ctx.t(&["verify", "otpLabel"], "OTP")) }
                input type="text" name="otp" value=(otp) inputmode="numeric" autocomplete="one-time-code"
                    maxlength=(OTP_LENGTH) pattern="[0-9]*";
                @if let Some(msg) = feedback.fields.get("otp") {
                    small.field-error { (msg) }
                }
            }
            (next_input(next))
            button type="submit" name="action" value="verify" { (ctx.t(&["verify", "submit"], "Verify")) }
            button.secondary type="submit" name="action" value="resend" formnovalidate {
                (ctx.t(&["verify", "resend"], "Resend OTP"))
            }
        }
    }
}

#[must_use]
pub fn signup_page(ctx: &PageContext<'_>, form: &SignupForm, feedback: &FormFeedback, step: SignupStep) -> Markup {
    let title = ctx.t(&["signup", "title"], "Create Account");
    let body = html! {
        section.auth {
            h1 { (title) }
            (banner(feedback))
            @match step {
                SignupStep::Register => {
                    form method="post" action=(ctx.locale.href("/auth/signup")) {
                        (field(ctx.t(&["signup", "nameLabel"], "Full name"), "name", "text", &form.name, feedback))
                        (field(ctx.t(&["signup", "emailLabel"], "Email"), "email", "email", &form.email, feedback))
                        (field(ctx.t(&["signup", "phoneLabel"], "Phone"), "phone", "tel", &form.phone, feedback))
                        (field(ctx.t(&["signup", "addressLabel"], "Address"), "address", "text", &form.address, feedback))
                        (field(ctx.t(&["signup", "passwordLabel"], "Password"), "password", "password", "", feedback))
                        (field(ctx.t(&["signup", "confirmLabel"], "Confirm password"), "confirm_password", "password", "", feedback))
                        (next_input(form.next.as_deref()))
                        button type="submit" { (ctx.t(&["signup", "submit"], "Register")) }
                    }
                }
                SignupStep::Otp => {
                    (otp_form(ctx, &form.email, "", form.next.as_deref(), &FormFeedback::default()))
                }
            }
        }
    };
    page(ctx, title, body)
}

#[must_use]
pub fn verify_page(
    ctx: &PageContext<'_>,
    email: &str,
    otp: &str,
    next: Option<&str>,
    feedback: &FormFeedback,
) -> Markup {
    let title = ctx.t(&["verify", "title"], "Verify Account");
    let body = html! {
        section.auth {
            h1 { (title) }
            (banner(feedback))
            (otp_form(ctx, email, otp, next, feedback))
        }
    };
    page(ctx, title, body)
}
