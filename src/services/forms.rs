//! Authentication form flows: login, registration, and OTP verification.
//!
//! Handlers in `routes::auth` deserialize the posted form, call one of the
//! `submit_*` functions, and either redirect or re-render the page with the
//! returned feedback. Validation messages come from the locale dictionary
//! with English fallbacks.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::backend::{BackendError, LoginRequest, OtpRequest, RegisterRequest, StorefrontApi};
use crate::i18n::Dictionary;
use crate::locale::Locale;
use crate::policy::{AccessPolicy, safe_next};

/// Field name → message, in field order for stable rendering.
pub type FieldErrors = BTreeMap<String, String>;

pub const OTP_LENGTH: usize = 6;

/// Allowed password alphabet; the per-class requirements are checked separately.
static PASSWORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9@$!%*?&]{8,}$").expect("password pattern is valid"));
const PASSWORD_SPECIALS: &str = "@$!%*?&";
/// Nepal (+977, ten digits) or Hong Kong (+852, eight digits starting 5, 6 or 9).
static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((\+977-?[0-9]{10})|([0-9]{10})|(\+852-?[569][0-9]{7})|([569][0-9]{7}))$")
        .expect("phone pattern is valid")
});

// =============================================================================
// FORMS
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Checkbox value; absent when unchecked.
    #[serde(default)]
    pub remember: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

impl LoginForm {
    #[must_use]
    pub fn remember(&self) -> bool {
        matches!(self.remember.as_deref(), Some("on" | "true" | "1"))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub next: Option<String>,
}

impl SignupForm {
    fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyAction {
    #[default]
    Verify,
    Resend,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
    #[serde(default)]
    pub action: VerifyAction,
    #[serde(default)]
    pub next: Option<String>,
}

/// Banner and per-field messages shown when a form is re-rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFeedback {
    pub error: Option<String>,
    pub success: Option<String>,
    pub fields: FieldErrors,
}

impl FormFeedback {
    fn error(text: impl Into<String>) -> Self {
        Self { error: Some(text.into()), ..Self::default() }
    }

    fn success(text: impl Into<String>) -> Self {
        Self { success: Some(text.into()), ..Self::default() }
    }

    fn invalid(fields: FieldErrors, banner: impl Into<String>) -> Self {
        Self { error: Some(banner.into()), success: None, fields }
    }

    /// Backend field map when present, otherwise the flat error text.
    fn from_backend(err: &BackendError, banner: &str) -> Self {
        match err.field_errors() {
            Some(fields) => Self::invalid(fields, banner),
            None => Self::error(err.error_text()),
        }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

fn is_valid_password(password: &str) -> bool {
    PASSWORD_REGEX.is_match(password)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Client-side registration checks. Empty map means the form may be sent.
#[must_use]
pub fn validate_register(form: &SignupForm, dict: &Dictionary) -> FieldErrors {
    let msg = |key: &str, fallback: &str| dict.text(&["signup", "validation", key], fallback).to_owned();
    let mut errors = FieldErrors::new();

    if form.name.trim().chars().count() < 2 {
        errors.insert("name".into(), msg("nameMin", "Name must be at least 2 characters."));
    }
    if form.email.is_empty() {
        errors.insert("email".into(), msg("emailRequired", "Email is required."));
    }
    if !is_valid_password(&form.password) {
        errors.insert(
            "password".into(),
            msg(
                "passwordRule",
                "Password must be 8+ chars and include uppercase, lowercase, number, and special character.",
            ),
        );
    }
    if form.confirm_password.is_empty() {
        errors.insert("confirm_password".into(), msg("confirmRequired", "Confirm password is required."));
    } else if form.confirm_password != form.password {
        errors.insert("confirm_password".into(), msg("confirmMismatch", "Password does not match."));
    }
    if !is_valid_phone(&form.phone) {
        errors.insert(
            "phone".into(),
            msg("phoneRule", "Phone must be a valid Nepal (+977) or Hong Kong (+852) number."),
        );
    }
    if form.address.trim().is_empty() {
        errors.insert("address".into(), msg("addressRequired", "Address is required."));
    }
    errors
}

/// Keep digits only, at most [`OTP_LENGTH`] of them.
#[must_use]
pub fn sanitize_otp(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(OTP_LENGTH).collect()
}

#[must_use]
pub fn validate_verify(email: &str, otp: &str, dict: &Dictionary) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if email.trim().is_empty() {
        errors.insert(
            "email".into(),
            dict.text(&["verify", "validation", "emailRequired"], "Email is required.").to_owned(),
        );
    }
    if otp.trim().is_empty() {
        errors.insert("otp".into(), dict.text(&["verify", "validation", "otpRequired"], "OTP is required.").to_owned());
    }
    errors
}

// =============================================================================
// SUBMISSION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    SignedIn { token: String, redirect: String },
    Failed(FormFeedback),
}

pub async fn submit_login(
    api: &dyn StorefrontApi,
    form: &LoginForm,
    dict: &Dictionary,
    policy: &AccessPolicy,
    locale: Locale,
) -> LoginOutcome {
    let req = LoginRequest { email: form.email.clone(), password: form.password.clone() };
    match api.login(&req).await {
        Ok(resp) if !resp.token.is_empty() => {
            let redirect = safe_next(form.next.as_deref()).unwrap_or_else(|| policy.post_login_path(locale));
            tracing::info!(%locale, "login succeeded");
            LoginOutcome::SignedIn { token: resp.token, redirect }
        }
        Ok(_) => LoginOutcome::Failed(FormFeedback::error(dict.text(
            &["login", "errorDefault"],
            "Login failed. Please try again.",
        ))),
        Err(e) => {
            tracing::debug!(error = %e, "login rejected");
            LoginOutcome::Failed(FormFeedback::error(e.error_text()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    /// Account created; the page moves on to the OTP step.
    Registered(FormFeedback),
    Failed(FormFeedback),
}

pub async fn submit_signup(api: &dyn StorefrontApi, form: &SignupForm, dict: &Dictionary) -> SignupOutcome {
    let fix_fields = dict.text(&["signup", "errors", "fixFields"], "Please fix the highlighted fields.");

    let errors = validate_register(form, dict);
    if !errors.is_empty() {
        return SignupOutcome::Failed(FormFeedback::invalid(errors, fix_fields));
    }

    match api.register(&form.to_request()).await {
        Ok(message) => {
            tracing::info!("registration accepted");
            let text = message.unwrap_or_else(|| {
                dict.text(&["signup", "success", "register"], "Registration successful! OTP has been sent to your email.")
                    .to_owned()
            });
            SignupOutcome::Registered(FormFeedback::success(text))
        }
        Err(BackendError::Unexpected { status, message }) => {
            tracing::warn!(status, "registration returned unexpected status");
            let text = message.unwrap_or_else(|| {
                dict.text(&["signup", "errors", "unexpected"], "Unexpected response from server. Please try again.")
                    .to_owned()
            });
            SignupOutcome::Failed(FormFeedback::error(text))
        }
        Err(e) => SignupOutcome::Failed(FormFeedback::from_backend(&e, fix_fields)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified { redirect: String },
    Feedback(FormFeedback),
}

/// Verify the OTP, or resend it when the form's action asks for that.
pub async fn submit_verify(
    api: &dyn StorefrontApi,
    form: &VerifyForm,
    dict: &Dictionary,
    policy: &AccessPolicy,
    locale: Locale,
) -> VerifyOutcome {
    let email = form.email.trim();
    let fix_fields = dict.text(&["verify", "errors", "fixFields"], "Please fix the highlighted fields.");

    if form.action == VerifyAction::Resend {
        if email.is_empty() {
            return VerifyOutcome::Feedback(FormFeedback::error(dict.text(
                &["verify", "errors", "enterEmail"],
                "Please enter your email.",
            )));
        }
        return match api.resend_otp(email).await {
            Ok(message) => VerifyOutcome::Feedback(FormFeedback::success(message.unwrap_or_else(|| {
                dict.text(&["verify", "success", "otpResent"], "OTP resent successfully. Please check your email.")
                    .to_owned()
            }))),
            Err(e) => VerifyOutcome::Feedback(FormFeedback::from_backend(&e, fix_fields)),
        };
    }

    let otp = sanitize_otp(&form.otp);
    let errors = validate_verify(email, &otp, dict);
    if !errors.is_empty() {
        return VerifyOutcome::Feedback(FormFeedback::invalid(errors, fix_fields));
    }

    match api.verify_otp(&OtpRequest { email: email.to_owned(), otp }).await {
        Ok(_) => {
            let redirect = safe_next(form.next.as_deref()).unwrap_or_else(|| policy.login_path(locale));
            VerifyOutcome::Verified { redirect }
        }
        Err(e) => {
            let otp_check = dict.text(&["verify", "errors", "otpCheck"], "Please check your OTP and try again.");
            VerifyOutcome::Feedback(FormFeedback::from_backend(&e, otp_check))
        }
    }
}

#[cfg(test)]
#[path = "forms_test.rs"]
mod tests;
