//! REST backend client.
//!
//! ARCHITECTURE
//! ============
//! The storefront owns no data. Catalog listings, authentication, and the
//! identity lookup all go through [`StorefrontApi`]; `BackendClient` is the
//! `reqwest` implementation and tests substitute an in-memory one.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses keep their raw body so callers can surface either the
//! backend's per-field validation map or a flat message. No call is retried.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CACHE_CONTROL, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const CONNECT_TIMEOUT_SECS: u64 = 10;
pub const FALLBACK_ERROR_TEXT: &str = "Something went wrong.";

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Identity returned by the backend. Only the display fields are consumed.
///
/// Deserialization never fails on a JSON value: fields that are missing or
/// of an unexpected shape are left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

impl From<Value> for User {
    fn from(value: Value) -> Self {
        // A locale-keyed name object yields its English entry, else any entry.
        let name = match value.get("name") {
            Some(Value::Object(map)) => non_empty_str(map.get("en"))
                .or_else(|| map.values().find_map(|v| non_empty_str(Some(v)))),
            other => non_empty_str(other),
        };
        Self {
            id: non_empty_str(value.get("_id")).or_else(|| non_empty_str(value.get("id"))),
            name,
            email: non_empty_str(value.get("email")),
        }
    }
}

impl User {
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("User")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub user: Option<User>,
    pub token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
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
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OtpRequest {
    pub email: String,
    pub otp: String,
}

/// Catalog listing endpoints. All return `{ "data": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Categories,
    Brands,
    Sliders,
    ProductsByType { kind: String, limit: usize },
}

impl Listing {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Categories => "/frontend/category".into(),
            Self::Brands => "/frontend/brand".into(),
            Self::Sliders => "/frontend/slider".into(),
            Self::ProductsByType { kind, .. } => format!("/frontend/product/type/{kind}"),
        }
    }
}

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request could not be sent or its body not read.
    #[error("backend request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("backend responded with status {status}")]
    Status { status: u16, body: String },

    /// A success response whose status the caller does not accept.
    #[error("unexpected backend response: status {status}")]
    Unexpected { status: u16, message: Option<String> },

    /// A success body that does not have the expected shape.
    #[error("backend response parse failed: {0}")]
    Parse(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Collect the string values of a JSON object or array, flattening one level
/// of nested arrays, joined by newlines.
fn join_strings(value: &Value) -> String {
    let items: Vec<&Value> = match value {
        Value::Object(map) => map.values().collect(),
        Value::Array(items) => items.iter().collect(),
        _ => Vec::new(),
    };
    items
        .into_iter()
        .flat_map(|v| match v {
            Value::Array(inner) => inner.iter().collect::<Vec<_>>(),
            other => vec![other],
        })
        .filter_map(Value::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

impl BackendError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Unexpected { status, .. } => Some(*status),
            _ => None,
        }
    }

    fn body_json(&self) -> Option<Value> {
        match self {
            Self::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// Per-field validation messages, when the body's `message` is an object.
    #[must_use]
    pub fn field_errors(&self) -> Option<BTreeMap<String, String>> {
        let body = self.body_json()?;
        let Value::Object(fields) = body.get("message")? else {
            return None;
        };
        let map: BTreeMap<String, String> = fields
            .iter()
            .filter_map(|(field, msg)| {
                let text = match msg {
                    Value::String(s) => s.clone(),
                    Value::Array(_) => join_strings(msg),
                    _ => return None,
                };
                Some((field.clone(), text))
            })
            .collect();
        Some(map)
    }

    /// Human-readable message for a flat error banner.
    #[must_use]
    pub fn error_text(&self) -> String {
        match self {
            Self::Status { status, body } => {
                let Some(json) = self.body_json() else {
                    let trimmed = body.trim();
                    return if trimmed.is_empty() {
                        format!("Request failed with status code {status}")
                    } else {
                        trimmed.to_owned()
                    };
                };
                let msg = match json.get("message") {
                    Some(m) if !m.is_null() => m,
                    _ => &json,
                };
                let text = match msg {
                    Value::String(s) => s.clone(),
                    Value::Object(_) | Value::Array(_) => join_strings(msg),
                    _ => String::new(),
                };
                if text.is_empty() { FALLBACK_ERROR_TEXT.to_owned() } else { text }
            }
            Self::Unexpected { message, .. } => message.clone().unwrap_or_else(|| FALLBACK_ERROR_TEXT.to_owned()),
            Self::Request(msg) | Self::Parse(msg) | Self::HttpClientBuild(msg) => msg.clone(),
        }
    }
}

// =============================================================================
// API TRAIT
// =============================================================================

/// Storefront view of the REST backend. Enables mocking in tests.
#[async_trait::async_trait]
pub trait StorefrontApi: Send + Sync {
    /// `POST frontend/auth/login`.
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, BackendError>;

    /// `POST frontend/auth/register-new-user`. Only `201 Created` counts as success.
    /// Returns the backend's success message, if any.
    async fn register(&self, req: &RegisterRequest) -> Result<Option<String>, BackendError>;

    /// `POST frontend/auth/verify-otp`.
    async fn verify_otp(&self, req: &OtpRequest) -> Result<Option<String>, BackendError>;

    /// `POST frontend/auth/resend-otp`.
    async fn resend_otp(&self, email: &str) -> Result<Option<String>, BackendError>;

    /// `GET frontend/auth/details` with a bearer token, never cached.
    async fn details(&self, token: &str) -> Result<User, BackendError>;

    /// Raw `data` rows of a listing endpoint; a non-array `data` is empty.
    async fn list(&self, listing: &Listing) -> Result<Vec<Value>, BackendError>;
}

// =============================================================================
// REQWEST CLIENT
// =============================================================================

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

fn message_of(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_owned)
}

impl BackendClient {
    /// Build a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into().trim_end_matches('/').to_owned() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request; non-2xx becomes `BackendError::Status`.
    async fn send(&self, path: &str, req: reqwest::RequestBuilder) -> Result<(StatusCode, String), BackendError> {
        let response = req
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        tracing::debug!(path, status = status.as_u16(), "backend call");
        if !status.is_success() {
            return Err(BackendError::Status { status: status.as_u16(), body });
        }
        Ok((status, body))
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(StatusCode, String), BackendError> {
        let req = self.http.post(self.url(path)).json(body);
        self.send(path, req).await
    }
}

#[async_trait::async_trait]
impl StorefrontApi for BackendClient {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, BackendError> {
        let (_, body) = self.post_json("frontend/auth/login", req).await?;
        serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))
    }

    async fn register(&self, req: &RegisterRequest) -> Result<Option<String>, BackendError> {
        let (status, body) = self
            .post_json("frontend/auth/register-new-user", req)
            .await?;
        if status != StatusCode::CREATED {
            return Err(BackendError::Unexpected { status: status.as_u16(), message: message_of(&body) });
        }
        Ok(message_of(&body))
    }

    async fn verify_otp(&self, req: &OtpRequest) -> Result<Option<String>, BackendError> {
        let (_, body) = self.post_json("frontend/auth/verify-otp", req).await?;
        Ok(message_of(&body))
    }

    async fn resend_otp(&self, email: &str) -> Result<Option<String>, BackendError> {
        let payload = serde_json::json!({ "email": email });
        let (_, body) = self
            .post_json("frontend/auth/resend-otp", &payload)
            .await?;
        Ok(message_of(&body))
    }

    async fn details(&self, token: &str) -> Result<User, BackendError> {
        let path = "frontend/auth/details";
        let req = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        let (_, body) = self.send(path, req).await?;

        let json: Value = serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))?;
        let user = match json.get("user") {
            Some(u) if !u.is_null() => u.clone(),
            _ => json,
        };
        Ok(User::from(user))
    }

    async fn list(&self, listing: &Listing) -> Result<Vec<Value>, BackendError> {
        let path = listing.path();
        let mut req = self.http.get(self.url(&path));
        if let Listing::ProductsByType { limit, .. } = listing {
            req = req.query(&[("limit", limit)]);
        }
        let (_, body) = self.send(&path, req).await?;

        let json: Value = serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))?;
        Ok(match json.get("data") {
            Some(Value::Array(rows)) => rows.clone(),
            _ => Vec::new(),
        })
    }
}

#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;
