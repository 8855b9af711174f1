//! Runtime configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` (if present) and then calls [`AppConfig::from_env`].
//! Everything downstream receives the typed config through `AppState`.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_SLIDER_INTERVAL_MS: u64 = 4500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required env var {var}")]
    Missing { var: &'static str },

    /// An environment variable is set but cannot be parsed.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the REST backend, without trailing slash.
    pub api_url: String,
    pub port: u16,
    /// Whether cookies are marked `Secure`.
    pub cookie_secure: bool,
    pub static_dir: PathBuf,
    pub slider_interval_ms: u64,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `API_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `COOKIE_SECURE`: inferred from the `API_URL` scheme when absent
    /// - `STATIC_DIR`: default `public`
    /// - `SLIDER_INTERVAL_MS`: default 4500
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = std::env::var("API_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing { var: "API_URL" })?;

        let port = parse_var("PORT", DEFAULT_PORT)?;
        let cookie_secure = env_bool("COOKIE_SECURE").unwrap_or_else(|| api_url.starts_with("https://"));
        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR));
        let slider_interval_ms = parse_var("SLIDER_INTERVAL_MS", DEFAULT_SLIDER_INTERVAL_MS)?;

        Ok(Self { api_url, port, cookie_secure, static_dir, slider_interval_ms })
    }
}

/// Read a boolean env var. Accepts `1/true/yes/on` and `0/false/no/off`,
/// case-insensitive and trimmed. Anything else (or unset) is `None`.
pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn parse_var<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
