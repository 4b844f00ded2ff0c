//! Environment-driven configuration for Parley.
//!
//! Everything is read from environment variables with warn-and-default
//! behavior: a missing or malformed value logs a warning and falls back
//! to the documented default rather than aborting startup. The one
//! exception is `OPENAI_API_KEY`, which has no sensible default; a
//! missing key is reported but the server still starts, since the
//! storage endpoints work without a provider.

use std::path::PathBuf;

/// Model requested from the completion provider when `PARLEY_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature used when `PARLEY_TEMPERATURE` is unset or invalid.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Completion API base URL used when `OPENAI_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Browser origin allowed by CORS when `PARLEY_ALLOWED_ORIGIN` is unset.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Configuration for the completion provider.
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// in logs or error messages.
#[derive(Clone)]
pub struct CompletionConfig {
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Sampling temperature sent with every completion request.
    pub temperature: f32,
    /// API key for the provider. Empty when `OPENAI_API_KEY` is unset.
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
}

impl CompletionConfig {
    /// Build the completion configuration from environment variables.
    ///
    /// Reads `PARLEY_MODEL`, `PARLEY_TEMPERATURE`, `OPENAI_API_KEY` and
    /// `OPENAI_BASE_URL`.
    pub fn from_env() -> Self {
        let api_key = match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => {
                tracing::warn!("OPENAI_API_KEY is not set; completion requests will fail");
                String::new()
            }
        };

        Self {
            model: env_or("PARLEY_MODEL", DEFAULT_MODEL),
            temperature: parse_temperature(std::env::var("PARLEY_TEMPERATURE").ok()),
            api_key,
            base_url: env_or("OPENAI_BASE_URL", DEFAULT_BASE_URL),
        }
    }
}

/// CORS configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// The single browser origin allowed to call the API.
    pub allowed_origin: String,
}

impl CorsConfig {
    /// Build the CORS configuration from `PARLEY_ALLOWED_ORIGIN`.
    pub fn from_env() -> Self {
        Self {
            allowed_origin: env_or("PARLEY_ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN),
        }
    }
}

/// Resolve the data directory from `PARLEY_DATA_DIR`, falling back to
/// `~/.parley`.
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var("PARLEY_DATA_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".parley")
        }
    }
}

/// Read an environment variable, falling back to `default` when it is
/// unset or empty.
fn env_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Parse a temperature value, warning and falling back to the default
/// when it is missing, unparseable, or outside the 0.0..=2.0 range the
/// API accepts.
fn parse_temperature(raw: Option<String>) -> f32 {
    let Some(raw) = raw else {
        return DEFAULT_TEMPERATURE;
    };
    match raw.parse::<f32>() {
        Ok(value) if (0.0..=2.0).contains(&value) => value,
        Ok(value) => {
            tracing::warn!("PARLEY_TEMPERATURE {value} is out of range, using default");
            DEFAULT_TEMPERATURE
        }
        Err(_) => {
            tracing::warn!("PARLEY_TEMPERATURE '{raw}' is not a number, using default");
            DEFAULT_TEMPERATURE
        }
    }
}
