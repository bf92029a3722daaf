//! Environment-driven configuration.
//!
//! Read once at startup; unset or unparsable variables fall back to the
//! defaults below rather than aborting.

use std::time::Duration;

/// Default OpenRouter-compatible API base.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default free-tier model identifier.
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct:free";

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port (`PORT`).
    pub port: u16,
    /// API key for the generative-text service (`OPENROUTER_API_KEY`).
    /// An empty key is allowed: remote calls will fail auth and every reply
    /// degrades to the fallback composer.
    pub openrouter_api_key: String,
    /// Base URL of the generative-text service (`OPENROUTER_BASE_URL`).
    pub openrouter_base_url: String,
    /// Model identifier (`PITCHBOT_MODEL`).
    pub model: String,
    /// Page fetch timeout in milliseconds (`PITCHBOT_FETCH_TIMEOUT_MS`).
    pub fetch_timeout_ms: u64,
    /// Generative call timeout in milliseconds (`PITCHBOT_RESPONDER_TIMEOUT_MS`).
    pub responder_timeout_ms: u64,
    /// Product cache TTL (`PITCHBOT_CACHE_TTL_SECS`).
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            openrouter_api_key: String::new(),
            openrouter_base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            fetch_timeout_ms: 10_000,
            responder_timeout_ms: 15_000,
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

impl Config {
    /// Load configuration from the environment, defaulting anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env_parsed("PORT").unwrap_or(defaults.port),
            openrouter_api_key: std::env::var("OPENROUTER_API_KEY")
                .unwrap_or(defaults.openrouter_api_key),
            openrouter_base_url: std::env::var("OPENROUTER_BASE_URL")
                .unwrap_or(defaults.openrouter_base_url),
            model: std::env::var("PITCHBOT_MODEL").unwrap_or(defaults.model),
            fetch_timeout_ms: env_parsed("PITCHBOT_FETCH_TIMEOUT_MS")
                .unwrap_or(defaults.fetch_timeout_ms),
            responder_timeout_ms: env_parsed("PITCHBOT_RESPONDER_TIMEOUT_MS")
                .unwrap_or(defaults.responder_timeout_ms),
            cache_ttl: env_parsed("PITCHBOT_CACHE_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
        }
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
