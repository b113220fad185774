//! Configuration for the relay service, read from the environment (and `.env`).

use std::env;
use std::time::Duration;

use crate::error::RelayError;
use crate::gemini::{DEFAULT_MODEL, GEMINI_BASE_URL};
use crate::keys::ApiKeyPool;
use crate::retry::{RetryPolicy, DEFAULT_COOLDOWN, DEFAULT_MAX_ATTEMPTS};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// One key, or several for round-robin rotation
    pub api_keys: Vec<String>,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn key_pool(&self) -> Result<ApiKeyPool, RelayError> {
        ApiKeyPool::new(self.api_keys.clone())
    }
}

impl RelayConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// `GEMINI_API_KEYS` (comma-separated) wins over `GEMINI_API_KEY`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RelayError> {
        let api_keys: Vec<String> = lookup("GEMINI_API_KEYS")
            .or_else(|| lookup("GEMINI_API_KEY"))
            .map(|v| {
                v.split(',')
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        if api_keys.is_empty() {
            return Err(RelayError::Config(
                "GEMINI_API_KEY not found. Set GEMINI_API_KEY or GEMINI_API_KEYS in the environment or .env"
                    .to_string(),
            ));
        }

        Ok(RelayConfig {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: parse_or(&lookup, "SERVER_PORT", DEFAULT_PORT)?,
            },
            gemini: GeminiConfig {
                api_keys,
                model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: lookup("GEMINI_BASE_URL").unwrap_or_else(|| GEMINI_BASE_URL.to_string()),
            },
            retry: RetryPolicy {
                max_attempts: parse_or(&lookup, "RETRY_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
                cooldown: parse_or(&lookup, "RETRY_COOLDOWN_MS", DEFAULT_COOLDOWN.as_millis() as u64)
                    .map(Duration::from_millis)?,
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, RelayError> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| RelayError::Config(format!("{name} is not valid: {raw:?}"))),
        None => Ok(default),
    }
}
