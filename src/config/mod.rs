/// Application configuration module
use crate::errors::{ApiError, ApiResult};
use anyhow::Context;
use std::env;

/// Public key NASA hands out for low-volume experimentation
pub const DEMO_API_KEY: &str = "DEMO_KEY";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub nasa_api_url: String,
    pub credential: Credential,
    pub upstream_timeout_seconds: u64,
    pub bind_addr: String,
}

/// Upstream access key, resolved once at startup.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Configured(String),
    /// Explicit opt-in via `NASA_ALLOW_DEMO_KEY`; subject to much lower rate limits.
    Demo,
    Missing,
}

impl Credential {
    pub fn resolve(api_key: Option<String>, allow_demo_fallback: bool) -> Self {
        match api_key.map(|k| k.trim().to_string()) {
            Some(key) if !key.is_empty() => Credential::Configured(key),
            _ if allow_demo_fallback => Credential::Demo,
            _ => Credential::Missing,
        }
    }

    pub fn api_key(&self) -> ApiResult<&str> {
        match self {
            Credential::Configured(key) => Ok(key),
            Credential::Demo => Ok(DEMO_API_KEY),
            Credential::Missing => Err(ApiError::Configuration(
                "NASA_API_KEY is not set".to_string(),
            )),
        }
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Configured(_) => f.write_str("Configured(***)"),
            Credential::Demo => f.write_str("Demo"),
            Credential::Missing => f.write_str("Missing"),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let allow_demo_fallback = env_bool("NASA_ALLOW_DEMO_KEY", false)?;
        let credential = Credential::resolve(env::var("NASA_API_KEY").ok(), allow_demo_fallback);

        let nasa_api_url = env::var("NASA_API_URL")
            .unwrap_or_else(|_| "https://api.nasa.gov".to_string())
            .trim_end_matches('/')
            .to_string();

        let upstream_timeout_seconds = env_u64("UPSTREAM_TIMEOUT_SECONDS", 30)?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Ok(Self {
            nasa_api_url,
            credential,
            upstream_timeout_seconds,
            bind_addr,
        })
    }
}

fn env_u64(key: &str, default: u64) -> anyhow::Result<u64> {
    match env::var(key) {
        Ok(s) => s
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a non-negative integer, got {s:?}")),
        Err(_) => Ok(default),
    }
}

fn env_bool(key: &str, default: bool) -> anyhow::Result<bool> {
    match env::var(key) {
        Ok(s) => parse_bool(&s).with_context(|| format!("{key} must be true or false, got {s:?}")),
        Err(_) => Ok(default),
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => anyhow::bail!("not a boolean"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_key_wins_over_demo() {
        let cred = Credential::resolve(Some("abc123".into()), true);
        assert_eq!(cred.api_key().unwrap(), "abc123");
    }

    #[test]
    fn test_blank_key_falls_back_only_when_allowed() {
        let demo = Credential::resolve(Some("   ".into()), true);
        assert_eq!(demo.api_key().unwrap(), DEMO_API_KEY);

        let missing = Credential::resolve(Some("".into()), false);
        assert_eq!(missing, Credential::Missing);
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let cred = Credential::resolve(None, false);
        assert!(matches!(cred.api_key(), Err(ApiError::Configuration(_))));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let cred = Credential::Configured("super-secret".into());
        assert!(!format!("{:?}", cred).contains("super-secret"));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool(" yes ").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
