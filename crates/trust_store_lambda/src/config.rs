use std::time::Duration;

use trust_store_core::deadline::DEFAULT_SAFETY_MARGIN;

pub const SAFETY_MARGIN_ENV: &str = "SAFETY_MARGIN_MS";
pub const CALLBACK_TIMEOUT_ENV: &str = "CALLBACK_TIMEOUT_MS";
pub const AUTHORIZER_SECRET_ENV: &str = "AUTHORIZER_SECRET_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{name} must be a non-negative integer number of milliseconds, got '{value}'")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerConfig {
    pub safety_margin: Duration,
    pub callback_timeout: Duration,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            safety_margin: DEFAULT_SAFETY_MARGIN,
            callback_timeout: DEFAULT_SAFETY_MARGIN,
        }
    }
}

impl HandlerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let safety_margin = parse_millis(SAFETY_MARGIN_ENV, lookup(SAFETY_MARGIN_ENV))?
            .unwrap_or(DEFAULT_SAFETY_MARGIN);
        let callback_timeout = parse_millis(CALLBACK_TIMEOUT_ENV, lookup(CALLBACK_TIMEOUT_ENV))?
            .unwrap_or(safety_margin);

        Ok(Self {
            safety_margin,
            callback_timeout,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizerConfig {
    pub secret_token: String,
}

impl AuthorizerConfig {
    pub fn from_env() -> Self {
        Self {
            secret_token: std::env::var(AUTHORIZER_SECRET_ENV).unwrap_or_default(),
        }
    }
}

fn parse_millis(name: &'static str, raw: Option<String>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(|millis| Some(Duration::from_millis(millis)))
        .map_err(|_| ConfigError { name, value: raw })
}
