use std::time::Duration;

use thiserror::Error;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/";
pub const DEFAULT_NEWS_TTL: Duration = Duration::from_secs(60 * 60);

const ENV_API_URL: &str = "TARIFFIQ_API_URL";
const ENV_TIMEOUT: &str = "TARIFFIQ_TIMEOUT_SECS";
const ENV_NEWS_TTL: &str = "TARIFFIQ_NEWS_TTL_MINS";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} is not a valid URL: {value}")]
    InvalidUrl { key: &'static str, value: String },
    #[error("{key} must be a positive whole number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Runtime settings, read once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Always ends in `/`; the API client parses it when it is built.
    pub api_base_url: String,
    /// Replaces every per-endpoint timeout when set.
    pub timeout_override: Option<Duration>,
    pub news_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_override: None,
            news_ttl: DEFAULT_NEWS_TTL,
        }
    }
}

impl AppConfig {
    /// Reads `.env` (if any) and the process environment. Bad values fall
    /// back to defaults with a warning.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_API_URL) {
            match parse_base_url(&raw) {
                Ok(url) => config.api_base_url = url.into(),
                Err(err) => warn!("{err}; using {DEFAULT_API_URL}"),
            }
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            match parse_positive(ENV_TIMEOUT, &raw) {
                Ok(secs) => config.timeout_override = Some(Duration::from_secs(secs)),
                Err(err) => warn!("{err}; keeping per-endpoint timeouts"),
            }
        }
        if let Some(raw) = lookup(ENV_NEWS_TTL) {
            match parse_positive(ENV_NEWS_TTL, &raw) {
                Ok(mins) => config.news_ttl = Duration::from_secs(mins * 60),
                Err(err) => warn!("{err}; keeping default news cache TTL"),
            }
        }

        config
    }
}

/// Parses a base URL, adding the trailing slash `Url::join` needs.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&normalized)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .ok_or_else(|| ConfigError::InvalidUrl {
            key: ENV_API_URL,
            value: raw.to_string(),
        })
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| ConfigError::InvalidNumber {
            key,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = AppConfig::from_lookup(lookup(&[(
            "TARIFFIQ_API_URL",
            "https://tariff.example.com/v1",
        )]));
        assert_eq!(config.api_base_url, "https://tariff.example.com/v1/");
    }

    #[test]
    fn default_url_is_a_valid_base() {
        let url = parse_base_url(DEFAULT_API_URL).unwrap();
        assert_eq!(url.as_str(), DEFAULT_API_URL);
        assert_eq!(
            url.join("api/news").unwrap().as_str(),
            "http://127.0.0.1:8000/api/news"
        );
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TARIFFIQ_API_URL", "not a url"),
            ("TARIFFIQ_TIMEOUT_SECS", "0"),
            ("TARIFFIQ_NEWS_TTL_MINS", "soon"),
        ]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn numeric_overrides_apply() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TARIFFIQ_TIMEOUT_SECS", "15"),
            ("TARIFFIQ_NEWS_TTL_MINS", "5"),
        ]));
        assert_eq!(config.timeout_override, Some(Duration::from_secs(15)));
        assert_eq!(config.news_ttl, Duration::from_secs(300));
    }

    #[test]
    fn non_http_schemes_are_rejected() {
        assert!(matches!(
            parse_base_url("ftp://example.com"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
