// config.rs
use crate::scraper::{ExtractionMode, FetchSettings};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub max_workers: usize,
    pub site: Url,
    pub extraction_mode: ExtractionMode,
    pub fetch: FetchSettings,
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port: u16 = parse_or(get("PORT"), "PORT", 3000)?;
        let addr = format!("{host}:{port}")
            .parse::<SocketAddr>()
            .map_err(|e| invalid("HOST", e))?;

        let max_workers: usize = parse_or(get("MAX_WORKERS"), "MAX_WORKERS", 8)?;
        if max_workers == 0 {
            return Err(invalid("MAX_WORKERS", "must be at least 1"));
        }

        let site = match get("SITE_BASE_URL") {
            Some(raw) => Url::parse(raw.trim()).map_err(|e| invalid("SITE_BASE_URL", e))?,
            None => Url::parse("https://www.realtor.com").map_err(|e| invalid("SITE_BASE_URL", e))?,
        };

        let extraction_mode = match get("EXTRACTION_MODE") {
            Some(raw) => raw
                .parse::<ExtractionMode>()
                .map_err(|e| invalid("EXTRACTION_MODE", e))?,
            None => ExtractionMode::default(),
        };

        let timeout_secs: u64 = parse_or(get("FETCH_TIMEOUT_SECS"), "FETCH_TIMEOUT_SECS", 60)?;
        let max_attempts: u64 = parse_or(get("FETCH_MAX_ATTEMPTS"), "FETCH_MAX_ATTEMPTS", 3)?;
        if max_attempts == 0 {
            return Err(invalid("FETCH_MAX_ATTEMPTS", "must be at least 1"));
        }

        Ok(Config {
            addr,
            max_workers,
            site,
            extraction_mode,
            fetch: FetchSettings {
                timeout: Duration::from_secs(timeout_secs),
                max_attempts,
                zenrows_api_key: get("ZENROWS_API_KEY"),
            },
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(v) => v.trim().parse().map_err(|e| invalid(key, e)),
        None => Ok(default),
    }
}

fn invalid(key: &'static str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.to_string(),
    }
}
