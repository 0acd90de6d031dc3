//! Process-level settings read from environment variables

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_BYBIT_API_URL: &str = "https://api.bybit.com";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Deployment environment name (`ENVIRONMENT`, default `sandbox`)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn is_production() -> bool {
    matches!(get_environment().as_str(), "production" | "prod")
}

/// Settings for one scanner process
#[derive(Debug, Clone, PartialEq)]
pub struct ScannerSettings {
    pub config_path: String,
    pub interval_seconds: u64,
    pub concurrency: usize,
    pub request_delay_ms: u64,
    pub history_limit: usize,
    pub bybit_api_url: String,
    pub telegram_api_url: String,
    /// Status server port; no server when unset
    pub port: Option<u16>,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            interval_seconds: 60,
            concurrency: 10,
            request_delay_ms: 100,
            history_limit: 200,
            bybit_api_url: DEFAULT_BYBIT_API_URL.to_string(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            port: None,
        }
    }
}

impl ScannerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup, falling back to defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let settings = Self {
            config_path: lookup("CONFIG_PATH").unwrap_or(defaults.config_path),
            interval_seconds: parse_var(&lookup, "SCAN_INTERVAL_SECONDS")?
                .unwrap_or(defaults.interval_seconds),
            concurrency: parse_var(&lookup, "SCAN_CONCURRENCY")?.unwrap_or(defaults.concurrency),
            request_delay_ms: parse_var(&lookup, "REQUEST_DELAY_MS")?
                .unwrap_or(defaults.request_delay_ms),
            history_limit: parse_var(&lookup, "HISTORY_LIMIT")?.unwrap_or(defaults.history_limit),
            bybit_api_url: lookup("BYBIT_API_URL").unwrap_or(defaults.bybit_api_url),
            telegram_api_url: lookup("TELEGRAM_API_URL").unwrap_or(defaults.telegram_api_url),
            port: parse_var(&lookup, "PORT")?,
        };

        if settings.interval_seconds == 0 {
            return Err(ConfigError::Invalid(
                "SCAN_INTERVAL_SECONDS must be > 0".to_string(),
            ));
        }
        if settings.concurrency == 0 {
            return Err(ConfigError::Invalid("SCAN_CONCURRENCY must be > 0".to_string()));
        }
        Ok(settings)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{} has an invalid value '{}'", key, raw))),
        _ => Ok(None),
    }
}
