//! Error types for the fallible stages of the scanner.
//!
//! Indicator math never fails: anything it cannot compute is reported as
//! `None`. Only I/O-facing stages (config, market data, notification) and the
//! cycle as a whole carry typed errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),

    #[error("invalid number '{0}': use a plain number or a suffix like 5M or 100K")]
    InvalidNumber(String),
}

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream rejected request (retCode {code}): {message}")]
    Upstream { code: i64, message: String },

    #[error("malformed payload: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notification credentials are not configured")]
    MissingCredentials,

    #[error("notification transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("notification rejected (HTTP {status}): {description}")]
    Rejected { status: u16, description: String },
}

#[derive(Error, Debug)]
pub enum CycleError {
    #[error("failed to load runtime config: {0}")]
    Config(#[from] ConfigError),
}
