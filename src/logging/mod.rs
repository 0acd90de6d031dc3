//! Logging initialization.
//!
//! Production deployments emit one JSON object per event for log shipping;
//! everywhere else the output is coloured, human-readable lines. `LOG_FORMAT`
//! (`json` or `pretty`) overrides the environment-based choice.

use std::env;

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

use crate::config::is_production;

/// Filter used when `RUST_LOG` is unset: scanner events at info, HTTP plumbing at warn
pub const DEFAULT_FILTER: &str = "info,tower_http=warn,hyper=warn,reqwest=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Explicit `LOG_FORMAT` value, else JSON in production and pretty elsewhere
    pub fn resolve(explicit: Option<&str>, production: bool) -> Self {
        match explicit.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") | Some("text") => LogFormat::Pretty,
            _ if production => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(env::var("LOG_FORMAT").ok().as_deref(), is_production())
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging() -> Result<LogFormat, TryInitError> {
    let format = LogFormat::from_env();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_target(true)
                    .with_writer(std::io::stdout),
            )
            .try_init()?,
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .try_init()?,
    }
    Ok(format)
}
