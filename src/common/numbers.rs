//! Human-readable quote-volume numbers (`5M`, `100K`).

use crate::error::ConfigError;

/// Parse a number with an optional `K` / `M` suffix (case-insensitive)
pub fn parse_human_number(text: &str) -> Result<f64, ConfigError> {
    let normalized = text.trim().to_lowercase();
    let (digits, multiplier) = if let Some(rest) = normalized.strip_suffix('m') {
        (rest, 1_000_000.0)
    } else if let Some(rest) = normalized.strip_suffix('k') {
        (rest, 1_000.0)
    } else {
        (normalized.as_str(), 1.0)
    };

    let value: f64 = digits
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber(text.to_string()))?;
    if !value.is_finite() {
        return Err(ConfigError::InvalidNumber(text.to_string()));
    }
    Ok(value * multiplier)
}

/// Format a number as `5.0M`, `100.0K` or the plain value below a thousand
pub fn human_readable_number(number: f64) -> String {
    if number >= 1_000_000.0 {
        format!("{:.1}M", number / 1_000_000.0)
    } else if number >= 1_000.0 {
        format!("{:.1}K", number / 1_000.0)
    } else {
        format!("{}", number)
    }
}
