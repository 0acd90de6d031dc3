//! Runtime config document and the indicator view the engine consumes

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::numbers::parse_human_number;
use crate::error::ConfigError;
use crate::indicators::IndicatorKind;

pub const DEFAULT_VOLUME_FILTER: f64 = 5_000_000.0;
pub const DEFAULT_PRICE_CHANGE_THRESHOLD: f64 = 0.5;
pub const DEFAULT_EXCLUDED_KEYWORDS: [&str; 4] = ["ALPHA", "WEB3", "AI", "BOT"];

/// Candle interval the scanner evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "1h")]
    H1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [Timeframe::M1, Timeframe::M5, Timeframe::M15, Timeframe::H1];

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::H1 => "1h",
        }
    }

    /// Kline interval parameter for Bybit v5
    pub fn bybit_interval(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1",
            Timeframe::M5 => "5",
            Timeframe::M15 => "15",
            Timeframe::H1 => "60",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Self::ALL
            .into_iter()
            .find(|tf| tf.label() == label)
            .ok_or_else(|| {
                ConfigError::Invalid(format!("unsupported timeframe '{}', use 1m, 5m, 15m or 1h", s))
            })
    }
}

/// The persisted runtime config, read fresh at the start of every cycle.
///
/// Missing keys take their defaults; indicators missing from
/// `indicators_enabled` count as enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub telegram_token: String,
    pub chat_id: String,
    pub timeframe: Timeframe,
    pub volume_filter: f64,
    pub price_change_threshold: f64,
    pub bot_status: bool,
    pub indicators_enabled: BTreeMap<IndicatorKind, bool>,
    pub min_indicators: usize,
    pub required_indicators: Vec<IndicatorKind>,
    pub excluded_keywords: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            telegram_token: String::new(),
            chat_id: String::new(),
            timeframe: Timeframe::default(),
            volume_filter: DEFAULT_VOLUME_FILTER,
            price_change_threshold: DEFAULT_PRICE_CHANGE_THRESHOLD,
            bot_status: true,
            indicators_enabled: IndicatorKind::ALL.iter().map(|k| (*k, true)).collect(),
            min_indicators: 1,
            required_indicators: Vec::new(),
            excluded_keywords: DEFAULT_EXCLUDED_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl RuntimeConfig {
    pub fn is_enabled(&self, kind: IndicatorKind) -> bool {
        self.indicators_enabled.get(&kind).copied().unwrap_or(true)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            token: self.telegram_token.clone(),
            chat_id: self.chat_id.clone(),
        }
    }

    /// True when `symbol` contains any excluded keyword (case-insensitive)
    pub fn is_excluded(&self, symbol: &str) -> bool {
        let symbol = symbol.to_uppercase();
        self.excluded_keywords
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| symbol.contains(&k.to_uppercase()))
    }

    /// Indicator view consumed by the evaluator and decider
    pub fn indicator_config(&self) -> IndicatorConfig {
        IndicatorConfig {
            enabled: IndicatorKind::ALL
                .iter()
                .map(|k| (*k, self.is_enabled(*k)))
                .collect(),
            required: self.required_indicators.clone(),
            min_indicators: self.min_indicators,
            price_change_threshold: self.price_change_threshold,
            timeframe: self.timeframe,
        }
    }

    /// Flip an indicator; disabling it also drops it from the required set.
    /// Returns the new enabled state.
    pub fn toggle_indicator(&mut self, kind: IndicatorKind) -> bool {
        let enabled = !self.is_enabled(kind);
        self.indicators_enabled.insert(kind, enabled);
        if !enabled {
            self.required_indicators.retain(|k| *k != kind);
        }
        enabled
    }

    /// Add or remove a required indicator. Only enabled indicators can become required.
    /// Returns whether the indicator is required afterwards.
    pub fn toggle_required(&mut self, kind: IndicatorKind) -> Result<bool, ConfigError> {
        if let Some(pos) = self.required_indicators.iter().position(|k| *k == kind) {
            self.required_indicators.remove(pos);
            return Ok(false);
        }
        if !self.is_enabled(kind) {
            return Err(ConfigError::Invalid(format!(
                "{} must be enabled before it can be required",
                kind.label()
            )));
        }
        self.required_indicators.push(kind);
        Ok(true)
    }

    pub fn set_min_indicators(&mut self, value: usize) -> Result<(), ConfigError> {
        if !(1..=IndicatorKind::COUNT).contains(&value) {
            return Err(ConfigError::Invalid(format!(
                "min_indicators must be between 1 and {}",
                IndicatorKind::COUNT
            )));
        }
        self.min_indicators = value;
        Ok(())
    }

    pub fn set_timeframe(&mut self, label: &str) -> Result<(), ConfigError> {
        self.timeframe = label.parse()?;
        Ok(())
    }

    /// Accepts plain numbers and `K`/`M` suffixes
    pub fn set_volume_filter(&mut self, text: &str) -> Result<(), ConfigError> {
        let value = parse_human_number(text)?;
        if value < 0.0 {
            return Err(ConfigError::InvalidNumber(text.to_string()));
        }
        self.volume_filter = value;
        Ok(())
    }

    pub fn set_price_change_threshold(&mut self, value: f64) -> Result<(), ConfigError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "price_change_threshold must be a non-negative number, got {}",
                value
            )));
        }
        self.price_change_threshold = value;
        Ok(())
    }

    pub fn set_bot_status(&mut self, enabled: bool) {
        self.bot_status = enabled;
    }

    /// Restore defaults but keep the bot credentials
    pub fn reset_to_defaults(&mut self) {
        *self = Self {
            telegram_token: std::mem::take(&mut self.telegram_token),
            chat_id: std::mem::take(&mut self.chat_id),
            ..Self::default()
        };
    }
}

/// Bot credentials taken from one config snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub chat_id: String,
}

impl Credentials {
    pub fn is_complete(&self) -> bool {
        !self.token.trim().is_empty() && !self.chat_id.trim().is_empty()
    }
}

/// Indicator selection and quorum rules for one evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    pub enabled: BTreeMap<IndicatorKind, bool>,
    /// May name disabled indicators; those never count as triggered
    pub required: Vec<IndicatorKind>,
    pub min_indicators: usize,
    pub price_change_threshold: f64,
    pub timeframe: Timeframe,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        RuntimeConfig::default().indicator_config()
    }
}

impl IndicatorConfig {
    /// Config with exactly `kinds` enabled
    pub fn only(kinds: &[IndicatorKind]) -> Self {
        Self {
            enabled: IndicatorKind::ALL
                .iter()
                .map(|k| (*k, kinds.contains(k)))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_min_indicators(mut self, min_indicators: usize) -> Self {
        self.min_indicators = min_indicators;
        self
    }

    pub fn with_required(mut self, required: &[IndicatorKind]) -> Self {
        self.required = required.to_vec();
        self
    }

    pub fn with_price_change_threshold(mut self, threshold: f64) -> Self {
        self.price_change_threshold = threshold;
        self
    }

    pub fn is_enabled(&self, kind: IndicatorKind) -> bool {
        self.enabled.get(&kind).copied().unwrap_or(true)
    }

    /// Enabled indicators in table order
    pub fn enabled_kinds(&self) -> impl Iterator<Item = IndicatorKind> + '_ {
        IndicatorKind::ALL
            .into_iter()
            .filter(move |k| self.is_enabled(*k))
    }

    pub fn total_enabled(&self) -> usize {
        self.enabled_kinds().count()
    }
}
