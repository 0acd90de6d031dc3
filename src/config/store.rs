//! Config persistence and the validated mutations applied through it

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{info, warn};

use crate::common::numbers::human_readable_number;
use crate::error::ConfigError;
use crate::indicators::IndicatorKind;

use super::settings::RuntimeConfig;

/// Storage for the runtime config. `load` is called once per cycle and per
/// mutation; callers never cache the result across cycles.
pub trait ConfigStore: Send + Sync {
    fn load(&self) -> Result<RuntimeConfig, ConfigError>;
    fn save(&self, config: &RuntimeConfig) -> Result<(), ConfigError>;
}

/// Pretty-printed JSON document on disk
pub struct JsonFileConfigStore {
    path: PathBuf,
}

impl JsonFileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl ConfigStore for JsonFileConfigStore {
    /// Creates the file with defaults when it does not exist yet
    fn load(&self) -> Result<RuntimeConfig, ConfigError> {
        if !self.path.exists() {
            warn!(
                path = %self.path.display(),
                "Config file {} not found, writing defaults",
                self.path.display()
            );
            let config = RuntimeConfig::default();
            self.save(&config)?;
            return Ok(config);
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, config: &RuntimeConfig) -> Result<(), ConfigError> {
        let body = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, body).map_err(|e| self.io_error(e))
    }
}

/// Process-local store for tests and embedding
#[derive(Default)]
pub struct InMemoryConfigStore {
    config: RwLock<RuntimeConfig>,
}

impl InMemoryConfigStore {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load(&self) -> Result<RuntimeConfig, ConfigError> {
        self.config
            .read()
            .map(|c| c.clone())
            .map_err(|_| ConfigError::Invalid("config lock poisoned".to_string()))
    }

    fn save(&self, config: &RuntimeConfig) -> Result<(), ConfigError> {
        let mut guard = self
            .config
            .write()
            .map_err(|_| ConfigError::Invalid("config lock poisoned".to_string()))?;
        *guard = config.clone();
        Ok(())
    }
}

/// A user-initiated config edit
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigChange {
    ToggleIndicator(IndicatorKind),
    ToggleRequired(IndicatorKind),
    SetMinIndicators(usize),
    SetTimeframe(String),
    SetVolumeFilter(String),
    SetPriceChangeThreshold(f64),
    SetBotStatus(bool),
    ResetDefaults,
}

/// Load, apply `change`, save. Nothing is saved when validation fails.
pub fn apply_change(
    store: &dyn ConfigStore,
    change: ConfigChange,
) -> Result<RuntimeConfig, ConfigError> {
    let mut config = store.load()?;

    match &change {
        ConfigChange::ToggleIndicator(kind) => {
            let enabled = config.toggle_indicator(*kind);
            info!(indicator = %kind, enabled, "Indicator {} enabled: {}", kind.label(), enabled);
        }
        ConfigChange::ToggleRequired(kind) => {
            let required = config.toggle_required(*kind)?;
            info!(indicator = %kind, required, "Indicator {} required: {}", kind.label(), required);
        }
        ConfigChange::SetMinIndicators(value) => {
            config.set_min_indicators(*value)?;
            info!(min_indicators = value, "Minimum indicators set to {}", value);
        }
        ConfigChange::SetTimeframe(label) => {
            config.set_timeframe(label)?;
            info!(timeframe = %config.timeframe, "Timeframe set to {}", config.timeframe);
        }
        ConfigChange::SetVolumeFilter(text) => {
            config.set_volume_filter(text)?;
            info!(
                volume_filter = config.volume_filter,
                "Volume filter set to {}",
                human_readable_number(config.volume_filter)
            );
        }
        ConfigChange::SetPriceChangeThreshold(value) => {
            config.set_price_change_threshold(*value)?;
            info!(threshold = value, "Price change threshold set to {}%", value);
        }
        ConfigChange::SetBotStatus(enabled) => {
            config.set_bot_status(*enabled);
            info!(bot_status = enabled, "Bot {}", if *enabled { "enabled" } else { "disabled" });
        }
        ConfigChange::ResetDefaults => {
            config.reset_to_defaults();
            info!("Config reset to defaults");
        }
    }

    store.save(&config)?;
    Ok(config)
}
