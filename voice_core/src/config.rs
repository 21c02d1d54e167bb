//! Configuration file support for vox.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/vox/config.toml`.

use crate::catalog::default_routine;
use crate::{Error, Result, Routine};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,

    #[serde(default)]
    pub cues: CueConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Countdown configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Wall-clock length of one tick. One second in normal use.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
        }
    }
}

impl TimerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

/// Audio cue configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CueConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Ring the terminal bell; otherwise cues are only logged
    #[serde(default = "default_true")]
    pub bell: bool,
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bell: true,
        }
    }
}

/// Exercise catalog configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// Custom routine file; the built-in routine is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_tick_millis() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from `path`, falling back to defaults if it
    /// doesn't exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timer.tick_millis == 0 {
            return Err(Error::Config("timer.tick_millis must be positive".into()));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("vox").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// The routine to run: the configured catalog file, or the built-in one
    pub fn load_routine(&self) -> Result<Routine> {
        match &self.catalog.path {
            Some(path) => Routine::load_from(path),
            None => Ok(default_routine().clone()),
        }
    }
}
