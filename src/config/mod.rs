//! Configuration management
//!
//! Settings come from a TOML file (by default `config.toml` in the platform
//! configuration directory) and are then overridden by `UNDERBAR_*` environment
//! variables.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Get the directory holding the user's underbar configuration
pub fn get_config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "underbar")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub memoize: MemoizeConfig,
    pub throttle: ThrottleConfig,
    pub shuffle: ShuffleConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoizeConfig {
    /// Maximum number of cached results; unbounded when absent or zero
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    pub wait_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShuffleConfig {
    /// Fixed seed for reproducible shuffles
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            memoize: MemoizeConfig::default(),
            throttle: ThrottleConfig::default(),
            shuffle: ShuffleConfig::default(),
        }
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { wait_ms: 100 }
    }
}

impl ThrottleConfig {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `config.toml` from the configuration directory when it exists, then
    /// apply environment overrides. Without a resolvable configuration directory
    /// the defaults are used.
    pub fn load_default() -> Result<Self> {
        let config_dir = match get_config_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                debug!("{}, using default configuration", e);
                None
            }
        };
        let mut config = Self::load_from_dir(config_dir.as_deref())?;
        config.merge_env_vars();
        Ok(config)
    }

    /// Load `config.toml` from `config_dir`, falling back to the defaults when
    /// there is no directory or no file in it.
    pub fn load_from_dir(config_dir: Option<&Path>) -> Result<Self> {
        let Some(config_dir) = config_dir else {
            return Ok(Self::default());
        };
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            debug!("No configuration at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_vars(|name| std::env::var(name).ok());
    }

    /// Apply `UNDERBAR_*` overrides from `lookup`. Values that fail to parse are
    /// ignored with a warning.
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(log_level) = lookup("UNDERBAR_LOG_LEVEL") {
            self.log_level = Some(log_level);
        }

        if let Some(capacity) = lookup("UNDERBAR_MEMOIZE_CAPACITY") {
            match capacity.parse::<usize>() {
                Ok(value) => self.memoize.capacity = Some(value),
                Err(e) => warn!("Ignoring UNDERBAR_MEMOIZE_CAPACITY={}: {}", capacity, e),
            }
        }

        if let Some(wait_ms) = lookup("UNDERBAR_THROTTLE_WAIT_MS") {
            match wait_ms.parse::<u64>() {
                Ok(value) => self.throttle.wait_ms = value,
                Err(e) => warn!("Ignoring UNDERBAR_THROTTLE_WAIT_MS={}: {}", wait_ms, e),
            }
        }

        if let Some(seed) = lookup("UNDERBAR_SHUFFLE_SEED") {
            match seed.parse::<u64>() {
                Ok(value) => self.shuffle.seed = Some(value),
                Err(e) => warn!("Ignoring UNDERBAR_SHUFFLE_SEED={}: {}", seed, e),
            }
        }
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}
