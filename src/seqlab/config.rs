//! Process-wide configuration.
//!
//! [`SeqlabConfig`] is loaded once at startup and handed to [`crate::api::SeqlabApi`]
//! by reference. Nothing in the crate reads configuration from global state.

use crate::error::{Result, SeqlabError};
use crate::seq::growth::{AppendMode, GrowthPolicy, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const KEYS: &[&str] = &["growth-threshold", "append-mode", "color"];

/// Configuration for seqlab, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeqlabConfig {
    /// Required length above which capacity grows by a quarter instead of doubling
    #[serde(default = "default_threshold")]
    pub growth_threshold: usize,

    /// How a multi-element append is fed to the growth rule
    #[serde(default)]
    pub append_mode: AppendMode,

    /// Colored terminal output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_threshold() -> usize {
    DEFAULT_THRESHOLD
}

fn default_color() -> bool {
    true
}

impl Default for SeqlabConfig {
    fn default() -> Self {
        Self {
            growth_threshold: DEFAULT_THRESHOLD,
            append_mode: AppendMode::default(),
            color: true,
        }
    }
}

impl SeqlabConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: SeqlabConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %config_path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn policy(&self) -> GrowthPolicy {
        GrowthPolicy::new(self.growth_threshold, self.append_mode)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "growth-threshold" => Some(self.growth_threshold.to_string()),
            "append-mode" => Some(self.append_mode.to_string()),
            "color" => Some(self.color.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "growth-threshold" => {
                self.growth_threshold = value.parse().map_err(|_| {
                    SeqlabError::Config(format!("growth-threshold must be a number: {}", value))
                })?;
            }
            "append-mode" => {
                self.append_mode = value.parse().map_err(SeqlabError::Config)?;
            }
            "color" => {
                self.color = value.parse().map_err(|_| {
                    SeqlabError::Config(format!("color must be true or false: {}", value))
                })?;
            }
            other => return Err(SeqlabError::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }
}
