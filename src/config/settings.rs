//! Application settings and configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::player::PlayerOptions;

/// Application settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// API base URL (http/https) or path to a json-server database file
    #[serde(default = "default_episode_source")]
    pub episode_source: String,
    /// Maximum number of episodes to load
    #[serde(default = "default_episode_limit")]
    pub episode_limit: usize,
    /// Start playing as soon as a new episode is loaded
    #[serde(default = "default_true")]
    pub autoplay: bool,
    /// Step used by the seek back/forward keys
    #[serde(default = "default_seek_step")]
    pub seek_step_seconds: u64,
    /// Clock resolution of the simulated media handle
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_state_update_capacity")]
    pub state_update_capacity: usize,
    #[serde(default = "default_command_buffer_size")]
    pub command_buffer_size: usize,
    /// Where logs go; stderr when unset
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_episode_source() -> String {
    "server.json".to_string()
}

fn default_episode_limit() -> usize {
    12
}

fn default_true() -> bool {
    true
}

fn default_seek_step() -> u64 {
    15
}

fn default_tick_interval() -> u64 {
    250
}

fn default_state_update_capacity() -> usize {
    64
}

fn default_command_buffer_size() -> usize {
    32
}

/// Error types for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            episode_source: default_episode_source(),
            episode_limit: default_episode_limit(),
            autoplay: default_true(),
            seek_step_seconds: default_seek_step(),
            tick_interval_ms: default_tick_interval(),
            state_update_capacity: default_state_update_capacity(),
            command_buffer_size: default_command_buffer_size(),
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from a file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("podcastr").join("config.json")
    }

    /// Log file used when none is configured
    pub fn default_log_path() -> PathBuf {
        Self::default_path().with_file_name("podcastr.log")
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.episode_source.trim().is_empty() {
            return Err(ConfigError::ValidationError("Episode source cannot be empty".to_string()));
        }
        if self.episode_limit == 0 {
            return Err(ConfigError::ValidationError("Episode limit must be at least 1".to_string()));
        }
        if self.seek_step_seconds == 0 {
            return Err(ConfigError::ValidationError("Seek step must be at least 1 second".to_string()));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationError("Tick interval must be at least 1 ms".to_string()));
        }
        Ok(())
    }

    /// Player tunables derived from these settings
    pub fn player_options(&self) -> PlayerOptions {
        PlayerOptions {
            autoplay: self.autoplay,
            state_update_capacity: self.state_update_capacity,
            command_buffer_size: self.command_buffer_size,
        }
    }
}
