//! Persisted player settings.
//!
//! The client stores a small amount of player preference data in a TOML
//! file. Missing files and missing keys fall back to defaults so a fresh
//! install works without any configuration step.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or saving the player config.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read or write the configuration file.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize the configuration to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Player settings for offline games.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Display name used for the human player in offline games.
    /// Defaults to "Player" if not specified.
    #[serde(default = "default_player_name")]
    pub player_name: String,
    /// Whether the board is drawn from the player's perspective by
    /// default. Defaults to true.
    #[serde(default = "default_orient_to_player")]
    pub orient_board_to_player: bool,
}

fn default_player_name() -> String {
    "Player".to_string()
}

fn default_orient_to_player() -> bool {
    true
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            player_name: default_player_name(),
            orient_board_to_player: default_orient_to_player(),
        }
    }
}

impl PlayerConfig {
    /// Loads the config from a TOML file, or returns defaults if the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Writes the config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
