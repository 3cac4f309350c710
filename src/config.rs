//! Runtime configuration.
//!
//! Every field defaults to the built-in game constants, so an absent file or
//! a partial one both produce a playable setup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::compute::PLAYER_MUZZLE_OFFSET;
use crate::entities::{Size, PLAYER_BOTTOM_MARGIN, PLAYER_SIZE, WORLD_HEIGHT, WORLD_WIDTH};

/// Environment variable naming an optional TOML configuration file.
pub const CONFIG_ENV: &str = "SPACE_INVADERS_CONFIG";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// World width in pixels.
    pub width: f64,
    /// World height in pixels.
    pub height: f64,
    pub ticks_per_second: u32,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Write log records here instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            ticks_per_second: 60,
            seed: None,
            log_file: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl GameConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from `$SPACE_INVADERS_CONFIG` when set, otherwise the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn world_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The world must fit the player and leave room above it to fire.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(ConfigError::Invalid("world size must be finite".into()));
        }
        if self.width < PLAYER_SIZE.width {
            return Err(ConfigError::Invalid(format!(
                "width {} is narrower than the player ({})",
                self.width, PLAYER_SIZE.width
            )));
        }
        let min_height = PLAYER_SIZE.height + PLAYER_BOTTOM_MARGIN + PLAYER_MUZZLE_OFFSET;
        if self.height < min_height {
            return Err(ConfigError::Invalid(format!(
                "height {} leaves no room for the player (needs {})",
                self.height, min_height
            )));
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::Invalid("ticks_per_second must be positive".into()));
        }
        Ok(())
    }
}
