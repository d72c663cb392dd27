//! Content factory for building the game configuration from data files.

use std::path::{Path, PathBuf};

use game_core::GameConfig;
use game_core::config::ZoneTable;
use tracing::{debug, info};

use crate::loaders::{ConfigLoader, LoadResult, ZoneLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── zones.ron
/// ```
///
/// Both files are optional; a missing file falls back to the built-in
/// defaults. A file that exists but does not parse is an error.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load tunables from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the zone graph from `zones.ron`.
    pub fn load_zones(&self) -> LoadResult<Option<ZoneTable>> {
        let path = self.data_dir.join("zones.ron");
        if !path.exists() {
            debug!(path = %path.display(), "no zone file, using defaults");
            return Ok(None);
        }
        ZoneLoader::load(&path).map(Some)
    }

    /// Load and validate the complete game configuration.
    pub fn load_game_config(&self) -> LoadResult<GameConfig> {
        let mut config = self.load_config()?;
        if let Some(zones) = self.load_zones()? {
            config.zones = zones;
        }
        config.validate().map_err(|e| {
            anyhow::anyhow!("Invalid game config in {}: {}", self.data_dir.display(), e)
        })?;
        info!(data_dir = %self.data_dir.display(), "game content loaded");
        Ok(config)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
