//! Content loaders for reading game data from files.
//!
//! Tunables are TOML, the zone graph is RON. Both end up in
//! [`game_core::GameConfig`].

pub mod config;
pub mod factory;
pub mod zones;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use zones::ZoneLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path.display(), e))
}
