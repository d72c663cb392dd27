//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

const APP_NAME: &str = "streets";

/// Where the client reads content from and writes saves and logs to.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `config.toml` and `zones.ron`.
    pub data_dir: PathBuf,
    pub save_dir: PathBuf,
    /// Save slot and log subdirectory name.
    pub session: String,
    pub log_dir: PathBuf,
    /// Seed for a new game; random when unset.
    pub seed: Option<u64>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `STREETS_DATA_DIR` - Content directory (default: `./crates/game/content/data`)
    /// - `STREETS_SAVE_DIR` - Save directory (default: platform data dir)
    /// - `STREETS_SESSION` - Save slot name (default: `default`)
    /// - `STREETS_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `STREETS_SEED` - Seed for a new game (default: random)
    pub fn from_env() -> Self {
        let dirs = directories::ProjectDirs::from("", "", APP_NAME);

        let data_dir = env::var_os("STREETS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("crates/game/content/data"));

        let save_dir = env::var_os("STREETS_SAVE_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs.as_ref().map(|dirs| dirs.data_dir().join("saves")))
            .unwrap_or_else(|| PathBuf::from("./save_data"));

        let log_dir = env::var_os("STREETS_LOG_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs.as_ref().map(|dirs| dirs.cache_dir().join("logs")))
            .unwrap_or_else(|| env::temp_dir().join(APP_NAME).join("logs"));

        let session = env::var("STREETS_SESSION")
            .ok()
            .filter(|session| is_valid_session(session))
            .unwrap_or_else(|| "default".to_owned());

        Self {
            data_dir,
            save_dir,
            session,
            log_dir,
            seed: read_env("STREETS_SEED"),
        }
    }
}

/// Session names end up in file names.
fn is_valid_session(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
