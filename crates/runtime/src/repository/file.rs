//! File-based [`SnapshotRepository`] implementation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use game_core::{GameState, SnapshotLoad, load_lenient};
use tracing::{debug, warn};

use super::{RepositoryError, Result, SnapshotRepository};

/// Stores the game as pretty-printed JSON at `{base_dir}/{slot}.json`.
///
/// Writes go to a sibling temp file that is then renamed over the save, so
/// a crash mid-write leaves the previous save intact.
pub struct FileSnapshotRepository {
    path: PathBuf,
}

impl FileSnapshotRepository {
    /// Create a repository for `slot`, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>, slot: &str) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;
        Ok(Self {
            path: base_dir.join(format!("{slot}.json")),
        })
    }

    /// Location of the save file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, state: &GameState) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let document = serde_json::to_string_pretty(state)?;
        fs::write(&temp_path, document)?;
        fs::rename(&temp_path, &self.path)?;

        debug!(nonce = state.nonce, path = %self.path.display(), "saved snapshot");
        Ok(())
    }

    fn load(&self, fallback: GameState) -> Result<Option<SnapshotLoad>> {
        let document = match fs::read_to_string(&self.path) {
            Ok(document) => document,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(RepositoryError::Io(error)),
        };

        let loaded = load_lenient(&document, fallback);
        if let Some(loaded) = &loaded {
            if !loaded.is_clean() {
                warn!(
                    path = %self.path.display(),
                    fields = ?loaded.degraded,
                    "snapshot fields reset to defaults"
                );
            }
            debug!(nonce = loaded.state.nonce, path = %self.path.display(), "loaded snapshot");
        }
        Ok(loaded)
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "deleted snapshot");
                Ok(())
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(RepositoryError::Io(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{ItemKind, ZoneId};

    #[test]
    fn save_then_load_restores_the_game() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path(), "slot").unwrap();
        assert!(repo.load(GameState::default()).unwrap().is_none());

        let mut state = GameState::default();
        state.player.credits = 42;
        state.player_inventory.add(ItemKind::Sword, 1);
        state.zone.current = ZoneId::MainStreet;
        repo.save(&state).unwrap();

        assert!(repo.path().exists());
        assert!(!repo.path().with_extension("json.tmp").exists());
        let loaded = repo.load(GameState::default()).unwrap().unwrap();
        assert!(loaded.is_clean());
        assert_eq!(loaded.state, state);
    }

    #[test]
    fn garbage_file_counts_as_no_save() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path(), "slot").unwrap();
        fs::write(repo.path(), "[1, 2, 3]").unwrap();
        assert!(repo.load(GameState::default()).unwrap().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path().join("nested"), "slot").unwrap();
        repo.save(&GameState::default()).unwrap();
        repo.clear().unwrap();
        repo.clear().unwrap();
        assert!(!repo.path().exists());
    }
}
