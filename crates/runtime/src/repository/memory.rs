//! In-memory [`SnapshotRepository`] for tests and throwaway sessions.

use std::sync::RwLock;

use game_core::{GameState, SnapshotLoad};

use super::{RepositoryError, Result, SnapshotRepository};

/// Keeps the saved game in memory; nothing survives the process.
#[derive(Default)]
pub struct InMemorySnapshotRepository {
    state: RwLock<Option<GameState>>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a saved game already present.
    pub fn with_state(state: GameState) -> Self {
        Self {
            state: RwLock::new(Some(state)),
        }
    }

    /// The last saved game, if any.
    pub fn saved(&self) -> Option<GameState> {
        self.state.read().ok().and_then(|state| state.clone())
    }
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn save(&self, state: &GameState) -> Result<()> {
        let mut slot = self
            .state
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(state.clone());
        Ok(())
    }

    fn load(&self, _fallback: GameState) -> Result<Option<SnapshotLoad>> {
        let slot = self
            .state
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone().map(|mut state| {
            state.normalize();
            SnapshotLoad {
                state,
                degraded: Vec::new(),
            }
        }))
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .state
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}
