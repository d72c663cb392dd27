//! Repository contract for saving and loading the game.

use game_core::{GameState, SnapshotLoad};

use super::Result;

/// Storage for the single saved game of a slot.
pub trait SnapshotRepository: Send + Sync {
    /// Overwrite the saved game.
    fn save(&self, state: &GameState) -> Result<()>;

    /// Read the saved game back.
    ///
    /// Fields that cannot be decoded take their value from `fallback`.
    /// Returns `None` when there is no save, or when it is unreadable as a
    /// whole, in which case the caller starts a new game.
    fn load(&self, fallback: GameState) -> Result<Option<SnapshotLoad>>;

    /// Delete the saved game. Deleting a missing save is not an error.
    fn clear(&self) -> Result<()>;
}
