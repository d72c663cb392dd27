//! Repository layer for the saved game.
//!
//! Exactly one snapshot is kept per save slot. It is rewritten after every
//! change and read back once at startup. Static content (prices, zones) is
//! not stored here; it comes from `game-content`.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSnapshotRepository;
pub use memory::InMemorySnapshotRepository;
pub use traits::SnapshotRepository;
