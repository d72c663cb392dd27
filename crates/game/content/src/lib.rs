//! Data-driven game content and its loaders.
//!
//! Tunables live in data files rather than code:
//! - Game configuration: prices, stats, damage ranges, pacing (TOML)
//! - The zone graph: streets, display names, per-zone cards (RON)
//!
//! Everything loads into [`game_core::GameConfig`], which the runtime can
//! swap at any time without touching game state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, ZoneLoader};
