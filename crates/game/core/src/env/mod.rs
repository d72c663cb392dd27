//! Read-only inputs to the reducer.
//!
//! [`GameEnv`] bundles the active [`GameConfig`] with the [`RngOracle`] so
//! transitions never reach for ambient globals. Swapping either one between
//! calls is how the runtime hot-reloads configuration.
mod rng;

pub use rng::{ConstantRng, PcgRng, RngOracle, compute_seed, context};

use crate::config::{DamageRange, GameConfig};
use crate::state::GameState;

/// Aggregates the configuration and randomness a transition may consult.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    config: &'a GameConfig,
    rng: &'a dyn RngOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(config: &'a GameConfig, rng: &'a dyn RngOracle) -> Self {
        Self { config, rng }
    }

    #[inline]
    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    #[inline]
    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    fn seed(&self, state: &GameState, actor: u32, context: u32) -> u64 {
        compute_seed(state.game_seed, state.nonce, actor, context)
    }

    /// Draws a uniform integer from `range` for `actor`.
    pub fn roll(&self, state: &GameState, actor: u32, context: u32, range: DamageRange) -> u32 {
        self.rng
            .range(self.seed(state, actor, context), range.min, range.max)
    }

    /// Bernoulli trial for `actor`.
    pub fn roll_chance(&self, state: &GameState, actor: u32, context: u32, probability: f64) -> bool {
        self.rng
            .chance(self.seed(state, actor, context), probability)
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
