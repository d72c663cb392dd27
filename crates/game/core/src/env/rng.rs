//! Deterministic randomness for encounters and damage rolls.
//!
//! Draws are pure functions of a seed, and seeds are derived from the game
//! seed, the state nonce, the acting combatant and a roll context. Replaying
//! the same intents and tasks against the same starting state therefore
//! reproduces the same ambushes and the same damage numbers.

/// Source of seeded random values.
pub trait RngOracle: Send + Sync {
    /// Returns a uniformly distributed value for `seed`.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform integer in `[min, max]` inclusive; `min` when the range is empty.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32(seed)) % span) as u32
    }

    /// Bernoulli trial with success probability `probability`.
    ///
    /// `0.0` never succeeds and `1.0` always does, regardless of the draw.
    fn chance(&self, seed: u64, probability: f64) -> bool {
        if probability <= 0.0 || probability.is_nan() {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        let unit = f64::from(self.next_u32(seed)) / 4_294_967_296.0;
        unit < probability
    }
}

/// PCG-XSH-RR generator stepped once from the seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Oracle that returns the same value for every seed.
///
/// `ConstantRng(0)` makes every range roll its minimum and every chance
/// below 1.0 succeed; `ConstantRng(u32::MAX)` rolls maximums and fails
/// every chance below 1.0.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantRng(pub u32);

impl RngOracle for ConstantRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }

    fn range(&self, _seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        // Scale instead of taking a modulus so the constant maps onto the range
        // monotonically: 0 is the minimum and u32::MAX the maximum.
        min + ((u64::from(self.0) * span) >> 32) as u32
    }
}

/// Roll contexts, so one transition can draw several independent values.
pub mod context {
    pub const ENCOUNTER: u32 = 0;
    pub const ENEMY_COUNT: u32 = 1;
    pub const PLAYER_DAMAGE: u32 = 2;
    pub const ENEMY_DAMAGE: u32 = 3;
}

/// Mixes the seed components with a SplitMix-style avalanche.
pub fn compute_seed(game_seed: u64, nonce: u64, actor: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
