use std::fmt;
use std::str::FromStr;

/// Stable identifier for an enemy inside the active battle roster.
///
/// Identifiers restart at 1 for every battle and render as `enemy<N>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyId(pub u32);

impl EnemyId {
    /// Identifier of the first enemy spawned in a battle.
    pub const FIRST: Self = Self(1);

    /// Actor index used when deriving RNG seeds for this enemy.
    #[inline]
    pub const fn actor_index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enemy{}", self.0)
    }
}

/// Error returned when an enemy key cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid enemy id: {0:?}")]
pub struct ParseEnemyIdError(pub String);

impl FromStr for EnemyId {
    type Err = ParseEnemyIdError;

    /// Accepts both the `enemy<N>` key and a bare number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("enemy").unwrap_or(s);
        digits
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .map(EnemyId)
            .ok_or_else(|| ParseEnemyIdError(s.to_string()))
    }
}

/// Actor index reserved for the player when deriving RNG seeds.
pub const PLAYER_ACTOR: u32 = 0;
