//! Battle intents: attack a target or run away.

use crate::action::{IntentError, IntentTransition, Outcome};
use crate::battle;
use crate::combat::AttackKind;
use crate::env::GameEnv;
use crate::state::{EnemyId, GameState};

/// Strikes one enemy with a melee or ranged attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackIntent {
    pub attack: AttackKind,
    pub target: EnemyId,
}

impl AttackIntent {
    pub fn new(attack: AttackKind, target: EnemyId) -> Self {
        Self { attack, target }
    }
}

impl IntentTransition for AttackIntent {
    /// Late clicks after the battle ended are swallowed.
    fn is_noop(&self, state: &GameState) -> bool {
        battle::is_after_battle(state)
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), IntentError> {
        battle::validate_attack(state, self.target).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Outcome, IntentError> {
        battle::player_attack(state, env, self.attack, self.target)
    }
}

/// Abandons the active battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleeIntent;

impl IntentTransition for FleeIntent {
    fn is_noop(&self, state: &GameState) -> bool {
        battle::is_after_battle(state)
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), IntentError> {
        battle::validate_flee(state).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Outcome, IntentError> {
        battle::flee(state, env)
    }
}
