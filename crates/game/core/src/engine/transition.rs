//! Intent dispatch and the three-phase transition driver.

use crate::action::{Intent, IntentError, IntentTransition, Outcome};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{Rejection, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and collect the outcome
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<Outcome, TransitionPhaseError<IntentError>>
where
    T: IntentTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let outcome = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(outcome)
}

/// Whether `intent` refers to a battle that is already decided.
pub(super) fn is_noop(intent: &Intent, state: &GameState) -> bool {
    match intent {
        Intent::Attack(transition) => transition.is_noop(state),
        Intent::Flee(transition) => transition.is_noop(state),
        Intent::Travel(transition) => transition.is_noop(state),
        Intent::PayFare(transition) => transition.is_noop(state),
        Intent::Buy(transition) => transition.is_noop(state),
        Intent::Sell(transition) => transition.is_noop(state),
        Intent::Equip(transition) => transition.is_noop(state),
        Intent::UseConsumable(transition) => transition.is_noop(state),
        Intent::HealAtHospital(transition) => transition.is_noop(state),
    }
}

/// Routes each intent to its transition.
pub(super) fn execute_transition(
    intent: &Intent,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<Outcome, Rejection> {
    match intent {
        Intent::Attack(transition) => drive_transition(transition, state, env),
        Intent::Flee(transition) => drive_transition(transition, state, env),
        Intent::Travel(transition) => drive_transition(transition, state, env),
        Intent::PayFare(transition) => drive_transition(transition, state, env),
        Intent::Buy(transition) => drive_transition(transition, state, env),
        Intent::Sell(transition) => drive_transition(transition, state, env),
        Intent::Equip(transition) => drive_transition(transition, state, env),
        Intent::UseConsumable(transition) => drive_transition(transition, state, env),
        Intent::HealAtHospital(transition) => drive_transition(transition, state, env),
    }
}
