//! Intent execution and timer scheduling.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Player
//! intents run through the `pre_validate → apply → post_validate` pipeline
//! and either commit completely or leave the state exactly as it was.
//! System tasks run through [`GameEngine::run_task`]; they cannot be
//! rejected, only skipped when their guard no longer holds.
//!
//! [`TaskQueue`] orders follow-up tasks on a virtual millisecond clock and
//! [`Session`] ties the two together for a single game.

mod errors;
mod schedule;
mod session;
mod transition;

pub use errors::{Rejection, TransitionPhase, TransitionPhaseError};
pub use schedule::{ScheduledTask, TaskQueue};
pub use session::Session;

use tracing::{debug, warn};

use crate::action::{Intent, Outcome, SystemTask};
use crate::env::GameEnv;
use crate::state::GameState;

/// Applies intents and tasks to a borrowed [`GameState`].
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes a player intent.
    ///
    /// On rejection the state is restored to its value before the call.
    /// Intents aimed at an already decided battle succeed with an empty
    /// outcome and do not advance the nonce.
    pub fn execute(&mut self, env: GameEnv<'_>, intent: &Intent) -> Result<Outcome, Rejection> {
        if transition::is_noop(intent, self.state) {
            debug!(intent = intent.as_snake_case(), "ignored after battle end");
            return Ok(Outcome::new());
        }

        let before = self.state.clone();
        match transition::execute_transition(intent, self.state, &env) {
            Ok(outcome) => {
                self.state.nonce += 1;
                debug!(
                    intent = intent.as_snake_case(),
                    nonce = self.state.nonce,
                    events = outcome.events.len(),
                    follow_ups = outcome.follow_ups.len(),
                    "intent applied"
                );
                Ok(outcome)
            }
            Err(rejection) => {
                *self.state = before;
                debug!(
                    intent = intent.as_snake_case(),
                    phase = rejection.phase.as_str(),
                    reason = %rejection.error,
                    "intent rejected"
                );
                Err(rejection)
            }
        }
    }

    /// Runs a scheduled task. Stale tasks produce an empty outcome.
    pub fn run_task(&mut self, env: GameEnv<'_>, task: &SystemTask) -> Outcome {
        let outcome = task.run(self.state, &env);
        if outcome.is_empty() {
            debug!(task = task.as_snake_case(), "stale task skipped");
            return outcome;
        }
        self.state.nonce += 1;
        if let Err(violation) = self.state.check_invariants() {
            warn!(task = task.as_snake_case(), violation, "invariant broken by task");
        }
        debug!(
            task = task.as_snake_case(),
            nonce = self.state.nonce,
            events = outcome.events.len(),
            "task applied"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::IntentError;
    use crate::combat::AttackKind;
    use crate::config::GameConfig;
    use crate::env::ConstantRng;
    use crate::state::{EnemyId, ItemKind, ZoneId};

    #[test]
    fn rejection_leaves_state_untouched() {
        let config = GameConfig::default();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = GameState::default();
        state.player.hp = 100.0;
        state.zone.current = ZoneId::CyberMarket;
        let before = state.clone();

        let rejection = GameEngine::new(&mut state)
            .execute(env, &Intent::buy(ItemKind::Bat))
            .unwrap_err();
        assert_eq!(rejection.phase, TransitionPhase::PreValidate);
        assert_eq!(rejection.error, IntentError::InsufficientCredits {
            needed: 20,
            available: 0
        });
        assert_eq!(state, before);
    }

    #[test]
    fn accepted_intent_advances_nonce() {
        let config = GameConfig::default().with_encounter_chance(0.0);
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = GameState::default();
        state.player.hp = 100.0;

        GameEngine::new(&mut state)
            .execute(env, &Intent::travel(ZoneId::Streets))
            .unwrap();
        assert_eq!(state.nonce, 1);
    }

    #[test]
    fn late_attack_is_a_silent_noop() {
        let config = GameConfig::default();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = GameState::default();
        state.player.hp = 100.0;
        state.begin_battle(crate::state::EnemyArchetype::Club);
        state.end_battle(crate::state::BattlePhase::Victory);
        let before = state.clone();

        let outcome = GameEngine::new(&mut state)
            .execute(env, &Intent::attack(AttackKind::Melee, EnemyId(1)))
            .unwrap();
        assert!(outcome.is_empty());
        assert_eq!(state, before);
    }
}
