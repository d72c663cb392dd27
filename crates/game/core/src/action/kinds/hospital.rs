//! The hospital doctor.

use crate::action::{IntentError, IntentTransition, Outcome};
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::ladder;
use crate::ledger;
use crate::state::{CardId, GameState};

/// Full heal from the doctor. Always charged, even into debt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealIntent;

impl IntentTransition for HealIntent {
    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), IntentError> {
        if state.in_battle() {
            return Err(IntentError::InBattle);
        }
        if state.player.is_down() {
            return Err(IntentError::PlayerDefeated);
        }
        let zone = state.zone.current;
        if !env.config().zones.offers(zone, CardId::Doctor) {
            return Err(IntentError::ServiceUnavailable {
                service: CardId::Doctor,
                zone,
            });
        }
        if state.player.missing_hp() <= 0.0 {
            return Err(IntentError::AlreadyFullHealth);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Outcome, IntentError> {
        let mut out = Outcome::new();
        out.extend(ladder::full_heal(&mut state.player).events);
        let credits = ledger::charge_debt(state, env.config().prices.heal);
        out.push(GameEvent::CreditsChanged { value: credits });
        Ok(out)
    }
}
