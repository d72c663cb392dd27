//! Opening sequence of a new game.
//!
//! The player starts unconscious in the hospital. The introduction runs the
//! doctor's heal (billed like any other) and, when configured, drops a
//! handful of club punks into the hospital for a first fight.

use tracing::info;

use crate::action::Outcome;
use crate::battle;
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::ladder;
use crate::ledger;
use crate::state::{EnemyArchetype, GameState};

/// A game that has never been woken up: no battle yet and the player is down.
pub(super) fn is_pending(state: &GameState) -> bool {
    state.battle.is_none() && state.player.is_down() && !state.pending_revival
}

pub(super) fn introduce(state: &mut GameState, env: &GameEnv<'_>) -> Outcome {
    let mut out = Outcome::new();
    if !is_pending(state) {
        return out;
    }
    let config = env.config();

    let report = ladder::full_heal(&mut state.player);
    out.extend(report.events);
    let credits = ledger::charge_debt(state, config.prices.heal);
    out.push(GameEvent::CreditsChanged { value: credits });
    out.push(GameEvent::IntroductionCompleted);

    if config.opening_battle_size > 0 {
        let (serial, spawned) = battle::spawn_battle(
            state,
            config,
            EnemyArchetype::Club,
            config.opening_battle_size,
        );
        state.zone.pending_destination = None;
        out.push(GameEvent::EncounterStarted {
            enemies: spawned,
            archetype: EnemyArchetype::Club,
            destination: None,
        });
        info!(serial, spawned, "opening battle");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::ConstantRng;
    use crate::state::ZoneId;

    #[test]
    fn introduction_heals_and_bills_once() {
        let config = GameConfig::default();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = GameState::new_game(7, &config);

        let out = introduce(&mut state, &env);
        assert!(out.events.contains(&GameEvent::IntroductionCompleted));
        assert_eq!(state.player.max_hp, 101.0);
        assert_eq!(state.player.credits, -10);

        assert!(introduce(&mut state, &env).is_empty());
    }

    #[test]
    fn opening_battle_takes_place_in_the_hospital() {
        let config = GameConfig {
            opening_battle_size: 2,
            ..GameConfig::default()
        };
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = GameState::new_game(7, &config);

        introduce(&mut state, &env);
        assert!(state.in_battle());
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.zone.current, ZoneId::Hospital);
        assert_eq!(state.zone.pending_destination, None);
    }
}
