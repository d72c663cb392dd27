//! Random encounters on the way between zones.

use tracing::debug;

use crate::action::Outcome;
use crate::battle;
use crate::config::DamageRange;
use crate::env::{GameEnv, context};
use crate::event::GameEvent;
use crate::state::{EnemyArchetype, GameState, PLAYER_ACTOR, ZoneId};

/// Rolls for an ambush on the trip to `destination`.
///
/// On a hit the player is moved into the battle zone with a fresh set of
/// enemies, `pending_destination` remembers where the trip was headed, and
/// the returned outcome replaces the arrival. `None` means the trip goes on.
pub fn maybe_trigger_encounter(
    state: &mut GameState,
    env: &GameEnv<'_>,
    destination: ZoneId,
) -> Option<Outcome> {
    let config = env.config();
    let rules = &config.encounter;
    if state.in_battle() || state.zone.current == ZoneId::Battle {
        return None;
    }
    if destination == rules.safe_zone {
        return None;
    }

    let fallback = config.zones.fallback_street;
    if !env.roll_chance(state, PLAYER_ACTOR, context::ENCOUNTER, rules.chance) {
        if destination != fallback {
            state.zone.pending_destination = None;
        }
        return None;
    }

    let count = env.roll(
        state,
        PLAYER_ACTOR,
        context::ENEMY_COUNT,
        DamageRange::new(rules.min_enemies, rules.max_enemies),
    );

    let current = state.zone.current;
    if destination == fallback {
        state.zone.previous = if current == fallback {
            Some(ZoneId::Hospital)
        } else {
            Some(current)
        };
    } else {
        state.zone.previous = Some(current);
    }
    state.zone.pending_destination = Some(destination);

    let downtown = config.zones.downtown;
    let archetype = if destination == downtown || state.zone.street == Some(downtown) {
        EnemyArchetype::Sword
    } else {
        EnemyArchetype::Club
    };

    let (serial, spawned) = battle::spawn_battle(state, config, archetype, count);
    state.zone.current = ZoneId::Battle;
    state.zone.street = None;
    state.zone.settling = false;
    debug!(serial, %destination, spawned, "ambushed on the way");

    let mut out = Outcome::new();
    out.push(GameEvent::EncounterStarted {
        enemies: spawned,
        archetype,
        destination: Some(destination),
    });
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{ConstantRng, PcgRng};

    fn on(zone: ZoneId) -> GameState {
        let mut state = GameState::default();
        state.player.hp = 100.0;
        state.zone.current = zone;
        state.zone.street = (zone == ZoneId::Streets || zone == ZoneId::MainStreet).then_some(zone);
        state
    }

    #[test]
    fn certain_encounters_always_fire() {
        let config = GameConfig::default().with_encounter_chance(1.0);
        let rng = PcgRng;
        let env = GameEnv::new(&config, &rng);
        for nonce in 0..50 {
            let mut state = on(ZoneId::Hospital);
            state.nonce = nonce;
            let out = maybe_trigger_encounter(&mut state, &env, ZoneId::Streets);
            assert!(out.is_some());
            assert_eq!(state.zone.current, ZoneId::Battle);
            assert!((1..=3).contains(&state.enemies.len()));
        }
    }

    #[test]
    fn impossible_encounters_never_fire() {
        let config = GameConfig::default().with_encounter_chance(0.0);
        let rng = PcgRng;
        let env = GameEnv::new(&config, &rng);
        for nonce in 0..50 {
            let mut state = on(ZoneId::Streets);
            state.nonce = nonce;
            assert!(maybe_trigger_encounter(&mut state, &env, ZoneId::CyberMarket).is_none());
            assert!(state.enemies.is_empty());
        }
    }

    #[test]
    fn bus_stop_is_safe() {
        let config = GameConfig::default().with_encounter_chance(1.0);
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = on(ZoneId::MainStreet);
        assert!(maybe_trigger_encounter(&mut state, &env, ZoneId::BusStop).is_none());
    }

    #[test]
    fn no_second_battle_while_one_is_active() {
        let config = GameConfig::default().with_encounter_chance(1.0);
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = on(ZoneId::Streets);
        assert!(maybe_trigger_encounter(&mut state, &env, ZoneId::CyberMarket).is_some());
        let serial = state.battle.map(|battle| battle.serial);
        assert!(maybe_trigger_encounter(&mut state, &env, ZoneId::Hospital).is_none());
        assert_eq!(state.battle.map(|battle| battle.serial), serial);
    }

    #[test]
    fn ambush_on_the_way_to_the_streets_from_the_streets_returns_to_hospital() {
        let config = GameConfig::default().with_encounter_chance(1.0);
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = on(ZoneId::Streets);
        maybe_trigger_encounter(&mut state, &env, ZoneId::Streets);
        assert_eq!(state.zone.previous, Some(ZoneId::Hospital));
        assert_eq!(state.zone.pending_destination, Some(ZoneId::Streets));

        let mut state = on(ZoneId::CyberMarket);
        maybe_trigger_encounter(&mut state, &env, ZoneId::Streets);
        assert_eq!(state.zone.previous, Some(ZoneId::CyberMarket));
    }

    #[test]
    fn downtown_spawns_sword_punks_only() {
        let config = GameConfig::default().with_encounter_chance(1.0);
        let rng = ConstantRng(u32::MAX);
        let env = GameEnv::new(&config, &rng);
        let mut state = on(ZoneId::MainStreet);
        // ConstantRng(MAX) fails the chance roll only at p = 0; p = 1 always hits.
        let out = maybe_trigger_encounter(&mut state, &env, ZoneId::MainStreetMarket);
        assert!(out.is_some());
        assert_eq!(state.enemies.len(), 3);
        assert!(state
            .enemies
            .iter()
            .all(|enemy| enemy.archetype == EnemyArchetype::Sword));
        assert_eq!(state.counters.sword_count, 3);
    }

    #[test]
    fn miss_clears_stale_pending_destination_except_for_streets() {
        let config = GameConfig::default().with_encounter_chance(0.0);
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);

        let mut state = on(ZoneId::Hospital);
        state.zone.pending_destination = Some(ZoneId::CyberMarket);
        maybe_trigger_encounter(&mut state, &env, ZoneId::Streets);
        assert_eq!(state.zone.pending_destination, Some(ZoneId::CyberMarket));

        let mut state = on(ZoneId::Streets);
        state.zone.pending_destination = Some(ZoneId::CyberMarket);
        maybe_trigger_encounter(&mut state, &env, ZoneId::Hospital);
        assert_eq!(state.zone.pending_destination, None);
    }
}
