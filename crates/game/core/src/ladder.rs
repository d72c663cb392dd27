//! The healing ladder: cumulative healing becomes permanent max HP.
//!
//! Every full heal banks the HP it restored. Each time the bank reaches the
//! threshold, max HP grows by exactly one, the threshold is spent, and the
//! next threshold becomes the new max HP. The step order is fixed:
//!
//! ```text
//! max_hp += 1
//! hp = max_hp
//! total_hp_healed -= next_level_threshold
//! next_level_threshold = max_hp
//! ```
//!
//! Reordering these steps changes how many levels a large heal grants.

use crate::event::{GameEvent, Stat};
use crate::state::PlayerState;

/// Outcome of one full heal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HealReport {
    /// HP restored before any level-ups.
    pub restored: f64,
    pub levels_gained: u32,
    /// `Healed` followed by one `LevelUp` per level gained.
    pub events: Vec<GameEvent>,
}

/// Restores the player to full HP and runs the ladder.
pub fn full_heal(player: &mut PlayerState) -> HealReport {
    let restored = player.missing_hp();
    player.hp = player.max_hp;
    player.total_hp_healed += restored;

    if player.next_level_threshold <= 0.0 {
        player.next_level_threshold = player.max_hp;
    }

    let mut events = vec![GameEvent::Healed {
        amount: restored,
        hp: player.hp,
        max_hp: player.max_hp,
    }];
    let mut levels_gained = 0;
    while player.total_hp_healed >= player.next_level_threshold {
        player.max_hp += 1.0;
        player.hp = player.max_hp;
        player.total_hp_healed -= player.next_level_threshold;
        player.next_level_threshold = player.max_hp;
        levels_gained += 1;
        events.push(GameEvent::LevelUp {
            stat: Stat::MaxHp,
            new_value: player.max_hp,
        });
    }

    HealReport {
        restored,
        levels_gained,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient() -> PlayerState {
        PlayerState::default()
    }

    #[test]
    fn first_full_heal_grants_one_level() {
        let mut player = patient();
        let report = full_heal(&mut player);

        assert_eq!(report.restored, 100.0);
        assert_eq!(report.levels_gained, 1);
        assert_eq!(player.max_hp, 101.0);
        assert_eq!(player.hp, 101.0);
        assert_eq!(player.next_level_threshold, 101.0);
        assert_eq!(player.total_hp_healed, 0.0);
    }

    #[test]
    fn second_heal_from_zero_levels_again() {
        let mut player = patient();
        full_heal(&mut player);
        player.hp = 0.0;
        let report = full_heal(&mut player);

        assert_eq!(report.restored, 101.0);
        assert_eq!(report.levels_gained, 1);
        assert_eq!(player.max_hp, 102.0);
        assert_eq!(player.next_level_threshold, 102.0);
        assert_eq!(player.total_hp_healed, 0.0);
    }

    #[test]
    fn banked_healing_can_fire_several_levels() {
        let mut player = PlayerState {
            total_hp_healed: 150.0,
            ..patient()
        };
        // 150 + 100 = 250: spend 100 (max 101), then 101 (max 102), 49 left < 102.
        let report = full_heal(&mut player);

        assert_eq!(report.levels_gained, 2);
        assert_eq!(player.max_hp, 102.0);
        assert_eq!(player.total_hp_healed, 49.0);
        assert_eq!(player.next_level_threshold, player.max_hp);
        let level_ups = report
            .events
            .iter()
            .filter(|event| matches!(event, GameEvent::LevelUp { .. }))
            .count();
        assert_eq!(level_ups, 2);
    }

    #[test]
    fn partial_heal_banks_without_leveling() {
        let mut player = PlayerState {
            hp: 60.0,
            ..patient()
        };
        let report = full_heal(&mut player);

        assert_eq!(report.restored, 40.0);
        assert_eq!(report.levels_gained, 0);
        assert_eq!(player.hp, 100.0);
        assert_eq!(player.total_hp_healed, 40.0);
    }

    #[test]
    fn zero_threshold_resets_to_max_hp() {
        let mut player = PlayerState {
            hp: 90.0,
            next_level_threshold: 0.0,
            ..patient()
        };
        full_heal(&mut player);
        assert_eq!(player.next_level_threshold, 100.0);
        assert_eq!(player.total_hp_healed, 10.0);
    }
}
