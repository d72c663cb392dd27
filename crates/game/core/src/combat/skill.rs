//! Use-based stat growth.

use crate::event::{GameEvent, Stat};
use crate::state::PlayerState;

fn stat_mut(player: &mut PlayerState, stat: Stat) -> &mut f64 {
    match stat {
        Stat::Strength => &mut player.strength,
        Stat::Defense => &mut player.defense,
        Stat::Ranged => &mut player.ranged,
        Stat::MaxHp => &mut player.max_hp,
    }
}

/// Adds `delta` to a stat. Reports a level-up when the whole part grows.
///
/// The integer boundary is only a reporting threshold; stats are unbounded.
pub fn improve_stat(player: &mut PlayerState, stat: Stat, delta: f64) -> Option<GameEvent> {
    let slot = stat_mut(player, stat);
    let before = slot.floor();
    *slot += delta;
    let after = slot.floor();
    (after > before).then(|| GameEvent::LevelUp {
        stat,
        new_value: after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_only_when_crossing_an_integer() {
        let mut player = PlayerState {
            strength: 1.85,
            ..PlayerState::default()
        };
        assert_eq!(improve_stat(&mut player, Stat::Strength, 0.1), None);
        assert_eq!(
            improve_stat(&mut player, Stat::Strength, 0.1),
            Some(GameEvent::LevelUp {
                stat: Stat::Strength,
                new_value: 2.0
            })
        );
        assert!((player.strength - 2.05).abs() < 1e-9);
    }

    #[test]
    fn defense_grows_with_damage_taken() {
        let mut player = PlayerState::default();
        let event = improve_stat(&mut player, Stat::Defense, 0.01 * 14.0);
        assert_eq!(event, None);
        assert!((player.defense - 1.14).abs() < 1e-9);
    }
}
