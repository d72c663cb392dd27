//! Damage rolls for both sides of a fight.

use strum::{Display, EnumString};

use crate::env::{GameEnv, context};
use crate::state::{Enemy, GameState, PLAYER_ACTOR};

/// How the player attacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AttackKind {
    /// Fists or the equipped weapon; scales with strength.
    Melee,
    /// Thrown or fired; scales with the ranged skill.
    Ranged,
}

/// Strength plus the equipped weapon's bonus.
pub fn melee_bonus(state: &GameState, env: &GameEnv<'_>) -> f64 {
    let weapon = state
        .equipped
        .current()
        .map_or(0.0, |weapon| env.config().weapon_bonus.of(weapon));
    state.player.strength + weapon
}

/// Rolls the player's damage for `attack`.
///
/// ```text
/// damage = floor(uniform(min, max) + bonus)
/// ```
///
/// where the bonus is [`melee_bonus`] for melee and the ranged skill for
/// ranged attacks.
pub fn calculate_damage(state: &GameState, env: &GameEnv<'_>, attack: AttackKind) -> u32 {
    let attacks = &env.config().attacks;
    let (range, bonus) = match attack {
        AttackKind::Melee => (attacks.melee, melee_bonus(state, env)),
        AttackKind::Ranged => (attacks.ranged, state.player.ranged),
    };
    let base = env.roll(state, PLAYER_ACTOR, context::PLAYER_DAMAGE, range);
    let total = (f64::from(base) + bonus).floor();
    if total <= 0.0 { 0 } else { total as u32 }
}

/// One enemy strike against the player, after defense.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyHit {
    pub raw: u32,
    /// Damage that gets through; never below 1.
    pub dealt: f64,
    pub blocked: f64,
}

/// Rolls `enemy`'s counter-attack against the player's current defense.
pub fn roll_enemy_hit(state: &GameState, env: &GameEnv<'_>, enemy: &Enemy) -> EnemyHit {
    let range = env.config().enemies.stats(enemy.archetype).attack;
    let raw = env.roll(
        state,
        enemy.id.actor_index(),
        context::ENEMY_DAMAGE,
        range,
    );
    let dealt = (f64::from(raw) - state.player.defense).max(1.0);
    EnemyHit {
        raw,
        dealt,
        blocked: (f64::from(raw) - dealt).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::ConstantRng;
    use crate::state::{EnemyArchetype, EnemyId, ItemKind, Weapon};

    #[test]
    fn melee_adds_strength_and_weapon() {
        let config = GameConfig::default();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = GameState::default();
        state.player.strength = 1.7;
        state.player_inventory.add(ItemKind::Sword, 1);
        state.equipped.equip(Weapon::Sword);

        // 15 + 1.7 + 7 = 23.7
        assert_eq!(calculate_damage(&state, &env, AttackKind::Melee), 23);
    }

    #[test]
    fn ranged_adds_ranged_skill() {
        let config = GameConfig::default();
        let rng = ConstantRng(u32::MAX);
        let env = GameEnv::new(&config, &rng);
        let mut state = GameState::default();
        state.player.ranged = 2.5;

        assert_eq!(calculate_damage(&state, &env, AttackKind::Ranged), 22);
    }

    #[test]
    fn enemy_hits_deal_at_least_one() {
        let config = GameConfig::default();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = GameState::default();
        state.player.defense = 40.0;
        let enemy = Enemy::new(EnemyId(1), EnemyArchetype::Club, 100);

        let hit = roll_enemy_hit(&state, &env, &enemy);
        assert_eq!(hit.raw, 8);
        assert_eq!(hit.dealt, 1.0);
        assert_eq!(hit.blocked, 7.0);
    }

    #[test]
    fn sword_punks_hit_harder() {
        let config = GameConfig::default();
        let rng = ConstantRng(u32::MAX);
        let env = GameEnv::new(&config, &rng);
        let state = GameState::default();
        let enemy = Enemy::new(EnemyId(2), EnemyArchetype::Sword, 120);

        let hit = roll_enemy_hit(&state, &env, &enemy);
        assert_eq!(hit.raw, 18);
        assert_eq!(hit.dealt, 17.0);
        assert_eq!(hit.blocked, 1.0);
    }
}
