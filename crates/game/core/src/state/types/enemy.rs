//! Enemy combatants and the per-battle bookkeeping around them.

use arrayvec::ArrayVec;
use strum::{Display, EnumString, IntoStaticStr};

use super::common::EnemyId;
use crate::config::GameConfig;

/// The two street-punk archetypes.
///
/// Club punks drop bats on defeat, sword punks drop swords.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EnemyArchetype {
    Club,
    Sword,
}

/// A single enemy in the battle arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub id: EnemyId,
    pub hp: u32,
    pub max_hp: u32,
    pub archetype: EnemyArchetype,
}

impl Enemy {
    pub fn new(id: EnemyId, archetype: EnemyArchetype, max_hp: u32) -> Self {
        Self {
            id,
            hp: max_hp,
            max_hp,
            archetype,
        }
    }

    #[inline]
    pub fn is_down(&self) -> bool {
        self.hp == 0
    }

    /// Applies `amount` damage and returns the hp actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }
}

/// Arena of enemies spawned for the active battle, keyed by [`EnemyId`].
///
/// Identifiers are handed out sequentially from [`EnemyId::FIRST`] and are
/// never reused within a battle, even after an enemy has been retired.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyRoster {
    enemies: ArrayVec<Enemy, { GameConfig::MAX_ENEMIES }>,
    next_id: u32,
}

impl EnemyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an enemy with the next free id, or returns `None` when full.
    pub fn spawn(&mut self, archetype: EnemyArchetype, max_hp: u32) -> Option<EnemyId> {
        if self.enemies.is_full() {
            return None;
        }
        let id = EnemyId(self.next_id.max(EnemyId::FIRST.0));
        self.next_id = id.0 + 1;
        self.enemies.push(Enemy::new(id, archetype, max_hp));
        Some(id)
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    /// Removes an enemy from the arena.
    pub fn retire(&mut self, id: EnemyId) -> Option<Enemy> {
        let index = self.enemies.iter().position(|enemy| enemy.id == id)?;
        Some(self.enemies.remove(index))
    }

    /// Removes every enemy and restarts id allocation. Returns how many were purged.
    pub fn purge(&mut self) -> usize {
        let purged = self.enemies.len();
        self.enemies.clear();
        self.next_id = 0;
        purged
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn living(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|enemy| !enemy.is_down())
    }

    pub fn any_alive(&self) -> bool {
        self.living().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Drops entries that would break roster invariants after a lenient load.
    pub fn normalize(&mut self) {
        for enemy in self.enemies.iter_mut() {
            enemy.max_hp = enemy.max_hp.max(1);
            enemy.hp = enemy.hp.min(enemy.max_hp);
        }
        let highest = self.enemies.iter().map(|enemy| enemy.id.0).max().unwrap_or(0);
        if self.next_id <= highest {
            self.next_id = highest + 1;
        }
    }
}

/// Composition of the current battle, used only to compute loot.
///
/// `enemy_count` counts every spawned enemy; the club count is the remainder
/// after subtracting sword punks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleCounters {
    pub enemy_count: u32,
    pub sword_count: u32,
}

impl BattleCounters {
    pub fn record(&mut self, archetype: EnemyArchetype) {
        self.enemy_count += 1;
        if archetype == EnemyArchetype::Sword {
            self.sword_count += 1;
        }
    }

    #[inline]
    pub fn club_count(&self) -> u32 {
        self.enemy_count.saturating_sub(self.sword_count)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Lifecycle phase of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BattlePhase {
    /// The player may attack or flee.
    Active,
    Victory,
    Defeat,
    Fled,
}

impl BattlePhase {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, BattlePhase::Active)
    }
}

/// Identity and phase of the most recent battle.
///
/// The record outlives the battle so that late intents and stale timers can
/// recognise that the battle they refer to has already ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRecord {
    pub serial: u64,
    pub phase: BattlePhase,
    pub archetype: EnemyArchetype,
    /// The post-battle relocation (victory arrival, revival) has run.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resolved: bool,
}
