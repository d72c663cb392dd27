//! Facts the engine reports to the presentation layer.
//!
//! Events describe what changed, in the order it changed. They carry enough
//! data to render a message log without reading the state back, but the
//! state stays the single source of truth.
use crate::state::{BattlePhase, CardId, EnemyArchetype, EnemyId, Inventory, ItemKind, Weapon, ZoneId};

/// Who received damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Combatant {
    Player,
    Enemy(EnemyId),
}

/// Owner of an inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryOwner {
    Player,
    Merchant,
}

/// Stats that report level-ups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    Strength,
    Defense,
    Ranged,
    MaxHp,
}

/// Items recovered from a won battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loot {
    pub bats: u32,
    pub swords: u32,
}

impl Loot {
    pub fn is_empty(&self) -> bool {
        self.bats == 0 && self.swords == 0
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    DamageDealt {
        target: Combatant,
        amount: f64,
        /// Portion of the raw hit absorbed by defense (player only).
        blocked: f64,
    },
    EnemyDefeated {
        id: EnemyId,
    },
    EncounterStarted {
        enemies: u32,
        archetype: EnemyArchetype,
        /// Zone the interrupted trip was headed for.
        destination: Option<ZoneId>,
    },
    BattleEnded {
        outcome: BattlePhase,
        loot: Loot,
    },
    LocationChanged {
        zone: ZoneId,
        /// Cards configured for the zone; bus routes are derived separately.
        allowed_cards: Vec<CardId>,
    },
    CardsSettled {
        zone: ZoneId,
    },
    LevelUp {
        stat: Stat,
        new_value: f64,
    },
    CreditsChanged {
        value: i64,
    },
    InventoryChanged {
        owner: InventoryOwner,
        item: ItemKind,
        count: u32,
    },
    EquipmentChanged {
        weapon: Weapon,
        equipped: bool,
    },
    Healed {
        amount: f64,
        hp: f64,
        max_hp: f64,
    },
    /// Everything the punks took after a defeat.
    Confiscated {
        credits: i64,
        items: Inventory,
    },
    Revived {
        /// Credits balance after the revival charge.
        debt: i64,
    },
    IntroductionCompleted,
}
