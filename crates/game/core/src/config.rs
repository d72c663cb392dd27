//! Tunable game data.
//!
//! Every number the rules consult lives in [`GameConfig`]: damage ranges,
//! prices, growth rates, the zone graph and pacing delays. The engine reads
//! it only through [`crate::env::GameEnv`], so a replacement config takes
//! effect on the next intent without touching any state.
use std::collections::BTreeMap;

use crate::state::{CardId, EnemyArchetype, Inventory, ItemKind, PlayerState, Weapon, ZoneId};

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub encounter: EncounterConfig,
    /// Player attributes for a new game.
    pub player: PlayerState,
    pub enemies: EnemyTable,
    pub attacks: AttackTable,
    pub weapon_bonus: WeaponBonus,
    pub skill_growth: SkillGrowth,
    pub prices: PriceList,
    pub initial_inventory: InitialInventories,
    pub zones: ZoneTable,
    /// Club punks waiting in the hospital when a new game starts.
    pub opening_battle_size: u32,
    pub timings: Timings,
}

impl GameConfig {
    // ===== compile-time capacities =====
    /// Arena capacity for a single battle.
    pub const MAX_ENEMIES: usize = 8;

    pub fn new() -> Self {
        Self {
            encounter: EncounterConfig::default(),
            player: PlayerState::default(),
            enemies: EnemyTable::default(),
            attacks: AttackTable::default(),
            weapon_bonus: WeaponBonus::default(),
            skill_growth: SkillGrowth::default(),
            prices: PriceList::default(),
            initial_inventory: InitialInventories::default(),
            zones: ZoneTable::default(),
            opening_battle_size: 0,
            timings: Timings::default(),
        }
    }

    pub fn with_encounter_chance(mut self, chance: f64) -> Self {
        self.encounter.chance = chance;
        self
    }

    /// Checks cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chance = self.encounter.chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(ConfigError::EncounterChance(chance));
        }
        let (min, max) = (self.encounter.min_enemies, self.encounter.max_enemies);
        if min == 0 || min > max || max as usize > Self::MAX_ENEMIES {
            return Err(ConfigError::EnemyCount { min, max });
        }
        if self.opening_battle_size as usize > Self::MAX_ENEMIES {
            return Err(ConfigError::EnemyCount {
                min: self.opening_battle_size,
                max: Self::MAX_ENEMIES as u32,
            });
        }
        for (name, range) in [
            ("melee", self.attacks.melee),
            ("ranged", self.attacks.ranged),
            ("club attack", self.enemies.club.attack),
            ("sword attack", self.enemies.sword.attack),
        ] {
            if range.min > range.max {
                return Err(ConfigError::InvertedRange(name));
            }
        }
        if self.enemies.club.hp == 0 || self.enemies.sword.hp == 0 {
            return Err(ConfigError::EnemyHp);
        }
        if self.player.max_hp < 1.0 {
            return Err(ConfigError::PlayerMaxHp(self.player.max_hp));
        }
        self.zones.validate()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejected configuration values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("encounter chance {0} is outside [0, 1]")]
    EncounterChance(f64),

    #[error("enemy count range {min}..={max} is empty or exceeds arena capacity")]
    EnemyCount { min: u32, max: u32 },

    #[error("{0} damage range has min > max")]
    InvertedRange(&'static str),

    #[error("enemy archetypes need at least 1 hp")]
    EnemyHp,

    #[error("player max hp {0} is below 1")]
    PlayerMaxHp(f64),

    #[error("no street zones configured")]
    NoStreets,

    #[error("{0} is referenced as a street but not registered in the street list")]
    UnknownStreet(ZoneId),
}

/// Random encounter tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterConfig {
    /// Probability in `[0, 1]` that a trip is interrupted by an ambush.
    pub chance: f64,
    pub min_enemies: u32,
    pub max_enemies: u32,
    /// Destination that never triggers an encounter.
    pub safe_zone: ZoneId,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            chance: 0.5,
            min_enemies: 1,
            max_enemies: 3,
            safe_zone: ZoneId::BusStop,
        }
    }
}

/// Inclusive integer damage range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

impl DamageRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Stats for one enemy archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchetypeStats {
    pub hp: u32,
    pub attack: DamageRange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyTable {
    pub club: ArchetypeStats,
    pub sword: ArchetypeStats,
}

impl EnemyTable {
    pub fn stats(&self, archetype: EnemyArchetype) -> &ArchetypeStats {
        match archetype {
            EnemyArchetype::Club => &self.club,
            EnemyArchetype::Sword => &self.sword,
        }
    }
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            club: ArchetypeStats {
                hp: 100,
                attack: DamageRange::new(8, 15),
            },
            sword: ArchetypeStats {
                hp: 120,
                attack: DamageRange::new(10, 18),
            },
        }
    }
}

/// Base damage ranges for player attacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttackTable {
    pub melee: DamageRange,
    pub ranged: DamageRange,
}

impl Default for AttackTable {
    fn default() -> Self {
        Self {
            melee: DamageRange::new(15, 25),
            ranged: DamageRange::new(10, 20),
        }
    }
}

/// Flat melee bonus granted by the equipped weapon.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaponBonus {
    pub bat: f64,
    pub sword: f64,
}

impl WeaponBonus {
    pub fn of(&self, weapon: Weapon) -> f64 {
        match weapon {
            Weapon::Bat => self.bat,
            Weapon::Sword => self.sword,
        }
    }
}

impl Default for WeaponBonus {
    fn default() -> Self {
        Self {
            bat: 5.0,
            sword: 7.0,
        }
    }
}

/// How much each stat grows through use.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillGrowth {
    /// Strength gained per melee attack.
    pub melee: f64,
    /// Ranged skill gained per ranged attack.
    pub ranged: f64,
    /// Defense gained per point of damage taken.
    pub defense: f64,
}

impl Default for SkillGrowth {
    fn default() -> Self {
        Self {
            melee: 0.1,
            ranged: 0.1,
            defense: 0.01,
        }
    }
}

/// Per-item prices; `None` means the merchant does not trade that item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ItemPrices {
    pub bat: Option<i64>,
    pub sword: Option<i64>,
    pub stim_pack: Option<i64>,
}

impl ItemPrices {
    pub const fn get(&self, item: ItemKind) -> Option<i64> {
        match item {
            ItemKind::Bat => self.bat,
            ItemKind::Sword => self.sword,
            ItemKind::StimPack => self.stim_pack,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PriceList {
    pub buy: ItemPrices,
    pub sell: ItemPrices,
    pub bus_fare: i64,
    pub heal: i64,
}

impl Default for PriceList {
    fn default() -> Self {
        Self {
            buy: ItemPrices {
                bat: Some(20),
                sword: Some(25),
                stim_pack: Some(15),
            },
            sell: ItemPrices {
                bat: Some(10),
                sword: Some(15),
                stim_pack: None,
            },
            bus_fare: 10,
            heal: 10,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InitialInventories {
    pub player: Inventory,
    pub merchant: Inventory,
}

impl Default for InitialInventories {
    fn default() -> Self {
        Self {
            player: Inventory::empty(),
            merchant: Inventory::new(0, 0, 10),
        }
    }
}

/// A zone the bus network serves.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreetSpec {
    pub zone: ZoneId,
    pub name: String,
}

/// The navigation graph: streets, display names and per-zone card rules.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoneTable {
    pub streets: Vec<StreetSpec>,
    /// Street whose ambushes are fought by sword punks.
    pub downtown: ZoneId,
    /// Bus origin when the player did not arrive from any street.
    pub fallback_street: ZoneId,
    pub names: BTreeMap<ZoneId, String>,
    pub rules: BTreeMap<ZoneId, Vec<CardId>>,
}

impl ZoneTable {
    pub fn is_street(&self, zone: ZoneId) -> bool {
        self.streets.iter().any(|street| street.zone == zone)
    }

    /// Cards the zone offers; zones without a rule offer nothing.
    pub fn cards_for(&self, zone: ZoneId) -> &[CardId] {
        self.rules.get(&zone).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn offers(&self, zone: ZoneId, card: CardId) -> bool {
        self.cards_for(zone).contains(&card)
    }

    pub fn display_name(&self, zone: ZoneId) -> &str {
        self.streets
            .iter()
            .find(|street| street.zone == zone)
            .map(|street| street.name.as_str())
            .or_else(|| self.names.get(&zone).map(String::as_str))
            .unwrap_or_else(|| zone.as_str())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.streets.is_empty() {
            return Err(ConfigError::NoStreets);
        }
        for zone in [self.downtown, self.fallback_street] {
            if !self.is_street(zone) {
                return Err(ConfigError::UnknownStreet(zone));
            }
        }
        Ok(())
    }
}

impl Default for ZoneTable {
    fn default() -> Self {
        use CardId::{Doctor, Location, Merchant};
        use ZoneId::*;

        let rules = BTreeMap::from([
            (Streets, vec![Location(Hospital), Location(CyberMarket), Location(BusStop)]),
            (Hospital, vec![Doctor, Location(Streets)]),
            (CyberMarket, vec![Merchant, Location(Streets)]),
            (BusStop, Vec::new()),
            (MainStreet, vec![Location(BusStop), Location(MainStreetMarket)]),
            (MainStreetMarket, vec![Merchant, Location(MainStreet)]),
            (Battle, Vec::new()),
        ]);
        let names = [
            (Hospital, "Hospital"),
            (CyberMarket, "Cyber Market"),
            (MainStreetMarket, "Main Street Market"),
            (BusStop, "Bus Stop"),
            (Battle, "Battle"),
        ]
        .into_iter()
        .map(|(zone, name)| (zone, name.to_string()))
        .collect();

        Self {
            streets: vec![
                StreetSpec {
                    zone: Streets,
                    name: "Grove Street".to_string(),
                },
                StreetSpec {
                    zone: MainStreet,
                    name: "Downtown".to_string(),
                },
            ],
            downtown: MainStreet,
            fallback_street: Streets,
            names,
            rules,
        }
    }
}

/// Pacing delays in milliseconds for scheduled follow-up tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Timings {
    pub counter_attack_ms: u64,
    pub retire_enemy_ms: u64,
    pub declare_victory_ms: u64,
    pub complete_victory_ms: u64,
    pub declare_defeat_ms: u64,
    pub revive_ms: u64,
    pub settle_ms: u64,
    pub introduction_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            counter_attack_ms: 400,
            retire_enemy_ms: 300,
            declare_victory_ms: 1000,
            complete_victory_ms: 500,
            declare_defeat_ms: 300,
            revive_ms: 4000,
            settle_ms: 500,
            introduction_ms: 1500,
        }
    }
}
