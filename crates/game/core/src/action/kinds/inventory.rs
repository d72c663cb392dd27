//! Equipment and consumable intents.

use crate::action::{IntentError, IntentTransition, Outcome};
use crate::env::GameEnv;
use crate::event::{GameEvent, InventoryOwner};
use crate::ladder;
use crate::state::{GameState, ItemKind, Weapon};

/// Toggles a weapon: equips it, or unequips it when already in hand.
///
/// Only one weapon is held at a time, so equipping one puts the other away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipIntent {
    pub item: ItemKind,
}

impl EquipIntent {
    pub fn new(item: ItemKind) -> Self {
        Self { item }
    }

    fn weapon(&self, state: &GameState) -> Result<Weapon, IntentError> {
        let weapon = self.item.weapon().ok_or(IntentError::NotEquippable(self.item))?;
        if state.player_inventory.count(self.item) == 0 {
            return Err(IntentError::NotInInventory(self.item));
        }
        Ok(weapon)
    }
}

impl IntentTransition for EquipIntent {
    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), IntentError> {
        self.weapon(state).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Outcome, IntentError> {
        let weapon = self.weapon(state)?;
        let mut out = Outcome::new();

        if state.equipped.is_equipped(weapon) {
            state.equipped.clear();
            out.push(GameEvent::EquipmentChanged {
                weapon,
                equipped: false,
            });
            return Ok(out);
        }

        if let Some(displaced) = state.equipped.equip(weapon) {
            out.push(GameEvent::EquipmentChanged {
                weapon: displaced,
                equipped: false,
            });
        }
        out.push(GameEvent::EquipmentChanged {
            weapon,
            equipped: true,
        });
        Ok(out)
    }
}

/// Consumes one unit of a consumable item.
///
/// A stim pack is a full heal and feeds the healing ladder like any other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseConsumableIntent {
    pub item: ItemKind,
}

impl UseConsumableIntent {
    pub fn new(item: ItemKind) -> Self {
        Self { item }
    }
}

impl IntentTransition for UseConsumableIntent {
    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), IntentError> {
        if self.item != ItemKind::StimPack {
            return Err(IntentError::NotConsumable(self.item));
        }
        if state.player_inventory.count(self.item) == 0 {
            return Err(IntentError::NotInInventory(self.item));
        }
        if state.player.is_down() {
            return Err(IntentError::PlayerDefeated);
        }
        if state.player.missing_hp() <= 0.0 {
            return Err(IntentError::AlreadyFullHealth);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Outcome, IntentError> {
        let count = state
            .player_inventory
            .take_one(self.item)
            .ok_or(IntentError::NotInInventory(self.item))?;
        let mut out = Outcome::new();
        out.push(GameEvent::InventoryChanged {
            owner: InventoryOwner::Player,
            item: self.item,
            count,
        });
        out.extend(ladder::full_heal(&mut state.player).events);
        Ok(out)
    }
}
