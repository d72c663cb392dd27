//! Item kinds, per-owner inventories and the equipped weapon slot.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Every item that can be carried or traded.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ItemKind {
    Bat,
    Sword,
    StimPack,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Bat, ItemKind::Sword, ItemKind::StimPack];

    /// Returns the weapon this item equips as, if any.
    pub const fn weapon(self) -> Option<Weapon> {
        match self {
            ItemKind::Bat => Some(Weapon::Bat),
            ItemKind::Sword => Some(Weapon::Sword),
            ItemKind::StimPack => None,
        }
    }
}

/// Melee weapons; at most one is equipped at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Weapon {
    Bat,
    Sword,
}

impl Weapon {
    pub const fn item(self) -> ItemKind {
        match self {
            Weapon::Bat => ItemKind::Bat,
            Weapon::Sword => ItemKind::Sword,
        }
    }
}

/// Item counts held by one owner (the player or the merchant).
///
/// Counts are unsigned, so an inventory can never go negative; removal of a
/// missing item is reported instead of performed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Inventory {
    pub bat: u32,
    pub sword: u32,
    pub stim_pack: u32,
}

impl Inventory {
    pub const fn new(bat: u32, sword: u32, stim_pack: u32) -> Self {
        Self {
            bat,
            sword,
            stim_pack,
        }
    }

    pub const fn empty() -> Self {
        Self::new(0, 0, 0)
    }

    pub const fn count(&self, item: ItemKind) -> u32 {
        match item {
            ItemKind::Bat => self.bat,
            ItemKind::Sword => self.sword,
            ItemKind::StimPack => self.stim_pack,
        }
    }

    fn slot_mut(&mut self, item: ItemKind) -> &mut u32 {
        match item {
            ItemKind::Bat => &mut self.bat,
            ItemKind::Sword => &mut self.sword,
            ItemKind::StimPack => &mut self.stim_pack,
        }
    }

    /// Adds `amount` units and returns the new count.
    pub fn add(&mut self, item: ItemKind, amount: u32) -> u32 {
        let slot = self.slot_mut(item);
        *slot = slot.saturating_add(amount);
        *slot
    }

    /// Removes one unit, returning the new count, or `None` if there was none.
    pub fn take_one(&mut self, item: ItemKind) -> Option<u32> {
        let slot = self.slot_mut(item);
        *slot = slot.checked_sub(1)?;
        Some(*slot)
    }

    pub fn is_empty(&self) -> bool {
        ItemKind::ALL.iter().all(|item| self.count(*item) == 0)
    }

    /// Iterates over items with a non-zero count.
    pub fn held(&self) -> impl Iterator<Item = (ItemKind, u32)> + '_ {
        ItemKind::ALL
            .into_iter()
            .map(|item| (item, self.count(item)))
            .filter(|(_, count)| *count > 0)
    }
}

/// The single melee weapon slot.
///
/// Holding an `Option<Weapon>` makes "at most one of bat/sword" structural.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EquippedWeapons {
    weapon: Option<Weapon>,
}

impl EquippedWeapons {
    pub const fn none() -> Self {
        Self { weapon: None }
    }

    pub const fn current(&self) -> Option<Weapon> {
        self.weapon
    }

    pub fn is_equipped(&self, weapon: Weapon) -> bool {
        self.weapon == Some(weapon)
    }

    /// Equips `weapon`, returning the weapon it displaced.
    pub fn equip(&mut self, weapon: Weapon) -> Option<Weapon> {
        self.weapon.replace(weapon).filter(|prev| *prev != weapon)
    }

    /// Unequips whatever is held, returning it.
    pub fn clear(&mut self) -> Option<Weapon> {
        self.weapon.take()
    }

    /// Unequips the current weapon if the inventory no longer holds one.
    pub fn release_if_missing(&mut self, inventory: &Inventory) -> Option<Weapon> {
        match self.weapon {
            Some(weapon) if inventory.count(weapon.item()) == 0 => self.weapon.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_one_refuses_to_go_negative() {
        let mut inv = Inventory::new(1, 0, 0);
        assert_eq!(inv.take_one(ItemKind::Bat), Some(0));
        assert_eq!(inv.take_one(ItemKind::Bat), None);
        assert_eq!(inv.bat, 0);
    }

    #[test]
    fn equipping_one_weapon_displaces_the_other() {
        let mut slot = EquippedWeapons::none();
        assert_eq!(slot.equip(Weapon::Bat), None);
        assert_eq!(slot.equip(Weapon::Sword), Some(Weapon::Bat));
        assert!(slot.is_equipped(Weapon::Sword));
        assert!(!slot.is_equipped(Weapon::Bat));
    }

    #[test]
    fn release_if_missing_only_drops_exhausted_weapon() {
        let mut slot = EquippedWeapons::none();
        slot.equip(Weapon::Sword);
        assert_eq!(slot.release_if_missing(&Inventory::new(0, 1, 0)), None);
        assert_eq!(
            slot.release_if_missing(&Inventory::new(2, 0, 0)),
            Some(Weapon::Sword)
        );
        assert_eq!(slot.current(), None);
    }

    #[test]
    fn item_keys_are_camel_case() {
        assert_eq!("stimPack".parse::<ItemKind>(), Ok(ItemKind::StimPack));
        assert_eq!(ItemKind::Bat.to_string(), "bat");
    }
}
