//! Merchant trade intents.

use crate::action::{IntentError, IntentTransition, Outcome};
use crate::env::GameEnv;
use crate::event::{GameEvent, InventoryOwner};
use crate::ledger::{self, TradeReceipt};
use crate::state::{CardId, GameState, ItemKind};

/// Buys one unit of `item` from the merchant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuyIntent {
    pub item: ItemKind,
}

impl BuyIntent {
    pub fn new(item: ItemKind) -> Self {
        Self { item }
    }
}

impl IntentTransition for BuyIntent {
    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), IntentError> {
        require_merchant(state, env)?;
        ledger::check_buy(state, &env.config().prices, self.item).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Outcome, IntentError> {
        let receipt = ledger::buy(state, &env.config().prices, self.item)?;
        Ok(receipt_events(receipt))
    }
}

/// Sells one unit of `item` to the merchant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SellIntent {
    pub item: ItemKind,
}

impl SellIntent {
    pub fn new(item: ItemKind) -> Self {
        Self { item }
    }
}

impl IntentTransition for SellIntent {
    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), IntentError> {
        require_merchant(state, env)?;
        ledger::check_sell(state, &env.config().prices, self.item).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Outcome, IntentError> {
        let receipt = ledger::sell(state, &env.config().prices, self.item)?;
        Ok(receipt_events(receipt))
    }
}

fn require_merchant(state: &GameState, env: &GameEnv<'_>) -> Result<(), IntentError> {
    if state.in_battle() {
        return Err(IntentError::InBattle);
    }
    let zone = state.zone.current;
    if !env.config().zones.offers(zone, CardId::Merchant) {
        return Err(IntentError::ServiceUnavailable {
            service: CardId::Merchant,
            zone,
        });
    }
    Ok(())
}

fn receipt_events(receipt: TradeReceipt) -> Outcome {
    let mut out = Outcome::new();
    out.push(GameEvent::CreditsChanged {
        value: receipt.credits,
    });
    out.push(GameEvent::InventoryChanged {
        owner: InventoryOwner::Player,
        item: receipt.item,
        count: receipt.player_count,
    });
    out.push(GameEvent::InventoryChanged {
        owner: InventoryOwner::Merchant,
        item: receipt.item,
        count: receipt.merchant_count,
    });
    if let Some(weapon) = receipt.unequipped {
        out.push(GameEvent::EquipmentChanged {
            weapon,
            equipped: false,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::ConstantRng;
    use crate::state::{Inventory, Weapon, ZoneId};

    fn shopper() -> GameState {
        let mut state = GameState::default();
        state.player.hp = 100.0;
        state.zone.current = ZoneId::CyberMarket;
        state
    }

    #[test]
    fn trading_needs_a_merchant() {
        let config = GameConfig::default();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = shopper();
        state.zone.current = ZoneId::Hospital;
        assert_eq!(
            BuyIntent::new(ItemKind::StimPack).pre_validate(&state, &env),
            Err(IntentError::ServiceUnavailable {
                service: CardId::Merchant,
                zone: ZoneId::Hospital
            })
        );
    }

    #[test]
    fn buying_a_stim_pack_moves_credits_and_stock() {
        let config = GameConfig::default();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = shopper();
        state.player.credits = 20;

        let intent = BuyIntent::new(ItemKind::StimPack);
        intent.pre_validate(&state, &env).unwrap();
        let out = intent.apply(&mut state, &env).unwrap();

        assert_eq!(state.player.credits, 5);
        assert_eq!(state.player_inventory.stim_pack, 1);
        assert_eq!(state.merchant_inventory.stim_pack, 9);
        assert_eq!(out.events.len(), 3);
    }

    #[test]
    fn selling_the_last_sword_unequips_it() {
        let config = GameConfig::default();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = shopper();
        state.player_inventory = Inventory::new(0, 1, 0);
        state.equipped.equip(Weapon::Sword);

        let out = SellIntent::new(ItemKind::Sword)
            .apply(&mut state, &env)
            .unwrap();
        assert_eq!(state.player.credits, 15);
        assert_eq!(state.equipped.current(), None);
        assert!(out.events.contains(&GameEvent::EquipmentChanged {
            weapon: Weapon::Sword,
            equipped: false
        }));
    }

    #[test]
    fn stim_packs_cannot_be_sold() {
        let config = GameConfig::default();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = shopper();
        state.player_inventory = Inventory::new(0, 0, 2);
        assert_eq!(
            SellIntent::new(ItemKind::StimPack).pre_validate(&state, &env),
            Err(IntentError::NotForSale(ItemKind::StimPack))
        );
    }
}
