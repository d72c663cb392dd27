//! Credits and item transfers between the player and the merchant.
//!
//! Each operation either completes fully or leaves the ledger untouched.
//! They only mutate; turning receipts into events is the caller's job.

use crate::action::IntentError;
use crate::config::PriceList;
use crate::state::{GameState, ItemKind, Weapon};

/// What a completed trade changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TradeReceipt {
    pub item: ItemKind,
    pub price: i64,
    pub player_count: u32,
    pub merchant_count: u32,
    pub credits: i64,
    /// Weapon unequipped because the last unit was sold.
    pub unequipped: Option<Weapon>,
}

/// Checks that `item` can be bought right now without mutating anything.
pub fn check_buy(
    state: &GameState,
    prices: &PriceList,
    item: ItemKind,
) -> Result<i64, IntentError> {
    let price = prices.buy.get(item).ok_or(IntentError::NotForSale(item))?;
    if state.player.credits < price {
        return Err(IntentError::InsufficientCredits {
            needed: price,
            available: state.player.credits,
        });
    }
    if state.merchant_inventory.count(item) == 0 {
        return Err(IntentError::OutOfStock(item));
    }
    Ok(price)
}

/// Buys one unit from the merchant.
pub fn buy(
    state: &mut GameState,
    prices: &PriceList,
    item: ItemKind,
) -> Result<TradeReceipt, IntentError> {
    let price = check_buy(state, prices, item)?;
    let merchant_count = state
        .merchant_inventory
        .take_one(item)
        .ok_or(IntentError::OutOfStock(item))?;
    state.player.credits -= price;
    let player_count = state.player_inventory.add(item, 1);
    Ok(TradeReceipt {
        item,
        price,
        player_count,
        merchant_count,
        credits: state.player.credits,
        unequipped: None,
    })
}

pub fn check_sell(
    state: &GameState,
    prices: &PriceList,
    item: ItemKind,
) -> Result<i64, IntentError> {
    let price = prices.sell.get(item).ok_or(IntentError::NotForSale(item))?;
    if state.player_inventory.count(item) == 0 {
        return Err(IntentError::NothingToSell(item));
    }
    Ok(price)
}

/// Sells one unit to the merchant, unequipping the weapon if it was the last.
pub fn sell(
    state: &mut GameState,
    prices: &PriceList,
    item: ItemKind,
) -> Result<TradeReceipt, IntentError> {
    let price = check_sell(state, prices, item)?;
    let player_count = state
        .player_inventory
        .take_one(item)
        .ok_or(IntentError::NothingToSell(item))?;
    let unequipped = state.equipped.release_if_missing(&state.player_inventory);
    let merchant_count = state.merchant_inventory.add(item, 1);
    state.player.credits += price;
    Ok(TradeReceipt {
        item,
        price,
        player_count,
        merchant_count,
        credits: state.player.credits,
        unequipped,
    })
}

/// Pays a fare out of positive credits; fares never create debt.
pub fn pay_fare(state: &mut GameState, amount: i64) -> Result<i64, IntentError> {
    if state.player.credits < amount {
        return Err(IntentError::InsufficientCredits {
            needed: amount,
            available: state.player.credits,
        });
    }
    state.player.credits -= amount;
    Ok(state.player.credits)
}

/// Charges `amount` unconditionally; the balance may go negative.
pub fn charge_debt(state: &mut GameState, amount: i64) -> i64 {
    state.player.credits -= amount;
    state.player.credits
}
