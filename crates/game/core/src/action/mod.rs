//! Intents and system tasks.
//!
//! # Module Structure
//!
//! - `kinds`: player intents (attack, travel, trade, equipment, healing)
//! - `system`: timer-driven follow-up tasks (counter-attacks, victory, revival)
//! - `error`: the rejection taxonomy
//!
//! Every intent implements [`IntentTransition`] and runs through the
//! engine's `pre_validate → apply → post_validate` pipeline. A transition
//! never sleeps: anything that should happen later is returned as a
//! [`FollowUp`] for the scheduler to run once its delay has elapsed.

pub mod error;
pub mod kinds;
pub mod system;

pub use error::IntentError;
pub use kinds::{
    AttackIntent, BuyIntent, EquipIntent, FleeIntent, HealIntent, PayFareIntent, SellIntent,
    TravelIntent, UseConsumableIntent,
};
pub use system::SystemTask;

use crate::combat::AttackKind;
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::state::{EnemyId, GameState, ItemKind, ZoneId};

/// Defines how an intent validates and mutates the game state.
///
/// The hooks receive read-only configuration and randomness through
/// [`GameEnv`]. `apply` may assume `pre_validate` succeeded; the engine
/// restores the previous state if any phase fails.
pub trait IntentTransition {
    /// True when the intent refers to a battle that has already ended.
    ///
    /// Such intents are accepted as no-ops instead of being rejected.
    fn is_noop(&self, _state: &GameState) -> bool {
        false
    }

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), IntentError> {
        Ok(())
    }

    /// Applies the intent and reports what changed.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Outcome, IntentError>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), IntentError> {
        state
            .check_invariants()
            .map_err(IntentError::InvariantViolated)
    }
}

/// A task to run after `delay_ms` of game time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FollowUp {
    pub delay_ms: u64,
    pub task: SystemTask,
}

/// Everything a transition produced besides the state mutation itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outcome {
    pub events: Vec<GameEvent>,
    pub follow_ups: Vec<FollowUp>,
    /// Battle whose already-queued tasks must be dropped.
    pub cancelled_battle: Option<u64>,
}

impl Outcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        self.events.extend(events);
    }

    pub fn schedule(&mut self, delay_ms: u64, task: SystemTask) {
        self.follow_ups.push(FollowUp { delay_ms, task });
    }

    pub fn cancel_battle(&mut self, serial: u64) {
        self.cancelled_battle = Some(serial);
    }

    /// Appends another outcome, keeping event and follow-up order.
    pub fn merge(&mut self, other: Outcome) {
        self.events.extend(other.events);
        self.follow_ups.extend(other.follow_ups);
        if other.cancelled_battle.is_some() {
            self.cancelled_battle = other.cancelled_battle;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.follow_ups.is_empty() && self.cancelled_battle.is_none()
    }
}

/// Player intent issued by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    Attack(AttackIntent),
    Travel(TravelIntent),
    PayFare(PayFareIntent),
    Flee(FleeIntent),
    Buy(BuyIntent),
    Sell(SellIntent),
    Equip(EquipIntent),
    UseConsumable(UseConsumableIntent),
    HealAtHospital(HealIntent),
}

impl Intent {
    pub fn attack(attack: AttackKind, target: EnemyId) -> Self {
        Self::Attack(AttackIntent::new(attack, target))
    }

    pub fn travel(destination: ZoneId) -> Self {
        Self::Travel(TravelIntent::new(destination))
    }

    pub fn pay_fare(destination: ZoneId) -> Self {
        Self::PayFare(PayFareIntent::new(destination))
    }

    pub fn flee() -> Self {
        Self::Flee(FleeIntent)
    }

    pub fn buy(item: ItemKind) -> Self {
        Self::Buy(BuyIntent::new(item))
    }

    pub fn sell(item: ItemKind) -> Self {
        Self::Sell(SellIntent::new(item))
    }

    pub fn equip(item: ItemKind) -> Self {
        Self::Equip(EquipIntent::new(item))
    }

    pub fn use_consumable(item: ItemKind) -> Self {
        Self::UseConsumable(UseConsumableIntent::new(item))
    }

    pub fn heal_at_hospital() -> Self {
        Self::HealAtHospital(HealIntent)
    }

    /// Returns the snake_case name of the intent, for logs.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Intent::Attack(_) => "attack",
            Intent::Travel(_) => "travel",
            Intent::PayFare(_) => "pay_fare",
            Intent::Flee(_) => "flee",
            Intent::Buy(_) => "buy",
            Intent::Sell(_) => "sell",
            Intent::Equip(_) => "equip",
            Intent::UseConsumable(_) => "use_consumable",
            Intent::HealAtHospital(_) => "heal_at_hospital",
        }
    }
}
