//! Deterministic rules of the streets: economy, combat, leveling and travel.
//!
//! `game-core` owns the canonical game state and every rule that mutates it.
//! It performs no I/O and never sleeps. Player intents flow through
//! [`engine::GameEngine`]; anything that should happen later is returned as
//! a follow-up task that [`engine::Session`] fires on a virtual clock.
pub mod action;
pub mod battle;
pub mod combat;
pub mod config;
pub mod encounter;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod ladder;
pub mod ledger;
pub mod state;
pub mod zones;

pub use action::{
    AttackIntent, BuyIntent, EquipIntent, FleeIntent, FollowUp, HealIntent, Intent, IntentError,
    IntentTransition, Outcome, PayFareIntent, SellIntent, SystemTask, TravelIntent,
    UseConsumableIntent,
};
pub use combat::AttackKind;
pub use config::{ConfigError, GameConfig};
pub use engine::{
    GameEngine, Rejection, ScheduledTask, Session, TaskQueue, TransitionPhase,
    TransitionPhaseError,
};
pub use env::{ConstantRng, GameEnv, PcgRng, RngOracle};
pub use error::{ErrorSeverity, GameError};
pub use event::{Combatant, GameEvent, InventoryOwner, Loot, Stat};
pub use state::{
    BattlePhase, CardId, EnemyArchetype, EnemyId, GameState, Inventory, ItemKind, PlayerState,
    Weapon, ZoneId,
};
#[cfg(feature = "serde")]
pub use state::{SnapshotLoad, load_lenient};
pub use zones::visible_cards;
