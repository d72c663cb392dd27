pub mod common;
pub mod enemy;
pub mod item;
pub mod player;
pub mod zone;

pub use common::{EnemyId, PLAYER_ACTOR, ParseEnemyIdError};
pub use enemy::{BattleCounters, BattlePhase, BattleRecord, Enemy, EnemyArchetype, EnemyRoster};
pub use item::{EquippedWeapons, Inventory, ItemKind, Weapon};
pub use player::PlayerState;
pub use zone::{CardId, ZoneId, ZoneState};
