pub mod combat;
pub mod hospital;
pub mod inventory;
pub mod trade;
pub mod travel;

pub use combat::{AttackIntent, FleeIntent};
pub use hospital::HealIntent;
pub use inventory::{EquipIntent, UseConsumableIntent};
pub use trade::{BuyIntent, SellIntent};
pub use travel::{PayFareIntent, TravelIntent};
