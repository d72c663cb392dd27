//! Combat resolution.
//!
//! Pure functions over the state: damage rolls, damage application and
//! use-based skill growth. Battle sequencing lives in [`crate::battle`].

pub mod damage;
pub mod skill;

pub use damage::{AttackKind, EnemyHit, calculate_damage, melee_bonus, roll_enemy_hit};
pub use skill::improve_stat;
