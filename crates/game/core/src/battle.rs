//! Battle state machine.
//!
//! ```text
//! Spawned ─▶ Active ─┬─▶ Victory ─▶ (arrival at pending destination)
//!                    ├─▶ Defeat  ─▶ (hospital, revival)
//!                    └─▶ Fled    ─▶ (previous location)
//! ```
//!
//! `Spawned` is transient: a battle becomes `Active` in the same transition
//! that spawns its enemies. Every step after the player's attack runs as a
//! scheduled [`SystemTask`] tagged with the battle serial, and each task
//! re-checks serial and phase when it fires. A task left over from a battle
//! that already ended therefore does nothing.

use tracing::{debug, info};

use crate::action::system::arrive_and_settle;
use crate::action::{IntentError, Outcome, SystemTask};
use crate::combat::{self, AttackKind};
use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::event::{Combatant, GameEvent, InventoryOwner, Loot, Stat};
use crate::ladder;
use crate::ledger;
use crate::state::{BattlePhase, EnemyArchetype, EnemyId, GameState, Inventory, ItemKind, ZoneId};

/// Opens a battle and fills the arena with `count` enemies of one archetype.
///
/// Returns the battle serial and how many enemies fit in the arena.
pub fn spawn_battle(
    state: &mut GameState,
    config: &GameConfig,
    archetype: EnemyArchetype,
    count: u32,
) -> (u64, u32) {
    state.enemies.purge();
    state.counters.reset();
    let serial = state.begin_battle(archetype);
    let hp = config.enemies.stats(archetype).hp;

    let mut spawned = 0;
    for _ in 0..count {
        if state.enemies.spawn(archetype, hp).is_none() {
            break;
        }
        state.counters.record(archetype);
        spawned += 1;
    }
    info!(serial, spawned, %archetype, "battle started");
    (serial, spawned)
}

fn is_phase(state: &GameState, serial: u64, phase: BattlePhase) -> bool {
    state
        .battle
        .is_some_and(|battle| battle.serial == serial && battle.phase == phase)
}

/// True once the most recent battle is decided: it reached a terminal phase,
/// or every enemy is down and the victory is only waiting for its timer.
///
/// `attack` and `flee` issued in that window are accepted as no-ops.
pub fn is_after_battle(state: &GameState) -> bool {
    match state.battle {
        Some(battle) if battle.phase.is_terminal() => true,
        Some(_) => !state.enemies.any_alive() && !state.player.is_down(),
        None => false,
    }
}

/// Checks that the player may attack `target` now.
pub fn validate_attack(state: &GameState, target: EnemyId) -> Result<u64, IntentError> {
    let battle = state.active_battle().ok_or(IntentError::NoActiveBattle)?;
    if state.player.is_down() {
        return Err(IntentError::PlayerDefeated);
    }
    let enemy = state
        .enemies
        .get(target)
        .ok_or(IntentError::InvalidTarget(target))?;
    if enemy.is_down() {
        return Err(IntentError::TargetAlreadyDown(target));
    }
    Ok(battle.serial)
}

/// Resolves a player attack.
///
/// A lethal hit queues the enemy's retirement; any other hit queues the
/// target's counter-attack.
pub fn player_attack(
    state: &mut GameState,
    env: &GameEnv<'_>,
    attack: AttackKind,
    target: EnemyId,
) -> Result<Outcome, IntentError> {
    let serial = validate_attack(state, target)?;
    let config = env.config();
    let damage = combat::calculate_damage(state, env, attack);

    let enemy = state
        .enemies
        .get_mut(target)
        .ok_or(IntentError::InvalidTarget(target))?;
    let dealt = enemy.take_damage(damage);
    let down = enemy.is_down();

    let mut out = Outcome::new();
    out.push(GameEvent::DamageDealt {
        target: Combatant::Enemy(target),
        amount: f64::from(dealt),
        blocked: 0.0,
    });

    let (stat, growth) = match attack {
        AttackKind::Melee => (Stat::Strength, config.skill_growth.melee),
        AttackKind::Ranged => (Stat::Ranged, config.skill_growth.ranged),
    };
    out.extend(combat::improve_stat(&mut state.player, stat, growth));

    if down {
        out.schedule(
            config.timings.retire_enemy_ms,
            SystemTask::RetireEnemy {
                battle: serial,
                enemy: target,
            },
        );
    } else {
        out.schedule(
            config.timings.counter_attack_ms,
            SystemTask::CounterAttack {
                battle: serial,
                enemy: target,
            },
        );
    }
    debug!(serial, %target, %attack, dealt, down, "player attack resolved");
    Ok(out)
}

/// The attacked enemy strikes back.
pub fn counter_attack(
    state: &mut GameState,
    env: &GameEnv<'_>,
    serial: u64,
    attacker: EnemyId,
) -> Outcome {
    let mut out = Outcome::new();
    if !is_phase(state, serial, BattlePhase::Active) || state.player.is_down() {
        return out;
    }
    let Some(enemy) = state
        .enemies
        .get(attacker)
        .filter(|enemy| !enemy.is_down())
        .copied()
    else {
        return out;
    };

    let config = env.config();
    let hit = combat::roll_enemy_hit(state, env, &enemy);
    state.player.take_damage(hit.dealt);
    out.push(GameEvent::DamageDealt {
        target: Combatant::Player,
        amount: hit.dealt,
        blocked: hit.blocked,
    });
    out.extend(combat::improve_stat(
        &mut state.player,
        Stat::Defense,
        config.skill_growth.defense * hit.dealt,
    ));

    if state.player.is_down() {
        out.schedule(
            config.timings.declare_defeat_ms,
            SystemTask::DeclareDefeat { battle: serial },
        );
    }
    out
}

/// Removes a downed enemy from the arena; the last removal queues victory.
pub fn retire_enemy(
    state: &mut GameState,
    env: &GameEnv<'_>,
    serial: u64,
    id: EnemyId,
) -> Outcome {
    let mut out = Outcome::new();
    if !is_phase(state, serial, BattlePhase::Active) {
        return out;
    }
    if !state.enemies.get(id).is_some_and(|enemy| enemy.is_down()) {
        return out;
    }
    state.enemies.retire(id);
    out.push(GameEvent::EnemyDefeated { id });

    if state.enemies.is_empty() {
        out.schedule(
            env.config().timings.declare_victory_ms,
            SystemTask::DeclareVictory { battle: serial },
        );
    }
    out
}

/// Ends the battle in victory and hands out loot.
///
/// Every club punk drops a bat and every sword punk a sword.
pub fn declare_victory(state: &mut GameState, env: &GameEnv<'_>, serial: u64) -> Outcome {
    let mut out = Outcome::new();
    if !is_phase(state, serial, BattlePhase::Active) || state.enemies.any_alive() {
        return out;
    }

    let loot = Loot {
        bats: state.counters.club_count(),
        swords: state.counters.sword_count,
    };
    for (item, amount) in [(ItemKind::Bat, loot.bats), (ItemKind::Sword, loot.swords)] {
        if amount > 0 {
            let count = state.player_inventory.add(item, amount);
            out.push(GameEvent::InventoryChanged {
                owner: InventoryOwner::Player,
                item,
                count,
            });
        }
    }
    state.counters.reset();
    state.enemies.purge();
    state.end_battle(BattlePhase::Victory);
    out.push(GameEvent::BattleEnded {
        outcome: BattlePhase::Victory,
        loot,
    });
    out.schedule(
        env.config().timings.complete_victory_ms,
        SystemTask::CompleteVictory { battle: serial },
    );
    info!(serial, bats = loot.bats, swords = loot.swords, "battle won");
    out
}

/// Leaves the battlefield after a victory.
///
/// Goes to the pending destination if one was recorded, else to the
/// fallback street when standing in the battle zone, else stays put and
/// re-shows the current zone.
pub fn complete_victory(state: &mut GameState, env: &GameEnv<'_>, serial: u64) -> Outcome {
    let mut out = Outcome::new();
    let unresolved = state.battle.is_some_and(|battle| !battle.resolved);
    if !is_phase(state, serial, BattlePhase::Victory) || !unresolved {
        return out;
    }
    let config = env.config();
    let destination = match state.zone.pending_destination.take() {
        Some(zone) => zone,
        None if state.zone.current == ZoneId::Battle => config.zones.fallback_street,
        None => state.zone.current,
    };
    state.resolve_battle();
    arrive_and_settle(state, config, destination, &mut out);
    out
}

/// Ends the battle in defeat.
///
/// The punks take every positive credit and every item; debt is left as it
/// was. The player is carried to the hospital and revived later.
pub fn declare_defeat(state: &mut GameState, env: &GameEnv<'_>, serial: u64) -> Outcome {
    let mut out = Outcome::new();
    if !is_phase(state, serial, BattlePhase::Active) || !state.player.is_down() {
        return out;
    }
    let config = env.config();

    let credits = state.player.credits.max(0);
    if credits > 0 {
        state.player.credits = 0;
    }
    let items = state.player_inventory;
    state.player_inventory = Inventory::empty();
    let unequipped = state.equipped.clear();

    state.enemies.purge();
    state.counters.reset();
    state.end_battle(BattlePhase::Defeat);
    state.zone.previous = None;
    state.zone.pending_destination = None;
    state.pending_revival = true;

    out.cancel_battle(serial);
    out.push(GameEvent::BattleEnded {
        outcome: BattlePhase::Defeat,
        loot: Loot::default(),
    });
    out.push(GameEvent::Confiscated { credits, items });
    if credits > 0 {
        out.push(GameEvent::CreditsChanged { value: 0 });
    }
    for (item, _) in items.held() {
        out.push(GameEvent::InventoryChanged {
            owner: InventoryOwner::Player,
            item,
            count: 0,
        });
    }
    if let Some(weapon) = unequipped {
        out.push(GameEvent::EquipmentChanged {
            weapon,
            equipped: false,
        });
    }
    arrive_and_settle(state, config, ZoneId::Hospital, &mut out);
    out.schedule(config.timings.revive_ms, SystemTask::Revive { battle: serial });
    info!(serial, credits, "battle lost");
    out
}

/// Wakes the player in the hospital: full heal through the ladder, billed as debt.
pub fn revive(state: &mut GameState, env: &GameEnv<'_>, serial: u64) -> Outcome {
    let mut out = Outcome::new();
    if !state.pending_revival || !is_phase(state, serial, BattlePhase::Defeat) {
        return out;
    }
    let debt = ledger::charge_debt(state, env.config().prices.heal);
    let report = ladder::full_heal(&mut state.player);
    state.pending_revival = false;
    state.resolve_battle();

    out.extend(report.events);
    out.push(GameEvent::CreditsChanged { value: debt });
    out.push(GameEvent::Revived { debt });
    out
}

/// Checks that the player may flee now.
pub fn validate_flee(state: &GameState) -> Result<u64, IntentError> {
    let battle = state.active_battle().ok_or(IntentError::NoActiveBattle)?;
    if state.player.is_down() {
        return Err(IntentError::PlayerDefeated);
    }
    if !state.enemies.any_alive() {
        return Err(IntentError::NoActiveBattle);
    }
    Ok(battle.serial)
}

/// Abandons the battle: no loot, no losses.
///
/// Returns to where the player came from, falling back to the pending
/// destination and then the hospital. Both are cleared.
pub fn flee(state: &mut GameState, env: &GameEnv<'_>) -> Result<Outcome, IntentError> {
    let serial = validate_flee(state)?;
    let mut out = Outcome::new();

    state.enemies.purge();
    state.counters.reset();
    state.end_battle(BattlePhase::Fled);
    state.resolve_battle();

    let pending = state.zone.pending_destination.take();
    let destination = state
        .zone
        .previous
        .take()
        .or(pending)
        .unwrap_or(ZoneId::Hospital);

    out.cancel_battle(serial);
    out.push(GameEvent::BattleEnded {
        outcome: BattlePhase::Fled,
        loot: Loot::default(),
    });
    arrive_and_settle(state, env.config(), destination, &mut out);
    info!(serial, %destination, "fled from battle");
    Ok(out)
}
