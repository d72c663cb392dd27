//! Timer-driven tasks that advance the game without player input.
//!
//! Tasks are created by transitions as [`FollowUp`](super::FollowUp)s and
//! executed by the scheduler once their delay has elapsed. Battle tasks carry
//! the serial of the battle that scheduled them and turn into no-ops when
//! that battle has since ended, so a stale timer can never double-spawn,
//! double-loot or revive twice.
//!
//! - Counter-attacks, retirements, victory and defeat (see [`crate::battle`])
//! - Arrival settling
//! - The opening introduction

mod arrival;
mod introduction;

pub(crate) use arrival::arrive_and_settle;

use crate::battle;
use crate::env::GameEnv;
use crate::state::{BattlePhase, EnemyId, GameState, ZoneId};

use super::{FollowUp, Outcome};

/// Deferred work queued by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SystemTask {
    /// An enemy that survived a hit strikes back.
    CounterAttack { battle: u64, enemy: EnemyId },
    /// A downed enemy leaves the arena.
    RetireEnemy { battle: u64, enemy: EnemyId },
    DeclareVictory { battle: u64 },
    /// Leave the battlefield after the victory banner.
    CompleteVictory { battle: u64 },
    DeclareDefeat { battle: u64 },
    /// Hospital revival after a defeat.
    Revive { battle: u64 },
    /// Ends the arrival window during which cards may not be used.
    SettleArrival { zone: ZoneId },
    /// Wakes the player up at the start of a new game.
    Introduction,
}

impl SystemTask {
    /// Battle the task belongs to, if any.
    pub fn battle(&self) -> Option<u64> {
        match *self {
            SystemTask::CounterAttack { battle, .. }
            | SystemTask::RetireEnemy { battle, .. }
            | SystemTask::DeclareVictory { battle }
            | SystemTask::CompleteVictory { battle }
            | SystemTask::DeclareDefeat { battle }
            | SystemTask::Revive { battle } => Some(battle),
            SystemTask::SettleArrival { .. } | SystemTask::Introduction => None,
        }
    }

    pub fn as_snake_case(&self) -> &'static str {
        match self {
            SystemTask::CounterAttack { .. } => "counter_attack",
            SystemTask::RetireEnemy { .. } => "retire_enemy",
            SystemTask::DeclareVictory { .. } => "declare_victory",
            SystemTask::CompleteVictory { .. } => "complete_victory",
            SystemTask::DeclareDefeat { .. } => "declare_defeat",
            SystemTask::Revive { .. } => "revive",
            SystemTask::SettleArrival { .. } => "settle_arrival",
            SystemTask::Introduction => "introduction",
        }
    }

    /// Runs the task. A task whose guard no longer holds returns an empty outcome.
    pub fn run(&self, state: &mut GameState, env: &GameEnv<'_>) -> Outcome {
        match *self {
            SystemTask::CounterAttack { battle, enemy } => {
                battle::counter_attack(state, env, battle, enemy)
            }
            SystemTask::RetireEnemy { battle, enemy } => {
                battle::retire_enemy(state, env, battle, enemy)
            }
            SystemTask::DeclareVictory { battle } => battle::declare_victory(state, env, battle),
            SystemTask::CompleteVictory { battle } => battle::complete_victory(state, env, battle),
            SystemTask::DeclareDefeat { battle } => battle::declare_defeat(state, env, battle),
            SystemTask::Revive { battle } => battle::revive(state, env, battle),
            SystemTask::SettleArrival { zone } => arrival::settle(state, zone),
            SystemTask::Introduction => introduction::introduce(state, env),
        }
    }

    /// Tasks a freshly loaded snapshot still owes.
    ///
    /// Timers do not survive a restart, so every pending step of the battle
    /// state machine is re-queued with its normal delay.
    pub fn pending_after_load(state: &GameState, env: &GameEnv<'_>) -> Vec<FollowUp> {
        let timings = &env.config().timings;
        let mut tasks = Vec::new();
        let mut push = |delay_ms, task| tasks.push(FollowUp { delay_ms, task });

        if introduction::is_pending(state) {
            push(timings.introduction_ms, SystemTask::Introduction);
        }
        if state.zone.settling {
            push(timings.settle_ms, SystemTask::SettleArrival {
                zone: state.zone.current,
            });
        }

        let Some(record) = state.battle else {
            return tasks;
        };
        let serial = record.serial;
        match record.phase {
            BattlePhase::Active => {
                for enemy in state.enemies.iter().filter(|enemy| enemy.is_down()) {
                    push(timings.retire_enemy_ms, SystemTask::RetireEnemy {
                        battle: serial,
                        enemy: enemy.id,
                    });
                }
                if state.enemies.is_empty() {
                    push(timings.declare_victory_ms, SystemTask::DeclareVictory {
                        battle: serial,
                    });
                }
                if state.player.is_down() {
                    push(timings.declare_defeat_ms, SystemTask::DeclareDefeat {
                        battle: serial,
                    });
                }
            }
            BattlePhase::Victory if !record.resolved => {
                push(timings.complete_victory_ms, SystemTask::CompleteVictory {
                    battle: serial,
                });
            }
            BattlePhase::Defeat if state.pending_revival => {
                push(timings.revive_ms, SystemTask::Revive { battle: serial });
            }
            _ => {}
        }
        tasks
    }
}
