//! One game: its state plus the timers it is waiting on.

use tracing::{debug, trace};

use crate::action::{Intent, Outcome, SystemTask};
use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::state::GameState;

use super::{GameEngine, Rejection, TaskQueue};

/// Upper bound on tasks run by a single [`Session::run_until_idle`].
const MAX_IDLE_STEPS: usize = 10_000;

/// Owns a [`GameState`] and its [`TaskQueue`].
///
/// Intents are applied immediately; their follow-ups fire when the virtual
/// clock is advanced past their due time. Outcomes that end a battle drop
/// the battle's queued tasks before anything new is queued.
#[derive(Clone, Debug)]
pub struct Session {
    state: GameState,
    queue: TaskQueue,
}

impl Session {
    /// Wraps an existing state without queuing anything.
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            queue: TaskQueue::new(),
        }
    }

    /// Starts a fresh game; the introduction fires after its delay.
    pub fn start_new_game(game_seed: u64, config: &GameConfig) -> Self {
        let mut session = Self::new(GameState::new_game(game_seed, config));
        session
            .queue
            .push(config.timings.introduction_ms, SystemTask::Introduction);
        session
    }

    /// Continues a loaded snapshot, re-queuing every step it still owes.
    pub fn resume(state: GameState, env: GameEnv<'_>) -> Self {
        let mut session = Self::new(state);
        let pending = SystemTask::pending_after_load(&session.state, &env);
        debug!(tasks = pending.len(), "resuming session");
        session.queue.extend(pending);
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.queue.now_ms()
    }

    /// Milliseconds until the next queued task, `None` when idle.
    pub fn next_due_in(&self) -> Option<u64> {
        self.queue
            .next_due()
            .map(|due| due.saturating_sub(self.queue.now_ms()))
    }

    /// Applies a player intent and queues its follow-ups.
    pub fn submit(
        &mut self,
        env: GameEnv<'_>,
        intent: &Intent,
    ) -> Result<Vec<GameEvent>, Rejection> {
        let outcome = GameEngine::new(&mut self.state).execute(env, intent)?;
        Ok(self.absorb(outcome))
    }

    /// Advances the clock by `delta_ms`, running every task that falls due.
    pub fn advance(&mut self, env: GameEnv<'_>, delta_ms: u64) -> Vec<GameEvent> {
        let target = self.queue.now_ms().saturating_add(delta_ms);
        self.advance_to(env, target)
    }

    /// Advances the clock to `target_ms`.
    ///
    /// Tasks queued by tasks that run here also fire if they fall due before
    /// `target_ms`.
    pub fn advance_to(&mut self, env: GameEnv<'_>, target_ms: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(scheduled) = self.queue.pop_due(target_ms) {
            trace!(
                due_ms = scheduled.due_ms,
                task = scheduled.task.as_snake_case(),
                "task due"
            );
            let outcome = GameEngine::new(&mut self.state).run_task(env, &scheduled.task);
            events.extend(self.absorb(outcome));
        }
        self.queue.advance_clock(target_ms);
        events
    }

    /// Runs queued tasks until none are left.
    pub fn run_until_idle(&mut self, env: GameEnv<'_>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..MAX_IDLE_STEPS {
            let Some(due) = self.queue.next_due() else {
                break;
            };
            events.extend(self.advance_to(env, due));
        }
        events
    }

    /// Releases the state, dropping any queued tasks.
    pub fn into_state(self) -> GameState {
        self.state
    }

    fn absorb(&mut self, outcome: Outcome) -> Vec<GameEvent> {
        if let Some(serial) = outcome.cancelled_battle {
            let dropped = self.queue.cancel_battle(serial);
            if dropped > 0 {
                debug!(serial, dropped, "cancelled queued battle tasks");
            }
        }
        self.queue.extend(outcome.follow_ups);
        outcome.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::AttackKind;
    use crate::env::ConstantRng;
    use crate::state::{BattlePhase, EnemyId, ZoneId};

    #[test]
    fn new_game_wakes_up_after_the_introduction_delay() {
        let config = GameConfig::default();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut session = Session::start_new_game(1, &config);

        assert!(session.advance(env, 1_000).is_empty());
        let events = session.advance(env, 500);
        assert!(events.contains(&GameEvent::IntroductionCompleted));
        assert_eq!(session.state().player.max_hp, 101.0);
    }

    #[test]
    fn full_fight_timeline_ends_on_the_pending_destination() {
        let config = GameConfig::default().with_encounter_chance(1.0);
        // Minimum rolls: one club punk and 8-point counters.
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut session = Session::start_new_game(1, &config);
        session.run_until_idle(env);

        session
            .submit(env, &Intent::travel(ZoneId::Streets))
            .unwrap();
        assert_eq!(session.state().zone.current, ZoneId::Battle);

        let mut swings = 0;
        while session.state().enemies.any_alive() {
            session
                .submit(env, &Intent::attack(AttackKind::Melee, EnemyId(1)))
                .unwrap();
            session.run_until_idle(env);
            swings += 1;
        }
        // 15 rolled plus 1 strength per swing; strength stays below 2 throughout.
        assert_eq!(swings, 7);

        let state = session.state();
        assert_eq!(state.battle.map(|battle| battle.phase), Some(BattlePhase::Victory));
        assert_eq!(state.player_inventory.bat, 1);
        assert_eq!(state.zone.current, ZoneId::Streets);
        assert_eq!(state.zone.pending_destination, None);
        assert!(!state.zone.settling);
        assert!(session.queue().is_empty());
    }

    #[test]
    fn flee_cancels_the_queued_counter_attack() {
        let config = GameConfig::default().with_encounter_chance(1.0);
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut session = Session::start_new_game(1, &config);
        session.run_until_idle(env);
        session
            .submit(env, &Intent::travel(ZoneId::Streets))
            .unwrap();

        session
            .submit(env, &Intent::attack(AttackKind::Melee, EnemyId(1)))
            .unwrap();
        let hp = session.state().player.hp;
        session.submit(env, &Intent::flee()).unwrap();
        assert!(session
            .queue()
            .iter()
            .all(|scheduled| scheduled.task.battle().is_none()));

        session.run_until_idle(env);
        assert_eq!(session.state().player.hp, hp);
        assert_eq!(session.state().zone.current, ZoneId::Hospital);

        // Repeating the flee is harmless.
        let before = session.state().clone();
        assert!(session.submit(env, &Intent::flee()).unwrap().is_empty());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn doctor_is_closed_until_the_introduction_wakes_the_player() {
        let config = GameConfig::default();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut session = Session::start_new_game(1, &config);

        let rejection = session
            .submit(env, &Intent::heal_at_hospital())
            .unwrap_err();
        assert_eq!(rejection.error, crate::action::IntentError::PlayerDefeated);

        let events = session.advance(env, config.timings.introduction_ms);
        assert!(events.contains(&GameEvent::IntroductionCompleted));
        assert_eq!(session.state().player.credits, -10);
    }

    #[test]
    fn blackout_after_defeat_bills_the_revival_once() {
        let config = GameConfig::default();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = GameState::default();
        state.player.hp = 0.0;
        state.player.credits = -10;
        let serial = state.begin_battle(crate::state::EnemyArchetype::Club);
        crate::battle::declare_defeat(&mut state, &env, serial);
        assert!(state.pending_revival);

        let mut session = Session::resume(state, env);
        let rejection = session
            .submit(env, &Intent::heal_at_hospital())
            .unwrap_err();
        assert_eq!(rejection.error, crate::action::IntentError::PlayerDefeated);

        let events = session.run_until_idle(env);
        assert!(events.contains(&GameEvent::Revived { debt: -20 }));
        assert_eq!(session.state().player.credits, -20);
        assert_eq!(session.state().player.hp, session.state().player.max_hp);
    }

    #[test]
    fn resume_replays_an_interrupted_victory() {
        let config = GameConfig::default();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = GameState::default();
        state.player.hp = 50.0;
        state.begin_battle(crate::state::EnemyArchetype::Club);
        state.end_battle(BattlePhase::Victory);
        state.zone.current = ZoneId::Battle;
        state.zone.pending_destination = Some(ZoneId::CyberMarket);

        let mut session = Session::resume(state, env);
        session.run_until_idle(env);
        assert_eq!(session.state().zone.current, ZoneId::CyberMarket);
        assert!(session.state().battle.is_some_and(|battle| battle.resolved));
    }
}
