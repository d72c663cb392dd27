//! Virtual-time queue of follow-up tasks.

use std::collections::BTreeMap;

use crate::action::{FollowUp, SystemTask};

/// A task together with the virtual time it becomes due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTask {
    pub due_ms: u64,
    pub task: SystemTask,
}

/// Tasks ordered by due time, then by the order they were queued.
///
/// The queue keeps its own millisecond clock. It never sleeps; callers move
/// the clock forward and pop whatever became due.
#[derive(Clone, Debug, Default)]
pub struct TaskQueue {
    now_ms: u64,
    next_seq: u64,
    entries: BTreeMap<(u64, u64), SystemTask>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queues `task` to run `delay_ms` after the current time.
    pub fn push(&mut self, delay_ms: u64, task: SystemTask) -> u64 {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        self.entries.insert((due_ms, self.next_seq), task);
        self.next_seq += 1;
        due_ms
    }

    pub fn extend(&mut self, follow_ups: impl IntoIterator<Item = FollowUp>) {
        for follow_up in follow_ups {
            self.push(follow_up.delay_ms, follow_up.task);
        }
    }

    /// Drops every queued task tagged with `serial`. Returns how many were dropped.
    pub fn cancel_battle(&mut self, serial: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, task| task.battle() != Some(serial));
        before - self.entries.len()
    }

    /// Due time of the earliest queued task.
    pub fn next_due(&self) -> Option<u64> {
        self.entries.keys().next().map(|(due_ms, _)| *due_ms)
    }

    /// Removes the earliest task due at or before `until`, moving the clock to its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<ScheduledTask> {
        let (&(due_ms, seq), _) = self.entries.iter().next()?;
        if due_ms > until {
            return None;
        }
        let task = self.entries.remove(&(due_ms, seq))?;
        self.now_ms = self.now_ms.max(due_ms);
        Some(ScheduledTask { due_ms, task })
    }

    /// Moves the clock forward. Time never runs backwards.
    pub fn advance_clock(&mut self, to_ms: u64) {
        self.now_ms = self.now_ms.max(to_ms);
    }

    pub fn iter(&self) -> impl Iterator<Item = ScheduledTask> + '_ {
        self.entries
            .iter()
            .map(|(&(due_ms, _), &task)| ScheduledTask { due_ms, task })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
