//! Virtual-clock task queue for deferred battle actions.
//!
//! Tasks carry the battle epoch they were scheduled in. The session bumps
//! the epoch on every battle entry and exit, so a task from a finished
//! battle can never act on a new one.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    EnemyAttack,
    AutoSpin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub due_ms: u64,
    pub battle_epoch: u64,
    pub action: DeferredAction,
    seq: u64,
}

#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    now_ms: u64,
    next_seq: u64,
    tasks: Vec<ScheduledTask>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn has_pending(&self, action: DeferredAction) -> bool {
        self.tasks.iter().any(|t| t.action == action)
    }

    pub fn schedule(&mut self, delay_ms: u64, battle_epoch: u64, action: DeferredAction) {
        let task = ScheduledTask {
            due_ms: self.now_ms + delay_ms,
            battle_epoch,
            action,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.tasks.push(task);
    }

    /// Remove and return the earliest task due at or before `deadline`,
    /// moving the clock to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, deadline: u64) -> Option<ScheduledTask> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= deadline)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(idx, _)| idx)?;
        let task = self.tasks.remove(idx);
        self.now_ms = self.now_ms.max(task.due_ms);
        Some(task)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Latest due time among pending tasks.
    pub fn last_due(&self) -> Option<u64> {
        self.tasks.iter().map(|t| t.due_ms).max()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}
