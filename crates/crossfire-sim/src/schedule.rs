//! Delayed one-shot effects measured in simulation ticks.
//!
//! Every entry carries the epoch that was current when it was scheduled.
//! Bumping the epoch (level start, new game, game over) makes all
//! outstanding entries stale; stale entries are dropped instead of applied.

/// What a scheduled entry does when it comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledKind {
    SpawnCrystal,
    SpawnAmmoPack,
    RecenterPlayer,
}

/// A single pending effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub due_tick: u64,
    pub epoch: u32,
    pub kind: ScheduledKind,
}

/// Pending effects for the current session.
#[derive(Debug, Clone, Default)]
pub struct EventSchedule {
    epoch: u32,
    pending: Vec<ScheduledEvent>,
}

impl EventSchedule {
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Invalidate everything scheduled so far.
    pub fn invalidate(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Schedule `kind` to run during tick `due_tick`.
    pub fn schedule(&mut self, due_tick: u64, kind: ScheduledKind) {
        self.pending.push(ScheduledEvent {
            due_tick,
            epoch: self.epoch,
            kind,
        });
    }

    /// Cancel all pending entries of one kind.
    pub fn cancel(&mut self, kind: ScheduledKind) {
        self.pending.retain(|e| e.kind != kind);
    }

    /// Whether a live (non-stale) entry of `kind` is waiting.
    pub fn is_pending(&self, kind: ScheduledKind) -> bool {
        self.pending
            .iter()
            .any(|e| e.kind == kind && e.epoch == self.epoch)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.pending.iter().filter(|e| e.epoch == self.epoch).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return every live entry due at or before `tick`, in due
    /// order (ties keep scheduling order). Stale entries are discarded.
    pub fn take_due(&mut self, tick: u64) -> Vec<ScheduledKind> {
        let epoch = self.epoch;
        self.pending.retain(|e| e.epoch == epoch);

        let mut due: Vec<ScheduledEvent> = Vec::new();
        self.pending.retain(|e| {
            if e.due_tick <= tick {
                due.push(*e);
                false
            } else {
                true
            }
        });

        due.sort_by_key(|e| e.due_tick);
        due.into_iter().map(|e| e.kind).collect()
    }
}
