//! Deferred commits scheduled by Enter.
//!
//! Everything runs on the host's event loop. The host reports the current
//! time through [`DeferredCommits::take_due`]; there is no background
//! thread and no timer of our own.

use crate::controller::FieldEvent;
use std::time::Instant;

/// Cancellation handle for one scheduled commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitHandle(u64);

/// A commit waiting for its due time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingCommit {
    pub handle: CommitHandle,
    pub due: Instant,
    /// Field value captured when Enter was pressed.
    pub value: String,
    pub event: FieldEvent,
}

/// One-shot commits ordered by due time, then by scheduling order.
#[derive(Clone, Debug, Default)]
pub struct DeferredCommits {
    next_id: u64,
    pending: Vec<PendingCommit>,
}

impl DeferredCommits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, value: String, event: FieldEvent, due: Instant) -> CommitHandle {
        let handle = CommitHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        log::debug!(target: "digits.schedule", "schedule {handle:?} for {value:?}");
        self.pending.push(PendingCommit {
            handle,
            due,
            value,
            event,
        });
        handle
    }

    /// Returns `true` if the commit was still pending.
    pub fn cancel(&mut self, handle: CommitHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        let cancelled = self.pending.len() != before;
        if cancelled {
            log::debug!(target: "digits.schedule", "cancel {handle:?}");
        }
        cancelled
    }

    /// Cancel everything; returns how many commits were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    /// Remove and return every commit due at or before `now`.
    pub fn take_due(&mut self, now: Instant) -> Vec<PendingCommit> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = rest;
        due.sort_by_key(|p| (p.due, p.handle));
        due
    }

    /// Earliest due time, for hosts that arm a real timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
