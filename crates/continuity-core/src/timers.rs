//! Cancellable one-shot timers.
//!
//! Like the rest of the core, timers own no threads: each slot stores a
//! wall-clock deadline and the owner calls [`TimerSlots::tick`] with the
//! current time. Scheduling a kind that is already pending replaces it, so a
//! superseded timer can never fire. Dropping the owner drops every pending
//! deadline with it.

use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct TimerSlots<K: Ord + Copy> {
    pending: BTreeMap<K, u64>,
}

impl<K: Ord + Copy> Default for TimerSlots<K> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> TimerSlots<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `kind` to fire `delay_ms` after `now_ms`, cancelling any pending
    /// deadline of the same kind.
    pub fn schedule(&mut self, kind: K, now_ms: u64, delay_ms: u64) {
        self.pending.insert(kind, now_ms.saturating_add(delay_ms));
    }

    /// Returns whether a pending timer was cancelled.
    pub fn cancel(&mut self, kind: K) -> bool {
        self.pending.remove(&kind).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, kind: K) -> bool {
        self.pending.contains_key(&kind)
    }

    pub fn deadline(&self, kind: K) -> Option<u64> {
        self.pending.get(&kind).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every kind whose deadline is at or before `now_ms`,
    /// earliest first.
    pub fn tick(&mut self, now_ms: u64) -> Vec<K> {
        let mut due: Vec<(u64, K)> = self
            .pending
            .iter()
            .filter(|&(_, &at)| at <= now_ms)
            .map(|(&kind, &at)| (at, kind))
            .collect();
        due.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        for (_, kind) in &due {
            self.pending.remove(kind);
        }
        due.into_iter().map(|(_, kind)| kind).collect()
    }
}
