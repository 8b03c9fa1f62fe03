//! Virtual time clock for deterministic runs.
//!
//! Time only moves when `advance_by`/`advance_to` is called, so the whole
//! reveal sequence can be replayed instantly in tests and in the CLI.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Entry for a pending timer.
#[derive(Debug, Clone)]
struct TimerEntry<T> {
    /// When the timer should fire (virtual time in ms)
    fire_at_ms: u64,
    /// Registration order, so timers due at the same instant fire FIFO
    seq: u64,
    payload: T,
}

impl<T> PartialEq for TimerEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at_ms == other.fire_at_ms && self.seq == other.seq
    }
}

impl<T> Eq for TimerEntry<T> {}

impl<T> PartialOrd for TimerEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TimerEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: earliest fire time first, then earliest registration
        other
            .fire_at_ms
            .cmp(&self.fire_at_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A timer that came due, with the virtual time it was due at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub at_ms: u64,
    pub payload: T,
}

pub struct VirtualClock<T> {
    current_time_ms: u64,
    next_seq: u64,
    pending_timers: BinaryHeap<TimerEntry<T>>,
}

impl<T> VirtualClock<T> {
    /// Create a new clock starting at time 0.
    pub fn new() -> Self {
        Self {
            current_time_ms: 0,
            next_seq: 0,
            pending_timers: BinaryHeap::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.current_time_ms
    }

    /// One-shot timer firing `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, payload: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending_timers.push(TimerEntry {
            fire_at_ms: self.current_time_ms.saturating_add(delay_ms),
            seq,
            payload,
        });
    }

    /// Pop the next timer due at or before `target_ms`, moving time to its
    /// deadline. Callers that schedule new timers while handling a fired one
    /// should loop on this instead of `advance_by`, so cascades stay ordered.
    pub fn pop_due(&mut self, target_ms: u64) -> Option<Fired<T>> {
        if self.pending_timers.peek()?.fire_at_ms > target_ms {
            return None;
        }
        let entry = self.pending_timers.pop()?;
        self.current_time_ms = self.current_time_ms.max(entry.fire_at_ms);
        Some(Fired {
            at_ms: entry.fire_at_ms,
            payload: entry.payload,
        })
    }

    /// Advance virtual time by `ms`, returning every timer that fired.
    pub fn advance_by(&mut self, ms: u64) -> Vec<Fired<T>> {
        let target_ms = self.current_time_ms.saturating_add(ms);
        self.advance_to(target_ms)
    }

    pub fn advance_to(&mut self, target_ms: u64) -> Vec<Fired<T>> {
        let mut fired = Vec::new();
        while let Some(entry) = self.pop_due(target_ms) {
            fired.push(entry);
        }
        self.current_time_ms = self.current_time_ms.max(target_ms);
        fired
    }

    /// Get the time until the next timer fires (if any).
    pub fn time_to_next_timer(&self) -> Option<u64> {
        self.pending_timers
            .peek()
            .map(|entry| entry.fire_at_ms.saturating_sub(self.current_time_ms))
    }
}

impl<T> Default for VirtualClock<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero() {
        let clock = VirtualClock::<()>::new();
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn one_shot_fires_once() {
        let mut clock = VirtualClock::new();
        clock.schedule(100, "settle");

        assert!(clock.advance_by(99).is_empty());
        let fired = clock.advance_by(1);
        assert_eq!(fired, [Fired { at_ms: 100, payload: "settle" }]);
        assert_eq!(clock.time_to_next_timer(), None);
    }

    #[test]
    fn same_deadline_fires_in_registration_order() {
        let mut clock = VirtualClock::new();
        clock.schedule(30, 'b');
        clock.schedule(0, 'a');
        clock.schedule(30, 'c');

        let order: Vec<char> = clock.advance_by(30).into_iter().map(|f| f.payload).collect();
        assert_eq!(order, ['a', 'b', 'c']);
    }

    #[test]
    fn time_to_next_timer_counts_from_now() {
        let mut clock = VirtualClock::new();
        clock.schedule(200, ());
        clock.advance_by(50);
        assert_eq!(clock.time_to_next_timer(), Some(150));
        clock.advance_by(150);
        assert_eq!(clock.time_to_next_timer(), None);
    }

    #[test]
    fn far_deadlines_saturate_instead_of_wrapping() {
        let mut clock = VirtualClock::new();
        clock.advance_by(u64::MAX - 10);
        clock.schedule(100, "late");
        assert_eq!(clock.time_to_next_timer(), Some(10));

        let fired = clock.advance_by(u64::MAX);
        assert_eq!(fired, [Fired { at_ms: u64::MAX, payload: "late" }]);
        assert_eq!(clock.now_ms(), u64::MAX);
    }

    #[test]
    fn pop_due_moves_time_to_deadline() {
        let mut clock = VirtualClock::new();
        clock.schedule(40, 1);
        let fired = clock.pop_due(1_000).unwrap();
        assert_eq!(fired.at_ms, 40);
        assert_eq!(clock.now_ms(), 40);
        assert!(clock.pop_due(1_000).is_none());
    }
}
