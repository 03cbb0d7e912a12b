//! Ticker: the single periodic step timer.
//!
//! Models the game's interval timer explicitly instead of relying on a
//! platform callback. There is never more than one scheduled tick: every
//! [`Ticker::reschedule`] replaces whatever was pending, so changing speed or
//! restarting cannot leave a second timer behind.
//!
//! Time is an opaque monotonic millisecond counter supplied by the caller,
//! which keeps the ticker deterministic under test.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ticker {
    interval_ms: u32,
    next_due_ms: Option<u64>,
    /// Incremented on every reschedule/cancel; lets callers detect that the
    /// timer they observed has been replaced.
    generation: u32,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the pending tick (if any) and schedule the next one `interval_ms`
    /// after `now_ms`.
    ///
    /// Calling this twice with the same arguments leaves the ticker in the same state.
    pub fn reschedule(&mut self, interval_ms: u32, now_ms: u64) {
        let due = now_ms.saturating_add(interval_ms as u64);
        if self.interval_ms == interval_ms && self.next_due_ms == Some(due) {
            return;
        }
        self.interval_ms = interval_ms;
        self.next_due_ms = Some(due);
        self.generation = self.generation.wrapping_add(1);
    }

    /// Stop ticking. No further [`poll`](Self::poll) returns true until rescheduled.
    pub fn cancel(&mut self) {
        if self.next_due_ms.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
    }

    pub fn is_active(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.next_due_ms
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Milliseconds until the next tick, `Some(0)` if overdue, `None` if idle.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.next_due_ms.map(|due| due.saturating_sub(now_ms))
    }

    /// Consume one due tick.
    ///
    /// Returns true at most once per call. The next deadline is one interval after
    /// the deadline that fired, like a fixed-rate interval timer. If the caller
    /// fell more than one interval behind, the backlog is dropped rather than
    /// replayed in a burst.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let Some(due) = self.next_due_ms else {
            return false;
        };
        if now_ms < due {
            return false;
        }

        let interval = self.interval_ms.max(1) as u64;
        let mut next = due + interval;
        if next <= now_ms {
            next = now_ms + interval;
        }
        self.next_due_ms = Some(next);
        true
    }
}
