//! Deferred timers
//!
//! The engine never owns a clock. It hands out [`TimerToken`]s and asks the
//! host to schedule or cancel them; when a timer elapses the host feeds the
//! token back to the engine.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for a scheduled timer
///
/// Tokens from [`TimerToken::next`] are unique within the process, so one
/// scheduler can serve many comboboxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

impl TimerToken {
    /// Allocate a fresh token
    pub fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// Host timer facility
pub trait Scheduler {
    /// Schedule `token` to elapse after `delay`
    ///
    /// Scheduling a token that is already pending replaces it.
    fn schedule(&mut self, token: TimerToken, delay: Duration);

    /// Cancel a pending timer. Unknown tokens are ignored.
    fn cancel(&mut self, token: TimerToken);
}

/// A timer waiting in a [`ManualScheduler`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub token: TimerToken,
    pub delay: Duration,
}

/// Scheduler driven explicitly by the caller
///
/// Nothing elapses until [`ManualScheduler::take_due`] is called, which
/// makes timer ordering deterministic in tests.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    pending: Vec<ScheduledTimer>,
    scheduled_count: usize,
    cancelled_count: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timers that have been scheduled and neither cancelled nor taken
    pub fn pending(&self) -> &[ScheduledTimer] {
        &self.pending
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Total number of `schedule` calls
    pub fn scheduled_count(&self) -> usize {
        self.scheduled_count
    }

    /// Number of `cancel` calls that removed a pending timer
    pub fn cancelled_count(&self) -> usize {
        self.cancelled_count
    }

    /// Remove and return every pending timer, shortest delay first
    pub fn take_due(&mut self) -> Vec<TimerToken> {
        let mut due = std::mem::take(&mut self.pending);
        due.sort_by_key(|t| t.delay);
        due.into_iter().map(|t| t.token).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        self.pending.retain(|t| t.token != token);
        self.pending.push(ScheduledTimer { token, delay });
        self.scheduled_count += 1;
        tracing::trace!("scheduled timer {:?} after {:?}", token, delay);
    }

    fn cancel(&mut self, token: TimerToken) {
        let before = self.pending.len();
        self.pending.retain(|t| t.token != token);
        if self.pending.len() < before {
            self.cancelled_count += 1;
            tracing::trace!("cancelled timer {:?}", token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_and_take() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(TimerToken(2), Duration::from_millis(10));
        scheduler.schedule(TimerToken(1), Duration::ZERO);

        assert_eq!(scheduler.take_due(), vec![TimerToken(1), TimerToken(2)]);
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.scheduled_count(), 2);
    }

    #[test]
    fn test_cancel_removes_pending() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(TimerToken(7), Duration::ZERO);
        scheduler.cancel(TimerToken(7));
        scheduler.cancel(TimerToken(8));

        assert!(scheduler.is_idle());
        assert_eq!(scheduler.cancelled_count(), 1);
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = TimerToken::next();
        let b = TimerToken::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_reschedule_replaces() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(TimerToken(1), Duration::ZERO);
        scheduler.schedule(TimerToken(1), Duration::from_millis(5));

        assert_eq!(scheduler.pending().len(), 1);
        assert_eq!(scheduler.pending()[0].delay, Duration::from_millis(5));
    }
}
