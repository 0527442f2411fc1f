//! Cancellable single-shot timer
//!
//! The timer never runs code on its own: the owner polls it from the event
//! loop with the current time and acts when `poll` reports that it fired.
//! Each `start` supersedes the previous schedule, so a stale deadline can
//! never fire after a restart or cancel.

use std::time::{Duration, Instant};

/// Handle identifying one scheduling of a [`TransitionTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy)]
struct Schedule {
    handle: TimerHandle,
    started: Instant,
    deadline: Instant,
}

/// Single-shot delayed action primitive
#[derive(Debug, Default)]
pub struct TransitionTimer {
    schedule: Option<Schedule>,
    generation: u64,
}

impl TransitionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the timer to fire `delay` after `now`, replacing any pending schedule.
    pub fn start(&mut self, now: Instant, delay: Duration) -> TimerHandle {
        self.generation += 1;
        let handle = TimerHandle(self.generation);
        self.schedule = Some(Schedule {
            handle,
            started: now,
            deadline: now + delay,
        });
        handle
    }

    /// Cancel the pending schedule. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.schedule.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.schedule.is_some()
    }

    /// Whether `handle` is the schedule currently pending
    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.schedule.map(|s| s.handle) == Some(handle)
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.schedule {
            Some(schedule) if now >= schedule.deadline => {
                self.schedule = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the deadline, `None` when idle
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.schedule
            .map(|s| s.deadline.saturating_duration_since(now))
    }

    /// Fraction of the delay that has elapsed (0.0 when idle)
    pub fn progress(&self, now: Instant) -> f32 {
        let Some(schedule) = self.schedule else {
            return 0.0;
        };
        let total = schedule.deadline.saturating_duration_since(schedule.started);
        if total.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(schedule.started);
        (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
    }
}
