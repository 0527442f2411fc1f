//! Visibility state machine
//!
//! Combines the caller's open/closed intent with whether the dialog is
//! actually present on the interaction surface. Opening is immediate;
//! closing keeps the dialog present for the close-transition duration so
//! an exit effect can play, and only then removes it.
//!
//! ```text
//! Closed --open--> Open --close--> Closing --timer--> Closed
//!                   ^                 |
//!                   +------open-------+
//! ```

use super::timer::TransitionTimer;
use super::types::CLOSE_TRANSITION;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Lifecycle state of a dialog instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    /// Not present
    #[default]
    Closed,
    /// Present, intent open
    Open,
    /// Present, intent closed, removal pending
    Closing,
}

/// Effect of a single state machine step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Entered Open, either from Closed or by cancelling a close
    Opened,
    /// Left Open; the close transition started
    Closing,
    /// Close transition elapsed; the dialog left the surface
    Removed,
    Unchanged,
}

/// Presence state machine for one dialog instance
#[derive(Debug)]
pub struct VisibilityController {
    /// Current presence state
    state: VisibilityState,

    /// Pending removal while closing
    close_timer: TransitionTimer,

    /// Length of the exit transition
    close_delay: Duration,
}

impl Default for VisibilityController {
    fn default() -> Self {
        Self::new(CLOSE_TRANSITION)
    }
}

impl VisibilityController {
    pub fn new(close_delay: Duration) -> Self {
        Self {
            state: VisibilityState::Closed,
            close_timer: TransitionTimer::new(),
            close_delay,
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Whether the dialog occupies the interaction surface
    pub fn is_present(&self) -> bool {
        self.state != VisibilityState::Closed
    }

    /// The caller's current intent
    pub fn intent(&self) -> bool {
        self.state == VisibilityState::Open
    }

    pub fn has_pending_close(&self) -> bool {
        self.close_timer.is_pending()
    }

    pub fn close_delay(&self) -> Duration {
        self.close_delay
    }

    /// Progress of the exit transition (0.0 unless closing)
    pub fn closing_progress(&self, now: Instant) -> f32 {
        if self.state == VisibilityState::Closing {
            self.close_timer.progress(now)
        } else {
            0.0
        }
    }

    /// Time until the pending removal, if any
    pub fn time_until_removal(&self, now: Instant) -> Option<Duration> {
        self.close_timer.remaining(now)
    }

    pub fn set_intent(&mut self, open: bool, now: Instant) -> Transition {
        if open {
            self.open(now)
        } else {
            self.close(now)
        }
    }

    pub fn open(&mut self, _now: Instant) -> Transition {
        match self.state {
            VisibilityState::Open => Transition::Unchanged,
            VisibilityState::Closed => {
                // Nothing should be pending here; cancel regardless.
                self.close_timer.cancel();
                self.state = VisibilityState::Open;
                debug!("dialog opened");
                Transition::Opened
            }
            VisibilityState::Closing => {
                // The timer goes before the state flips so it can never
                // remove a dialog that was just reopened.
                self.close_timer.cancel();
                self.state = VisibilityState::Open;
                debug!("dialog reopened during close transition");
                Transition::Opened
            }
        }
    }

    pub fn close(&mut self, now: Instant) -> Transition {
        match self.state {
            VisibilityState::Open => {
                self.close_timer.start(now, self.close_delay);
                self.state = VisibilityState::Closing;
                debug!(delay_ms = self.close_delay.as_millis() as u64, "close transition started");
                Transition::Closing
            }
            VisibilityState::Closing | VisibilityState::Closed => Transition::Unchanged,
        }
    }

    /// Advance time; removes the dialog once the close transition elapsed.
    pub fn tick(&mut self, now: Instant) -> Transition {
        if self.state != VisibilityState::Closing {
            return Transition::Unchanged;
        }

        if self.close_timer.poll(now) {
            self.state = VisibilityState::Closed;
            debug!("dialog removed from surface");
            Transition::Removed
        } else {
            trace!("close transition in flight");
            Transition::Unchanged
        }
    }

    /// Check the presence invariants
    pub fn invariants_hold(&self) -> bool {
        let intent = self.intent();
        let present = self.is_present();
        let pending = self.close_timer.is_pending();

        (!intent || present)
            && (present || (!intent && !pending))
            && (pending == (present && !intent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_open_is_immediate() {
        let t0 = Instant::now();
        let mut vc = VisibilityController::default();
        assert!(!vc.is_present());

        assert_eq!(vc.open(t0), Transition::Opened);
        assert!(vc.is_present());
        assert!(vc.intent());
        assert!(vc.invariants_hold());
    }

    #[test]
    fn test_close_waits_for_transition() {
        let t0 = Instant::now();
        let mut vc = VisibilityController::default();
        vc.open(t0);

        assert_eq!(vc.close(t0), Transition::Closing);
        assert_eq!(vc.state(), VisibilityState::Closing);
        assert!(vc.is_present());
        assert!(vc.has_pending_close());
        assert!(vc.invariants_hold());

        assert_eq!(vc.tick(t0 + ms(299)), Transition::Unchanged);
        assert!(vc.is_present());

        assert_eq!(vc.tick(t0 + ms(300)), Transition::Removed);
        assert!(!vc.is_present());
        assert!(!vc.has_pending_close());
        assert!(vc.invariants_hold());
    }

    #[test]
    fn test_reopen_cancels_pending_close() {
        let t0 = Instant::now();
        let mut vc = VisibilityController::default();
        vc.open(t0);
        vc.close(t0 + ms(10));

        assert_eq!(vc.open(t0 + ms(200)), Transition::Opened);
        assert_eq!(vc.state(), VisibilityState::Open);
        assert!(!vc.has_pending_close());

        // The stale deadline passes without removing the dialog.
        assert_eq!(vc.tick(t0 + ms(1000)), Transition::Unchanged);
        assert!(vc.is_present());
        assert!(vc.invariants_hold());
    }

    #[test]
    fn test_open_is_idempotent() {
        let t0 = Instant::now();
        let mut vc = VisibilityController::default();
        vc.open(t0);
        assert_eq!(vc.open(t0 + ms(5)), Transition::Unchanged);
        assert!(!vc.has_pending_close());
    }

    #[test]
    fn test_close_when_closed_or_closing_is_noop() {
        let t0 = Instant::now();
        let mut vc = VisibilityController::default();
        assert_eq!(vc.close(t0), Transition::Unchanged);
        assert!(!vc.has_pending_close());

        vc.open(t0);
        vc.close(t0);
        // A second close must not restart the transition.
        assert_eq!(vc.close(t0 + ms(200)), Transition::Unchanged);
        assert_eq!(vc.tick(t0 + ms(300)), Transition::Removed);
    }

    #[test]
    fn test_rapid_toggling_keeps_invariants() {
        let t0 = Instant::now();
        let mut vc = VisibilityController::new(ms(300));

        for step in 0..40u64 {
            let now = t0 + ms(step * 37);
            vc.set_intent(step % 3 != 0, now);
            vc.tick(now);
            assert!(vc.invariants_hold(), "invariant broken at step {step}");
        }
    }

    #[test]
    fn test_closing_progress() {
        let t0 = Instant::now();
        let mut vc = VisibilityController::new(ms(100));
        vc.open(t0);
        assert_eq!(vc.closing_progress(t0), 0.0);

        vc.close(t0);
        assert!((vc.closing_progress(t0 + ms(50)) - 0.5).abs() < 0.01);
        assert_eq!(vc.time_until_removal(t0 + ms(40)), Some(ms(60)));
    }
}
