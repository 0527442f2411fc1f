//! Shared lifecycle of the dialog widgets
//!
//! Wires the visibility state machine to focus scheduling and dismissal
//! subscriptions. Every transition is applied synchronously: timers and
//! subscriptions owned by the state being left are released before the
//! call returns.

use super::dismissal::{ClickEvent, DismissalInputHandler};
use super::focus::FocusManager;
use super::key_bus::KeyEventBus;
use super::types::{Callback, ControlId, DialogTimings};
use super::visibility::{Transition, VisibilityController, VisibilityState};
use std::time::Instant;
use tracing::trace;

/// Visibility, focus and dismissal driven together
#[derive(Debug)]
pub struct DialogLifecycle {
    /// Presence and the close transition
    visibility: VisibilityController,

    /// Delayed focus of the default control
    focus: FocusManager,

    /// Escape and backdrop dismissal
    dismissal: DismissalInputHandler,
}

impl DialogLifecycle {
    pub fn new(
        timings: DialogTimings,
        focus_target: ControlId,
        bus: KeyEventBus,
        on_dismiss: Callback,
        close_on_backdrop: bool,
    ) -> Self {
        Self {
            visibility: VisibilityController::new(timings.close_transition),
            focus: FocusManager::new(focus_target, timings.focus_delay),
            dismissal: DismissalInputHandler::new(bus, on_dismiss, close_on_backdrop),
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.visibility.state()
    }

    pub fn is_present(&self) -> bool {
        self.visibility.is_present()
    }

    pub fn intent(&self) -> bool {
        self.visibility.intent()
    }

    pub fn focused(&self) -> Option<ControlId> {
        self.focus.focused()
    }

    pub fn focus_pending(&self) -> bool {
        self.focus.is_pending()
    }

    pub fn has_pending_close(&self) -> bool {
        self.visibility.has_pending_close()
    }

    pub fn dismissal_active(&self) -> bool {
        self.dismissal.is_active()
    }

    pub fn closing_progress(&self, now: Instant) -> f32 {
        self.visibility.closing_progress(now)
    }

    /// Drive the intent flag.
    pub fn set_open(&mut self, open: bool, now: Instant) -> Transition {
        let transition = self.visibility.set_intent(open, now);
        self.apply(transition, now);
        transition
    }

    /// Advance timers: removal first, then the focus request.
    pub fn tick(&mut self, now: Instant) -> Transition {
        let transition = self.visibility.tick(now);
        self.apply(transition, now);
        if self.visibility.intent() {
            self.focus.tick(now);
        }
        transition
    }

    pub fn rebind_dismissal(&mut self, on_dismiss: Callback, close_on_backdrop: bool) {
        self.dismissal.rebind(on_dismiss, close_on_backdrop);
    }

    pub fn handle_backdrop_click(&self, click: &mut ClickEvent) -> bool {
        self.dismissal.handle_backdrop_click(click)
    }

    fn apply(&mut self, transition: Transition, now: Instant) {
        match transition {
            Transition::Opened => {
                self.focus.schedule(now);
                self.dismissal.activate();
            }
            Transition::Closing => {
                self.focus.clear();
                self.dismissal.deactivate();
            }
            Transition::Removed => {
                self.focus.clear();
                self.dismissal.deactivate();
            }
            Transition::Unchanged => return,
        }
        trace!(?transition, state = ?self.visibility.state(), "dialog lifecycle updated");
    }

    /// Check the cross-component invariants
    pub fn invariants_hold(&self) -> bool {
        let active_ok = self.dismissal.is_active() == (self.is_present() && self.intent());
        let focus_ok =
            (!self.focus.is_pending() && self.focus.focused().is_none()) || self.intent();
        self.visibility.invariants_hold() && active_ok && focus_ok
    }
}
