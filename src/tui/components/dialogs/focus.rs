//! Default-control focus scheduling
//!
//! Each entry into the open state schedules one focus move to the default
//! control after a short delay. Leaving the open state cancels the request
//! and releases focus, so a dialog re-opened during its exit transition
//! waits the full delay again.

use super::timer::TransitionTimer;
use super::types::{ControlId, FOCUS_DELAY};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Schedules focus of the default control after opening
#[derive(Debug)]
pub struct FocusManager {
    /// Pending focus move
    request: TransitionTimer,

    /// Delay between opening and the focus move
    delay: Duration,

    /// Control that receives focus on open
    target: ControlId,

    /// Control currently holding focus
    focused: Option<ControlId>,
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new(ControlId::Primary, FOCUS_DELAY)
    }
}

impl FocusManager {
    pub fn new(target: ControlId, delay: Duration) -> Self {
        Self {
            request: TransitionTimer::new(),
            delay,
            target,
            focused: None,
        }
    }

    /// The control that receives focus on open
    pub fn target(&self) -> ControlId {
        self.target
    }

    /// The control currently holding input focus
    pub fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    pub fn is_pending(&self) -> bool {
        self.request.is_pending()
    }

    /// Schedule a focus move; replaces any request still pending.
    pub fn schedule(&mut self, now: Instant) {
        self.request.start(now, self.delay);
        trace!(delay_ms = self.delay.as_millis() as u64, "focus move scheduled");
    }

    /// Drop the pending request without moving focus.
    pub fn cancel(&mut self) {
        if self.request.cancel() {
            debug!("pending focus move cancelled");
        }
    }

    /// Cancel and release focus entirely.
    pub fn clear(&mut self) {
        self.cancel();
        if self.focused.take().is_some() {
            trace!("focus released");
        }
    }

    /// Returns the control that just received focus, once.
    pub fn tick(&mut self, now: Instant) -> Option<ControlId> {
        if self.request.poll(now) {
            self.focused = Some(self.target);
            debug!(control = ?self.target, "focus moved to default control");
            Some(self.target)
        } else {
            None
        }
    }
}
