//! Dismissal triggers: Escape and backdrop clicks
//!
//! While active, the handler holds one subscription on the key bus and
//! forwards Escape presses to the dismiss callback. Backdrop clicks reach
//! it only when the content surface did not stop their propagation.

use super::key_bus::{KeyEventBus, KeySubscription};
use super::types::Callback;
use crossterm::event::{KeyCode, KeyEventKind};
use tracing::debug;

/// A pointer click travelling from the content surface out to the backdrop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// Terminal column of the click
    pub column: u16,

    /// Terminal row of the click
    pub row: u16,

    /// Set once a handler has consumed the click
    propagation_stopped: bool,
}

impl ClickEvent {
    pub fn new(column: u16, row: u16) -> Self {
        Self {
            column,
            row,
            propagation_stopped: false,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Escape and backdrop dismissal for one dialog instance
pub struct DismissalInputHandler {
    /// Bus the Escape listener subscribes to
    bus: KeyEventBus,

    /// Cancel path shared by Escape and the backdrop
    on_dismiss: Callback,

    /// Whether backdrop clicks dismiss
    close_on_backdrop: bool,

    /// Live Escape listener, held only while active
    subscription: Option<KeySubscription>,
}

impl std::fmt::Debug for DismissalInputHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DismissalInputHandler")
            .field("close_on_backdrop", &self.close_on_backdrop)
            .field("active", &self.is_active())
            .finish()
    }
}

impl DismissalInputHandler {
    pub fn new(bus: KeyEventBus, on_dismiss: Callback, close_on_backdrop: bool) -> Self {
        Self {
            bus,
            on_dismiss,
            close_on_backdrop,
            subscription: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn close_on_backdrop(&self) -> bool {
        self.close_on_backdrop
    }

    /// Acquire the key subscription. No-op when already active.
    pub fn activate(&mut self) {
        if self.subscription.is_some() {
            return;
        }

        let on_dismiss = self.on_dismiss.clone();
        self.subscription = Some(self.bus.subscribe(move |dispatch| {
            let key = dispatch.key();
            if key.code == KeyCode::Esc && key.kind == KeyEventKind::Press {
                dispatch.prevent_default();
                debug!("escape pressed, dismissing dialog");
                on_dismiss();
            }
        }));
        debug!("dismissal handler activated");
    }

    /// Release the key subscription. No-op when inactive.
    pub fn deactivate(&mut self) {
        if self.subscription.take().is_some() {
            debug!("dismissal handler deactivated");
        }
    }

    /// Swap the dismiss callback and backdrop flag. An active subscription
    /// is released and re-acquired so it captures the new callback.
    pub fn rebind(&mut self, on_dismiss: Callback, close_on_backdrop: bool) {
        let was_active = self.is_active();
        self.deactivate();
        self.on_dismiss = on_dismiss;
        self.close_on_backdrop = close_on_backdrop;
        if was_active {
            self.activate();
        }
    }

    /// Handle a click that reached the backdrop. Returns whether it dismissed.
    pub fn handle_backdrop_click(&self, click: &mut ClickEvent) -> bool {
        if click.is_propagation_stopped() || !self.is_active() || !self.close_on_backdrop {
            return false;
        }

        click.stop_propagation();
        debug!(column = click.column, row = click.row, "backdrop clicked, dismissing dialog");
        (self.on_dismiss)();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::dialogs::types::callback;
    use crossterm::event::{KeyEvent, KeyEventState, KeyModifiers};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, Callback) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        (count, callback(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }))
    }

    fn esc(kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_escape_dismisses_once_per_press() {
        let bus = KeyEventBus::new();
        let (count, on_dismiss) = counter();
        let mut handler = DismissalInputHandler::new(bus.clone(), on_dismiss, true);
        handler.activate();

        let outcome = bus.dispatch(esc(KeyEventKind::Press));
        assert!(outcome.default_prevented);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // Release and repeat events are not presses.
        bus.dispatch(esc(KeyEventKind::Release));
        bus.dispatch(esc(KeyEventKind::Repeat));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_inactive_handler_ignores_escape() {
        let bus = KeyEventBus::new();
        let (count, on_dismiss) = counter();
        let mut handler = DismissalInputHandler::new(bus.clone(), on_dismiss, true);

        assert!(!bus.dispatch(esc(KeyEventKind::Press)).default_prevented);
        handler.activate();
        handler.deactivate();
        assert!(!bus.dispatch(esc(KeyEventKind::Press)).default_prevented);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_activation_is_idempotent() {
        let bus = KeyEventBus::new();
        let (count, on_dismiss) = counter();
        let mut handler = DismissalInputHandler::new(bus.clone(), on_dismiss, true);
        handler.activate();
        handler.activate();

        assert_eq!(bus.listener_count(), 1);
        bus.dispatch(esc(KeyEventKind::Press));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_releases_subscription() {
        let bus = KeyEventBus::new();
        let (_, on_dismiss) = counter();
        let mut handler = DismissalInputHandler::new(bus.clone(), on_dismiss, true);
        handler.activate();
        assert_eq!(bus.listener_count(), 1);

        drop(handler);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_backdrop_click_respects_flag() {
        let bus = KeyEventBus::new();
        let (count, on_dismiss) = counter();
        let mut handler = DismissalInputHandler::new(bus, on_dismiss, false);
        handler.activate();

        for _ in 0..3 {
            assert!(!handler.handle_backdrop_click(&mut ClickEvent::new(0, 0)));
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_stopped_click_never_reaches_backdrop() {
        let bus = KeyEventBus::new();
        let (count, on_dismiss) = counter();
        let mut handler = DismissalInputHandler::new(bus, on_dismiss, true);
        handler.activate();

        let mut click = ClickEvent::new(10, 5);
        click.stop_propagation();
        assert!(!handler.handle_backdrop_click(&mut click));

        let mut click = ClickEvent::new(0, 0);
        assert!(handler.handle_backdrop_click(&mut click));
        assert!(click.is_propagation_stopped());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rebind_swaps_callback_without_leaking() {
        let bus = KeyEventBus::new();
        let (old_count, old_cb) = counter();
        let (new_count, new_cb) = counter();
        let mut handler = DismissalInputHandler::new(bus.clone(), old_cb, true);
        handler.activate();

        handler.rebind(new_cb, false);
        assert!(handler.is_active());
        assert_eq!(bus.listener_count(), 1);

        bus.dispatch(esc(KeyEventKind::Press));
        assert_eq!(old_count.load(Ordering::SeqCst), 0);
        assert_eq!(new_count.load(Ordering::SeqCst), 1);
        assert!(!handler.close_on_backdrop());
    }
}
