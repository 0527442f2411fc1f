//! Single-action alert dialog
//!
//! Shows a marked heading, a message and one confirm control. The confirm
//! control, Escape and a backdrop click all invoke `on_close`.

use super::button::{ActionButton, ButtonStyle};
use super::key_bus::KeyEventBus;
use super::lifecycle::DialogLifecycle;
use super::surface::DialogSurface;
use super::types::{
    require_label, AccessibleRole, Callback, ControlId, DialogAccessibility, DialogError, DialogIds,
    DialogResult, DialogTimings,
};
use super::visibility::{Transition, VisibilityState};
use super::widget::{ClickResult, DialogCore};
use crate::tui::{components::Component, styles::Theme, Frame};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::Instant;

pub const DEFAULT_ALARM_TEXT: &str = "Alarm";
pub const DEFAULT_CONFIRM_TEXT: &str = "Confirm";
pub const ALERT_MARKER: &str = "❗";

#[derive(Default)]
pub struct AlertDialogBuilder {
    message: Option<String>,
    alarm_text: Option<String>,
    confirm_text: Option<String>,
    on_close: Option<Callback>,
    timings: DialogTimings,
    bus: Option<KeyEventBus>,
}

impl AlertDialogBuilder {
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn alarm_text(mut self, text: impl Into<String>) -> Self {
        self.alarm_text = Some(text.into());
        self
    }

    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = Some(text.into());
        self
    }

    pub fn on_close<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_close = Some(Arc::new(f));
        self
    }

    pub fn timings(mut self, timings: DialogTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn key_bus(mut self, bus: KeyEventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn build(self) -> DialogResult<AlertDialog> {
        let message = self.message.ok_or(DialogError::MissingField("message"))?;
        let on_close = self.on_close.ok_or(DialogError::MissingCallback("on_close"))?;
        let alarm_text = self.alarm_text.unwrap_or_else(|| DEFAULT_ALARM_TEXT.to_string());
        let confirm_text = require_label(
            "confirm_text",
            self.confirm_text
                .unwrap_or_else(|| DEFAULT_CONFIRM_TEXT.to_string()),
        )?;

        let surface = DialogSurface::new(
            DialogIds::generate("alert"),
            AccessibleRole::AlertDialog,
            alarm_text,
            message,
            vec![ActionButton::new(
                ControlId::Primary,
                confirm_text,
                ButtonStyle::Primary,
                on_close.clone(),
            )],
        )
        .with_marker(ALERT_MARKER);

        // Backdrop dismissal is always on for alerts.
        let lifecycle = DialogLifecycle::new(
            self.timings,
            ControlId::Primary,
            self.bus.unwrap_or_else(KeyEventBus::global),
            on_close,
            true,
        );

        Ok(AlertDialog {
            core: DialogCore::new(lifecycle, surface),
        })
    }
}

#[derive(Debug)]
pub struct AlertDialog {
    core: DialogCore,
}

impl AlertDialog {
    pub fn builder() -> AlertDialogBuilder {
        AlertDialogBuilder::default()
    }

    pub fn set_open(&mut self, open: bool, now: Instant) -> Transition {
        self.core.set_open(open, now)
    }

    pub fn advance(&mut self, now: Instant) -> Transition {
        self.core.tick(now)
    }

    pub fn state(&self) -> VisibilityState {
        self.core.state()
    }

    pub fn is_present(&self) -> bool {
        self.core.is_present()
    }

    /// Caller's intent flag
    pub fn is_open(&self) -> bool {
        self.core.lifecycle().intent()
    }

    /// Open and not playing the exit transition
    pub fn is_visually_open(&self) -> bool {
        self.core.state() == VisibilityState::Open
    }

    pub fn focused_control(&self) -> Option<ControlId> {
        self.core.focused()
    }

    pub fn accessibility(&self) -> Option<DialogAccessibility> {
        self.core.accessibility()
    }

    pub fn alarm_text(&self) -> &str {
        self.core.surface().title()
    }

    pub fn message(&self) -> &str {
        self.core.surface().message()
    }

    pub fn confirm_text(&self) -> &str {
        self.core
            .surface()
            .button(ControlId::Primary)
            .map(|b| b.label())
            .unwrap_or_default()
    }

    pub fn surface(&self) -> &DialogSurface {
        self.core.surface()
    }

    pub fn lifecycle(&self) -> &DialogLifecycle {
        self.core.lifecycle()
    }

    pub fn set_text(&mut self, alarm_text: impl Into<String>, message: impl Into<String>) {
        self.core.surface_mut().set_text(alarm_text, message);
    }

    pub fn set_confirm_text(&mut self, text: impl Into<String>) -> DialogResult<()> {
        let text = require_label("confirm_text", text.into())?;
        let surface = self.core.surface_mut();
        if let Some(button) = surface.button_mut(ControlId::Primary) {
            button.set_label(text);
        }
        surface.relayout();
        Ok(())
    }

    /// Replace `on_close` for the control, Escape and the backdrop.
    pub fn set_on_close(&mut self, on_close: Callback) {
        if let Some(button) = self.core.surface_mut().button_mut(ControlId::Primary) {
            button.set_on_press(on_close.clone());
        }
        self.core.lifecycle_mut().rebind_dismissal(on_close, true);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.core.handle_key(key)
    }

    pub fn handle_click(&mut self, column: u16, row: u16) -> ClickResult {
        self.core.handle_click(column, row)
    }
}

#[async_trait]
impl Component for AlertDialog {
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        self.core.handle_key(event);
        Ok(())
    }

    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        self.core.handle_mouse(event);
        Ok(())
    }

    async fn tick(&mut self, now: Instant) -> Result<()> {
        self.core.tick(now);
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.core.render(frame, area, theme);
    }

    fn size(&self) -> Rect {
        self.core.surface().area()
    }

    fn set_size(&mut self, size: Rect) {
        self.core.set_area(size);
    }

    fn has_focus(&self) -> bool {
        self.core.focused().is_some()
    }

    fn is_visible(&self) -> bool {
        self.core.is_present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::dialogs::types::callback;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn alert(bus: &KeyEventBus, closes: Arc<AtomicUsize>) -> AlertDialog {
        AlertDialog::builder()
            .message("Saved")
            .on_close(move || {
                closes.fetch_add(1, Ordering::SeqCst);
            })
            .key_bus(bus.clone())
            .build()
            .unwrap()
    }

    fn esc(kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn draw(dialog: &mut AlertDialog) -> String {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                dialog.render(frame, area, &theme);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_defaults() {
        let bus = KeyEventBus::new();
        let dialog = alert(&bus, Arc::new(AtomicUsize::new(0)));

        assert_eq!(dialog.alarm_text(), "Alarm");
        assert_eq!(dialog.confirm_text(), "Confirm");
        assert_eq!(dialog.message(), "Saved");
        assert_eq!(dialog.state(), VisibilityState::Closed);
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_missing_on_close_fails_fast() {
        let err = AlertDialog::builder().message("Saved").build().unwrap_err();
        assert!(matches!(err, DialogError::MissingCallback("on_close")));
        assert_eq!(err.to_string(), "Missing required callback `on_close`");
    }

    #[test]
    fn test_open_confirm_then_remove() {
        let bus = KeyEventBus::new();
        let closes = Arc::new(AtomicUsize::new(0));
        let mut dialog = alert(&bus, closes.clone());
        dialog.set_size(Rect::new(0, 0, 80, 24));
        let t0 = Instant::now();

        dialog.set_open(true, t0);
        assert!(dialog.is_visually_open());
        dialog.advance(t0 + ms(50));
        assert_eq!(dialog.focused_control(), Some(ControlId::Primary));

        let confirm = dialog.surface().button(ControlId::Primary).unwrap().area();
        assert_eq!(
            dialog.handle_click(confirm.x + 1, confirm.y + 1),
            ClickResult::Pressed(ControlId::Primary)
        );
        assert_eq!(closes.load(Ordering::SeqCst), 1);

        dialog.set_open(false, t0 + ms(100));
        assert!(dialog.is_present());
        assert!(!dialog.is_visually_open());
        assert_eq!(bus.listener_count(), 0);

        assert_eq!(dialog.advance(t0 + ms(400)), Transition::Removed);
        assert!(!dialog.is_present());
        assert!(dialog.accessibility().is_none());
    }

    #[test]
    fn test_escape_and_backdrop_invoke_on_close() {
        let bus = KeyEventBus::new();
        let closes = Arc::new(AtomicUsize::new(0));
        let mut dialog = alert(&bus, closes.clone());
        dialog.set_size(Rect::new(0, 0, 80, 24));
        dialog.set_open(true, Instant::now());

        bus.dispatch(esc(KeyEventKind::Press));
        assert_eq!(closes.load(Ordering::SeqCst), 1);

        assert_eq!(dialog.handle_click(0, 0), ClickResult::Dismissed);
        assert_eq!(closes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_escape_release_and_repeat_ignored() {
        let bus = KeyEventBus::new();
        let closes = Arc::new(AtomicUsize::new(0));
        let mut dialog = alert(&bus, closes.clone());
        dialog.set_open(true, Instant::now());

        bus.dispatch(esc(KeyEventKind::Release));
        bus.dispatch(esc(KeyEventKind::Repeat));
        assert_eq!(closes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_accessibility_uses_alert_role() {
        let bus = KeyEventBus::new();
        let mut dialog = alert(&bus, Arc::new(AtomicUsize::new(0)));
        dialog.set_open(true, Instant::now());

        let a11y = dialog.accessibility().unwrap();
        assert_eq!(a11y.role, AccessibleRole::AlertDialog);
        assert_eq!(a11y.label, "Alarm");
        assert_eq!(a11y.description, "Saved");
        assert_eq!(a11y.id, dialog.surface().ids().dialog);
    }

    #[test]
    fn test_instances_get_distinct_ids() {
        let bus = KeyEventBus::new();
        let a = alert(&bus, Arc::new(AtomicUsize::new(0)));
        let b = alert(&bus, Arc::new(AtomicUsize::new(0)));
        assert_ne!(a.surface().ids().dialog, b.surface().ids().dialog);
        assert_ne!(a.surface().ids().title, b.surface().ids().title);
    }

    #[test]
    fn test_set_on_close_rebinds_while_open() {
        let bus = KeyEventBus::new();
        let first = Arc::new(AtomicUsize::new(0));
        let mut dialog = alert(&bus, first.clone());
        dialog.set_open(true, Instant::now());

        let second = Arc::new(AtomicUsize::new(0));
        let s = second.clone();
        dialog.set_on_close(callback(move || {
            s.fetch_add(1, Ordering::SeqCst);
        }));

        bus.dispatch(esc(KeyEventKind::Press));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_count(), 1);
    }

    #[test]
    fn test_render_shows_marker_heading_and_control() {
        let bus = KeyEventBus::new();
        let mut dialog = alert(&bus, Arc::new(AtomicUsize::new(0)));
        dialog.set_confirm_text("OK").unwrap();
        dialog.set_open(true, Instant::now());

        let text = draw(&mut dialog);
        assert!(text.contains("❗"));
        assert!(text.contains("Alarm"));
        assert!(text.contains("Saved"));
        assert!(text.contains("OK"));
    }

    #[test]
    fn test_blank_confirm_text_rejected_after_build() {
        let bus = KeyEventBus::new();
        let mut dialog = alert(&bus, Arc::new(AtomicUsize::new(0)));
        dialog.set_confirm_text("Got it").unwrap();

        let err = dialog.set_confirm_text("   ").unwrap_err();
        assert!(matches!(err, DialogError::InvalidConfig(_)));
        assert_eq!(dialog.confirm_text(), "Got it");
    }

    #[test]
    fn test_render_nothing_after_removal() {
        let bus = KeyEventBus::new();
        let mut dialog = alert(&bus, Arc::new(AtomicUsize::new(0)));
        let t0 = Instant::now();
        dialog.set_open(true, t0);
        dialog.set_open(false, t0);
        dialog.advance(t0 + ms(300));

        let text = draw(&mut dialog);
        assert!(text.chars().all(|c| c == ' '));
    }

    #[tokio::test]
    async fn test_enter_via_component_presses_focused_control() {
        let bus = KeyEventBus::new();
        let closes = Arc::new(AtomicUsize::new(0));
        let mut dialog = alert(&bus, closes.clone());
        let t0 = Instant::now();
        dialog.set_open(true, t0);

        dialog
            .handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .await
            .unwrap();
        assert_eq!(closes.load(Ordering::SeqCst), 0);

        dialog.tick(t0 + ms(50)).await.unwrap();
        assert!(dialog.has_focus());
        dialog
            .handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .await
            .unwrap();
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}
