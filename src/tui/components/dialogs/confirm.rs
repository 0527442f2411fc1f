//! Yes/no confirmation dialog
//!
//! "Yes" invokes the confirm callback. "No", Escape and (unless disabled)
//! a backdrop click all invoke the cancel callback. The "Yes" control
//! receives focus shortly after the dialog opens.

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

pub const DEFAULT_TITLE: &str = "Confirm";
pub const DEFAULT_YES_TEXT: &str = "Yes";
pub const DEFAULT_NO_TEXT: &str = "No";

/// Builder for [`ConfirmDialog`]
#[derive(Default)]
pub struct ConfirmDialogBuilder {
    message: Option<String>,
    title: Option<String>,
    yes_text: Option<String>,
    no_text: Option<String>,
    close_on_backdrop: Option<bool>,
    on_yes: Option<Callback>,
    on_no: Option<Callback>,
    timings: DialogTimings,
    bus: Option<KeyEventBus>,
}

impl ConfirmDialogBuilder {
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn yes_text(mut self, text: impl Into<String>) -> Self {
        self.yes_text = Some(text.into());
        self
    }

    pub fn no_text(mut self, text: impl Into<String>) -> Self {
        self.no_text = Some(text.into());
        self
    }

    pub fn close_on_backdrop(mut self, enabled: bool) -> Self {
        self.close_on_backdrop = Some(enabled);
        self
    }

    pub fn on_yes<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_yes = Some(Arc::new(f));
        self
    }

    pub fn on_no<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_no = Some(Arc::new(f));
        self
    }

    pub fn timings(mut self, timings: DialogTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Use a specific key bus instead of the process-wide one.
    pub fn key_bus(mut self, bus: KeyEventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn build(self) -> DialogResult<ConfirmDialog> {
        let message = self.message.ok_or(DialogError::MissingField("message"))?;
        let on_yes = self.on_yes.ok_or(DialogError::MissingCallback("on_yes"))?;
        let on_no = self.on_no.ok_or(DialogError::MissingCallback("on_no"))?;

        let title = self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let yes_text = require_label(
            "yes_text",
            self.yes_text.unwrap_or_else(|| DEFAULT_YES_TEXT.to_string()),
        )?;
        let no_text = require_label(
            "no_text",
            self.no_text.unwrap_or_else(|| DEFAULT_NO_TEXT.to_string()),
        )?;
        let close_on_backdrop = self.close_on_backdrop.unwrap_or(true);

        let buttons = vec![
            ActionButton::new(ControlId::Primary, yes_text, ButtonStyle::Primary, on_yes),
            ActionButton::new(ControlId::Secondary, no_text, ButtonStyle::Secondary, on_no.clone()),
        ];
        let surface = DialogSurface::new(
            DialogIds::generate("confirm"),
            AccessibleRole::Dialog,
            title,
            message,
            buttons,
        );
        let lifecycle = DialogLifecycle::new(
            self.timings,
            ControlId::Primary,
            self.bus.unwrap_or_else(KeyEventBus::global),
            on_no,
            close_on_backdrop,
        );

        Ok(ConfirmDialog {
            core: DialogCore::new(lifecycle, surface),
            close_on_backdrop,
        })
    }
}

/// Yes/no confirmation dialog
#[derive(Debug)]
pub struct ConfirmDialog {
    core: DialogCore,
    close_on_backdrop: bool,
}

impl ConfirmDialog {
    pub fn builder() -> ConfirmDialogBuilder {
        ConfirmDialogBuilder::default()
    }

    /// Drive the open intent.
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

    pub fn is_open(&self) -> bool {
        self.core.lifecycle().intent()
    }

    pub fn focused_control(&self) -> Option<ControlId> {
        self.core.focused()
    }

    pub fn accessibility(&self) -> Option<DialogAccessibility> {
        self.core.accessibility()
    }

    pub fn title(&self) -> &str {
        self.core.surface().title()
    }

    pub fn message(&self) -> &str {
        self.core.surface().message()
    }

    pub fn yes_text(&self) -> &str {
        self.label(ControlId::Primary)
    }

    pub fn no_text(&self) -> &str {
        self.label(ControlId::Secondary)
    }

    fn label(&self, id: ControlId) -> &str {
        self.core.surface().button(id).map(|b| b.label()).unwrap_or_default()
    }

    pub fn close_on_backdrop(&self) -> bool {
        self.close_on_backdrop
    }

    /// Content surface and controls, for hosts that hit-test themselves
    pub fn surface(&self) -> &DialogSurface {
        self.core.surface()
    }

    pub fn lifecycle(&self) -> &DialogLifecycle {
        self.core.lifecycle()
    }

    pub fn set_text(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.core.surface_mut().set_text(title, message);
    }

    /// Swap both control labels. Blank labels are rejected and leave the
    /// current ones in place.
    pub fn set_labels(
        &mut self,
        yes_text: impl Into<String>,
        no_text: impl Into<String>,
    ) -> DialogResult<()> {
        let yes_text = require_label("yes_text", yes_text.into())?;
        let no_text = require_label("no_text", no_text.into())?;

        let surface = self.core.surface_mut();
        if let Some(button) = surface.button_mut(ControlId::Primary) {
            button.set_label(yes_text);
        }
        if let Some(button) = surface.button_mut(ControlId::Secondary) {
            button.set_label(no_text);
        }
        surface.relayout();
        Ok(())
    }

    /// Replace the outcome callbacks and the backdrop flag. An active
    /// Escape subscription is swapped for one bound to the new callback.
    pub fn set_callbacks(&mut self, on_yes: Callback, on_no: Callback, close_on_backdrop: bool) {
        let surface = self.core.surface_mut();
        if let Some(button) = surface.button_mut(ControlId::Primary) {
            button.set_on_press(on_yes);
        }
        if let Some(button) = surface.button_mut(ControlId::Secondary) {
            button.set_on_press(on_no.clone());
        }
        self.core.lifecycle_mut().rebind_dismissal(on_no, close_on_backdrop);
        self.close_on_backdrop = close_on_backdrop;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.core.handle_key(key)
    }

    pub fn handle_click(&mut self, column: u16, row: u16) -> ClickResult {
        self.core.handle_click(column, row)
    }
}

#[async_trait]
impl Component for ConfirmDialog {
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
