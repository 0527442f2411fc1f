//! Composition shared by the alert and confirm widgets
//!
//! `DialogCore` glues the lifecycle (visibility, focus, dismissal) to the
//! surface (layout, rendering, controls) and implements input routing:
//! keys pressed on the focused control, clicks on the content surface
//! first and on the backdrop only when the surface let them through.

use super::dismissal::ClickEvent;
use super::lifecycle::DialogLifecycle;
use super::surface::DialogSurface;
use super::types::{ControlId, DialogAccessibility};
use super::visibility::{Transition, VisibilityState};
use crate::tui::styles::Theme;
use crate::tui::Frame;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::Instant;
use tracing::debug;

/// What a click ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickResult {
    /// Not present, not a left press, or outside the frame
    Ignored,
    /// Landed on a control, which was pressed
    Pressed(ControlId),
    /// Landed on the surface but not on a control
    Contained,
    /// Reached the backdrop and dismissed the dialog
    Dismissed,
    /// Reached the backdrop; dismissal disabled or inactive
    Backdrop,
}

/// Behavior shared by the alert and confirm widgets
#[derive(Debug)]
pub struct DialogCore {
    /// State machines behind the widget
    lifecycle: DialogLifecycle,

    /// Heading, body and controls
    surface: DialogSurface,

    /// Latest time passed in, used for the exit fade when rendering
    last_seen: Option<Instant>,
}

impl DialogCore {
    pub fn new(lifecycle: DialogLifecycle, surface: DialogSurface) -> Self {
        Self {
            lifecycle,
            surface,
            last_seen: None,
        }
    }

    pub fn lifecycle(&self) -> &DialogLifecycle {
        &self.lifecycle
    }

    pub fn lifecycle_mut(&mut self) -> &mut DialogLifecycle {
        &mut self.lifecycle
    }

    pub fn surface(&self) -> &DialogSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DialogSurface {
        &mut self.surface
    }

    pub fn set_open(&mut self, open: bool, now: Instant) -> Transition {
        self.last_seen = Some(now);
        self.lifecycle.set_open(open, now)
    }

    pub fn tick(&mut self, now: Instant) -> Transition {
        self.last_seen = Some(now);
        self.lifecycle.tick(now)
    }

    pub fn state(&self) -> VisibilityState {
        self.lifecycle.state()
    }

    pub fn is_present(&self) -> bool {
        self.lifecycle.is_present()
    }

    pub fn focused(&self) -> Option<ControlId> {
        if self.is_present() {
            self.lifecycle.focused()
        } else {
            None
        }
    }

    pub fn accessibility(&self) -> Option<DialogAccessibility> {
        self.is_present().then(|| self.surface.accessibility())
    }

    /// Enter or Space presses the focused control.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.is_present() || key.kind != KeyEventKind::Press {
            return false;
        }
        if !matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            return false;
        }

        let Some(focused) = self.focused() else {
            return false;
        };
        match self.surface.button(focused) {
            Some(button) => {
                button.press();
                true
            }
            None => false,
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) -> ClickResult {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return ClickResult::Ignored;
        }
        self.handle_click(event.column, event.row)
    }

    pub fn handle_click(&mut self, column: u16, row: u16) -> ClickResult {
        if !self.is_present() {
            return ClickResult::Ignored;
        }

        let mut click = ClickEvent::new(column, row);
        if let Some(control) = self.surface.handle_content_click(&mut click) {
            return ClickResult::Pressed(control);
        }
        if click.is_propagation_stopped() {
            return ClickResult::Contained;
        }
        if !self.surface.is_backdrop(column, row) {
            return ClickResult::Ignored;
        }

        if self.lifecycle.handle_backdrop_click(&mut click) {
            ClickResult::Dismissed
        } else {
            debug!(column, row, "backdrop click without dismissal");
            ClickResult::Backdrop
        }
    }

    pub fn set_area(&mut self, area: Rect) {
        self.surface.set_area(area);
    }

    /// Draw the dialog; contributes nothing when not present.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.is_present() {
            return;
        }
        let fade = match (self.state(), self.last_seen) {
            (VisibilityState::Closing, Some(now)) => self.lifecycle.closing_progress(now).max(f32::EPSILON),
            (VisibilityState::Closing, None) => 1.0,
            _ => 0.0,
        };
        let focused = self.focused();
        self.surface.render(frame, area, theme, focused, fade);
    }
}
