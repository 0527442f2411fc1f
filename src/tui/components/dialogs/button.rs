//! Actionable dialog control

use super::types::{Callback, ControlId};
use crate::tui::styles::Theme;
use crate::tui::Frame;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// Visual weight of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
}

/// A labelled control that forwards presses to a caller callback
pub struct ActionButton {
    id: ControlId,
    label: String,
    style: ButtonStyle,
    on_press: Callback,
    area: Rect,
}

impl std::fmt::Debug for ActionButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionButton")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("area", &self.area)
            .finish()
    }
}

impl ActionButton {
    pub fn new(id: ControlId, label: impl Into<String>, style: ButtonStyle, on_press: Callback) -> Self {
        Self {
            id,
            label: label.into(),
            style,
            on_press,
            area: Rect::default(),
        }
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_on_press(&mut self, on_press: Callback) {
        self.on_press = on_press;
    }

    /// Width the button needs: label, padding and border
    pub fn preferred_width(&self) -> u16 {
        u16::try_from(self.label.width())
            .unwrap_or(u16::MAX)
            .saturating_add(6)
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x.saturating_add(self.area.width)
            && row >= self.area.y
            && row < self.area.y.saturating_add(self.area.height)
    }

    /// Invoke the callback
    pub fn press(&self) {
        debug!(control = ?self.id, label = %self.label, "dialog control pressed");
        (self.on_press)();
    }

    pub fn render(&self, frame: &mut Frame, focused: bool, dimmed: bool, theme: &Theme) {
        if self.area.width == 0 || self.area.height == 0 {
            return;
        }

        let mut style = match (self.style, focused) {
            (_, true) => Style::default()
                .bg(theme.primary)
                .fg(theme.text_bright)
                .add_modifier(Modifier::BOLD),
            (ButtonStyle::Primary, false) => Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
            (ButtonStyle::Secondary, false) => Style::default().fg(theme.text),
        };
        if dimmed {
            style = style.add_modifier(Modifier::DIM);
        }

        let border_style = if focused {
            Style::default().fg(theme.border_focused)
        } else {
            Style::default().fg(theme.border)
        };

        let button = Paragraph::new(format!(" {} ", self.label))
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border_style));

        frame.render_widget(button, self.area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::dialogs::types::callback;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_press_forwards_to_callback() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let button = ActionButton::new(
            ControlId::Primary,
            "Yes",
            ButtonStyle::Primary,
            callback(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }),
        );

        button.press();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hit_testing() {
        let mut button = ActionButton::new(ControlId::Secondary, "No", ButtonStyle::Secondary, callback(|| {}));
        assert!(!button.contains(0, 0));

        button.set_area(Rect::new(10, 5, 8, 3));
        assert!(button.contains(10, 5));
        assert!(button.contains(17, 7));
        assert!(!button.contains(18, 7));
        assert!(!button.contains(10, 8));
    }

    #[test]
    fn test_preferred_width_counts_display_width() {
        let button = ActionButton::new(ControlId::Primary, "확인", ButtonStyle::Primary, callback(|| {}));
        assert_eq!(button.preferred_width(), 10);
    }
}
