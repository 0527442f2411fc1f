//! Presentation of a present dialog
//!
//! Owns the heading, body text and controls of a dialog, lays them out,
//! draws them over a dimmed backdrop and routes clicks that land on the
//! content surface. Clicks inside the surface always stop propagation.

use super::button::ActionButton;
use super::dismissal::ClickEvent;
use super::layout::DialogLayout;
use super::types::{AccessibleRole, ControlId, DialogAccessibility, DialogIds};
use crate::tui::styles::Theme;
use crate::tui::Frame;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tracing::trace;

pub struct DialogSurface {
    ids: DialogIds,
    role: AccessibleRole,
    marker: Option<&'static str>,
    title: String,
    message: String,
    buttons: Vec<ActionButton>,
    area: Rect,
    layout: Option<DialogLayout>,
}

impl std::fmt::Debug for DialogSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogSurface")
            .field("ids", &self.ids)
            .field("title", &self.title)
            .field("message", &self.message)
            .field("buttons", &self.buttons)
            .finish()
    }
}

impl DialogSurface {
    pub fn new(
        ids: DialogIds,
        role: AccessibleRole,
        title: impl Into<String>,
        message: impl Into<String>,
        buttons: Vec<ActionButton>,
    ) -> Self {
        Self {
            ids,
            role,
            marker: None,
            title: title.into(),
            message: message.into(),
            buttons,
            area: Rect::default(),
            layout: None,
        }
    }

    /// Prefix drawn before the heading but not part of its accessible label
    pub fn with_marker(mut self, marker: &'static str) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn ids(&self) -> &DialogIds {
        &self.ids
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn layout(&self) -> Option<&DialogLayout> {
        self.layout.as_ref()
    }

    pub fn button(&self, id: ControlId) -> Option<&ActionButton> {
        self.buttons.iter().find(|b| b.id() == id)
    }

    pub fn button_mut(&mut self, id: ControlId) -> Option<&mut ActionButton> {
        self.buttons.iter_mut().find(|b| b.id() == id)
    }

    pub fn set_text(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.title = title.into();
        self.message = message.into();
        self.relayout();
    }

    pub fn set_area(&mut self, area: Rect) {
        if self.area != area || self.layout.is_none() {
            self.area = area;
            self.relayout();
        }
    }

    /// Recompute geometry after a change to text, labels or area.
    pub fn relayout(&mut self) {
        if self.area.width == 0 || self.area.height == 0 {
            self.layout = None;
            return;
        }

        let heading = self.heading();
        let widths: Vec<u16> = self.buttons.iter().map(|b| b.preferred_width()).collect();
        let layout = DialogLayout::calculate(self.area, &heading, &self.message, &widths);
        for (button, area) in self.buttons.iter_mut().zip(layout.button_areas.iter()) {
            button.set_area(*area);
        }
        trace!(dialog = %self.ids.dialog, area = ?layout.dialog_area, "dialog layout computed");
        self.layout = Some(layout);
    }

    fn heading(&self) -> String {
        match self.marker {
            Some(marker) => format!("{} {}", marker, self.title),
            None => self.title.clone(),
        }
    }

    pub fn accessibility(&self) -> DialogAccessibility {
        DialogAccessibility {
            id: self.ids.dialog.clone(),
            role: self.role,
            modal: true,
            labelled_by: self.ids.title.clone(),
            described_by: self.ids.description.clone(),
            label: self.title.clone(),
            description: self.message.clone(),
        }
    }

    /// Content phase of click routing. A click on the surface stops
    /// propagation and presses the control under it, if any.
    pub fn handle_content_click(&self, click: &mut ClickEvent) -> Option<ControlId> {
        let layout = self.layout.as_ref()?;
        if !layout.contains(click.column, click.row) {
            return None;
        }
        click.stop_propagation();

        let button = self
            .buttons
            .iter()
            .find(|b| b.contains(click.column, click.row))?;
        button.press();
        Some(button.id())
    }

    /// Whether the point lies on the backdrop of the current layout
    pub fn is_backdrop(&self, column: u16, row: u16) -> bool {
        self.layout
            .as_ref()
            .map(|layout| layout.is_backdrop(column, row))
            .unwrap_or(false)
    }

    /// Draw backdrop, surface, text and controls. `fade` is the exit
    /// progress; any value above zero renders the surface dimmed.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, focused: Option<ControlId>, fade: f32) {
        self.set_area(area);
        let Some(layout) = self.layout.as_ref() else {
            return;
        };

        let dimmed = fade > 0.0;
        frame.buffer_mut().set_style(area, theme.backdrop_style());
        frame.render_widget(Clear, layout.dialog_area);

        let mut surface_style = theme.surface_style();
        let mut title_style = theme.title_style();
        let mut text_style = theme.text_style();
        if dimmed {
            surface_style = surface_style.add_modifier(Modifier::DIM);
            title_style = title_style.add_modifier(Modifier::DIM);
            text_style = text_style.add_modifier(Modifier::DIM);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_style())
            .title(Span::styled(format!(" {} ", self.heading()), title_style))
            .title_alignment(Alignment::Center)
            .style(surface_style);
        frame.render_widget(block, layout.dialog_area);

        let lines: Vec<Line> = layout
            .message_lines
            .iter()
            .map(|line| Line::from(Span::styled(line.clone(), text_style)))
            .collect();
        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default());
        frame.render_widget(body, layout.message_area);

        for button in &self.buttons {
            button.render(frame, focused == Some(button.id()), dimmed, theme);
        }
    }
}
