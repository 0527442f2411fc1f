//! Dialog geometry and hit testing
//!
//! Computes where the content surface, the wrapped message and the button
//! row sit inside the available frame area. Everything outside
//! `dialog_area` is backdrop.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

const MIN_WIDTH: u16 = 30;
const MAX_WIDTH: u16 = 60;
const PADDING: u16 = 2;
const BUTTON_GAP: u16 = 2;
const BUTTON_HEIGHT: u16 = 3;

/// Layout of one present dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogLayout {
    /// Full available area (content surface plus backdrop)
    pub available_area: Rect,
    /// Content surface including border
    pub dialog_area: Rect,
    /// Body text area
    pub message_area: Rect,
    /// Wrapped body text
    pub message_lines: Vec<String>,
    /// One rect per button, left to right
    pub button_areas: Vec<Rect>,
}

impl DialogLayout {
    pub fn calculate(available_area: Rect, title: &str, message: &str, button_widths: &[u16]) -> Self {
        // Widths are summed in usize; only the clamped result narrows to u16.
        let buttons_width = button_widths.iter().map(|&w| usize::from(w)).sum::<usize>()
            + usize::from(BUTTON_GAP) * button_widths.len().saturating_sub(1);
        let longest_line = message.lines().map(|l| l.width()).max().unwrap_or(0);
        let wanted_inner = longest_line
            .max(title.width().saturating_add(4))
            .max(buttons_width);

        let wanted = wanted_inner
            .saturating_add(usize::from(2 * PADDING + 2))
            .clamp(usize::from(MIN_WIDTH), usize::from(MAX_WIDTH));
        let width = u16::try_from(wanted)
            .unwrap_or(MAX_WIDTH)
            .min(available_area.width);
        let buttons_width = u16::try_from(buttons_width).unwrap_or(u16::MAX);
        let inner_width = width.saturating_sub(2 + 2 * PADDING).max(1);

        let message_lines: Vec<String> = textwrap::wrap(message, inner_width as usize)
            .into_iter()
            .map(|line| line.into_owned())
            .collect();
        let text_height = u16::try_from(message_lines.len()).unwrap_or(u16::MAX);

        // border + padding row + text + gap row + buttons + border
        let height = text_height
            .saturating_add(BUTTON_HEIGHT + 4)
            .min(available_area.height);

        let x = available_area.x + available_area.width.saturating_sub(width) / 2;
        let y = available_area.y + available_area.height.saturating_sub(height) / 2;
        let dialog_area = Rect::new(x, y, width, height);

        let message_area = Rect::new(
            x + 1 + PADDING.min(width.saturating_sub(2) / 2),
            y + 2.min(height),
            inner_width.min(width.saturating_sub(2)),
            text_height.min(height.saturating_sub(4)),
        );

        let button_y = (y + height).saturating_sub(1 + BUTTON_HEIGHT).max(y);
        let row_x = x + width.saturating_sub(buttons_width) / 2;
        let mut button_areas = Vec::with_capacity(button_widths.len());
        let mut cursor = row_x;
        for &w in button_widths {
            // Buttons that do not fit collapse to zero width on the right edge.
            cursor = cursor.min(x + width);
            let clipped = w.min(x + width - cursor);
            button_areas.push(Rect::new(cursor, button_y, clipped, BUTTON_HEIGHT.min(height)));
            cursor = cursor.saturating_add(w).saturating_add(BUTTON_GAP);
        }

        Self {
            available_area,
            dialog_area,
            message_area,
            message_lines,
            button_areas,
        }
    }

    /// Whether a point lies on the content surface
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let area = &self.dialog_area;
        column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height
    }

    /// Whether a point lies on the backdrop
    pub fn is_backdrop(&self, column: u16, row: u16) -> bool {
        let area = &self.available_area;
        let in_frame = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        in_frame && !self.contains(column, row)
    }
}
