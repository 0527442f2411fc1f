use ratatui::style::{Color, Modifier, Style};

/// Colors used by the dialog presentation layer
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary colors
    pub primary: Color,
    pub accent: Color,

    /// Text colors
    pub text: Color,
    pub text_dim: Color,
    pub text_bright: Color,

    /// Background colors
    pub background: Color,
    pub surface: Color,
    pub backdrop: Color,

    /// Border colors
    pub border: Color,
    pub border_focused: Color,

    /// Status colors
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(37, 99, 235),     // Blue-600
            accent: Color::Rgb(96, 165, 250),     // Blue-400

            text: Color::Rgb(226, 232, 240),      // Slate-200
            text_dim: Color::Rgb(148, 163, 184),  // Slate-400
            text_bright: Color::Rgb(255, 255, 255),

            background: Color::Rgb(15, 23, 42),   // Slate-900
            surface: Color::Rgb(30, 41, 59),      // Slate-800
            backdrop: Color::Black,

            border: Color::Rgb(71, 85, 105),      // Slate-600
            border_focused: Color::Rgb(96, 165, 250),

            warning: Color::Rgb(245, 158, 11),    // Amber-500
            error: Color::Rgb(239, 68, 68),       // Red-500
        }
    }

    /// Create a light theme
    pub fn light() -> Self {
        Self {
            primary: Color::Rgb(37, 99, 235),
            accent: Color::Rgb(29, 78, 216),

            text: Color::Rgb(55, 65, 81),         // Gray-700
            text_dim: Color::Rgb(107, 114, 128),  // Gray-500
            text_bright: Color::Rgb(255, 255, 255),

            background: Color::Rgb(249, 250, 251),
            surface: Color::Rgb(255, 255, 255),
            backdrop: Color::Rgb(31, 41, 55),

            border: Color::Rgb(209, 213, 219),    // Gray-300
            border_focused: Color::Rgb(96, 165, 250),

            warning: Color::Rgb(217, 119, 6),
            error: Color::Rgb(220, 38, 38),
        }
    }

    /// Look up a built-in theme by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Style for the dialog surface
    pub fn surface_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    /// Style for body text
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Style for dialog headings
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for the dimmed area behind a modal
    pub fn backdrop_style(&self) -> Style {
        Style::default()
            .bg(self.backdrop)
            .fg(self.text_dim)
            .add_modifier(Modifier::DIM)
    }

    /// Style for help text
    pub fn help_style(&self) -> Style {
        Style::default()
            .fg(self.text_dim)
            .add_modifier(Modifier::DIM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("Light").map(|t| t.surface), Some(Theme::light().surface));
        assert_eq!(Theme::from_name("dark").map(|t| t.primary), Some(Theme::dark().primary));
        assert!(Theme::from_name("solarized").is_none());
    }
}
