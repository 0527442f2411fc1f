use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub description: String,
}

impl KeyBinding {
    pub fn new(key: KeyCode, modifiers: KeyModifiers, description: &str) -> Self {
        Self {
            key,
            modifiers,
            description: description.to_string(),
        }
    }

    /// Matches presses only; release and repeat events never trigger a binding.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.kind == KeyEventKind::Press && self.key == event.code && self.modifiers == event.modifiers
    }
}

/// Host key mappings. Dialog keys (Escape, Enter, Space) are handled by
/// the dialogs themselves.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Abort the prompt without an answer
    pub quit: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL, "Abort"),
        }
    }
}

impl KeyMap {
    /// Check if the event should quit the application
    pub fn should_quit(&self, event: &KeyEvent) -> bool {
        self.quit.matches(event)
    }

    /// One-line hint shown under the dialog
    pub fn help_text(&self) -> String {
        format!("Enter/Space: select · Esc: dismiss · Ctrl+C: {}", self.quit.description.to_lowercase())
    }
}
