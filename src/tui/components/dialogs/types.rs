//! Core dialog types
//!
//! Shared vocabulary for the dialog widgets: outcome callbacks, control
//! identifiers, timing configuration, accessibility identifiers and the
//! error type reported at the configuration boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Delay between the intent to close and removal from the surface.
pub const CLOSE_TRANSITION: Duration = Duration::from_millis(300);

/// Delay between entering the open state and moving focus to the default control.
pub const FOCUS_DELAY: Duration = Duration::from_millis(50);

/// Caller-owned outcome callback.
///
/// Callbacks are pure forwards: the dialog never inspects their effect and
/// never stores state across invocations.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Wrap a closure as a [`Callback`]
pub fn callback<F>(f: F) -> Callback
where
    F: Fn() + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Terminal outcome reported by a dialog to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogOutcome {
    /// Alert acknowledged
    Closed,
    /// Confirm answered "yes"
    Yes,
    /// Confirm answered "no" or dismissed
    No,
}

impl DialogOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl fmt::Display for DialogOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actionable controls inside a dialog's content surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    /// The confirm/yes control; default focus target
    Primary,
    /// The "no" control of a confirm dialog
    Secondary,
}

/// Per-instance timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogTimings {
    /// Close-transition duration before removal
    pub close_transition: Duration,
    /// Delay before focus moves to the default control
    pub focus_delay: Duration,
}

impl Default for DialogTimings {
    fn default() -> Self {
        Self {
            close_transition: CLOSE_TRANSITION,
            focus_delay: FOCUS_DELAY,
        }
    }
}

impl DialogTimings {
    pub fn new(close_transition: Duration, focus_delay: Duration) -> Self {
        Self {
            close_transition,
            focus_delay,
        }
    }
}

/// Identifier of an element inside the interaction surface
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(String);

impl ElementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Instance-unique identifiers used to associate the heading and body
/// text with the dialog surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogIds {
    pub dialog: ElementId,
    pub title: ElementId,
    pub description: ElementId,
}

impl DialogIds {
    /// Generate a fresh id set; no two instances share one.
    pub fn generate(prefix: &str) -> Self {
        let base = format!("{}-{}", prefix, Uuid::new_v4().simple());
        Self {
            title: ElementId(format!("{base}-title")),
            description: ElementId(format!("{base}-desc")),
            dialog: ElementId(base),
        }
    }
}

/// Role exposed to assistive technology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibleRole {
    Dialog,
    AlertDialog,
}

/// Accessibility description of a present dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogAccessibility {
    pub id: ElementId,
    pub role: AccessibleRole,
    pub modal: bool,
    pub labelled_by: ElementId,
    pub described_by: ElementId,
    pub label: String,
    pub description: String,
}

/// Result type for dialog operations
pub type DialogResult<T> = std::result::Result<T, DialogError>;

/// Dialog-specific error types
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("Missing required callback `{0}`")]
    MissingCallback(&'static str),

    #[error("Missing required field `{0}`")]
    MissingField(&'static str),

    #[error("Invalid dialog configuration: {0}")]
    InvalidConfig(String),
}

/// Reject labels that would render as an invisible control
pub(crate) fn require_label(name: &str, label: String) -> DialogResult<String> {
    if label.trim().is_empty() {
        return Err(DialogError::InvalidConfig(format!("`{}` must not be blank", name)));
    }
    Ok(label)
}
