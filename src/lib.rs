//! Modal alert and confirmation dialogs for ratatui applications
//!
//! The widgets live in [`tui::components::dialogs`]; [`tui::run_prompt`]
//! hosts one of them full screen.

pub mod config;
pub mod tui;

pub use tui::components::dialogs::{
    AlertDialog, ConfirmDialog, DialogError, DialogOutcome, DialogResult, DialogTimings, KeyEventBus,
};
