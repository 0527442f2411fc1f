//! Modal dialogs for the TUI
//!
//! Two widgets share one lifecycle: [`AlertDialog`] with a single confirm
//! control and [`ConfirmDialog`] with yes/no controls. Both stay on screen
//! for a short exit transition after being closed, move focus to their
//! primary control shortly after opening, and dismiss on Escape or a
//! backdrop click while open.
//!
//! Time is passed in explicitly. Hosts call `set_open` when the caller's
//! intent changes and `tick` (or `advance`) on every frame.

pub mod alert;
pub mod button;
pub mod confirm;
pub mod dismissal;
pub mod focus;
pub mod key_bus;
pub mod layout;
pub mod lifecycle;
pub mod surface;
pub mod timer;
pub mod types;
pub mod visibility;
pub mod widget;

pub use alert::{AlertDialog, AlertDialogBuilder};
pub use confirm::{ConfirmDialog, ConfirmDialogBuilder};
pub use dismissal::{ClickEvent, DismissalInputHandler};
pub use focus::FocusManager;
pub use key_bus::{DispatchOutcome, KeyDispatch, KeyEventBus, KeySubscription};
pub use lifecycle::DialogLifecycle;
pub use types::*;
pub use visibility::{Transition, VisibilityController, VisibilityState};
pub use widget::ClickResult;
