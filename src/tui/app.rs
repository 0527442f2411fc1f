use crate::config::Config;
use crate::tui::components::dialogs::{AlertDialog, ConfirmDialog, DialogOutcome, KeyEventBus};
use crate::tui::components::Component;
use crate::tui::{events::Event, keys::KeyMap, styles::Theme, Frame};
use anyhow::Result;
use crossterm::event::KeyEventKind;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Paragraph;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// What the host should ask
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptRequest {
    Alert {
        message: String,
        alarm_text: Option<String>,
        confirm_text: Option<String>,
    },
    Confirm {
        message: String,
        title: Option<String>,
        yes_text: Option<String>,
        no_text: Option<String>,
        close_on_backdrop: Option<bool>,
    },
}

/// How the prompt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptExit {
    pub outcome: Option<DialogOutcome>,
    pub aborted: bool,
}

impl PromptExit {
    /// 0 for an acknowledgement or "yes", 1 for "no", 130 when aborted
    pub fn exit_code(&self) -> i32 {
        if self.aborted {
            return 130;
        }
        match self.outcome {
            Some(DialogOutcome::No) => 1,
            _ => 0,
        }
    }
}

/// The one dialog a prompt hosts
#[derive(Debug)]
pub enum HostedDialog {
    Alert(AlertDialog),
    Confirm(ConfirmDialog),
}

impl HostedDialog {
    pub fn set_open(&mut self, open: bool, now: Instant) {
        match self {
            Self::Alert(dialog) => {
                dialog.set_open(open, now);
            }
            Self::Confirm(dialog) => {
                dialog.set_open(open, now);
            }
        }
    }

    pub fn is_present(&self) -> bool {
        match self {
            Self::Alert(dialog) => dialog.is_present(),
            Self::Confirm(dialog) => dialog.is_present(),
        }
    }

    pub fn component_mut(&mut self) -> &mut dyn Component {
        match self {
            Self::Alert(dialog) => dialog,
            Self::Confirm(dialog) => dialog,
        }
    }
}

/// Host for a single modal prompt
pub struct PromptApp {
    /// The dialog being shown
    pub dialog: HostedDialog,

    /// Key bus the dialog listens on for Escape
    pub bus: KeyEventBus,

    /// Key mappings for the application
    pub key_map: KeyMap,

    /// Current theme for styling
    pub theme: Theme,

    /// Area the dialog is laid out in
    pub size: Rect,

    mouse_enabled: bool,
    outcome: Option<DialogOutcome>,
    aborted: bool,
}

impl PromptApp {
    /// Build the dialog for `request`. Its callbacks report outcomes
    /// through `events`.
    pub fn new(
        request: PromptRequest,
        config: &Config,
        bus: KeyEventBus,
        events: mpsc::UnboundedSender<Event>,
    ) -> Result<Self> {
        let report = move |outcome: DialogOutcome| {
            let events = events.clone();
            move || {
                if events.send(Event::Outcome(outcome)).is_err() {
                    warn!(%outcome, "Event loop gone, outcome dropped");
                }
            }
        };

        let dialog = match request {
            PromptRequest::Alert {
                message,
                alarm_text,
                confirm_text,
            } => {
                let mut builder = AlertDialog::builder()
                    .message(message)
                    .on_close(report(DialogOutcome::Closed))
                    .timings(config.timings())
                    .key_bus(bus.clone());
                if let Some(text) = alarm_text {
                    builder = builder.alarm_text(text);
                }
                if let Some(text) = confirm_text {
                    builder = builder.confirm_text(text);
                }
                HostedDialog::Alert(builder.build()?)
            }
            PromptRequest::Confirm {
                message,
                title,
                yes_text,
                no_text,
                close_on_backdrop,
            } => {
                let mut builder = ConfirmDialog::builder()
                    .message(message)
                    .close_on_backdrop(close_on_backdrop.unwrap_or(config.close_on_backdrop))
                    .on_yes(report(DialogOutcome::Yes))
                    .on_no(report(DialogOutcome::No))
                    .timings(config.timings())
                    .key_bus(bus.clone());
                if let Some(title) = title {
                    builder = builder.title(title);
                }
                if let Some(text) = yes_text {
                    builder = builder.yes_text(text);
                }
                if let Some(text) = no_text {
                    builder = builder.no_text(text);
                }
                HostedDialog::Confirm(builder.build()?)
            }
        };

        Ok(Self {
            dialog,
            bus,
            key_map: KeyMap::default(),
            theme: config.theme(),
            size: Rect::default(),
            mouse_enabled: config.mouse_enabled,
            outcome: None,
            aborted: false,
        })
    }

    /// Show the dialog
    pub fn open(&mut self, now: Instant) {
        info!("Opening prompt");
        self.dialog.set_open(true, now);
    }

    /// Lay out for a terminal of the given size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = Self::main_area(Rect::new(0, 0, width, height));
        self.dialog.component_mut().set_size(self.size);
    }

    /// Handle incoming events; returns true when the loop should stop.
    pub async fn handle_event(&mut self, event: Event, now: Instant) -> Result<bool> {
        // Timers advance on every event, not only on Tick.
        self.dialog.component_mut().tick(now).await?;

        match event {
            Event::Key(key_event) => {
                if self.key_map.should_quit(&key_event) {
                    info!("Prompt aborted");
                    self.aborted = true;
                    return Ok(true);
                }
                if key_event.kind != KeyEventKind::Press {
                    return Ok(false);
                }

                // Subscribers first; the focused control only sees what they let through.
                let dispatch = self.bus.dispatch(key_event);
                if !dispatch.default_prevented {
                    self.dialog.component_mut().handle_key_event(key_event).await?;
                }
            }

            Event::Mouse(mouse_event) => {
                if self.mouse_enabled {
                    self.dialog.component_mut().handle_mouse_event(mouse_event).await?;
                }
            }

            Event::Resize(width, height) => {
                self.resize(width, height);
            }

            Event::Tick => {}

            Event::Outcome(outcome) => {
                if self.outcome.is_none() {
                    info!(%outcome, "Prompt answered");
                    self.outcome = Some(outcome);
                    self.dialog.set_open(false, now);
                } else {
                    debug!(%outcome, "Ignoring outcome after the first");
                }
            }
        }

        Ok(self.is_finished())
    }

    /// Answered and the exit transition has played out
    pub fn is_finished(&self) -> bool {
        self.aborted || (self.outcome.is_some() && !self.dialog.is_present())
    }

    pub fn exit(&self) -> PromptExit {
        PromptExit {
            outcome: self.outcome,
            aborted: self.aborted,
        }
    }

    fn main_area(area: Rect) -> Rect {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Dialog and backdrop
                Constraint::Length(1), // Key hints
            ])
            .split(area)[0]
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(frame.size());

        self.size = chunks[0];
        self.dialog.component_mut().render(frame, chunks[0], &self.theme);

        let hints = Paragraph::new(self.key_map.help_text()).style(self.theme.help_style());
        frame.render_widget(hints, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use std::time::Duration;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn confirm_request() -> PromptRequest {
        PromptRequest::Confirm {
            message: "Delete the file?".into(),
            title: None,
            yes_text: None,
            no_text: None,
            close_on_backdrop: None,
        }
    }

    fn app(request: PromptRequest) -> (PromptApp, mpsc::UnboundedReceiver<Event>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut app = PromptApp::new(request, &Config::default(), KeyEventBus::new(), sender).unwrap();
        app.resize(80, 25);
        (app, receiver)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn test_escape_answers_no_and_waits_for_transition() {
        let (mut app, mut events) = app(confirm_request());
        let t0 = Instant::now();
        app.open(t0);

        assert!(!app.handle_event(key(KeyCode::Esc), t0).await.unwrap());
        let outcome = events.recv().await.unwrap();
        assert_eq!(outcome, Event::Outcome(DialogOutcome::No));

        // Closing: still on screen, not finished.
        assert!(!app.handle_event(outcome, t0 + ms(10)).await.unwrap());
        assert!(!app.handle_event(Event::Tick, t0 + ms(200)).await.unwrap());
        assert!(app.handle_event(Event::Tick, t0 + ms(310)).await.unwrap());

        let exit = app.exit();
        assert_eq!(exit.outcome, Some(DialogOutcome::No));
        assert_eq!(exit.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_enter_after_focus_answers_yes() {
        let (mut app, mut events) = app(confirm_request());
        let t0 = Instant::now();
        app.open(t0);

        app.handle_event(Event::Tick, t0 + ms(50)).await.unwrap();
        app.handle_event(key(KeyCode::Enter), t0 + ms(60)).await.unwrap();
        assert_eq!(events.recv().await, Some(Event::Outcome(DialogOutcome::Yes)));
    }

    #[tokio::test]
    async fn test_mouse_motion_alone_completes_the_prompt() {
        let (mut app, mut events) = app(confirm_request());
        let t0 = Instant::now();
        app.open(t0);

        let moved = |column| {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Moved,
                column,
                row: 0,
                modifiers: KeyModifiers::NONE,
            })
        };

        // Focus lands without a Tick in between.
        app.handle_event(moved(1), t0 + ms(60)).await.unwrap();
        app.handle_event(key(KeyCode::Enter), t0 + ms(70)).await.unwrap();
        let outcome = events.recv().await.unwrap();
        assert_eq!(outcome, Event::Outcome(DialogOutcome::Yes));
        app.handle_event(outcome, t0 + ms(80)).await.unwrap();

        let mut finished = false;
        for step in 1..=40u16 {
            finished = app.handle_event(moved(step), t0 + ms(80 + 8 * u64::from(step))).await.unwrap();
            if finished {
                break;
            }
        }
        assert!(finished);
        assert_eq!(app.exit().exit_code(), 0);
    }

    #[tokio::test]
    async fn test_second_outcome_is_ignored() {
        let (mut app, _events) = app(confirm_request());
        let t0 = Instant::now();
        app.open(t0);

        app.handle_event(Event::Outcome(DialogOutcome::Yes), t0).await.unwrap();
        app.handle_event(Event::Outcome(DialogOutcome::No), t0 + ms(5)).await.unwrap();
        assert_eq!(app.exit().outcome, Some(DialogOutcome::Yes));
        assert_eq!(app.exit().exit_code(), 0);
    }

    #[tokio::test]
    async fn test_ctrl_c_aborts() {
        let (mut app, _events) = app(confirm_request());
        app.open(Instant::now());

        let quit = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.handle_event(quit, Instant::now()).await.unwrap());
        assert_eq!(app.exit().exit_code(), 130);
    }

    #[tokio::test]
    async fn test_backdrop_click_closes_alert() {
        let request = PromptRequest::Alert {
            message: "Saved".into(),
            alarm_text: None,
            confirm_text: Some("OK".into()),
        };
        let (mut app, mut events) = app(request);
        app.open(Instant::now());

        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        app.handle_event(click, Instant::now()).await.unwrap();
        assert_eq!(events.recv().await, Some(Event::Outcome(DialogOutcome::Closed)));
    }

    #[tokio::test]
    async fn test_mouse_disabled_ignores_clicks() {
        let (sender, mut events) = mpsc::unbounded_channel();
        let config = Config {
            mouse_enabled: false,
            ..Config::default()
        };
        let mut app = PromptApp::new(confirm_request(), &config, KeyEventBus::new(), sender).unwrap();
        app.resize(80, 25);
        app.open(Instant::now());

        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        app.handle_event(click, Instant::now()).await.unwrap();
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_exit_codes() {
        let exit = |outcome, aborted| PromptExit { outcome, aborted }.exit_code();
        assert_eq!(exit(Some(DialogOutcome::Yes), false), 0);
        assert_eq!(exit(Some(DialogOutcome::Closed), false), 0);
        assert_eq!(exit(Some(DialogOutcome::No), false), 1);
        assert_eq!(exit(None, true), 130);
    }
}
