use crate::tui::components::dialogs::DialogOutcome;
use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEvent, MouseEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),

    /// Mouse input event
    Mouse(MouseEvent),

    /// Terminal resize event
    Resize(u16, u16),

    /// Periodic tick event
    Tick,

    /// A dialog reported its outcome through a callback
    Outcome(DialogOutcome),
}

/// Event handler for managing input events
pub struct EventHandler {
    /// Event receiver channel
    receiver: mpsc::UnboundedReceiver<Event>,

    /// Event sender channel
    sender: mpsc::UnboundedSender<Event>,

    /// Tick interval for periodic events
    tick_interval: Duration,

    /// Tells the input reader to stop
    stop: Arc<AtomicBool>,

    started: bool,
}

impl EventHandler {
    /// Create a new event handler; input is not read until [`start`](Self::start).
    pub fn new(tick_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            receiver,
            sender,
            tick_interval,
            stop: Arc::new(AtomicBool::new(false)),
            started: false,
        }
    }

    /// Spawn the terminal reader. Emits `Tick` whenever no input arrives
    /// within the tick interval.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        let sender = self.sender.clone();
        let stop = self.stop.clone();
        let tick_interval = self.tick_interval;

        tokio::task::spawn_blocking(move || {
            while !stop.load(Ordering::Relaxed) {
                let event = match crossterm::event::poll(tick_interval) {
                    Ok(true) => match crossterm::event::read() {
                        Ok(event) => Self::convert_crossterm_event(event),
                        Err(e) => {
                            warn!("Failed to read terminal event: {}", e);
                            break;
                        }
                    },
                    Ok(false) => Some(Event::Tick),
                    Err(e) => {
                        warn!("Failed to poll terminal events: {}", e);
                        break;
                    }
                };

                if let Some(event) = event {
                    if sender.send(event).is_err() {
                        break;
                    }
                }
            }
            debug!("Input reader stopped");
        });
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Convert crossterm events to application events
    fn convert_crossterm_event(event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Key(key_event) => Some(Event::Key(key_event)),
            CrosstermEvent::Mouse(mouse_event) => Some(Event::Mouse(mouse_event)),
            CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
            CrosstermEvent::FocusGained | CrosstermEvent::FocusLost | CrosstermEvent::Paste(_) => None,
        }
    }

    /// Send an internal event
    pub fn send(&self, event: Event) -> Result<()> {
        self.sender.send(event)?;
        Ok(())
    }

    /// Get a clone of the sender
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
