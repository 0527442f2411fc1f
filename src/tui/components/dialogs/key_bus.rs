//! Process-wide key event stream
//!
//! The host forwards every terminal key event into a [`KeyEventBus`].
//! Subscribers receive each event and may suppress its default action.
//! Subscriptions are RAII guards: dropping a [`KeySubscription`] removes
//! exactly the listener it added.

use crossterm::event::KeyEvent;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, Weak};
use tracing::trace;

type Listener = Arc<dyn Fn(&mut KeyDispatch) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ListenerId(u64);

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl BusInner {
    fn get(&self, id: ListenerId) -> Option<Listener> {
        self.listeners
            .iter()
            .find(|(lid, _)| *lid == id)
            .map(|(_, listener)| listener.clone())
    }
}

/// A key event travelling through the bus
#[derive(Debug)]
pub struct KeyDispatch {
    key: KeyEvent,
    default_prevented: bool,
}

impl KeyDispatch {
    pub fn key(&self) -> &KeyEvent {
        &self.key
    }

    /// Suppress the host's default action for this key.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Summary of a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// Number of listeners that saw the event
    pub delivered: usize,
    pub default_prevented: bool,
}

/// Broadcast hub for key events
#[derive(Clone, Default)]
pub struct KeyEventBus {
    inner: Arc<Mutex<BusInner>>,
}

impl std::fmt::Debug for KeyEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyEventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl KeyEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bus shared by the whole process
    pub fn global() -> KeyEventBus {
        static GLOBAL: OnceLock<KeyEventBus> = OnceLock::new();
        GLOBAL.get_or_init(KeyEventBus::new).clone()
    }

    fn lock(&self) -> MutexGuard<'_, BusInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a listener. It stays registered until the guard is dropped.
    pub fn subscribe<F>(&self, listener: F) -> KeySubscription
    where
        F: Fn(&mut KeyDispatch) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = ListenerId(inner.next_id);
        inner.listeners.push((id, Arc::new(listener)));
        trace!(listener = id.0, total = inner.listeners.len(), "key listener added");

        KeySubscription {
            bus: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver a key event to every listener registered at the time of the
    /// call that is still registered when its turn comes.
    pub fn dispatch(&self, key: KeyEvent) -> DispatchOutcome {
        let ids: Vec<ListenerId> = self.lock().listeners.iter().map(|(id, _)| *id).collect();
        let mut dispatch = KeyDispatch {
            key,
            default_prevented: false,
        };
        let mut delivered = 0;

        for id in ids {
            // The lock is released before calling out so listeners may
            // subscribe or unsubscribe re-entrantly.
            let listener = self.lock().get(id);
            if let Some(listener) = listener {
                listener(&mut dispatch);
                delivered += 1;
            }
        }

        DispatchOutcome {
            delivered,
            default_prevented: dispatch.default_prevented,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

/// Guard for a bus listener; unsubscribes on drop
#[must_use = "dropping the subscription removes the listener immediately"]
pub struct KeySubscription {
    bus: Weak<Mutex<BusInner>>,
    id: ListenerId,
}

impl std::fmt::Debug for KeySubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeySubscription").field("id", &self.id.0).finish()
    }
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        let Some(bus) = self.bus.upgrade() else {
            return;
        };
        let mut inner = bus.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        inner.listeners.retain(|(id, _)| *id != self.id);
        trace!(listener = self.id.0, total = inner.listeners.len(), "key listener removed");
    }
}
