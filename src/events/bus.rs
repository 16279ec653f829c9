//! Synchronous publish/subscribe.
//!
//! The bus maps each [`EventKind`] to an ordered list of listeners and
//! delivers on the calling thread, in registration order.
//!
//! ## Failure Policy
//!
//! A failing listener never stops delivery. Every listener registered for
//! the event's kind is invoked; afterwards the first failure is returned
//! as [`EventBusError::ListenerFailed`] together with the total number of
//! failures for that event.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::event::{EventKind, GameEvent};

/// Handle returned when registering a listener, used to remove it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

impl ListenerId {
    /// Create a new listener ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

/// Failure reported by a listener.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ListenerError(pub String);

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors from the event bus.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EventBusError {
    #[error("{failures} listener(s) failed on {kind}, first {listener}: {source}")]
    ListenerFailed {
        kind: EventKind,
        listener: ListenerId,
        source: ListenerError,
        failures: usize,
    },

    /// A listener tried to use the bus while it was delivering.
    #[error("event bus is busy delivering an event")]
    Reentrant,
}

/// Receives published events.
///
/// Implemented for any `FnMut(&GameEvent) -> Result<(), ListenerError>`.
pub trait EventListener {
    fn on_event(&mut self, event: &GameEvent) -> Result<(), ListenerError>;
}

impl<F> EventListener for F
where
    F: FnMut(&GameEvent) -> Result<(), ListenerError>,
{
    fn on_event(&mut self, event: &GameEvent) -> Result<(), ListenerError> {
        self(event)
    }
}

struct Registration {
    id: ListenerId,
    listener: Box<dyn EventListener>,
}

/// Listener registry and dispatcher.
#[derive(Default)]
pub struct EventBus {
    /// Listeners by event kind, in registration order.
    listeners: FxHashMap<EventKind, Vec<Registration>>,

    /// Next listener ID to allocate.
    next_id: u32,
}

impl EventBus {
    /// Create a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event kind.
    ///
    /// Several listeners may share a kind; they run in the order they were
    /// added.
    pub fn add_listener(
        &mut self,
        kind: EventKind,
        listener: impl EventListener + 'static,
    ) -> ListenerId {
        let id = ListenerId::new(self.next_id);
        self.next_id += 1;

        self.listeners.entry(kind).or_default().push(Registration {
            id,
            listener: Box::new(listener),
        });
        id
    }

    /// Unregister a listener. Returns false if it was not registered for
    /// `kind`.
    pub fn remove_listener(&mut self, kind: EventKind, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|registration| registration.id != id);
        let removed = list.len() != before;

        if list.is_empty() {
            self.listeners.remove(&kind);
        }
        removed
    }

    /// Number of listeners registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Deliver one event to every listener of its kind.
    ///
    /// No listeners is not an error.
    pub fn publish(&mut self, event: &GameEvent) -> Result<(), EventBusError> {
        let kind = event.kind();
        let Some(list) = self.listeners.get_mut(&kind) else {
            return Ok(());
        };

        let mut first: Option<(ListenerId, ListenerError)> = None;
        let mut failures = 0;

        for registration in list.iter_mut() {
            tracing::trace!(listener = %registration.id, %kind, "delivering event");
            if let Err(err) = registration.listener.on_event(event) {
                tracing::warn!(listener = %registration.id, %kind, error = %err, "listener failed");
                failures += 1;
                first.get_or_insert((registration.id, err));
            }
        }

        match first {
            None => Ok(()),
            Some((listener, source)) => Err(EventBusError::ListenerFailed {
                kind,
                listener,
                source,
                failures,
            }),
        }
    }

    /// Publish events in order. Every event is delivered even if an
    /// earlier one failed; the first failure is returned.
    pub fn publish_all<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a GameEvent>,
    ) -> Result<(), EventBusError> {
        let mut result = Ok(());
        for event in events {
            let outcome = self.publish(event);
            if result.is_ok() {
                result = outcome;
            }
        }
        result
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<_> = self
            .listeners
            .iter()
            .map(|(kind, list)| (*kind, list.len()))
            .collect();
        counts.sort();
        f.debug_struct("EventBus")
            .field("listeners", &counts)
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// A bus handle shared between a game and the host that feeds it
/// listeners.
///
/// Cloning shares the same bus. Using the bus from inside one of its own
/// listeners fails with [`EventBusError::Reentrant`].
#[derive(Clone, Debug, Default)]
pub struct SharedEventBus(Rc<RefCell<EventBus>>);

impl SharedEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(
        &self,
        kind: EventKind,
        listener: impl EventListener + 'static,
    ) -> Result<ListenerId, EventBusError> {
        Ok(self.borrow_mut()?.add_listener(kind, listener))
    }

    pub fn remove_listener(&self, kind: EventKind, id: ListenerId) -> Result<bool, EventBusError> {
        Ok(self.borrow_mut()?.remove_listener(kind, id))
    }

    pub fn listener_count(&self, kind: EventKind) -> Result<usize, EventBusError> {
        self.0
            .try_borrow()
            .map(|bus| bus.listener_count(kind))
            .map_err(|_| EventBusError::Reentrant)
    }

    pub fn publish(&self, event: &GameEvent) -> Result<(), EventBusError> {
        self.borrow_mut()?.publish(event)
    }

    pub fn publish_all<'a>(
        &self,
        events: impl IntoIterator<Item = &'a GameEvent>,
    ) -> Result<(), EventBusError> {
        self.borrow_mut()?.publish_all(events)
    }

    fn borrow_mut(&self) -> Result<std::cell::RefMut<'_, EventBus>, EventBusError> {
        self.0.try_borrow_mut().map_err(|_| EventBusError::Reentrant)
    }
}

impl From<EventBus> for SharedEventBus {
    fn from(bus: EventBus) -> Self {
        Self(Rc::new(RefCell::new(bus)))
    }
}
