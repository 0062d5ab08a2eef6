//! # Event Bus
//!
//! Owns the registry mapping each event type to its ordered callbacks.
//! Producers and consumers reach it through the [`Publisher`] and
//! [`Subscriber`] views, which borrow the same bus.
//!
//! ## Registry invariants
//!
//! - No event type maps to an empty sequence.
//! - Subscription ids are allocated from 1 upwards and never reused.
//! - The registry is never borrowed while user code runs: callbacks are
//!   invoked from a snapshot, and removed callbacks are dropped after the
//!   registry borrow is released.

use crate::error::BusError;
use crate::event::{AnyEvent, EventOf, EventSet, EventTypeId};
use crate::publisher::Publisher;
use crate::subscriber::{Subscriber, SubscriptionId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use tracing::{debug, trace};

/// Type-erased callback stored in the registry.
pub(crate) type Callback = Rc<dyn Fn(AnyEvent<'_>)>;

#[derive(Clone)]
struct Entry {
    callback: Callback,
    id: SubscriptionId,
}

struct Registry {
    callbacks: HashMap<EventTypeId, Vec<Entry>>,
    next_id: u64,
}

impl Registry {
    fn new() -> Self {
        Self {
            callbacks: HashMap::new(),
            next_id: SubscriptionId::FIRST,
        }
    }

    fn insert(&mut self, event_type: EventTypeId, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id);
        self.next_id += 1;
        self.callbacks
            .entry(event_type)
            .or_default()
            .push(Entry { callback, id });
        id
    }

    fn take(&mut self, event_type: EventTypeId, id: SubscriptionId) -> Option<Entry> {
        let entries = self.callbacks.get_mut(&event_type)?;
        let position = entries.iter().position(|entry| entry.id == id)?;
        let entry = entries.remove(position);
        if entries.is_empty() {
            self.callbacks.remove(&event_type);
        }
        Some(entry)
    }

    fn owner_of(&self, id: SubscriptionId) -> Option<EventTypeId> {
        self.callbacks
            .iter()
            .find(|(_, entries)| entries.iter().any(|entry| entry.id == id))
            .map(|(event_type, _)| *event_type)
    }

    fn snapshot(&self, event_type: EventTypeId) -> Vec<Callback> {
        self.callbacks
            .get(&event_type)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| Rc::clone(&entry.callback))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Synchronous event bus for the closed event set `S`.
///
/// The bus is deliberately neither `Send` nor `Sync`: one thread drives
/// it for its whole life. Callers needing cross-thread access must wrap
/// subscribe, unsubscribe and publish in a single lock of their own.
pub struct EventBus<S: EventSet> {
    registry: RefCell<Registry>,
    events_published: Cell<u64>,
    _set: PhantomData<fn() -> S>,
}

impl<S: EventSet> EventBus<S> {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: RefCell::new(Registry::new()),
            events_published: Cell::new(0),
            _set: PhantomData,
        }
    }

    /// Registration view over this bus.
    #[must_use]
    pub fn subscriber(&self) -> Subscriber<'_, S> {
        Subscriber::new(self)
    }

    /// Dispatch view over this bus.
    #[must_use]
    pub fn publisher(&self) -> Publisher<'_, S> {
        Publisher::new(self)
    }

    /// Live registrations across all event types.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.registry.borrow().callbacks.values().map(Vec::len).sum()
    }

    /// Live registrations for `E`.
    #[must_use]
    pub fn subscription_count_for<E: EventOf<S>>(&self) -> usize {
        self.registry
            .borrow()
            .callbacks
            .get(&EventTypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    /// Event types that currently have at least one registration.
    ///
    /// Order is unspecified.
    #[must_use]
    pub fn active_event_types(&self) -> Vec<EventTypeId> {
        self.registry.borrow().callbacks.keys().copied().collect()
    }

    /// Every event type this bus accepts, in declaration order.
    #[must_use]
    pub fn declared_types(&self) -> Vec<EventTypeId> {
        S::declared_types()
    }

    /// Number of publish calls made, including ones nobody listened to.
    #[must_use]
    pub fn events_published(&self) -> u64 {
        self.events_published.get()
    }

    pub(crate) fn register(&self, event_type: EventTypeId, callback: Callback) -> SubscriptionId {
        let id = self.registry.borrow_mut().insert(event_type, callback);
        debug!(event_type = %event_type, id = %id, "Subscription registered");
        id
    }

    pub(crate) fn remove(
        &self,
        event_type: EventTypeId,
        id: SubscriptionId,
    ) -> Result<(), BusError> {
        let taken = self.registry.borrow_mut().take(event_type, id);
        if let Some(entry) = taken {
            // The callback may own values whose Drop re-enters the bus.
            drop(entry);
            debug!(event_type = %event_type, id = %id, "Subscription removed");
            return Ok(());
        }

        let owner = self.registry.borrow().owner_of(id);
        let err = match owner {
            Some(registered) => BusError::EventTypeMismatch {
                requested: event_type,
                registered,
                id,
            },
            None => BusError::SubscriptionNotFound { event_type, id },
        };
        debug!(error = %err, "Unsubscribe rejected");
        Err(err)
    }

    pub(crate) fn dispatch(&self, event: AnyEvent<'_>) -> usize {
        self.events_published.set(self.events_published.get() + 1);

        let event_type = event.event_type();
        let snapshot = self.registry.borrow().snapshot(event_type);
        if snapshot.is_empty() {
            trace!(event_type = %event_type, "No subscribers for event");
            return 0;
        }

        for callback in &snapshot {
            callback(event);
        }

        trace!(
            event_type = %event_type,
            callbacks = snapshot.len(),
            "Event published"
        );
        snapshot.len()
    }
}

impl<S: EventSet> Default for EventBus<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSet> fmt::Debug for EventBus<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscription_count())
            .field("events_published", &self.events_published())
            .finish()
    }
}
