//! # Event Subscriber
//!
//! Defines the registration side of the event bus.

use crate::bus::{Callback, EventBus};
use crate::error::BusError;
use crate::event::{AnyEvent, EventOf, EventSet, EventTypeId};
use std::fmt;
use std::rc::Rc;

/// Opaque handle naming one registration on one bus.
///
/// Ids are unique per bus instance and increase monotonically. An id does
/// not record its event type: callers name the type again to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Reserved value, never issued by a bus.
    pub const INVALID: Self = Self(0);

    /// First id a fresh bus hands out.
    pub(crate) const FIRST: u64 = 1;

    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    /// Whether this is anything other than [`SubscriptionId::INVALID`].
    #[must_use]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// Registration view over an [`EventBus`].
///
/// A cheap `Copy` handle. It mutates the bus's registry through shared
/// borrows, so it can be held alongside a [`Publisher`](crate::Publisher)
/// over the same bus.
pub struct Subscriber<'bus, S: EventSet> {
    bus: &'bus EventBus<S>,
}

impl<'bus, S: EventSet> Subscriber<'bus, S> {
    pub(crate) fn new(bus: &'bus EventBus<S>) -> Self {
        Self { bus }
    }

    /// Register `callback` for events of type `E`.
    ///
    /// Callbacks for one type run in registration order. Registration
    /// always succeeds.
    #[must_use = "the id is needed to unsubscribe"]
    pub fn subscribe<E, F>(&self, callback: F) -> SubscriptionId
    where
        E: EventOf<S>,
        F: Fn(&E) + 'static,
    {
        self.subscribe_any::<E, _>(move |event| callback(event.unpack::<E>()))
    }

    /// Register a type-erased `callback` for events of type `E`.
    ///
    /// The callback receives the shared [`AnyEvent`] view and is expected
    /// to [`unpack`](AnyEvent::unpack) it as `E`.
    #[must_use = "the id is needed to unsubscribe"]
    pub fn subscribe_any<E, F>(&self, callback: F) -> SubscriptionId
    where
        E: EventOf<S>,
        F: Fn(AnyEvent<'_>) + 'static,
    {
        let callback: Callback = Rc::new(callback);
        self.bus.register(EventTypeId::of::<E>(), callback)
    }

    /// Remove the registration `id` from the callbacks of `E`.
    ///
    /// Returns `false` if `E` has no such registration, including when
    /// `id` is live but belongs to another event type.
    pub fn unsubscribe<E: EventOf<S>>(&self, id: SubscriptionId) -> bool {
        self.try_unsubscribe::<E>(id).is_ok()
    }

    /// Like [`unsubscribe`](Self::unsubscribe), reporting why it failed.
    ///
    /// # Errors
    ///
    /// - [`BusError::EventTypeMismatch`] if `id` is registered under
    ///   another event type.
    /// - [`BusError::SubscriptionNotFound`] if `id` is not live at all.
    ///
    /// The registry is untouched on error.
    pub fn try_unsubscribe<E: EventOf<S>>(&self, id: SubscriptionId) -> Result<(), BusError> {
        self.bus.remove(EventTypeId::of::<E>(), id)
    }

    pub(crate) fn unsubscribe_erased(
        &self,
        event_type: EventTypeId,
        id: SubscriptionId,
    ) -> Result<(), BusError> {
        self.bus.remove(event_type, id)
    }

    /// The bus this view registers on.
    #[must_use]
    pub fn bus(&self) -> &'bus EventBus<S> {
        self.bus
    }
}

impl<S: EventSet> Clone for Subscriber<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: EventSet> Copy for Subscriber<'_, S> {}

impl<S: EventSet> fmt::Debug for Subscriber<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber").field("bus", self.bus).finish()
    }
}
