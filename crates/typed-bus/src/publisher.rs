//! # Event Publisher
//!
//! Defines the dispatch side of the event bus.

use crate::bus::EventBus;
use crate::event::{AnyEvent, EventOf, EventSet};
use std::fmt;

/// Dispatch view over an [`EventBus`].
///
/// Read-only with respect to the registry; a cheap `Copy` handle.
pub struct Publisher<'bus, S: EventSet> {
    bus: &'bus EventBus<S>,
}

impl<'bus, S: EventSet> Publisher<'bus, S> {
    pub(crate) fn new(bus: &'bus EventBus<S>) -> Self {
        Self { bus }
    }

    /// Invoke every callback registered for exactly `E`, in registration
    /// order, and return how many ran.
    ///
    /// Publishing a type nobody subscribed to is a no-op returning 0.
    ///
    /// The callback list is snapshotted before the first callback runs.
    /// Callbacks may subscribe or unsubscribe (for any type, including
    /// `E`); such changes take effect from the next publish and never
    /// alter the dispatch in progress.
    ///
    /// A panicking callback is not caught: the panic unwinds to the caller
    /// and the remaining callbacks of this publish are skipped. The
    /// registry is left intact and usable.
    pub fn publish<E: EventOf<S>>(&self, event: &E) -> usize {
        self.bus.dispatch(AnyEvent::new(event))
    }

    /// The bus this view dispatches on.
    #[must_use]
    pub fn bus(&self) -> &'bus EventBus<S> {
        self.bus
    }
}

impl<S: EventSet> Clone for Publisher<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: EventSet> Copy for Publisher<'_, S> {}

impl<S: EventSet> fmt::Debug for Publisher<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher").field("bus", self.bus).finish()
    }
}
