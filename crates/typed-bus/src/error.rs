//! Error types for the bus and the subscription manager.
//!
//! The boolean entry points (`unsubscribe`, `sub`, `unsub`) collapse these
//! into `false`; the `try_*` variants return them as-is.

use crate::event::EventTypeId;
use crate::subscriber::SubscriptionId;
use thiserror::Error;

/// Errors from bus registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// No live registration with this id exists anywhere on the bus.
    #[error("Subscription {id} not found for event type {event_type}")]
    SubscriptionNotFound {
        event_type: EventTypeId,
        id: SubscriptionId,
    },

    /// The id is live, but under a different event type than the one named.
    #[error("Subscription {id} is registered for {registered}, not {requested}")]
    EventTypeMismatch {
        requested: EventTypeId,
        registered: EventTypeId,
        id: SubscriptionId,
    },
}

/// Errors from [`SubscriptionManager`](crate::SubscriptionManager) operations.
///
/// Tags are stored in their `Debug` form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManagerError {
    #[error("Tag {tag} already owns subscription {id}")]
    TagInUse { tag: String, id: SubscriptionId },

    #[error("Tag {tag} has no active subscription")]
    UnknownTag { tag: String },

    #[error("Tag {tag} is subscribed to {registered}, not {requested}")]
    EventTypeMismatch {
        tag: String,
        requested: EventTypeId,
        registered: EventTypeId,
    },

    /// The index pointed at a registration the bus no longer holds. The
    /// index entry has been dropped.
    #[error("Tag {tag} pointed at a stale subscription: {source}")]
    StaleSubscription {
        tag: String,
        #[source]
        source: BusError,
    },
}
