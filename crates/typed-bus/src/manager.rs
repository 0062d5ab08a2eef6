//! # Subscription Manager
//!
//! Names subscriptions by caller-chosen tags instead of raw ids.
//!
//! Each tag owns at most one live subscription. The manager records the
//! event type alongside the id, so `unsub(tag)` never needs the type
//! restated. Everything still registered is released when the manager is
//! dropped.
//!
//! ## Tag lifecycle
//!
//! ```text
//!            sub (ok)
//!   UNUSED ───────────► ACTIVE ──┐ sub (TagInUse, no bus access)
//!      ▲                  │  ▲   │
//!      │  unsub / drop    │  └───┘
//!      └──────────────────┘
//! ```

use crate::error::ManagerError;
use crate::event::{AnyEvent, EventOf, EventSet, EventTypeId};
use crate::subscriber::{Subscriber, SubscriptionId};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, warn};

/// What a tag owns: one registration of one event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedSubscription {
    pub event_type: EventTypeId,
    pub id: SubscriptionId,
}

/// Tag-keyed index over a bus's [`Subscriber`] view.
///
/// `K` is a small closed key space, typically a fieldless enum. The
/// manager borrows the bus and cannot outlive it.
pub struct SubscriptionManager<'bus, K, S>
where
    K: Copy + Eq + Hash + fmt::Debug,
    S: EventSet,
{
    subscriber: Subscriber<'bus, S>,
    subscriptions: HashMap<K, ManagedSubscription>,
}

impl<'bus, K, S> SubscriptionManager<'bus, K, S>
where
    K: Copy + Eq + Hash + fmt::Debug,
    S: EventSet,
{
    /// Create an empty manager over `subscriber`.
    #[must_use]
    pub fn new(subscriber: Subscriber<'bus, S>) -> Self {
        Self {
            subscriber,
            subscriptions: HashMap::new(),
        }
    }

    /// Subscribe `callback` to `E` under `tag`.
    ///
    /// Returns `false`, without touching the bus, if `tag` already owns a
    /// subscription.
    pub fn sub<E, F>(&mut self, tag: K, callback: F) -> bool
    where
        E: EventOf<S>,
        F: Fn(&E) + 'static,
    {
        self.try_sub::<E, F>(tag, callback).is_ok()
    }

    /// Like [`sub`](Self::sub), returning the new id.
    ///
    /// # Errors
    ///
    /// [`ManagerError::TagInUse`] if `tag` already owns a subscription.
    pub fn try_sub<E, F>(&mut self, tag: K, callback: F) -> Result<SubscriptionId, ManagerError>
    where
        E: EventOf<S>,
        F: Fn(&E) + 'static,
    {
        self.ensure_vacant(tag)?;
        let id = self.subscriber.subscribe::<E, F>(callback);
        Ok(self.record::<E>(tag, id))
    }

    /// Subscribe a type-erased `callback` to `E` under `tag`.
    pub fn sub_any<E, F>(&mut self, tag: K, callback: F) -> bool
    where
        E: EventOf<S>,
        F: Fn(AnyEvent<'_>) + 'static,
    {
        self.try_sub_any::<E, F>(tag, callback).is_ok()
    }

    /// Like [`sub_any`](Self::sub_any), returning the new id.
    ///
    /// # Errors
    ///
    /// [`ManagerError::TagInUse`] if `tag` already owns a subscription.
    pub fn try_sub_any<E, F>(&mut self, tag: K, callback: F) -> Result<SubscriptionId, ManagerError>
    where
        E: EventOf<S>,
        F: Fn(AnyEvent<'_>) + 'static,
    {
        self.ensure_vacant(tag)?;
        let id = self.subscriber.subscribe_any::<E, F>(callback);
        Ok(self.record::<E>(tag, id))
    }

    /// Release the subscription owned by `tag`.
    ///
    /// Returns `true` iff the bus removed it. A tag whose registration had
    /// already vanished from the bus is forgotten and reported as `false`.
    pub fn unsub(&mut self, tag: K) -> bool {
        self.try_unsub(tag).is_ok()
    }

    /// Like [`unsub`](Self::unsub), reporting why it failed.
    ///
    /// # Errors
    ///
    /// - [`ManagerError::UnknownTag`] if `tag` owns nothing.
    /// - [`ManagerError::StaleSubscription`] if the bus no longer held the
    ///   registration. The tag is released regardless.
    pub fn try_unsub(&mut self, tag: K) -> Result<(), ManagerError> {
        let managed = self
            .subscriptions
            .remove(&tag)
            .ok_or_else(|| ManagerError::UnknownTag {
                tag: format!("{tag:?}"),
            })?;
        self.release(tag, managed)
    }

    /// Release the subscription owned by `tag`, provided it is for `E`.
    ///
    /// When `tag` is subscribed to some other type this returns `false`
    /// and the subscription stays active.
    pub fn unsub_as<E: EventOf<S>>(&mut self, tag: K) -> bool {
        self.try_unsub_as::<E>(tag).is_ok()
    }

    /// Like [`unsub_as`](Self::unsub_as), reporting why it failed.
    ///
    /// # Errors
    ///
    /// - [`ManagerError::UnknownTag`] if `tag` owns nothing.
    /// - [`ManagerError::EventTypeMismatch`] if `tag` is subscribed to a
    ///   different type. Nothing changes.
    /// - [`ManagerError::StaleSubscription`] as for
    ///   [`try_unsub`](Self::try_unsub).
    pub fn try_unsub_as<E: EventOf<S>>(&mut self, tag: K) -> Result<(), ManagerError> {
        let requested = EventTypeId::of::<E>();
        let managed = self
            .subscriptions
            .get(&tag)
            .copied()
            .ok_or_else(|| ManagerError::UnknownTag {
                tag: format!("{tag:?}"),
            })?;

        if managed.event_type != requested {
            debug!(
                tag = ?tag,
                requested = %requested,
                registered = %managed.event_type,
                "Tagged unsubscribe named the wrong event type"
            );
            return Err(ManagerError::EventTypeMismatch {
                tag: format!("{tag:?}"),
                requested,
                registered: managed.event_type,
            });
        }

        self.subscriptions.remove(&tag);
        self.release(tag, managed)
    }

    /// Release every tagged subscription and empty the index.
    ///
    /// Returns how many registrations the bus actually removed.
    pub fn unsubscribe_all(&mut self) -> usize {
        let total = self.subscriptions.len();
        let subscriber = self.subscriber;
        let removed = self
            .subscriptions
            .drain()
            .filter(|(_, managed)| {
                subscriber
                    .unsubscribe_erased(managed.event_type, managed.id)
                    .is_ok()
            })
            .count();

        if total > 0 {
            debug!(total, removed, "Released all tagged subscriptions");
        }
        removed
    }

    /// Whether `tag` currently owns a subscription.
    #[must_use]
    pub fn is_active(&self, tag: K) -> bool {
        self.subscriptions.contains_key(&tag)
    }

    /// The subscription owned by `tag`, if any.
    #[must_use]
    pub fn get(&self, tag: K) -> Option<ManagedSubscription> {
        self.subscriptions.get(&tag).copied()
    }

    /// Number of active tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Active tags, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = K> + '_ {
        self.subscriptions.keys().copied()
    }

    /// The view this manager registers through.
    #[must_use]
    pub fn subscriber(&self) -> Subscriber<'bus, S> {
        self.subscriber
    }

    fn ensure_vacant(&self, tag: K) -> Result<(), ManagerError> {
        match self.subscriptions.get(&tag) {
            Some(existing) => {
                warn!(tag = ?tag, id = %existing.id, "Tag already owns a subscription");
                Err(ManagerError::TagInUse {
                    tag: format!("{tag:?}"),
                    id: existing.id,
                })
            }
            None => Ok(()),
        }
    }

    fn record<E: EventOf<S>>(&mut self, tag: K, id: SubscriptionId) -> SubscriptionId {
        let event_type = EventTypeId::of::<E>();
        self.subscriptions
            .insert(tag, ManagedSubscription { event_type, id });
        debug!(tag = ?tag, event_type = %event_type, id = %id, "Tagged subscription created");
        id
    }

    fn release(&self, tag: K, managed: ManagedSubscription) -> Result<(), ManagerError> {
        match self
            .subscriber
            .unsubscribe_erased(managed.event_type, managed.id)
        {
            Ok(()) => {
                debug!(tag = ?tag, id = %managed.id, "Tagged subscription released");
                Ok(())
            }
            Err(source) => {
                warn!(tag = ?tag, error = %source, "Dropped stale tagged subscription");
                Err(ManagerError::StaleSubscription {
                    tag: format!("{tag:?}"),
                    source,
                })
            }
        }
    }
}

impl<K, S> Drop for SubscriptionManager<'_, K, S>
where
    K: Copy + Eq + Hash + fmt::Debug,
    S: EventSet,
{
    fn drop(&mut self) {
        self.unsubscribe_all();
    }
}

impl<K, S> fmt::Debug for SubscriptionManager<'_, K, S>
where
    K: Copy + Eq + Hash + fmt::Debug,
    S: EventSet,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionManager")
            .field("subscriptions", &self.subscriptions)
            .finish_non_exhaustive()
    }
}
