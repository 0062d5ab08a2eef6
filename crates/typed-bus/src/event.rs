//! # Event Identity
//!
//! Marker traits, type identity and the checked downcast used at the
//! registry boundary.
//!
//! A bus is bound to a closed [`EventSet`]. Payload types opt in with
//! [`Event`] and join a set through the [`event_set!`](crate::event_set)
//! macro, which implements [`EventOf`] for each listed type.

use std::any::{self, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Marker for values that can travel over a bus.
///
/// Carries no behaviour of its own. Payloads may hold any fields.
pub trait Event: Any {}

/// A closed, compile-time set of event types.
///
/// Implemented by the [`event_set!`](crate::event_set) macro; there is
/// rarely a reason to implement it by hand.
pub trait EventSet: 'static {
    /// Identities of every member, in declaration order.
    fn declared_types() -> Vec<EventTypeId>;
}

/// Proof that `Self` is a member of the event set `S`.
pub trait EventOf<S: EventSet>: Event {}

/// Declares an event set and its members.
///
/// ```rust
/// use typed_bus::{event_set, Event, EventSet, EventTypeId};
///
/// struct Ping;
/// impl Event for Ping {}
/// struct Pong;
/// impl Event for Pong {}
///
/// event_set! {
///     pub enum NetEvents: Ping, Pong;
/// }
///
/// assert_eq!(
///     NetEvents::declared_types(),
///     vec![EventTypeId::of::<Ping>(), EventTypeId::of::<Pong>()]
/// );
/// ```
///
/// Listing a type twice fails to compile.
#[macro_export]
macro_rules! event_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $($event:ty),+ $(,)? ;
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis enum $name {}

        impl $crate::EventSet for $name {
            fn declared_types() -> ::std::vec::Vec<$crate::EventTypeId> {
                ::std::vec![$($crate::EventTypeId::of::<$event>()),+]
            }
        }

        $(impl $crate::EventOf<$name> for $event {})+
    };
}

/// Structural identity of a concrete event type.
///
/// Two identities are equal iff they name the same type. The type name is
/// carried only for logs and error messages.
#[derive(Clone, Copy)]
pub struct EventTypeId {
    type_id: TypeId,
    name: &'static str,
}

impl EventTypeId {
    /// Identity of `E`.
    #[must_use]
    pub fn of<E: Event>() -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            name: any::type_name::<E>(),
        }
    }

    /// Fully qualified type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path (generic arguments are kept).
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        let base_end = self.name.find('<').unwrap_or(self.name.len());
        let start = self.name[..base_end].rfind("::").map_or(0, |i| i + 2);
        &self.name[start..]
    }
}

impl PartialEq for EventTypeId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for EventTypeId {}

impl Hash for EventTypeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for EventTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventTypeId").field(&self.name).finish()
    }
}

impl fmt::Display for EventTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Borrowed, type-erased view of a published event.
///
/// This is what the registry hands to callbacks registered with
/// `subscribe_any`. Recover the concrete payload with [`AnyEvent::unpack`].
#[derive(Clone, Copy)]
pub struct AnyEvent<'a> {
    event_type: EventTypeId,
    payload: &'a dyn Any,
}

impl<'a> AnyEvent<'a> {
    /// Wrap a concrete event.
    #[must_use]
    pub fn new<E: Event>(event: &'a E) -> Self {
        Self {
            event_type: EventTypeId::of::<E>(),
            payload: event,
        }
    }

    /// Identity of the wrapped event's concrete type.
    #[must_use]
    pub fn event_type(&self) -> EventTypeId {
        self.event_type
    }

    /// Whether the wrapped event is an `E`.
    #[must_use]
    pub fn is<E: Event>(&self) -> bool {
        self.payload.is::<E>()
    }

    /// View the event as `E`, or `None` if it is some other type.
    #[must_use]
    pub fn try_unpack<E: Event>(&self) -> Option<&'a E> {
        self.payload.downcast_ref::<E>()
    }

    /// View the event as `E`.
    ///
    /// # Panics
    ///
    /// Panics if the event is not an `E`. Asking for the wrong type is a
    /// programming error, usually a callback registered for one type that
    /// unpacks another.
    #[must_use]
    #[track_caller]
    pub fn unpack<E: Event>(&self) -> &'a E {
        match self.try_unpack::<E>() {
            Some(event) => event,
            None => panic!(
                "invalid downcast: event is `{}`, not `{}`",
                self.event_type.name(),
                any::type_name::<E>()
            ),
        }
    }
}

impl fmt::Debug for AnyEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyEvent")
            .field("event_type", &self.event_type)
            .finish_non_exhaustive()
    }
}
