//! # Typed Bus - In-Process Publish/Subscribe
//!
//! A single-threaded event bus bound to a closed, compile-time set of event
//! types. Producers publish typed values; consumers register typed callbacks
//! keyed by the exact event type.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐                                 ┌──────────────┐
//! │  Producer    │                                 │  Consumer    │
//! │              │  publish(&E)       subscribe()  │              │
//! │  Publisher   │ ──────┐               ┌──────── │  Subscriber  │
//! └──────────────┘       │               │         └──────┬───────┘
//!                        ▼               ▼                │ (optional)
//!                  ┌──────────────────────────┐    ┌──────▼────────────┐
//!                  │        EventBus<S>       │    │ SubscriptionMgr   │
//!                  │ EventTypeId -> [(cb,id)] │◄───│ tag -> (type, id) │
//!                  └──────────────────────────┘    └───────────────────┘
//! ```
//!
//! ## Rules
//!
//! - **Exact-type dispatch:** a publish of `E` reaches only callbacks
//!   registered for `E`, in registration order.
//! - **Closed set:** every entry point is bounded by [`EventOf<S>`], so a
//!   type outside the bus's [`EventSet`] is rejected at compile time.
//! - **Snapshot dispatch:** callbacks may subscribe or unsubscribe while a
//!   publish is in flight; the change applies from the next publish on.
//! - **Single thread:** the bus is neither `Send` nor `Sync`. Wrap it in
//!   your own lock if several threads must share it.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use typed_bus::{event_set, Event, EventBus};
//!
//! struct Moved {
//!     x: i32,
//!     y: i32,
//! }
//! impl Event for Moved {}
//!
//! struct Closed;
//! impl Event for Closed {}
//!
//! event_set! {
//!     /// Events understood by a window.
//!     pub enum WindowEvents: Moved, Closed;
//! }
//!
//! let bus: EventBus<WindowEvents> = EventBus::new();
//! let seen = Rc::new(Cell::new(0));
//! let sink = Rc::clone(&seen);
//!
//! let id = bus
//!     .subscriber()
//!     .subscribe(move |moved: &Moved| sink.set(moved.x + moved.y));
//!
//! assert_eq!(bus.publisher().publish(&Moved { x: 1, y: 2 }), 1);
//! assert_eq!(seen.get(), 3);
//!
//! assert!(bus.subscriber().unsubscribe::<Moved>(id));
//! assert_eq!(bus.publisher().publish(&Closed), 0);
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod bus;
pub mod error;
pub mod event;
pub mod manager;
pub mod publisher;
pub mod subscriber;

#[cfg(test)]
mod testing;

// Re-export main types
pub use bus::EventBus;
pub use error::{BusError, ManagerError};
pub use event::{AnyEvent, Event, EventOf, EventSet, EventTypeId};
pub use manager::{ManagedSubscription, SubscriptionManager};
pub use publisher::Publisher;
pub use subscriber::{Subscriber, SubscriptionId};
