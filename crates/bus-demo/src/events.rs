//! Event payloads and subscription tags used by the demo.

use typed_bus::{event_set, Event};

/// The pointer moved to a new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerMoved {
    pub x: i32,
    pub y: i32,
}
impl Event for PointerMoved {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonPressed;
impl Event for ButtonPressed {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowResized;
impl Event for WindowResized {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowClosed;
impl Event for WindowClosed {}

event_set! {
    /// Everything the demo bus carries.
    pub enum DemoEvents: PointerMoved, ButtonPressed, WindowResized, WindowClosed;
}

/// Names the demo gives its subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionTag {
    PointerMoved,
    ButtonPressed,
    WindowClosed,
}
