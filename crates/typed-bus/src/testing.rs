//! Shared fixtures for unit tests.

use crate::event::Event;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Moved {
    pub x: i32,
    pub y: i32,
}
impl Event for Moved {}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Clicked;
impl Event for Clicked {}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Resized;
impl Event for Resized {}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Closed;
impl Event for Closed {}

crate::event_set! {
    pub(crate) enum TestEvents: Moved, Clicked, Resized, Closed;
}

/// Records labels in call order.
#[derive(Debug, Clone, Default)]
pub(crate) struct Recorder(Rc<RefCell<Vec<String>>>);

impl Recorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, label: impl Into<String>) {
        self.0.borrow_mut().push(label.into());
    }

    pub(crate) fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub(crate) fn len(&self) -> usize {
        self.0.borrow().len()
    }
}
