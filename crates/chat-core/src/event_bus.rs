//! Single-consumer event queue feeding the reducer.
//!
//! The bus is single-threaded (WASM constraint) and uses interior mutability
//! via RefCell. Transports and UI push events; the client drains them in
//! order, one handler at a time.
//!
//! Socket frames and timers arrive outside the UI's input loop. A bus built
//! with `with_waker` calls the waker on every emit so the host can schedule a
//! frame instead of polling.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use chat_types::event::ChatEvent;

/// Shared event bus: clone-cheap via Rc.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<ChatEvent>>>,
    waker: Option<Rc<dyn Fn()>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
            waker: None,
        }
    }

    /// Bus that calls `waker` after each emitted event
    pub fn with_waker(waker: impl Fn() + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
            waker: Some(Rc::new(waker)),
        }
    }

    /// Publish an event. Called by transports, timers and the UI.
    pub fn emit(&self, event: ChatEvent) {
        self.inner.borrow_mut().push_back(event);
        if let Some(wake) = &self.waker {
            wake();
        }
    }

    /// Take the oldest pending event.
    pub fn pop(&self) -> Option<ChatEvent> {
        self.inner.borrow_mut().pop_front()
    }

    /// Drain all pending events.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    /// Check if there are pending events (useful for egui repaint triggers).
    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
