//! Window-scoped event broadcast with scoped subscriptions.
//!
//! A drag has to keep tracking the pointer after it leaves the widget that
//! started it, so move/up listeners hang off a window-wide hub rather than
//! the widget. Each listener is held by a [`Subscription`]; dropping it
//! deregisters the listener so a torn-down view is never called back.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Handler<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct HubState<E> {
    next_id: u64,
    handlers: Vec<(u64, Handler<E>)>,
}

pub struct EventHub<E> {
    state: Rc<RefCell<HubState<E>>>,
}

impl<E> Clone for EventHub<E> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<E> Default for EventHub<E> {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(HubState {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }
}

impl<E> fmt::Debug for EventHub<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<E: 'static> EventHub<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` until the returned guard is dropped.
    #[must_use = "dropping the subscription immediately deregisters the handler"]
    pub fn subscribe(&self, handler: impl FnMut(&E) + 'static) -> Subscription {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        let handler: Handler<E> = Rc::new(RefCell::new(handler));
        state.handlers.push((id, handler));

        let weak: Weak<RefCell<HubState<E>>> = Rc::downgrade(&self.state);
        Subscription {
            id,
            release: Some(Box::new(move |id| {
                if let Some(state) = weak.upgrade() {
                    state.borrow_mut().handlers.retain(|(h, _)| *h != id);
                }
            })),
        }
    }

    /// Deliver `event` to every listener registered at the time of the call.
    ///
    /// Listeners may subscribe or unsubscribe while handling; those changes
    /// apply from the next dispatch.
    pub fn dispatch(&self, event: &E) {
        let handlers: Vec<Handler<E>> = self
            .state
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            // A handler re-entering dispatch would find itself borrowed.
            if let Ok(mut handler) = handler.try_borrow_mut() {
                (&mut *handler)(event);
            } else {
                tracing::warn!("Skipping re-entrant event handler");
            }
        }
    }
}

impl<E> EventHub<E> {
    pub fn listener_count(&self) -> usize {
        self.state.borrow().handlers.len()
    }
}

/// Keeps one hub listener alive.
pub struct Subscription {
    id: u64,
    release: Option<Box<dyn FnOnce(u64)>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Deregister now rather than at drop.
    pub fn cancel(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}
