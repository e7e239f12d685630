//! Synchronous publish/subscribe primitive for model updates.
//!
//! Models own one [`Event`] per kind of change they broadcast. Listeners
//! are invoked synchronously, in registration order, with no payload: a
//! notification means "something changed, pull fresh state".

use crate::ModelError;
use std::cell::RefCell;

type Listener = Box<dyn FnMut() -> Result<(), ModelError>>;

/// An ordered list of listener callbacks with synchronous notification.
///
/// Listeners return `Result<(), ModelError>`; [`Event::notify`] is
/// fail-fast, so a failing listener aborts the chain and the error
/// propagates to whoever triggered the notification. There is no
/// unsubscribe and no deduplication: registering the same callback twice
/// invokes it twice.
///
/// `Event` is single-threaded (interior mutability via [`RefCell`]) and
/// deliberately not `Send` or `Sync`. Notification is never deferred or
/// batched; by the time `notify` returns, every listener has run.
#[derive(Default)]
pub struct Event {
    listeners: RefCell<Vec<Listener>>,
}

impl Event {
    /// Creates an event with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listener to the subscriber list.
    pub fn add_listener(&self, listener: impl FnMut() -> Result<(), ModelError> + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Invokes every registered listener, in insertion order.
    ///
    /// Stops at the first listener that returns an error and propagates
    /// it; later listeners do not run in that cycle. Listeners may
    /// register new listeners on this same event while a notification is
    /// in flight; those run from the next `notify` onward, not in the
    /// current cycle. A re-entrant `notify` on this same event from
    /// inside a listener sees the swapped-out list and runs nothing: one
    /// cycle per event at a time.
    pub fn notify(&self) -> Result<(), ModelError> {
        // Swap the list out so listeners can call add_listener on this
        // event without hitting a RefCell double borrow.
        let mut current = self.listeners.take();
        let mut result = Ok(());
        for listener in &mut current {
            if let Err(e) = listener() {
                result = Err(e);
                break;
            }
        }
        let added = self.listeners.take();
        current.extend(added);
        self.listeners.replace(current);
        result
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
