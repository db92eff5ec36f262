//! Observable single-value state container
//!
//! A [`StateContainer`] owns one value and broadcasts every replacement to
//! its subscribers, synchronously and in subscription order. Readers only
//! ever get shared snapshots (`Rc<S>`); writers submit a whole new value.
//!
//! # Re-entrancy
//!
//! `set` may be called from inside a subscriber. The new value is stored
//! immediately, but its notification round is queued and runs after the
//! in-progress round finishes. Every `set` produces exactly one round
//! carrying its own value, in call order.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::debug;

/// Stable identity of a container, used by hosts to address or persist it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(String);

impl StateKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Notification delivered to subscribers after a replacement
#[derive(Debug)]
pub struct StateEvent<S> {
    pub key: StateKey,
    pub state: Rc<S>,
}

type Handler<S> = Rc<dyn Fn(&StateEvent<S>)>;

struct Shared<S> {
    key: StateKey,
    state: RefCell<Rc<S>>,
    subscribers: RefCell<Vec<(u64, Handler<S>)>>,
    next_subscriber_id: Cell<u64>,
    pending: RefCell<VecDeque<Rc<S>>>,
    dispatching: Cell<bool>,
}

impl<S> Shared<S> {
    fn is_subscribed(&self, id: u64) -> bool {
        self.subscribers.borrow().iter().any(|(sid, _)| *sid == id)
    }

    fn remove_subscriber(&self, id: u64) {
        self.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
    }
}

/// Clears the dispatching flag even if a subscriber panics
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Handle to a shared, observable value.
///
/// Cloning the handle does not clone the value: all clones see and notify
/// the same state and subscribers.
pub struct StateContainer<S> {
    shared: Rc<Shared<S>>,
}

impl<S> Clone for StateContainer<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for StateContainer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateContainer")
            .field("key", &self.shared.key)
            .field("state", &self.shared.state.borrow())
            .field("subscribers", &self.shared.subscribers.borrow().len())
            .finish()
    }
}

impl<S: 'static> StateContainer<S> {
    pub fn new(key: impl Into<StateKey>, initial: S) -> Self {
        let key = key.into();
        debug!("Creating state container {}", key);

        Self {
            shared: Rc::new(Shared {
                key,
                state: RefCell::new(Rc::new(initial)),
                subscribers: RefCell::new(Vec::new()),
                next_subscriber_id: Cell::new(0),
                pending: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
            }),
        }
    }

    pub fn key(&self) -> &StateKey {
        &self.shared.key
    }

    /// Current value
    pub fn get(&self) -> Rc<S> {
        self.shared.state.borrow().clone()
    }

    /// Replace the value and notify every subscriber.
    ///
    /// Returns once all queued notification rounds have run, unless called
    /// from inside a subscriber, in which case the round is queued for the
    /// outer dispatch loop.
    pub fn set(&self, next: S) {
        let next = Rc::new(next);
        *self.shared.state.borrow_mut() = Rc::clone(&next);
        self.shared.pending.borrow_mut().push_back(next);

        if self.shared.dispatching.get() {
            debug!("Queued re-entrant update of {}", self.shared.key);
            return;
        }

        self.dispatch();
    }

    /// Replace the value with one computed from the current snapshot
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&S) -> S,
    {
        let current = self.get();
        self.set(f(&current));
    }

    /// Register a handler for every future replacement.
    ///
    /// The handler stays registered until the returned [`Subscription`] is
    /// unsubscribed or dropped.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&StateEvent<S>) + 'static,
    {
        let id = self.shared.next_subscriber_id.get();
        self.shared.next_subscriber_id.set(id + 1);
        self.shared
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(handler)));

        let shared: Weak<Shared<S>> = Rc::downgrade(&self.shared);
        Subscription::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.remove_subscriber(id);
            }
        })
    }

    /// Non-owning handle, for handlers that need to reach their own container
    pub fn downgrade(&self) -> WeakStateContainer<S> {
        WeakStateContainer {
            shared: Rc::downgrade(&self.shared),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.borrow().len()
    }

    fn dispatch(&self) {
        self.shared.dispatching.set(true);
        let _guard = DispatchGuard(&self.shared.dispatching);

        loop {
            let next = self.shared.pending.borrow_mut().pop_front();
            let Some(state) = next else {
                break;
            };

            // Snapshot so handlers may subscribe or unsubscribe while running
            let handlers: Vec<(u64, Handler<S>)> = self.shared.subscribers.borrow().clone();
            debug!(
                "Notifying {} subscribers of {}",
                handlers.len(),
                self.shared.key
            );

            let event = StateEvent {
                key: self.shared.key.clone(),
                state,
            };
            for (id, handler) in handlers {
                // Skip handlers removed earlier in this round
                if self.shared.is_subscribed(id) {
                    handler(&event);
                }
            }
        }
    }
}

/// Weak counterpart of [`StateContainer`]
pub struct WeakStateContainer<S> {
    shared: Weak<Shared<S>>,
}

impl<S> Clone for WeakStateContainer<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

impl<S> WeakStateContainer<S> {
    /// `None` once every strong handle is gone
    pub fn upgrade(&self) -> Option<StateContainer<S>> {
        self.shared.upgrade().map(|shared| StateContainer { shared })
    }
}

/// Capability to deregister a subscriber.
///
/// Unsubscribing twice is a no-op. Dropping the subscription unsubscribes;
/// use [`Subscription::detach`] to keep the handler for the container's
/// whole lifetime.
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
    release: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: RefCell::new(Some(Box::new(release))),
        }
    }

    pub fn unsubscribe(&self) {
        let release = self.release.borrow_mut().take();
        if let Some(release) = release {
            release();
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.borrow().is_some()
    }

    /// Keep the handler registered without holding on to the subscription.
    ///
    /// A detached handler that captures a clone of its own container keeps
    /// the container alive forever (`Rc` cycle). Capture a
    /// [`WeakStateContainer`] from [`StateContainer::downgrade`] instead.
    pub fn detach(self) {
        self.release.borrow_mut().take();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
