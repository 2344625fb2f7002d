//! FILENAME: core/datasource/src/subscription.rs
//! PURPOSE: Listener registration and scoped release.
//! CONTEXT: Single-threaded (`Rc`/`RefCell`). A `ListenerSet` hands out
//! `Subscription` guards; releasing a guard (explicitly or by dropping it)
//! removes its callback before the next notification cycle. Notification
//! iterates over a copy of the callback list, so callbacks may subscribe,
//! unsubscribe or trigger further notifications while running.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Callback shared by the listener set.
pub type Listener<T> = Rc<dyn Fn(&T)>;

// ============================================================================
// SUBSCRIPTION
// ============================================================================

/// RAII guard for a registered listener.
#[must_use = "dropping a Subscription releases it immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wraps the release action of a listener registration.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Subscription {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription that holds nothing.
    pub fn empty() -> Self {
        Subscription { release: None }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Release the listener now. Same as dropping the guard.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

// ============================================================================
// LISTENER SET
// ============================================================================

struct Slots<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// Ordered set of callbacks notified with a `&T`.
pub struct ListenerSet<T: 'static> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T: 'static> ListenerSet<T> {
    pub fn new() -> Self {
        ListenerSet {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a callback. It stays registered while the returned
    /// guard is alive.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            let listener: Listener<T> = Rc::new(listener);
            slots.entries.push((id, listener));
            id
        };

        let weak: Weak<RefCell<Slots<T>>> = Rc::downgrade(&self.slots);
        Subscription::new(move || {
            if let Some(slots) = weak.upgrade() {
                slots.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Call every registered listener in registration order.
    pub fn notify(&self, value: &T) {
        let listeners: Vec<Listener<T>> = self
            .slots
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for ListenerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
