//! Generic publish/subscribe primitive.
//!
//! # Responsibility
//! - Hold an ordered list of listener callbacks.
//! - Deliver one value to every listener synchronously on publish.
//!
//! # Invariants
//! - Listeners are called in subscription order.
//! - A publish iterates over the listener list captured when it started;
//!   listeners may subscribe, unsubscribe or publish re-entrantly.
//! - A panicking listener is isolated: it is reported in `PublishReport` and
//!   the remaining listeners still run.
//! - Dropping a `Subscription` removes its listener before the next publish.

use crate::diagnostics::panic_message;
use log::error;
use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

const MAX_FAILURE_MESSAGE_CHARS: usize = 160;

type Listener<T> = Rc<dyn Fn(&T)>;

/// Registration-order id of one listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl Display for ListenerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// One listener that panicked during a publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    pub listener_id: ListenerId,
    /// Sanitized panic payload.
    pub message: String,
}

/// Outcome of one publish call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Listeners that returned normally.
    pub notified: usize,
    pub failures: Vec<ListenerFailure>,
}

impl PublishReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

struct Registry<T> {
    next_id: u64,
    entries: Vec<(ListenerId, Listener<T>)>,
}

/// Ordered listener list with synchronous fan-out.
pub struct Observable<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

impl<T: 'static> Observable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `listener` to the notification order.
    ///
    /// The listener stays registered for as long as the returned
    /// `Subscription` lives, or forever after `Subscription::detach`.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let listener: Listener<T> = Rc::new(listener);
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = ListenerId(registry.next_id);
            registry.next_id += 1;
            registry.entries.push((id, listener));
            id
        };

        let registry: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            id,
            release: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry
                        .borrow_mut()
                        .entries
                        .retain(|(entry_id, _)| *entry_id != id);
                }
            })),
        }
    }

    /// Calls every registered listener with `value`, in subscription order.
    pub fn publish(&self, value: &T) -> PublishReport {
        // Borrow is released before any listener runs.
        let listeners: Vec<(ListenerId, Listener<T>)> = self.registry.borrow().entries.clone();

        let mut report = PublishReport::default();
        for (listener_id, listener) in listeners {
            match panic::catch_unwind(AssertUnwindSafe(|| listener(value))) {
                Ok(()) => report.notified += 1,
                Err(payload) => {
                    let message = panic_message(payload.as_ref(), MAX_FAILURE_MESSAGE_CHARS);
                    error!(
                        "event=listener_failed module=state status=error listener={} payload={}",
                        listener_id, message
                    );
                    report.failures.push(ListenerFailure {
                        listener_id,
                        message,
                    });
                }
            }
        }
        report
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }
}

/// Disposal handle for one listener registration.
///
/// Dropping the handle unsubscribes the listener.
#[must_use = "dropping a Subscription unsubscribes the listener immediately"]
pub struct Subscription {
    id: ListenerId,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Removes the listener now.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    /// Keeps the listener registered for the observable's whole lifetime.
    pub fn detach(mut self) {
        self.release = None;
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

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}
